// SPDX-License-Identifier: GPL-3.0-only

//! Physical key event translation.
//!
//! Window-system key events carry both a logical key (what the key means
//! under the active system keymap) and a physical code (where the key sits).
//! Dispatch uses the logical key for Backspace, Space, Enter and Shift, and
//! the physical code for everything else, so the on-screen layout decides
//! which character a key produces regardless of the system keymap.

use cosmic::iced::keyboard::{self, key};

/// The logical meaning of a key event, reduced to what dispatch needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalKey {
    Backspace,
    Space,
    Enter,
    Shift,
    /// Any key producing text under the system keymap.
    Character(String),
    /// Any other named key (arrows, function keys, modifiers other than Shift).
    Other,
}

/// A physical key-down or key-up event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Logical key under the system keymap
    pub key: LogicalKey,
    /// Physical key code, e.g. "KeyA", "BracketLeft", "ShiftLeft"
    pub code: String,
}

impl KeyEvent {
    /// Creates a key event.
    pub fn new(key: LogicalKey, code: impl Into<String>) -> Self {
        Self {
            key,
            code: code.into(),
        }
    }

    /// Translates an iced key and physical key into a `KeyEvent`.
    pub fn from_iced(logical: &keyboard::Key, physical: &key::Physical) -> Self {
        Self {
            key: translate_logical(logical),
            code: physical_code(physical),
        }
    }
}

/// Maps an iced logical key onto [`LogicalKey`].
pub fn translate_logical(logical: &keyboard::Key) -> LogicalKey {
    match logical {
        keyboard::Key::Named(key::Named::Backspace) => LogicalKey::Backspace,
        keyboard::Key::Named(key::Named::Space) => LogicalKey::Space,
        keyboard::Key::Named(key::Named::Enter) => LogicalKey::Enter,
        keyboard::Key::Named(key::Named::Shift) => LogicalKey::Shift,
        keyboard::Key::Character(c) if c.as_str() == " " => LogicalKey::Space,
        keyboard::Key::Character(c) => LogicalKey::Character(c.to_string()),
        _ => LogicalKey::Other,
    }
}

/// Returns the code name of a physical key.
///
/// Identified keys use their W3C code name ("KeyA", "Digit1", "Semicolon").
/// Unidentified keys get a name derived from the native scancode, which no
/// layout table uses, so they never match.
pub fn physical_code(physical: &key::Physical) -> String {
    match physical {
        key::Physical::Code(code) => format!("{:?}", code),
        key::Physical::Unidentified(native) => format!("Unidentified({:?})", native),
    }
}

// ============================================================================
// Tests
// ============================================================================
