// SPDX-License-Identifier: GPL-3.0-only

//! Shift state management for keyboard input.
//!
//! Two sources can activate shift:
//!
//! - **Toggle (caps lock)**: the on-screen ABC key. Stays active until
//!   tapped again.
//! - **Hold**: a physical Shift key. Active only while the key is down.
//!
//! Shift is active when either source is. There is no one-shot shift.
//!
//! # Example
//!
//! ```rust,ignore
//! use tipkovnica::input::ShiftState;
//!
//! let mut state = ShiftState::new();
//! state.press("ShiftLeft");
//! assert!(state.is_active());
//! state.release("ShiftLeft");
//! assert!(!state.is_active());
//! ```

use std::collections::HashSet;

/// Tracks caps lock and physically held Shift keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftState {
    /// Persistent toggle set by the on-screen caps key
    caps_lock: bool,

    /// Physical Shift codes currently held down
    held: HashSet<String>,
}

impl ShiftState {
    /// Creates a new `ShiftState` with caps lock off and nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles caps lock.
    ///
    /// # Returns
    ///
    /// `true` if caps lock is now on, `false` if it is now off
    pub fn toggle_caps_lock(&mut self) -> bool {
        self.caps_lock = !self.caps_lock;
        self.caps_lock
    }

    /// Returns `true` if caps lock is on.
    #[must_use]
    pub fn is_caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// Marks a physical Shift key as held.
    pub fn press(&mut self, code: &str) {
        self.held.insert(code.to_string());
    }

    /// Releases a physical Shift key. Releasing a key that is not held is a no-op.
    pub fn release(&mut self, code: &str) {
        self.held.remove(code);
    }

    /// Returns `true` if any physical Shift key is held.
    #[must_use]
    pub fn is_held(&self) -> bool {
        !self.held.is_empty()
    }

    /// Returns `true` if shifted characters should be emitted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.caps_lock || self.is_held()
    }

    /// Forgets held keys while keeping caps lock.
    ///
    /// Used when the keyboard stops receiving physical events, since the
    /// matching key-up events will never arrive.
    pub fn clear_held(&mut self) {
        self.held.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_inactive() {
        let state = ShiftState::new();
        assert!(!state.is_active());
        assert!(!state.is_caps_lock());
        assert!(!state.is_held());
    }

    #[test]
    fn test_caps_lock_toggles() {
        let mut state = ShiftState::new();
        assert!(state.toggle_caps_lock());
        assert!(state.is_active());
        assert!(!state.toggle_caps_lock());
        assert!(!state.is_active());
    }

    #[test]
    fn test_hold_until_release() {
        let mut state = ShiftState::new();
        state.press("ShiftLeft");
        state.press("ShiftRight");
        state.release("ShiftLeft");
        assert!(state.is_active(), "ShiftRight is still down");
        state.release("ShiftRight");
        assert!(!state.is_active());
    }

    #[test]
    fn test_caps_and_hold_combine() {
        let mut state = ShiftState::new();
        state.toggle_caps_lock();
        state.press("ShiftLeft");
        state.release("ShiftLeft");
        assert!(state.is_active(), "caps lock survives a Shift release");
    }

    #[test]
    fn test_clear_held_keeps_caps_lock() {
        let mut state = ShiftState::new();
        state.toggle_caps_lock();
        state.press("ShiftLeft");
        state.clear_held();
        assert!(!state.is_held());
        assert!(state.is_caps_lock());
    }
}
