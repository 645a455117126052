// SPDX-License-Identifier: GPL-3.0-only

//! Input handling module for the Tipkovnica keyboard.
//!
//! This module translates window-system key events into the small event
//! model the keyboard dispatches on, and tracks shift state.
//!
//! # Features
//!
//! - **Key events**: Reduce iced key events to a logical key plus a physical code
//! - **Shift state**: Track caps lock (toggle) and physical Shift (hold)
//! - **Haptics**: Short feedback pulse on key taps
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use tipkovnica::input::{KeyEvent, LogicalKey, ShiftState};
//!
//! let event = KeyEvent::new(LogicalKey::Character("q".into()), "KeyQ");
//! let mut shift = ShiftState::new();
//! shift.toggle_caps_lock();
//! assert!(shift.is_active());
//! ```

pub mod haptics;
pub mod keycode;
pub mod modifier;

pub use haptics::{Haptics, LogHaptics};
pub use keycode::{KeyEvent, LogicalKey};
pub use modifier::ShiftState;
