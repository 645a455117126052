// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard dispatch core.
//!
//! The keyboard never touches the text buffer. Every event or tap returns a
//! [`KeyboardOutput`] that the application applies to its buffer.
//!
//! ```rust,ignore
//! use tipkovnica::keyboard::{Keyboard, KeyboardOutput};
//! use tipkovnica::layout::{Language, LayoutRegistry};
//!
//! let mut keyboard = Keyboard::new(LayoutRegistry::builtin()?, Language::Croatian);
//! keyboard.toggle_caps_lock();
//! assert_eq!(keyboard.tap_code("Semicolon"), Some(KeyboardOutput::Input("Č".into())));
//! ```

pub mod state;

pub use state::{Keyboard, KeyboardOutput, Mode};
