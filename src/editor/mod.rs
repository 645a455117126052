// SPDX-License-Identifier: GPL-3.0-only

//! The text the keyboard types into, and the save dialog for it.

pub mod buffer;
pub mod save;

pub use buffer::{TextBuffer, TextStats};
pub use save::{SaveDialog, new_saved_text};
