// SPDX-License-Identifier: GPL-3.0-only

//! Alternate input surfaces: the emoji bar and the symbols grid.
//!
//! The calculator panel lives in [`crate::calculator`] because it carries
//! its own register state.

pub mod emoji;
pub mod symbols;

pub use emoji::{DEFAULT_FAVORITES, EmojiCategory, EmojiConfig, EmojiPanel};
pub use symbols::{SYMBOL_ROWS, SYMBOLS_TITLE};
