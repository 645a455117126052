// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard layout tables for Tipkovnica.
//!
//! A layout maps physical key codes to the characters a key emits with and
//! without shift. One layout exists per [`Language`]; all three ship as JSON
//! resources embedded into the binary and are loaded through
//! [`LayoutRegistry`].
//!
//! # Features
//!
//! - **Row-major lookup**: [`KeyboardLayout::find`] scans rows in order and
//!   the first key with a matching code wins
//! - **Layout inheritance**: a layout may name another language in
//!   `inherits` and override only the keys that differ
//! - **Permissive validation**: warnings are collected, only ambiguous or
//!   unusable tables are rejected
//! - **Overrides**: a directory of `<language>.json` files replaces the
//!   embedded tables
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use tipkovnica::layout::{Language, LayoutRegistry};
//!
//! let registry = LayoutRegistry::builtin()?;
//! let croatian = registry.get(Language::Croatian);
//!
//! if let Some(key) = croatian.find("BracketLeft") {
//!     assert_eq!(key.resolve(false), "š");
//!     assert_eq!(key.resolve(true), "Š");
//! }
//! ```
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "name": "Hrvatski",
//!   "language": "croatian",
//!   "rows": [
//!     [{"main": "q", "shift": "Q", "code": "KeyQ"}]
//!   ]
//! }
//! ```

pub mod inheritance;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validation;

pub use parser::{parse_layout_file, parse_layout_from_str};
pub use registry::LayoutRegistry;
pub use types::{
    KeyConfig, KeyboardLayout, Language, ParseError, ParseResult, Severity, UnknownLanguage,
    ValidationIssue,
};
