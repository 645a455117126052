// SPDX-License-Identifier: GPL-3.0-only

//! Tipkovnica - an on-screen keyboard for COSMIC desktop
//!
//! A keyboard with Croatian, English and Kajkavski layouts, a calculator,
//! emoji and special character panels, and a text area the keys type into.
//! Signed-in users can save texts, keep their keyboard settings and import
//! dictionary words.
//!
//! # Modules
//!
//! - `app`: Application model and COSMIC Application trait implementation
//! - `app_settings`: Centralized application constants
//! - `calculator`: Calculator state machine and number formatting
//! - `config`: User configuration with cosmic_config persistence
//! - `editor`: Text buffer and the save dialog
//! - `error`: Validation, store and application errors
//! - `input`: Physical key events, shift tracking and haptics
//! - `keyboard`: Keyboard state: mode, language, caps lock and key dispatch
//! - `layout`: Layout tables, JSON parsing, validation and inheritance
//! - `pages`: Login, registration, saved texts and admin page state
//! - `panels`: Emoji and special character tables
//! - `renderer`: Keyboard widgets and toasts
//! - `settings`: Guest preferences and per-user settings loading
//! - `store`: The persistence seam and its bundled JSON implementation

pub mod app;
pub mod app_settings;
pub mod calculator;
pub mod config;
pub mod editor;
pub mod error;
pub mod input;
pub mod keyboard;
pub mod layout;
pub mod pages;
pub mod panels;
pub mod renderer;
pub mod settings;
pub mod store;
