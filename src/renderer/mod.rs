// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard surface renderer.
//!
//! Turns [`Keyboard`](crate::keyboard::Keyboard) state into libcosmic
//! widgets. Rendering functions are pure: they read state and emit
//! [`RendererMessage`]s, which the application maps into its own messages.
//!
//! - **state**: the toast queue
//! - **theme**: keyboard colors for the light/dark preference
//! - **key**: a single key button
//! - **row**: a row of letter keys
//! - **panel**: the surface for the current mode
//! - **calculator**, **emoji**: panel surfaces
//! - **toast**: toast notifications

pub mod calculator;
pub mod emoji;
pub mod key;
pub mod message;
pub mod panel;
pub mod row;
pub mod state;
pub mod theme;
pub mod toast;

pub use message::RendererMessage;
pub use panel::render_keyboard;
pub use state::{Toast, ToastQueue, ToastSeverity};
pub use toast::{render_current_toast, with_toast};
