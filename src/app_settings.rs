// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Application ID in RDNN (reverse domain name notation) format.
pub const APP_ID: &str = "io.github.tipkovnica.Tipkovnica";

/// Default window width in pixels.
pub const DEFAULT_WIDTH: f32 = 900.0;

/// Default window height in pixels.
pub const DEFAULT_HEIGHT: f32 = 720.0;

/// Minimum window width in pixels.
pub const MIN_WIDTH: f32 = 480.0;

/// Minimum window height in pixels.
pub const MIN_HEIGHT: f32 = 420.0;

/// Spacing between keys in pixels.
pub const KEY_SPACING: f32 = 6.0;

/// Width of a letter key in pixels.
pub const KEY_WIDTH: f32 = 52.0;

/// Length of the haptic pulse sent on each key tap.
pub const HAPTIC_PULSE_MS: u64 = 10;

/// Number of dictionary words sent to the store per request.
pub const IMPORT_BATCH_SIZE: usize = 500;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Title used when a text is saved without one.
pub const UNTITLED_TEXT_TITLE: &str = "Neimenovani tekst";

/// How long a toast stays on screen.
pub const TOAST_DURATION_MS: u64 = 3000;

/// Toast timeout check interval.
pub const TOAST_TIMER_INTERVAL_MS: u64 = 100;
