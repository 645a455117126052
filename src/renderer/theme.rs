// SPDX-License-Identifier: GPL-3.0-only

//! Colors for the keyboard surface.
//!
//! The keyboard follows the user's light/dark preference from their
//! keyboard settings rather than the desktop theme, so every function takes
//! the theme explicitly.

use cosmic::Theme;
use cosmic::iced::Color;

use crate::renderer::ToastSeverity;
use crate::store::ThemePreference;

/// Theme used to color the keyboard for a preference.
pub fn keyboard_theme(preference: ThemePreference) -> Theme {
    match preference {
        ThemePreference::Light => Theme::light(),
        ThemePreference::Dark => Theme::dark(),
    }
}

/// Background of an idle key.
pub fn key_background_color(theme: &Theme) -> Color {
    Color::from(theme.cosmic().bg_component_color())
}

/// Background of a key that is held down.
pub fn key_pressed_color(theme: &Theme) -> Color {
    Color::from(theme.cosmic().accent_color())
}

pub fn key_text_color(theme: &Theme) -> Color {
    Color::from(theme.cosmic().on_bg_component_color())
}

/// Background of the ABC key while caps lock is on.
pub fn caps_active_color(theme: &Theme) -> Color {
    Color::from(theme.cosmic().success_color())
}

pub fn keyboard_background_color(theme: &Theme) -> Color {
    Color::from(theme.cosmic().bg_color())
}

/// Slightly transparent so the toast reads as an overlay.
pub fn toast_background_color(theme: &Theme) -> Color {
    Color::from(theme.cosmic().bg_component_color()).scale_alpha(0.95)
}

pub fn toast_text_color(theme: &Theme, severity: ToastSeverity) -> Color {
    let cosmic = theme.cosmic();
    match severity {
        ToastSeverity::Info => Color::from(cosmic.on_bg_component_color()),
        ToastSeverity::Warning => Color::from(cosmic.warning_color()),
        ToastSeverity::Error => Color::from(cosmic.destructive_color()),
    }
}

// ============================================================================
// Tests
// ============================================================================
