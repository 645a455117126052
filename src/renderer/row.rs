// SPDX-License-Identifier: GPL-3.0-only

//! Row rendering.

use cosmic::Element;
use cosmic::Theme;
use cosmic::iced::Length;
use cosmic::widget::{self, container};

use crate::app_settings::KEY_SPACING;
use crate::keyboard::Keyboard;
use crate::layout::KeyConfig;
use crate::renderer::key::render_letter_key;
use crate::renderer::message::RendererMessage;

/// Renders a layout row, centered horizontally.
pub fn render_row<'a>(
    keys: &[KeyConfig],
    keyboard: &Keyboard,
    theme: &Theme,
    key_height: f32,
) -> Element<'a, RendererMessage> {
    let row = keys.iter().fold(
        widget::row::row().spacing(KEY_SPACING),
        |row, key| row.push(render_letter_key(key, keyboard, theme, key_height)),
    );

    container(row).center_x(Length::Fill).into()
}
