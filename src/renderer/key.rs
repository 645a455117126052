// SPDX-License-Identifier: GPL-3.0-only

//! Key rendering.
//!
//! Every key is a `button::custom` wrapping a container that carries the key
//! color, so pressed and caps-lock states can use keyboard theme colors
//! instead of the desktop button style.

use cosmic::Element;
use cosmic::Theme;
use cosmic::iced::{Alignment, Background, Border, Color, Length, Shadow};
use cosmic::widget::{self, button, container, icon};

use crate::app_settings::KEY_WIDTH;
use crate::keyboard::Keyboard;
use crate::layout::KeyConfig;
use crate::renderer::message::RendererMessage;
use crate::renderer::theme::{
    caps_active_color, key_background_color, key_pressed_color, key_text_color,
};

const KEY_BORDER_RADIUS: f32 = 6.0;

/// Visual state of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLook {
    Idle,
    /// Physically held down
    Pressed,
    /// Caps lock on (ABC key only)
    Latched,
}

impl KeyLook {
    fn background(self, theme: &Theme) -> Color {
        match self {
            KeyLook::Idle => key_background_color(theme),
            KeyLook::Pressed => key_pressed_color(theme),
            KeyLook::Latched => caps_active_color(theme),
        }
    }
}

/// Renders a letter key with the character it would type right now.
pub fn render_letter_key<'a>(
    key: &KeyConfig,
    keyboard: &Keyboard,
    theme: &Theme,
    height: f32,
) -> Element<'a, RendererMessage> {
    let look = if keyboard.is_key_pressed(&key.code) {
        KeyLook::Pressed
    } else {
        KeyLook::Idle
    };
    let label = key.resolve(keyboard.is_shift_active()).to_string();

    render_key(
        widget::text::body(label).into(),
        RendererMessage::KeyTapped(key.code.clone()),
        look,
        theme,
        Length::Fixed(KEY_WIDTH),
        height,
    )
}

/// Renders a key with a text label.
pub fn render_text_key<'a>(
    label: impl Into<String>,
    message: RendererMessage,
    look: KeyLook,
    theme: &Theme,
    width: Length,
    height: f32,
) -> Element<'a, RendererMessage> {
    render_key(
        widget::text::body(label.into()).into(),
        message,
        look,
        theme,
        width,
        height,
    )
}

/// Renders a key with a symbolic system icon.
pub fn render_icon_key<'a>(
    icon_name: &'static str,
    message: RendererMessage,
    look: KeyLook,
    theme: &Theme,
    width: Length,
    height: f32,
) -> Element<'a, RendererMessage> {
    render_key(
        icon::from_name(icon_name).size(16).symbolic(true).into(),
        message,
        look,
        theme,
        width,
        height,
    )
}

fn render_key<'a>(
    label: Element<'a, RendererMessage>,
    message: RendererMessage,
    look: KeyLook,
    theme: &Theme,
    width: Length,
    height: f32,
) -> Element<'a, RendererMessage> {
    let background = look.background(theme);
    let text = key_text_color(theme);

    let face = container(label)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .class(cosmic::style::Container::custom(move |_theme| container::Style {
            background: Some(Background::Color(background)),
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: KEY_BORDER_RADIUS.into(),
            },
            icon_color: Some(text),
            text_color: Some(text),
            shadow: Shadow::default(),
        }));

    button::custom(face)
        .on_press(message)
        .padding(0)
        .class(cosmic::style::Button::Text)
        .width(width)
        .height(Length::Fixed(height))
        .into()
}
