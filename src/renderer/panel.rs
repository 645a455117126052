// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard surface rendering.
//!
//! The emoji bar sits on top of every mode. Below it goes the surface for
//! the current mode: layout rows with a control row, the calculator, or the
//! symbol grid.

use cosmic::Element;
use cosmic::Theme;
use cosmic::iced::{Alignment, Background, Length, Padding};
use cosmic::widget::{self, container};

use crate::app_settings::{KEY_SPACING, KEY_WIDTH};
use crate::keyboard::{Keyboard, Mode};
use crate::panels::{EmojiPanel, SYMBOL_ROWS, SYMBOLS_TITLE};
use crate::renderer::calculator::render_calculator;
use crate::renderer::emoji::render_emoji_bar;
use crate::renderer::key::{KeyLook, render_icon_key, render_text_key};
use crate::renderer::message::RendererMessage;
use crate::renderer::row::render_row;
use crate::renderer::theme::keyboard_background_color;

const SURFACE_PADDING: f32 = 8.0;

/// Renders the keyboard for its current mode.
pub fn render_keyboard<'a>(
    keyboard: &Keyboard,
    emoji: &EmojiPanel,
    theme: &Theme,
    key_height: f32,
) -> Element<'a, RendererMessage> {
    let surface = match (keyboard.mode(), keyboard.calculator()) {
        (Mode::Calculator, Some(calculator)) => render_calculator(calculator, theme, key_height),
        (Mode::Symbols, _) => render_symbols(theme, key_height),
        _ => render_letters(keyboard, theme, key_height),
    };
    let content = widget::column::column()
        .spacing(KEY_SPACING)
        .push(render_emoji_bar(emoji, theme, key_height))
        .push(surface);

    let background = keyboard_background_color(theme);
    container(content)
        .width(Length::Fill)
        .padding(Padding::from(SURFACE_PADDING))
        .class(cosmic::style::Container::custom(move |_theme| container::Style {
            background: Some(Background::Color(background)),
            ..container::Style::default()
        }))
        .into()
}

fn render_letters<'a>(
    keyboard: &Keyboard,
    theme: &Theme,
    key_height: f32,
) -> Element<'a, RendererMessage> {
    let mut column = widget::column::column().spacing(KEY_SPACING);

    for row in &keyboard.active_layout().rows {
        column = column.push(render_row(row, keyboard, theme, key_height));
    }

    column.push(render_controls(keyboard, theme, key_height)).into()
}

fn render_controls<'a>(
    keyboard: &Keyboard,
    theme: &Theme,
    key_height: f32,
) -> Element<'a, RendererMessage> {
    let fixed = Length::Fixed(KEY_WIDTH * 1.5);
    let caps_look = if keyboard.is_caps_lock() {
        KeyLook::Latched
    } else {
        KeyLook::Idle
    };

    let controls = widget::row::row()
        .spacing(KEY_SPACING)
        .align_y(Alignment::Center)
        .push(render_text_key(
            "ABC",
            RendererMessage::ToggleCaps,
            caps_look,
            theme,
            fixed,
            key_height,
        ))
        .push(render_text_key(
            keyboard.language().label(),
            RendererMessage::CycleLanguage,
            KeyLook::Idle,
            theme,
            fixed,
            key_height,
        ))
        .push(render_text_key(
            "123",
            RendererMessage::OpenCalculator,
            KeyLook::Idle,
            theme,
            fixed,
            key_height,
        ))
        .push(render_text_key(
            "#+=",
            RendererMessage::OpenSymbols,
            KeyLook::Idle,
            theme,
            fixed,
            key_height,
        ))
        .push(render_text_key(
            "",
            RendererMessage::Space,
            look_if(keyboard.is_key_pressed("Space")),
            theme,
            Length::Fill,
            key_height,
        ))
        .push(render_icon_key(
            "edit-clear-symbolic",
            RendererMessage::Backspace,
            look_if(keyboard.is_key_pressed("Backspace")),
            theme,
            fixed,
            key_height,
        ))
        .push(render_icon_key(
            "keyboard-enter-symbolic",
            RendererMessage::Enter,
            look_if(keyboard.is_key_pressed("Enter")),
            theme,
            fixed,
            key_height,
        ));

    controls.into()
}

fn render_symbols<'a>(theme: &Theme, key_height: f32) -> Element<'a, RendererMessage> {
    let header = widget::row::row()
        .spacing(KEY_SPACING)
        .align_y(Alignment::Center)
        .push(widget::text::heading(SYMBOLS_TITLE))
        .push(widget::horizontal_space())
        .push(render_text_key(
            "ABC",
            RendererMessage::ClosePanel,
            KeyLook::Idle,
            theme,
            Length::Fixed(KEY_WIDTH * 2.0),
            key_height,
        ));

    let mut column = widget::column::column().spacing(KEY_SPACING).push(header);
    for row in SYMBOL_ROWS {
        let keys = row.into_iter().fold(widget::row::row().spacing(KEY_SPACING), |keys, symbol| {
            keys.push(render_text_key(
                symbol,
                RendererMessage::Literal(symbol.to_string()),
                KeyLook::Idle,
                theme,
                Length::Fixed(KEY_WIDTH),
                key_height,
            ))
        });
        column = column.push(container(keys).center_x(Length::Fill));
    }
    column.into()
}

fn look_if(pressed: bool) -> KeyLook {
    if pressed { KeyLook::Pressed } else { KeyLook::Idle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Language, LayoutRegistry};
    use crate::renderer::theme::keyboard_theme;
    use crate::store::ThemePreference;

    #[test]
    fn test_every_mode_renders_with_emoji_grid_open() {
        let theme = keyboard_theme(ThemePreference::Dark);
        let mut emoji = EmojiPanel::new();
        emoji.toggle_expanded();
        let mut keyboard = Keyboard::new(LayoutRegistry::builtin().unwrap(), Language::Croatian);

        let _letters = render_keyboard(&keyboard, &emoji, &theme, 44.0);
        assert!(keyboard.open_calculator());
        let _calculator = render_keyboard(&keyboard, &emoji, &theme, 44.0);
        keyboard.close_panel();
        assert!(keyboard.open_symbols());
        let _symbols = render_keyboard(&keyboard, &emoji, &theme, 44.0);
        assert_eq!(keyboard.mode(), Mode::Symbols);
    }
}
