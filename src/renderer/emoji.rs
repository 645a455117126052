// SPDX-License-Identifier: GPL-3.0-only

//! Emoji bar: favorites row with an expandable category grid.

use cosmic::Element;
use cosmic::Theme;
use cosmic::iced::Length;
use cosmic::widget::{self, tooltip};

use crate::app_settings::KEY_SPACING;
use crate::panels::{EmojiCategory, EmojiPanel};
use crate::renderer::key::{KeyLook, render_text_key};
use crate::renderer::message::RendererMessage;

const EMOJI_KEY_WIDTH: f32 = 44.0;
const GRID_COLUMNS: usize = 10;

pub fn render_emoji_bar<'a>(
    panel: &EmojiPanel,
    theme: &Theme,
    key_height: f32,
) -> Element<'a, RendererMessage> {
    let mut favorites = widget::row::row().spacing(KEY_SPACING);
    for emoji in panel.favorites() {
        favorites = favorites.push(emoji_key(emoji, theme, key_height));
    }
    let toggle_label = if panel.is_expanded() { "▾" } else { "▸" };
    favorites = favorites.push(render_text_key(
        toggle_label,
        RendererMessage::ToggleEmojiGrid,
        KeyLook::Idle,
        theme,
        Length::Fixed(EMOJI_KEY_WIDTH),
        key_height,
    ));

    let mut bar = widget::column::column().spacing(KEY_SPACING).push(favorites);
    if panel.is_expanded() {
        bar = bar
            .push(render_category_tabs(panel.category(), theme, key_height))
            .push(render_grid(panel.category(), theme, key_height));
    }
    bar.into()
}

fn render_category_tabs<'a>(
    selected: EmojiCategory,
    theme: &Theme,
    key_height: f32,
) -> Element<'a, RendererMessage> {
    EmojiCategory::ALL
        .into_iter()
        .fold(widget::row::row().spacing(KEY_SPACING), |row, category| {
            let look = if category == selected {
                KeyLook::Latched
            } else {
                KeyLook::Idle
            };
            row.push(render_text_key(
                category.label(),
                RendererMessage::SelectEmojiCategory(category),
                look,
                theme,
                Length::Shrink,
                key_height,
            ))
        })
        .into()
}

fn render_grid<'a>(
    category: EmojiCategory,
    theme: &Theme,
    key_height: f32,
) -> Element<'a, RendererMessage> {
    let mut grid = widget::column::column().spacing(KEY_SPACING);
    for chunk in category.emojis().chunks(GRID_COLUMNS) {
        let row = chunk.iter().fold(widget::row::row().spacing(KEY_SPACING), |row, config| {
            row.push(tooltip(
                emoji_key(config.emoji, theme, key_height),
                widget::text::caption(config.keywords.join(", ")),
                tooltip::Position::Top,
            ))
        });
        grid = grid.push(row);
    }
    grid.into()
}

fn emoji_key<'a>(emoji: &str, theme: &Theme, key_height: f32) -> Element<'a, RendererMessage> {
    render_text_key(
        emoji.to_string(),
        RendererMessage::Literal(emoji.to_string()),
        KeyLook::Idle,
        theme,
        Length::Fixed(EMOJI_KEY_WIDTH),
        key_height,
    )
}
