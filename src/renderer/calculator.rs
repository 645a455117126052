// SPDX-License-Identifier: GPL-3.0-only

//! Calculator panel rendering.

use cosmic::Element;
use cosmic::Theme;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{self, container};

use crate::app_settings::{KEY_SPACING, KEY_WIDTH};
use crate::calculator::{Calculator, CalculatorButton, Operation};
use crate::renderer::key::{KeyLook, render_icon_key, render_text_key};
use crate::renderer::message::RendererMessage;

/// Button grid, top to bottom.
const GRID: [[CalculatorButton; 4]; 4] = [
    [
        CalculatorButton::Digit(7),
        CalculatorButton::Digit(8),
        CalculatorButton::Digit(9),
        CalculatorButton::Operation(Operation::Divide),
    ],
    [
        CalculatorButton::Digit(4),
        CalculatorButton::Digit(5),
        CalculatorButton::Digit(6),
        CalculatorButton::Operation(Operation::Multiply),
    ],
    [
        CalculatorButton::Digit(1),
        CalculatorButton::Digit(2),
        CalculatorButton::Digit(3),
        CalculatorButton::Operation(Operation::Subtract),
    ],
    [
        CalculatorButton::Digit(0),
        CalculatorButton::Decimal,
        CalculatorButton::Operation(Operation::Equals),
        CalculatorButton::Operation(Operation::Add),
    ],
];

/// Label on a calculator button.
pub fn button_label(button: CalculatorButton) -> String {
    match button {
        CalculatorButton::Digit(d) => d.to_string(),
        CalculatorButton::Operation(op) => op.label().to_string(),
        CalculatorButton::Decimal => ".".to_string(),
        CalculatorButton::Backspace => "⌫".to_string(),
        CalculatorButton::Clear => "C".to_string(),
    }
}

pub fn render_calculator<'a>(
    calculator: &Calculator,
    theme: &Theme,
    key_height: f32,
) -> Element<'a, RendererMessage> {
    let wide = Length::Fixed(KEY_WIDTH * 2.0);
    let mode_label = if calculator.is_calculator_mode() {
        "Kalkulator"
    } else {
        "Unos"
    };
    let mode_look = if calculator.is_calculator_mode() {
        KeyLook::Latched
    } else {
        KeyLook::Idle
    };

    let header = widget::row::row()
        .spacing(KEY_SPACING)
        .align_y(Alignment::Center)
        .push(render_text_key(
            mode_label,
            RendererMessage::ToggleCalculatorMode,
            mode_look,
            theme,
            wide,
            key_height,
        ))
        .push(render_text_key(
            "ABC",
            RendererMessage::ClosePanel,
            KeyLook::Idle,
            theme,
            wide,
            key_height,
        ));

    let mut panel = widget::column::column()
        .spacing(KEY_SPACING)
        .align_x(Alignment::Center)
        .push(header);

    if calculator.is_calculator_mode() {
        let pending = calculator.pending_expression().unwrap_or_default();
        panel = panel
            .push(widget::text::caption(pending))
            .push(widget::text::title3(calculator.display().to_string()));
    }

    for row in GRID {
        let keys = row.into_iter().fold(widget::row::row().spacing(KEY_SPACING), |keys, button| {
            keys.push(render_text_key(
                button_label(button),
                RendererMessage::Calculator(button),
                KeyLook::Idle,
                theme,
                Length::Fixed(KEY_WIDTH),
                key_height,
            ))
        });
        panel = panel.push(keys);
    }

    let bottom = widget::row::row()
        .spacing(KEY_SPACING)
        .push(render_text_key(
            button_label(CalculatorButton::Clear),
            RendererMessage::Calculator(CalculatorButton::Clear),
            KeyLook::Idle,
            theme,
            wide,
            key_height,
        ))
        .push(render_icon_key(
            "edit-clear-symbolic",
            RendererMessage::Calculator(CalculatorButton::Backspace),
            KeyLook::Idle,
            theme,
            wide,
            key_height,
        ));

    container(panel.push(bottom)).center_x(Length::Fill).into()
}
