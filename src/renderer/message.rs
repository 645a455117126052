// SPDX-License-Identifier: GPL-3.0-only

//! Messages emitted by the keyboard surface.

use crate::calculator::CalculatorButton;
use crate::panels::EmojiCategory;

/// Interactions with the on-screen keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererMessage {
    /// A letter key was tapped. Contains the physical code it is bound to.
    KeyTapped(String),
    Backspace,
    Space,
    Enter,
    /// The ABC key: toggles caps lock.
    ToggleCaps,
    CycleLanguage,
    OpenCalculator,
    OpenSymbols,
    /// Back to letters from a panel.
    ClosePanel,
    Calculator(CalculatorButton),
    ToggleCalculatorMode,
    /// A symbol or emoji was tapped.
    Literal(String),
    ToggleEmojiGrid,
    SelectEmojiCategory(EmojiCategory),
    DismissToast,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Operation;

    #[test]
    fn test_messages_compare_by_payload() {
        assert_eq!(
            RendererMessage::KeyTapped("KeyA".to_string()),
            RendererMessage::KeyTapped("KeyA".to_string())
        );
        assert_ne!(
            RendererMessage::Calculator(CalculatorButton::Operation(Operation::Add)),
            RendererMessage::Calculator(CalculatorButton::Operation(Operation::Divide))
        );
    }
}
