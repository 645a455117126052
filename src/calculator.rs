// SPDX-License-Identifier: GPL-3.0-only

//! Calculator panel logic.
//!
//! The panel has two sub-modes. In pass-through mode (the default) every
//! button types its character into the text buffer. In calculator mode the
//! buttons drive a four-function calculator that evaluates strictly left to
//! right with no operator precedence, so `2 + 3 × 4 =` yields `20`.

use std::fmt;

/// An arithmetic operation, or `=` to resolve the pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equals,
}

impl Operation {
    /// ASCII symbol used in typed output and history expressions.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
            Operation::Equals => "=",
        }
    }

    /// Label shown on the button.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "−",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
            Operation::Equals => "=",
        }
    }

    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide if b != 0.0 => a / b,
            Operation::Divide => 0.0,
            Operation::Equals => b,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A button on the calculator panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorButton {
    /// Digit 0-9
    Digit(u8),
    Operation(Operation),
    Decimal,
    Backspace,
    Clear,
}

/// What a button press produced for the rest of the app.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorOutput {
    /// Pass-through: type this text into the buffer.
    Input(String),
    /// Pass-through: delete the last character of the buffer.
    Backspace,
    /// Calculator mode: `=` resolved an operation.
    Evaluated { expression: String, result: String },
}

/// Calculator register state.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    pub display: String,
    pub current_value: f64,
    pub previous_value: Option<f64>,
    pub operation: Option<Operation>,
    pub should_reset_display: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            current_value: 0.0,
            previous_value: None,
            operation: None,
            should_reset_display: false,
        }
    }
}

/// The calculator panel: register state plus the sub-mode flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calculator {
    state: CalculatorState,
    calculator_mode: bool,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Text shown on the display.
    pub fn display(&self) -> &str {
        &self.state.display
    }

    /// `true` in calculator mode, `false` in pass-through mode.
    pub fn is_calculator_mode(&self) -> bool {
        self.calculator_mode
    }

    /// Switches between pass-through and calculator mode. Register state is kept.
    pub fn toggle_mode(&mut self) -> bool {
        self.calculator_mode = !self.calculator_mode;
        self.calculator_mode
    }

    /// The pending left operand and operator, e.g. "12 +", shown above the display.
    pub fn pending_expression(&self) -> Option<String> {
        match (self.state.previous_value, self.state.operation) {
            (Some(prev), Some(op)) => Some(format!("{} {}", format_number(prev), op)),
            _ => None,
        }
    }

    /// Handles a button press.
    pub fn press(&mut self, button: CalculatorButton) -> Option<CalculatorOutput> {
        if !self.calculator_mode {
            return self.pass_through(button);
        }

        match button {
            CalculatorButton::Digit(digit) => {
                self.input_digit(digit);
                None
            }
            CalculatorButton::Operation(Operation::Equals) => self.evaluate(),
            CalculatorButton::Operation(op) => {
                self.input_operation(op);
                None
            }
            CalculatorButton::Decimal => {
                self.input_decimal();
                None
            }
            CalculatorButton::Backspace => {
                self.backspace();
                None
            }
            CalculatorButton::Clear => {
                self.clear();
                None
            }
        }
    }

    /// Resets all register state.
    pub fn clear(&mut self) {
        self.state = CalculatorState::default();
    }

    fn pass_through(&self, button: CalculatorButton) -> Option<CalculatorOutput> {
        match button {
            CalculatorButton::Digit(digit) => Some(CalculatorOutput::Input(digit.to_string())),
            CalculatorButton::Operation(op) => Some(CalculatorOutput::Input(op.symbol().to_string())),
            CalculatorButton::Decimal => Some(CalculatorOutput::Input(".".to_string())),
            CalculatorButton::Backspace => Some(CalculatorOutput::Backspace),
            // Clear only touches the calculator registers
            CalculatorButton::Clear => None,
        }
    }

    fn input_digit(&mut self, digit: u8) {
        let digit = digit.min(9).to_string();
        let state = &mut self.state;

        if state.should_reset_display {
            state.display = digit;
            state.should_reset_display = false;
        } else if state.display == "0" {
            state.display = digit;
        } else {
            state.display.push_str(&digit);
        }
        state.current_value = parse_display(&state.display);
    }

    fn input_decimal(&mut self) {
        let state = &mut self.state;

        if state.should_reset_display {
            state.display = "0.".to_string();
            state.current_value = 0.0;
            state.should_reset_display = false;
        } else if !state.display.contains('.') {
            state.display.push('.');
        }
    }

    fn input_operation(&mut self, op: Operation) {
        let state = &mut self.state;

        match (state.operation, state.previous_value) {
            (Some(pending), Some(prev)) if !state.should_reset_display => {
                let result = pending.apply(prev, state.current_value);
                state.display = format_number(result);
                state.current_value = result;
                state.previous_value = Some(result);
            }
            _ => {
                state.previous_value = Some(state.current_value);
            }
        }
        state.operation = Some(op);
        state.should_reset_display = true;
    }

    fn evaluate(&mut self) -> Option<CalculatorOutput> {
        let (Some(op), Some(prev)) = (self.state.operation, self.state.previous_value) else {
            return None;
        };

        let current = self.state.current_value;
        let result = op.apply(prev, current);
        let expression = format!(
            "{} {} {}",
            format_number(prev),
            op,
            format_number(current)
        );
        let result_text = format_number(result);

        self.state = CalculatorState {
            display: result_text.clone(),
            current_value: result,
            previous_value: None,
            operation: None,
            should_reset_display: true,
        };

        Some(CalculatorOutput::Evaluated {
            expression,
            result: result_text,
        })
    }

    fn backspace(&mut self) {
        let state = &mut self.state;
        let mut chars = state.display.chars();
        chars.next_back();
        let trimmed = chars.as_str();

        state.display = if trimmed.is_empty() || trimmed == "-" || trimmed.parse::<f64>().is_err() {
            "0".to_string()
        } else {
            trimmed.to_string()
        };
        state.current_value = parse_display(&state.display);
    }
}

fn parse_display(display: &str) -> f64 {
    display.parse().unwrap_or(0.0)
}

/// Formats a number the way the display shows it.
///
/// Integers print without a fractional part, `-0` prints as `0`, very large
/// or very small magnitudes use exponent notation (`1e+21`, `1e-7`) and
/// non-finite values print as `Infinity`, `-Infinity` or `NaN`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }

    let exp = format!("{:e}", value);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> Calculator {
        let mut calc = Calculator::new();
        calc.toggle_mode();
        calc
    }

    fn press_all(calc: &mut Calculator, buttons: &[CalculatorButton]) -> Vec<CalculatorOutput> {
        buttons.iter().filter_map(|b| calc.press(*b)).collect()
    }

    use CalculatorButton::{Decimal, Digit};
    const ADD: CalculatorButton = CalculatorButton::Operation(Operation::Add);
    const MUL: CalculatorButton = CalculatorButton::Operation(Operation::Multiply);
    const DIV: CalculatorButton = CalculatorButton::Operation(Operation::Divide);
    const EQ: CalculatorButton = CalculatorButton::Operation(Operation::Equals);

    #[test]
    fn test_simple_addition() {
        let mut calc = calc();
        let out = press_all(&mut calc, &[Digit(2), ADD, Digit(3), EQ]);

        assert_eq!(calc.display(), "5");
        assert_eq!(
            out,
            vec![CalculatorOutput::Evaluated {
                expression: "2 + 3".to_string(),
                result: "5".to_string()
            }]
        );
        assert!(calc.state().should_reset_display);
        assert_eq!(calc.state().previous_value, None);
    }

    #[test]
    fn test_left_to_right_without_precedence() {
        let mut calc = calc();
        press_all(&mut calc, &[Digit(2), ADD, Digit(3), MUL, Digit(4), EQ]);
        assert_eq!(calc.display(), "20");
    }

    #[test]
    fn test_chained_operator_shows_intermediate() {
        let mut calc = calc();
        press_all(&mut calc, &[Digit(2), ADD, Digit(3), MUL]);
        assert_eq!(calc.display(), "5");
        assert_eq!(calc.pending_expression().as_deref(), Some("5 *"));
    }

    #[test]
    fn test_division_by_zero_yields_zero() {
        let mut calc = calc();
        press_all(&mut calc, &[Digit(5), DIV, Digit(0), EQ]);
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_second_decimal_is_ignored() {
        let mut calc = calc();
        press_all(&mut calc, &[Digit(1), Decimal, Decimal, Digit(5)]);
        assert_eq!(calc.display(), "1.5");
        assert_eq!(calc.display().matches('.').count(), 1);
    }

    #[test]
    fn test_decimal_after_result_starts_fresh() {
        let mut calc = calc();
        press_all(&mut calc, &[Digit(2), ADD, Digit(3), EQ, Decimal, Digit(5)]);
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn test_fractional_result() {
        let mut calc = calc();
        press_all(&mut calc, &[Digit(1), DIV, Digit(4), EQ]);
        assert_eq!(calc.display(), "0.25");
    }

    #[test]
    fn test_equals_without_operation_does_nothing() {
        let mut calc = calc();
        let out = press_all(&mut calc, &[Digit(7), EQ]);
        assert!(out.is_empty());
        assert_eq!(calc.display(), "7");
    }

    #[test]
    fn test_digit_replaces_leading_zero() {
        let mut calc = calc();
        press_all(&mut calc, &[Digit(0), Digit(0), Digit(4), Digit(2)]);
        assert_eq!(calc.display(), "42");
        assert_eq!(calc.state().current_value, 42.0);
    }

    #[test]
    fn test_backspace_trims_then_falls_back_to_zero() {
        let mut calc = calc();
        press_all(&mut calc, &[Digit(1), Digit(2)]);
        calc.press(CalculatorButton::Backspace);
        assert_eq!(calc.display(), "1");
        calc.press(CalculatorButton::Backspace);
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.state().current_value, 0.0);
    }

    #[test]
    fn test_backspace_on_negative_result() {
        let mut calc = calc();
        let minus = CalculatorButton::Operation(Operation::Subtract);
        press_all(&mut calc, &[Digit(2), minus, Digit(7), EQ]);
        assert_eq!(calc.display(), "-5");
        calc.press(CalculatorButton::Backspace);
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut calc = calc();
        press_all(&mut calc, &[Digit(9), ADD, Digit(1)]);
        calc.press(CalculatorButton::Clear);
        assert_eq!(calc.state(), &CalculatorState::default());
        assert!(calc.is_calculator_mode());
    }

    #[test]
    fn test_pass_through_types_characters() {
        let mut calc = Calculator::new();
        let out = press_all(
            &mut calc,
            &[Digit(4), MUL, Decimal, CalculatorButton::Backspace, CalculatorButton::Clear],
        );

        assert_eq!(
            out,
            vec![
                CalculatorOutput::Input("4".to_string()),
                CalculatorOutput::Input("*".to_string()),
                CalculatorOutput::Input(".".to_string()),
                CalculatorOutput::Backspace,
            ]
        );
        assert_eq!(calc.state(), &CalculatorState::default());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-8), "1.5e-8");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }
}
