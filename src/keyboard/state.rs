// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard dispatch state.
//!
//! `Keyboard` owns the mode, language, shift state and pressed-key set, and
//! turns physical key events and on-screen taps into [`KeyboardOutput`]s.

use std::collections::HashSet;
use std::time::Duration;

use crate::app_settings::HAPTIC_PULSE_MS;
use crate::calculator::{Calculator, CalculatorButton, CalculatorOutput};
use crate::input::{Haptics, KeyEvent, LogHaptics, LogicalKey, ShiftState};
use crate::layout::{KeyConfig, KeyboardLayout, Language, LayoutRegistry};

/// Which surface the keyboard shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Letters,
    Calculator,
    Symbols,
}

impl Mode {
    /// Returns `true` if the keyboard may switch from `self` to `to`.
    ///
    /// Panels are only reachable from the letters surface and only return
    /// to it.
    pub fn can_switch_to(self, to: Mode) -> bool {
        self == to || self == Mode::Letters || to == Mode::Letters
    }
}

/// Text operation requested by the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyboardOutput {
    Input(String),
    Backspace,
    Space,
    Enter,
}

/// The on-screen keyboard.
#[derive(Debug)]
pub struct Keyboard {
    layouts: LayoutRegistry,
    language: Language,
    mode: Mode,
    shift: ShiftState,
    /// Physical codes currently held down
    pressed_keys: HashSet<String>,
    vibration_enabled: bool,
    haptics: Box<dyn Haptics>,
    /// Present while the calculator panel is open
    calculator: Option<Calculator>,
}

impl Keyboard {
    /// Creates a keyboard in letters mode with caps lock off.
    pub fn new(layouts: LayoutRegistry, language: Language) -> Self {
        Self {
            layouts,
            language,
            mode: Mode::Letters,
            shift: ShiftState::new(),
            pressed_keys: HashSet::new(),
            vibration_enabled: true,
            haptics: Box::new(LogHaptics),
            calculator: None,
        }
    }

    /// Replaces the haptics sink.
    pub fn with_haptics(mut self, haptics: impl Haptics + 'static) -> Self {
        self.haptics = Box::new(haptics);
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Letter layout of the current language.
    pub fn active_layout(&self) -> &KeyboardLayout {
        self.layouts.get(self.language)
    }

    pub fn is_caps_lock(&self) -> bool {
        self.shift.is_caps_lock()
    }

    /// Returns `true` if keys currently emit their shift character.
    pub fn is_shift_active(&self) -> bool {
        self.shift.is_active()
    }

    /// Returns `true` if the physical key `code` is held down.
    pub fn is_key_pressed(&self, code: &str) -> bool {
        self.pressed_keys.contains(code)
    }

    pub fn vibration_enabled(&self) -> bool {
        self.vibration_enabled
    }

    /// The calculator panel, while open.
    pub fn calculator(&self) -> Option<&Calculator> {
        self.calculator.as_ref()
    }

    // ========================================================================
    // Physical key events
    // ========================================================================

    /// Handles a physical key-down.
    ///
    /// Backspace, Space and Enter map to their outputs by logical key. A
    /// Shift key is held until its key-up. Any other key is looked up by
    /// physical code in the current language's letter layout; unmapped
    /// keys produce nothing. Dispatch works the same in every mode.
    pub fn key_down(&mut self, event: &KeyEvent) -> Option<KeyboardOutput> {
        self.pressed_keys.insert(event.code.clone());

        match &event.key {
            LogicalKey::Backspace => Some(KeyboardOutput::Backspace),
            LogicalKey::Space => Some(KeyboardOutput::Space),
            LogicalKey::Enter => Some(KeyboardOutput::Enter),
            LogicalKey::Shift => {
                self.shift.press(&event.code);
                None
            }
            LogicalKey::Character(_) | LogicalKey::Other => {
                let shift_active = self.shift.is_active();
                let key = self.active_layout().find(&event.code)?;
                let output = key.resolve(shift_active).to_string();
                tracing::debug!("{} -> {:?}", event.code, output);
                Some(KeyboardOutput::Input(output))
            }
        }
    }

    /// Handles a physical key-up.
    pub fn key_up(&mut self, event: &KeyEvent) {
        self.pressed_keys.remove(&event.code);
        if event.key == LogicalKey::Shift {
            self.shift.release(&event.code);
        }
    }

    /// Forgets held keys. Called when the keyboard stops receiving physical
    /// events, so no key stays highlighted or shifted.
    pub fn reset_transient(&mut self) {
        self.pressed_keys.clear();
        self.shift.clear_held();
    }

    // ========================================================================
    // Taps
    // ========================================================================

    /// Tap on a letter key.
    pub fn tap_key(&mut self, key: &KeyConfig) -> KeyboardOutput {
        self.pulse();
        KeyboardOutput::Input(key.resolve(self.shift.is_active()).to_string())
    }

    /// Tap on the letter key bound to `code` in the current layout.
    pub fn tap_code(&mut self, code: &str) -> Option<KeyboardOutput> {
        let key = self.active_layout().find(code)?.clone();
        Some(self.tap_key(&key))
    }

    pub fn tap_backspace(&mut self) -> KeyboardOutput {
        self.pulse();
        KeyboardOutput::Backspace
    }

    pub fn tap_space(&mut self) -> KeyboardOutput {
        self.pulse();
        KeyboardOutput::Space
    }

    pub fn tap_enter(&mut self) -> KeyboardOutput {
        self.pulse();
        KeyboardOutput::Enter
    }

    /// Tap on an emoji or symbol; emits the text unchanged.
    pub fn tap_literal(&mut self, text: &str) -> KeyboardOutput {
        self.pulse();
        KeyboardOutput::Input(text.to_string())
    }

    /// Tap on a calculator button. Does nothing unless the calculator is open.
    pub fn tap_calculator(&mut self, button: CalculatorButton) -> Option<CalculatorOutput> {
        let calculator = self.calculator.as_mut()?;
        let output = calculator.press(button);
        self.pulse();
        output
    }

    /// Switches the calculator between pass-through and calculator mode.
    pub fn toggle_calculator_mode(&mut self) -> Option<bool> {
        let enabled = self.calculator.as_mut()?.toggle_mode();
        self.pulse();
        Some(enabled)
    }

    // ========================================================================
    // State changes
    // ========================================================================

    /// Toggles caps lock. Returns the new caps lock state.
    pub fn toggle_caps_lock(&mut self) -> bool {
        self.pulse();
        self.shift.toggle_caps_lock()
    }

    /// Switches mode. Returns `false` and leaves the state unchanged when
    /// the switch is not allowed.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if !self.mode.can_switch_to(mode) {
            tracing::debug!("Refusing mode switch {:?} -> {:?}", self.mode, mode);
            return false;
        }
        if mode == self.mode {
            return true;
        }

        self.calculator = (mode == Mode::Calculator).then(Calculator::new);
        self.mode = mode;
        true
    }

    pub fn open_calculator(&mut self) -> bool {
        self.set_mode(Mode::Calculator)
    }

    pub fn open_symbols(&mut self) -> bool {
        self.set_mode(Mode::Symbols)
    }

    /// Returns to the letters surface from any panel.
    pub fn close_panel(&mut self) {
        self.set_mode(Mode::Letters);
    }

    /// Advances to the next language and returns it.
    pub fn cycle_language(&mut self) -> Language {
        self.pulse();
        self.language = self.language.next();
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_vibration_enabled(&mut self, enabled: bool) {
        self.vibration_enabled = enabled;
    }

    pub fn set_layouts(&mut self, layouts: LayoutRegistry) {
        self.layouts = layouts;
    }

    fn pulse(&self) {
        if self.vibration_enabled {
            self.haptics.pulse(Duration::from_millis(HAPTIC_PULSE_MS));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Operation;
    use crate::input::haptics::testing::CountingHaptics;

    fn keyboard() -> Keyboard {
        Keyboard::new(LayoutRegistry::builtin().unwrap(), Language::Croatian)
    }

    fn char_event(code: &str) -> KeyEvent {
        KeyEvent::new(LogicalKey::Character("x".to_string()), code)
    }

    fn shift_event() -> KeyEvent {
        KeyEvent::new(LogicalKey::Shift, "ShiftLeft")
    }

    #[test]
    fn test_physical_key_uses_layout_not_system_keymap() {
        let mut kb = keyboard();
        // Croatian QWERTZ: physical Y position types z
        assert_eq!(
            kb.key_down(&char_event("KeyY")),
            Some(KeyboardOutput::Input("z".to_string()))
        );
        assert!(kb.is_key_pressed("KeyY"));
        kb.key_up(&char_event("KeyY"));
        assert!(!kb.is_key_pressed("KeyY"));
    }

    #[test]
    fn test_every_key_resolves_in_every_layout() {
        let mut kb = keyboard();
        for language in Language::ALL {
            kb.set_language(language);
            let keys: Vec<KeyConfig> = kb.active_layout().rows.iter().flatten().cloned().collect();
            assert!(!keys.is_empty(), "{} has no keys", language);

            for key in &keys {
                let shifted = key.shift.clone().unwrap_or_else(|| key.main.clone());

                assert_eq!(kb.tap_key(key), KeyboardOutput::Input(key.main.clone()));
                kb.toggle_caps_lock();
                assert_eq!(kb.tap_key(key), KeyboardOutput::Input(shifted.clone()));
                kb.toggle_caps_lock();

                kb.key_down(&shift_event());
                assert_eq!(
                    kb.key_down(&char_event(&key.code)),
                    Some(KeyboardOutput::Input(shifted)),
                    "{} {}",
                    language,
                    key.code
                );
                kb.key_up(&char_event(&key.code));
                kb.key_up(&shift_event());
                assert_eq!(
                    kb.key_down(&char_event(&key.code)),
                    Some(KeyboardOutput::Input(key.main.clone()))
                );
                kb.key_up(&char_event(&key.code));
            }
        }
    }

    #[test]
    fn test_caps_lock_resolves_shift_character() {
        let mut kb = keyboard();
        kb.toggle_caps_lock();
        assert_eq!(
            kb.key_down(&char_event("BracketLeft")),
            Some(KeyboardOutput::Input("Š".to_string()))
        );
        kb.toggle_caps_lock();
        assert_eq!(
            kb.key_down(&char_event("BracketLeft")),
            Some(KeyboardOutput::Input("š".to_string()))
        );
    }

    #[test]
    fn test_held_shift_is_hold_mode() {
        let mut kb = keyboard();
        kb.key_down(&shift_event());
        assert_eq!(
            kb.key_down(&char_event("Digit8")),
            Some(KeyboardOutput::Input("(".to_string()))
        );
        kb.key_up(&shift_event());
        assert_eq!(
            kb.key_down(&char_event("Digit8")),
            Some(KeyboardOutput::Input("8".to_string()))
        );
    }

    #[test]
    fn test_named_keys_map_to_outputs() {
        let mut kb = keyboard();
        assert_eq!(
            kb.key_down(&KeyEvent::new(LogicalKey::Backspace, "Backspace")),
            Some(KeyboardOutput::Backspace)
        );
        assert_eq!(
            kb.key_down(&KeyEvent::new(LogicalKey::Space, "Space")),
            Some(KeyboardOutput::Space)
        );
        assert_eq!(
            kb.key_down(&KeyEvent::new(LogicalKey::Enter, "Enter")),
            Some(KeyboardOutput::Enter)
        );
    }

    #[test]
    fn test_unmapped_key_is_silent() {
        let mut kb = keyboard();
        kb.set_language(Language::English);
        assert_eq!(kb.key_down(&char_event("Digit1")), None);
        assert_eq!(kb.key_down(&KeyEvent::new(LogicalKey::Other, "F5")), None);
        assert!(kb.is_key_pressed("F5"));
    }

    #[test]
    fn test_physical_dispatch_active_in_panels() {
        let mut kb = keyboard();
        assert!(kb.open_symbols());
        assert_eq!(
            kb.key_down(&char_event("KeyA")),
            Some(KeyboardOutput::Input("a".to_string()))
        );
    }

    #[test]
    fn test_mode_transitions() {
        let mut kb = keyboard();
        assert!(kb.open_calculator());
        assert_eq!(kb.mode(), Mode::Calculator);
        assert!(!kb.open_symbols(), "calculator to symbols is not allowed");
        assert_eq!(kb.mode(), Mode::Calculator);

        kb.close_panel();
        assert_eq!(kb.mode(), Mode::Letters);
        assert!(kb.calculator().is_none());

        assert!(kb.open_symbols());
        assert!(!kb.open_calculator());
        kb.close_panel();
        assert_eq!(kb.mode(), Mode::Letters);
    }

    #[test]
    fn test_calculator_resets_on_reopen() {
        let mut kb = keyboard();
        kb.open_calculator();
        kb.toggle_calculator_mode();
        kb.tap_calculator(CalculatorButton::Digit(7));
        assert_eq!(kb.calculator().unwrap().display(), "7");

        kb.close_panel();
        kb.open_calculator();
        let calc = kb.calculator().unwrap();
        assert_eq!(calc.display(), "0");
        assert!(!calc.is_calculator_mode());
    }

    #[test]
    fn test_calculator_tap_ignored_when_closed() {
        let mut kb = keyboard();
        assert_eq!(kb.tap_calculator(CalculatorButton::Operation(Operation::Add)), None);
    }

    #[test]
    fn test_language_cycle_updates_layout() {
        let mut kb = keyboard();
        assert_eq!(kb.cycle_language(), Language::English);
        assert_eq!(kb.tap_code("KeyY"), Some(KeyboardOutput::Input("y".to_string())));
        assert_eq!(kb.cycle_language(), Language::Kajkavski);
        assert_eq!(kb.cycle_language(), Language::Croatian);
    }

    #[test]
    fn test_reset_transient_clears_pressed_and_held() {
        let mut kb = keyboard();
        kb.toggle_caps_lock();
        kb.key_down(&shift_event());
        kb.key_down(&char_event("KeyA"));
        kb.reset_transient();

        assert!(!kb.is_key_pressed("KeyA"));
        assert!(!kb.is_key_pressed("ShiftLeft"));
        assert!(kb.is_caps_lock());
    }

    #[test]
    fn test_taps_pulse_only_when_vibration_enabled() {
        let haptics = CountingHaptics::default();
        let mut kb = keyboard().with_haptics(haptics.clone());

        kb.tap_space();
        kb.tap_literal("😊");
        assert_eq!(haptics.count(), 2);

        kb.set_vibration_enabled(false);
        kb.tap_backspace();
        assert_eq!(haptics.count(), 2);
    }

    #[test]
    fn test_physical_events_do_not_pulse() {
        let haptics = CountingHaptics::default();
        let mut kb = keyboard().with_haptics(haptics.clone());
        kb.key_down(&char_event("KeyA"));
        assert_eq!(haptics.count(), 0);
    }
}
