// SPDX-License-Identifier: GPL-3.0-only

//! The text buffer keyboard output is typed into.

use unicode_segmentation::UnicodeSegmentation;

use crate::keyboard::KeyboardOutput;

/// Character and word counts of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// User-perceived characters (grapheme clusters)
    pub chars: usize,
    /// Whitespace-separated words
    pub words: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            chars: text.graphemes(true).count(),
            words: text.split_whitespace().count(),
        }
    }
}

/// Append-mostly text buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// `true` when the buffer holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.text)
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn push_space(&mut self) {
        self.text.push(' ');
    }

    pub fn push_newline(&mut self) {
        self.text.push('\n');
    }

    /// Removes the last character. An emoji with modifiers counts as one
    /// character. No-op on an empty buffer.
    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.text.grapheme_indices(true).next_back() {
            self.text.truncate(idx);
        }
    }

    /// Replaces the whole buffer, e.g. after a direct edit in the text area.
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Applies a keyboard output.
    pub fn apply(&mut self, output: &KeyboardOutput) {
        match output {
            KeyboardOutput::Input(text) => self.push_str(text),
            KeyboardOutput::Backspace => self.backspace(),
            KeyboardOutput::Space => self.push_space(),
            KeyboardOutput::Enter => self.push_newline(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_then_backspaces() {
        let mut buffer = TextBuffer::new();
        for s in ["a", "b", "c", "d", "e"] {
            buffer.apply(&KeyboardOutput::Input(s.to_string()));
        }
        for _ in 0..2 {
            buffer.apply(&KeyboardOutput::Backspace);
        }
        assert_eq!(buffer.as_str(), "abc");
        assert_eq!(buffer.stats().chars, 3);
    }

    // Single-grapheme inputs that never join with a neighbour
    const INPUTS: [&str; 8] = ["a", "č", "Š", "đ", "😊", "❤️", "7", "+"];

    #[test]
    fn test_n_inputs_then_m_backspaces_leave_n_minus_m() {
        for n in 0..12 {
            for m in 0..=n + 3 {
                let mut buffer = TextBuffer::new();
                for i in 0..n {
                    buffer.apply(&KeyboardOutput::Input(INPUTS[i % INPUTS.len()].to_string()));
                }
                for _ in 0..m {
                    buffer.apply(&KeyboardOutput::Backspace);
                }
                assert_eq!(buffer.stats().chars, n.saturating_sub(m), "n={} m={}", n, m);
            }
        }
    }

    #[test]
    fn test_interleaved_edits_track_length() {
        for seed in 1u32..40 {
            let mut state = seed;
            let mut expected = 0usize;
            let mut buffer = TextBuffer::new();
            for _ in 0..60 {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                let output = match (state >> 16) % 5 {
                    0 | 1 => KeyboardOutput::Backspace,
                    2 => KeyboardOutput::Space,
                    3 => KeyboardOutput::Enter,
                    _ => KeyboardOutput::Input(INPUTS[(state >> 8) as usize % INPUTS.len()].to_string()),
                };
                expected = match output {
                    KeyboardOutput::Backspace => expected.saturating_sub(1),
                    _ => expected + 1,
                };
                buffer.apply(&output);
                assert_eq!(buffer.stats().chars, expected, "seed {}", seed);
            }
        }
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut buffer = TextBuffer::new();
        buffer.backspace();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_backspace_removes_whole_emoji() {
        let mut buffer = TextBuffer::new();
        buffer.push_str("hi❤️");
        buffer.backspace();
        assert_eq!(buffer.as_str(), "hi");
        buffer.push_str("č");
        buffer.backspace();
        assert_eq!(buffer.as_str(), "hi");
    }

    #[test]
    fn test_space_and_enter() {
        let mut buffer = TextBuffer::new();
        buffer.apply(&KeyboardOutput::Input("a".to_string()));
        buffer.apply(&KeyboardOutput::Space);
        buffer.apply(&KeyboardOutput::Input("b".to_string()));
        buffer.apply(&KeyboardOutput::Enter);
        assert_eq!(buffer.as_str(), "a b\n");
    }

    #[test]
    fn test_stats_and_blank() {
        let mut buffer = TextBuffer::new();
        buffer.replace("  \n\t ");
        assert!(buffer.is_blank());
        assert_eq!(buffer.stats().words, 0);

        buffer.replace("Dobar dan, svijete 👋");
        assert!(!buffer.is_blank());
        assert_eq!(buffer.stats(), TextStats { chars: 20, words: 4 });

        buffer.clear();
        assert!(buffer.is_empty());
    }
}
