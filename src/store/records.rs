// SPDX-License-Identifier: GPL-3.0-only

//! Records exchanged with the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::layout::Language;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardHeight {
    Small,
    #[default]
    Medium,
    Large,
}

impl KeyboardHeight {
    /// Height of a key row in pixels.
    pub fn key_height(self) -> f32 {
        match self {
            KeyboardHeight::Small => 36.0,
            KeyboardHeight::Medium => 44.0,
            KeyboardHeight::Large => 56.0,
        }
    }
}

/// Per-user keyboard preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardSettings {
    pub language: Language,
    pub theme: ThemePreference,
    pub vibration_enabled: bool,
    pub keyboard_height: KeyboardHeight,
}

impl Default for KeyboardSettings {
    fn default() -> Self {
        Self {
            language: Language::Croatian,
            theme: ThemePreference::Light,
            vibration_enabled: true,
            keyboard_height: KeyboardHeight::Medium,
        }
    }
}

/// A stored text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedText {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub language: Language,
    pub char_count: usize,
    pub word_count: usize,
    pub created_at: DateTime<Utc>,
}

/// A text about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSavedText {
    pub title: String,
    pub content: String,
    pub language: Language,
    pub char_count: usize,
    pub word_count: usize,
}

/// One evaluated calculator expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorHistoryEntry {
    pub expression: String,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEmoji {
    pub emoji: String,
    pub position: u32,
}

/// Dictionary language. Distinct from [`Language`] because dictionary rows
/// use their own identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryLanguage {
    #[default]
    Hrvatski,
    Kajkavski,
    English,
}

impl DictionaryLanguage {
    pub const ALL: [DictionaryLanguage; 3] = [
        DictionaryLanguage::Hrvatski,
        DictionaryLanguage::Kajkavski,
        DictionaryLanguage::English,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DictionaryLanguage::Hrvatski => "hrvatski",
            DictionaryLanguage::Kajkavski => "kajkavski",
            DictionaryLanguage::English => "english",
        }
    }
}

impl fmt::Display for DictionaryLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dictionary row. Unique on `(word, language)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    pub language: DictionaryLanguage,
    pub frequency: u32,
}

/// Row counts shown on the admin page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub users: usize,
    pub texts: usize,
    pub dictionary_words: usize,
}
