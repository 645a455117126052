// SPDX-License-Identifier: GPL-3.0-only

//! Emoji bar: a row of favorites plus an expandable category grid.

/// Favorites shown until the store returns a non-empty list.
pub const DEFAULT_FAVORITES: [&str; 8] = ["😊", "❤️", "😂", "👍", "🎉", "😍", "🔥", "✨"];

/// An emoji with search keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmojiConfig {
    pub emoji: &'static str,
    pub keywords: &'static [&'static str],
}

const fn e(emoji: &'static str, keywords: &'static [&'static str]) -> EmojiConfig {
    EmojiConfig { emoji, keywords }
}

/// Emoji grid categories, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EmojiCategory {
    #[default]
    Smileys,
    Hearts,
    Gestures,
    Activities,
    Symbols,
}

impl EmojiCategory {
    pub const ALL: [EmojiCategory; 5] = [
        EmojiCategory::Smileys,
        EmojiCategory::Hearts,
        EmojiCategory::Gestures,
        EmojiCategory::Activities,
        EmojiCategory::Symbols,
    ];

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            EmojiCategory::Smileys => "smileys",
            EmojiCategory::Hearts => "hearts",
            EmojiCategory::Gestures => "gestures",
            EmojiCategory::Activities => "activities",
            EmojiCategory::Symbols => "symbols",
        }
    }

    /// Emoji in this category.
    pub fn emojis(self) -> &'static [EmojiConfig] {
        match self {
            EmojiCategory::Smileys => &SMILEYS,
            EmojiCategory::Hearts => &HEARTS,
            EmojiCategory::Gestures => &GESTURES,
            EmojiCategory::Activities => &ACTIVITIES,
            EmojiCategory::Symbols => &SYMBOLS,
        }
    }
}

const SMILEYS: [EmojiConfig; 10] = [
    e("😊", &["smile", "happy"]),
    e("😂", &["laugh", "joy"]),
    e("😍", &["love", "heart eyes"]),
    e("😎", &["cool", "sunglasses"]),
    e("🥰", &["love", "hearts"]),
    e("😢", &["sad", "cry"]),
    e("😭", &["crying", "tears"]),
    e("😡", &["angry", "mad"]),
    e("🤔", &["thinking", "hmm"]),
    e("😴", &["sleep", "tired"]),
];

const HEARTS: [EmojiConfig; 10] = [
    e("❤️", &["love", "heart", "red"]),
    e("💙", &["blue heart", "love"]),
    e("💚", &["green heart", "love"]),
    e("💛", &["yellow heart", "love"]),
    e("🧡", &["orange heart", "love"]),
    e("💜", &["purple heart", "love"]),
    e("🖤", &["black heart", "love"]),
    e("💕", &["two hearts", "love"]),
    e("💖", &["sparkling heart", "love"]),
    e("💗", &["growing heart", "love"]),
];

const GESTURES: [EmojiConfig; 10] = [
    e("👍", &["thumbs up", "like", "ok"]),
    e("👎", &["thumbs down", "dislike"]),
    e("👏", &["clap", "applause"]),
    e("🙏", &["pray", "please", "thanks"]),
    e("👌", &["ok", "perfect"]),
    e("✌️", &["peace", "victory"]),
    e("🤝", &["handshake", "deal"]),
    e("👋", &["wave", "hello", "bye"]),
    e("🤘", &["rock", "metal"]),
    e("💪", &["strong", "muscle"]),
];

const ACTIVITIES: [EmojiConfig; 10] = [
    e("🎉", &["party", "celebration"]),
    e("🎊", &["confetti", "party"]),
    e("🎈", &["balloon", "party"]),
    e("🎁", &["gift", "present"]),
    e("🎂", &["cake", "birthday"]),
    e("🏆", &["trophy", "win"]),
    e("⚽", &["football", "soccer"]),
    e("🎮", &["game", "gaming"]),
    e("🎵", &["music", "note"]),
    e("🎸", &["guitar", "music"]),
];

const SYMBOLS: [EmojiConfig; 10] = [
    e("🔥", &["fire", "hot", "lit"]),
    e("✨", &["sparkles", "shine"]),
    e("⭐", &["star", "favorite"]),
    e("💯", &["100", "perfect"]),
    e("✅", &["check", "done", "yes"]),
    e("❌", &["x", "no", "wrong"]),
    e("⚠️", &["warning", "caution"]),
    e("💬", &["chat", "message"]),
    e("💭", &["thought", "thinking"]),
    e("🔔", &["bell", "notification"]),
];

/// UI state of the emoji bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiPanel {
    expanded: bool,
    category: EmojiCategory,
    favorites: Vec<String>,
}

impl Default for EmojiPanel {
    fn default() -> Self {
        Self {
            expanded: false,
            category: EmojiCategory::default(),
            favorites: DEFAULT_FAVORITES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EmojiPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Shows or hides the category grid.
    pub fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    pub fn category(&self) -> EmojiCategory {
        self.category
    }

    pub fn select_category(&mut self, category: EmojiCategory) {
        self.category = category;
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    /// Replaces the favorites with a stored list, already ordered by position.
    ///
    /// An empty list keeps the current favorites.
    pub fn apply_favorites(&mut self, favorites: Vec<String>) {
        if !favorites.is_empty() {
            self.favorites = favorites;
        }
    }

    /// Restores the default favorites, e.g. after sign-out.
    pub fn reset_favorites(&mut self) {
        self.favorites = Self::default().favorites;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let panel = EmojiPanel::new();
        assert!(!panel.is_expanded());
        assert_eq!(panel.category(), EmojiCategory::Smileys);
        assert_eq!(panel.favorites(), DEFAULT_FAVORITES);
    }

    #[test]
    fn test_every_category_has_ten_emoji_with_keywords() {
        for category in EmojiCategory::ALL {
            let emojis = category.emojis();
            assert_eq!(emojis.len(), 10, "{}", category.label());
            assert!(emojis.iter().all(|e| !e.keywords.is_empty()));
        }
    }

    #[test]
    fn test_apply_favorites_replaces_only_when_non_empty() {
        let mut panel = EmojiPanel::new();
        panel.apply_favorites(Vec::new());
        assert_eq!(panel.favorites(), DEFAULT_FAVORITES);

        panel.apply_favorites(vec!["🎸".to_string(), "🔔".to_string()]);
        assert_eq!(panel.favorites(), ["🎸", "🔔"]);

        panel.reset_favorites();
        assert_eq!(panel.favorites().len(), 8);
    }

    #[test]
    fn test_toggle_and_select() {
        let mut panel = EmojiPanel::new();
        assert!(panel.toggle_expanded());
        panel.select_category(EmojiCategory::Hearts);
        assert_eq!(panel.category().emojis()[0].emoji, "❤️");
        assert!(!panel.toggle_expanded());
    }
}
