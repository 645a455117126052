// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard settings: remote per-user rows plus a local language fallback.
//!
//! Signed-in users keep their settings in the store. Without a session only
//! the language is remembered, in the cosmic_config entry.

use cosmic::cosmic_config::{self, CosmicConfigEntry};
use std::fmt::Debug;
use uuid::Uuid;

use crate::config::Config;
use crate::error::StoreResult;
use crate::layout::Language;
use crate::store::{KeyboardSettings, RemoteStore};

/// Local storage for the guest language.
pub trait LocalPreferences: Debug {
    fn language(&self) -> Option<Language>;

    /// Remembers `language`. Returns a message on failure.
    fn store_language(&mut self, language: Language) -> Result<(), String>;
}

/// Preferences kept in the application's cosmic_config entry.
#[derive(Debug)]
pub struct CosmicPreferences {
    handler: Option<cosmic_config::Config>,
    config: Config,
}

impl CosmicPreferences {
    pub fn new(handler: Option<cosmic_config::Config>, config: Config) -> Self {
        Self { handler, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Takes a configuration update from the config watcher.
    pub fn replace_config(&mut self, config: Config) {
        self.config = config;
    }
}

impl LocalPreferences for CosmicPreferences {
    fn language(&self) -> Option<Language> {
        self.config.keyboard_language
    }

    fn store_language(&mut self, language: Language) -> Result<(), String> {
        self.config.keyboard_language = Some(language);
        let Some(handler) = &self.handler else {
            return Err("konfiguracija nije dostupna".to_string());
        };
        self.config
            .write_entry(handler)
            .map_err(|err| format!("{:?}", err))
    }
}

/// Loads a user's settings, creating the defaults when none are stored.
pub async fn load_or_create_settings(
    store: &dyn RemoteStore,
    user_id: Uuid,
) -> StoreResult<KeyboardSettings> {
    if let Some(settings) = store.load_settings(user_id).await? {
        return Ok(settings);
    }

    let settings = KeyboardSettings::default();
    store.save_settings(user_id, settings).await?;
    tracing::info!("Created default keyboard settings for {}", user_id);
    Ok(settings)
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryPreferences;
    use super::*;
    use crate::store::testing::RecordingStore;
    use crate::store::{KeyboardHeight, ThemePreference};

    #[tokio::test]
    async fn test_missing_settings_are_created_once() {
        let store = RecordingStore::new();
        let user = Uuid::new_v4();

        let settings = load_or_create_settings(&store, user).await.unwrap();
        assert_eq!(settings.language, Language::Croatian);
        assert_eq!(settings.theme, ThemePreference::Light);
        assert!(settings.vibration_enabled);
        assert_eq!(settings.keyboard_height, KeyboardHeight::Medium);

        load_or_create_settings(&store, user).await.unwrap();
        assert_eq!(RecordingStore::count(&store.settings_writes), 1);
    }

    #[tokio::test]
    async fn test_stored_settings_win() {
        let store = RecordingStore::new();
        let user = Uuid::new_v4();
        let stored = KeyboardSettings {
            language: Language::Kajkavski,
            vibration_enabled: false,
            ..KeyboardSettings::default()
        };
        store.save_settings(user, stored).await.unwrap();

        assert_eq!(load_or_create_settings(&store, user).await.unwrap(), stored);
    }

    #[test]
    fn test_memory_preferences() {
        let mut prefs = MemoryPreferences::default();
        assert_eq!(prefs.language(), None);
        prefs.store_language(Language::English).unwrap();
        assert_eq!(prefs.language(), Some(Language::English));

        prefs.fail = true;
        assert!(prefs.store_language(Language::Croatian).is_err());
        assert_eq!(prefs.language(), Some(Language::English));
    }

    #[test]
    fn test_cosmic_preferences_without_handler_keeps_value_in_memory() {
        let mut prefs = CosmicPreferences::new(None, Config::default());
        assert!(prefs.store_language(Language::Kajkavski).is_err());
        assert_eq!(prefs.language(), Some(Language::Kajkavski));
    }
}
