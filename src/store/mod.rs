// SPDX-License-Identifier: GPL-3.0-only

//! Persistence seam.
//!
//! The application talks to its backend only through [`RemoteStore`]. The
//! bundled [`LocalStore`] keeps everything in one JSON document; a hosted
//! backend would implement the same trait.

pub mod local;
pub mod records;
#[cfg(test)]
pub(crate) mod testing;

use futures::future::BoxFuture;
use std::fmt::Debug;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::layout::Language;

pub use local::LocalStore;
pub use records::{
    CalculatorHistoryEntry, DictionaryEntry, DictionaryLanguage, FavoriteEmoji, KeyboardHeight,
    KeyboardSettings, NewSavedText, SavedText, Session, StoreStats, ThemePreference,
};

/// Backend operations used by the application.
///
/// Every call is a single request with no retry. Implementations must be
/// safe to share between concurrently running tasks.
pub trait RemoteStore: Debug + Send + Sync {
    /// Registers a user and signs them in.
    fn sign_up(&self, email: String, password: String) -> BoxFuture<'_, StoreResult<Session>>;

    fn sign_in(&self, email: String, password: String) -> BoxFuture<'_, StoreResult<Session>>;

    /// Keyboard settings of a user, or `None` if never stored.
    fn load_settings(&self, user_id: Uuid) -> BoxFuture<'_, StoreResult<Option<KeyboardSettings>>>;

    /// Inserts or replaces the settings of a user.
    fn save_settings(
        &self,
        user_id: Uuid,
        settings: KeyboardSettings,
    ) -> BoxFuture<'_, StoreResult<()>>;

    /// Updates only the language of stored settings.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the user has no settings row.
    fn update_language(&self, user_id: Uuid, language: Language) -> BoxFuture<'_, StoreResult<()>>;

    fn insert_saved_text(
        &self,
        user_id: Uuid,
        text: NewSavedText,
    ) -> BoxFuture<'_, StoreResult<SavedText>>;

    /// Saved texts of a user, newest first.
    fn list_saved_texts(&self, user_id: Uuid) -> BoxFuture<'_, StoreResult<Vec<SavedText>>>;

    fn delete_saved_text(&self, user_id: Uuid, text_id: Uuid) -> BoxFuture<'_, StoreResult<()>>;

    fn insert_calculator_history(
        &self,
        user_id: Uuid,
        entry: CalculatorHistoryEntry,
    ) -> BoxFuture<'_, StoreResult<()>>;

    /// Favorite emoji of a user, ordered by position.
    fn list_favorite_emojis(&self, user_id: Uuid) -> BoxFuture<'_, StoreResult<Vec<FavoriteEmoji>>>;

    /// Inserts dictionary rows, silently skipping `(word, language)` pairs
    /// that already exist. Returns the number of rows inserted.
    fn upsert_dictionary(&self, entries: Vec<DictionaryEntry>) -> BoxFuture<'_, StoreResult<usize>>;

    /// Deletes every dictionary row of a language. Returns the number removed.
    fn delete_dictionary_language(
        &self,
        language: DictionaryLanguage,
    ) -> BoxFuture<'_, StoreResult<usize>>;

    fn stats(&self) -> BoxFuture<'_, StoreResult<StoreStats>>;
}
