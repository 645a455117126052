// SPDX-License-Identifier: GPL-3.0-only

//! Store wrapper that records calls, for tests.

use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::layout::Language;
use crate::store::{
    CalculatorHistoryEntry, DictionaryEntry, DictionaryLanguage, FavoriteEmoji, KeyboardSettings,
    LocalStore, NewSavedText, RemoteStore, SavedText, Session, StoreStats,
};

/// In-memory store counting writes, with switchable failure.
#[derive(Debug)]
pub(crate) struct RecordingStore {
    pub inner: LocalStore,
    pub saved_text_inserts: AtomicUsize,
    pub settings_writes: AtomicUsize,
    pub history_inserts: AtomicUsize,
    pub upsert_calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            inner: LocalStore::in_memory(),
            saved_text_inserts: AtomicUsize::new(0),
            settings_writes: AtomicUsize::new(0),
            history_inserts: AtomicUsize::new(0),
            upsert_calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    /// Makes every subsequent write fail with an I/O error.
    pub fn fail_writes(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(StoreError::Io("simulated failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl RemoteStore for RecordingStore {
    fn sign_up(&self, email: String, password: String) -> BoxFuture<'_, StoreResult<Session>> {
        self.inner.sign_up(email, password)
    }

    fn sign_in(&self, email: String, password: String) -> BoxFuture<'_, StoreResult<Session>> {
        self.inner.sign_in(email, password)
    }

    fn load_settings(&self, user_id: Uuid) -> BoxFuture<'_, StoreResult<Option<KeyboardSettings>>> {
        self.inner.load_settings(user_id)
    }

    fn save_settings(
        &self,
        user_id: Uuid,
        settings: KeyboardSettings,
    ) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            self.settings_writes.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            self.inner.save_settings(user_id, settings).await
        }
        .boxed()
    }

    fn update_language(&self, user_id: Uuid, language: Language) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            self.settings_writes.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            self.inner.update_language(user_id, language).await
        }
        .boxed()
    }

    fn insert_saved_text(
        &self,
        user_id: Uuid,
        text: NewSavedText,
    ) -> BoxFuture<'_, StoreResult<SavedText>> {
        async move {
            self.saved_text_inserts.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            self.inner.insert_saved_text(user_id, text).await
        }
        .boxed()
    }

    fn list_saved_texts(&self, user_id: Uuid) -> BoxFuture<'_, StoreResult<Vec<SavedText>>> {
        self.inner.list_saved_texts(user_id)
    }

    fn delete_saved_text(&self, user_id: Uuid, text_id: Uuid) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            self.check()?;
            self.inner.delete_saved_text(user_id, text_id).await
        }
        .boxed()
    }

    fn insert_calculator_history(
        &self,
        user_id: Uuid,
        entry: CalculatorHistoryEntry,
    ) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            self.history_inserts.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            self.inner.insert_calculator_history(user_id, entry).await
        }
        .boxed()
    }

    fn list_favorite_emojis(&self, user_id: Uuid) -> BoxFuture<'_, StoreResult<Vec<FavoriteEmoji>>> {
        self.inner.list_favorite_emojis(user_id)
    }

    fn upsert_dictionary(&self, entries: Vec<DictionaryEntry>) -> BoxFuture<'_, StoreResult<usize>> {
        async move {
            self.upsert_calls.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            self.inner.upsert_dictionary(entries).await
        }
        .boxed()
    }

    fn delete_dictionary_language(
        &self,
        language: DictionaryLanguage,
    ) -> BoxFuture<'_, StoreResult<usize>> {
        async move {
            self.check()?;
            self.inner.delete_dictionary_language(language).await
        }
        .boxed()
    }

    fn stats(&self) -> BoxFuture<'_, StoreResult<StoreStats>> {
        self.inner.stats()
    }
}
