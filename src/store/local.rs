// SPDX-License-Identifier: GPL-3.0-only

//! JSON-document store.
//!
//! All tables live in one JSON file that is rewritten after every change.
//! The file is written to a temporary sibling and renamed into place, so a
//! crash mid-write leaves the previous version intact.

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::layout::Language;
use crate::store::RemoteStore;
use crate::store::records::{
    CalculatorHistoryEntry, DictionaryEntry, DictionaryLanguage, FavoriteEmoji, KeyboardSettings,
    NewSavedText, SavedText, Session, StoreStats,
};

/// File name used inside the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// PBKDF2 iterations for new passwords.
#[cfg(not(test))]
const PASSWORD_ROUNDS: u32 = 600_000;
#[cfg(test)]
const PASSWORD_ROUNDS: u32 = 1_000;

const PASSWORD_HASH_LEN: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    id: Uuid,
    email: String,
    salt: String,
    /// PBKDF2 iterations the hash was derived with
    rounds: u32,
    password_hash: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HistoryRecord {
    user_id: Uuid,
    #[serde(flatten)]
    entry: CalculatorHistoryEntry,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    users: Vec<UserRecord>,
    #[serde(default)]
    settings: HashMap<Uuid, KeyboardSettings>,
    #[serde(default)]
    saved_texts: Vec<SavedText>,
    #[serde(default)]
    calculator_history: Vec<HistoryRecord>,
    #[serde(default)]
    favorite_emojis: HashMap<Uuid, Vec<FavoriteEmoji>>,
    #[serde(default)]
    dictionary: Vec<DictionaryEntry>,
}

/// Store backed by a JSON file, or by memory only.
#[derive(Debug)]
pub struct LocalStore {
    path: Option<PathBuf>,
    data: Mutex<StoreData>,
}

impl LocalStore {
    /// Opens the store at `path`. A missing file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
            Err(err) => return Err(err.into()),
        };
        tracing::info!("Opened store at {}", path.display());

        Ok(Self {
            path: Some(path),
            data: Mutex::new(data),
        })
    }

    /// Store that never touches the disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: Mutex::new(StoreData::default()),
        }
    }

    /// Default location: `<data dir>/tipkovnica/store.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("tipkovnica").join(STORE_FILE_NAME))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn persist(&self, data: &StoreData) -> StoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(data)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Applies `change` to a copy of the data and keeps the copy only once
    /// it is on disk. A failed change or write leaves the store untouched.
    async fn commit<T, F>(&self, change: F) -> StoreResult<T>
    where
        F: FnOnce(&mut StoreData) -> StoreResult<T> + Send,
        T: Send,
    {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let value = change(&mut next)?;
        self.persist(&next).await?;
        *data = next;
        Ok(value)
    }

    /// Replaces a user's favorite emoji.
    #[cfg(test)]
    pub(crate) async fn set_favorite_emojis(
        &self,
        user_id: Uuid,
        favorites: Vec<FavoriteEmoji>,
    ) {
        self.data.lock().await.favorite_emojis.insert(user_id, favorites);
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Derives the stored password hash with PBKDF2-HMAC-SHA256.
///
/// Runs on the blocking pool; a full round count takes a noticeable time.
async fn hash_password(salt: String, password: String, rounds: u32) -> StoreResult<String> {
    tokio::task::spawn_blocking(move || {
        let mut key = [0u8; PASSWORD_HASH_LEN];
        pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), rounds, &mut key);
        key.iter().map(|byte| format!("{:02x}", byte)).collect::<String>()
    })
    .await
    .map_err(|err| StoreError::Io(err.to_string()))
}

impl RemoteStore for LocalStore {
    fn sign_up(&self, email: String, password: String) -> BoxFuture<'_, StoreResult<Session>> {
        async move {
            let email = normalize_email(&email);
            let salt = Uuid::new_v4().simple().to_string();
            let password_hash = hash_password(salt.clone(), password, PASSWORD_ROUNDS).await?;
            let user = UserRecord {
                id: Uuid::new_v4(),
                email: email.clone(),
                salt,
                rounds: PASSWORD_ROUNDS,
                password_hash,
                created_at: Utc::now(),
            };
            let session = Session {
                user_id: user.id,
                email,
            };

            self.commit(|data| {
                if data.users.iter().any(|u| u.email == user.email) {
                    return Err(StoreError::UserExists);
                }
                data.users.push(user);
                Ok(())
            })
            .await?;

            tracing::info!("Registered user {}", session.email);
            Ok(session)
        }
        .boxed()
    }

    fn sign_in(&self, email: String, password: String) -> BoxFuture<'_, StoreResult<Session>> {
        async move {
            let email = normalize_email(&email);
            let user = self
                .data
                .lock()
                .await
                .users
                .iter()
                .find(|u| u.email == email)
                .cloned()
                .ok_or(StoreError::InvalidCredentials)?;

            let hash = hash_password(user.salt.clone(), password, user.rounds).await?;
            if hash != user.password_hash {
                return Err(StoreError::InvalidCredentials);
            }
            Ok(Session {
                user_id: user.id,
                email: user.email,
            })
        }
        .boxed()
    }

    fn load_settings(&self, user_id: Uuid) -> BoxFuture<'_, StoreResult<Option<KeyboardSettings>>> {
        async move { Ok(self.data.lock().await.settings.get(&user_id).copied()) }.boxed()
    }

    fn save_settings(
        &self,
        user_id: Uuid,
        settings: KeyboardSettings,
    ) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            self.commit(|data| {
                data.settings.insert(user_id, settings);
                Ok(())
            })
            .await
        }
        .boxed()
    }

    fn update_language(&self, user_id: Uuid, language: Language) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            self.commit(|data| {
                let settings = data
                    .settings
                    .get_mut(&user_id)
                    .ok_or_else(|| StoreError::NotFound("postavke tipkovnice".to_string()))?;
                settings.language = language;
                Ok(())
            })
            .await
        }
        .boxed()
    }

    fn insert_saved_text(
        &self,
        user_id: Uuid,
        text: NewSavedText,
    ) -> BoxFuture<'_, StoreResult<SavedText>> {
        async move {
            let saved = SavedText {
                id: Uuid::new_v4(),
                user_id,
                title: text.title,
                content: text.content,
                language: text.language,
                char_count: text.char_count,
                word_count: text.word_count,
                created_at: Utc::now(),
            };
            self.commit(|data| {
                data.saved_texts.push(saved.clone());
                Ok(())
            })
            .await?;
            Ok(saved)
        }
        .boxed()
    }

    fn list_saved_texts(&self, user_id: Uuid) -> BoxFuture<'_, StoreResult<Vec<SavedText>>> {
        async move {
            let data = self.data.lock().await;
            // Reverse first so equal timestamps keep newest-inserted first
            let mut texts: Vec<SavedText> = data
                .saved_texts
                .iter()
                .rev()
                .filter(|t| t.user_id == user_id)
                .cloned()
                .collect();
            texts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(texts)
        }
        .boxed()
    }

    fn delete_saved_text(&self, user_id: Uuid, text_id: Uuid) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            self.commit(|data| {
                let before = data.saved_texts.len();
                data.saved_texts
                    .retain(|t| !(t.id == text_id && t.user_id == user_id));
                if data.saved_texts.len() == before {
                    return Err(StoreError::NotFound("tekst".to_string()));
                }
                Ok(())
            })
            .await
        }
        .boxed()
    }

    fn insert_calculator_history(
        &self,
        user_id: Uuid,
        entry: CalculatorHistoryEntry,
    ) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            self.commit(|data| {
                data.calculator_history.push(HistoryRecord {
                    user_id,
                    entry,
                    created_at: Utc::now(),
                });
                Ok(())
            })
            .await
        }
        .boxed()
    }

    fn list_favorite_emojis(&self, user_id: Uuid) -> BoxFuture<'_, StoreResult<Vec<FavoriteEmoji>>> {
        async move {
            let data = self.data.lock().await;
            let mut favorites = data
                .favorite_emojis
                .get(&user_id)
                .cloned()
                .unwrap_or_default();
            favorites.sort_by_key(|f| f.position);
            Ok(favorites)
        }
        .boxed()
    }

    fn upsert_dictionary(&self, entries: Vec<DictionaryEntry>) -> BoxFuture<'_, StoreResult<usize>> {
        async move {
            self.commit(|data| {
                let mut inserted = 0;
                for entry in entries {
                    let exists = data
                        .dictionary
                        .iter()
                        .any(|d| d.word == entry.word && d.language == entry.language);
                    if !exists {
                        data.dictionary.push(entry);
                        inserted += 1;
                    }
                }
                Ok(inserted)
            })
            .await
        }
        .boxed()
    }

    fn delete_dictionary_language(
        &self,
        language: DictionaryLanguage,
    ) -> BoxFuture<'_, StoreResult<usize>> {
        async move {
            self.commit(|data| {
                let before = data.dictionary.len();
                data.dictionary.retain(|d| d.language != language);
                Ok(before - data.dictionary.len())
            })
            .await
        }
        .boxed()
    }

    fn stats(&self) -> BoxFuture<'_, StoreResult<StoreStats>> {
        async move {
            let data = self.data.lock().await;
            Ok(StoreStats {
                users: data.users.len(),
                texts: data.saved_texts.len(),
                dictionary_words: data.dictionary.len(),
            })
        }
        .boxed()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_text(title: &str) -> NewSavedText {
        NewSavedText {
            title: title.to_string(),
            content: "sadržaj".to_string(),
            language: Language::Croatian,
            char_count: 7,
            word_count: 1,
        }
    }

    fn entry(word: &str, language: DictionaryLanguage) -> DictionaryEntry {
        DictionaryEntry {
            word: word.to_string(),
            language,
            frequency: 1,
        }
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let store = LocalStore::in_memory();
        let session = store
            .sign_up("Ana@Example.com ".into(), "tajna123".into())
            .await
            .unwrap();
        assert_eq!(session.email, "ana@example.com");

        let again = store
            .sign_in("ana@example.com".into(), "tajna123".into())
            .await
            .unwrap();
        assert_eq!(again.user_id, session.user_id);

        assert_eq!(
            store.sign_in("ana@example.com".into(), "kriva".into()).await,
            Err(StoreError::InvalidCredentials)
        );
        assert_eq!(
            store.sign_up("ana@example.com".into(), "druga123".into()).await,
            Err(StoreError::UserExists)
        );
    }

    #[tokio::test]
    async fn test_saved_texts_newest_first_and_scoped_to_user() {
        let store = LocalStore::in_memory();
        let ana = Uuid::new_v4();
        let ivo = Uuid::new_v4();

        store.insert_saved_text(ana, new_text("prvi")).await.unwrap();
        store.insert_saved_text(ivo, new_text("tuđi")).await.unwrap();
        let second = store.insert_saved_text(ana, new_text("drugi")).await.unwrap();

        let texts = store.list_saved_texts(ana).await.unwrap();
        let titles: Vec<&str> = texts.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["drugi", "prvi"]);

        store.delete_saved_text(ana, second.id).await.unwrap();
        assert_eq!(store.list_saved_texts(ana).await.unwrap().len(), 1);
        assert!(matches!(
            store.delete_saved_text(ana, second.id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_settings_insert_and_update_language() {
        let store = LocalStore::in_memory();
        let user = Uuid::new_v4();

        assert_eq!(store.load_settings(user).await.unwrap(), None);
        assert!(store.update_language(user, Language::English).await.is_err());

        store.save_settings(user, KeyboardSettings::default()).await.unwrap();
        store.update_language(user, Language::Kajkavski).await.unwrap();

        let settings = store.load_settings(user).await.unwrap().unwrap();
        assert_eq!(settings.language, Language::Kajkavski);
        assert!(settings.vibration_enabled);
    }

    #[tokio::test]
    async fn test_dictionary_upsert_ignores_duplicates() {
        let store = LocalStore::in_memory();
        let inserted = store
            .upsert_dictionary(vec![
                entry("kuća", DictionaryLanguage::Hrvatski),
                entry("hiža", DictionaryLanguage::Kajkavski),
            ])
            .await
            .unwrap();
        assert_eq!(inserted, 2);

        let inserted = store
            .upsert_dictionary(vec![
                entry("kuća", DictionaryLanguage::Hrvatski),
                entry("kuća", DictionaryLanguage::Kajkavski),
            ])
            .await
            .unwrap();
        assert_eq!(inserted, 1);
        assert_eq!(store.stats().await.unwrap().dictionary_words, 3);

        let removed = store
            .delete_dictionary_language(DictionaryLanguage::Kajkavski)
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.stats().await.unwrap().dictionary_words, 1);
    }

    #[tokio::test]
    async fn test_favorites_ordered_by_position() {
        let store = LocalStore::in_memory();
        let user = Uuid::new_v4();
        store
            .set_favorite_emojis(
                user,
                vec![
                    FavoriteEmoji { emoji: "🔥".into(), position: 2 },
                    FavoriteEmoji { emoji: "😊".into(), position: 0 },
                ],
            )
            .await;

        let favorites = store.list_favorite_emojis(user).await.unwrap();
        assert_eq!(favorites[0].emoji, "😊");
        assert_eq!(favorites[1].emoji, "🔥");
        assert!(store.list_favorite_emojis(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(STORE_FILE_NAME);

        let user = {
            let store = LocalStore::open(&path).unwrap();
            let session = store.sign_up("a@b.hr".into(), "lozinka".into()).await.unwrap();
            store
                .insert_calculator_history(
                    session.user_id,
                    CalculatorHistoryEntry {
                        expression: "2 + 3".into(),
                        result: "5".into(),
                    },
                )
                .await
                .unwrap();
            session.user_id
        };

        let reopened = LocalStore::open(&path).unwrap();
        let session = reopened.sign_in("a@b.hr".into(), "lozinka".into()).await.unwrap();
        assert_eq!(session.user_id, user);
        assert_eq!(reopened.stats().await.unwrap().users, 1);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        let store = LocalStore::open(blocker.join(STORE_FILE_NAME)).unwrap();
        // A file where the parent directory should be makes every write fail
        std::fs::write(&blocker, "").unwrap();

        let failed = store.sign_up("ana@example.com".into(), "tajna123".into()).await;
        assert!(matches!(failed, Err(StoreError::Io(_))));
        assert_eq!(
            store.sign_in("ana@example.com".into(), "tajna123".into()).await,
            Err(StoreError::InvalidCredentials)
        );

        let user = Uuid::new_v4();
        assert!(store.insert_saved_text(user, new_text("izgubljen")).await.is_err());
        assert!(store.list_saved_texts(user).await.unwrap().is_empty());
        assert!(store.save_settings(user, KeyboardSettings::default()).await.is_err());
        assert_eq!(store.load_settings(user).await.unwrap(), None);
        assert_eq!(store.stats().await.unwrap(), StoreStats::default());

        std::fs::remove_file(&blocker).unwrap();
        let session = store
            .sign_up("ana@example.com".into(), "tajna123".into())
            .await
            .unwrap();
        assert_eq!(session.email, "ana@example.com");
        assert_eq!(store.stats().await.unwrap().users, 1);
    }

    #[tokio::test]
    async fn test_password_is_stretched_and_salted() {
        let store = LocalStore::in_memory();
        store.sign_up("a@b.hr".into(), "lozinka".into()).await.unwrap();
        store.sign_up("c@d.hr".into(), "lozinka".into()).await.unwrap();

        let data = store.data.lock().await;
        let (first, second) = (&data.users[0], &data.users[1]);
        assert_eq!(first.rounds, PASSWORD_ROUNDS);
        assert_eq!(first.password_hash.len(), PASSWORD_HASH_LEN * 2);
        assert_ne!(first.password_hash, second.password_hash);
        assert!(!first.password_hash.contains("lozinka"));
    }

    #[test]
    fn test_open_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            LocalStore::open(&path),
            Err(StoreError::Serialization(_))
        ));
    }
}
