// SPDX-License-Identifier: GPL-3.0-only

//! Save dialog for the text buffer.

use uuid::Uuid;

use crate::app_settings::UNTITLED_TEXT_TITLE;
use crate::editor::TextBuffer;
use crate::error::{AppError, StoreError, ValidationError};
use crate::layout::Language;
use crate::store::{NewSavedText, SavedText, Session};

/// Builds the record for a buffer. A blank title becomes the placeholder.
///
/// # Errors
///
/// `ValidationError::EmptyText` if the buffer holds only whitespace.
pub fn new_saved_text(
    buffer: &TextBuffer,
    title: &str,
    language: Language,
) -> Result<NewSavedText, ValidationError> {
    if buffer.is_blank() {
        return Err(ValidationError::EmptyText);
    }

    let title = title.trim();
    let stats = buffer.stats();
    Ok(NewSavedText {
        title: if title.is_empty() {
            UNTITLED_TEXT_TITLE.to_string()
        } else {
            title.to_string()
        },
        content: buffer.as_str().to_string(),
        language,
        char_count: stats.chars,
        word_count: stats.words,
    })
}

/// State of the save dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveDialog {
    open: bool,
    title: String,
    error: Option<String>,
    saving: bool,
}

impl SaveDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn open(&mut self) {
        self.open = true;
        self.error = None;
    }

    /// Closes the dialog and forgets the entered title.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// Validates a save request and marks the dialog as saving.
    ///
    /// On error the message is kept for display and nothing should be sent
    /// to the store.
    pub fn submit(
        &mut self,
        buffer: &TextBuffer,
        language: Language,
        session: Option<&Session>,
    ) -> Result<(Uuid, NewSavedText), AppError> {
        let result = new_saved_text(buffer, &self.title, language)
            .map_err(AppError::from)
            .and_then(|text| {
                let session = session.ok_or(AppError::NotAuthenticated)?;
                Ok((session.user_id, text))
            });

        match &result {
            Ok(_) => {
                self.saving = true;
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        result
    }

    /// Applies the store response. Success closes and clears the dialog;
    /// failure keeps it open with the message.
    pub fn finish(&mut self, result: &Result<SavedText, StoreError>) {
        self.saving = false;
        match result {
            Ok(_) => self.close(),
            Err(err) => self.error = Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RemoteStore;
    use crate::store::testing::RecordingStore;

    fn session() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
        }
    }

    fn buffer(text: &str) -> TextBuffer {
        let mut buffer = TextBuffer::new();
        buffer.replace(text);
        buffer
    }

    #[tokio::test]
    async fn test_blank_buffer_never_reaches_store() {
        let store = RecordingStore::new();
        let mut dialog = SaveDialog::default();
        dialog.open();

        let result = dialog.submit(&buffer("   \n "), Language::Croatian, Some(&session()));
        assert_eq!(result, Err(AppError::Validation(ValidationError::EmptyText)));
        assert_eq!(dialog.error(), Some("Tekst je prazan"));
        assert!(dialog.is_open());
        assert_eq!(RecordingStore::count(&store.saved_text_inserts), 0);
    }

    #[test]
    fn test_save_requires_session() {
        let mut dialog = SaveDialog::default();
        dialog.open();
        let result = dialog.submit(&buffer("bok"), Language::Croatian, None);
        assert_eq!(result, Err(AppError::NotAuthenticated));
        assert!(!dialog.is_saving());
    }

    #[tokio::test]
    async fn test_successful_save_inserts_once_and_closes() {
        let store = RecordingStore::new();
        let session = session();
        let mut dialog = SaveDialog::default();
        dialog.open();
        dialog.set_title("  ".to_string());

        let (user_id, text) = dialog
            .submit(&buffer("Dobar dan"), Language::English, Some(&session))
            .unwrap();
        assert!(dialog.is_saving());
        assert_eq!(text.title, UNTITLED_TEXT_TITLE);
        assert_eq!((text.char_count, text.word_count), (9, 2));

        let result = store.insert_saved_text(user_id, text).await;
        dialog.finish(&result);

        assert_eq!(RecordingStore::count(&store.saved_text_inserts), 1);
        assert!(!dialog.is_open());
        assert_eq!(dialog.title(), "");
        let saved = store.list_saved_texts(session.user_id).await.unwrap();
        assert_eq!(saved[0].content, "Dobar dan");
        assert_eq!(saved[0].language, Language::English);
    }

    #[tokio::test]
    async fn test_store_failure_keeps_dialog_open() {
        let store = RecordingStore::new();
        store.fail_writes();
        let session = session();
        let mut dialog = SaveDialog::default();
        dialog.open();
        dialog.set_title("Bilješka".to_string());

        let (user_id, text) = dialog
            .submit(&buffer("tekst"), Language::Croatian, Some(&session))
            .unwrap();
        let result = store.insert_saved_text(user_id, text).await;
        dialog.finish(&result);

        assert!(dialog.is_open());
        assert_eq!(dialog.title(), "Bilješka");
        assert!(dialog.error().is_some_and(|e| e.contains("simulated failure")));
    }
}
