// SPDX-License-Identifier: GPL-3.0-only

//! Saved texts: list, preview, export and delete.

use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::store::SavedText;

/// Asked before a text is deleted.
pub const DELETE_CONFIRMATION: &str = "Jeste li sigurni da želite obrisati ovaj tekst?";

/// Numbered names tried before an export gives up.
const MAX_EXPORT_COPIES: usize = 999;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedTextsPage {
    texts: Vec<SavedText>,
    selected: Option<Uuid>,
    /// Text waiting for delete confirmation
    pending_delete: Option<Uuid>,
    pub loading: bool,
}

impl SavedTextsPage {
    pub fn texts(&self) -> &[SavedText] {
        &self.texts
    }

    pub fn set_texts(&mut self, texts: Vec<SavedText>) {
        self.loading = false;
        if self
            .selected
            .is_some_and(|id| !texts.iter().any(|t| t.id == id))
        {
            self.selected = None;
        }
        self.texts = texts;
    }

    pub fn select(&mut self, id: Uuid) {
        if self.texts.iter().any(|t| t.id == id) {
            self.selected = Some(id);
        }
    }

    pub fn selected(&self) -> Option<&SavedText> {
        let id = self.selected?;
        self.texts.iter().find(|t| t.id == id)
    }

    pub fn request_delete(&mut self, id: Uuid) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Confirms the pending delete and returns the id to delete.
    pub fn confirm_delete(&mut self) -> Option<Uuid> {
        self.pending_delete.take()
    }

    /// Drops a text after the store deleted it.
    pub fn remove(&mut self, id: Uuid) {
        self.texts.retain(|t| t.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }
}

/// Base name for an exported text: the title with path separators and
/// control characters replaced.
fn export_stem(title: &str) -> String {
    let sanitized: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let sanitized = sanitized.trim_matches('.');

    if sanitized.is_empty() {
        "tekst".to_string()
    } else {
        sanitized.to_string()
    }
}

/// File name for an exported text. `copy` numbers names that are taken.
pub fn export_file_name(title: &str, copy: usize) -> String {
    match copy {
        0 => format!("{}.txt", export_stem(title)),
        n => format!("{} ({}).txt", export_stem(title), n),
    }
}

/// Directory exports are written to.
pub fn export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Writes the text content to a new `<dir>/<title>.txt`. Existing files are
/// never replaced; a taken name becomes `<title> (1).txt`, `<title> (2).txt`
/// and so on.
pub async fn export_saved_text(text: &SavedText, dir: &Path) -> std::io::Result<PathBuf> {
    for copy in 0..=MAX_EXPORT_COPIES {
        let path = dir.join(export_file_name(&text.title, copy));
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;
        let mut file = match file {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err),
        };

        file.write_all(text.content.as_bytes()).await?;
        file.flush().await?;
        tracing::info!("Exported '{}' to {}", text.title, path.display());
        return Ok(path);
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        format!("previše datoteka s imenom {}", export_file_name(&text.title, 0)),
    ))
}
