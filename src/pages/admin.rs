// SPDX-License-Identifier: GPL-3.0-only

//! Admin page: store statistics and dictionary maintenance.

use std::collections::HashSet;

use crate::app_settings::IMPORT_BATCH_SIZE;
use crate::error::{StoreError, ValidationError};
use crate::store::{DictionaryEntry, DictionaryLanguage, RemoteStore, StoreStats};

/// Outcome of a dictionary import, counted in words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Words in batches the store accepted
    pub success: usize,
    /// Words in batches the store rejected
    pub errors: usize,
}

impl ImportReport {
    pub fn message(&self) -> String {
        format!(
            "Import završen! Uspješno: {}, Greške: {}",
            self.success, self.errors
        )
    }
}

/// Turns newline-separated input into dictionary rows.
///
/// Lines are trimmed and empty ones dropped. Words are lower-cased, then
/// de-duplicated keeping the first occurrence.
pub fn prepare_import(
    input: &str,
    language: DictionaryLanguage,
) -> Result<Vec<DictionaryEntry>, ValidationError> {
    let mut seen = HashSet::new();
    let entries: Vec<DictionaryEntry> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .filter(|word| seen.insert(word.clone()))
        .map(|word| DictionaryEntry {
            word,
            language,
            frequency: 1,
        })
        .collect();

    if entries.is_empty() {
        return Err(ValidationError::EmptyImport);
    }
    Ok(entries)
}

/// Upserts `entries` in batches. A failed batch is counted and skipped.
pub async fn import_words(store: &dyn RemoteStore, entries: Vec<DictionaryEntry>) -> ImportReport {
    let mut report = ImportReport::default();

    for batch in entries.chunks(IMPORT_BATCH_SIZE) {
        match store.upsert_dictionary(batch.to_vec()).await {
            Ok(inserted) => {
                tracing::debug!("Imported batch: {} sent, {} new", batch.len(), inserted);
                report.success += batch.len();
            }
            Err(err) => {
                tracing::warn!("Dictionary batch failed: {}", err);
                report.errors += batch.len();
            }
        }
    }

    tracing::info!(
        "Dictionary import finished: {} ok, {} failed",
        report.success,
        report.errors
    );
    report
}

/// Message after clearing a dictionary language.
pub fn clear_message(language: DictionaryLanguage, result: &Result<usize, StoreError>) -> String {
    match result {
        Ok(_) => format!("Sve riječi za jezik {} su obrisane", language),
        Err(err) => format!("Greška pri brisanju: {}", err),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminPage {
    pub stats: StoreStats,
    pub language: DictionaryLanguage,
    pub import_text: String,
    pub message: Option<String>,
    pub importing: bool,
    confirm_clear: bool,
}

impl AdminPage {
    /// Validates the import text. On success the page is marked busy.
    pub fn start_import(&mut self) -> Option<Vec<DictionaryEntry>> {
        match prepare_import(&self.import_text, self.language) {
            Ok(entries) => {
                self.importing = true;
                self.message = None;
                Some(entries)
            }
            Err(err) => {
                self.message = Some(err.to_string());
                None
            }
        }
    }

    pub fn finish_import(&mut self, report: ImportReport) {
        self.importing = false;
        self.import_text.clear();
        self.message = Some(report.message());
    }

    pub fn request_clear(&mut self) {
        self.confirm_clear = true;
    }

    pub fn is_confirming_clear(&self) -> bool {
        self.confirm_clear
    }

    /// Question shown before clearing.
    pub fn clear_confirmation(&self) -> String {
        format!(
            "Jeste li sigurni da želite obrisati SVE riječi za jezik: {}?",
            self.language
        )
    }

    pub fn cancel_clear(&mut self) {
        self.confirm_clear = false;
    }

    /// Confirms clearing and returns the language to clear.
    pub fn confirm_clear(&mut self) -> Option<DictionaryLanguage> {
        std::mem::take(&mut self.confirm_clear).then_some(self.language)
    }

    pub fn finish_clear(&mut self, language: DictionaryLanguage, result: &Result<usize, StoreError>) {
        self.message = Some(clear_message(language, result));
    }
}
