// SPDX-License-Identifier: GPL-3.0-only

//! Page state for the screens around the keyboard.

pub mod admin;
pub mod auth;
pub mod saved_texts;

pub use admin::{AdminPage, ImportReport, import_words, prepare_import};
pub use auth::{Credentials, LoginForm, RegisterForm};
pub use saved_texts::{SavedTextsPage, export_dir, export_saved_text};

/// Screens of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Login,
    Register,
    Keyboard,
    SavedTexts,
    Admin,
}

impl Page {
    /// Returns `true` if the page needs a signed-in user.
    pub fn requires_session(self) -> bool {
        matches!(self, Page::SavedTexts | Page::Admin)
    }
}
