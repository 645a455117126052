// SPDX-License-Identifier: GPL-3.0-only

//! User-facing error types.
//!
//! Display strings are shown to the user as-is, so they are Croatian.

use std::fmt;

/// Input rejected before any store call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Save requested for a buffer holding only whitespace.
    EmptyText,
    /// Dictionary import requested with no words.
    EmptyImport,
    /// Email or password missing.
    MissingCredentials,
    /// Password and confirmation differ.
    PasswordMismatch,
    /// Password shorter than the minimum.
    PasswordTooShort { min: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyText => write!(f, "Tekst je prazan"),
            ValidationError::EmptyImport => write!(f, "Unesite riječi za import"),
            ValidationError::MissingCredentials => write!(f, "Unesite email i lozinku"),
            ValidationError::PasswordMismatch => write!(f, "Lozinke se ne podudaraju"),
            ValidationError::PasswordTooShort { min } => {
                write!(f, "Lozinka mora imati najmanje {} znakova", min)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    Io(String),
    /// Stored data could not be encoded or decoded.
    Serialization(String),
    /// Sign-in with an unknown email or wrong password.
    InvalidCredentials,
    /// Sign-up with an email that is already registered.
    UserExists,
    /// The referenced record does not exist.
    NotFound(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "Greška pri pristupu podacima: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Neispravan zapis podataka: {}", msg),
            StoreError::InvalidCredentials => write!(f, "Neispravan email ili lozinka"),
            StoreError::UserExists => write!(f, "Korisnik s tim emailom već postoji"),
            StoreError::NotFound(what) => write!(f, "Zapis nije pronađen: {}", what),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Errors surfaced by application actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Validation(ValidationError),
    Store(StoreError),
    /// The action needs a signed-in user.
    NotAuthenticated,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(err) => write!(f, "{}", err),
            AppError::Store(err) => write!(f, "{}", err),
            AppError::NotAuthenticated => write!(f, "Prijavite se za ovu radnju"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::NotAuthenticated => None,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}
