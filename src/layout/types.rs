// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for keyboard layouts.
//!
//! This module defines the language enum, the key and layout tables loaded
//! from JSON, and the error and validation types produced while loading them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Error Handling Types
// ============================================================================

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal error that prevents layout from being used
    Error,
    /// Non-fatal issue that should be addressed
    Warning,
}

/// A validation issue discovered while loading a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity level (Error or Warning)
    pub severity: Severity,
    /// Human-readable description of the issue
    pub message: String,
    /// Path to the field that caused the issue (e.g., "rows[1][2].code")
    pub field_path: String,
    /// Optional suggestion for how to fix the issue
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        field_path: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            field_path: field_path.into(),
            suggestion: None,
        }
    }

    /// Creates an error-level issue.
    pub fn error(message: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self::new(Severity::Error, message, field_path)
    }

    /// Creates a warning-level issue.
    pub fn warning(message: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message, field_path)
    }

    /// Adds a suggestion to the validation issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity_str = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };

        write!(f, "[{}] {}: {}", severity_str, self.field_path, self.message)?;

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Error type for layout loading operations.
#[derive(Debug)]
pub enum ParseError {
    /// I/O error occurred while reading an override layout file
    IoError {
        /// The underlying I/O error
        source: std::io::Error,
        /// Optional file path that caused the error
        file_path: Option<String>,
    },

    /// JSON parsing error
    JsonError {
        /// The underlying JSON parsing error
        source: serde_json::Error,
        /// Optional file or resource name being parsed
        file_path: Option<String>,
        /// Line number where the error occurred (from serde_json)
        line_number: Option<usize>,
    },

    /// An embedded layout resource is missing from the binary
    MissingResource {
        /// Name of the resource that was requested
        name: String,
    },

    /// Validation errors found during parsing
    ValidationError {
        /// List of validation issues found
        issues: Vec<ValidationIssue>,
        /// Optional file path being validated
        file_path: Option<String>,
    },

    /// A layout inherits from itself, directly or through other layouts
    CircularReference {
        /// Chain of languages forming the cycle (e.g., "croatian -> kajkavski -> croatian")
        chain: String,
    },

    /// Inheritance chain is longer than allowed
    MaxDepthExceeded {
        /// The depth limit that was exceeded
        max_depth: usize,
        /// The actual depth reached
        actual_depth: usize,
    },
}

impl ParseError {
    /// Creates an I/O error with file path.
    pub fn io_error_with_path(source: std::io::Error, file_path: impl Into<String>) -> Self {
        Self::IoError {
            source,
            file_path: Some(file_path.into()),
        }
    }

    /// Creates a JSON parsing error with context.
    pub fn json_error(source: serde_json::Error) -> Self {
        let line_number = Some(source.line());
        Self::JsonError {
            source,
            file_path: None,
            line_number,
        }
    }

    /// Creates a JSON parsing error with file path.
    pub fn json_error_with_path(source: serde_json::Error, file_path: impl Into<String>) -> Self {
        let line_number = Some(source.line());
        Self::JsonError {
            source,
            file_path: Some(file_path.into()),
            line_number,
        }
    }

    /// Attaches a file path to errors that do not carry one yet.
    pub fn with_path(self, path: impl Into<String>) -> Self {
        match self {
            ParseError::JsonError {
                source,
                file_path: None,
                line_number,
            } => ParseError::JsonError {
                source,
                file_path: Some(path.into()),
                line_number,
            },
            ParseError::ValidationError {
                issues,
                file_path: None,
            } => ParseError::ValidationError {
                issues,
                file_path: Some(path.into()),
            },
            other => other,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::IoError { source, file_path } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading file '{}'", path)?;
                }
                write!(f, ": {}", source)?;
            }
            ParseError::JsonError {
                source,
                file_path,
                line_number,
            } => {
                write!(f, "JSON parsing error")?;
                if let Some(path) = file_path {
                    write!(f, " in '{}'", path)?;
                }
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)?;
            }
            ParseError::MissingResource { name } => {
                write!(f, "Layout resource '{}' is not embedded", name)?;
            }
            ParseError::ValidationError { issues, file_path } => {
                write!(f, "Validation failed")?;
                if let Some(path) = file_path {
                    write!(f, " for '{}'", path)?;
                }
                write!(f, " with {} issue(s):", issues.len())?;
                for (i, issue) in issues.iter().enumerate() {
                    write!(f, "\n  {}. {}", i + 1, issue)?;
                }
            }
            ParseError::CircularReference { chain } => {
                write!(f, "Circular inheritance detected: {}", chain)?;
            }
            ParseError::MaxDepthExceeded {
                max_depth,
                actual_depth,
            } => {
                write!(
                    f,
                    "Inheritance chain too deep (limit: {}, actual: {})",
                    max_depth, actual_depth
                )?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::IoError { source, .. } => Some(source),
            ParseError::JsonError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::json_error(err)
    }
}

// ============================================================================
// ParseResult Type
// ============================================================================

/// Result of successfully parsing a layout with optional warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<T> {
    /// The successfully parsed layout
    pub layout: T,
    /// Non-fatal validation warnings
    pub warnings: Vec<ValidationIssue>,
}

impl<T> ParseResult<T> {
    /// Creates a new parse result with warnings.
    pub fn with_warnings(layout: T, warnings: Vec<ValidationIssue>) -> Self {
        Self { layout, warnings }
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Consumes the result and returns the layout, discarding warnings.
    pub fn into_layout(self) -> T {
        self.layout
    }
}

// ============================================================================
// Language
// ============================================================================

/// Keyboard language. Selects which letter table the keyboard uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Croatian,
    English,
    Kajkavski,
}

impl Language {
    /// All languages in cycle order.
    pub const ALL: [Language; 3] = [Language::Croatian, Language::English, Language::Kajkavski];

    /// Next language in the cycle `croatian -> english -> kajkavski -> croatian`.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Language::Croatian => Language::English,
            Language::English => Language::Kajkavski,
            Language::Kajkavski => Language::Croatian,
        }
    }

    /// Short label shown on the language key.
    pub fn label(self) -> &'static str {
        match self {
            Language::Croatian => "HR",
            Language::English => "EN",
            Language::Kajkavski => "KAJ",
        }
    }

    /// Identifier used in stored records and resource names.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Croatian => "croatian",
            Language::English => "english",
            Language::Kajkavski => "kajkavski",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown keyboard language '{}'", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

// ============================================================================
// Layout Data Structures
// ============================================================================

/// A single key in a layout table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConfig {
    /// Character emitted without shift
    pub main: String,
    /// Character emitted with shift, if it differs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
    /// Physical key code this key answers to (e.g., "KeyA", "BracketLeft")
    pub code: String,
}

impl KeyConfig {
    /// Creates a key with an optional shift character.
    pub fn new(main: impl Into<String>, shift: Option<&str>, code: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            shift: shift.map(str::to_string),
            code: code.into(),
        }
    }

    /// Returns the character this key emits for the given shift state.
    pub fn resolve(&self, shift_active: bool) -> &str {
        match (&self.shift, shift_active) {
            (Some(shift), true) => shift,
            _ => &self.main,
        }
    }
}

/// A keyboard layout for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardLayout {
    /// Display name of the layout
    pub name: String,
    /// Language this layout belongs to
    pub language: Language,
    /// Language whose rows are reused when `rows` is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits: Option<Language>,
    /// Key rows, top to bottom
    #[serde(default)]
    pub rows: Vec<Vec<KeyConfig>>,
}

impl KeyboardLayout {
    /// Finds the key bound to `code`, scanning rows in row-major order.
    ///
    /// The first match wins.
    pub fn find(&self, code: &str) -> Option<&KeyConfig> {
        self.rows.iter().flatten().find(|key| key.code == code)
    }

    /// Total number of keys across all rows.
    pub fn key_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

// ============================================================================
// Tests
// ============================================================================
