// SPDX-License-Identifier: GPL-3.0-only

//! Layout parsing logic for loading JSON layout tables.
//!
//! This module provides functions for parsing keyboard layout tables from
//! JSON files and strings. Parsing validates the table; inheritance is
//! resolved by the caller, which knows where parent layouts come from.

use crate::layout::types::{KeyboardLayout, ParseError, ParseResult};
use crate::layout::validation::validate_layout;
use std::fs;
use std::path::Path;

/// Parses a keyboard layout from a JSON string.
///
/// # Arguments
///
/// * `json` - JSON string containing the layout table
///
/// # Returns
///
/// Returns a `ParseResult` containing the parsed layout and any warnings,
/// or a `ParseError` if the JSON is malformed or validation fails.
///
/// # Example
///
/// ```rust,ignore
/// use tipkovnica::layout::parse_layout_from_str;
///
/// let json = r#"{
///     "name": "Mini",
///     "language": "english",
///     "rows": [[{"main": "a", "shift": "A", "code": "KeyA"}]]
/// }"#;
///
/// let result = parse_layout_from_str(json)?;
/// assert_eq!(result.layout.key_count(), 1);
/// ```
pub fn parse_layout_from_str(json: &str) -> Result<ParseResult<KeyboardLayout>, ParseError> {
    let layout = parse_raw_layout(json)?;
    validate_layout(layout)
}

/// Parses a keyboard layout from a JSON file.
///
/// I/O failures and JSON failures are reported separately, and both carry
/// the file path.
pub fn parse_layout_file(
    path: impl AsRef<Path>,
) -> Result<ParseResult<KeyboardLayout>, ParseError> {
    let path = path.as_ref();
    let display_path = path.display().to_string();

    let json_str =
        fs::read_to_string(path).map_err(|e| ParseError::io_error_with_path(e, &display_path))?;

    parse_layout_from_str(&json_str).map_err(|e| e.with_path(display_path))
}

/// Deserializes a layout without validating it.
///
/// Used when loading inheritance parents, which are validated once the
/// whole chain has been merged.
pub fn parse_raw_layout(json: &str) -> Result<KeyboardLayout, ParseError> {
    serde_json::from_str(json).map_err(ParseError::json_error)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::Language;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINI: &str = r#"{
        "name": "Mini",
        "language": "english",
        "rows": [[
            {"main": "a", "shift": "A", "code": "KeyA"},
            {"main": "1", "code": "Digit1"}
        ]]
    }"#;

    #[test]
    fn test_parse_valid_layout() {
        let result = parse_layout_from_str(MINI).unwrap();
        let layout = result.into_layout();

        assert_eq!(layout.name, "Mini");
        assert_eq!(layout.language, Language::English);
        assert_eq!(layout.key_count(), 2);
        assert_eq!(layout.find("Digit1").unwrap().shift, None);
    }

    #[test]
    fn test_malformed_json_reports_line() {
        let err = parse_layout_from_str("{\n  \"name\": \"Broken\",\n  \"rows\": [\n").unwrap_err();
        match err {
            ParseError::JsonError { line_number, .. } => assert!(line_number.is_some()),
            other => panic!("Expected JsonError, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_language_rejected() {
        let json = r#"{"name": "X", "language": "klingon", "rows": []}"#;
        assert!(matches!(
            parse_layout_from_str(json),
            Err(ParseError::JsonError { .. })
        ));
    }

    #[test]
    fn test_parse_file_attaches_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "Dup", "language": "english", "rows": [[
            {{"main": "a", "code": "KeyA"}}, {{"main": "b", "code": "KeyA"}}
        ]]}}"#)
        .unwrap();

        let err = parse_layout_file(file.path()).unwrap_err();
        match err {
            ParseError::ValidationError { file_path, .. } => {
                assert_eq!(file_path, Some(file.path().display().to_string()));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_layout_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ParseError::IoError { .. }));
    }
}
