// SPDX-License-Identifier: GPL-3.0-only

//! Validation rules for keyboard layout tables.
//!
//! Validation is permissive: problems that still leave a usable table are
//! collected as warnings, and only tables that would make key lookup
//! ambiguous or impossible are rejected.

use crate::layout::types::{
    KeyboardLayout, ParseError, ParseResult, Severity, ValidationIssue,
};
use std::collections::HashMap;

/// Validates a layout and returns it with warnings.
///
/// # Errors
///
/// Returns `ParseError::ValidationError` carrying every error-level issue
/// (and the warnings found alongside them) when at least one error exists.
pub fn validate_layout(layout: KeyboardLayout) -> Result<ParseResult<KeyboardLayout>, ParseError> {
    let mut issues = Vec::new();

    validate_required_fields(&layout, &mut issues);
    validate_keys(&layout, &mut issues);
    validate_unique_codes(&layout, &mut issues);

    if issues.iter().any(|issue| issue.severity == Severity::Error) {
        return Err(ParseError::ValidationError {
            issues,
            file_path: None,
        });
    }

    Ok(ParseResult::with_warnings(layout, issues))
}

/// Checks layout-level fields.
pub fn validate_required_fields(layout: &KeyboardLayout, issues: &mut Vec<ValidationIssue>) {
    if layout.name.is_empty() {
        issues.push(
            ValidationIssue::warning("Layout name is empty", "name")
                .with_suggestion("Provide a display name for the layout"),
        );
    }

    // An inheriting layout may leave rows empty; they come from the parent.
    if layout.rows.is_empty() && layout.inherits.is_none() {
        issues.push(
            ValidationIssue::error("Layout has no rows", "rows")
                .with_suggestion("Add key rows or set \"inherits\" to another language"),
        );
    }

    if layout.inherits == Some(layout.language) {
        issues.push(ValidationIssue::error(
            format!("Layout '{}' inherits from its own language", layout.name),
            "inherits",
        ));
    }
}

/// Checks every key for empty fields and redundant shift characters.
pub fn validate_keys(layout: &KeyboardLayout, issues: &mut Vec<ValidationIssue>) {
    for (row_idx, row) in layout.rows.iter().enumerate() {
        if row.is_empty() {
            issues.push(ValidationIssue::warning(
                "Row is empty",
                format!("rows[{}]", row_idx),
            ));
        }

        for (key_idx, key) in row.iter().enumerate() {
            let key_path = format!("rows[{}][{}]", row_idx, key_idx);

            if key.code.is_empty() {
                issues.push(
                    ValidationIssue::error("Key code is empty", format!("{}.code", key_path))
                        .with_suggestion("Use a physical key code such as \"KeyA\""),
                );
            }

            if key.main.is_empty() {
                issues.push(ValidationIssue::error(
                    "Key main character is empty",
                    format!("{}.main", key_path),
                ));
            }

            match key.shift.as_deref() {
                Some("") => issues.push(
                    ValidationIssue::warning(
                        "Shift character is empty",
                        format!("{}.shift", key_path),
                    )
                    .with_suggestion("Remove the \"shift\" field instead"),
                ),
                Some(shift) if shift == key.main => issues.push(ValidationIssue::warning(
                    "Shift character equals main character",
                    format!("{}.shift", key_path),
                )),
                _ => {}
            }
        }
    }
}

/// Checks that no two keys answer to the same physical code.
pub fn validate_unique_codes(layout: &KeyboardLayout, issues: &mut Vec<ValidationIssue>) {
    let mut seen: HashMap<&str, String> = HashMap::new();

    for (row_idx, row) in layout.rows.iter().enumerate() {
        for (key_idx, key) in row.iter().enumerate() {
            if key.code.is_empty() {
                continue;
            }
            let key_path = format!("rows[{}][{}]", row_idx, key_idx);
            if let Some(first) = seen.get(key.code.as_str()) {
                issues.push(
                    ValidationIssue::error(
                        format!("Duplicate key code '{}' (first used at {})", key.code, first),
                        format!("{}.code", key_path),
                    )
                    .with_suggestion("Each physical key may appear only once per layout"),
                );
            } else {
                seen.insert(key.code.as_str(), key_path);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{KeyConfig, Language};

    fn layout(rows: Vec<Vec<KeyConfig>>) -> KeyboardLayout {
        KeyboardLayout {
            name: "Test".to_string(),
            language: Language::English,
            inherits: None,
            rows,
        }
    }

    #[test]
    fn test_valid_layout_has_no_issues() {
        let result = validate_layout(layout(vec![vec![
            KeyConfig::new("a", Some("A"), "KeyA"),
            KeyConfig::new("b", Some("B"), "KeyB"),
        ]]))
        .unwrap();
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_duplicate_code_is_error() {
        let err = validate_layout(layout(vec![
            vec![KeyConfig::new("a", None, "KeyA")],
            vec![KeyConfig::new("b", None, "KeyA")],
        ]))
        .unwrap_err();

        match err {
            ParseError::ValidationError { issues, .. } => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field_path, "rows[1][0].code");
                assert!(issues[0].message.contains("rows[0][0]"));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_main_is_error() {
        let err = validate_layout(layout(vec![vec![KeyConfig::new("", None, "KeyA")]]));
        assert!(matches!(err, Err(ParseError::ValidationError { .. })));
    }

    #[test]
    fn test_no_rows_is_error_unless_inheriting() {
        assert!(validate_layout(layout(Vec::new())).is_err());

        let mut inheriting = layout(Vec::new());
        inheriting.language = Language::Kajkavski;
        inheriting.inherits = Some(Language::Croatian);
        assert!(validate_layout(inheriting).is_ok());
    }

    #[test]
    fn test_self_inheritance_is_error() {
        let mut looped = layout(Vec::new());
        looped.inherits = Some(Language::English);
        assert!(validate_layout(looped).is_err());
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let result = validate_layout(layout(vec![
            vec![KeyConfig::new("1", Some("1"), "Digit1")],
            vec![],
        ]))
        .unwrap();

        assert_eq!(result.warnings.len(), 2);
        assert!(result
            .warnings
            .iter()
            .all(|issue| issue.severity == Severity::Warning));
    }
}
