// SPDX-License-Identifier: GPL-3.0-only

//! Built-in layout tables and the per-language registry.
//!
//! The Croatian, English and Kajkavski tables are embedded into the binary.
//! A user directory may replace any of them with `<language>.json`.

use crate::layout::inheritance::resolve_inheritance;
use crate::layout::parser::parse_raw_layout;
use crate::layout::types::{KeyboardLayout, Language, ParseError};
use crate::layout::validation::validate_layout;
use rust_embed::RustEmbed;
use std::fs;
use std::path::Path;

#[derive(RustEmbed)]
#[folder = "resources/layouts/"]
struct LayoutAssets;

/// Holds exactly one resolved, validated layout per language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRegistry {
    croatian: KeyboardLayout,
    english: KeyboardLayout,
    kajkavski: KeyboardLayout,
}

impl LayoutRegistry {
    /// Loads the embedded layouts.
    pub fn builtin() -> Result<Self, ParseError> {
        Self::load(None)
    }

    /// Loads all layouts, preferring `<override_dir>/<language>.json` when present.
    ///
    /// Inheritance parents are looked up the same way, so an override of
    /// the Croatian table also changes Kajkavski unless Kajkavski is
    /// overridden too.
    pub fn load(override_dir: Option<&Path>) -> Result<Self, ParseError> {
        let load_one = |language: Language| -> Result<KeyboardLayout, ParseError> {
            let raw = load_raw(language, override_dir)?;
            let resolved = resolve_inheritance(raw, &|parent| load_raw(parent, override_dir))?;
            let result = validate_layout(resolved)
                .map_err(|e| e.with_path(format!("{}.json", language.as_str())))?;

            for warning in &result.warnings {
                tracing::warn!("Layout {}: {}", language, warning);
            }
            Ok(result.into_layout())
        };

        Ok(Self {
            croatian: load_one(Language::Croatian)?,
            english: load_one(Language::English)?,
            kajkavski: load_one(Language::Kajkavski)?,
        })
    }

    /// Returns the layout for a language.
    pub fn get(&self, language: Language) -> &KeyboardLayout {
        match language {
            Language::Croatian => &self.croatian,
            Language::English => &self.english,
            Language::Kajkavski => &self.kajkavski,
        }
    }
}

fn resource_name(language: Language) -> String {
    format!("{}.json", language.as_str())
}

/// Loads one unresolved layout from the override directory or the embedded assets.
fn load_raw(language: Language, override_dir: Option<&Path>) -> Result<KeyboardLayout, ParseError> {
    let name = resource_name(language);

    if let Some(path) = override_dir.map(|dir| dir.join(&name)).filter(|p| p.is_file()) {
        return load_override(&path);
    }

    let file = LayoutAssets::get(&name).ok_or_else(|| ParseError::MissingResource {
        name: name.clone(),
    })?;
    serde_json::from_slice(&file.data).map_err(|e| ParseError::json_error_with_path(e, name))
}

fn load_override(path: &Path) -> Result<KeyboardLayout, ParseError> {
    let display_path = path.display().to_string();
    tracing::info!("Loading layout override from {}", display_path);

    let json = fs::read_to_string(path)
        .map_err(|e| ParseError::io_error_with_path(e, &display_path))?;
    parse_raw_layout(&json).map_err(|e| e.with_path(display_path))
}

// ============================================================================
// Tests
// ============================================================================
