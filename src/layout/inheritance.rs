// SPDX-License-Identifier: GPL-3.0-only

//! Layout inheritance resolution.
//!
//! A layout may name another language in `inherits`. Its rows are then laid
//! over the parent's rows: keys with a matching code replace the parent's key
//! in place, new codes are appended as a trailing row, and an empty child
//! takes the parent's rows unchanged.

use crate::layout::types::{KeyConfig, KeyboardLayout, Language, ParseError};
use std::collections::HashSet;

/// Maximum inheritance depth allowed.
pub const MAX_INHERITANCE_DEPTH: usize = 3;

/// Resolves inheritance for a layout.
///
/// `load_parent` returns the unresolved layout for a language. Parents are
/// resolved recursively before being merged with the child.
///
/// # Errors
///
/// Returns `ParseError::CircularReference` when a language appears twice in
/// the chain, `ParseError::MaxDepthExceeded` when the chain is longer than
/// [`MAX_INHERITANCE_DEPTH`], and any error produced by `load_parent`.
pub fn resolve_inheritance<F>(
    layout: KeyboardLayout,
    load_parent: &F,
) -> Result<KeyboardLayout, ParseError>
where
    F: Fn(Language) -> Result<KeyboardLayout, ParseError>,
{
    let mut visited = vec![layout.language];
    resolve_recursive(layout, load_parent, &mut visited, 0)
}

fn resolve_recursive<F>(
    layout: KeyboardLayout,
    load_parent: &F,
    visited: &mut Vec<Language>,
    depth: usize,
) -> Result<KeyboardLayout, ParseError>
where
    F: Fn(Language) -> Result<KeyboardLayout, ParseError>,
{
    let Some(parent_language) = layout.inherits else {
        return Ok(layout);
    };

    if depth >= MAX_INHERITANCE_DEPTH {
        return Err(ParseError::MaxDepthExceeded {
            max_depth: MAX_INHERITANCE_DEPTH,
            actual_depth: depth + 1,
        });
    }

    if visited.contains(&parent_language) {
        let chain = visited
            .iter()
            .chain(std::iter::once(&parent_language))
            .map(|lang| lang.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        return Err(ParseError::CircularReference { chain });
    }
    visited.push(parent_language);

    let parent = load_parent(parent_language)?;
    let resolved_parent = resolve_recursive(parent, load_parent, visited, depth + 1)?;

    Ok(merge_layouts(layout, resolved_parent))
}

/// Merges a child layout over its resolved parent.
///
/// The result keeps the child's name and language and has no `inherits`.
pub fn merge_layouts(child: KeyboardLayout, parent: KeyboardLayout) -> KeyboardLayout {
    let overrides: Vec<KeyConfig> = child.rows.into_iter().flatten().collect();
    let mut used = HashSet::new();

    let mut rows: Vec<Vec<KeyConfig>> = parent
        .rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|key| match overrides.iter().position(|o| o.code == key.code) {
                    Some(idx) => {
                        used.insert(idx);
                        overrides[idx].clone()
                    }
                    None => key,
                })
                .collect()
        })
        .collect();

    let extra: Vec<KeyConfig> = overrides
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| !used.contains(idx))
        .map(|(_, key)| key)
        .collect();
    if !extra.is_empty() {
        rows.push(extra);
    }

    KeyboardLayout {
        name: child.name,
        language: child.language,
        inherits: None,
        rows,
    }
}

// ============================================================================
// Tests
// ============================================================================
