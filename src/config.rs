// SPDX-License-Identifier: GPL-3.0-only

use cosmic::cosmic_config;
use cosmic::cosmic_config::{CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use std::path::PathBuf;

use crate::layout::Language;

/// User configuration that persists between application runs.
#[derive(Debug, Default, Clone, CosmicConfigEntry, Eq, PartialEq)]
#[version = 1]
pub struct Config {
    /// Keyboard language used when nobody is signed in.
    pub keyboard_language: Option<Language>,
    /// Location of the store document. Defaults to the user data dir.
    pub store_path: Option<String>,
    /// Directory with `<language>.json` files replacing the built-in layouts.
    pub layout_dir: Option<String>,
}

impl Config {
    pub fn store_path(&self) -> Option<PathBuf> {
        self.store_path.as_ref().map(PathBuf::from)
    }

    pub fn layout_dir(&self) -> Option<PathBuf> {
        self.layout_dir.as_ref().map(PathBuf::from)
    }
}
