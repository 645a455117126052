// SPDX-License-Identifier: GPL-3.0-only

//! Tipkovnica main application
//!
//! Loads configuration, keyboard layouts and the store, then opens the
//! keyboard window.

use cosmic::cosmic_config::{self, CosmicConfigEntry};
use std::sync::Arc;
use tipkovnica::app::{self, Flags};
use tipkovnica::app_settings;
use tipkovnica::config::Config;
use tipkovnica::layout::LayoutRegistry;
use tipkovnica::store::{LocalStore, RemoteStore};

fn main() -> cosmic::iced::Result {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tipkovnica=info".parse().unwrap()),
        )
        .init();

    let config_handler = cosmic_config::Config::new(app_settings::APP_ID, Config::VERSION)
        .inspect_err(|err| tracing::warn!("Configuration unavailable: {}", err))
        .ok();
    let config = config_handler
        .as_ref()
        .map(|context| match Config::get_entry(context) {
            Ok(config) => config,
            Err((errors, config)) => {
                for err in errors {
                    tracing::warn!("Config entry error: {}", err);
                }
                config
            }
        })
        .unwrap_or_default();

    let mut startup_warnings = Vec::new();

    let layouts = match LayoutRegistry::load(config.layout_dir().as_deref()) {
        Ok(layouts) => layouts,
        Err(err) => {
            tracing::error!("Failed to load layout overrides: {}", err);
            startup_warnings.push(format!("Raspored nije učitan: {}", err));
            match LayoutRegistry::builtin() {
                Ok(layouts) => layouts,
                Err(err) => {
                    tracing::error!("Built-in layouts are invalid: {}", err);
                    std::process::exit(1);
                }
            }
        }
    };

    let store: Arc<dyn RemoteStore> = match config.store_path().or_else(LocalStore::default_path) {
        Some(path) => match LocalStore::open(&path) {
            Ok(store) => {
                tracing::info!("Using store at {}", path.display());
                Arc::new(store)
            }
            Err(err) => {
                tracing::error!("Failed to open store at {}: {}", path.display(), err);
                startup_warnings.push(format!("Podaci se neće spremati: {}", err));
                Arc::new(LocalStore::in_memory())
            }
        },
        None => {
            tracing::warn!("No data directory, keeping data in memory");
            startup_warnings.push("Podaci se neće spremati".to_string());
            Arc::new(LocalStore::in_memory())
        }
    };

    // Settings for configuring the application window and iced runtime.
    let settings = cosmic::app::Settings::default()
        .size(cosmic::iced::Size::new(
            app_settings::DEFAULT_WIDTH,
            app_settings::DEFAULT_HEIGHT,
        ))
        .size_limits(
            cosmic::iced::Limits::NONE
                .min_width(app_settings::MIN_WIDTH)
                .min_height(app_settings::MIN_HEIGHT),
        );

    let flags = Flags {
        store,
        layouts,
        config_handler,
        config,
        startup_warnings,
    };

    // Starts the application's event loop.
    cosmic::app::run::<app::AppModel>(settings, flags)
}
