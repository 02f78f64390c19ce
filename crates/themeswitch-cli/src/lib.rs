//! Native host for the theme controller.
//!
//! `themectl` stands in for a page: the preference lives in a JSON file,
//! the OS signal comes from `dark-light` (or `--os`), and the document is an
//! in-memory page carrying the standard selector control. Each invocation
//! is one page load, optionally followed by one event.

pub mod cli;
pub mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use themeswitch::{
    detect_color_mode, ColorMode, FileStore, ManualColorScheme, MemoryPage, PreferenceStore,
    ThemeConfig, ThemeController, ThemeDocument, ThemeEvent,
};
use tracing::{debug, warn};

use crate::cli::{Cli, Command, OsScheme};
pub use crate::report::{render, ThemeReport};

/// Where the preference file lives when `--store` is not given.
pub fn default_store_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("themeswitch").join("preferences.json"))
}

fn color_mode(scheme: OsScheme) -> ColorMode {
    match scheme {
        OsScheme::System => detect_color_mode(),
        OsScheme::Light => ColorMode::Light,
        OsScheme::Dark => ColorMode::Dark,
    }
}

/// Loads the page, runs the requested command and reports the outcome.
pub fn run(cli: &Cli) -> Result<ThemeReport> {
    let config = match &cli.config {
        Some(path) => ThemeConfig::load(path)
            .with_context(|| format!("loading theme config {}", path.display()))?,
        None => ThemeConfig::default(),
    };
    let store_path = cli
        .store
        .clone()
        .or_else(default_store_path)
        .context("no config directory available; pass --store")?;
    debug!(store = %store_path.display(), "using preference file");

    let mut page = MemoryPage::new().with_selector(&config);
    if let Some(declared) = cli.page_default {
        page = page.with_root_attribute(&config.root_attribute, declared.as_str());
    }

    let mut controller = ThemeController::new(
        config,
        FileStore::new(&store_path),
        page,
        ManualColorScheme::new(color_mode(cli.os)),
    );
    controller.initialize();

    match cli.command.clone().unwrap_or(Command::Show) {
        Command::Show => {}
        Command::Set { preference } => {
            controller.handle(ThemeEvent::OptionClicked(preference));
        }
        Command::OsChanged { to } => {
            controller.scheme().set(color_mode(to));
            controller.handle(ThemeEvent::OsPreferenceChanged);
        }
    }

    let config = controller.config();
    let document = controller.document();
    let effective = document
        .root_attribute(&config.root_attribute)
        .and_then(|value| match value.as_str() {
            "dark" => Some(ColorMode::Dark),
            "light" => Some(ColorMode::Light),
            _ => None,
        })
        .context("theme was not applied to the page")?;
    let stored = match controller.store().get(&config.storage_key) {
        Ok(stored) => stored,
        Err(e) => {
            warn!(error = %e, "preference file unreadable, reporting no stored value");
            None
        }
    };

    Ok(ThemeReport {
        preference: controller.resolve_preference(),
        effective,
        stored,
        store_path,
        page_default: controller.page_default(),
        active_options: document.active_options(config),
        visible_icons: document.visible_icons(config),
        events: document.event_count(&config.change_event),
    })
}
