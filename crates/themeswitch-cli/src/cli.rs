//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use themeswitch::ThemePreference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OsScheme {
    /// Ask the operating system.
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Styled when stdout is a terminal, plain otherwise.
    Auto,
    /// Always styled.
    Term,
    /// Never styled.
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "themectl", author, version, about)]
pub struct Cli {
    /// Preference file (JSON). Defaults to `<config dir>/themeswitch/preferences.json`.
    #[arg(long, global = true, env = "THEMECTL_STORE")]
    pub store: Option<PathBuf>,

    /// JSON file overriding storage key, attribute, class and event names.
    #[arg(long, global = true, env = "THEMECTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// OS colour scheme to assume.
    #[arg(long, global = true, value_enum, default_value = "system")]
    pub os: OsScheme,

    /// Theme the page declares on its root element (`light`, `dark` or `auto`).
    #[arg(long, global = true)]
    pub page_default: Option<ThemePreference>,

    /// Output mode.
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub output: OutputMode,

    /// Log resolution steps to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Resolve and print the current theme (the default).
    Show,
    /// Select a preference, as a click on the selector would.
    Set {
        /// `light`, `dark` or `auto`.
        preference: ThemePreference,
    },
    /// Deliver an OS colour-scheme change after loading.
    OsChanged {
        /// The scheme the OS switches to.
        #[arg(long, value_enum)]
        to: OsScheme,
    },
}
