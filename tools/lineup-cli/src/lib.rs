//! # Lineup CLI
//!
//! Loads a captured player cache, scores it with the persisted odds and
//! budget, and prints rankings, optimized teams and insights.

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
pub mod settings;

pub use cli::{Cli, CliHandler, Commands};
pub use config::{LineupConfig, LogFormat, LoggingConfig};
pub use settings::{HistoryEntry, Settings, SettingsStore};
