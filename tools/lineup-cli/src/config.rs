//! Configuration for the lineup CLI
//!
//! A TOML file (optional) is read first, then `LINEUP_*` environment
//! variables override it, then the whole thing is validated.

use anyhow::{anyhow, Context, Result};
use player_pool::{CacheLayout, RegionTable};
use scoring_engine::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use team_optimizer::OptimizerConfig;

/// Top-level CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineupConfig {
    /// Directory holding the captured market, season and player payloads
    pub data_dir: PathBuf,

    /// JSON file with the persisted budget and odds
    pub settings_file: PathBuf,

    pub logging: LoggingConfig,
    pub scoring: ScoringConfig,
    pub optimizer: OptimizerConfig,
    pub regions: RegionTable,
    pub cache: CacheLayout,
}

impl Default for LineupConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./cache"),
            settings_file: PathBuf::from("./settings.json"),
            logging: LoggingConfig::default(),
            scoring: ScoringConfig::default(),
            optimizer: OptimizerConfig::default(),
            regions: RegionTable::default(),
            cache: CacheLayout::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), `RUST_LOG` wins when set
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Compact }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
            LogFormat::Compact => "compact",
        };
        f.write_str(name)
    }
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(anyhow!("Invalid log format: {}", other)),
        }
    }
}

impl LineupConfig {
    /// Load from an optional file, apply environment overrides, validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// CLI-level variables here; scoring and optimizer read their own
    fn apply_env(&mut self) -> Result<()> {
        if let Ok(data_dir) = std::env::var("LINEUP_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(settings_file) = std::env::var("LINEUP_SETTINGS_FILE") {
            self.settings_file = PathBuf::from(settings_file);
        }

        if let Ok(level) = std::env::var("LINEUP_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = env_parse("LINEUP_LOG_FORMAT")? {
            self.logging.format = format;
        }

        self.scoring.apply_env()?;
        self.optimizer.apply_env()?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(anyhow!("Invalid log level: {}", self.logging.level)),
        }

        if self.cache.market_file.is_empty() || self.cache.season_file.is_empty() {
            return Err(anyhow!("Cache file names must not be empty"));
        }

        self.scoring.validate()?;
        self.optimizer.validate()?;
        self.regions.validate()?;
        Ok(())
    }
}

/// Parse an environment variable when it is set
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow!("Invalid value '{}' for {}: {}", raw, key, e)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LineupConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.optimizer.shortlist_size, 5);
        assert_eq!(config.regions.classify("LOUD"), "South");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LineupConfig::from_toml_str(
            r#"
            data_dir = "/tmp/lineup"

            [logging]
            format = "json"

            [optimizer]
            max_results = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/lineup"));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.optimizer.max_results, 3);
        assert_eq!(config.optimizer.shortlist_size, 5);
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_custom_regions_from_toml() {
        let config = LineupConfig::from_toml_str(
            r#"
            [regions]
            fallback = "Other"

            [[regions.rules]]
            name = "East"
            team_markers = ["Dragons"]
            "#,
        )
        .unwrap();

        assert_eq!(config.regions.classify("Red Dragons"), "East");
        assert_eq!(config.regions.classify("LOUD"), "Other");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = LineupConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(LineupConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = LineupConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = LineupConfig::default();
        config.optimizer.max_results = 0;
        assert!(config.validate().is_err());

        let mut config = LineupConfig::default();
        config.scoring.default_team_odds = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::Pretty.to_string(), "pretty");
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
