use serde::{Deserialize, Serialize};

use crate::error::{OptimizerError, Result};

/// Default number of top players per role considered by the search
pub const DEFAULT_SHORTLIST_SIZE: usize = 5;

/// Largest accepted shortlist; the search holds up to (size + 1)^5 candidates
pub const MAX_SHORTLIST_SIZE: usize = 10;

/// Default number of teams returned
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Configuration for the team optimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Top players per role kept before the cheapest one is added
    pub shortlist_size: usize,

    /// Maximum number of teams returned by one search
    pub max_results: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self { shortlist_size: DEFAULT_SHORTLIST_SIZE, max_results: DEFAULT_MAX_RESULTS }
    }
}

impl OptimizerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from `LINEUP_*` environment variables, then validate
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars<F: Fn(&str) -> Option<String>>(&mut self, var: F) -> Result<()> {
        if let Some(size) = parse_var(&var, "LINEUP_SHORTLIST_SIZE")? {
            self.shortlist_size = size;
        }

        if let Some(max) = parse_var(&var, "LINEUP_MAX_RESULTS")? {
            self.max_results = max;
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.shortlist_size == 0 || self.shortlist_size > MAX_SHORTLIST_SIZE {
            return Err(OptimizerError::InvalidConfig(format!(
                "shortlist_size must be between 1 and {MAX_SHORTLIST_SIZE}, got {}",
                self.shortlist_size
            )));
        }
        if self.max_results == 0 {
            return Err(OptimizerError::InvalidConfig("max_results must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn parse_var(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<usize>> {
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| OptimizerError::InvalidConfig(format!("invalid value '{raw}' for {key}"))),
        None => Ok(None),
    }
}
