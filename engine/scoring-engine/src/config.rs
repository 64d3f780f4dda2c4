use player_pool::DEFAULT_TEAM_ODDS;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Result, ScoringError};

/// Configuration for the scoring engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Odds used for a player's own team when none are known
    pub default_team_odds: f64,

    /// Decimal places kept for scores and averages
    pub score_decimals: u32,

    /// Decimal places kept for probabilities and weights
    pub probability_decimals: u32,

    /// Decimal places kept for the cost-efficiency ratio
    pub efficiency_decimals: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_team_odds: DEFAULT_TEAM_ODDS,
            score_decimals: 2,
            probability_decimals: 3,
            efficiency_decimals: 3,
        }
    }
}

impl ScoringConfig {
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
        if let Some(odds) = parse_var(&var, "LINEUP_DEFAULT_ODDS")? {
            self.default_team_odds = odds;
        }

        if let Some(decimals) = parse_var(&var, "LINEUP_SCORE_DECIMALS")? {
            self.score_decimals = decimals;
        }

        if let Some(decimals) = parse_var(&var, "LINEUP_PROB_DECIMALS")? {
            self.probability_decimals = decimals;
        }

        if let Some(decimals) = parse_var(&var, "LINEUP_EFFICIENCY_DECIMALS")? {
            self.efficiency_decimals = decimals;
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.default_team_odds.is_finite() && self.default_team_odds > 0.0) {
            return Err(ScoringError::InvalidConfig(format!(
                "default_team_odds must be positive, got {}",
                self.default_team_odds
            )));
        }
        for (name, decimals) in [
            ("score_decimals", self.score_decimals),
            ("probability_decimals", self.probability_decimals),
            ("efficiency_decimals", self.efficiency_decimals),
        ] {
            if decimals > 10 {
                return Err(ScoringError::InvalidConfig(format!("{name} must be at most 10, got {decimals}")));
            }
        }
        Ok(())
    }
}

fn parse_var<T, F>(var: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ScoringError::InvalidConfig(format!("invalid value '{raw}' for {key}"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ScoringConfig::default();
        assert_eq!(config.default_team_odds, 2.0);
        assert_eq!(config.score_decimals, 2);
        assert_eq!(config.probability_decimals, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let config = ScoringConfig { default_team_odds: 0.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ScoringError::InvalidConfig(_))));

        let config = ScoringConfig { score_decimals: 11, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ScoringConfig = serde_json::from_str(r#"{"score_decimals": 1}"#).unwrap();
        assert_eq!(config.score_decimals, 1);
        assert_eq!(config.probability_decimals, 3);
    }

    #[test]
    fn test_env_overrides() {
        let vars = std::collections::HashMap::from([
            ("LINEUP_DEFAULT_ODDS", "1.8"),
            ("LINEUP_SCORE_DECIMALS", " 1 "),
        ]);
        let mut config = ScoringConfig { probability_decimals: 4, ..Default::default() };
        config.apply_vars(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.default_team_odds, 1.8);
        assert_eq!(config.score_decimals, 1);
        // untouched fields keep their prior value
        assert_eq!(config.probability_decimals, 4);
    }

    #[test]
    fn test_env_rejects_bad_values() {
        let mut config = ScoringConfig::default();
        let err = config.apply_vars(|key| (key == "LINEUP_PROB_DECIMALS").then(|| "three".to_string()));
        assert!(matches!(err, Err(ScoringError::InvalidConfig(msg)) if msg.contains("LINEUP_PROB_DECIMALS")));

        let err = config.apply_vars(|key| (key == "LINEUP_DEFAULT_ODDS").then(|| "-2".to_string()));
        assert!(err.is_err());
    }
}
