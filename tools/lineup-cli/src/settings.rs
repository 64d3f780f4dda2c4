//! Persisted budget and team odds
//!
//! Every save appends a snapshot to `history`, so the file doubles as a log
//! of what the lineups were computed with.

use anyhow::{anyhow, Context, Result};
use chrono::{SecondsFormat, Utc};
use player_pool::{normalize_odds, DEFAULT_TEAM_ODDS};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_BUDGET: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// RFC 3339, second precision, UTC
    pub timestamp: String,
    pub budget: f64,
    pub odds: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub budget: f64,
    pub odds: BTreeMap<String, f64>,
    pub history: Vec<HistoryEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { budget: DEFAULT_BUDGET, odds: BTreeMap::new(), history: Vec::new() }
    }
}

impl Settings {
    /// Give every listed team without odds the default odds, returns how many were added
    pub fn ensure_teams<'a, I>(&mut self, teams: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut added = 0;
        for team in teams {
            if !self.odds.contains_key(team) {
                self.odds.insert(team.to_string(), DEFAULT_TEAM_ODDS);
                added += 1;
            }
        }
        added
    }

    pub fn set_budget(&mut self, budget: f64) -> Result<()> {
        if !(budget.is_finite() && budget >= 0.0) {
            return Err(anyhow!("Budget must be a non-negative number, got {}", budget));
        }
        self.budget = budget;
        Ok(())
    }

    pub fn set_odds(&mut self, team: &str, odds: f64) -> Result<()> {
        let odds = normalize_odds(odds).ok_or_else(|| anyhow!("Odds for {} must be positive, got {}", team, odds))?;
        self.odds.insert(team.to_string(), odds);
        Ok(())
    }

    /// Odds in the shape the scoring engine takes
    pub fn odds_map(&self) -> HashMap<String, f64> {
        self.odds.iter().map(|(team, odds)| (team.clone(), *odds)).collect()
    }

    fn record_history(&mut self) {
        self.history.push(HistoryEntry {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            budget: self.budget,
            odds: self.odds.clone(),
        });
    }
}

/// Parse a `TEAM=ODDS` assignment; the team name may itself contain `=`
pub fn parse_odds_assignment(raw: &str) -> Result<(String, f64)> {
    let (team, odds) = raw
        .rsplit_once('=')
        .ok_or_else(|| anyhow!("Expected TEAM=ODDS, got '{}'", raw))?;
    let team = team.trim();
    if team.is_empty() {
        return Err(anyhow!("Missing team name in '{}'", raw));
    }
    let odds: f64 = odds
        .trim()
        .parse()
        .with_context(|| format!("Invalid odds in '{}'", raw))?;
    Ok((team.to_string(), odds))
}

/// JSON file holding the [`Settings`]
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored settings, or the defaults when nothing was saved yet
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            debug!("No settings at {:?}, using defaults", self.path);
            return Ok(Settings::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings: {:?}", self.path))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings file: {:?}", self.path))?;
        Ok(settings)
    }

    /// Append a history snapshot and write everything back
    pub fn save(&self, settings: &mut Settings) -> Result<()> {
        settings.record_history();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings: {:?}", self.path))?;

        info!("Saved settings to {:?} ({} history entries)", self.path, settings.history.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let settings = store.load().unwrap();
        assert_eq!(settings.budget, 25.0);
        assert!(settings.odds.is_empty());
        assert!(settings.history.is_empty());
    }

    #[test]
    fn test_save_appends_history() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.json"));
        assert!(!store.path().exists());

        let mut settings = store.load().unwrap();
        settings.set_budget(30.0).unwrap();
        settings.set_odds("LOUD", 1.5).unwrap();
        store.save(&mut settings).unwrap();

        assert!(store.path().exists());
        let mut reloaded = store.load().unwrap();
        assert_eq!(reloaded.budget, 30.0);
        assert_eq!(reloaded.odds.get("LOUD"), Some(&1.5));
        assert_eq!(reloaded.history.len(), 1);
        assert_eq!(reloaded.history[0].budget, 30.0);
        assert!(chrono::DateTime::parse_from_rfc3339(&reloaded.history[0].timestamp).is_ok());

        reloaded.set_budget(20.0).unwrap();
        store.save(&mut reloaded).unwrap();
        let last = store.load().unwrap();
        assert_eq!(last.history.len(), 2);
        assert_eq!(last.history[0].budget, 30.0);
        assert_eq!(last.history[1].budget, 20.0);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "odds": { "paiN": 3.0 } }"#).unwrap();

        let settings = SettingsStore::new(&path).load().unwrap();
        assert_eq!(settings.budget, DEFAULT_BUDGET);
        assert_eq!(settings.odds_map().get("paiN"), Some(&3.0));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(SettingsStore::new(&path).load().is_err());
    }

    #[test]
    fn test_ensure_teams_keeps_existing_odds() {
        let mut settings = Settings::default();
        settings.set_odds("LOUD", 1.4).unwrap();
        let added = settings.ensure_teams(["LOUD", "paiN", "paiN"]);
        assert_eq!(added, 1);
        assert_eq!(settings.odds["LOUD"], 1.4);
        assert_eq!(settings.odds["paiN"], DEFAULT_TEAM_ODDS);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set_budget(-1.0).is_err());
        assert!(settings.set_budget(f64::NAN).is_err());
        assert!(settings.set_odds("LOUD", 0.0).is_err());
        assert_eq!(settings.budget, DEFAULT_BUDGET);
        assert!(settings.odds.is_empty());
    }

    #[test]
    fn test_parse_odds_assignment() {
        assert_eq!(parse_odds_assignment("LOUD=1.5").unwrap(), ("LOUD".to_string(), 1.5));
        assert_eq!(parse_odds_assignment(" Red = Team = 2 ").unwrap(), ("Red = Team".to_string(), 2.0));
        assert!(parse_odds_assignment("LOUD").is_err());
        assert!(parse_odds_assignment("=2").is_err());
        assert!(parse_odds_assignment("LOUD=fast").is_err());
    }
}
