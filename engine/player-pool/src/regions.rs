use serde::{Deserialize, Serialize};

use crate::error::{PoolError, Result};

/// Teams whose name contains any of `team_markers` belong to `name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRule {
    pub name: String,
    pub team_markers: Vec<String>,
}

/// Static team-to-region lookup
///
/// Rules are checked in order and the first rule with a marker contained in
/// the team name wins. Teams matching no rule land in `fallback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTable {
    pub rules: Vec<RegionRule>,
    pub fallback: String,
}

impl Default for RegionTable {
    fn default() -> Self {
        let south = ["FURIA", "Isurus", "Fluxo", "paiN", "LOUD", "Vivo", "Leviatán", "RED"];
        Self {
            rules: vec![RegionRule {
                name: "South".to_string(),
                team_markers: south.iter().map(|m| m.to_string()).collect(),
            }],
            fallback: "North".to_string(),
        }
    }
}

impl RegionTable {
    pub fn classify(&self, team: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.team_markers.iter().any(|marker| team.contains(marker.as_str())))
            .map(|rule| rule.name.as_str())
            .unwrap_or(&self.fallback)
    }

    /// Region names in rule order, fallback last
    pub fn region_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.rules.len() + 1);
        for rule in &self.rules {
            if !names.contains(&rule.name.as_str()) {
                names.push(&rule.name);
            }
        }
        if !names.contains(&self.fallback.as_str()) {
            names.push(&self.fallback);
        }
        names
    }

    pub fn validate(&self) -> Result<()> {
        if self.fallback.trim().is_empty() {
            return Err(PoolError::Config("region fallback must not be empty".to_string()));
        }
        for rule in &self.rules {
            if rule.team_markers.iter().any(|m| m.is_empty()) {
                return Err(PoolError::Config(format!(
                    "region '{}' has an empty team marker",
                    rule.name
                )));
            }
        }
        Ok(())
    }
}
