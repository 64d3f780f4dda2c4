use scoring_engine::ScoredPlayerRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OptimizerError;

/// Scored-player field a team is optimized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ExpectedScore,
    BaseExpectedScore,
    /// Peak historical round score
    MaxRoundScore,
    AverageRoundScore,
    CostEfficiency,
    AverageWinScore,
    AverageHeadToHeadScore,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::ExpectedScore,
        Metric::BaseExpectedScore,
        Metric::MaxRoundScore,
        Metric::AverageRoundScore,
        Metric::CostEfficiency,
        Metric::AverageWinScore,
        Metric::AverageHeadToHeadScore,
    ];

    /// Parse a field selector, accepting camelCase or snake_case
    pub fn from_name(name: &str) -> Result<Self, OptimizerError> {
        let key: String = name.chars().filter(|c| *c != '_' && *c != '-').collect::<String>().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.field_name().to_lowercase() == key)
            .ok_or_else(|| OptimizerError::UnknownMetric(name.to_string()))
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            Metric::ExpectedScore => "expectedScore",
            Metric::BaseExpectedScore => "baseExpectedScore",
            Metric::MaxRoundScore => "maxRoundScore",
            Metric::AverageRoundScore => "averageRoundScore",
            Metric::CostEfficiency => "costEfficiency",
            Metric::AverageWinScore => "averageWinScore",
            Metric::AverageHeadToHeadScore => "averageHeadToHeadScore",
        }
    }

    pub fn value(&self, player: &ScoredPlayerRecord) -> f64 {
        match self {
            Metric::ExpectedScore => player.expected_score,
            Metric::BaseExpectedScore => player.base_expected_score,
            Metric::MaxRoundScore => player.player.season.max_round_score,
            Metric::AverageRoundScore => player.player.season.average_round_score,
            Metric::CostEfficiency => player.cost_efficiency,
            Metric::AverageWinScore => player.average_win_score,
            Metric::AverageHeadToHeadScore => player.average_head_to_head_score,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for Metric {
    type Err = OptimizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
