use player_pool::{PlayerRecord, Role};
use serde::{Deserialize, Serialize};

/// A player enriched with win probability and expected score
///
/// Built once per scoring pass and never updated in place; new odds mean a
/// new pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPlayerRecord {
    #[serde(flatten)]
    pub player: PlayerRecord,

    /// Odds actually used for the player's team
    pub effective_team_odds: f64,

    pub next_opponent: Option<String>,

    /// Fair probability of the player's team winning, in [0, 1]
    pub win_probability: f64,

    pub average_win_score: f64,
    pub average_loss_score: f64,

    /// Mean score against `next_opponent`
    pub average_head_to_head_score: f64,
    pub head_to_head_sample_count: usize,

    /// Share of the expected score taken from the head-to-head average, in [0, 1]
    pub confrontation_weight: f64,

    pub base_expected_score: f64,
    pub expected_score: f64,

    /// expected_score / price, 0 for free players
    pub cost_efficiency: f64,
}

impl ScoredPlayerRecord {
    pub fn player_id(&self) -> &str {
        &self.player.player_id
    }

    pub fn name(&self) -> &str {
        &self.player.name
    }

    pub fn role(&self) -> Role {
        self.player.role
    }

    pub fn team(&self) -> &str {
        &self.player.team
    }

    pub fn region(&self) -> &str {
        &self.player.region
    }

    pub fn price(&self) -> f64 {
        self.player.price
    }
}

/// Why a record was left out of a scoring pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub player_id: String,
    pub name: String,
    pub reason: String,
}

/// Output of one scoring pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringBatch {
    pub players: Vec<ScoredPlayerRecord>,
    pub skipped: Vec<SkippedRecord>,
    /// Mean head-to-head sample count across the scored players
    pub avg_sample_size: f64,
}

impl ScoringBatch {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ScoredPlayerRecord> {
        self.players.iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

/// Two teams meeting in the next round, names in sorted order
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Matchup {
    pub first: String,
    pub second: String,
}

impl Matchup {
    pub fn new(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self { first: first.to_string(), second: second.to_string() }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.first == team || self.second == team
    }
}
