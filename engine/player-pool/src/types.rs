use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PoolError;

/// Odds assumed for a team when nothing better is known
pub const DEFAULT_TEAM_ODDS: f64 = 2.0;

/// One of the five lineup slots a player can occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bottom,
    Support,
}

impl Role {
    /// All roles in lineup order
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Bottom, Role::Support];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "top",
            Role::Jungle => "jungle",
            Role::Mid => "mid",
            Role::Bottom => "bottom",
            Role::Support => "support",
        }
    }

    /// Position of the role within [`Role::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Role::Top => 0,
            Role::Jungle => 1,
            Role::Mid => 2,
            Role::Bottom => 3,
            Role::Support => 4,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Role::Top),
            "jungle" => Ok(Role::Jungle),
            "mid" => Ok(Role::Mid),
            "bottom" => Ok(Role::Bottom),
            "support" => Ok(Role::Support),
            other => Err(PoolError::UnknownRole(other.to_string())),
        }
    }
}

/// A recent match played by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentMatch {
    pub match_id: String,
    pub score: f64,
    /// Name of the team the player faced
    pub opponent: Option<String>,
}

/// Outcome of a game, keyed by match id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub match_id: String,
    pub win: bool,
}

/// A scheduled match. Only the first one decides the next opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingMatch {
    pub opponent: Option<String>,
}

/// Season aggregates published by the fantasy league
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub average_round_score: f64,
    /// Peak historical round score
    pub max_round_score: f64,
    pub min_round_score: f64,
    pub last_round_score: f64,
    pub last_round_price: f64,
}

/// A player as handed over by the data-acquisition side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_id: String,
    pub name: String,
    pub role: Role,
    pub team: String,
    pub region: String,
    pub price: f64,
    /// Win odds for the player's team, if the source published any
    pub team_odds: Option<f64>,
    pub season: SeasonStats,
    pub recent_matches: Vec<RecentMatch>,
    pub games: Vec<GameResult>,
    pub upcoming_matches: Vec<UpcomingMatch>,
}

impl PlayerRecord {
    /// Create a record with no match history
    pub fn new(player_id: impl Into<String>, name: impl Into<String>, role: Role, team: impl Into<String>, price: f64) -> Self {
        Self {
            player_id: player_id.into(),
            name: name.into(),
            role,
            team: team.into(),
            region: String::new(),
            price,
            team_odds: None,
            season: SeasonStats::default(),
            recent_matches: Vec::new(),
            games: Vec::new(),
            upcoming_matches: Vec::new(),
        }
    }

    /// Name of the next opponent, taken from the first upcoming match
    ///
    /// A blank name counts as no opponent.
    pub fn next_opponent(&self) -> Option<&str> {
        self.upcoming_matches
            .first()
            .and_then(|m| m.opponent.as_deref())
            .filter(|name| !name.trim().is_empty())
    }

    /// Copy of the record with price and odds brought into their valid ranges
    pub fn normalized(&self) -> Self {
        let mut record = self.clone();
        record.price = normalize_price(self.price);
        record.team_odds = self.team_odds.and_then(normalize_odds);
        record
    }
}

/// Negative and non-finite prices become 0
pub fn normalize_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

/// Odds must be positive and finite to be usable
pub fn normalize_odds(odds: f64) -> Option<f64> {
    if odds.is_finite() && odds > 0.0 {
        Some(odds)
    } else {
        None
    }
}

/// Accept ids published either as JSON numbers or strings
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| id_to_string(&v)))
}

pub(crate) fn id_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
