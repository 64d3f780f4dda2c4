//! Joins market, season and detail payloads into [`PlayerRecord`]s

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::regions::RegionTable;
use crate::source::{PlayerDetail, RawBundle, SeasonPlayer};
use crate::types::{
    normalize_price, GameResult, PlayerRecord, RecentMatch, Role, SeasonStats, UpcomingMatch,
};

const UNKNOWN: &str = "Unknown";

/// A market entry that did not make it into the pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedPlayer {
    pub player_id: Option<String>,
    pub reason: String,
}

/// Result of joining a [`RawBundle`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssembledPool {
    pub players: Vec<PlayerRecord>,
    pub skipped: Vec<SkippedPlayer>,
}

impl AssembledPool {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Distinct team names in first-seen order
    pub fn teams(&self) -> Vec<&str> {
        let mut teams: Vec<&str> = Vec::new();
        for player in &self.players {
            if !teams.contains(&player.team.as_str()) {
                teams.push(&player.team);
            }
        }
        teams
    }
}

/// Build one record per market player that has a detail payload
pub fn assemble(bundle: &RawBundle, regions: &RegionTable) -> AssembledPool {
    let season_by_id: HashMap<&str, &SeasonPlayer> = bundle
        .season
        .players
        .iter()
        .filter_map(|p| p.pro_player_id.as_deref().map(|id| (id, p)))
        .collect();
    let detail_by_id: HashMap<&str, &PlayerDetail> = bundle
        .details
        .iter()
        .filter_map(|d| d.player.id.as_deref().map(|id| (id, d)))
        .collect();
    let team_names: HashMap<&str, &str> = bundle
        .market
        .teams
        .iter()
        .filter_map(|t| Some((t.id.as_deref()?, t.name.as_deref()?)))
        .collect();

    let mut pool = AssembledPool::default();

    for entry in &bundle.market.round_players {
        let Some(player_id) = entry.pro_player_id.as_deref() else {
            warn!("Skipping market entry without a player id");
            pool.skipped.push(SkippedPlayer { player_id: None, reason: "missing player id".to_string() });
            continue;
        };

        let Some(detail) = detail_by_id.get(player_id) else {
            warn!("No detail record for player {}", player_id);
            pool.skipped.push(SkippedPlayer {
                player_id: Some(player_id.to_string()),
                reason: "missing detail record".to_string(),
            });
            continue;
        };

        let raw_role = entry.role.as_deref().unwrap_or_default();
        let role: Role = match raw_role.parse() {
            Ok(role) => role,
            Err(e) => {
                warn!("Skipping player {}: {}", player_id, e);
                pool.skipped.push(SkippedPlayer { player_id: Some(player_id.to_string()), reason: e.to_string() });
                continue;
            }
        };

        let team = entry
            .team_id
            .as_deref()
            .and_then(|id| team_names.get(id).copied())
            .unwrap_or(UNKNOWN)
            .to_string();

        let name = entry
            .summoner_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(detail.player.name.as_deref())
            .unwrap_or(UNKNOWN)
            .to_string();

        let season = season_by_id.get(player_id).map(|s| season_stats(s)).unwrap_or_default();

        pool.players.push(PlayerRecord {
            player_id: player_id.to_string(),
            name,
            role,
            region: regions.classify(&team).to_string(),
            team,
            price: normalize_price(entry.price.unwrap_or(0.0)),
            team_odds: None,
            season,
            recent_matches: recent_matches(detail),
            games: games(detail),
            upcoming_matches: upcoming_matches(detail),
        });
    }

    info!("Assembled {} players ({} skipped)", pool.players.len(), pool.skipped.len());
    pool
}

fn season_stats(season: &SeasonPlayer) -> SeasonStats {
    SeasonStats {
        average_round_score: season.average_round_score.unwrap_or(0.0),
        max_round_score: season.max_round_score.unwrap_or(0.0),
        min_round_score: season.min_round_score.unwrap_or(0.0),
        last_round_score: season.last_round_score.unwrap_or(0.0),
        last_round_price: season.last_round_price.unwrap_or(0.0),
    }
}

// Entries without a match id can never be matched against a game result
fn recent_matches(detail: &PlayerDetail) -> Vec<RecentMatch> {
    detail
        .recent_matches
        .iter()
        .filter_map(|m| {
            Some(RecentMatch {
                match_id: m.match_id.clone()?,
                score: m.score.unwrap_or(0.0),
                opponent: m.opponent_team.as_ref().and_then(|t| t.name.clone()),
            })
        })
        .collect()
}

fn games(detail: &PlayerDetail) -> Vec<GameResult> {
    detail
        .games
        .iter()
        .filter_map(|g| Some(GameResult { match_id: g.match_id.clone()?, win: g.win.unwrap_or(false) }))
        .collect()
}

fn upcoming_matches(detail: &PlayerDetail) -> Vec<UpcomingMatch> {
    detail
        .upcoming_matches
        .iter()
        .map(|m| UpcomingMatch { opponent: m.opponent_team.as_ref().and_then(|t| t.name.clone()) })
        .collect()
}
