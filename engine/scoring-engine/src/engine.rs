use player_pool::{normalize_odds, PlayerRecord};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::calculator::{mean, StatsCalculator};
use crate::config::ScoringConfig;
use crate::models::{ScoredPlayerRecord, ScoringBatch, SkippedRecord};

/// Per-player values stored after the first pass, already rounded
#[derive(Debug, Clone)]
struct FirstPass {
    player: PlayerRecord,
    effective_team_odds: f64,
    next_opponent: Option<String>,
    win_probability: f64,
    average_win_score: f64,
    average_loss_score: f64,
    average_head_to_head_score: f64,
    head_to_head_sample_count: usize,
    base_expected_score: f64,
}

/// Turns player records plus team odds into scored records
///
/// Scoring is a pure function of its inputs: callers re-run [`ScoringEngine::score`]
/// whenever odds change instead of patching earlier output.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    calculator: StatsCalculator,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { calculator: StatsCalculator::new(config) }
    }

    pub fn config(&self) -> &ScoringConfig {
        self.calculator.config()
    }

    /// Score every player against the given team odds
    pub fn score(&self, players: &[PlayerRecord], team_odds: &HashMap<String, f64>) -> ScoringBatch {
        let opponent_odds = merged_odds(players, team_odds);

        let mut skipped = Vec::new();
        let mut first_pass = Vec::with_capacity(players.len());
        for player in players {
            if player.player_id.trim().is_empty() {
                warn!("Skipping player '{}' without an id", player.name);
                skipped.push(SkippedRecord {
                    player_id: player.player_id.clone(),
                    name: player.name.clone(),
                    reason: "missing player id".to_string(),
                });
                continue;
            }
            first_pass.push(self.first_pass(player, team_odds, &opponent_odds));
        }

        let counts: Vec<f64> = first_pass.iter().map(|p| p.head_to_head_sample_count as f64).collect();
        let avg_sample_size = mean(&counts);
        debug!("Average head-to-head sample size: {:.3}", avg_sample_size);

        let scored: Vec<ScoredPlayerRecord> =
            first_pass.into_iter().map(|p| self.second_pass(p, avg_sample_size)).collect();

        info!("Scored {} players ({} skipped)", scored.len(), skipped.len());

        ScoringBatch { players: scored, skipped, avg_sample_size }
    }

    /// Own odds come from the caller map, then the record itself, then the
    /// default. Opponent odds come from the merged team map.
    fn first_pass(
        &self,
        player: &PlayerRecord,
        caller_odds: &HashMap<String, f64>,
        opponent_odds: &HashMap<String, f64>,
    ) -> FirstPass {
        let calc = &self.calculator;
        let normalized = player.normalized();
        if normalized.price != player.price {
            debug!("Coerced price {} of player {} to 0", player.price, player.player_id);
        }

        let next_opponent = normalized.next_opponent().map(str::to_string);
        let team_odds = caller_odds
            .get(&normalized.team)
            .copied()
            .and_then(normalize_odds)
            .or(normalized.team_odds)
            .unwrap_or(calc.config().default_team_odds);
        let opponent_odds = next_opponent.as_ref().and_then(|o| opponent_odds.get(o).copied());

        let win_probability = calc.fair_win_probability(team_odds, opponent_odds);
        let samples = calc.collect_samples(&normalized, next_opponent.as_deref());
        let average_win = mean(&samples.wins);
        let average_loss = mean(&samples.losses);
        let base = calc.base_expected_score(win_probability, average_win, average_loss);

        FirstPass {
            effective_team_odds: team_odds,
            win_probability: calc.round_probability(win_probability),
            average_win_score: calc.round_score(average_win),
            average_loss_score: calc.round_score(average_loss),
            average_head_to_head_score: calc.round_score(mean(&samples.head_to_head)),
            head_to_head_sample_count: samples.head_to_head.len(),
            base_expected_score: calc.round_score(base),
            next_opponent,
            player: normalized,
        }
    }

    fn second_pass(&self, first: FirstPass, avg_sample_size: f64) -> ScoredPlayerRecord {
        let calc = &self.calculator;
        let weight = calc.confrontation_weight(
            first.win_probability,
            first.head_to_head_sample_count,
            avg_sample_size,
        );
        let expected_score = calc.round_score(calc.blended_score(
            weight,
            first.base_expected_score,
            first.average_head_to_head_score,
        ));
        let cost_efficiency = calc.cost_efficiency(expected_score, first.player.price);

        ScoredPlayerRecord {
            player: first.player,
            effective_team_odds: first.effective_team_odds,
            next_opponent: first.next_opponent,
            win_probability: first.win_probability,
            average_win_score: first.average_win_score,
            average_loss_score: first.average_loss_score,
            average_head_to_head_score: first.average_head_to_head_score,
            head_to_head_sample_count: first.head_to_head_sample_count,
            confrontation_weight: calc.round_probability(weight),
            base_expected_score: first.base_expected_score,
            expected_score,
            cost_efficiency,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Odds per team for the opponent lookup
///
/// Caller odds win; teams they do not mention fall back to the first odds
/// carried on one of their players' records.
fn merged_odds(players: &[PlayerRecord], team_odds: &HashMap<String, f64>) -> HashMap<String, f64> {
    let mut odds: HashMap<String, f64> = HashMap::new();
    for player in players {
        if let Some(o) = player.team_odds.and_then(normalize_odds) {
            odds.entry(player.team.clone()).or_insert(o);
        }
    }
    for (team, &o) in team_odds {
        match normalize_odds(o) {
            Some(o) => {
                odds.insert(team.clone(), o);
            }
            None => warn!("Ignoring invalid odds {} for team {}", o, team),
        }
    }
    odds
}
