use player_pool::PlayerRecord;
use std::collections::HashMap;

use crate::config::ScoringConfig;

/// Scores bucketed from a player's recent matches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSamples {
    pub wins: Vec<f64>,
    pub losses: Vec<f64>,
    /// Scores against the next opponent, regardless of outcome
    pub head_to_head: Vec<f64>,
}

/// Per-player arithmetic used by both scoring passes
#[derive(Debug, Clone)]
pub struct StatsCalculator {
    config: ScoringConfig,
}

impl StatsCalculator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Win probability with the bookmaker margin removed
    ///
    /// With both sides priced the two implied probabilities are normalized to
    /// sum to 1. Otherwise the team's implied probability is clamped to [0, 1].
    pub fn fair_win_probability(&self, team_odds: f64, opponent_odds: Option<f64>) -> f64 {
        let p_team = 1.0 / team_odds;
        match opponent_odds {
            Some(opponent_odds) => {
                let p_opponent = 1.0 / opponent_odds;
                p_team / (p_team + p_opponent)
            }
            None => p_team.clamp(0.0, 1.0),
        }
    }

    /// Split recent scores into win/loss/head-to-head buckets
    ///
    /// Matches without a known result are dropped from every bucket.
    pub fn collect_samples(&self, player: &PlayerRecord, next_opponent: Option<&str>) -> MatchSamples {
        let next_opponent = next_opponent.filter(|name| !name.trim().is_empty());
        let results: HashMap<&str, bool> =
            player.games.iter().map(|g| (g.match_id.as_str(), g.win)).collect();

        let mut samples = MatchSamples::default();
        for recent in &player.recent_matches {
            let Some(&won) = results.get(recent.match_id.as_str()) else {
                continue;
            };
            if won {
                samples.wins.push(recent.score);
            } else {
                samples.losses.push(recent.score);
            }
            if next_opponent.is_some() && recent.opponent.as_deref() == next_opponent {
                samples.head_to_head.push(recent.score);
            }
        }
        samples
    }

    pub fn base_expected_score(&self, win_probability: f64, average_win: f64, average_loss: f64) -> f64 {
        win_probability * average_win + (1.0 - win_probability) * average_loss
    }

    /// Shrinkage weight for the head-to-head average
    ///
    /// Small samples relative to the pool average pull the weight toward 0.
    pub fn confrontation_weight(&self, win_probability: f64, sample_count: usize, avg_sample_size: f64) -> f64 {
        let n = sample_count as f64;
        if n + avg_sample_size > 0.0 {
            win_probability * (n / (n + avg_sample_size))
        } else {
            0.0
        }
    }

    pub fn blended_score(&self, weight: f64, base_expected: f64, head_to_head: f64) -> f64 {
        (1.0 - weight) * base_expected + weight * head_to_head
    }

    pub fn cost_efficiency(&self, expected_score: f64, price: f64) -> f64 {
        if price > 0.0 {
            self.round_efficiency(expected_score / price)
        } else {
            0.0
        }
    }

    pub fn round_score(&self, value: f64) -> f64 {
        round_to(value, self.config.score_decimals)
    }

    pub fn round_probability(&self, value: f64) -> f64 {
        round_to(value, self.config.probability_decimals)
    }

    pub fn round_efficiency(&self, value: f64) -> f64 {
        round_to(value, self.config.efficiency_decimals)
    }
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
