//! Descriptive statistics over a scored pool

use serde::{Deserialize, Serialize};

use crate::calculator::mean;
use crate::models::ScoredPlayerRecord;

const RISK_EPSILON: f64 = 1e-6;

/// Expected score per point of typical losing-game output
pub fn risk_adjusted_score(player: &ScoredPlayerRecord) -> f64 {
    player.expected_score / (player.average_loss_score + RISK_EPSILON)
}

/// Best value-for-money players, stable on ties
pub fn top_by_cost_efficiency(players: &[ScoredPlayerRecord], limit: usize) -> Vec<&ScoredPlayerRecord> {
    let mut ranked: Vec<&ScoredPlayerRecord> = players.iter().collect();
    ranked.sort_by(|a, b| b.cost_efficiency.total_cmp(&a.cost_efficiency));
    ranked.truncate(limit);
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub metric: String,
    pub mean: f64,
    /// Sample standard deviation, 0 with fewer than two players
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricSummary {
    fn from_values(metric: &str, values: &[f64]) -> Self {
        let avg = mean(values);
        let std_dev = if values.len() > 1 {
            let var = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
            var.sqrt()
        } else {
            0.0
        };
        Self {
            metric: metric.to_string(),
            mean: avg,
            std_dev,
            min: values.iter().copied().reduce(f64::min).unwrap_or(0.0),
            max: values.iter().copied().reduce(f64::max).unwrap_or(0.0),
        }
    }
}

/// Summaries of the headline metrics
pub fn summarize(players: &[ScoredPlayerRecord]) -> Vec<MetricSummary> {
    let extractors: [(&str, fn(&ScoredPlayerRecord) -> f64); 5] = [
        ("expected_score", |p| p.expected_score),
        ("average_win_score", |p| p.average_win_score),
        ("average_loss_score", |p| p.average_loss_score),
        ("average_head_to_head_score", |p| p.average_head_to_head_score),
        ("risk_adjusted_score", risk_adjusted_score),
    ];

    extractors
        .iter()
        .map(|(name, extract)| {
            let values: Vec<f64> = players.iter().map(extract).collect();
            MetricSummary::from_values(name, &values)
        })
        .collect()
}
