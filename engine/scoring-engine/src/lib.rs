//! Scoring Engine
//!
//! Derives a fair win probability for every player from team odds, averages
//! their recent scores by outcome and against the next opponent, and blends
//! the two into an expected score. The head-to-head share is shrunk by how
//! many head-to-head samples the player has relative to the pool average.

pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod insights;
pub mod matchups;
pub mod models;


pub use calculator::StatsCalculator;
pub use config::ScoringConfig;
pub use engine::ScoringEngine;
pub use error::{Result, ScoringError};
pub use insights::{risk_adjusted_score, summarize, top_by_cost_efficiency, MetricSummary};
pub use matchups::{matchups, matchups_in_region, team_regions};
pub use models::{Matchup, ScoredPlayerRecord, ScoringBatch, SkippedRecord};
