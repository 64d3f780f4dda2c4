use player_pool::Role;
use scoring_engine::ScoredPlayerRecord;
use serde::{Deserialize, Serialize};

use crate::error::{OptimizerError, Result};
use crate::metric::Metric;

/// One complete team, a player per role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAssembly {
    pub metric: Metric,
    /// Members in role order: top, jungle, mid, bottom, support
    pub members: Vec<ScoredPlayerRecord>,
    pub total_cost: f64,
    /// Sum of `metric` over the members
    pub total_score: f64,
    /// total_score / total_cost, 0 for a free team
    pub efficiency: f64,
}

impl TeamAssembly {
    /// Build from members already in role order
    pub(crate) fn from_members(metric: Metric, members: Vec<ScoredPlayerRecord>) -> Self {
        let total_cost: f64 = members.iter().map(|p| p.price()).sum();
        let total_score: f64 = members.iter().map(|p| metric.value(p)).sum();
        let efficiency = if total_cost > 0.0 { total_score / total_cost } else { 0.0 };
        Self { metric, members, total_cost, total_score, efficiency }
    }

    pub fn member(&self, role: Role) -> Option<&ScoredPlayerRecord> {
        self.members.iter().find(|p| p.role() == role)
    }

    pub fn player_ids(&self) -> Vec<&str> {
        self.members.iter().map(|p| p.player_id()).collect()
    }

    /// Sum of expected scores, whatever metric the team was built for
    pub fn total_expected_score(&self) -> f64 {
        self.members.iter().map(|p| p.expected_score).sum()
    }
}

/// Evaluate a hand-picked team
///
/// The picks may come in any order but must cover every role exactly once.
pub fn evaluate_custom(picks: &[&ScoredPlayerRecord], metric: Metric) -> Result<TeamAssembly> {
    let mut slots: [Option<&ScoredPlayerRecord>; 5] = [None; 5];
    for pick in picks {
        let slot = &mut slots[pick.role().index()];
        if slot.is_some() {
            return Err(OptimizerError::DuplicateRole(pick.role()));
        }
        *slot = Some(*pick);
    }

    let mut members = Vec::with_capacity(Role::ALL.len());
    for role in Role::ALL {
        match slots[role.index()] {
            Some(player) => members.push(player.clone()),
            None => return Err(OptimizerError::IncompleteTeam { missing: role }),
        }
    }

    Ok(TeamAssembly::from_members(metric, members))
}
