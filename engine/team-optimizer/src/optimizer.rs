use player_pool::Role;
use scoring_engine::ScoredPlayerRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::assembly::TeamAssembly;
use crate::config::OptimizerConfig;
use crate::error::Result;
use crate::metric::Metric;

const ROLE_COUNT: usize = Role::ALL.len();

/// Why a search returned what it returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptimizationStatus {
    /// Best feasible combinations of the shortlists
    Optimal,
    /// No shortlisted combination fit, the all-cheapest team was returned instead
    CheapestFallback,
    /// Nobody plays this role, no team can be fielded
    MissingRole { role: Role },
    /// Even the cheapest possible team costs more than the budget
    OverBudget { cheapest_cost: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub metric: Metric,
    pub budget: f64,
    pub status: OptimizationStatus,
    /// Best first
    pub assemblies: Vec<TeamAssembly>,
}

impl OptimizationResult {
    fn empty(metric: Metric, budget: f64, status: OptimizationStatus) -> Self {
        Self { metric, budget, status, assemblies: Vec::new() }
    }

    pub fn best(&self) -> Option<&TeamAssembly> {
        self.assemblies.first()
    }

    pub fn is_empty(&self) -> bool {
        self.assemblies.is_empty()
    }
}

/// Result of one of the fixed named searches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedAssemblies {
    pub label: String,
    pub result: OptimizationResult,
}

/// Result of a search restricted to one region's players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalAssemblies {
    pub region: String,
    pub result: OptimizationResult,
}

/// A combination that fits the budget
struct Candidate {
    picks: [usize; ROLE_COUNT],
    value: f64,
}

/// Budget-constrained search over per-role shortlists
///
/// Each role contributes its top `shortlist_size` players by the metric plus
/// its cheapest player, and every combination of those is tried. This is an
/// approximation: a within-budget team built from players outside the
/// shortlists is never seen.
#[derive(Debug, Clone)]
pub struct TeamOptimizer {
    config: OptimizerConfig,
}

impl TeamOptimizer {
    pub fn new(config: OptimizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Up to `max_results` teams within `budget`, best total metric first
    pub fn optimize(&self, players: &[ScoredPlayerRecord], metric: Metric, budget: f64) -> OptimizationResult {
        let buckets = partition_by_role(players);
        if let Some(role) = Role::ALL.into_iter().find(|r| buckets[r.index()].is_empty()) {
            info!("No {} candidates, cannot build a team", role);
            return OptimizationResult::empty(metric, budget, OptimizationStatus::MissingRole { role });
        }

        let shortlists: Vec<Vec<&ScoredPlayerRecord>> =
            buckets.iter().map(|bucket| self.shortlist(bucket, metric)).collect();
        let cheapest: Vec<&ScoredPlayerRecord> =
            buckets.iter().filter_map(|bucket| cheapest_of(bucket)).collect();
        for (role, list) in Role::ALL.iter().zip(&shortlists) {
            debug!("Shortlisted {} {} candidates", list.len(), role);
        }

        let mut feasible = feasible_combinations(&shortlists, metric, budget);
        if !feasible.is_empty() {
            feasible.sort_by(|a, b| b.value.total_cmp(&a.value));
            feasible.truncate(self.config.max_results);

            let assemblies: Vec<TeamAssembly> = feasible
                .iter()
                .map(|c| {
                    let members = c.picks.iter().enumerate().map(|(r, &i)| shortlists[r][i].clone()).collect();
                    TeamAssembly::from_members(metric, members)
                })
                .collect();
            info!(
                "Found {} teams for {} within budget {:.2}, best {:.2}",
                assemblies.len(),
                metric,
                budget,
                assemblies[0].total_score
            );
            return OptimizationResult { metric, budget, status: OptimizationStatus::Optimal, assemblies };
        }

        let cheapest_cost: f64 = cheapest.iter().map(|p| p.price()).sum();
        // NaN budgets count as over budget
        if !(budget >= cheapest_cost) {
            info!("Budget {:.2} is below the cheapest team cost {:.2}", budget, cheapest_cost);
            return OptimizationResult::empty(metric, budget, OptimizationStatus::OverBudget { cheapest_cost });
        }

        info!("No shortlisted team fits budget {:.2}, falling back to the cheapest team", budget);
        let members = cheapest.into_iter().cloned().collect();
        OptimizationResult {
            metric,
            budget,
            status: OptimizationStatus::CheapestFallback,
            assemblies: vec![TeamAssembly::from_members(metric, members)],
        }
    }

    /// Best teams by expected score and by peak historical score
    pub fn optimize_named(&self, players: &[ScoredPlayerRecord], budget: f64) -> Vec<NamedAssemblies> {
        [("Highest expected score", Metric::ExpectedScore), ("Highest ceiling", Metric::MaxRoundScore)]
            .into_iter()
            .map(|(label, metric)| NamedAssemblies {
                label: label.to_string(),
                result: self.optimize(players, metric, budget),
            })
            .collect()
    }

    /// One search per region, skipping regions without players
    pub fn optimize_by_region(
        &self,
        players: &[ScoredPlayerRecord],
        metric: Metric,
        budget: f64,
        regions: &[&str],
    ) -> Vec<RegionalAssemblies> {
        regions
            .iter()
            .filter_map(|&region| {
                let subset: Vec<ScoredPlayerRecord> =
                    players.iter().filter(|p| p.region() == region).cloned().collect();
                if subset.is_empty() {
                    debug!("Region {} has no players", region);
                    return None;
                }
                Some(RegionalAssemblies {
                    region: region.to_string(),
                    result: self.optimize(&subset, metric, budget),
                })
            })
            .collect()
    }

    /// Top players by the metric plus the cheapest one, without repeats
    fn shortlist<'a>(&self, bucket: &[&'a ScoredPlayerRecord], metric: Metric) -> Vec<&'a ScoredPlayerRecord> {
        let mut list = rank_by(bucket, metric);
        list.truncate(self.config.shortlist_size);
        if let Some(cheapest) = cheapest_of(bucket) {
            list.push(cheapest);
        }

        let mut seen = HashSet::new();
        list.retain(|p| seen.insert(p.player_id().to_string()));
        list
    }
}

impl Default for TeamOptimizer {
    fn default() -> Self {
        Self { config: OptimizerConfig::default() }
    }
}

fn partition_by_role(players: &[ScoredPlayerRecord]) -> [Vec<&ScoredPlayerRecord>; ROLE_COUNT] {
    let mut buckets: [Vec<&ScoredPlayerRecord>; ROLE_COUNT] = Default::default();
    for player in players {
        buckets[player.role().index()].push(player);
    }
    buckets
}

/// Descending by metric, ties keep their input order
pub(crate) fn rank_by<'a>(players: &[&'a ScoredPlayerRecord], metric: Metric) -> Vec<&'a ScoredPlayerRecord> {
    let mut ranked = players.to_vec();
    ranked.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
    ranked
}

/// First player with the lowest price
fn cheapest_of<'a>(players: &[&'a ScoredPlayerRecord]) -> Option<&'a ScoredPlayerRecord> {
    players.iter().copied().min_by(|a, b| a.price().total_cmp(&b.price()))
}

/// Every in-budget pick of one player per shortlist, in enumeration order
/// (last role varies fastest)
fn feasible_combinations(shortlists: &[Vec<&ScoredPlayerRecord>], metric: Metric, budget: f64) -> Vec<Candidate> {
    let mut feasible = Vec::new();
    if shortlists.len() != ROLE_COUNT || shortlists.iter().any(|l| l.is_empty()) {
        return feasible;
    }

    let mut picks = [0usize; ROLE_COUNT];
    loop {
        let mut cost = 0.0;
        let mut value = 0.0;
        for (r, &i) in picks.iter().enumerate() {
            cost += shortlists[r][i].price();
            value += metric.value(shortlists[r][i]);
        }
        if cost <= budget {
            feasible.push(Candidate { picks, value });
        }

        // advance the odometer
        let mut r = ROLE_COUNT;
        loop {
            if r == 0 {
                return feasible;
            }
            r -= 1;
            picks[r] += 1;
            if picks[r] < shortlists[r].len() {
                break;
            }
            picks[r] = 0;
        }
    }
}
