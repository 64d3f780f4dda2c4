//! Plain-text rendering of engine results

use scoring_engine::{risk_adjusted_score, MetricSummary, ScoredPlayerRecord};
use team_optimizer::{Metric, OptimizationResult, OptimizationStatus, TeamAssembly};

/// Shown instead of any report when the cache produced no players
pub const NO_DATA: &str = "no player data loaded";

pub fn player_header() -> String {
    format!(
        "{:<8} {:<18} {:<16} {:>6} {:>6} {:>8} {:>7}",
        "role", "name", "team", "price", "win%", "expected", "eff"
    )
}

pub fn player_line(player: &ScoredPlayerRecord) -> String {
    format!(
        "{:<8} {:<18} {:<16} {:>6.2} {:>6.1} {:>8.2} {:>7.3}",
        player.role().as_str(),
        player.name(),
        player.team(),
        player.price(),
        player.win_probability * 100.0,
        player.expected_score,
        player.cost_efficiency
    )
}

/// One line per member, then the totals
pub fn assembly_lines(team: &TeamAssembly) -> Vec<String> {
    let mut lines: Vec<String> = team
        .members
        .iter()
        .map(|p| {
            format!(
                "  {:<8} {:<18} {:<16} {:>6.2} {:>8.2}",
                p.role().as_str(),
                p.name(),
                p.team(),
                p.price(),
                team.metric.value(p)
            )
        })
        .collect();
    let mut totals = format!(
        "  total cost {:.2}, total {} {:.2}, efficiency {:.3}",
        team.total_cost,
        team.metric.field_name(),
        team.total_score,
        team.efficiency
    );
    if team.metric != Metric::ExpectedScore {
        totals.push_str(&format!(", expected {:.2}", team.total_expected_score()));
    }
    lines.push(totals);
    lines
}

/// Why the result holds what it holds
pub fn status_line(result: &OptimizationResult) -> String {
    match &result.status {
        OptimizationStatus::Optimal => {
            format!("{} team(s) within budget {:.2}", result.assemblies.len(), result.budget)
        }
        OptimizationStatus::CheapestFallback => {
            format!("no shortlisted team fits budget {:.2}, showing the cheapest team", result.budget)
        }
        OptimizationStatus::MissingRole { role } => format!("no {} players available, no team possible", role),
        OptimizationStatus::OverBudget { cheapest_cost } => format!(
            "budget {:.2} is below the cheapest possible team ({:.2})",
            result.budget, cheapest_cost
        ),
    }
}

pub fn summary_line(summary: &MetricSummary) -> String {
    format!(
        "{:<28} mean {:>7.2}  std {:>6.2}  min {:>7.2}  max {:>7.2}",
        summary.metric, summary.mean, summary.std_dev, summary.min, summary.max
    )
}

pub fn value_line(player: &ScoredPlayerRecord) -> String {
    format!(
        "{:<18} {:<8} {:>6.2} eff {:>7.3} risk-adjusted {:>7.2}",
        player.name(),
        player.role().as_str(),
        player.price(),
        player.cost_efficiency,
        risk_adjusted_score(player)
    )
}
