//! End-to-end optimizer scenarios

use player_pool::{PlayerRecord, Role, SeasonStats};
use proptest::prelude::*;
use scoring_engine::{ScoredPlayerRecord, ScoringEngine};
use std::collections::HashMap;

use crate::{Metric, OptimizationStatus, OptimizerConfig, TeamOptimizer};

/// (id, role, price, expected score)
type Entry<'a> = (&'a str, Role, f64, f64);

fn pool(entries: &[Entry]) -> Vec<ScoredPlayerRecord> {
    let records: Vec<PlayerRecord> = entries
        .iter()
        .map(|&(id, role, price, _)| PlayerRecord::new(id, format!("Player {id}"), role, "LOUD", price))
        .collect();
    let mut players = ScoringEngine::default().score(&records, &HashMap::new()).players;
    for (p, &(_, _, _, score)) in players.iter_mut().zip(entries) {
        p.expected_score = score;
    }
    players
}

fn two_top_pool() -> Vec<ScoredPlayerRecord> {
    pool(&[
        ("top-cheap", Role::Top, 5.0, 8.0),
        ("top-star", Role::Top, 10.0, 15.0),
        ("jungle", Role::Jungle, 3.0, 5.0),
        ("mid", Role::Mid, 4.0, 6.0),
        ("bottom", Role::Bottom, 2.0, 4.0),
        ("support", Role::Support, 2.0, 3.0),
    ])
}

#[test]
fn test_budget_forces_cheaper_top() {
    let result = TeamOptimizer::default().optimize(&two_top_pool(), Metric::ExpectedScore, 20.0);

    assert_eq!(result.status, OptimizationStatus::Optimal);
    assert_eq!(result.assemblies.len(), 1);
    let best = result.best().unwrap();
    assert_eq!(best.member(Role::Top).unwrap().player_id(), "top-cheap");
    assert_eq!(best.total_cost, 16.0);
    assert_eq!(best.total_score, 26.0);
    assert_eq!(best.efficiency, 26.0 / 16.0);
}

#[test]
fn test_larger_budget_prefers_higher_score() {
    let result = TeamOptimizer::default().optimize(&two_top_pool(), Metric::ExpectedScore, 21.0);

    assert_eq!(result.assemblies.len(), 2);
    assert_eq!(result.assemblies[0].member(Role::Top).unwrap().player_id(), "top-star");
    assert_eq!(result.assemblies[0].total_score, 33.0);
    assert_eq!(result.assemblies[1].member(Role::Top).unwrap().player_id(), "top-cheap");
}

#[test]
fn test_missing_role_yields_no_team() {
    let players: Vec<ScoredPlayerRecord> =
        two_top_pool().into_iter().filter(|p| p.role() != Role::Support).collect();
    for budget in [0.0, 20.0, 1_000.0] {
        let result = TeamOptimizer::default().optimize(&players, Metric::ExpectedScore, budget);
        assert!(result.is_empty());
        assert_eq!(result.status, OptimizationStatus::MissingRole { role: Role::Support });
    }
}

#[test]
fn test_budget_below_cheapest_team() {
    let result = TeamOptimizer::default().optimize(&two_top_pool(), Metric::ExpectedScore, 15.0);
    assert!(result.is_empty());
    assert_eq!(result.status, OptimizationStatus::OverBudget { cheapest_cost: 16.0 });
}

#[test]
fn test_budget_at_cheapest_team_cost() {
    let result = TeamOptimizer::default().optimize(&two_top_pool(), Metric::ExpectedScore, 16.0);
    assert_eq!(result.status, OptimizationStatus::Optimal);
    assert_eq!(result.assemblies.len(), 1);
    assert_eq!(
        result.best().unwrap().player_ids(),
        vec!["top-cheap", "jungle", "mid", "bottom", "support"]
    );
}

#[test]
fn test_results_are_capped_and_sorted() {
    let mut entries: Vec<(String, Role, f64, f64)> = Vec::new();
    for role in Role::ALL {
        for i in 0..3 {
            entries.push((format!("{role}-{i}"), role, 1.0 + i as f64, 10.0 + i as f64));
        }
    }
    let borrowed: Vec<Entry> = entries.iter().map(|(id, r, p, s)| (id.as_str(), *r, *p, *s)).collect();
    let players = pool(&borrowed);

    let optimizer = TeamOptimizer::new(OptimizerConfig { shortlist_size: 5, max_results: 4 }).unwrap();
    let result = optimizer.optimize(&players, Metric::ExpectedScore, 1_000.0);

    assert_eq!(result.assemblies.len(), 4);
    assert_eq!(result.assemblies[0].total_score, 60.0);
    for pair in result.assemblies.windows(2) {
        assert!(pair[0].total_score >= pair[1].total_score);
    }
}

#[test]
fn test_shortlist_bounds_the_search() {
    // a shortlist of 1 keeps only the best and the cheapest topper
    let mut entries: Vec<Entry> = vec![
        ("t-best", Role::Top, 50.0, 30.0),
        ("t-mid", Role::Top, 8.0, 20.0),
        ("t-cheap", Role::Top, 1.0, 1.0),
    ];
    entries.extend([
        ("j", Role::Jungle, 1.0, 1.0),
        ("m", Role::Mid, 1.0, 1.0),
        ("b", Role::Bottom, 1.0, 1.0),
        ("s", Role::Support, 1.0, 1.0),
    ]);
    let players = pool(&entries);
    let optimizer = TeamOptimizer::new(OptimizerConfig { shortlist_size: 1, max_results: 5 }).unwrap();
    let result = optimizer.optimize(&players, Metric::ExpectedScore, 20.0);

    // t-mid would fit the budget but never made the shortlist
    assert_eq!(result.assemblies.len(), 1);
    assert_eq!(result.best().unwrap().member(Role::Top).unwrap().player_id(), "t-cheap");
}

#[test]
fn test_named_assemblies() {
    let mut players = two_top_pool();
    // the cheap topper has the higher ceiling
    players[0].player.season = SeasonStats { max_round_score: 40.0, ..Default::default() };
    players[1].player.season = SeasonStats { max_round_score: 20.0, ..Default::default() };

    let named = TeamOptimizer::default().optimize_named(&players, 100.0);
    assert_eq!(named.len(), 2);
    assert_eq!(named[0].label, "Highest expected score");
    assert_eq!(named[0].result.metric, Metric::ExpectedScore);
    assert_eq!(named[0].result.best().unwrap().member(Role::Top).unwrap().player_id(), "top-star");
    assert_eq!(named[1].label, "Highest ceiling");
    assert_eq!(named[1].result.best().unwrap().member(Role::Top).unwrap().player_id(), "top-cheap");
    assert_eq!(named[1].result.best().unwrap().total_score, 40.0);
}

#[test]
fn test_regional_assemblies() {
    let mut players = two_top_pool();
    for p in &mut players {
        p.player.region = "South".to_string();
    }
    let mut north = players.clone();
    for p in &mut north {
        p.player.region = "North".to_string();
        p.player.player_id = format!("n-{}", p.player.player_id);
    }
    north.retain(|p| p.role() != Role::Mid);
    players.extend(north);

    let regional =
        TeamOptimizer::default().optimize_by_region(&players, Metric::ExpectedScore, 30.0, &["South", "North", "East"]);
    assert_eq!(regional.len(), 2);
    assert_eq!(regional[0].region, "South");
    assert_eq!(regional[0].result.status, OptimizationStatus::Optimal);
    assert!(regional[0].result.best().unwrap().members.iter().all(|p| p.region() == "South"));
    assert_eq!(regional[1].region, "North");
    assert_eq!(regional[1].result.status, OptimizationStatus::MissingRole { role: Role::Mid });
}

#[test]
fn test_status_serializes_with_kind_tag() {
    let result = TeamOptimizer::default().optimize(&two_top_pool(), Metric::ExpectedScore, 15.0);
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["status"], serde_json::json!({"kind": "over_budget", "cheapest_cost": 16.0}));
    assert_eq!(value["assemblies"], serde_json::json!([]));

    let missing = OptimizationStatus::MissingRole { role: Role::Jungle };
    assert_eq!(serde_json::to_value(&missing).unwrap(), serde_json::json!({"kind": "missing_role", "role": "jungle"}));
}

fn arb_pool() -> impl Strategy<Value = Vec<ScoredPlayerRecord>> {
    prop::collection::vec((0usize..5, 0.0f64..15.0, 0.0f64..40.0), 5..25).prop_map(|raw| {
        // guarantee every role at least once
        let ids: Vec<String> = (0..raw.len()).map(|i| format!("p{i}")).collect();
        let entries: Vec<Entry> = raw
            .iter()
            .enumerate()
            .map(|(i, &(role, price, score))| {
                let role = if i < 5 { Role::ALL[i] } else { Role::ALL[role] };
                (ids[i].as_str(), role, price, score)
            })
            .collect();
        pool(&entries)
    })
}

proptest! {
    #[test]
    fn prop_more_budget_never_hurts(players in arb_pool(), low in 0.0f64..60.0, extra in 0.0f64..40.0) {
        let optimizer = TeamOptimizer::default();
        let tight = optimizer.optimize(&players, Metric::ExpectedScore, low);
        let loose = optimizer.optimize(&players, Metric::ExpectedScore, low + extra);

        if let Some(best) = tight.best() {
            let looser_best = loose.best();
            prop_assert!(looser_best.is_some());
            prop_assert!(looser_best.unwrap().total_score >= best.total_score);
        }
    }

    #[test]
    fn prop_assemblies_respect_budget_and_roles(players in arb_pool(), budget in 0.0f64..80.0) {
        let result = TeamOptimizer::default().optimize(&players, Metric::ExpectedScore, budget);
        for team in &result.assemblies {
            prop_assert!(team.total_cost <= budget);
            let roles: Vec<Role> = team.members.iter().map(|p| p.role()).collect();
            prop_assert_eq!(roles, Role::ALL.to_vec());
        }
        if result.is_empty() {
            let is_over_budget = matches!(result.status, OptimizationStatus::OverBudget { .. });
            prop_assert!(is_over_budget);
        }
    }
}
