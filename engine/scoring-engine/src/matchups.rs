use std::collections::{BTreeSet, HashMap};

use crate::models::{Matchup, ScoredPlayerRecord};

/// Distinct pairings of the next round, sorted by team name
///
/// Each team's opponent comes from the first of its players that has one.
pub fn matchups(players: &[ScoredPlayerRecord]) -> Vec<Matchup> {
    let mut opponent_by_team: HashMap<&str, &str> = HashMap::new();
    for player in players {
        if let Some(opponent) = player.next_opponent.as_deref() {
            opponent_by_team.entry(player.team()).or_insert(opponent);
        }
    }

    opponent_by_team
        .into_iter()
        .map(|(team, opponent)| Matchup::new(team, opponent))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Region of each team, from its first player
pub fn team_regions(players: &[ScoredPlayerRecord]) -> HashMap<&str, &str> {
    let mut regions = HashMap::new();
    for player in players {
        regions.entry(player.team()).or_insert(player.region());
    }
    regions
}

/// Matchups with at least one side in `region`
pub fn matchups_in_region<'a>(
    matchups: &'a [Matchup],
    regions: &HashMap<&str, &str>,
    region: &str,
) -> Vec<&'a Matchup> {
    matchups
        .iter()
        .filter(|m| {
            regions.get(m.first.as_str()) == Some(&region) || regions.get(m.second.as_str()) == Some(&region)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ScoringEngine;
    use player_pool::{PlayerRecord, Role, UpcomingMatch};

    fn scored() -> Vec<ScoredPlayerRecord> {
        let mut records = Vec::new();
        for (id, team, region, opponent) in [
            ("1", "LOUD", "South", None),
            ("2", "LOUD", "South", Some("paiN")),
            ("3", "paiN", "South", Some("LOUD")),
            ("4", "Cloud9", "North", Some("FlyQuest")),
            ("5", "Shopify", "North", None),
        ] {
            let mut p = PlayerRecord::new(id, id, Role::Top, team, 5.0);
            p.region = region.to_string();
            p.upcoming_matches = vec![UpcomingMatch { opponent: opponent.map(str::to_string) }];
            records.push(p);
        }
        ScoringEngine::default().score(&records, &HashMap::new()).players
    }

    #[test]
    fn test_matchups_are_deduplicated() {
        let list = matchups(&scored());
        assert_eq!(list, vec![Matchup::new("Cloud9", "FlyQuest"), Matchup::new("LOUD", "paiN")]);
        assert!(list[1].involves("paiN"));
    }

    #[test]
    fn test_matchups_by_region() {
        let players = scored();
        let list = matchups(&players);
        let regions = team_regions(&players);
        let south = matchups_in_region(&list, &regions, "South");
        assert_eq!(south, vec![&Matchup::new("LOUD", "paiN")]);
        let north = matchups_in_region(&list, &regions, "North");
        assert_eq!(north, vec![&Matchup::new("Cloud9", "FlyQuest")]);
    }
}
