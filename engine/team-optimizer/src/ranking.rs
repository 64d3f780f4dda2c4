use player_pool::Role;
use scoring_engine::ScoredPlayerRecord;
use std::collections::BTreeMap;

use crate::metric::Metric;
use crate::optimizer::rank_by;

/// Best `limit` players of every role by the metric
///
/// Roles come out in lineup order; roles nobody plays map to an empty list.
pub fn top_by_role(
    players: &[ScoredPlayerRecord],
    metric: Metric,
    limit: usize,
) -> BTreeMap<Role, Vec<&ScoredPlayerRecord>> {
    Role::ALL
        .into_iter()
        .map(|role| {
            let bucket: Vec<&ScoredPlayerRecord> = players.iter().filter(|p| p.role() == role).collect();
            let mut ranked = rank_by(&bucket, metric);
            ranked.truncate(limit);
            (role, ranked)
        })
        .collect()
}
