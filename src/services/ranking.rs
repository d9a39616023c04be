use crate::domain::{RankingEntry, RankingResult, RatedUser};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

/// Orders users best first and assigns 1-indexed ranks.
///
/// Sort keys, each breaking ties in the previous one: higher `bpr`, more
/// competitions, higher weighted average, then id ascending. Ids are unique,
/// so the order is total and independent of input order.
pub fn rank_users(users: &[RatedUser]) -> Vec<RankingEntry> {
    let mut ordered: Vec<&RatedUser> = users.iter().collect();
    ordered.sort_by(|a, b| compare_rated(a, b));

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, user)| RankingEntry {
            id: user.id.clone(),
            bpr: user.rating.bpr,
            competitions_count: user.rating.competitions_count,
            is_provisional: user.rating.is_provisional,
            weighted_average: user.rating.weighted_average,
            rank: index + 1,
        })
        .collect()
}

fn compare_rated(a: &RatedUser, b: &RatedUser) -> Ordering {
    b.rating
        .bpr
        .total_cmp(&a.rating.bpr)
        .then_with(|| {
            b.rating
                .competitions_count
                .cmp(&a.rating.competitions_count)
        })
        .then_with(|| {
            b.rating
                .weighted_average
                .total_cmp(&a.rating.weighted_average)
        })
        .then_with(|| a.id.cmp(&b.id))
}

/// Share of the field ranked behind `rank`, 0 to 100. A field of one is 0.
pub fn percentile(rank: usize, total: usize) -> u32 {
    if total <= 1 {
        return 0;
    }

    let behind = total.saturating_sub(rank) as f64;
    ((behind / (total - 1) as f64) * 100.0).round() as u32
}

/// Ranks `user` against `peers` and summarizes the user's standing.
///
/// Peers sharing the user's id, or repeating an earlier peer's id, are
/// skipped.
pub fn build_ranking(user: RatedUser, peers: Vec<RatedUser>) -> RankingResult {
    let mut seen = FxHashSet::default();
    seen.insert(user.id.clone());

    let mut everyone = Vec::with_capacity(peers.len() + 1);
    for peer in peers {
        if seen.insert(peer.id.clone()) {
            everyone.push(peer);
        }
    }
    everyone.push(user.clone());

    let rankings = rank_users(&everyone);
    let total = rankings.len();
    let friends_rank = rankings
        .iter()
        .find(|entry| entry.id == user.id)
        .map(|entry| entry.rank)
        .unwrap_or(total);

    RankingResult {
        friends_rank,
        total_friends: total,
        friends_percentile: percentile(friends_rank, total),
        bpr_score: user.rating.bpr,
        is_provisional: user.rating.is_provisional,
        competitions_count: user.rating.competitions_count,
        rankings,
    }
}
