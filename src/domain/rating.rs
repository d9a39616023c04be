use serde::{Deserialize, Serialize};

/// Output of the BPR aggregation for a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BprResult {
    /// Shrinkage and decay adjusted rating in [0, 1], two decimals.
    pub bpr: f64,
    pub competitions_count: usize,
    pub is_provisional: bool,
    /// Recency and size weighted mean placement score before shrinkage.
    pub weighted_average: f64,
    pub total_weight: f64,
}

/// A user id paired with its computed rating, the input to ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedUser {
    pub id: String,
    pub rating: BprResult,
}

impl RatedUser {
    pub fn new(id: impl Into<String>, rating: BprResult) -> Self {
        Self {
            id: id.into(),
            rating,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub id: String,
    pub bpr: f64,
    pub competitions_count: usize,
    pub is_provisional: bool,
    pub weighted_average: f64,
    /// 1-indexed position after sorting.
    pub rank: usize,
}

/// A user's standing among their peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult {
    pub friends_rank: usize,
    pub total_friends: usize,
    /// 0 to 100, higher is better.
    pub friends_percentile: u32,
    pub bpr_score: f64,
    pub is_provisional: bool,
    pub competitions_count: usize,
    pub rankings: Vec<RankingEntry>,
}
