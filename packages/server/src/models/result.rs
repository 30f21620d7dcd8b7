use std::collections::BTreeMap;

use serde::Serialize;

/// Aggregated vote statistics for one item.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ResultItem {
    #[schema(example = 1)]
    pub item_id: i32,
    /// Number of votes cast for the item.
    #[schema(example = 10)]
    pub voters: u64,
    /// Sum of all scores.
    #[schema(example = 30)]
    pub score: i64,
    /// `score / voters`, rounded to 6 decimals. Zero without votes.
    #[schema(example = 3.0)]
    pub average: f64,
    /// Votes with a score above zero.
    #[schema(example = 8)]
    pub pos: u64,
    /// Votes with a score below zero.
    #[schema(example = 2)]
    pub neg: u64,
    /// Composite engagement score in `[0, 1]`.
    #[schema(example = 0.310933)]
    pub rank: f64,
}

/// How many votes an item received at each score value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ItemDistribution {
    pub item_id: i32,
    /// Score (-5..=5) to vote count. Every score is present.
    pub distribution: BTreeMap<i32, u64>,
}
