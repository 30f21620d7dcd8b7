//! Vote aggregation and the composite rank score.
//!
//! `rank = round((0.6 * L + 0.4 * norm_avg) * weight, 6)` where `L` is the
//! Wilson lower bound of the positive share among signed votes, `norm_avg`
//! maps the average score from `[-5, 5]` to `[0, 1]`, and
//! `weight = voters / (voters + 10)` damps items with little participation.

use std::collections::BTreeMap;

use crate::models::result::{ItemDistribution, ResultItem};
use crate::models::vote::{MAX_SCORE, MIN_SCORE};

/// z-score for a 95% confidence interval.
pub const WILSON_Z: f64 = 1.96;
/// Voter count at which the participation weight reaches one half.
pub const PARTICIPATION_K: f64 = 10.0;
/// Share of the Wilson bound in the blend; the average gets the rest.
pub const CONFIDENCE_WEIGHT: f64 = 0.6;

/// Round half away from zero to 6 decimal places.
pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Lower bound of the Wilson score interval for `pos` successes out of
/// `pos + neg` trials. Zero when there are no trials.
pub fn wilson_lower_bound(pos: u64, neg: u64) -> f64 {
    let n = (pos + neg) as f64;
    if n == 0.0 {
        return 0.0;
    }

    let z2 = WILSON_Z * WILSON_Z;
    let p = pos as f64 / n;
    let denom = 1.0 + z2 / n;
    let centre = p + z2 / (2.0 * n);
    let margin = WILSON_Z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt();

    ((centre - margin) / denom).max(0.0)
}

pub fn rank(voters: u64, average: f64, pos: u64, neg: u64) -> f64 {
    let lower = wilson_lower_bound(pos, neg);
    let norm_avg = (average - MIN_SCORE as f64) / (MAX_SCORE - MIN_SCORE) as f64;
    let voters = voters as f64;
    let weight = voters / (voters + PARTICIPATION_K);

    round6((CONFIDENCE_WEIGHT * lower + (1.0 - CONFIDENCE_WEIGHT) * norm_avg) * weight)
}

/// Running totals for one item.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub voters: u64,
    pub score: i64,
    pub pos: u64,
    pub neg: u64,
}

impl Tally {
    pub fn add(&mut self, score: i32) {
        self.voters += 1;
        self.score += i64::from(score);
        if score > 0 {
            self.pos += 1;
        } else if score < 0 {
            self.neg += 1;
        }
    }

    pub fn into_result(self, item_id: i32) -> ResultItem {
        let average = if self.voters > 0 {
            round6(self.score as f64 / self.voters as f64)
        } else {
            0.0
        };

        ResultItem {
            item_id,
            voters: self.voters,
            score: self.score,
            average,
            pos: self.pos,
            neg: self.neg,
            rank: rank(self.voters, average, self.pos, self.neg),
        }
    }
}

/// Group `(item_id, score)` pairs by item, in ascending item id order.
pub fn aggregate<I>(votes: I) -> Vec<ResultItem>
where
    I: IntoIterator<Item = (i32, i32)>,
{
    let mut tallies: BTreeMap<i32, Tally> = BTreeMap::new();
    for (item_id, score) in votes {
        tallies.entry(item_id).or_default().add(score);
    }

    tallies
        .into_iter()
        .map(|(item_id, tally)| tally.into_result(item_id))
        .collect()
}

/// Stable sort by rank, highest first.
pub fn sort_by_rank(results: &mut [ResultItem]) {
    results.sort_by(|a, b| b.rank.total_cmp(&a.rank));
}

/// Per-item histogram of scores, every bucket from -5 to 5 present.
pub fn distributions<I>(votes: I) -> Vec<ItemDistribution>
where
    I: IntoIterator<Item = (i32, i32)>,
{
    let mut by_item: BTreeMap<i32, BTreeMap<i32, u64>> = BTreeMap::new();
    for (item_id, score) in votes {
        let buckets = by_item
            .entry(item_id)
            .or_insert_with(|| (MIN_SCORE..=MAX_SCORE).map(|s| (s, 0)).collect());
        *buckets.entry(score).or_insert(0) += 1;
    }

    by_item
        .into_iter()
        .map(|(item_id, distribution)| ItemDistribution {
            item_id,
            distribution,
        })
        .collect()
}
