use serde::Serialize;

use crate::models::CropCountMap;

/// A crop together with its prediction count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub count: u64,
}

impl RankedEntry {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Ranks crops by count, highest first, and keeps the first `limit`.
///
/// Crops with equal counts stay in the order they have in `counts`.
pub fn rank_top(counts: &CropCountMap, limit: usize) -> Vec<RankedEntry> {
    if limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<RankedEntry> = counts
        .iter()
        .map(|(name, count)| RankedEntry::new(name, count))
        .collect();

    // Sort by count in descending order; sort_by is stable
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    ranked.truncate(limit);
    ranked
}
