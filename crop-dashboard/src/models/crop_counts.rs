use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::PredictionRecord;

/// Mapping from crop name to the number of predictions for that crop.
///
/// Entries keep the order in which they were first seen, in memory and
/// through serde. The ranking relies on this order to break ties, so
/// equality is order-sensitive too.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropCountMap {
    entries: IndexMap<String, u64>,
}

impl CropCountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count for `crop`. A crop that is already present keeps its
    /// position and only has its count replaced.
    pub fn insert(&mut self, crop: impl Into<String>, count: u64) {
        self.entries.insert(crop.into(), count);
    }

    /// Adds one occurrence of `crop`.
    pub fn increment(&mut self, crop: &str) {
        match self.entries.get_mut(crop) {
            Some(count) => *count += 1,
            None => {
                self.entries.insert(crop.to_string(), 1);
            }
        }
    }

    /// Counts every crop name yielded by `crops`, in first-seen order.
    pub fn tally<I, S>(crops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = Self::new();
        for crop in crops {
            counts.increment(crop.as_ref());
        }
        counts
    }

    /// Builds the per-crop counts the dashboard shows for a prediction history.
    pub fn from_predictions<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PredictionRecord>,
    {
        Self::tally(records.into_iter().map(|r| r.predicted_crop.as_str()))
    }

    pub fn get(&self, crop: &str) -> Option<u64> {
        self.entries.get(crop).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
    }
}

impl PartialEq for CropCountMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for CropCountMap {}

impl<S: Into<String>> FromIterator<(S, u64)> for CropCountMap {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut counts = Self::new();
        for (crop, count) in iter {
            counts.insert(crop, count);
        }
        counts
    }
}

/// The crunched dashboard data that gets embedded into the web page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CropCountsSnapshot {
    pub total_predictions: u64,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub crop_counts: CropCountMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_position() {
        let mut counts = CropCountMap::new();
        counts.insert("Rice", 3);
        counts.insert("Maize", 1);
        counts.insert("Rice", 9);

        let entries: Vec<_> = counts.iter().collect();
        assert_eq!(entries, vec![("Rice", 9), ("Maize", 1)]);
    }

    #[test]
    fn tally_counts_in_first_seen_order() {
        let counts = CropCountMap::tally(["mango", "rice", "mango", "coffee", "rice", "mango"]);
        let entries: Vec<_> = counts.iter().collect();
        assert_eq!(entries, vec![("mango", 3), ("rice", 2), ("coffee", 1)]);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn json_preserves_document_order() {
        let counts: CropCountMap =
            serde_json::from_str(r#"{"Wheat": 7, "Cotton": 20, "Apple": 1}"#).unwrap();
        let names: Vec<_> = counts.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Wheat", "Cotton", "Apple"]);
    }

    #[test]
    fn toml_snapshot_preserves_document_order() {
        let snapshot: CropCountsSnapshot = toml::from_str(
            r#"
total_predictions = 39
last_updated = "2026-10-01T08:00:00+00:00"

[crop_counts]
Rice = 12
Maize = 12
Cotton = 15
"#,
        )
        .unwrap();

        let names: Vec<_> = snapshot.crop_counts.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Rice", "Maize", "Cotton"]);
        assert_eq!(snapshot.crop_counts.get("Cotton"), Some(15));
    }

    #[test]
    fn equality_depends_on_order() {
        let rice_first: CropCountMap = [("Rice", 2), ("Maize", 2)].into_iter().collect();
        let maize_first: CropCountMap = [("Maize", 2), ("Rice", 2)].into_iter().collect();
        assert_ne!(rice_first, maize_first);
        assert_eq!(rice_first, CropCountMap::tally(["Rice", "Maize", "Maize", "Rice"]));
    }

    #[test]
    fn tally_handles_long_histories() {
        let crops: Vec<String> = (0..50_000).map(|i| format!("crop-{}", i % 5_000)).collect();
        let counts = CropCountMap::tally(&crops);
        assert_eq!(counts.len(), 5_000);
        assert_eq!(counts.total(), 50_000);
        assert_eq!(counts.get("crop-4999"), Some(10));
        assert_eq!(counts.iter().next(), Some(("crop-0", 10)));
    }

    #[test]
    fn negative_counts_are_rejected() {
        let result: Result<CropCountMap, _> = serde_json::from_str(r#"{"Rice": -2}"#);
        assert!(result.is_err());
    }
}
