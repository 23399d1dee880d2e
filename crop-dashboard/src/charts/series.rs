use serde::Serialize;

use super::RankedEntry;
use crate::models::CropCountMap;

/// Parallel label/value arrays handed to the charting library.
///
/// Labels and values are only ever pushed together, so both always have the
/// same length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    labels: Vec<String>,
    values: Vec<u64>,
}

impl ChartSeries {
    pub fn push(&mut self, label: impl Into<String>, value: u64) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<u64>) {
        (self.labels, self.values)
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for ChartSeries {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut series = ChartSeries::default();
        for (label, value) in iter {
            series.push(label, value);
        }
        series
    }
}

/// One slice per crop, in the order of the count map.
pub fn build_pie_series(counts: &CropCountMap) -> ChartSeries {
    counts.iter().collect()
}

/// One bar per ranked entry, in ranking order.
pub fn build_bar_series(ranked: &[RankedEntry]) -> ChartSeries {
    ranked
        .iter()
        .map(|entry| (entry.name.as_str(), entry.count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::rank_top;

    fn sample() -> CropCountMap {
        [
            ("Rice", 12),
            ("Maize", 12),
            ("Wheat", 7),
            ("Cotton", 20),
            ("Millet", 3),
            ("Coffee", 1),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn pie_series_keeps_every_crop_in_input_order() {
        let series = build_pie_series(&sample());
        assert_eq!(
            series.labels(),
            ["Rice", "Maize", "Wheat", "Cotton", "Millet", "Coffee"]
        );
        assert_eq!(series.values(), [12, 12, 7, 20, 3, 1]);
    }

    #[test]
    fn bar_series_follows_ranking() {
        let ranked = rank_top(&sample(), 5);
        let series = build_bar_series(&ranked);
        assert_eq!(series.len(), 5);
        assert_eq!(series.labels(), ["Cotton", "Rice", "Maize", "Wheat", "Millet"]);
        assert_eq!(series.values(), [20, 12, 12, 7, 3]);
    }

    #[test]
    fn empty_inputs_give_empty_series() {
        assert!(build_pie_series(&CropCountMap::new()).is_empty());
        assert!(build_bar_series(&[]).is_empty());
    }
}
