//! Serde model of the configuration object accepted by the Chart.js
//! constructor: `{ type, data: { labels, datasets }, options }`.

use serde::{Deserialize, Serialize};

use super::ChartSeries;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u64>,
    pub background_color: BackgroundColor,
}

/// Chart.js accepts either one color for the whole dataset or one per point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BackgroundColor {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: Plugins,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Legend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
    pub ticks: Ticks,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub step_size: u32,
}

impl ChartConfig {
    /// Pie chart colored from `palette`, legend below the chart.
    pub fn pie(series: ChartSeries, palette: &[String]) -> Self {
        let (labels, values) = series.into_parts();
        Self {
            kind: ChartKind::Pie,
            data: ChartData {
                labels,
                datasets: vec![Dataset {
                    label: None,
                    data: values,
                    background_color: BackgroundColor::PerPoint(palette.to_vec()),
                }],
            },
            options: ChartOptions {
                responsive: true,
                plugins: Plugins {
                    legend: Legend {
                        display: None,
                        position: Some(LegendPosition::Bottom),
                    },
                },
                scales: None,
            },
        }
    }

    /// Single-color bar chart, legend hidden, y axis counting whole
    /// predictions from zero.
    pub fn bar(series: ChartSeries, label: &str, color: &str) -> Self {
        let (labels, values) = series.into_parts();
        Self {
            kind: ChartKind::Bar,
            data: ChartData {
                labels,
                datasets: vec![Dataset {
                    label: Some(label.to_string()),
                    data: values,
                    background_color: BackgroundColor::Single(color.to_string()),
                }],
            },
            options: ChartOptions {
                responsive: true,
                plugins: Plugins {
                    legend: Legend {
                        display: Some(false),
                        position: None,
                    },
                },
                scales: Some(Scales {
                    y: Axis {
                        begin_at_zero: true,
                        ticks: Ticks { step_size: 1 },
                    },
                }),
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
