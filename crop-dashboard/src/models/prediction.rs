use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One entry of a user's prediction history, as served by `/api/history`.
///
/// Field order matters: it is the column order of the CSV export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRecord {
    pub id: u64,
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub prediction_name: Option<String>,
    pub predicted_crop: String,
    pub confidence: f64,
    #[serde(with = "history_timestamp")]
    pub created_at: NaiveDateTime,
}

/// Response envelope used by the application's JSON endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// History timestamps are plain `YYYY-MM-DD HH:MM:SS` strings in UTC.
mod history_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
