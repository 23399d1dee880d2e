use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::charts::ChartTargets;

pub const PIE_CANVAS_ID: &str = "cropDistributionChart";
pub const BAR_CANVAS_ID: &str = "topCropsChart";

/// Number of crops shown in the "top crops" bar chart.
pub const TOP_CROPS_LIMIT: usize = 5;

pub const CROP_PALETTE: [&str; 10] = [
    "#198754", "#20c997", "#0dcaf0", "#0d6efd", "#6610f2", "#6f42c1", "#d63384", "#dc3545",
    "#fd7e14", "#ffc107",
];

pub const BAR_COLOR: &str = "#198754";
pub const BAR_DATASET_LABEL: &str = "Number of predictions";

pub const ALERT_DISMISS_DELAY: Duration = Duration::from_secs(5);
pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);
pub const SUBMIT_RESET_DELAY: Duration = Duration::from_secs(3);
pub const REFRESH_PERIOD: Duration = Duration::from_secs(30);

pub const CSV_FILENAME: &str = "predictions.csv";
pub const CSV_MIME_TYPE: &str = "text/csv";

pub const HISTORY_ENDPOINT: &str = "/api/history";
pub const PREDICT_ENDPOINT: &str = "/api/predict";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dashboard config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid dashboard config: {0}")]
    Invalid(String),
}

/// Tunables for the dashboard page. Every field falls back to the built-in
/// default when missing from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub pie_canvas_id: String,
    pub bar_canvas_id: String,
    pub top_crops: usize,
    pub palette: Vec<String>,
    pub bar_color: String,
    pub bar_label: String,
    pub alert_dismiss_secs: u64,
    pub toast_lifetime_secs: u64,
    pub submit_reset_secs: u64,
    pub refresh_secs: u64,
    pub csv_filename: String,
    /// Base URL prepended to API endpoints. Empty, or a path such as `/app`,
    /// is relative to the page origin; see [`DashboardConfig::resolve_api_base`].
    pub api_base_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            pie_canvas_id: PIE_CANVAS_ID.to_string(),
            bar_canvas_id: BAR_CANVAS_ID.to_string(),
            top_crops: TOP_CROPS_LIMIT,
            palette: CROP_PALETTE.iter().map(|c| c.to_string()).collect(),
            bar_color: BAR_COLOR.to_string(),
            bar_label: BAR_DATASET_LABEL.to_string(),
            alert_dismiss_secs: ALERT_DISMISS_DELAY.as_secs(),
            toast_lifetime_secs: TOAST_LIFETIME.as_secs(),
            submit_reset_secs: SUBMIT_RESET_DELAY.as_secs(),
            refresh_secs: REFRESH_PERIOD.as_secs(),
            csv_filename: CSV_FILENAME.to_string(),
            api_base_url: String::new(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must list at least one color".into()));
        }
        if self.refresh_secs == 0 {
            return Err(ConfigError::Invalid("refresh_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn targets(&self) -> ChartTargets {
        ChartTargets {
            pie_canvas_id: self.pie_canvas_id.clone(),
            bar_canvas_id: self.bar_canvas_id.clone(),
        }
    }

    /// Absolute API base for a page served from `page_origin`. A configured
    /// absolute URL wins; an empty or path-only value is joined onto the origin.
    pub fn resolve_api_base(&self, page_origin: Option<&str>) -> String {
        let configured = self.api_base_url.trim_end_matches('/');
        match page_origin {
            Some(origin) if configured.is_empty() || configured.starts_with('/') => {
                format!("{}{}", origin.trim_end_matches('/'), configured)
            }
            _ => configured.to_string(),
        }
    }

    pub fn alert_dismiss_delay(&self) -> Duration {
        Duration::from_secs(self.alert_dismiss_secs)
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_secs(self.toast_lifetime_secs)
    }

    pub fn submit_reset_delay(&self) -> Duration {
        Duration::from_secs(self.submit_reset_secs)
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}
