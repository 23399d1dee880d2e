use tracing::{debug, warn};

use super::{build_bar_series, build_pie_series, rank_top, ChartConfig};
use crate::config::DashboardConfig;
use crate::env::{ChartSurface, Document, SurfaceError};
use crate::models::CropCountMap;

/// Canvas element ids the two dashboard charts are drawn into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartTargets {
    pub pie_canvas_id: String,
    pub bar_canvas_id: String,
}

impl Default for ChartTargets {
    fn default() -> Self {
        DashboardConfig::default().targets()
    }
}

/// What happened to one chart during a render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Drawn,
    MissingTarget,
    NoData,
    Failed(SurfaceError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub pie: ChartOutcome,
    pub bar: ChartOutcome,
}

/// Styling shared by every render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub top_crops: usize,
    pub palette: Vec<String>,
    pub bar_label: String,
    pub bar_color: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl ChartStyle {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            top_crops: config.top_crops,
            palette: config.palette.clone(),
            bar_label: config.bar_label.clone(),
            bar_color: config.bar_color.clone(),
        }
    }

    /// Crop distribution pie chart over every crop.
    pub fn pie_config(&self, counts: &CropCountMap) -> ChartConfig {
        ChartConfig::pie(build_pie_series(counts), &self.palette)
    }

    /// Bar chart of the most predicted crops.
    pub fn bar_config(&self, counts: &CropCountMap) -> ChartConfig {
        let ranked = rank_top(counts, self.top_crops);
        ChartConfig::bar(build_bar_series(&ranked), &self.bar_label, &self.bar_color)
    }
}

/// Draws the dashboard charts from a crop count map.
///
/// Holds no chart state between calls: every [`render`](Self::render) builds
/// both configurations from scratch and redraws.
pub struct DashboardRenderer<'a, D: ?Sized, C: ?Sized> {
    document: &'a D,
    charts: &'a C,
    style: ChartStyle,
}

impl<'a, D, C> DashboardRenderer<'a, D, C>
where
    D: Document + ?Sized,
    C: ChartSurface + ?Sized,
{
    pub fn new(document: &'a D, charts: &'a C, style: ChartStyle) -> Self {
        Self {
            document,
            charts,
            style,
        }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn render(&self, data_source: &CropCountMap, targets: &ChartTargets) -> RenderReport {
        let pie = self.draw_one(&targets.pie_canvas_id, data_source, |counts| {
            self.style.pie_config(counts)
        });
        let bar = self.draw_one(&targets.bar_canvas_id, data_source, |counts| {
            self.style.bar_config(counts)
        });
        RenderReport { pie, bar }
    }

    fn draw_one(
        &self,
        canvas_id: &str,
        counts: &CropCountMap,
        build: impl FnOnce(&CropCountMap) -> ChartConfig,
    ) -> ChartOutcome {
        if !self.document.contains(canvas_id) {
            debug!(canvas_id, "chart canvas not on page, skipping");
            return ChartOutcome::MissingTarget;
        }
        if counts.is_empty() {
            debug!(canvas_id, "no crop counts, skipping chart");
            return ChartOutcome::NoData;
        }

        match self.charts.draw(canvas_id, &build(counts)) {
            Ok(()) => ChartOutcome::Drawn,
            Err(err) => {
                warn!(canvas_id, error = %err, "failed to draw chart");
                ChartOutcome::Failed(err)
            }
        }
    }
}

/// Replaces the data of a chart that is already drawn.
pub fn update_chart<C: ChartSurface + ?Sized>(
    charts: &C,
    canvas_id: &str,
    config: &ChartConfig,
) -> Result<bool, SurfaceError> {
    let updated = charts.update(canvas_id, config)?;
    if !updated {
        debug!(canvas_id, "no chart bound to canvas, nothing to update");
    }
    Ok(updated)
}
