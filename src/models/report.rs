//! Headless export: summary plus Vega-Lite documents for one date range.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::data::LoadError;
use crate::domain::date_selection::DateRange;
use crate::models::chart_spec::{ViewMode, build_price_chart, build_volume_price_chart};
use crate::models::summary::{SummaryStats, summarize};
use crate::models::timeseries::{OhlcvSeries, select_range};

#[derive(Serialize, Debug, Clone)]
pub struct ChartReport {
    pub data_path: String,
    pub range: DateRange,
    pub view_mode: ViewMode,
    pub summary: SummaryStats,
    pub price_chart: Value,
    pub volume_price_chart: Value,
}

/// Runs selection, aggregation and chart building for `range` (full span when
/// `None`, otherwise clamped to the series bounds).
pub fn build_report(
    data_path: &Path,
    series: &OhlcvSeries,
    range: Option<DateRange>,
    view_mode: ViewMode,
) -> Result<ChartReport, LoadError> {
    let bounds = series.date_bounds().ok_or(LoadError::NoRows)?;
    let range = range
        .map(|r| r.clamp_to(bounds))
        .unwrap_or(DateRange::new(bounds.0, bounds.1));

    let view = select_range(series, range.start, range.end);
    let price_chart = build_price_chart(&view);
    let volume_price_chart = build_volume_price_chart(&view, view_mode);

    Ok(ChartReport {
        data_path: data_path.display().to_string(),
        range,
        view_mode,
        summary: summarize(&view),
        price_chart: price_chart.to_vega_lite(&view),
        volume_price_chart: volume_price_chart.to_vega_lite(&view),
    })
}
