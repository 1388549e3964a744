use serde::{Deserialize, Serialize};

use crate::models::timeseries::SeriesView;
use crate::utils::maths_utils::get_min_max;

/// Quick statistics over a filtered view.
///
/// An empty view has no extremes: `min_close` and `max_close` are `None`
/// (shown as "No data"), `total_volume` is `0.0`. Missing (`NaN`) values are
/// skipped.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryStats {
    pub row_count: usize,
    pub min_close: Option<f64>,
    pub max_close: Option<f64>,
    pub total_volume: f64,
}

impl SummaryStats {
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

pub fn summarize(view: &SeriesView<'_>) -> SummaryStats {
    let close_range = get_min_max(view.close_prices());

    SummaryStats {
        row_count: view.len(),
        min_close: close_range.map(|(min, _)| min),
        max_close: close_range.map(|(_, max)| max),
        total_volume: view.volumes().iter().filter(|v| !v.is_nan()).sum(),
    }
}
