//! Dashboard behaviour configuration

use crate::models::chart_spec::ViewMode;

/// The Master Dashboard Configuration
pub struct DashboardConfig {
    /// Maximum number of filtered rows shown in the preview table
    pub preview_row_limit: usize,
    /// Volume/price chart shown on start-up unless `--mode` says otherwise
    pub default_view_mode: ViewMode,
    /// Height of the price and volume/price charts (points)
    pub chart_height: f32,
    /// Max height of the preview table before it scrolls
    pub preview_table_height: f32,
}

pub const DASHBOARD: DashboardConfig = DashboardConfig {
    preview_row_limit: 200,
    default_view_mode: ViewMode::Scatter,
    chart_height: 320.0,
    preview_table_height: 300.0,
};
