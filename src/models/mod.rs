// Pure data models: the loaded series, filtered views, aggregates and chart specifications.
// Nothing in here knows about egui.

pub mod chart_spec;
pub mod report;
pub mod summary;
pub mod timeseries;

// Re-export key types for convenience
pub use chart_spec::{
    ChartSpec, LayerSpec, Mark, ScaleResolution, ViewMode, build_dual_axis, build_price_chart,
    build_scatter, build_volume_price_chart,
};
pub use report::{ChartReport, build_report};
pub use summary::{SummaryStats, summarize};
pub use timeseries::{OhlcvSeries, SeriesView, select_range};
