//! Declarative chart configuration (backend independent)

/// Axis titles used by the chart specifications
pub struct ChartTitles {
    pub price_chart: &'static str,
    pub scatter_chart: &'static str,
    pub dual_axis_chart: &'static str,
    pub date_axis: &'static str,
    pub close_axis: &'static str,
    pub volume_axis: &'static str,
    pub dual_price_axis: &'static str,
    pub dual_volume_axis: &'static str,
}

pub struct MarkSettings {
    /// Scatter point area (Vega-Lite `size`, in square pixels)
    pub scatter_point_size: f32,
    pub scatter_opacity: f32,
    pub volume_bar_opacity: f32,
    /// CSS color name for the dual-axis price line
    pub price_line_color: &'static str,
}

/// The Master Chart Configuration
pub struct ChartConfig {
    pub titles: ChartTitles,
    pub marks: MarkSettings,
    pub vega_lite_schema: &'static str,
}

pub const CHART: ChartConfig = ChartConfig {
    titles: ChartTitles {
        price_chart: "Price curve (Close)",
        scatter_chart: "Volume vs Close",
        dual_axis_chart: "Synchronised curves (Price & Volume)",
        date_axis: "Date",
        close_axis: "Closing price (USD)",
        volume_axis: "Traded volume",
        dual_price_axis: "Price (USD)",
        dual_volume_axis: "Volume",
    },
    marks: MarkSettings {
        scatter_point_size: 40.0,
        scatter_opacity: 0.5,
        volume_bar_opacity: 0.3,
        price_line_color: "steelblue",
    },
    vega_lite_schema: "https://vega.github.io/schema/vega-lite/v5.json",
};
