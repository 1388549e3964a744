//! Plot visualization configuration (egui backend)

use eframe::egui::Color32;

pub struct PlotConfig {
    pub price_line_color: Color32,
    pub price_line_width: f32,
    pub volume_bar_color: Color32,
    /// Bar width as a fraction of one day
    pub volume_bar_width_days: f64,
    /// Scatter marker radius in points
    pub scatter_point_radius: f32,
    /// Gradient for the scatter's Close intensity, low to high
    pub close_gradient_colors: &'static [&'static str],
    /// The scatter is drawn as this many color bands (one plot item each)
    pub scatter_color_buckets: usize,
    /// Fraction of the data range left as margin around plotted marks
    pub axis_padding_pct: f64,
    /// Fallback when the gradient cannot be built
    pub fallback_point_color: Color32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    price_line_color: Color32::from_rgb(76, 120, 168),
    price_line_width: 1.5,
    volume_bar_color: Color32::from_rgb(245, 133, 24),
    volume_bar_width_days: 0.8,
    scatter_point_radius: 3.5,
    close_gradient_colors: &[
        "#deebf7", // Pale blue
        "#9ecae1",
        "#4292c6",
        "#2171b5",
        "#08306b", // Navy
    ],
    scatter_color_buckets: 12,
    axis_padding_pct: 0.05,
    fallback_point_color: Color32::from_rgb(66, 146, 198),
};
