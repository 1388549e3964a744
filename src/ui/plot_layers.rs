use eframe::egui::Stroke;
use egui_plot::{Bar, BarChart, Line, MarkerShape, PlotPoints, PlotUi, Points};

use crate::config::plot::PLOT_CONFIG;
use crate::models::chart_spec::Mark;
use crate::ui::ui_plot_view::PreparedLayer;

/// Context passed to every layer during rendering.
pub struct LayerContext<'a> {
    pub layer: &'a PreparedLayer,
    /// Legend/hover name of the layer
    pub name: &'a str,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext);
}

/// Picks the renderer for a mark.
pub fn layer_for(mark: Mark) -> Box<dyn PlotLayer> {
    match mark {
        Mark::Line { .. } => Box::new(LineLayer),
        Mark::Circle { .. } => Box::new(CircleLayer),
        Mark::Bar { .. } => Box::new(BarLayer),
    }
}

// ============================================================================
// 1. LINE LAYER (Close over time)
// ============================================================================
pub struct LineLayer;

impl PlotLayer for LineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for group in &ctx.layer.groups {
            let line = Line::new(ctx.name, PlotPoints::new(group.points.clone()))
                .color(group.color)
                .width(PLOT_CONFIG.price_line_width);
            plot_ui.line(line);
        }
    }
}

// ============================================================================
// 2. CIRCLE LAYER (Scatter, one item per color band)
// ============================================================================
pub struct CircleLayer;

impl PlotLayer for CircleLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for group in &ctx.layer.groups {
            let points = Points::new(ctx.name, PlotPoints::new(group.points.clone()))
                .shape(MarkerShape::Circle)
                .filled(true)
                .radius(PLOT_CONFIG.scatter_point_radius)
                .color(group.color);
            plot_ui.points(points);
        }
    }
}

// ============================================================================
// 3. BAR LAYER (Volume, drawn up from the layer baseline)
// ============================================================================
pub struct BarLayer;

impl PlotLayer for BarLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let base = ctx.layer.baseline.unwrap_or(0.0);

        for group in &ctx.layer.groups {
            let bars: Vec<Bar> = group
                .points
                .iter()
                .map(|[x, top]| {
                    Bar::new(*x, top - base)
                        .base_offset(base)
                        .width(PLOT_CONFIG.volume_bar_width_days)
                        .fill(group.color)
                        .stroke(Stroke::NONE)
                })
                .collect();

            plot_ui.bar_chart(BarChart::new(ctx.name, bars).color(group.color));
        }
    }
}
