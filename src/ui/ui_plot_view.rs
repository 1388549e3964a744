use colorgrad::Gradient;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use eframe::egui::{self, Color32};
use egui_plot::{AxisHints, Corner, HPlacement, Legend, Plot};

use crate::config::{DASHBOARD, PLOT_CONFIG};
use crate::domain::field::{Field, FieldType};
use crate::models::chart_spec::{ChartSpec, Mark, ScaleResolution};
use crate::models::timeseries::SeriesView;
use crate::ui::plot_layers::{LayerContext, layer_for};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_text::UI_TEXT;
use crate::ui::utils::{format_compact, format_field_value, format_thousands};
use crate::utils::maths_utils::{self, AxisTransform};
use crate::utils::time_utils::plot_x_to_date_string;

/// Points drawn with one color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorGroup {
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

/// One chart layer resolved into plot-space points.
#[derive(Clone, Debug)]
pub struct PreparedLayer {
    pub mark: Mark,
    pub name: &'static str,
    pub groups: Vec<ColorGroup>,
    /// Bars grow from here instead of 0
    pub baseline: Option<f64>,
}

impl PreparedLayer {
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }
}

/// Tooltip text anchored at a data point.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverRow {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct PlotCache {
    pub key: u64,
    pub layers: Vec<PreparedLayer>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// Set when a second layer lives on its own y scale (volume in dual-axis mode)
    pub secondary: Option<AxisTransform>,
    pub hover: Vec<HoverRow>,
}

/// Renders `ChartSpec`s with egui_plot, caching the prepared geometry per chart.
#[derive(Default)]
pub struct PlotView {
    cache: HashMap<&'static str, PlotCache>,
    cache_hits: usize,
    cache_misses: usize,
}

impl PlotView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Prepared geometry for `spec`, rebuilt only when the spec or the view moved.
    pub fn prepare(&mut self, spec: &ChartSpec, view: &SeriesView<'_>) -> Option<&PlotCache> {
        let key = cache_key(spec, view);
        let fresh = self.cache.get(spec.id).is_some_and(|c| c.key == key);

        if fresh {
            self.cache_hits += 1;
        } else {
            self.cache_misses += 1;
            match prepare_plot(spec, view, key) {
                Some(prepared) => {
                    self.cache.insert(spec.id, prepared);
                }
                None => {
                    self.cache.remove(spec.id);
                }
            }
        }
        self.cache.get(spec.id)
    }

    pub fn show_chart(&mut self, ui: &mut egui::Ui, spec: &ChartSpec, view: &SeriesView<'_>) {
        let Some(cache) = self.prepare(spec, view) else {
            ui.label_subdued(UI_TEXT.empty_chart);
            return;
        };
        let Some(primary) = spec.layers.first() else {
            return;
        };

        let x_span = cache.x_range.1 - cache.x_range.0;
        let y_span = cache.y_range.1 - cache.y_range.0;
        let hover = &cache.hover;

        let mut y_axes = vec![create_y_axis(primary.y.field, primary.y.title)];
        if let (Some(transform), Some(second)) = (cache.secondary, spec.layers.get(1)) {
            y_axes.push(create_secondary_y_axis(second.y.title, transform));
        }

        let mut plot = Plot::new(spec.id)
            .height(DASHBOARD.chart_height)
            .custom_x_axes(vec![create_x_axis(primary.x.field, primary.x.title)])
            .custom_y_axes(y_axes)
            .label_formatter(move |_name, point| {
                nearest_hover(hover, point.x, point.y, x_span, y_span)
                    .map(|row| row.text.clone())
                    .unwrap_or_default()
            })
            .include_x(cache.x_range.0)
            .include_x(cache.x_range.1)
            .include_y(cache.y_range.0)
            .include_y(cache.y_range.1)
            .allow_zoom(spec.interactive)
            .allow_drag(spec.interactive)
            .allow_scroll(spec.interactive)
            .allow_boxed_zoom(spec.interactive);

        if cache.layers.len() > 1 {
            plot = plot.legend(Legend::default().position(Corner::LeftTop));
        }

        plot.show(ui, |plot_ui| {
            for layer in &cache.layers {
                let ctx = LayerContext {
                    layer,
                    name: layer.name,
                };
                layer_for(layer.mark).render(plot_ui, &ctx);
            }
        });
    }
}

fn cache_key(spec: &ChartSpec, view: &SeriesView<'_>) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    spec.id.hash(&mut hasher);
    spec.layers.len().hash(&mut hasher);
    view.indices().hash(&mut hasher);
    std::ptr::from_ref(view.series).hash(&mut hasher);
    hasher.finish()
}

/// Resolves every layer of `spec` against `view`. `None` when there is nothing to draw.
pub fn prepare_plot(spec: &ChartSpec, view: &SeriesView<'_>, key: u64) -> Option<PlotCache> {
    if view.is_empty() {
        return None;
    }
    let primary = spec.layers.first()?;
    let primary_points = primary.points(view);

    let xs: Vec<f64> = primary_points.iter().map(|p| p[0]).collect();
    let ys: Vec<f64> = primary_points.iter().map(|p| p[1]).collect();
    let (x_min, x_max) = maths_utils::get_min_max(&xs)?;
    let (y_min, y_max) = maths_utils::get_min_max(&ys)?;

    let x_range = if primary.x.field.data_type() == FieldType::Temporal {
        // One bar width each side so edge bars are not clipped
        (x_min - PLOT_CONFIG.volume_bar_width_days, x_max + PLOT_CONFIG.volume_bar_width_days)
    } else {
        maths_utils::padded_range(x_min, x_max, PLOT_CONFIG.axis_padding_pct)
    };
    let mut y_range = maths_utils::padded_range(y_min, y_max, PLOT_CONFIG.axis_padding_pct);
    let mut secondary = None;

    let mut layers = Vec::with_capacity(spec.layers.len());
    for (idx, layer) in spec.layers.iter().enumerate() {
        let mut points = if idx == 0 {
            primary_points.clone()
        } else {
            layer.points(view)
        };
        let mut baseline = None;

        if idx > 0 {
            let layer_ys: Vec<f64> = points.iter().map(|p| p[1]).collect();
            let (lo, hi) = maths_utils::get_min_max(&layer_ys).unwrap_or((0.0, 0.0));

            if spec.y_resolution == ScaleResolution::Independent {
                let transform = AxisTransform::new((lo.min(0.0), hi.max(0.0)), y_range);
                for point in &mut points {
                    point[1] = transform.apply(point[1]);
                }
                baseline = Some(transform.apply(0.0));
                secondary = Some(transform);
            } else {
                y_range = (y_range.0.min(lo), y_range.1.max(hi));
            }
        }

        if baseline.is_none() && matches!(layer.mark, Mark::Bar { .. }) {
            baseline = Some(0.0);
            y_range.0 = y_range.0.min(0.0);
        }

        let mut groups = match layer.color {
            Some(encoding) => color_groups(&points, &view.values(encoding.field), layer.mark),
            None => vec![ColorGroup {
                color: mark_color(layer.mark),
                points,
            }],
        };
        // Missing values are not drawn
        for group in &mut groups {
            group.points.retain(|p| p[0].is_finite() && p[1].is_finite());
        }

        layers.push(PreparedLayer {
            mark: layer.mark,
            name: layer.y.title,
            groups,
            baseline,
        });
    }

    let hover = hover_rows(spec, view, &primary_points);

    Some(PlotCache {
        key,
        layers,
        x_range,
        y_range,
        secondary,
        hover,
    })
}

fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn mark_opacity(mark: Mark) -> f32 {
    match mark {
        Mark::Line { .. } => 1.0,
        Mark::Circle { opacity, .. } | Mark::Bar { opacity } => opacity,
    }
}

/// CSS color name or hex string to `Color32`.
fn html_color(name: &str) -> Option<Color32> {
    match colorgrad::Color::from_html(name) {
        Ok(color) => {
            let [r, g, b, a] = color.to_rgba8();
            Some(Color32::from_rgba_unmultiplied(r, g, b, a))
        }
        Err(e) => {
            log::warn!("Unknown mark color {:?} ({})", name, e);
            None
        }
    }
}

fn mark_color(mark: Mark) -> Color32 {
    match mark {
        Mark::Line { color: Some(name) } => html_color(name).unwrap_or(PLOT_CONFIG.price_line_color),
        Mark::Line { color: None } => PLOT_CONFIG.price_line_color,
        Mark::Circle { opacity, .. } => with_opacity(PLOT_CONFIG.fallback_point_color, opacity),
        Mark::Bar { opacity } => with_opacity(PLOT_CONFIG.volume_bar_color, opacity),
    }
}

/// Splits points into gradient bands by the normalized encoding value.
fn color_groups(points: &[[f64; 2]], values: &[f64], mark: Mark) -> Vec<ColorGroup> {
    let grad = match colorgrad::GradientBuilder::new()
        .html_colors(PLOT_CONFIG.close_gradient_colors)
        .build::<colorgrad::CatmullRomGradient>()
    {
        Ok(grad) => grad,
        Err(e) => {
            log::warn!("Color gradient unavailable ({}), using a single color", e);
            return vec![ColorGroup {
                color: mark_color(mark),
                points: points.to_vec(),
            }];
        }
    };

    let buckets = PLOT_CONFIG.scatter_color_buckets.max(1);
    let last = (buckets - 1).max(1) as f64;
    let opacity = mark_opacity(mark);

    let mut groups: Vec<ColorGroup> = (0..buckets)
        .map(|b| {
            let rgba = grad.at((b as f64 / last) as f32).to_rgba8();
            ColorGroup {
                color: with_opacity(Color32::from_rgb(rgba[0], rgba[1], rgba[2]), opacity),
                points: Vec::new(),
            }
        })
        .collect();

    for (point, t) in points.iter().zip(maths_utils::normalize_min_max(values)) {
        let bucket = ((t * last).round() as usize).min(buckets - 1);
        groups[bucket].points.push(*point);
    }

    groups.retain(|g| !g.points.is_empty());
    groups
}

fn hover_rows(spec: &ChartSpec, view: &SeriesView<'_>, anchors: &[[f64; 2]]) -> Vec<HoverRow> {
    let fields: Vec<Field> = spec
        .layers
        .iter()
        .find(|l| !l.tooltip.is_empty())
        .map(|l| l.tooltip.clone())
        .unwrap_or_else(|| {
            let mut fields = vec![Field::Timestamp];
            fields.extend(spec.layers.iter().map(|l| l.y.field));
            fields
        });

    view.candles()
        .zip(anchors)
        .filter(|(_, anchor)| anchor[0].is_finite() && anchor[1].is_finite())
        .map(|(candle, anchor)| HoverRow {
            x: anchor[0],
            y: anchor[1],
            text: fields
                .iter()
                .map(|f| format!("{}: {}", f, format_field_value(&candle, *f)))
                .collect::<Vec<_>>()
                .join("\n"),
        })
        .collect()
}

/// Closest row to the pointer, distances scaled by the visible spans.
pub fn nearest_hover(
    rows: &[HoverRow],
    x: f64,
    y: f64,
    x_span: f64,
    y_span: f64,
) -> Option<&HoverRow> {
    let x_span = if x_span.abs() < f64::EPSILON { 1.0 } else { x_span };
    let y_span = if y_span.abs() < f64::EPSILON { 1.0 } else { y_span };
    rows.iter().min_by(|a, b| {
        let da = ((a.x - x) / x_span).powi(2) + ((a.y - y) / y_span).powi(2);
        let db = ((b.x - x) / x_span).powi(2) + ((b.y - y) / y_span).powi(2);
        da.total_cmp(&db)
    })
}

fn axis_value_text(field: Field, value: f64) -> String {
    match field {
        Field::Timestamp => plot_x_to_date_string(value),
        price if price.is_price() => format_thousands(value),
        _ => format_compact(value),
    }
}

fn create_x_axis(field: Field, title: &'static str) -> AxisHints<'static> {
    AxisHints::new_x()
        .label(title)
        .formatter(move |grid_mark, _range| axis_value_text(field, grid_mark.value))
}

fn create_y_axis(field: Field, title: &'static str) -> AxisHints<'static> {
    AxisHints::new_y()
        .label(title)
        .formatter(move |grid_mark, _range| axis_value_text(field, grid_mark.value))
        .placement(HPlacement::Left)
}

fn create_secondary_y_axis(title: &'static str, transform: AxisTransform) -> AxisHints<'static> {
    AxisHints::new_y()
        .label(title)
        .formatter(move |grid_mark, _range| format_compact(transform.invert(grid_mark.value)))
        .placement(HPlacement::Right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candle::Candle;
    use crate::models::chart_spec::{build_dual_axis, build_price_chart, build_scatter};
    use crate::models::timeseries::OhlcvSeries;
    use chrono::NaiveDate;

    fn series() -> OhlcvSeries {
        let rows = [(1, 30000.0, 100.0), (2, 32000.0, 150.0), (3, 31000.0, 120.0)]
            .into_iter()
            .map(|(day, close, volume)| {
                Candle::new(
                    NaiveDate::from_ymd_opt(2021, 1, day)
                        .unwrap()
                        .and_hms_opt(0, 0, 0)
                        .unwrap(),
                    close,
                    close,
                    close,
                    close,
                    volume,
                )
            })
            .collect();
        OhlcvSeries::from_candles(rows)
    }

    #[test]
    fn test_price_chart_prepares_one_line() {
        let series = series();
        let view = series.full_view();
        let cache = prepare_plot(&build_price_chart(&view), &view, 0).unwrap();
        assert_eq!(cache.layers.len(), 1);
        assert_eq!(cache.layers[0].point_count(), 3);
        assert!(cache.secondary.is_none());
        assert!(cache.y_range.0 < 30000.0 && cache.y_range.1 > 32000.0);
        assert_eq!(cache.hover.len(), 3);
        assert!(cache.hover[1].text.contains("Close: 32000.00"));
    }

    #[test]
    fn test_scatter_groups_keep_every_point() {
        let series = series();
        let view = series.full_view();
        let cache = prepare_plot(&build_scatter(&view), &view, 0).unwrap();
        let layer = &cache.layers[0];
        assert_eq!(layer.point_count(), 3);
        // Lowest and highest Close land in different bands
        assert!(layer.groups.len() >= 2);
        assert!(layer.groups.iter().all(|g| g.color.a() < 255));
    }

    #[test]
    fn test_dual_axis_maps_volume_into_price_space() {
        let series = series();
        let view = series.full_view();
        let cache = prepare_plot(&build_dual_axis(&view), &view, 0).unwrap();
        let transform = cache.secondary.unwrap();
        let bars = &cache.layers[1];

        assert_eq!(bars.baseline, Some(cache.y_range.0));
        let tallest = bars.groups[0]
            .points
            .iter()
            .map(|p| p[1])
            .fold(f64::MIN, f64::max);
        assert!((tallest - cache.y_range.1).abs() < 1e-6);
        assert!((transform.invert(tallest) - 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_line_color_follows_mark_name() {
        assert_eq!(
            mark_color(Mark::Line { color: Some("steelblue") }),
            Color32::from_rgb(70, 130, 180)
        );
        assert_eq!(
            mark_color(Mark::Line { color: Some("crimson") }),
            Color32::from_rgb(220, 20, 60)
        );
        assert_eq!(
            mark_color(Mark::Line { color: Some("not-a-color") }),
            PLOT_CONFIG.price_line_color
        );

        let series = series();
        let view = series.full_view();
        let cache = prepare_plot(&build_dual_axis(&view), &view, 0).unwrap();
        assert_eq!(cache.layers[0].groups[0].color, Color32::from_rgb(70, 130, 180));
    }

    #[test]
    fn test_missing_close_is_not_drawn() {
        let ts = |day| {
            NaiveDate::from_ymd_opt(2021, 1, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        let series = OhlcvSeries::from_candles(vec![
            Candle::new(ts(1), 1.0, 1.0, 1.0, f64::NAN, f64::NAN),
            Candle::new(ts(2), 1.0, 1.0, 1.0, 32000.0, 150.0),
            Candle::new(ts(3), 1.0, 1.0, 1.0, 31000.0, 120.0),
        ]);
        let view = series.full_view();
        let cache = prepare_plot(&build_price_chart(&view), &view, 0).unwrap();
        assert_eq!(cache.layers[0].point_count(), 2);
        assert_eq!(cache.hover.len(), 2);
        assert!(cache.y_range.0.is_finite() && cache.y_range.1.is_finite());
        assert!(cache.y_range.0 < 31000.0 && cache.y_range.1 > 32000.0);
    }

    #[test]
    fn test_empty_view_has_nothing_to_draw() {
        let series = series();
        let view = SeriesView::empty(&series);
        assert!(prepare_plot(&build_price_chart(&view), &view, 0).is_none());
    }

    #[test]
    fn test_nearest_hover() {
        let rows = vec![
            HoverRow { x: 0.0, y: 0.0, text: "a".into() },
            HoverRow { x: 10.0, y: 100.0, text: "b".into() },
        ];
        assert_eq!(nearest_hover(&rows, 9.0, 90.0, 10.0, 100.0).unwrap().text, "b");
        assert_eq!(nearest_hover(&rows, 1.0, 5.0, 10.0, 100.0).unwrap().text, "a");
        assert!(nearest_hover(&[], 0.0, 0.0, 1.0, 1.0).is_none());
    }

    #[test]
    fn test_plot_view_reuses_cache() {
        let series = series();
        let view = series.full_view();
        let spec = build_price_chart(&view);
        let mut plot_view = PlotView::new();
        assert!(plot_view.prepare(&spec, &view).is_some());
        assert!(plot_view.prepare(&spec, &view).is_some());
        assert_eq!(plot_view.cache_misses(), 1);
        assert_eq!(plot_view.cache_hits(), 1);

        let narrower = view.head(2);
        plot_view.prepare(&build_price_chart(&narrower), &narrower);
        assert_eq!(plot_view.cache_misses(), 2);
    }
}
