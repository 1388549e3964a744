//! Declarative chart specifications.
//!
//! A `ChartSpec` says *what* to draw (marks, axis bindings, color encoding,
//! tooltip fields, scale resolution) for a given filtered view. It does no
//! drawing itself: the egui dashboard renders specs with `egui_plot`, and
//! `to_vega_lite` turns them into Vega-Lite documents for export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use strum_macros::EnumIter;

use crate::config::CHART;
use crate::domain::field::{Field, FieldType};
use crate::models::timeseries::SeriesView;

/// Which volume/price chart the user wants. Exactly one is shown.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    clap::ValueEnum,
)]
pub enum ViewMode {
    #[default]
    Scatter,
    DualAxis,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub enum Mark {
    Line { color: Option<&'static str> },
    Circle { size: f32, opacity: f32 },
    Bar { opacity: f32 },
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisBinding {
    pub field: Field,
    pub title: &'static str,
}

/// Continuous color scale driven by a field.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorEncoding {
    pub field: Field,
    pub legend: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LayerSpec {
    pub mark: Mark,
    pub x: AxisBinding,
    pub y: AxisBinding,
    pub color: Option<ColorEncoding>,
    pub tooltip: Vec<Field>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleResolution {
    Shared,
    Independent,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub layers: Vec<LayerSpec>,
    pub y_resolution: ScaleResolution,
    /// Pan/zoom enabled
    pub interactive: bool,
    pub row_count: usize,
    pub date_span: Option<(NaiveDate, NaiveDate)>,
}

impl ChartSpec {
    fn for_view(id: &'static str, title: &'static str, view: &SeriesView<'_>) -> Self {
        let date_span = view.first_date().zip(view.last_date());
        Self {
            id,
            title,
            layers: Vec::new(),
            y_resolution: ScaleResolution::Shared,
            interactive: true,
            row_count: view.len(),
            date_span,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Every field referenced by any layer, in schema order.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = self
            .layers
            .iter()
            .flat_map(|layer| {
                let mut used = vec![layer.x.field, layer.y.field];
                used.extend(layer.color.map(|c| c.field));
                used.extend(layer.tooltip.iter().copied());
                used
            })
            .collect();
        fields.sort_by_key(|f| *f as usize);
        fields.dedup();
        fields
    }

    /// Vega-Lite v5 document with the view's rows inlined.
    pub fn to_vega_lite(&self, view: &SeriesView<'_>) -> Value {
        let mut doc = Map::new();
        doc.insert("$schema".into(), json!(CHART.vega_lite_schema));
        doc.insert("title".into(), json!(self.title));
        doc.insert("width".into(), json!("container"));
        doc.insert("data".into(), json!({ "values": data_values(view) }));

        let params = json!([{
            "name": format!("{}_zoom", self.id),
            "select": "interval",
            "bind": "scales"
        }]);

        match self.layers.as_slice() {
            [single] => {
                if let Value::Object(layer) = single.to_vega_lite() {
                    doc.extend(layer);
                }
                if self.interactive {
                    doc.insert("params".into(), params);
                }
            }
            layers => {
                let mut rendered: Vec<Value> = layers.iter().map(|l| l.to_vega_lite()).collect();
                if self.interactive {
                    if let Some(Value::Object(first)) = rendered.first_mut() {
                        first.insert("params".into(), params);
                    }
                }
                doc.insert("layer".into(), Value::Array(rendered));
                if self.y_resolution == ScaleResolution::Independent {
                    doc.insert("resolve".into(), json!({ "scale": { "y": "independent" } }));
                }
            }
        }

        Value::Object(doc)
    }
}

impl LayerSpec {
    /// `[x, y]` pairs in plot space for this layer.
    pub fn points(&self, view: &SeriesView<'_>) -> Vec<[f64; 2]> {
        let xs = view.values(self.x.field);
        let ys = view.values(self.y.field);
        xs.into_iter().zip(ys).map(|(x, y)| [x, y]).collect()
    }

    fn to_vega_lite(&self) -> Value {
        let mut encoding = Map::new();
        encoding.insert("x".into(), self.x.to_vega_lite());
        encoding.insert("y".into(), self.y.to_vega_lite());
        if let Some(color) = self.color {
            let mut channel = field_channel(color.field);
            if !color.legend {
                channel.insert("legend".into(), Value::Null);
            }
            encoding.insert("color".into(), Value::Object(channel));
        }
        if !self.tooltip.is_empty() {
            let tooltip: Vec<Value> = self
                .tooltip
                .iter()
                .map(|f| Value::Object(field_channel(*f)))
                .collect();
            encoding.insert("tooltip".into(), Value::Array(tooltip));
        }

        json!({
            "mark": self.mark.to_vega_lite(),
            "encoding": encoding,
        })
    }
}

impl AxisBinding {
    fn to_vega_lite(&self) -> Value {
        let mut channel = field_channel(self.field);
        channel.insert("title".into(), json!(self.title));
        Value::Object(channel)
    }
}

impl Mark {
    fn to_vega_lite(&self) -> Value {
        match self {
            Mark::Line { color: Some(color) } => json!({ "type": "line", "color": color }),
            Mark::Line { color: None } => json!({ "type": "line" }),
            Mark::Circle { size, opacity } => {
                json!({ "type": "circle", "size": size, "opacity": opacity })
            }
            Mark::Bar { opacity } => json!({ "type": "bar", "opacity": opacity }),
        }
    }
}

fn field_channel(field: Field) -> Map<String, Value> {
    let kind = match field.data_type() {
        FieldType::Temporal => "temporal",
        FieldType::Quantitative => "quantitative",
    };
    let mut channel = Map::new();
    channel.insert("field".into(), json!(field.name()));
    channel.insert("type".into(), json!(kind));
    channel
}

fn data_values(view: &SeriesView<'_>) -> Vec<Value> {
    view.candles()
        .map(|c| {
            let mut row = Map::new();
            row.insert(
                Field::Timestamp.name().into(),
                json!(c.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()),
            );
            for field in Field::VALUE_COLUMNS {
                row.insert(field.name().into(), json!(c.value(field)));
            }
            Value::Object(row)
        })
        .collect()
}

// ============================================================================
// Builders
// ============================================================================

fn date_axis() -> AxisBinding {
    AxisBinding {
        field: Field::Timestamp,
        title: CHART.titles.date_axis,
    }
}

/// Close over time, tooltip with the full record.
pub fn build_price_chart(view: &SeriesView<'_>) -> ChartSpec {
    let mut spec = ChartSpec::for_view("price", CHART.titles.price_chart, view);
    spec.layers.push(LayerSpec {
        mark: Mark::Line { color: None },
        x: date_axis(),
        y: AxisBinding {
            field: Field::Close,
            title: CHART.titles.close_axis,
        },
        color: None,
        tooltip: vec![
            Field::Timestamp,
            Field::Open,
            Field::High,
            Field::Low,
            Field::Close,
            Field::Volume,
        ],
    });
    spec
}

/// Volume vs Close, colored by Close.
pub fn build_scatter(view: &SeriesView<'_>) -> ChartSpec {
    let mut spec = ChartSpec::for_view("scatter", CHART.titles.scatter_chart, view);
    spec.layers.push(LayerSpec {
        mark: Mark::Circle {
            size: CHART.marks.scatter_point_size,
            opacity: CHART.marks.scatter_opacity,
        },
        x: AxisBinding {
            field: Field::Volume,
            title: CHART.titles.volume_axis,
        },
        y: AxisBinding {
            field: Field::Close,
            title: CHART.titles.close_axis,
        },
        color: Some(ColorEncoding {
            field: Field::Close,
            legend: false,
        }),
        tooltip: vec![Field::Timestamp, Field::Close, Field::Volume],
    });
    spec
}

/// Close line and Volume bars on one time axis with independent y scales.
pub fn build_dual_axis(view: &SeriesView<'_>) -> ChartSpec {
    let mut spec = ChartSpec::for_view("dual_axis", CHART.titles.dual_axis_chart, view);
    spec.y_resolution = ScaleResolution::Independent;
    spec.layers.push(LayerSpec {
        mark: Mark::Line {
            color: Some(CHART.marks.price_line_color),
        },
        x: date_axis(),
        y: AxisBinding {
            field: Field::Close,
            title: CHART.titles.dual_price_axis,
        },
        color: None,
        tooltip: Vec::new(),
    });
    spec.layers.push(LayerSpec {
        mark: Mark::Bar {
            opacity: CHART.marks.volume_bar_opacity,
        },
        x: date_axis(),
        y: AxisBinding {
            field: Field::Volume,
            title: CHART.titles.dual_volume_axis,
        },
        color: None,
        tooltip: Vec::new(),
    });
    spec
}

pub fn build_volume_price_chart(view: &SeriesView<'_>, mode: ViewMode) -> ChartSpec {
    match mode {
        ViewMode::Scatter => build_scatter(view),
        ViewMode::DualAxis => build_dual_axis(view),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candle::Candle;
    use crate::models::timeseries::{OhlcvSeries, select_range};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scenario_series() -> OhlcvSeries {
        let rows = [(1, 30000.0, 100.0), (2, 32000.0, 150.0), (3, 31000.0, 120.0)]
            .into_iter()
            .map(|(day, close, volume)| {
                Candle::new(
                    date(2021, 1, day).and_hms_opt(0, 0, 0).unwrap(),
                    close - 500.0,
                    close + 800.0,
                    close - 900.0,
                    close,
                    volume,
                )
            })
            .collect();
        OhlcvSeries::from_candles(rows)
    }

    #[test]
    fn test_price_chart_bindings() {
        let series = scenario_series();
        let spec = build_price_chart(&series.full_view());
        assert_eq!(spec.layers.len(), 1);
        let layer = &spec.layers[0];
        assert_eq!(layer.mark, Mark::Line { color: None });
        assert_eq!(layer.x.field, Field::Timestamp);
        assert_eq!(layer.y.field, Field::Close);
        assert_eq!(layer.tooltip.len(), 6);
        assert_eq!(spec.row_count, 3);
        assert_eq!(spec.date_span, Some((date(2021, 1, 1), date(2021, 1, 3))));
        assert!(spec.interactive);
    }

    #[test]
    fn test_scatter_bindings() {
        let series = scenario_series();
        let spec = build_scatter(&series.full_view());
        let layer = &spec.layers[0];
        assert!(matches!(layer.mark, Mark::Circle { .. }));
        assert_eq!(layer.x.field, Field::Volume);
        assert_eq!(layer.y.field, Field::Close);
        assert_eq!(
            layer.color,
            Some(ColorEncoding {
                field: Field::Close,
                legend: false
            })
        );
        assert_eq!(
            layer.tooltip,
            vec![Field::Timestamp, Field::Close, Field::Volume]
        );
        assert_eq!(
            layer.points(&series.full_view())[1],
            [150.0, 32000.0]
        );
    }

    #[test]
    fn test_dual_axis_has_independent_scales() {
        let series = scenario_series();
        let spec = build_dual_axis(&series.full_view());
        assert_eq!(spec.y_resolution, ScaleResolution::Independent);
        assert_eq!(spec.layers.len(), 2);
        assert!(spec.layers.iter().all(|l| l.x.field == Field::Timestamp));
        assert!(matches!(spec.layers[0].mark, Mark::Line { color: Some(_) }));
        assert_eq!(spec.layers[0].y.field, Field::Close);
        assert!(matches!(spec.layers[1].mark, Mark::Bar { .. }));
        assert_eq!(spec.layers[1].y.field, Field::Volume);
    }

    #[test]
    fn test_mode_selects_exactly_one_chart() {
        let series = scenario_series();
        let view = series.full_view();
        assert_eq!(
            build_volume_price_chart(&view, ViewMode::Scatter),
            build_scatter(&view)
        );
        assert_eq!(
            build_volume_price_chart(&view, ViewMode::DualAxis),
            build_dual_axis(&view)
        );
    }

    #[test]
    fn test_empty_view_builds_empty_specs() {
        let series = scenario_series();
        let view = select_range(&series, date(2021, 1, 5), date(2021, 1, 10));
        let spec = build_dual_axis(&view);
        assert!(spec.is_empty());
        assert_eq!(spec.date_span, None);
        assert!(spec.layers[0].points(&view).is_empty());

        let doc = spec.to_vega_lite(&view);
        assert_eq!(doc["data"]["values"].as_array().map(|v| v.len()), Some(0));
    }

    #[test]
    fn test_fields_are_deduplicated_in_schema_order() {
        let series = scenario_series();
        let spec = build_scatter(&series.full_view());
        assert_eq!(
            spec.fields(),
            vec![Field::Timestamp, Field::Close, Field::Volume]
        );
    }

    #[test]
    fn test_vega_lite_single_layer() {
        let series = scenario_series();
        let view = select_range(&series, date(2021, 1, 1), date(2021, 1, 2));
        let doc = build_scatter(&view).to_vega_lite(&view);

        assert_eq!(doc["mark"]["type"], "circle");
        assert_eq!(doc["encoding"]["x"]["field"], "Volume");
        assert_eq!(doc["encoding"]["y"]["type"], "quantitative");
        assert!(doc["encoding"]["color"]["legend"].is_null());
        assert_eq!(doc["encoding"]["tooltip"][0]["type"], "temporal");
        assert_eq!(doc["params"][0]["bind"], "scales");

        let values = doc["data"]["values"].as_array().unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["Timestamp"], "2021-01-01T00:00:00");
        assert_eq!(values[1]["Close"], 32000.0);
    }

    #[test]
    fn test_vega_lite_layered_resolves_independent_y() {
        let series = scenario_series();
        let view = series.full_view();
        let doc = build_dual_axis(&view).to_vega_lite(&view);

        let layers = doc["layer"].as_array().unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0]["mark"]["color"], "steelblue");
        assert_eq!(layers[1]["mark"]["type"], "bar");
        assert_eq!(doc["resolve"]["scale"]["y"], "independent");
        assert!(layers[0].get("params").is_some());
    }
}
