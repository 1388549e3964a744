use eframe::egui::{
    CentralPanel, CollapsingHeader, Context, Frame, Grid, RichText, ScrollArea, SidePanel,
    TopBottomPanel, Ui,
};
use strum::IntoEnumIterator;

use crate::config::DASHBOARD;
use crate::data::LoadError;
use crate::domain::candle::CandleType;
use crate::domain::date_selection::DateRange;
use crate::domain::field::Field;
use crate::models::chart_spec::ViewMode;
use crate::models::summary::SummaryStats;
use crate::models::timeseries::SeriesView;
use crate::ui::app_state::DashboardState;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{FilterPanel, Panel, ViewModePanel};
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::{
    colored_subsection_heading, format_field_value, format_usd, format_volume, section_heading,
    spaced_separator,
};

use super::app::ExplorerApp;

impl ExplorerApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new().fill(UI_CONFIG.colors.side_panel);
        let mut reload_requested = false;

        SidePanel::left("filter_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| match &mut self.dashboard {
                Ok(state) => {
                    let mut panel =
                        FilterPanel::new(state.bounds(), state.selection(), state.view().len());
                    for event in panel.render(ui) {
                        if !state.apply(event) {
                            reload_requested = true;
                        }
                    }
                }
                Err(_) => {
                    section_heading(ui, UI_TEXT.filters_heading);
                    if ui.button(UI_TEXT.reload_button).clicked() {
                        reload_requested = true;
                    }
                }
            });

        if reload_requested {
            self.reload();
        }
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new().fill(UI_CONFIG.colors.central_panel);
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ui.add_space(10.0);
                ui.heading(
                    RichText::new(UI_TEXT.app_title)
                        .strong()
                        .color(UI_CONFIG.colors.heading),
                );
                ui.label_subheader(UI_TEXT.app_subtitle);
                ui.label_subdued(UI_TEXT.app_description);
                spaced_separator(ui);

                let state = match &mut self.dashboard {
                    Ok(state) => state,
                    Err(e) => {
                        render_load_error(ui, e);
                        return;
                    }
                };

                let mut mode_events = Vec::new();
                ScrollArea::vertical()
                    .id_salt("dashboard_scroll")
                    .show(ui, |ui| {
                        mode_events = render_dashboard(ui, state, &mut self.plot_view);
                    });

                if let Some(mode) = mode_events.last() {
                    state.set_view_mode(*mode);
                    ui.ctx().request_repaint();
                }
            });
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.metric(
                    UI_TEXT.status_file_label,
                    &self.options.data_path.display().to_string(),
                    UI_CONFIG.colors.label,
                );
                ui.separator();
                match &self.dashboard {
                    Ok(state) => {
                        let (first, last) = state.bounds();
                        ui.metric(
                            UI_TEXT.status_rows_label,
                            &state.series().len().to_string(),
                            UI_CONFIG.colors.label,
                        );
                        ui.separator();
                        ui.metric(
                            UI_TEXT.status_span_label,
                            &DateRange::new(first, last).to_string(),
                            UI_CONFIG.colors.label,
                        );
                    }
                    Err(e) => ui.label_error(e.to_string()),
                }
            });
        });
    }
}

fn render_load_error(ui: &mut Ui, error: &LoadError) {
    ui.label_error(UI_TEXT.load_failed_heading);
    ui.label_error(error.to_string());
    ui.add_space(5.0);
    ui.label_subdued(UI_TEXT.load_failed_hint);
}

/// Metrics, both charts and the preview table. Returns view mode changes.
fn render_dashboard(ui: &mut Ui, state: &DashboardState, plot_view: &mut PlotView) -> Vec<ViewMode> {
    let Some(derived) = state.derived() else {
        return Vec::new();
    };
    let view = state.view();

    section_heading(ui, UI_TEXT.stats_heading);
    ui.columns(3, |columns| {
        for (column, (label, value)) in columns.iter_mut().zip(metric_values(&derived.stats)) {
            column.metric_card(label, &value);
        }
    });
    spaced_separator(ui);

    ui.label(colored_subsection_heading(UI_TEXT.price_chart_heading));
    plot_view.show_chart(ui, &derived.price_chart, &view);
    spaced_separator(ui);

    ui.label(colored_subsection_heading(UI_TEXT.volume_price_heading));
    let events = ViewModePanel::new(state.view_mode()).render(ui);
    plot_view.show_chart(ui, &derived.volume_price_chart, &view);
    spaced_separator(ui);

    render_preview(ui, &view);
    events
}

/// Label/value pairs for the three headline metrics.
pub fn metric_values(stats: &SummaryStats) -> [(&'static str, String); 3] {
    let price = |value: Option<f64>| {
        value
            .map(format_usd)
            .unwrap_or_else(|| UI_TEXT.no_data.to_string())
    };
    [
        (UI_TEXT.metric_min_close, price(stats.min_close)),
        (UI_TEXT.metric_max_close, price(stats.max_close)),
        (UI_TEXT.metric_total_volume, format_volume(stats.total_volume)),
    ]
}

fn render_preview(ui: &mut Ui, view: &SeriesView<'_>) {
    CollapsingHeader::new(UI_TEXT.preview_heading)
        .default_open(false)
        .show(ui, |ui| {
            let limit = DASHBOARD.preview_row_limit;
            if view.len() > limit {
                ui.label_subdued(format!(
                    "{} {} / {}",
                    UI_TEXT.preview_truncated_prefix,
                    limit,
                    view.len()
                ));
            }

            ScrollArea::both()
                .id_salt("preview_table")
                .max_height(DASHBOARD.preview_table_height)
                .show(ui, |ui| {
                    Grid::new("preview_grid")
                        .striped(true)
                        .num_columns(Field::iter().count())
                        .show(ui, |ui| {
                            for field in Field::iter() {
                                ui.label(RichText::new(field.name()).strong());
                            }
                            ui.end_row();

                            for candle in view.head(limit).candles() {
                                for field in Field::iter() {
                                    let text = format_field_value(&candle, field);
                                    if field == Field::Close {
                                        let color = match candle.get_type() {
                                            CandleType::Bullish => UI_CONFIG.colors.bullish,
                                            CandleType::Bearish => UI_CONFIG.colors.bearish,
                                        };
                                        ui.label(RichText::new(text).color(color));
                                    } else {
                                        ui.label(text);
                                    }
                                }
                                ui.end_row();
                            }
                        });
                });
        });
}
