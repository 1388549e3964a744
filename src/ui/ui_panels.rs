use chrono::NaiveDate;
use eframe::egui::{Slider, Ui};
use strum::IntoEnumIterator;

use crate::domain::date_selection::DateSelection;
use crate::models::chart_spec::ViewMode;
use crate::ui::app_state::FilterEvent;
use crate::ui::config::UI_TEXT;
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{colored_subsection_heading, section_heading, spaced_separator};
use crate::utils::time_utils::{add_days, days_between, format_date, parse_date};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Date filters: single-day toggle, start/end (or day) sliders, reset and reload.
pub struct FilterPanel {
    bounds: (NaiveDate, NaiveDate),
    selection: DateSelection,
    row_count: usize,
}

impl FilterPanel {
    pub fn new(bounds: (NaiveDate, NaiveDate), selection: DateSelection, row_count: usize) -> Self {
        Self {
            bounds,
            selection,
            row_count,
        }
    }

    /// Slider over whole-day offsets from the first date, labelled with real dates.
    fn render_date_slider(&self, ui: &mut Ui, label: &str, current: NaiveDate) -> Option<NaiveDate> {
        let (min, max) = self.bounds;
        let span = days_between(min, max).max(0) as u64;
        let mut offset = days_between(min, current).clamp(0, span as i64) as u64;

        let response = ui.add(
            Slider::new(&mut offset, 0..=span)
                .text(label)
                .custom_formatter(move |v, _| format_date(add_days(min, v.max(0.0) as u64)))
                .custom_parser(move |s| parse_date(s).ok().map(|d| days_between(min, d) as f64)),
        );

        if response.changed() {
            let picked = add_days(min, offset);
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("{} slider moved to {}", label, picked);
            }
            return Some(picked);
        }
        None
    }
}

impl Panel for FilterPanel {
    type Event = FilterEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.filters_heading);

        ui.label(colored_subsection_heading(UI_TEXT.period_label));
        let mut single = matches!(self.selection, DateSelection::Single(_));
        if ui.checkbox(&mut single, UI_TEXT.single_day_label).changed() {
            events.push(FilterEvent::SingleDay(single));
        }
        ui.add_space(5.0);

        match self.selection {
            DateSelection::Single(day) => {
                if let Some(day) = self.render_date_slider(ui, UI_TEXT.day_label, day) {
                    events.push(FilterEvent::Start(day));
                }
            }
            DateSelection::Range(start, end) => {
                if let Some(start) = self.render_date_slider(ui, UI_TEXT.start_date_label, start) {
                    events.push(FilterEvent::Start(start));
                }
                if let Some(end) = self.render_date_slider(ui, UI_TEXT.end_date_label, end) {
                    events.push(FilterEvent::End(end));
                }
            }
        }

        ui.add_space(5.0);
        let range = self.selection.normalize();
        ui.label_subdued(format!("{} {}", UI_TEXT.selected_days_prefix, self.row_count));
        ui.label_subdued(format!("{} {}", range.day_count(), UI_TEXT.calendar_days_suffix));
        if range.is_inverted() {
            ui.label_warning(UI_TEXT.inverted_range_warning);
        }

        spaced_separator(ui);
        ui.horizontal(|ui| {
            if ui.button(UI_TEXT.reset_button).clicked() {
                events.push(FilterEvent::ResetRange);
            }
            if ui.button(UI_TEXT.reload_button).clicked() {
                events.push(FilterEvent::Reload);
            }
        });

        ui.add_space(20.0);
        events
    }
}

/// Radio buttons choosing which volume/price chart is shown.
pub struct ViewModePanel {
    selected: ViewMode,
}

impl ViewModePanel {
    pub fn new(selected: ViewMode) -> Self {
        Self { selected }
    }
}

pub fn view_mode_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Scatter => UI_TEXT.view_mode_scatter,
        ViewMode::DualAxis => UI_TEXT.view_mode_dual_axis,
    }
}

impl Panel for ViewModePanel {
    type Event = ViewMode;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        ui.horizontal(|ui| {
            ui.label_subdued(UI_TEXT.view_mode_label);
            for mode in ViewMode::iter() {
                if ui
                    .radio_value(&mut self.selected, mode, view_mode_label(mode))
                    .clicked()
                {
                    events.push(self.selected);
                }
            }
        });
        events
    }
}
