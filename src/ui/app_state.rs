//! Egui-free dashboard state: the current selection and everything derived
//! from it. The app owns one of these per successfully loaded series.

use std::sync::Arc;

use chrono::NaiveDate;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::LoadError;
use crate::domain::date_selection::{DateRange, DateSelection};
use crate::models::chart_spec::{ChartSpec, ViewMode, build_price_chart, build_volume_price_chart};
use crate::models::summary::{SummaryStats, summarize};
use crate::models::timeseries::{OhlcvSeries, SeriesView, select_range};

/// User input coming out of the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEvent {
    SingleDay(bool),
    Start(NaiveDate),
    End(NaiveDate),
    ResetRange,
    Reload,
}

/// Everything recomputed when the selection or the view mode changes.
#[derive(Debug, Clone)]
pub struct DerivedState {
    pub range: DateRange,
    pub view_mode: ViewMode,
    pub stats: SummaryStats,
    pub price_chart: ChartSpec,
    pub volume_price_chart: ChartSpec,
}

pub struct DashboardState {
    series: Arc<OhlcvSeries>,
    bounds: (NaiveDate, NaiveDate),
    selection: DateSelection,
    view_mode: ViewMode,
    derived: Option<DerivedState>,
    recompute_count: usize,
}

impl DashboardState {
    /// Starts on the full date span unless `initial` narrows it.
    pub fn new(
        series: Arc<OhlcvSeries>,
        initial: Option<DateRange>,
        view_mode: ViewMode,
    ) -> Result<Self, LoadError> {
        let bounds = series.date_bounds().ok_or(LoadError::NoRows)?;
        let range = initial
            .map(|r| r.clamp_to(bounds))
            .unwrap_or(DateRange::new(bounds.0, bounds.1));

        let mut state = Self {
            series,
            bounds,
            selection: DateSelection::from(range),
            view_mode,
            derived: None,
            recompute_count: 0,
        };
        state.refresh();
        Ok(state)
    }

    pub fn series(&self) -> &Arc<OhlcvSeries> {
        &self.series
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        self.bounds
    }

    pub fn selection(&self) -> DateSelection {
        self.selection
    }

    pub fn range(&self) -> DateRange {
        self.selection.normalize()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn recompute_count(&self) -> usize {
        self.recompute_count
    }

    /// The filtered rows for the current selection.
    pub fn view(&self) -> SeriesView<'_> {
        let range = self.range();
        select_range(&self.series, range.start, range.end)
    }

    /// Stores a new selection, both ends clamped to the series bounds.
    pub fn set_selection(&mut self, selection: DateSelection) {
        self.selection = match selection {
            DateSelection::Single(day) => {
                DateSelection::Single(day.clamp(self.bounds.0, self.bounds.1))
            }
            DateSelection::Range(start, end) => {
                let clamped = DateRange::new(start, end).clamp_to(self.bounds);
                DateSelection::Range(clamped.start, clamped.end)
            }
        };
        self.refresh();
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
        self.refresh();
    }

    /// Applies a filter event. `Reload` is not handled here (the app owns
    /// the cache) and is reported back as `false`.
    pub fn apply(&mut self, event: FilterEvent) -> bool {
        let current = self.range();
        let next = match event {
            FilterEvent::SingleDay(true) => DateSelection::Single(current.start),
            FilterEvent::SingleDay(false) => DateSelection::Range(current.start, current.start),
            FilterEvent::Start(day) => match self.selection {
                DateSelection::Single(_) => DateSelection::Single(day),
                DateSelection::Range(_, end) => DateSelection::Range(day, end),
            },
            FilterEvent::End(day) => match self.selection {
                DateSelection::Single(_) => DateSelection::Single(day),
                DateSelection::Range(start, _) => DateSelection::Range(start, day),
            },
            FilterEvent::ResetRange => DateSelection::Range(self.bounds.0, self.bounds.1),
            FilterEvent::Reload => return false,
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("[filter] {:?} -> {:?}", event, next);
        }

        self.set_selection(next);
        true
    }

    /// Rebuilds stats and chart specs if the range or mode moved since last time.
    /// Returns whether anything was recomputed.
    pub fn refresh(&mut self) -> bool {
        let range = self.range();
        let up_to_date = self
            .derived
            .as_ref()
            .map(|d| d.range == range && d.view_mode == self.view_mode)
            .unwrap_or(false);
        if up_to_date {
            return false;
        }

        let view = select_range(&self.series, range.start, range.end);
        let derived = DerivedState {
            range,
            view_mode: self.view_mode,
            stats: summarize(&view),
            price_chart: build_price_chart(&view),
            volume_price_chart: build_volume_price_chart(&view, self.view_mode),
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_recompute_events {
            log::info!(
                "[derive] {} rows for {} ({:?})",
                derived.stats.row_count,
                range,
                self.view_mode
            );
        }

        self.derived = Some(derived);
        self.recompute_count += 1;
        true
    }

    pub fn derived(&self) -> Option<&DerivedState> {
        self.derived.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candle::Candle;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scenario_state() -> DashboardState {
        let rows = [(1, 30000.0, 100.0), (2, 32000.0, 150.0), (3, 31000.0, 120.0)]
            .into_iter()
            .map(|(day, close, volume)| {
                Candle::new(
                    date(2021, 1, day).and_hms_opt(0, 0, 0).unwrap(),
                    close,
                    close,
                    close,
                    close,
                    volume,
                )
            })
            .collect();
        let series = Arc::new(OhlcvSeries::from_candles(rows));
        DashboardState::new(series, None, ViewMode::Scatter).unwrap()
    }

    #[test]
    fn test_starts_on_full_period() {
        let state = scenario_state();
        assert_eq!(state.range(), DateRange::new(date(2021, 1, 1), date(2021, 1, 3)));
        let stats = state.derived().unwrap().stats;
        assert_eq!(stats.row_count, 3);
        assert_eq!(stats.total_volume, 370.0);
    }

    #[test]
    fn test_end_event_narrows_selection() {
        let mut state = scenario_state();
        assert!(state.apply(FilterEvent::End(date(2021, 1, 2))));
        let stats = state.derived().unwrap().stats;
        assert_eq!(stats.row_count, 2);
        assert_eq!(stats.min_close, Some(30000.0));
        assert_eq!(stats.max_close, Some(32000.0));
        assert_eq!(stats.total_volume, 250.0);
    }

    #[test]
    fn test_single_day_toggle() {
        let mut state = scenario_state();
        state.apply(FilterEvent::Start(date(2021, 1, 2)));
        state.apply(FilterEvent::SingleDay(true));
        assert_eq!(state.selection(), DateSelection::Single(date(2021, 1, 2)));
        assert_eq!(state.view().len(), 1);

        state.apply(FilterEvent::End(date(2021, 1, 3)));
        assert_eq!(state.selection(), DateSelection::Single(date(2021, 1, 3)));

        state.apply(FilterEvent::SingleDay(false));
        assert_eq!(
            state.selection(),
            DateSelection::Range(date(2021, 1, 3), date(2021, 1, 3))
        );
    }

    #[test]
    fn test_inverted_selection_yields_empty_stats() {
        let mut state = scenario_state();
        state.apply(FilterEvent::Start(date(2021, 1, 3)));
        state.apply(FilterEvent::End(date(2021, 1, 1)));
        let derived = state.derived().unwrap();
        assert!(derived.stats.is_empty());
        assert_eq!(derived.stats.min_close, None);
        assert!(derived.price_chart.is_empty());
    }

    #[test]
    fn test_out_of_bounds_input_is_clamped() {
        let mut state = scenario_state();
        state.set_selection(DateSelection::Range(date(2020, 6, 1), date(2022, 1, 1)));
        assert_eq!(state.range(), DateRange::new(date(2021, 1, 1), date(2021, 1, 3)));
    }

    #[test]
    fn test_recompute_only_on_change() {
        let mut state = scenario_state();
        let baseline = state.recompute_count();
        assert!(!state.refresh());
        state.set_view_mode(ViewMode::Scatter);
        assert_eq!(state.recompute_count(), baseline);

        state.set_view_mode(ViewMode::DualAxis);
        assert_eq!(state.recompute_count(), baseline + 1);
        assert_eq!(state.derived().unwrap().volume_price_chart.layers.len(), 2);
    }

    #[test]
    fn test_reset_and_reload_events() {
        let mut state = scenario_state();
        state.apply(FilterEvent::Start(date(2021, 1, 3)));
        assert!(state.apply(FilterEvent::ResetRange));
        assert_eq!(state.view().len(), 3);
        assert!(!state.apply(FilterEvent::Reload));
    }

    #[test]
    fn test_initial_range_is_clamped() {
        let series = scenario_state().series().clone();
        let state = DashboardState::new(
            series,
            Some(DateRange::new(date(2021, 1, 2), date(2021, 12, 31))),
            ViewMode::DualAxis,
        )
        .unwrap();
        assert_eq!(state.range(), DateRange::new(date(2021, 1, 2), date(2021, 1, 3)));
        assert_eq!(state.view_mode(), ViewMode::DualAxis);
    }
}
