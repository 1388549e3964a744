use eframe::{Frame, egui};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::data::{LoadError, SeriesCache};
use crate::domain::date_selection::{DateRange, DateSelection};
use crate::models::chart_spec::ViewMode;
use crate::ui::app_state::DashboardState;
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::setup_custom_visuals;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Where the dashboard starts: file, optional CLI range, chart mode.
#[derive(Debug, Clone)]
pub struct StartupOptions {
    pub data_path: PathBuf,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub view_mode: ViewMode,
}

impl StartupOptions {
    /// Requested range with missing ends filled from the series bounds.
    pub fn initial_range(&self, bounds: (NaiveDate, NaiveDate)) -> Option<DateRange> {
        if self.start.is_none() && self.end.is_none() {
            return None;
        }
        Some(DateRange::new(
            self.start.unwrap_or(bounds.0),
            self.end.unwrap_or(bounds.1),
        ))
    }
}

pub struct ExplorerApp {
    pub(super) options: StartupOptions,
    pub(super) series_cache: SeriesCache,
    pub(super) dashboard: Result<DashboardState, LoadError>,
    pub(super) plot_view: PlotView,
}

impl ExplorerApp {
    pub fn new(options: StartupOptions) -> Self {
        let mut series_cache = SeriesCache::new();
        let dashboard = Self::build_dashboard(&mut series_cache, &options, None, options.view_mode);

        Self {
            options,
            series_cache,
            dashboard,
            plot_view: PlotView::new(),
        }
    }

    fn build_dashboard(
        cache: &mut SeriesCache,
        options: &StartupOptions,
        keep: Option<DateSelection>,
        view_mode: ViewMode,
    ) -> Result<DashboardState, LoadError> {
        let series = cache.get_or_load(&options.data_path).inspect_err(|e| {
            log::error!("Failed to load {:?}: {}", options.data_path, e);
        })?;

        let bounds = series.date_bounds().ok_or(LoadError::NoRows)?;
        let mut state = DashboardState::new(series, options.initial_range(bounds), view_mode)?;
        if let Some(selection) = keep {
            state.set_selection(selection);
        }
        Ok(state)
    }

    pub fn data_path(&self) -> &Path {
        &self.options.data_path
    }

    pub fn dashboard(&self) -> Result<&DashboardState, &LoadError> {
        self.dashboard.as_ref()
    }

    /// Drops the cached series and reads the file again. The current
    /// selection and view mode survive if the new file still loads.
    pub fn reload(&mut self) {
        let (keep, view_mode) = match &self.dashboard {
            Ok(state) => (Some(state.selection()), state.view_mode()),
            Err(_) => (None, self.options.view_mode),
        };

        self.series_cache.invalidate(&self.options.data_path);
        self.plot_view.clear_cache();
        self.dashboard =
            Self::build_dashboard(&mut self.series_cache, &self.options, keep, view_mode);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!(
                "Reloaded {:?}: {}",
                self.options.data_path,
                match &self.dashboard {
                    Ok(state) => format!("{} rows", state.series().len()),
                    Err(e) => e.to_string(),
                }
            );
        }
    }
}

impl eframe::App for ExplorerApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.series_cache.clear();
        self.plot_view.clear_cache();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
    }
}
