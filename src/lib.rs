#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod ui;
pub mod utils;

use std::path::PathBuf;

use chrono::NaiveDate;

// Re-export commonly used types
pub use data::{LoadError, SeriesCache, load_series};
pub use domain::{Candle, DateRange, DateSelection, Field};
pub use models::{ChartReport, OhlcvSeries, SeriesView, SummaryStats, ViewMode, build_report};
pub use ui::{ExplorerApp, StartupOptions};

use config::{DASHBOARD, PERSISTENCE};
use utils::time_utils::parse_date;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Daily OHLCV CSV file
    #[arg(long, default_value = PERSISTENCE.data.default_path)]
    pub data: PathBuf,

    /// First day of the initial selection (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Last day of the initial selection (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Volume/price chart to show
    #[arg(long, value_enum, default_value_t = DASHBOARD.default_view_mode)]
    pub mode: ViewMode,
}

impl Cli {
    pub fn startup_options(&self) -> StartupOptions {
        StartupOptions {
            data_path: self.data.clone(),
            start: self.start,
            end: self.end,
            view_mode: self.mode,
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, options: StartupOptions) -> Box<dyn eframe::App> {
    ui::utils::setup_custom_visuals(&cc.egui_ctx);
    Box::new(ExplorerApp::new(options))
}
