use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use btc_explorer::data::SeriesCache;
use btc_explorer::{Cli, build_report};

/// Writes the summary and Vega-Lite chart documents for a date range as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct ExportCli {
    #[command(flatten)]
    input: Cli,

    /// Output file (stdout when absent)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = ExportCli::parse();
    export_charts(&args)
}

fn export_charts(args: &ExportCli) -> Result<()> {
    let data_path = &args.input.data;
    let mut cache = SeriesCache::new();
    let series = cache
        .get_or_load(data_path)
        .with_context(|| format!("Failed to load {:?}", data_path))?;

    let range = series
        .date_bounds()
        .and_then(|bounds| args.input.startup_options().initial_range(bounds));

    let report = build_report(data_path, &series, range, args.input.mode)
        .with_context(|| format!("Failed to build charts for {:?}", data_path))?;

    log::info!(
        "{} rows selected for {} ({:?})",
        report.summary.row_count,
        report.range,
        report.view_mode
    );

    match &args.out {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writer.flush()?;
            println!("✅ Charts written to {:?}", path);
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
