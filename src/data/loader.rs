use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::error::LoadError;
use crate::domain::candle::Candle;
use crate::domain::field::Field;
use crate::models::timeseries::OhlcvSeries;
use crate::utils::time_utils::format_date;

/// Column positions of the normalized schema inside a particular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub timestamp: usize,
    pub open: usize,
    pub high: usize,
    pub low: usize,
    pub close: usize,
    pub volume: usize,
    /// The timestamp came from an unnamed leading column (a saved index)
    pub timestamp_from_unnamed: bool,
}

impl ColumnLayout {
    pub fn index(&self, field: Field) -> usize {
        match field {
            Field::Timestamp => self.timestamp,
            Field::Open => self.open,
            Field::High => self.high,
            Field::Low => self.low,
            Field::Close => self.close,
            Field::Volume => self.volume,
        }
    }
}

/// A header cell left blank, or pandas' placeholder for a nameless index.
fn is_unnamed_header(name: &str) -> bool {
    name.is_empty() || name.starts_with("Unnamed:")
}

/// Maps raw headers onto `{Timestamp, Open, High, Low, Close, Volume}`.
///
/// `Timestamp` is taken by name; failing that, an unnamed first column is
/// adopted as the timestamp. Value columns are matched by exact name.
pub fn normalize_columns<'a>(
    headers: impl IntoIterator<Item = &'a str>,
) -> Result<ColumnLayout, LoadError> {
    let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
    let position = |name: &str| headers.iter().position(|h| *h == name);

    let (timestamp, timestamp_from_unnamed) = match position(Field::Timestamp.name()) {
        Some(idx) => (idx, false),
        None => match headers.first() {
            Some(first) if is_unnamed_header(first) => (0, true),
            _ => {
                return Err(LoadError::Schema(format!(
                    "no '{}' column and no unnamed first column (headers: {})",
                    Field::Timestamp.name(),
                    headers.join(", ")
                )));
            }
        },
    };

    let missing: Vec<&str> = Field::VALUE_COLUMNS
        .iter()
        .map(|f| f.name())
        .filter(|name| position(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::Schema(format!(
            "missing column(s): {}",
            missing.join(", ")
        )));
    }

    // Checked just above
    let index_of = |field: Field| position(field.name()).unwrap_or_default();

    Ok(ColumnLayout {
        timestamp,
        open: index_of(Field::Open),
        high: index_of(Field::High),
        low: index_of(Field::Low),
        close: index_of(Field::Close),
        volume: index_of(Field::Volume),
        timestamp_from_unnamed,
    })
}

/// Accepts RFC 3339 (the written wall-clock time, offset dropped), ISO-like
/// date-times with a space or `T` separator, plain dates, and integer Unix
/// epoch seconds.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        // Keep the local calendar date the file was written in
        return Some(dt.naive_local());
    }

    const DATETIME_FORMATS: [&str; 5] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }

    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d.and_time(chrono::NaiveTime::MIN));
        }
    }

    text.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.naive_utc())
}

/// Cells read as a missing value rather than a parse failure.
const MISSING_VALUES: [&str; 6] = ["", "NA", "N/A", "NaN", "nan", "null"];

/// Parses a price or volume cell. Missing cells become `NaN` and are skipped
/// by the aggregates.
fn parse_value(record: &StringRecord, layout: &ColumnLayout, field: Field, row: usize) -> Result<f64, LoadError> {
    let raw = record.get(layout.index(field)).unwrap_or_default();
    if MISSING_VALUES.contains(&raw) {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
        row,
        column: field.name(),
        value: raw.to_string(),
    })
}

/// Reads a whole series from any CSV source. No partial results: the first
/// bad row aborts.
pub fn read_series<R: Read>(source: R) -> Result<OhlcvSeries, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let layout = normalize_columns(headers.iter())?;
    if layout.timestamp_from_unnamed {
        log::info!(
            "Using unnamed first column as '{}'",
            Field::Timestamp.name()
        );
    }

    let mut candles = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;

        let raw_ts = record.get(layout.timestamp).unwrap_or_default();
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| LoadError::Parse {
            row,
            value: raw_ts.to_string(),
        })?;

        candles.push(Candle::new(
            timestamp,
            parse_value(&record, &layout, Field::Open, row)?,
            parse_value(&record, &layout, Field::High, row)?,
            parse_value(&record, &layout, Field::Low, row)?,
            parse_value(&record, &layout, Field::Close, row)?,
            parse_value(&record, &layout, Field::Volume, row)?,
        ));
    }

    if candles.is_empty() {
        return Err(LoadError::NoRows);
    }

    Ok(OhlcvSeries::from_candles(candles))
}

/// Loads `path`, normalizes its columns and returns the series sorted by time.
pub fn load_series(path: &Path) -> Result<OhlcvSeries, LoadError> {
    #[cfg(debug_assertions)]
    let start_time = DEBUG_FLAGS.print_load_timing.then(|| {
        log::info!("Reading series from {:?}...", path);
        std::time::Instant::now()
    });

    let file = File::open(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let series = read_series(BufReader::new(file))?;

    if let Some((first, last)) = series.date_bounds() {
        log::info!(
            "Loaded {} rows from {} ({} to {})",
            series.len(),
            path.display(),
            format_date(first),
            format_date(last)
        );
    }

    #[cfg(debug_assertions)]
    if let Some(start) = start_time {
        log::info!("✅ Series parsed in {:.3}s", start.elapsed().as_secs_f64());
    }

    Ok(series)
}
