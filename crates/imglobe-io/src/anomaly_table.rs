//! Gridded anomaly table reader
//!
//! Parses the delimited anomaly table into an
//! [`AnomalyDataset`](imglobe_core::AnomalyDataset): one grid cell per data
//! row, one series entry per year column, with global extrema and year
//! bounds accumulated along the way.

use csv::ReaderBuilder;
use imglobe_core::{AnomalyDataset, AnomalyGrid, AnomalySeries, GeoCoord, GridStats};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while ingesting an anomaly table
#[derive(Debug, Error)]
pub enum IoError {
    /// Source file does not exist
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// The leading header columns are not the expected `lat`/`lon` pair
    #[error("header mismatch: expected leading \"lat\",\"lon\" columns, found \"{first}\",\"{second}\"")]
    HeaderMismatch { first: String, second: String },

    /// The header names no year columns at all
    #[error("header carries no year columns")]
    NoYearColumns,

    /// A header column past `lat`/`lon` is not an integer year
    #[error("invalid year column label \"{label}\"")]
    InvalidYearColumn { label: String },

    /// A data row carries an unparseable field
    #[error("invalid value at line {line}: {message}")]
    InvalidRow { line: usize, message: String },

    /// Structural CSV failure (quoting, record length, encoding)
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ingestion operations
pub type IoResult<T> = Result<T, IoError>;

/// Load an anomaly table from a file path
///
/// A missing or unreadable file aborts the load; the owning application
/// treats that as fatal (there is nothing to render without the data), but
/// the policy decision stays with the caller.
pub fn load_anomaly_table(path: impl AsRef<Path>) -> IoResult<AnomalyDataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let dataset = read_anomaly_table(BufReader::new(file))?;

    info!(path = %path.display(), "anomaly table loaded");
    Ok(dataset)
}

/// Read an anomaly table from any byte source
///
/// The header row must start with the literal columns `lat` and `lon`;
/// every remaining column is an integer year label, assumed ascending
/// left-to-right (first and last become the year bounds, the order itself
/// is not re-validated). Data rows hold integer coordinates followed by
/// one anomaly per year column: a fixed-point decimal, rounded to three
/// decimals on ingestion, or the literal `NA` for a missing reading.
pub fn read_anomaly_table<R: Read>(source: R) -> IoResult<AnomalyDataset> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(source);

    let headers = reader.headers()?.clone();
    let first = headers.get(0).unwrap_or("").to_string();
    let second = headers.get(1).unwrap_or("").to_string();
    if first != "lat" || second != "lon" {
        return Err(IoError::HeaderMismatch { first, second });
    }

    let years = headers
        .iter()
        .skip(2)
        .map(|label| {
            label.parse::<i32>().map_err(|_| IoError::InvalidYearColumn {
                label: label.to_string(),
            })
        })
        .collect::<IoResult<Vec<i32>>>()?;

    let (min_year, max_year) = match (years.first(), years.last()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => return Err(IoError::NoYearColumns),
    };

    let mut min_anomaly = f32::MAX;
    let mut max_anomaly = f32::MIN;
    let mut grid = AnomalyGrid::new();

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let line = row + 2; // 1-based, after the header

        let lat = parse_coord(record.get(0), line)?;
        let lon = parse_coord(record.get(1), line)?;

        let mut series = AnomalySeries::new();
        for (i, &year) in years.iter().enumerate() {
            let field = record.get(i + 2).ok_or_else(|| IoError::InvalidRow {
                line,
                message: format!("missing value for year {year}"),
            })?;

            let value = if field == "NA" {
                f32::NAN
            } else {
                let parsed: f32 = field.parse().map_err(|_| IoError::InvalidRow {
                    line,
                    message: format!("unparseable anomaly \"{field}\""),
                })?;
                // three decimals of precision
                (parsed * 1000.0).round() / 1000.0
            };

            // A value moves at most one bound per step; NaN compares false
            // on both arms and so never touches the extrema.
            if value < min_anomaly {
                min_anomaly = value;
            } else if value > max_anomaly {
                max_anomaly = value;
            }

            series.insert(year, value);
        }

        grid.insert(GeoCoord::new(lat, lon), series);
    }

    info!(columns = years.len(), cells = grid.len(), "parsed anomaly table");

    Ok(AnomalyDataset::new(
        grid,
        GridStats {
            min_anomaly,
            max_anomaly,
            min_year,
            max_year,
            sample_count: years.len(),
        },
    ))
}

fn parse_coord(field: Option<&str>, line: usize) -> IoResult<i32> {
    let field = field.unwrap_or("");
    field.parse().map_err(|_| IoError::InvalidRow {
        line,
        message: format!("unparseable coordinate \"{field}\""),
    })
}
