//! Anomaly grid data model
//!
//! This module defines:
//! - AnomalySeries: the ordered year → anomaly mapping of one grid cell
//! - AnomalyGrid: the insertion-ordered collection of cells
//! - AnomalyDataset: a grid plus the scalars derived during ingestion
//!
//! A missing reading inside a series is the `f32::NAN` sentinel. A missing
//! *key* (a cell or year absent from the grid) is a typed lookup error,
//! never a sentinel, so data holes stay distinguishable from real readings.

use crate::error::{GridError, GridResult};
use crate::geo::GeoCoord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The ordered year → anomaly mapping of one grid cell
///
/// Entries keep their insertion order (the source table's column order), so
/// iterating a full series visits years exactly as the header listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnomalySeries {
    entries: Vec<(i32, f32)>,
}

impl AnomalySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append or overwrite the value for a year, preserving first-insertion
    /// order
    pub fn insert(&mut self, year: i32, value: f32) {
        match self.entries.iter_mut().find(|(y, _)| *y == year) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((year, value)),
        }
    }

    /// Look up the value for a year, if present
    pub fn get(&self, year: i32) -> Option<f32> {
        self.entries
            .iter()
            .find(|(y, _)| *y == year)
            .map(|(_, v)| *v)
    }

    /// All values in insertion order
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    /// All (year, value) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (i32, f32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The insertion-ordered mapping from coordinate to anomaly series
///
/// Cells iterate in the order they were inserted (the source table's row
/// order); exact-key lookup goes through a hash index. Cells are never
/// synthesized: a coordinate absent from the source is absent here.
#[derive(Debug, Clone, Default)]
pub struct AnomalyGrid {
    cells: Vec<(GeoCoord, AnomalySeries)>,
    index: HashMap<GeoCoord, usize>,
}

impl AnomalyGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell, replacing any existing series at the same coordinate
    /// without disturbing iteration order
    pub fn insert(&mut self, coord: GeoCoord, series: AnomalySeries) {
        match self.index.get(&coord) {
            Some(&i) => self.cells[i].1 = series,
            None => {
                self.index.insert(coord, self.cells.len());
                self.cells.push((coord, series));
            }
        }
    }

    /// The series at a coordinate, if the cell exists
    pub fn get(&self, coord: &GeoCoord) -> Option<&AnomalySeries> {
        self.index.get(coord).map(|&i| &self.cells[i].1)
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&GeoCoord, &AnomalySeries)> {
        self.cells.iter().map(|(c, s)| (c, s))
    }

    /// The anomaly at one cell for one year
    ///
    /// Fails if the cell is absent or the cell carries no entry for the
    /// year. An `NA` reading is a present entry and comes back as the NaN
    /// sentinel.
    pub fn anomaly_at(&self, lat: i32, lon: i32, year: i32) -> GridResult<f32> {
        let coord = GeoCoord::new(lat, lon);
        let series = self
            .get(&coord)
            .ok_or(GridError::CellNotFound { lat, lon })?;

        series
            .get(year)
            .ok_or(GridError::YearNotFound { lat, lon, year })
    }

    /// All values of one cell, in series (ingestion) order
    pub fn series_at(&self, lat: i32, lon: i32) -> GridResult<Vec<f32>> {
        let coord = GeoCoord::new(lat, lon);
        let series = self
            .get(&coord)
            .ok_or(GridError::CellNotFound { lat, lon })?;

        Ok(series.values().collect())
    }

    /// All (year, value) pairs of one cell, in series order
    ///
    /// Shaped for a line-chart consumer plotting one cell's evolution.
    pub fn series_points(&self, lat: i32, lon: i32) -> GridResult<Vec<(i32, f32)>> {
        let coord = GeoCoord::new(lat, lon);
        let series = self
            .get(&coord)
            .ok_or(GridError::CellNotFound { lat, lon })?;

        Ok(series.iter().collect())
    }

    /// One value per cell for one year, in grid iteration order
    ///
    /// Fails on the first cell that carries no entry for the year.
    pub fn slice_at(&self, year: i32) -> GridResult<Vec<f32>> {
        self.cells
            .iter()
            .map(|(coord, series)| {
                series.get(year).ok_or(GridError::YearNotFound {
                    lat: coord.lat(),
                    lon: coord.lon(),
                    year,
                })
            })
            .collect()
    }
}

/// Summary scalars derived while ingesting a grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridStats {
    /// Global minimum anomaly over all non-missing readings
    pub min_anomaly: f32,
    /// Global maximum anomaly over all non-missing readings
    pub max_anomaly: f32,
    /// First year column of the source table
    pub min_year: i32,
    /// Last year column of the source table
    pub max_year: i32,
    /// Number of year columns
    pub sample_count: usize,
}

/// A fully ingested grid with its derived statistics
///
/// Built once by the ingestion layer, read-only afterwards; every render
/// pass and UI query goes through this type.
#[derive(Debug, Clone)]
pub struct AnomalyDataset {
    grid: AnomalyGrid,
    stats: GridStats,
}

impl AnomalyDataset {
    pub fn new(grid: AnomalyGrid, stats: GridStats) -> Self {
        Self { grid, stats }
    }

    pub fn grid(&self) -> &AnomalyGrid {
        &self.grid
    }

    pub fn stats(&self) -> &GridStats {
        &self.stats
    }

    pub fn min_anomaly(&self) -> f32 {
        self.stats.min_anomaly
    }

    pub fn max_anomaly(&self) -> f32 {
        self.stats.max_anomaly
    }

    pub fn min_year(&self) -> i32 {
        self.stats.min_year
    }

    pub fn max_year(&self) -> i32 {
        self.stats.max_year
    }

    /// Number of year columns each full series carries
    pub fn sample_count(&self) -> usize {
        self.stats.sample_count
    }

    pub fn anomaly_at(&self, lat: i32, lon: i32, year: i32) -> GridResult<f32> {
        self.grid.anomaly_at(lat, lon, year)
    }

    pub fn series_at(&self, lat: i32, lon: i32) -> GridResult<Vec<f32>> {
        self.grid.series_at(lat, lon)
    }

    pub fn series_points(&self, lat: i32, lon: i32) -> GridResult<Vec<(i32, f32)>> {
        self.grid.series_points(lat, lon)
    }

    pub fn slice_at(&self, year: i32) -> GridResult<Vec<f32>> {
        self.grid.slice_at(year)
    }
}
