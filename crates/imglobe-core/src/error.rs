//! Error types for imglobe-core
//!
//! Provides typed failures for:
//! - Grid lookups (missing cell, missing year)
//! - Render passes (lookup failures are caller-contract violations)

use thiserror::Error;

/// Errors related to grid lookups
///
/// Lookups never substitute a default for a missing key: a hole in the data
/// must stay distinguishable from a real zero-anomaly reading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No cell exists at the requested coordinate
    #[error("no grid cell at ({lat}, {lon})")]
    CellNotFound { lat: i32, lon: i32 },

    /// The cell exists but carries no entry for the requested year
    #[error("no entry for year {year} at ({lat}, {lon})")]
    YearNotFound { lat: i32, lon: i32, year: i32 },
}

/// Errors related to a render pass
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A cell or year the traversal expects is absent from the grid
    #[error("render lookup failed: {0}")]
    Lookup(#[from] GridError),
}

/// Result type alias for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Result type alias for render operations
pub type RenderResult<T> = Result<T, RenderError>;
