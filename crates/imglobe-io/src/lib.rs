//! imglobe-io - Anomaly table ingestion for imglobe
//!
//! This crate reads the gridded anomaly table consumed by the engine: a
//! UTF-8 text file whose quoted header row names `lat`, `lon`, and one
//! column per year, followed by unquoted data rows of coordinates and
//! fixed-point anomalies (or the literal `NA` for a missing reading).
//!
//! # Design
//!
//! Ingestion is one-shot and all-or-nothing: any header, row, or I/O
//! failure aborts the load with a typed [`IoError`] and produces no
//! dataset. A successful load yields a read-only
//! [`AnomalyDataset`](imglobe_core::AnomalyDataset) carrying the grid and
//! its derived statistics.

pub mod anomaly_table;

pub use anomaly_table::*;
