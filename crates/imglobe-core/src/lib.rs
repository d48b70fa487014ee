//! imglobe-core - Core engine for gridded temperature anomalies on a 3D globe
//!
//! This crate provides the non-UI computational engine for imglobe, a
//! visualization of a geospatial temperature-anomaly time series on a sphere:
//!
//! - **GeoCoord**: clamped geographic coordinates with bidirectional
//!   sphere transforms (forward projection and pick-position inversion)
//! - **AnomalyGrid / AnomalyDataset**: one anomaly time series per 4° cell,
//!   with derived extrema and year bounds
//! - **Palette**: the tiered warm/inverted anomaly colors
//! - **GlobeRenderer**: per-year primitive generation with incremental reuse
//! - **Animation**: playback state for the host's timeline controls
//!
//! # Display Modes
//!
//! Anomalies render in one of two modes, toggled by the host UI:
//!
//! - **ByColor**: translucent quads draped over the globe surface, colored
//!   by anomaly magnitude and sign
//! - **ByHistogram**: radial bars whose height grows with anomaly magnitude
//!
//! The renderer mutates an index-addressable primitive list in place, so a
//! year change only updates materials and heights; a mode change rebuilds
//! every slot exactly once.

pub mod animation;
pub mod error;
pub mod geo;
pub mod grid;
pub mod palette;
pub mod primitive;
pub mod render;

pub use animation::*;
pub use error::*;
pub use geo::*;
pub use grid::*;
pub use palette::*;
pub use primitive::*;
pub use render::*;
