//! Per-year primitive generation with incremental reuse
//!
//! This module defines:
//! - DisplayMode: color-encoded or height-encoded anomaly display
//! - GlobeRenderer: owns the primitive list and updates it per render call
//! - RenderPass: counters describing what one call created vs. reused
//!
//! A render call walks every grid cell in a fixed order (latitude outer,
//! longitude inner, 4° steps over the half-cell-offset centers). Each slot
//! of the primitive list belongs to one cell; when the slot already holds a
//! primitive of the mode's kind only its material (and bar height) changes,
//! otherwise the slot is rebuilt. Year scrubbing therefore mutates ~4000
//! primitives in place instead of reconstructing the scene, and a mode
//! switch pays the full rebuild exactly once.

use crate::error::RenderResult;
use crate::geo::{cell_corners, cell_direction, GRID_STEP};
use crate::grid::AnomalyDataset;
use crate::palette::{anomaly_color, sign_color, Material};
use crate::primitive::{BarPrimitive, Primitive, QuadPrimitive};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Radius of the draped quad layer, slightly above the globe surface
pub const SURFACE_RADIUS: f64 = 1.01;

/// Base length of a histogram bar, slightly below the globe surface
pub const BAR_BASE_LENGTH: f64 = 0.99;

/// Southernmost cell-center latitude
pub const CELL_LAT_MIN: i32 = -90 + GRID_STEP / 2;
/// Northernmost cell-center latitude
pub const CELL_LAT_MAX: i32 = 90 - GRID_STEP / 2;
/// Westernmost cell-center longitude
pub const CELL_LON_MIN: i32 = -180 + GRID_STEP / 2;
/// Easternmost cell-center longitude
pub const CELL_LON_MAX: i32 = 180 - GRID_STEP / 2;

/// Every cell center in render traversal order (latitude outer loop,
/// longitude inner loop, stepping by the grid size)
pub fn cell_centers() -> impl Iterator<Item = (i32, i32)> {
    (CELL_LAT_MIN..=CELL_LAT_MAX)
        .step_by(GRID_STEP as usize)
        .flat_map(|lat| {
            (CELL_LON_MIN..=CELL_LON_MAX)
                .step_by(GRID_STEP as usize)
                .map(move |lon| (lat, lon))
        })
}

/// How anomalies are displayed on the globe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Translucent quads colored by anomaly magnitude and sign
    ByColor,
    /// Radial bars whose height grows with anomaly magnitude
    ByHistogram,
}

impl DisplayMode {
    /// Switch to the other mode
    pub fn toggle(&self) -> Self {
        match self {
            DisplayMode::ByColor => DisplayMode::ByHistogram,
            DisplayMode::ByHistogram => DisplayMode::ByColor,
        }
    }

    /// Display name for the mode
    pub fn name(&self) -> &'static str {
        match self {
            DisplayMode::ByColor => "Color",
            DisplayMode::ByHistogram => "Histogram",
        }
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::ByColor
    }
}

/// Normalized anomaly magnitude in [0, 1]
///
/// Positive anomalies normalize against the global maximum, negative ones
/// against the global minimum's magnitude, then the result floors to two
/// decimals. The extrema bound all observed values, so the result cannot
/// exceed 1. A NaN anomaly propagates NaN; the primitive layer guards it.
pub fn normalized_magnitude(anomaly: f32, min_anomaly: f32, max_anomaly: f32) -> f64 {
    let anomaly = anomaly as f64;
    let delta = if anomaly > 0.0 {
        anomaly / max_anomaly as f64
    } else {
        -anomaly / -(min_anomaly as f64)
    };

    (delta * 100.0).floor() / 100.0
}

/// Counters describing one render call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderPass {
    /// Slots filled for the first time
    pub created: usize,
    /// Slots mutated in place (kind matched the mode)
    pub reused: usize,
    /// Slots rebuilt because their kind did not match the mode
    pub replaced: usize,
}

impl RenderPass {
    /// Total cells visited
    pub fn total(&self) -> usize {
        self.created + self.reused + self.replaced
    }
}

/// Owns the primitive list and keeps it in sync with a (year, mode) pair
///
/// The caller owns year and mode state and invokes [`render`] on every
/// transition; the renderer itself holds nothing but the reusable
/// primitives. Single-threaded use: one call must complete before the next
/// begins.
///
/// [`render`]: GlobeRenderer::render
#[derive(Debug, Clone, Default)]
pub struct GlobeRenderer {
    primitives: Vec<Primitive>,
}

impl GlobeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The primitive list in traversal order, for the scene consumer
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Update the primitive list for one year and display mode
    ///
    /// Fails only when the grid lacks a cell or year the traversal expects,
    /// which is a caller-contract violation rather than an expected runtime
    /// condition.
    pub fn render(
        &mut self,
        dataset: &AnomalyDataset,
        year: i32,
        mode: DisplayMode,
    ) -> RenderResult<RenderPass> {
        let min_anomaly = dataset.min_anomaly();
        let max_anomaly = dataset.max_anomaly();

        let mut pass = RenderPass::default();

        for (index, (lat, lon)) in cell_centers().enumerate() {
            let anomaly = dataset.anomaly_at(lat, lon, year)?;
            let delta = normalized_magnitude(anomaly, min_anomaly, max_anomaly);

            match mode {
                DisplayMode::ByColor => {
                    let material = Material::uniform(anomaly_color(anomaly, delta));

                    match self.primitives.get_mut(index) {
                        Some(Primitive::Quad(quad)) => {
                            quad.material = material;
                            pass.reused += 1;
                        }
                        Some(slot) => {
                            *slot = Primitive::Quad(QuadPrimitive::new(
                                cell_corners(lat, lon, SURFACE_RADIUS),
                                material,
                            ));
                            pass.replaced += 1;
                        }
                        None => {
                            self.primitives.push(Primitive::Quad(QuadPrimitive::new(
                                cell_corners(lat, lon, SURFACE_RADIUS),
                                material,
                            )));
                            pass.created += 1;
                        }
                    }
                }
                DisplayMode::ByHistogram => {
                    let material = Material::uniform(sign_color(anomaly));
                    let height = BAR_BASE_LENGTH + delta;

                    match self.primitives.get_mut(index) {
                        Some(Primitive::Bar(bar)) => {
                            bar.material = material;
                            bar.set_height(height);
                            pass.reused += 1;
                        }
                        Some(slot) => {
                            *slot = Primitive::Bar(BarPrimitive::new(
                                cell_direction(lat, lon),
                                height,
                                material,
                            ));
                            pass.replaced += 1;
                        }
                        None => {
                            self.primitives.push(Primitive::Bar(BarPrimitive::new(
                                cell_direction(lat, lon),
                                height,
                                material,
                            )));
                            pass.created += 1;
                        }
                    }
                }
            }
        }

        debug!(
            mode = mode.name(),
            year,
            created = pass.created,
            reused = pass.reused,
            replaced = pass.replaced,
            "render pass"
        );

        Ok(pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GridError, RenderError};
    use crate::geo::GeoCoord;
    use crate::grid::{AnomalyGrid, AnomalySeries, GridStats};
    use crate::palette::{COOL_BLUE, WARM_RED, WARM_YELLOW};
    use crate::primitive::PrimitiveKind;

    const CELL_COUNT: usize = 45 * 90;

    fn dataset_with(value_for: impl Fn(i32, i32) -> f32) -> AnomalyDataset {
        let years = [2000, 2001];
        let mut grid = AnomalyGrid::new();

        for (lat, lon) in cell_centers() {
            let mut series = AnomalySeries::new();
            for &year in &years {
                series.insert(year, value_for(lat, lon));
            }
            grid.insert(GeoCoord::new(lat, lon), series);
        }

        AnomalyDataset::new(
            grid,
            GridStats {
                min_anomaly: -2.0,
                max_anomaly: 2.0,
                min_year: 2000,
                max_year: 2001,
                sample_count: 2,
            },
        )
    }

    // Anomalies ramp linearly with latitude, hitting both extrema
    fn gradient_dataset() -> AnomalyDataset {
        dataset_with(|lat, _| lat as f32 / 44.0)
    }

    fn index_of(lat: i32, lon: i32) -> usize {
        cell_centers()
            .position(|(la, lo)| la == lat && lo == lon)
            .unwrap()
    }

    #[test]
    fn test_cell_centers_cover_grid() {
        let centers: Vec<(i32, i32)> = cell_centers().collect();
        assert_eq!(centers.len(), CELL_COUNT);
        assert_eq!(centers[0], (-88, -178));
        assert_eq!(centers[89], (-88, 178));
        assert_eq!(centers[90], (-84, -178));
        assert_eq!(*centers.last().unwrap(), (88, 178));
    }

    #[test]
    fn test_display_mode_toggle() {
        assert_eq!(DisplayMode::ByColor.toggle(), DisplayMode::ByHistogram);
        assert_eq!(DisplayMode::ByHistogram.toggle(), DisplayMode::ByColor);
        assert_eq!(DisplayMode::ByColor.name(), "Color");
    }

    #[test]
    fn test_normalized_magnitude() {
        assert_eq!(normalized_magnitude(2.0, -2.0, 2.0), 1.0);
        assert_eq!(normalized_magnitude(-2.0, -2.0, 2.0), 1.0);
        // floors to two decimals
        assert_eq!(normalized_magnitude(1.55, -2.0, 2.0), 0.77);
        assert_eq!(normalized_magnitude(0.0, -2.0, 2.0), 0.0);
        assert!(normalized_magnitude(f32::NAN, -2.0, 2.0).is_nan());
    }

    #[test]
    fn test_first_pass_creates_every_cell() {
        let dataset = gradient_dataset();
        let mut renderer = GlobeRenderer::new();

        let pass = renderer.render(&dataset, 2000, DisplayMode::ByColor).unwrap();
        assert_eq!(pass.created, CELL_COUNT);
        assert_eq!(pass.reused, 0);
        assert_eq!(pass.replaced, 0);
        assert_eq!(renderer.primitives().len(), CELL_COUNT);
        assert!(renderer
            .primitives()
            .iter()
            .all(|p| p.kind() == PrimitiveKind::Quad));
    }

    #[test]
    fn test_same_mode_rerender_reuses_every_slot() {
        let dataset = gradient_dataset();
        let mut renderer = GlobeRenderer::new();

        renderer.render(&dataset, 2000, DisplayMode::ByColor).unwrap();
        let pass = renderer.render(&dataset, 2001, DisplayMode::ByColor).unwrap();

        assert_eq!(pass.reused, CELL_COUNT);
        assert_eq!(pass.created, 0);
        assert_eq!(pass.replaced, 0);
        assert_eq!(renderer.primitives().len(), CELL_COUNT);

        // Repeating the exact same (year, mode) pair is also reuse-only
        let pass = renderer.render(&dataset, 2001, DisplayMode::ByColor).unwrap();
        assert_eq!(pass.reused, CELL_COUNT);
    }

    #[test]
    fn test_mode_switch_replaces_every_slot() {
        let dataset = gradient_dataset();
        let mut renderer = GlobeRenderer::new();

        renderer.render(&dataset, 2000, DisplayMode::ByColor).unwrap();
        let pass = renderer
            .render(&dataset, 2000, DisplayMode::ByHistogram)
            .unwrap();

        assert_eq!(pass.replaced, CELL_COUNT);
        assert_eq!(pass.reused, 0);
        assert!(renderer
            .primitives()
            .iter()
            .all(|p| p.kind() == PrimitiveKind::Bar));

        // Switching back pays the rebuild once more, then reuses again
        let pass = renderer.render(&dataset, 2000, DisplayMode::ByColor).unwrap();
        assert_eq!(pass.replaced, CELL_COUNT);
        let pass = renderer.render(&dataset, 2001, DisplayMode::ByColor).unwrap();
        assert_eq!(pass.reused, CELL_COUNT);
    }

    #[test]
    fn test_reuse_keeps_quad_geometry() {
        let dataset = gradient_dataset();
        let mut renderer = GlobeRenderer::new();

        renderer.render(&dataset, 2000, DisplayMode::ByColor).unwrap();
        let corners_before = match &renderer.primitives()[0] {
            Primitive::Quad(quad) => quad.corners,
            _ => unreachable!(),
        };

        renderer.render(&dataset, 2001, DisplayMode::ByColor).unwrap();
        match &renderer.primitives()[0] {
            Primitive::Quad(quad) => assert_eq!(quad.corners, corners_before),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_color_tiers_across_latitudes() {
        let dataset = gradient_dataset();
        let mut renderer = GlobeRenderer::new();
        renderer.render(&dataset, 2000, DisplayMode::ByColor).unwrap();

        let color_at = |lat: i32, lon: i32| {
            renderer.primitives()[index_of(lat, lon)].material().diffuse
        };

        // lat 88: delta 1.0, strongest warm tier
        assert_eq!(color_at(88, -178), WARM_RED);
        // lat -88: delta 1.0 on the negative side, inverted tier
        assert_eq!(color_at(-88, -178), WARM_RED.invert());
        // lat 4: delta 0.04, weakest tier
        assert_eq!(color_at(4, 2), WARM_YELLOW);
        // lat 0: zero anomaly, transparent
        assert!(color_at(0, 2).is_transparent());
    }

    #[test]
    fn test_histogram_heights_and_signs() {
        let dataset = gradient_dataset();
        let mut renderer = GlobeRenderer::new();
        renderer
            .render(&dataset, 2000, DisplayMode::ByHistogram)
            .unwrap();

        let bar_at = |lat: i32, lon: i32| match &renderer.primitives()[index_of(lat, lon)] {
            Primitive::Bar(bar) => bar.clone(),
            _ => unreachable!(),
        };

        // Full positive magnitude
        let bar = bar_at(88, 2);
        assert_eq!(bar.height(), BAR_BASE_LENGTH + 1.0);
        assert_eq!(bar.material.diffuse, WARM_RED);

        // Full negative magnitude
        let bar = bar_at(-88, 2);
        assert_eq!(bar.height(), BAR_BASE_LENGTH + 1.0);
        assert_eq!(bar.material.diffuse, COOL_BLUE);

        // Zero anomaly sits at the base length
        let bar = bar_at(0, 2);
        assert_eq!(bar.height(), BAR_BASE_LENGTH);
        assert_eq!(bar.material.diffuse, COOL_BLUE);
    }

    #[test]
    fn test_missing_reading_renders_neutral() {
        let dataset = dataset_with(|lat, lon| {
            if lat == 12 && lon == 2 {
                f32::NAN
            } else {
                lat as f32 / 44.0
            }
        });
        let mut renderer = GlobeRenderer::new();

        renderer.render(&dataset, 2000, DisplayMode::ByColor).unwrap();
        let index = index_of(12, 2);
        assert!(renderer.primitives()[index].material().diffuse.is_transparent());

        renderer
            .render(&dataset, 2000, DisplayMode::ByHistogram)
            .unwrap();
        match &renderer.primitives()[index] {
            Primitive::Bar(bar) => {
                // non-finite magnitude collapses to unit height
                assert_eq!(bar.height(), 1.0);
                assert_eq!(bar.material.diffuse, COOL_BLUE);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_render_fails_on_missing_cell() {
        let mut grid = AnomalyGrid::new();
        let mut series = AnomalySeries::new();
        series.insert(2000, 0.5);
        grid.insert(GeoCoord::new(10, 20), series);

        let dataset = AnomalyDataset::new(
            grid,
            GridStats {
                min_anomaly: 0.5,
                max_anomaly: 0.5,
                min_year: 2000,
                max_year: 2000,
                sample_count: 1,
            },
        );

        let mut renderer = GlobeRenderer::new();
        let err = renderer
            .render(&dataset, 2000, DisplayMode::ByColor)
            .unwrap_err();

        assert_eq!(
            err,
            RenderError::Lookup(GridError::CellNotFound {
                lat: CELL_LAT_MIN,
                lon: CELL_LON_MIN
            })
        );
    }
}
