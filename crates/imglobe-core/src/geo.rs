//! Geographic coordinates and sphere transforms
//!
//! This module defines:
//! - GeoCoord: an immutable, range-clamped (lat, lon) pair used as grid key
//! - geo_to_cartesian / cartesian_to_geo: the bidirectional mapping between
//!   geographic coordinates and 3D positions on the unit globe
//! - cell_corners: the four corner positions of one grid cell
//!
//! The data is gridded at a fixed 4° resolution, with cell centers offset by
//! half a cell so coverage stays symmetric around the equator and meridian.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Angular size of one grid cell, in degrees
pub const GRID_STEP: i32 = 4;

// Empirical offsets aligning the projected grid with the base globe
// texture's seam.
const TEXTURE_LAT_OFFSET: f64 = -0.2;
const TEXTURE_LON_OFFSET: f64 = 2.8;

/// An immutable geographic coordinate
///
/// Latitude is clamped into [-90, 90] and longitude into [-180, 180] at
/// construction; out-of-range input moves to the nearer bound rather than
/// being rejected. Equality, ordering, and hashing follow the (lat, lon)
/// pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GeoCoord {
    lat: i32,
    lon: i32,
}

impl GeoCoord {
    /// Create a coordinate, clamping both components into range
    pub fn new(lat: i32, lon: i32) -> Self {
        Self {
            lat: lat.clamp(-90, 90),
            lon: lon.clamp(-180, 180),
        }
    }

    pub fn lat(&self) -> i32 {
        self.lat
    }

    pub fn lon(&self) -> i32 {
        self.lon
    }

    /// Project this coordinate onto the globe at the given radius
    pub fn to_cartesian(&self, radius: f64) -> Point3<f64> {
        geo_to_cartesian(self.lat as f64, self.lon as f64, radius)
    }
}

impl fmt::Display for GeoCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", format_lat(self.lat), format_lon(self.lon))
    }
}

/// Format a latitude with its hemisphere suffix
///
/// The dataset follows the globe mesh's y-down convention: latitudes at or
/// below zero lie in the northern hemisphere.
pub fn format_lat(lat: i32) -> String {
    if lat <= 0 {
        format!("{}° N", -lat)
    } else {
        format!("{}° S", lat)
    }
}

/// Format a longitude with its hemisphere suffix
pub fn format_lon(lon: i32) -> String {
    if lon <= 0 {
        format!("{}° W", -lon)
    } else {
        format!("{}° E", lon)
    }
}

/// Convert geographic coordinates into a 3D position
///
/// Applies the texture-seam offsets, then projects so that the equator/prime
/// meridian intersection faces +z, with y as the polar axis. Radius 1.0 is
/// the globe surface; larger values offset an element outward.
pub fn geo_to_cartesian(lat: f64, lon: f64, radius: f64) -> Point3<f64> {
    let lat_cor = (lat + TEXTURE_LAT_OFFSET).to_radians();
    let lon_cor = (lon + TEXTURE_LON_OFFSET).to_radians();

    Point3::new(
        -lon_cor.sin() * lat_cor.cos() * radius,
        -lat_cor.sin() * radius,
        lon_cor.cos() * lat_cor.cos() * radius,
    )
}

/// Convert a 3D position on (or near) the unit globe back into a snapped
/// (lat, lon) cell pair
///
/// The y component is clamped into [-1, 1] before `asin` so floating noise
/// on pick positions cannot leave the trig domain. The result snaps to the
/// 4° grid, with the +2 longitude term correcting for the grid's half-cell
/// indexing.
///
/// Returns the raw snapped pair rather than a clamped [`GeoCoord`]: a pick
/// exactly at the south pole snaps to latitude 92, one step past the valid
/// bound. Callers doing grid lookups go through [`GeoCoord::new`], which
/// clamps.
pub fn cartesian_to_geo(point: &Point3<f64>) -> (i32, i32) {
    let adjusted_y = point.y.clamp(-1.0, 1.0);

    let lat_cor = adjusted_y.asin().to_degrees() - TEXTURE_LAT_OFFSET;
    let lon_cor = point.z.atan2(point.x).to_degrees() - TEXTURE_LON_OFFSET;

    let lat_cell = GRID_STEP * (lat_cor / GRID_STEP as f64).round() as i32;
    let lon_cell = GRID_STEP * (lon_cor / GRID_STEP as f64).round() as i32 + GRID_STEP / 2;

    (lat_cell, lon_cell)
}

/// The four corner positions of the cell whose south-west corner is
/// (lat, lon), at the given radius
///
/// Corner order is (top right, bottom right, bottom left, top left), the
/// winding the quad primitive expects.
pub fn cell_corners(lat: i32, lon: i32, radius: f64) -> [Point3<f64>; 4] {
    let step = GRID_STEP as f64;
    let (lat, lon) = (lat as f64, lon as f64);

    [
        geo_to_cartesian(lat + step, lon + step, radius),
        geo_to_cartesian(lat, lon + step, radius),
        geo_to_cartesian(lat, lon, radius),
        geo_to_cartesian(lat + step, lon, radius),
    ]
}

/// Unit direction from the globe center through the far corner of the cell
/// at (lat, lon)
pub fn cell_direction(lat: i32, lon: i32) -> Vector3<f64> {
    let step = GRID_STEP as f64;
    geo_to_cartesian(lat as f64 + step, lon as f64 + step, 1.0).coords
}
