//! Renderable primitives
//!
//! One primitive represents one grid cell for one year and display mode:
//! a translucent quad draped over the surface, or a radial bar from the
//! globe center. The render pass keeps primitives in an index-addressable
//! list and dispatches on [`PrimitiveKind`] to decide between in-place
//! mutation and replacement.

use crate::palette::Material;
use nalgebra::{Point3, Vector3};

/// Cylinder radius of a histogram bar
pub const BAR_RADIUS: f64 = 0.01;

/// Structural kind of a primitive, used for slot matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Quad,
    Bar,
}

/// A single renderable element for one grid cell
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Quad(QuadPrimitive),
    Bar(BarPrimitive),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Quad(_) => PrimitiveKind::Quad,
            Primitive::Bar(_) => PrimitiveKind::Bar,
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Primitive::Quad(quad) => &quad.material,
            Primitive::Bar(bar) => &bar.material,
        }
    }
}

/// A planar quadrilateral spanning one cell's corners
///
/// Corner order is (top right, bottom right, bottom left, top left); the
/// consuming renderer triangulates along the 0-2 diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadPrimitive {
    pub corners: [Point3<f64>; 4],
    pub material: Material,
}

impl QuadPrimitive {
    pub fn new(corners: [Point3<f64>; 4], material: Material) -> Self {
        Self { corners, material }
    }
}

/// A radial bar anchored at the globe center
///
/// The bar extends from the origin along `direction` for `height`.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPrimitive {
    /// Unit direction from the globe center through the cell
    pub direction: Vector3<f64>,
    height: f64,
    pub radius: f64,
    pub material: Material,
}

impl BarPrimitive {
    /// Create a bar; a non-finite height collapses to 1.0
    ///
    /// The guard covers degenerate extrema, where the normalized magnitude
    /// divides by NaN and would otherwise poison the geometry.
    pub fn new(direction: Vector3<f64>, height: f64, material: Material) -> Self {
        let mut bar = Self {
            direction,
            height: 1.0,
            radius: BAR_RADIUS,
            material,
        };
        bar.set_height(height);
        bar
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Update the height in place, applying the non-finite guard
    pub fn set_height(&mut self, height: f64) {
        self.height = if height.is_finite() { height } else { 1.0 };
    }

    /// The bar's far endpoint
    pub fn tip(&self) -> Point3<f64> {
        Point3::from(self.direction * self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Color, Material};

    fn material() -> Material {
        Material::uniform(Color::rgb(0.5, 0.0, 0.0))
    }

    #[test]
    fn test_kind_dispatch() {
        let quad = Primitive::Quad(QuadPrimitive::new(
            [Point3::origin(); 4],
            material(),
        ));
        let bar = Primitive::Bar(BarPrimitive::new(
            Vector3::new(0.0, 1.0, 0.0),
            1.5,
            material(),
        ));

        assert_eq!(quad.kind(), PrimitiveKind::Quad);
        assert_eq!(bar.kind(), PrimitiveKind::Bar);
    }

    #[test]
    fn test_bar_height_guard() {
        let mut bar = BarPrimitive::new(Vector3::new(0.0, 1.0, 0.0), f64::NAN, material());
        assert_eq!(bar.height(), 1.0);

        bar.set_height(1.42);
        assert_eq!(bar.height(), 1.42);

        bar.set_height(f64::INFINITY);
        assert_eq!(bar.height(), 1.0);
    }

    #[test]
    fn test_bar_tip() {
        let bar = BarPrimitive::new(Vector3::new(0.0, 1.0, 0.0), 1.5, material());
        let tip = bar.tip();
        assert!((tip.y - 1.5).abs() < 1e-12);
        assert_eq!(bar.radius, BAR_RADIUS);
    }
}
