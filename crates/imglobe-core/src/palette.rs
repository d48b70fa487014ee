//! Anomaly color palette
//!
//! Three warm tiers encode positive anomaly magnitude; negative anomalies
//! use the RGB inversion of the same tier, so the cold end mirrors the warm
//! end. A zero or missing anomaly renders fully transparent. Quad colors
//! carry a low opacity so the globe texture stays visible underneath.

use serde::{Deserialize, Serialize};

/// A color in RGBA format (components 0.0 to 1.0)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from RGB (alpha = 1.0)
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Fully transparent
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    /// Invert the RGB components, keeping opacity
    pub fn invert(&self) -> Self {
        Self {
            r: 1.0 - self.r,
            g: 1.0 - self.g,
            b: 1.0 - self.b,
            a: self.a,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }

    /// Convert to array [r, g, b, a]
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Opacity of the draped quad colors
pub const MAT_OPACITY: f32 = 0.08;

/// Weakest warm tier (normalized magnitude at or below 0.2)
pub const WARM_YELLOW: Color = Color::new(0.5, 0.5, 0.0, MAT_OPACITY);
/// Mid warm tier (normalized magnitude in (0.2, 0.7])
pub const WARM_ORANGE: Color = Color::new(0.5, 0.3, 0.0, MAT_OPACITY);
/// Strongest warm tier (normalized magnitude above 0.7)
pub const WARM_RED: Color = Color::new(0.5, 0.0, 0.0, MAT_OPACITY);
/// Negative-sign bar color
pub const COOL_BLUE: Color = Color::new(0.0, 0.0, 0.5, MAT_OPACITY);

/// Tier threshold separating the weakest and mid tiers
pub const TIER_LOW: f64 = 0.2;
/// Tier threshold separating the mid and strongest tiers
pub const TIER_HIGH: f64 = 0.7;

/// A material pairing diffuse and specular colors
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub diffuse: Color,
    pub specular: Color,
}

impl Material {
    /// A material using the same color for diffuse and specular
    pub fn uniform(color: Color) -> Self {
        Self {
            diffuse: color,
            specular: color,
        }
    }
}

fn warm_tier(delta: f64) -> Color {
    if delta > TIER_LOW {
        if delta > TIER_HIGH {
            WARM_RED
        } else {
            WARM_ORANGE
        }
    } else {
        WARM_YELLOW
    }
}

/// The quad color for an anomaly and its normalized magnitude
///
/// Positive anomalies pick a warm tier, negative anomalies the inverted
/// tier; zero and NaN fall through to transparent.
pub fn anomaly_color(anomaly: f32, delta: f64) -> Color {
    if anomaly > 0.0 {
        warm_tier(delta)
    } else if anomaly < 0.0 {
        warm_tier(delta).invert()
    } else {
        Color::TRANSPARENT
    }
}

/// The bar color for an anomaly: red for positive, blue otherwise
pub fn sign_color(anomaly: f32) -> Color {
    if anomaly > 0.0 {
        WARM_RED
    } else {
        COOL_BLUE
    }
}
