//! Plane geometry shared by the color field and the lattice.
//!
//! [`Point2D`] is the chromaticity-plane coordinate type, [`DomainBounds`] the
//! rectangle a color field is sampled over, and [`PrimaryTriple`] the triangle
//! a lattice is generated inside.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::ChromaError;

/// A point in the chromaticity plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_squared(self, other: Point2D) -> f64 {
        DVec2::from(self).distance_squared(DVec2::from(other))
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point2D) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

impl From<Point2D> for DVec2 {
    fn from(p: Point2D) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<DVec2> for Point2D {
    fn from(v: DVec2) -> Self {
        Point2D { x: v.x, y: v.y }
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Point2D { x, y }
    }
}

/// Axis-aligned rectangle `[x_min, x_max] x [y_min, y_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DomainBounds {
    /// Creates validated bounds.
    ///
    /// Returns `ChromaError::InvalidDomain` unless every value is finite and
    /// `x_min < x_max`, `y_min < y_max`.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, ChromaError> {
        let bounds = Self {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Checks the bounds invariant. Useful for bounds built with a struct literal
    /// or deserialized from config.
    pub fn validate(&self) -> Result<(), ChromaError> {
        let finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite());
        // Negated comparisons so NaN never slips through.
        if !finite || !(self.x_min < self.x_max) || !(self.y_min < self.y_max) {
            return Err(ChromaError::InvalidDomain {
                x_min: self.x_min,
                x_max: self.x_max,
                y_min: self.y_min,
                y_max: self.y_max,
            });
        }
        Ok(())
    }

    /// Tight bounding box of `points`.
    ///
    /// Fails with `InvalidDomain` when the points are empty or collapse onto a
    /// line parallel to an axis.
    pub fn enclosing(points: &[Point2D]) -> Result<Self, ChromaError> {
        let (lo, hi) = points.iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(lo, hi), &p| (lo.min(p.into()), hi.max(p.into())),
        );
        Self::new(lo.x, hi.x, lo.y, hi.y)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Whether `p` lies inside or on the rectangle.
    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }
}

/// The red, green and blue primaries spanning a lattice triangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimaryTriple {
    pub red: Point2D,
    pub green: Point2D,
    pub blue: Point2D,
}

impl PrimaryTriple {
    pub const fn new(red: Point2D, green: Point2D, blue: Point2D) -> Self {
        Self { red, green, blue }
    }

    /// Weighted combination `(wr * red + wg * green + wb * blue)`.
    pub fn combine(&self, wr: f64, wg: f64, wb: f64) -> Point2D {
        let v = DVec2::from(self.red) * wr
            + DVec2::from(self.green) * wg
            + DVec2::from(self.blue) * wb;
        v.into()
    }

    /// Twice the signed area of the triangle; zero for a degenerate triple.
    pub fn signed_area2(&self) -> f64 {
        let r = DVec2::from(self.red);
        (DVec2::from(self.green) - r).perp_dot(DVec2::from(self.blue) - r)
    }

    /// True when the primaries are collinear or coincide.
    pub fn is_degenerate(&self) -> bool {
        self.signed_area2().abs() <= f64::EPSILON
    }
}

impl Default for PrimaryTriple {
    /// The light-panel primaries used by default.
    fn default() -> Self {
        Self {
            red: Point2D::new(0.650, 0.320),
            green: Point2D::new(0.175, 0.690),
            blue: Point2D::new(0.150, 0.040),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert!((a.distance_squared(b) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn dvec2_conversion_round_trips() {
        let p = Point2D::new(0.31, 0.33);
        let back: Point2D = DVec2::from(p).into();
        assert_eq!(p, back);
    }

    #[test]
    fn bounds_accept_increasing_ranges() {
        let b = DomainBounds::new(0.0, 0.8, 0.0, 0.9).unwrap();
        assert!((b.width() - 0.8).abs() < 1e-12);
        assert!((b.height() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn bounds_reject_equal_x() {
        let result = DomainBounds::new(0.5, 0.5, 0.0, 1.0);
        assert!(matches!(result, Err(ChromaError::InvalidDomain { .. })));
    }

    #[test]
    fn bounds_reject_reversed_y() {
        let result = DomainBounds::new(0.0, 1.0, 1.0, 0.0);
        assert!(matches!(result, Err(ChromaError::InvalidDomain { .. })));
    }

    #[test]
    fn bounds_reject_nan_and_infinity() {
        assert!(DomainBounds::new(f64::NAN, 1.0, 0.0, 1.0).is_err());
        assert!(DomainBounds::new(0.0, f64::INFINITY, 0.0, 1.0).is_err());
    }

    #[test]
    fn enclosing_returns_tight_box() {
        let pts = [
            Point2D::new(0.2, 0.1),
            Point2D::new(0.7, 0.3),
            Point2D::new(0.1, 0.8),
        ];
        let b = DomainBounds::enclosing(&pts).unwrap();
        assert_eq!(b, DomainBounds::new(0.1, 0.7, 0.1, 0.8).unwrap());
    }

    #[test]
    fn enclosing_rejects_empty_and_collinear_points() {
        assert!(DomainBounds::enclosing(&[]).is_err());
        let vertical = [Point2D::new(0.2, 0.1), Point2D::new(0.2, 0.5)];
        assert!(DomainBounds::enclosing(&vertical).is_err());
    }

    #[test]
    fn contains_includes_edges() {
        let b = DomainBounds::new(0.0, 1.0, 0.0, 1.0).unwrap();
        assert!(b.contains(Point2D::new(0.0, 1.0)));
        assert!(!b.contains(Point2D::new(1.01, 0.5)));
    }

    #[test]
    fn combine_with_unit_weight_returns_vertex() {
        let t = PrimaryTriple::default();
        assert_eq!(t.combine(1.0, 0.0, 0.0), t.red);
        assert_eq!(t.combine(0.0, 1.0, 0.0), t.green);
        assert_eq!(t.combine(0.0, 0.0, 1.0), t.blue);
    }

    #[test]
    fn degenerate_triple_has_zero_area() {
        let p = Point2D::new(0.3, 0.3);
        let t = PrimaryTriple::new(p, p, Point2D::new(0.5, 0.1));
        assert_eq!(t.signed_area2(), 0.0);
        assert!(PrimaryTriple::default().signed_area2().abs() > 0.0);
        assert!(t.is_degenerate());
        assert!(!PrimaryTriple::default().is_degenerate());
    }

    #[test]
    fn collinear_distinct_primaries_are_degenerate() {
        let t = PrimaryTriple::new(
            Point2D::new(0.1, 0.1),
            Point2D::new(0.2, 0.2),
            Point2D::new(0.4, 0.4),
        );
        assert!(t.is_degenerate());
    }

    #[test]
    fn primaries_deserialize_from_json() {
        let json = r#"{"red":{"x":0.64,"y":0.33},"green":{"x":0.3,"y":0.6},"blue":{"x":0.15,"y":0.06}}"#;
        let t: PrimaryTriple = serde_json::from_str(json).unwrap();
        assert_eq!(t.green, Point2D::new(0.3, 0.6));
    }
}
