//! Reference anchors: the sparse color/position pairs a color field is blended from.

use serde::{Deserialize, Serialize};

use crate::color::ColorRgb;
use crate::error::ChromaError;
use crate::geometry::Point2D;

/// A reference color pinned at a position in the plane.
///
/// `influence` scales the anchor's radial weight and must lie in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceAnchor {
    pub color: ColorRgb,
    pub position: Point2D,
    pub influence: f64,
}

impl ReferenceAnchor {
    /// Creates an anchor, rejecting influence outside (0, 1].
    pub fn new(color: ColorRgb, position: Point2D, influence: f64) -> Result<Self, ChromaError> {
        let anchor = Self {
            color,
            position,
            influence,
        };
        anchor.validate()?;
        Ok(anchor)
    }

    pub fn validate(&self) -> Result<(), ChromaError> {
        if !(self.influence > 0.0 && self.influence <= 1.0) {
            return Err(ChromaError::InvalidInfluence(self.influence));
        }
        if !(self.position.x.is_finite() && self.position.y.is_finite()) {
            return Err(ChromaError::InvalidConfig(format!(
                "anchor position must be finite, got ({}, {})",
                self.position.x, self.position.y
            )));
        }
        Ok(())
    }

    /// The anchor set for an xy chromaticity diagram: full-strength primaries
    /// near the red, green and blue corners of the spectral locus, and weak
    /// secondaries between them.
    pub fn chromaticity_defaults() -> Vec<ReferenceAnchor> {
        let anchor = |r, g, b, x, y, influence| ReferenceAnchor {
            color: ColorRgb::new(r, g, b),
            position: Point2D::new(x, y),
            influence,
        };
        vec![
            anchor(0.0, 0.0, 1.0, 0.2, 0.0, 1.0),
            anchor(1.0, 0.0, 1.0, 0.45, 0.1, 0.2),
            anchor(1.0, 0.0, 0.0, 0.7, 0.25, 1.0),
            anchor(0.0, 1.0, 1.0, 0.0, 0.4, 0.2),
            anchor(0.0, 1.0, 0.0, 0.1, 0.85, 1.0),
            anchor(1.0, 1.0, 0.0, 0.4, 0.6, 0.2),
        ]
    }
}
