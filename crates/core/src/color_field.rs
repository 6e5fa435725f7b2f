//! Radial-basis-function color field over a rectangular domain.
//!
//! A [`ColorField`] stores `resolution * resolution` display colors in
//! row-major layout. Row 0 lies on `y_min` and column 0 on `x_min`; sample
//! positions are spaced linearly and include both ends of each axis.
//!
//! Each cell blends every [`ReferenceAnchor`] with a Gaussian weight
//! `exp(-d^2 / (2 r^2)) * influence`, normalizes by the weight sum, companded
//! through a [`GammaPolicy`] and finally pulled toward white by the strength
//! `alpha`. The field is rebuilt wholesale whenever its inputs change.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::anchor::ReferenceAnchor;
use crate::color::{ColorRgb, GammaPolicy};
use crate::error::ChromaError;
use crate::geometry::{DomainBounds, Point2D};

/// Lower clamp on a cell's weight sum before normalizing.
const MIN_WEIGHT_SUM: f64 = 1e-6;
/// Default Gaussian bandwidth, in domain units.
pub const DEFAULT_BANDWIDTH: f64 = 0.18;
/// Default saturation strength.
pub const DEFAULT_STRENGTH: f64 = 0.9;

/// Whether weight sums are rescaled by their global maximum before normalizing.
///
/// `Normalized` divides every weight sum by the largest one in the grid, so
/// cells where anchors overlap come out brighter and wash toward white.
/// `Off` normalizes each cell by its raw weight sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhiteningPolicy {
    #[default]
    Normalized,
    Off,
}

/// Tunable blending parameters for [`ColorField::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorFieldParams {
    /// Gaussian smoothing bandwidth `r` (> 0).
    pub bandwidth: f64,
    /// Saturation strength `alpha` in (0, 1]; 1 keeps full color.
    pub strength: f64,
    pub gamma: GammaPolicy,
    pub whitening: WhiteningPolicy,
}

impl Default for ColorFieldParams {
    fn default() -> Self {
        Self {
            bandwidth: DEFAULT_BANDWIDTH,
            strength: DEFAULT_STRENGTH,
            gamma: GammaPolicy::Srgb,
            whitening: WhiteningPolicy::Normalized,
        }
    }
}

impl ColorFieldParams {
    pub fn validate(&self) -> Result<(), ChromaError> {
        if !(self.strength > 0.0 && self.strength <= 1.0) {
            return Err(ChromaError::InvalidStrength(self.strength));
        }
        if !(self.bandwidth.is_finite() && self.bandwidth > 0.0) {
            return Err(ChromaError::InvalidBandwidth(self.bandwidth));
        }
        self.gamma.validate()
    }
}

/// A square grid of blended display colors over a [`DomainBounds`].
#[derive(Debug, Clone)]
pub struct ColorField {
    resolution: usize,
    bounds: DomainBounds,
    data: Vec<ColorRgb>,
}

impl ColorField {
    /// Blends `anchors` over an `resolution x resolution` grid spanning `bounds`.
    ///
    /// Fails with `InvalidDomain`, `InvalidResolution`, `EmptyAnchorSet`,
    /// `InvalidStrength`, `InvalidBandwidth` or `InvalidInfluence` when the
    /// corresponding input is out of range. Pure and deterministic.
    pub fn generate(
        bounds: DomainBounds,
        resolution: usize,
        anchors: &[ReferenceAnchor],
        params: &ColorFieldParams,
    ) -> Result<Self, ChromaError> {
        bounds.validate()?;
        if resolution == 0 {
            return Err(ChromaError::InvalidResolution);
        }
        let len = resolution
            .checked_mul(resolution)
            .ok_or(ChromaError::InvalidResolution)?;
        if anchors.is_empty() {
            return Err(ChromaError::EmptyAnchorSet);
        }
        params.validate()?;
        anchors.iter().try_for_each(ReferenceAnchor::validate)?;

        let two_r2 = 2.0 * params.bandwidth * params.bandwidth;
        let mut sums = Vec::with_capacity(len);
        let mut weights = Vec::with_capacity(len);
        for row in 0..resolution {
            let y = axis_value(bounds.y_min, bounds.y_max, row, resolution);
            for col in 0..resolution {
                let p = Point2D::new(axis_value(bounds.x_min, bounds.x_max, col, resolution), y);
                let (sum, weight) = anchors.iter().fold(
                    (ColorRgb::BLACK, 0.0),
                    |(sum, weight), a| {
                        let w = (-p.distance_squared(a.position) / two_r2).exp() * a.influence;
                        (sum + a.color.scale(w), weight + w)
                    },
                );
                sums.push(sum);
                weights.push(weight);
            }
        }

        let max_weight = weights.iter().copied().fold(0.0_f64, f64::max);
        let rescale = match params.whitening {
            WhiteningPolicy::Normalized if max_weight > 0.0 => max_weight.recip(),
            _ => 1.0,
        };

        let data = sums
            .into_iter()
            .zip(weights)
            .map(|(sum, weight)| {
                let linear = sum.scale((weight * rescale).max(MIN_WEIGHT_SUM).recip());
                params
                    .gamma
                    .encode(linear)
                    .whiten(params.strength)
                    .clamp_unit()
            })
            .collect();

        debug!(
            "color field {resolution}x{resolution} from {} anchors (max weight {max_weight:.4}, {:?})",
            anchors.len(),
            params.whitening
        );

        Ok(Self {
            resolution,
            bounds,
            data,
        })
    }

    /// Samples per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn bounds(&self) -> DomainBounds {
        self.bounds
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[ColorRgb] {
        &self.data
    }

    /// Color at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<ColorRgb> {
        if row >= self.resolution || col >= self.resolution {
            return None;
        }
        Some(self.data[row * self.resolution + col])
    }

    /// Domain position of the sample at `(row, col)`.
    pub fn position(&self, row: usize, col: usize) -> Point2D {
        Point2D::new(
            axis_value(self.bounds.x_min, self.bounds.x_max, col, self.resolution),
            axis_value(self.bounds.y_min, self.bounds.y_max, row, self.resolution),
        )
    }

    /// Nearest grid cell `(row, col)` to `p`, or `None` when `p` lies outside the bounds.
    pub fn cell_of(&self, p: Point2D) -> Option<(usize, usize)> {
        if !self.bounds.contains(p) {
            return None;
        }
        let last = (self.resolution - 1) as f64;
        let col = ((p.x - self.bounds.x_min) / self.bounds.width() * last).round() as usize;
        let row = ((p.y - self.bounds.y_min) / self.bounds.height() * last).round() as usize;
        Some((row.min(self.resolution - 1), col.min(self.resolution - 1)))
    }

    /// Iterates over all cells yielding `(row, col, color)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, ColorRgb)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &c)| (i / self.resolution, i % self.resolution, c))
    }
}

/// `i`-th of `n` evenly spaced values on `[min, max]`, both ends included.
fn axis_value(min: f64, max: f64, i: usize, n: usize) -> f64 {
    if n == 1 {
        return min;
    }
    if i == n - 1 {
        return max;
    }
    min + (max - min) * i as f64 / (n - 1) as f64
}
