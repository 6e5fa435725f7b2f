//! Barycentric (triangular) lattice inside a primary triangle.
//!
//! For density `N` the lattice holds every point
//! `(i * red + j * green + k * blue) / (N - 1)` with non-negative integers
//! `i + j + k = N - 1`. Points are ordered with `i` ascending in the outer loop
//! and `j` ascending in the inner loop; export files and consumers rely on
//! this order.

use log::{debug, warn};

use crate::error::ChromaError;
use crate::geometry::{Point2D, PrimaryTriple};

/// Smallest density the generator accepts.
pub const MIN_DENSITY: usize = 3;
/// Density a new session starts at.
pub const DEFAULT_DENSITY: usize = 5;

/// Integer barycentric coordinates of one lattice point; `i + j + k == N - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarycentricIndex {
    /// Steps toward the red primary.
    pub i: usize,
    /// Steps toward the green primary.
    pub j: usize,
    /// Steps toward the blue primary.
    pub k: usize,
}

impl BarycentricIndex {
    /// Normalized weights `(i, j, k) / (N - 1)` for red, green and blue.
    pub fn weights(&self) -> (f64, f64, f64) {
        let total = (self.i + self.j + self.k) as f64;
        (
            self.i as f64 / total,
            self.j as f64 / total,
            self.k as f64 / total,
        )
    }
}

/// An ordered triangular lattice of points generated from a [`PrimaryTriple`].
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    density: usize,
    points: Vec<Point2D>,
}

impl Lattice {
    /// Generates the lattice of `density` points per triangle edge.
    ///
    /// Returns `ChromaError::InvalidDensity` when `density < 3`. A degenerate
    /// triple is not rejected; it simply yields collinear points.
    pub fn generate(primaries: &PrimaryTriple, density: usize) -> Result<Self, ChromaError> {
        let indices = Self::indices(density)?;
        if primaries.is_degenerate() {
            warn!("primaries are collinear; lattice density {density} collapses onto a line");
        }
        let denom = (density - 1) as f64;
        let points: Vec<Point2D> = indices
            .map(|BarycentricIndex { i, j, k }| {
                let (i, j, k) = (i as f64, j as f64, k as f64);
                let num = primaries.combine(i, j, k);
                Point2D::new(num.x / denom, num.y / denom)
            })
            .collect();
        debug!("lattice density {density}: {} points", points.len());
        Ok(Self { density, points })
    }

    /// Barycentric indices for `density`, in lattice order.
    pub fn indices(density: usize) -> Result<impl Iterator<Item = BarycentricIndex>, ChromaError> {
        if density < MIN_DENSITY {
            return Err(ChromaError::InvalidDensity(density));
        }
        Ok(index_order(density))
    }

    /// Number of points a lattice of `density` holds: `N (N + 1) / 2`.
    ///
    /// `None` when the count does not fit in a `usize`.
    pub fn point_count(density: usize) -> Option<usize> {
        let next = density.checked_add(1)?;
        if density % 2 == 0 {
            (density / 2).checked_mul(next)
        } else {
            density.checked_mul(next / 2)
        }
    }

    pub fn density(&self) -> usize {
        self.density
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point2D> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a generated lattice.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pairs every point with its barycentric index.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (BarycentricIndex, Point2D)> + '_ {
        index_order(self.density).zip(self.points.iter().copied())
    }
}

/// `(i, j, k)` triples for `density >= 1`, `i` outer and `j` inner, both ascending.
fn index_order(density: usize) -> impl Iterator<Item = BarycentricIndex> {
    let max = density - 1;
    (0..=max).flat_map(move |i| {
        (0..=max - i).map(move |j| BarycentricIndex {
            i,
            j,
            k: max - i - j,
        })
    })
}
