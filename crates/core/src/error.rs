//! Error types for the chroma-lattice core.

use thiserror::Error;

/// Errors produced by the color field, lattice, export and session operations.
#[derive(Debug, Error)]
pub enum ChromaError {
    /// Domain bounds were non-finite or not strictly increasing on an axis.
    #[error("invalid domain: x in [{x_min}, {x_max}], y in [{y_min}, {y_max}] (need min < max on both axes)")]
    InvalidDomain {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    /// Lattice density below the minimum of 3.
    #[error("invalid density {0}: lattice density must be at least 3")]
    InvalidDensity(usize),

    /// The color field was asked to blend zero anchors.
    #[error("empty anchor set: at least one reference anchor is required")]
    EmptyAnchorSet,

    /// Sampling resolution was zero, or `resolution * resolution` overflows `usize`.
    #[error("invalid resolution: sampling resolution must be non-zero")]
    InvalidResolution,

    /// Saturation strength outside (0, 1].
    #[error("invalid strength {0}: must lie in (0, 1]")]
    InvalidStrength(f64),

    /// Smoothing bandwidth was zero, negative or non-finite.
    #[error("invalid bandwidth {0}: must be finite and greater than zero")]
    InvalidBandwidth(f64),

    /// Anchor influence outside (0, 1].
    #[error("invalid anchor influence {0}: must lie in (0, 1]")]
    InvalidInfluence(f64),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A line of an exported coordinate file could not be parsed.
    #[error("invalid export record at line {line}: {reason}")]
    InvalidExport { line: usize, reason: String },

    /// Configuration could not be parsed or failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ChromaError {
    fn from(e: std::io::Error) -> Self {
        ChromaError::Io(e.to_string())
    }
}
