//! Visualizer configuration.
//!
//! A [`VisualizerConfig`] captures everything needed to reproduce a diagram:
//! primaries, anchors, blending parameters, grid sizes and the export path.
//! Every field has a default, so `{}` is a complete configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::anchor::ReferenceAnchor;
use crate::color_field::ColorFieldParams;
use crate::error::ChromaError;
use crate::export::DEFAULT_OUTPUT;
use crate::geometry::{DomainBounds, PrimaryTriple};
use crate::lattice::{DEFAULT_DENSITY, MIN_DENSITY};
use crate::locus::{LocusParams, SpectralLocus};

/// Default color field samples per axis.
pub const DEFAULT_RESOLUTION: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub primaries: PrimaryTriple,
    pub anchors: Vec<ReferenceAnchor>,
    pub field: ColorFieldParams,
    pub resolution: usize,
    /// Starting lattice density.
    pub density: usize,
    pub output: PathBuf,
    /// Color field domain. `None` uses the spectral locus bounding box.
    pub domain: Option<DomainBounds>,
    pub locus: LocusParams,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            primaries: PrimaryTriple::default(),
            anchors: ReferenceAnchor::chromaticity_defaults(),
            field: ColorFieldParams::default(),
            resolution: DEFAULT_RESOLUTION,
            density: DEFAULT_DENSITY,
            output: PathBuf::from(DEFAULT_OUTPUT),
            domain: None,
            locus: LocusParams::default(),
        }
    }
}

impl VisualizerConfig {
    /// Parses a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ChromaError> {
        serde_json::from_str(json).map_err(|e| ChromaError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ChromaError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ChromaError::Io(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Checks every field without generating anything.
    pub fn validate(&self) -> Result<(), ChromaError> {
        if let Some(domain) = &self.domain {
            domain.validate()?;
        }
        if self.resolution == 0 || self.resolution.checked_mul(self.resolution).is_none() {
            return Err(ChromaError::InvalidResolution);
        }
        if self.density < MIN_DENSITY {
            return Err(ChromaError::InvalidDensity(self.density));
        }
        if self.anchors.is_empty() {
            return Err(ChromaError::EmptyAnchorSet);
        }
        self.field.validate()?;
        self.anchors.iter().try_for_each(ReferenceAnchor::validate)?;
        let corners = [
            self.primaries.red,
            self.primaries.green,
            self.primaries.blue,
        ];
        if corners.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(ChromaError::InvalidConfig(
                "primaries must have finite coordinates".into(),
            ));
        }
        SpectralLocus::cie1931(&self.locus)?;
        Ok(())
    }

    /// The explicit domain, or the bounding box of the spectral locus.
    pub fn resolved_domain(&self) -> Result<DomainBounds, ChromaError> {
        match self.domain {
            Some(domain) => {
                domain.validate()?;
                Ok(domain)
            }
            None => SpectralLocus::cie1931(&self.locus)?.bounds(),
        }
    }
}
