#![deny(unsafe_code)]
//! Core types for the chroma-lattice chromaticity visualizer.
//!
//! Provides the RBF `ColorField` blended from `ReferenceAnchor`s, the
//! barycentric `Lattice` inside a `PrimaryTriple`, the CIE 1931
//! `SpectralLocus`, plain-text coordinate export, `VisualizerConfig` and the
//! interactive density `Session`.

pub mod anchor;
pub mod color;
pub mod color_field;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod lattice;
pub mod locus;
pub mod session;

pub use anchor::ReferenceAnchor;
pub use color::{ColorRgb, GammaPolicy};
pub use color_field::{ColorField, ColorFieldParams, WhiteningPolicy};
pub use config::VisualizerConfig;
pub use error::ChromaError;
pub use geometry::{DomainBounds, Point2D, PrimaryTriple};
pub use lattice::{BarycentricIndex, Lattice};
pub use locus::{LocusParams, SpectralLocus};
pub use session::{Action, Frame, Outcome, Session};
