#![deny(unsafe_code)]
//! Frame rasterization for chroma-lattice.
//!
//! [`pixel`] turns a core `Frame` (color field, lattice and spectral locus)
//! into an RGBA8 buffer. [`snapshot`] writes that buffer as a PNG preview.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::frame_to_rgba;
