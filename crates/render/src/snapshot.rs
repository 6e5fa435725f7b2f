//! PNG snapshot of a [`Frame`].
//!
//! This module is feature-gated behind `png` (default on) so that frontends
//! that only need the RGBA buffer do not pull in the `image` crate.
//! The rasterization itself lives in [`crate::pixel`] (always available).

use std::path::Path;

use chroma_lattice_core::{ChromaError, Frame};
use log::info;

use crate::pixel::frame_to_rgba;

/// Writes `frame` as a square RGBA PNG.
///
/// Returns `ChromaError::InvalidResolution` if the resolution overflows
/// `u32`, or `ChromaError::Io` on write failure.
pub fn write_png(frame: &Frame, path: &Path) -> Result<(), ChromaError> {
    let rgba = frame_to_rgba(frame);
    let size = u32::try_from(frame.field.resolution()).map_err(|_| ChromaError::InvalidResolution)?;
    let img = image::RgbaImage::from_raw(size, size, rgba)
        .ok_or_else(|| ChromaError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| ChromaError::Io(format!("cannot write {}: {e}", path.display())))?;
    info!("wrote {size}x{size} preview to {}", path.display());
    Ok(())
}
