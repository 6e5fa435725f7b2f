//! Pure-computation RGBA8 rasterization of a [`Frame`].
//!
//! This module is always available (no feature gate) so that the `png`
//! snapshot path and any other frontend share the same conversion.
//!
//! Field row 0 is `y_min`, image row 0 is the top of the picture, so rows
//! are flipped on the way out. Cells outside the spectral locus stay fully
//! transparent. The locus outline and the lattice points are drawn on top in
//! black.

use chroma_lattice_core::color_field::ColorField;
use chroma_lattice_core::{ColorRgb, Frame, Point2D};

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];
const INK: [u8; 4] = [0, 0, 0, 255];
/// Lattice dots cover `(2 * DOT_RADIUS + 1)^2` pixels.
const DOT_RADIUS: usize = 1;

/// Rasterizes `frame` into an `S x S` RGBA8 buffer, `S` the field resolution.
pub fn frame_to_rgba(frame: &Frame) -> Vec<u8> {
    let field = &frame.field;
    let mut canvas = Canvas::new(field.resolution());

    for (row, col, color) in field.iter() {
        if frame.locus.contains(field.position(row, col)) {
            canvas.put(row, col, opaque(color));
        }
    }

    let mut outline = frame.locus.closed();
    if let Some(mut prev) = outline.next() {
        for next in outline {
            canvas.segment(field, prev, next);
            prev = next;
        }
    }

    for &p in frame.lattice.points() {
        if let Some((row, col)) = field.cell_of(p) {
            canvas.dot(row, col);
        }
    }

    canvas.into_rgba()
}

fn opaque(color: ColorRgb) -> [u8; 4] {
    let [r, g, b] = color.to_rgb8();
    [r, g, b, 255]
}

/// Square RGBA8 buffer addressed in field coordinates.
struct Canvas {
    size: usize,
    rgba: Vec<u8>,
}

impl Canvas {
    fn new(size: usize) -> Self {
        Self {
            size,
            rgba: TRANSPARENT.repeat(size * size),
        }
    }

    fn put(&mut self, row: usize, col: usize, px: [u8; 4]) {
        let offset = ((self.size - 1 - row) * self.size + col) * 4;
        self.rgba[offset..offset + 4].copy_from_slice(&px);
    }

    fn dot(&mut self, row: usize, col: usize) {
        let last = self.size - 1;
        for r in row.saturating_sub(DOT_RADIUS)..=(row + DOT_RADIUS).min(last) {
            for c in col.saturating_sub(DOT_RADIUS)..=(col + DOT_RADIUS).min(last) {
                self.put(r, c, INK);
            }
        }
    }

    /// Inks every cell the segment `a..=b` passes through; parts outside the
    /// field bounds are skipped.
    fn segment(&mut self, field: &ColorField, a: Point2D, b: Point2D) {
        let bounds = field.bounds();
        let cells = ((b.x - a.x).abs() / bounds.width())
            .max((b.y - a.y).abs() / bounds.height())
            * field.resolution() as f64;
        let steps = cells.ceil().max(1.0) as usize;
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            let p = Point2D::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
            if let Some((row, col)) = field.cell_of(p) {
                self.put(row, col, INK);
            }
        }
    }

    fn into_rgba(self) -> Vec<u8> {
        self.rgba
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_lattice_core::{Session, VisualizerConfig};

    const SIZE: usize = 64;

    fn frame() -> Frame {
        let config = VisualizerConfig {
            resolution: SIZE,
            density: 3,
            ..VisualizerConfig::default()
        };
        Session::new(config).unwrap().frame().unwrap()
    }

    fn pixel(rgba: &[u8], image_row: usize, col: usize) -> [u8; 4] {
        let i = (image_row * SIZE + col) * 4;
        [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
    }

    #[test]
    fn buffer_is_square_rgba() {
        assert_eq!(frame_to_rgba(&frame()).len(), SIZE * SIZE * 4);
    }

    #[test]
    fn corners_outside_locus_are_transparent() {
        let rgba = frame_to_rgba(&frame());
        assert_eq!(pixel(&rgba, 0, 0), TRANSPARENT);
        assert_eq!(pixel(&rgba, 0, SIZE - 1), TRANSPARENT);
        assert_eq!(pixel(&rgba, SIZE - 1, SIZE - 1), TRANSPARENT);
    }

    #[test]
    fn rows_are_flipped_so_y_grows_upward() {
        let frame = frame();
        let rgba = frame_to_rgba(&frame);
        let (row, col) = frame.field.cell_of(Point2D::new(0.33, 0.33)).unwrap();
        let expected = opaque(frame.field.get(row, col).unwrap());
        assert_eq!(pixel(&rgba, SIZE - 1 - row, col), expected);
    }

    #[test]
    fn lattice_points_are_inked() {
        let frame = frame();
        let rgba = frame_to_rgba(&frame);
        for &p in frame.lattice.points() {
            let (row, col) = frame.field.cell_of(p).unwrap();
            assert_eq!(pixel(&rgba, SIZE - 1 - row, col), INK, "{p:?}");
        }
    }

    #[test]
    fn locus_outline_is_inked() {
        let frame = frame();
        let rgba = frame_to_rgba(&frame);
        for &p in frame.locus.points().iter().step_by(25) {
            let (row, col) = frame.field.cell_of(p).unwrap();
            assert_eq!(pixel(&rgba, SIZE - 1 - row, col), INK, "{p:?}");
        }
    }

    #[test]
    fn single_cell_field_still_rasterizes() {
        let config = VisualizerConfig {
            resolution: 1,
            ..VisualizerConfig::default()
        };
        let frame = Session::new(config).unwrap().frame().unwrap();
        assert_eq!(frame_to_rgba(&frame).len(), 4);
    }
}
