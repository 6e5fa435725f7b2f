//! Plain-text coordinate export.
//!
//! One `x,y` line per point, four decimal places, newline-terminated, no
//! header. Files are truncated on every write.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::ChromaError;
use crate::geometry::Point2D;
use crate::lattice::Lattice;

/// Default export file name.
pub const DEFAULT_OUTPUT: &str = "xycoords.csv";

/// Writes `points` in export format to `writer`.
pub fn write_lattice<W: Write>(mut writer: W, points: &[Point2D]) -> std::io::Result<()> {
    for p in points {
        writeln!(writer, "{:.4},{:.4}", p.x, p.y)?;
    }
    writer.flush()
}

/// Renders `points` in export format.
pub fn format_lattice(points: &[Point2D]) -> String {
    points
        .iter()
        .map(|p| format!("{:.4},{:.4}\n", p.x, p.y))
        .collect()
}

/// Writes `lattice` to `path`, replacing any existing file.
///
/// Returns `ChromaError::Io` if the file cannot be created or written.
pub fn save_lattice(path: &Path, lattice: &Lattice) -> Result<(), ChromaError> {
    let file = File::create(path)
        .map_err(|e| ChromaError::Io(format!("cannot create {}: {e}", path.display())))?;
    write_lattice(BufWriter::new(file), lattice.points())
        .map_err(|e| ChromaError::Io(format!("cannot write {}: {e}", path.display())))?;
    info!(
        "exported {} points (density {}) to {}",
        lattice.len(),
        lattice.density(),
        path.display()
    );
    Ok(())
}

/// Parses export-format text back into points.
///
/// Blank lines are skipped. Any other line must be two comma-separated
/// finite numbers, otherwise `ChromaError::InvalidExport` names the 1-based
/// line number.
pub fn parse_lattice(text: &str) -> Result<Vec<Point2D>, ChromaError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            parse_line(line).map_err(|reason| ChromaError::InvalidExport { line: n + 1, reason })
        })
        .collect()
}

/// Reads and parses an export file.
pub fn load_lattice(path: &Path) -> Result<Vec<Point2D>, ChromaError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ChromaError::Io(format!("cannot read {}: {e}", path.display())))?;
    parse_lattice(&text)
}

fn parse_line(line: &str) -> Result<Point2D, String> {
    let (x, y) = line
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {line:?}"))?;
    let coord = |s: &str| {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("not a finite number: {s:?}"))
    };
    Ok(Point2D::new(coord(x)?, coord(y)?))
}
