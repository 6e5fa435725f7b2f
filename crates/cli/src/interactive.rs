//! Line-driven density session.
//!
//! Each input line names one key. Aliases: `h` and `-` for `left`, `l` and
//! `+` for `right`, an empty line for `enter`.

use std::io::BufRead;
use std::path::Path;

use chroma_lattice_core::{Action, Lattice, Outcome, Session};
use chroma_lattice_render::snapshot::write_png;
use log::{debug, info};

use crate::error::CliError;

/// Maps an input line to the key name a [`Session`] understands.
pub fn key_name(line: &str) -> &str {
    match line.trim() {
        "" => "enter",
        "h" | "-" => "left",
        "l" | "+" => "right",
        other => other,
    }
}

/// Drives `session` from `input` until commit or end of input.
///
/// Re-renders `preview` before the first key and after every redraw. Returns
/// the exported lattice, or `None` when input ran out before a commit.
pub fn run<R: BufRead>(
    session: &mut Session,
    input: R,
    preview: Option<&Path>,
) -> Result<Option<Lattice>, CliError> {
    render_preview(session, preview)?;
    for line in input.lines() {
        let line = line?;
        let key = key_name(&line);
        if Action::from_key(key) == Some(Action::Commit) {
            return Ok(session.commit_to_disk()?);
        }
        match session.handle_key(key)? {
            Outcome::Redraw { density } => {
                eprintln!("density {density}");
                render_preview(session, preview)?;
            }
            Outcome::Commit(_) | Outcome::Ignored => debug!("ignored key {key:?}"),
        }
    }
    info!("input closed before commit; nothing exported");
    Ok(None)
}

fn render_preview(session: &Session, preview: Option<&Path>) -> Result<(), CliError> {
    if let Some(path) = preview {
        write_png(&session.frame()?, path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_lattice_core::export::load_lattice;
    use chroma_lattice_core::VisualizerConfig;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn session(output: PathBuf) -> Session {
        let config = VisualizerConfig {
            resolution: 16,
            output,
            ..VisualizerConfig::default()
        };
        Session::new(config).unwrap()
    }

    #[test]
    fn aliases_map_to_key_names() {
        assert_eq!(key_name("h"), "left");
        assert_eq!(key_name("-"), "left");
        assert_eq!(key_name("l"), "right");
        assert_eq!(key_name("+"), "right");
        assert_eq!(key_name(""), "enter");
        assert_eq!(key_name("  \r"), "enter");
        assert_eq!(key_name(" right "), "right");
        assert_eq!(key_name("space"), "space");
    }

    #[test]
    fn commit_exports_at_adjusted_density() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("xycoords.csv");
        let mut s = session(output.clone());

        let input = Cursor::new("right\nl\nh\nbogus\n\nright\n");
        let lattice = run(&mut s, input, None).unwrap().unwrap();

        assert_eq!(lattice.density(), 6);
        assert_eq!(load_lattice(&output).unwrap().len(), 21);
        assert!(s.is_finished());
    }

    #[test]
    fn failed_export_surfaces_error_and_keeps_session_open() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("xycoords.csv");
        let mut s = session(output.clone());

        let err = run(&mut s, Cursor::new("right

"), None).unwrap_err();
        assert_eq!(err.exit_code(), 11);
        assert!(!s.is_finished());

        std::fs::create_dir(dir.path().join("missing")).unwrap();
        let lattice = run(&mut s, Cursor::new("enter
"), None).unwrap().unwrap();
        assert_eq!(lattice.density(), 6);
        assert_eq!(load_lattice(&output).unwrap().len(), 21);
    }

    #[test]
    fn end_of_input_exports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("xycoords.csv");
        let mut s = session(output.clone());

        let result = run(&mut s, Cursor::new("left\nleft\nleft\n"), None).unwrap();

        assert!(result.is_none());
        assert_eq!(s.density(), 3);
        assert!(!output.exists());
    }

    #[test]
    fn preview_is_written_before_first_key() {
        let dir = tempfile::tempdir().unwrap();
        let preview = dir.path().join("preview.png");
        let mut s = session(dir.path().join("xycoords.csv"));

        run(&mut s, Cursor::new(""), Some(&preview)).unwrap();

        assert!(preview.exists());
    }
}
