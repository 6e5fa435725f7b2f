//! Interactive density session.
//!
//! A [`Session`] owns the current lattice density and turns discrete key
//! actions into redraw or commit outcomes. Every [`Session::frame`] call
//! regenerates the color field and lattice from the configuration.

use std::time::Instant;

use log::{debug, info};

use crate::color_field::ColorField;
use crate::config::VisualizerConfig;
use crate::error::ChromaError;
use crate::export::save_lattice;
use crate::lattice::{Lattice, MIN_DENSITY};
use crate::locus::SpectralLocus;

/// A discrete user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    DecreaseDensity,
    IncreaseDensity,
    Commit,
}

impl Action {
    /// Maps a key name to an action. Unknown keys map to `None`.
    pub fn from_key(name: &str) -> Option<Action> {
        match name {
            "left" => Some(Action::DecreaseDensity),
            "right" => Some(Action::IncreaseDensity),
            "enter" | "return" => Some(Action::Commit),
            _ => None,
        }
    }
}

/// What the caller should do after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Density is now `density`; draw a fresh frame.
    Redraw { density: usize },
    /// The session committed this lattice and is finished.
    Commit(Lattice),
    /// Nothing changed.
    Ignored,
}

/// Everything needed to draw one view of the diagram.
#[derive(Debug, Clone)]
pub struct Frame {
    pub field: ColorField,
    pub lattice: Lattice,
    pub locus: SpectralLocus,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: VisualizerConfig,
    density: usize,
    finished: bool,
}

impl Session {
    /// Starts a session at the configured density.
    ///
    /// Fails fast with the first configuration error, before any frame is drawn.
    pub fn new(config: VisualizerConfig) -> Result<Self, ChromaError> {
        config.validate()?;
        let density = config.density;
        Ok(Self {
            config,
            density,
            finished: false,
        })
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn density(&self) -> usize {
        self.density
    }

    /// True once a commit has happened.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn apply(&mut self, action: Action) -> Result<Outcome, ChromaError> {
        if self.finished {
            return Ok(Outcome::Ignored);
        }
        let outcome = match action {
            Action::DecreaseDensity => {
                self.density = self.density.saturating_sub(1).max(MIN_DENSITY);
                Outcome::Redraw {
                    density: self.density,
                }
            }
            Action::IncreaseDensity => {
                self.density = self.density.saturating_add(1);
                Outcome::Redraw {
                    density: self.density,
                }
            }
            Action::Commit => {
                let lattice = Lattice::generate(&self.config.primaries, self.density)?;
                self.finished = true;
                Outcome::Commit(lattice)
            }
        };
        debug!("{action:?} -> density {}", self.density);
        Ok(outcome)
    }

    /// Applies the action bound to `key`; unknown keys are ignored.
    pub fn handle_key(&mut self, key: &str) -> Result<Outcome, ChromaError> {
        match Action::from_key(key) {
            Some(action) => self.apply(action),
            None => Ok(Outcome::Ignored),
        }
    }

    /// Regenerates the color field, lattice and locus for the current density.
    pub fn frame(&self) -> Result<Frame, ChromaError> {
        let start = Instant::now();
        let locus = SpectralLocus::cie1931(&self.config.locus)?;
        let domain = match self.config.domain {
            Some(domain) => domain,
            None => locus.bounds()?,
        };
        let field = ColorField::generate(
            domain,
            self.config.resolution,
            &self.config.anchors,
            &self.config.field,
        )?;
        let lattice = Lattice::generate(&self.config.primaries, self.density)?;
        debug!(
            "frame at density {} in {:.1} ms",
            self.density,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(Frame {
            field,
            lattice,
            locus,
        })
    }

    /// Commits and writes the lattice to the configured output path.
    ///
    /// The session only finishes once the file is written, so a failed write
    /// can be retried. Returns `None` if the session had already finished.
    pub fn commit_to_disk(&mut self) -> Result<Option<Lattice>, ChromaError> {
        if self.finished {
            return Ok(None);
        }
        let lattice = Lattice::generate(&self.config.primaries, self.density)?;
        save_lattice(&self.config.output, &lattice)?;
        self.finished = true;
        info!("session committed at density {}", lattice.density());
        Ok(Some(lattice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::load_lattice;

    fn small_config() -> VisualizerConfig {
        VisualizerConfig {
            resolution: 24,
            ..VisualizerConfig::default()
        }
    }

    fn session() -> Session {
        Session::new(small_config()).unwrap()
    }

    #[test]
    fn key_names_map_to_actions() {
        assert_eq!(Action::from_key("left"), Some(Action::DecreaseDensity));
        assert_eq!(Action::from_key("right"), Some(Action::IncreaseDensity));
        assert_eq!(Action::from_key("enter"), Some(Action::Commit));
        assert_eq!(Action::from_key("return"), Some(Action::Commit));
        assert_eq!(Action::from_key("up"), None);
        assert_eq!(Action::from_key(""), None);
    }

    #[test]
    fn starts_at_configured_density() {
        let s = session();
        assert_eq!(s.density(), 5);
        assert!(!s.is_finished());
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = small_config();
        config.anchors.clear();
        assert!(matches!(Session::new(config), Err(ChromaError::EmptyAnchorSet)));
    }

    #[test]
    fn decrease_floors_at_three() {
        let mut s = session();
        assert_eq!(
            s.apply(Action::DecreaseDensity).unwrap(),
            Outcome::Redraw { density: 4 }
        );
        assert_eq!(
            s.apply(Action::DecreaseDensity).unwrap(),
            Outcome::Redraw { density: 3 }
        );
        assert_eq!(
            s.apply(Action::DecreaseDensity).unwrap(),
            Outcome::Redraw { density: 3 }
        );
    }

    #[test]
    fn increase_has_no_upper_bound() {
        let mut s = session();
        for _ in 0..20 {
            s.apply(Action::IncreaseDensity).unwrap();
        }
        assert_eq!(s.density(), 25);
    }

    #[test]
    fn commit_yields_lattice_and_finishes() {
        let mut s = session();
        s.handle_key("right").unwrap();
        match s.handle_key("enter").unwrap() {
            Outcome::Commit(lattice) => {
                assert_eq!(lattice.density(), 6);
                assert_eq!(lattice.len(), 21);
            }
            other => panic!("expected commit, got {other:?}"),
        }
        assert!(s.is_finished());
        assert_eq!(s.handle_key("left").unwrap(), Outcome::Ignored);
        assert_eq!(s.apply(Action::Commit).unwrap(), Outcome::Ignored);
        assert_eq!(s.density(), 6);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut s = session();
        assert_eq!(s.handle_key("space").unwrap(), Outcome::Ignored);
        assert_eq!(s.density(), 5);
        assert!(!s.is_finished());
    }

    #[test]
    fn frame_matches_current_state() {
        let mut s = session();
        s.apply(Action::IncreaseDensity).unwrap();
        let frame = s.frame().unwrap();
        assert_eq!(frame.lattice.density(), 6);
        assert_eq!(frame.field.resolution(), 24);
        assert_eq!(frame.field.data().len(), 24 * 24);
        assert_eq!(frame.field.bounds(), frame.locus.bounds().unwrap());
    }

    #[test]
    fn frame_uses_explicit_domain() {
        let mut config = small_config();
        config.domain = Some(crate::geometry::DomainBounds::new(0.0, 1.0, 0.0, 1.0).unwrap());
        let frame = Session::new(config).unwrap().frame().unwrap();
        assert_eq!(frame.field.bounds().x_max, 1.0);
    }

    #[test]
    fn commit_to_disk_writes_output_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xycoords.csv");
        let mut config = small_config();
        config.output = path.clone();
        config.density = 3;
        let mut s = Session::new(config).unwrap();

        let lattice = s.commit_to_disk().unwrap().unwrap();
        assert_eq!(load_lattice(&path).unwrap().len(), lattice.len());
        assert!(s.commit_to_disk().unwrap().is_none());
    }

    #[test]
    fn failed_export_can_be_retried() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("missing");
        let path = out_dir.join("xy.csv");
        let mut config = small_config();
        config.output = path.clone();
        let mut s = Session::new(config).unwrap();

        assert!(matches!(s.commit_to_disk(), Err(ChromaError::Io(_))));
        assert!(!s.is_finished());
        assert_eq!(s.apply(Action::IncreaseDensity).unwrap(), Outcome::Redraw { density: 6 });

        std::fs::create_dir(&out_dir).unwrap();
        let lattice = s.commit_to_disk().unwrap().unwrap();
        assert_eq!(lattice.density(), 6);
        assert!(s.is_finished());
        assert_eq!(load_lattice(&path).unwrap().len(), 21);
    }
}
