//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success (including EOF before commit in `interactive`)
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: core error (bad domain, density, anchors, blending parameters)
//! - 11: I/O error (config read, export, preview write, stdin)
//! - 12: input error (malformed config file)
//! - 13: serialization error

use chroma_lattice_core::ChromaError;
use std::fmt;
use std::path::Path;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A core validation or generation error.
    Core(ChromaError),
    /// An I/O error (file read/write, stdin).
    Io(String),
    /// A user input error (unparseable config).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }

    /// Classifies a failure to load or check the config file at `path`.
    ///
    /// Unparseable JSON is an input error, an unreadable file an I/O error,
    /// and a well-formed but out-of-range value a core error.
    pub fn from_config_error(path: &Path, e: ChromaError) -> Self {
        match e {
            ChromaError::InvalidConfig(msg) => {
                CliError::Input(format!("invalid config {}: {msg}", path.display()))
            }
            other => other.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Core(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<ChromaError> for CliError {
    fn from(e: ChromaError) -> Self {
        match e {
            ChromaError::Io(msg) => CliError::Io(msg),
            other => CliError::Core(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
