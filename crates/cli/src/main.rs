#![deny(unsafe_code)]
//! CLI binary for the chroma-lattice chromaticity visualizer.
//!
//! Subcommands:
//! - `render`: draw the color field, locus and lattice to a PNG
//! - `export`: write the lattice coordinates file
//! - `interactive`: adjust density from stdin keys, export on enter
//! - `locus`: print the spectral locus domain bounds

mod error;
mod interactive;

use chroma_lattice_core::{Session, SpectralLocus, VisualizerConfig};
use chroma_lattice_render::snapshot::write_png;
use clap::{Parser, Subcommand};
use error::CliError;
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "chroma-lattice", about = "Chromaticity diagram and barycentric lattice tool")]
struct Cli {
    /// JSON configuration file; missing fields take their defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the diagram with the lattice overlay to a PNG.
    Render {
        /// Lattice density (points per triangle edge).
        #[arg(short, long)]
        density: Option<usize>,

        /// Color field samples per axis.
        #[arg(short, long)]
        resolution: Option<usize>,

        /// Output file path.
        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,
    },
    /// Write the lattice coordinates as `x,y` lines.
    Export {
        /// Lattice density (points per triangle edge).
        #[arg(short, long)]
        density: Option<usize>,

        /// Output file path (default from config, `xycoords.csv`).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read keys from stdin: left/h/-, right/l/+, enter or an empty line.
    Interactive {
        /// Re-render this PNG on every density change.
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Export file path (default from config, `xycoords.csv`).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the spectral locus bounding box used as the default domain.
    Locus,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    }
    builder.init();
}

fn load_config(path: Option<&Path>) -> Result<VisualizerConfig, CliError> {
    match path {
        None => Ok(VisualizerConfig::default()),
        Some(path) => {
            VisualizerConfig::load(path).map_err(|e| CliError::from_config_error(path, e))
        }
    }
}

fn print_summary(json: bool, info: serde_json::Value, text: String) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!("{text}");
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Render {
            density,
            resolution,
            output,
        } => {
            config.density = density.unwrap_or(config.density);
            config.resolution = resolution.unwrap_or(config.resolution);
            let session = Session::new(config)?;
            let frame = session.frame()?;
            write_png(&frame, &output)?;
            print_summary(
                cli.json,
                serde_json::json!({
                    "density": frame.lattice.density(),
                    "points": frame.lattice.len(),
                    "resolution": frame.field.resolution(),
                    "domain": frame.field.bounds(),
                    "output": output.display().to_string(),
                }),
                format!(
                    "rendered density {} ({} points, {res}x{res}) -> {}",
                    frame.lattice.density(),
                    frame.lattice.len(),
                    output.display(),
                    res = frame.field.resolution(),
                ),
            )?;
        }
        Command::Export { density, output } => {
            config.density = density.unwrap_or(config.density);
            config.output = output.unwrap_or(config.output);
            let output = config.output.clone();
            let mut session = Session::new(config)?;
            if let Some(lattice) = session.commit_to_disk()? {
                print_summary(
                    cli.json,
                    serde_json::json!({
                        "density": lattice.density(),
                        "points": lattice.len(),
                        "output": output.display().to_string(),
                    }),
                    format!(
                        "exported {} points (density {}) -> {}",
                        lattice.len(),
                        lattice.density(),
                        output.display()
                    ),
                )?;
            }
        }
        Command::Interactive { preview, output } => {
            config.output = output.unwrap_or(config.output);
            let output = config.output.clone();
            let mut session = Session::new(config)?;
            let stdin = std::io::stdin();
            match interactive::run(&mut session, stdin.lock(), preview.as_deref())? {
                Some(lattice) => print_summary(
                    cli.json,
                    serde_json::json!({
                        "committed": true,
                        "density": lattice.density(),
                        "points": lattice.len(),
                        "output": output.display().to_string(),
                    }),
                    format!(
                        "committed density {} -> {}",
                        lattice.density(),
                        output.display()
                    ),
                )?,
                None => print_summary(
                    cli.json,
                    serde_json::json!({
                        "committed": false,
                        "density": session.density(),
                    }),
                    "no commit; nothing exported".to_string(),
                )?,
            }
        }
        Command::Locus => {
            config.validate()?;
            let locus = SpectralLocus::cie1931(&config.locus)?;
            let bounds = locus.bounds()?;
            if cli.json {
                let info = serde_json::json!({
                    "locus": config.locus,
                    "points": locus.points().len(),
                    "bounds": bounds,
                    "domain": config.resolved_domain()?,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "x: [{:.4}, {:.4}]  y: [{:.4}, {:.4}]",
                    bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
