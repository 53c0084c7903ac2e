//! Application entry point for the hero particle field viewer.
//!
//! This binary parses the command line, sets up logging, loads the field
//! configuration and hands control to [`Viewer`] through eframe.

mod host;
mod viewer;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use hero_core::config::Config;
use tracing::info;
use viewer::Viewer;

#[derive(Parser, Debug)]
#[command(about = "Animated particle field with proximity links")]
struct Args {
    /// YAML file overriding parts of the default field configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with the reduced-motion preference active.
    #[arg(long)]
    reduced_motion: bool,

    /// Seed for a reproducible particle layout.
    #[arg(long)]
    seed: Option<u64>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let file =
        File::open(path).with_context(|| format!("failed to open config {}", path.display()))?;
    let cfg: Config = serde_yaml::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(cfg)
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` once the window is closed.
/// - `Err` if the configuration cannot be loaded or validated, or if
///   eframe fails to create the native window or event loop.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let cfg = load_config(args.config.as_deref())?;
    cfg.validate().context("invalid field configuration")?;
    info!(
        particles = cfg.particle_count,
        link_distance = cfg.link_distance,
        reduced_motion = args.reduced_motion,
        "starting hero field viewer"
    );

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Hero Field",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(Viewer::new(cfg, args.reduced_motion, args.seed)))
        }),
    )
    .map_err(|err| anyhow!("viewer exited with an error: {err}"))
}
