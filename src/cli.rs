//! Command-line front end
//!
//! Every subcommand produces a JSON value; `main` prints it to stdout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{debug, info};

use penplot_designer::{
    placed_corners, sample_document, ArtTransform, ArtTransformAction, PlacementSession,
    SvgDocument, ViewportSize,
};
use penplot_settings::{default_path, Config, SettingsPersistence};
use penplot_visualizer::{ToolpathCache, StrokeStats};

#[derive(Debug, Parser)]
#[command(name = "penplot", version, about = "Pen-plotter toolpath tools")]
pub struct Cli {
    /// Config file (.toml or .json). Defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sample an SVG into pen frames and print the summary
    Sample {
        file: PathBuf,
        /// Include the full frame list
        #[arg(long)]
        frames: bool,
        /// Override the sampling step
        #[arg(long)]
        step: Option<f64>,
    },
    /// Recover pen-down strokes from a G-code program
    Strokes { file: PathBuf },
    /// Check an artwork placement against the machine bed
    Place {
        file: PathBuf,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x_mm: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        y_mm: f64,
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        rotation: f64,
        /// Stage size in pixels, as WIDTHxHEIGHT
        #[arg(long, value_parser = parse_viewport)]
        viewport: Option<ViewportSize>,
    },
}

/// Parses `"800x600"` into a viewport size.
pub fn parse_viewport(s: &str) -> std::result::Result<ViewportSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && *n > 0.0)
            .ok_or_else(|| format!("invalid viewport dimension '{v}'"))
    };
    Ok(ViewportSize::new(parse(w)?, parse(h)?))
}

/// Loads the explicit config, or the default location when it is usable.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(match default_path() {
            Ok(path) => SettingsPersistence::open_or_default(path).config().clone(),
            Err(_) => Config::default(),
        }),
    }
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn run(cli: &Cli) -> Result<Value> {
    let config = load_config(cli.config.as_deref())?;
    debug!("Using machine {:?}", config.machine);

    match &cli.command {
        Command::Sample { file, frames, step } => {
            let text = read_input(file)?;
            let document = SvgDocument::parse(&text)
                .with_context(|| format!("Failed to parse {}", file.display()))?;

            let mut sampler = config.sampler_config();
            if let Some(step) = step {
                if !(step.is_finite() && *step > 0.0) {
                    bail!("--step must be > 0");
                }
                sampler.step = *step;
            }

            let toolpath = sample_document(&document, &sampler);
            info!("Sampled {} frames", toolpath.frames.len());

            let mut out = json!({
                "size": document.size(),
                "frame_count": toolpath.frames.len(),
                "summary": toolpath.summary,
            });
            if *frames {
                out["frames"] = serde_json::to_value(&toolpath.frames)?;
            }
            Ok(out)
        }

        Command::Strokes { file } => {
            let text = read_input(file)?;
            let mut cache = ToolpathCache::new();
            cache.load(&text);
            let stats: StrokeStats = cache.stats();
            info!("Recovered {} strokes", stats.strokes);

            Ok(json!({
                "stats": stats,
                "strokes": cache.strokes(),
            }))
        }

        Command::Place {
            file,
            x_mm,
            y_mm,
            scale,
            rotation,
            viewport,
        } => {
            let text = read_input(file)?;
            let document = SvgDocument::parse(&text)
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            let art = document.size();

            let mut session =
                PlacementSession::new(config.machine, viewport.unwrap_or_default())
                    .with_snap(config.snap_step())
                    .with_nudge(config.nudge);
            session.set_art(art);

            let candidate = ArtTransform::new(*x_mm, *y_mm, *scale, *rotation);
            let outcome = session.dispatch(&ArtTransformAction::Set { value: candidate });

            let bed = session.bed();
            let base_scale = session.base_scale();
            let corners = art.map(|art| placed_corners(&candidate, art, base_scale, &bed));

            Ok(json!({
                "accepted": outcome.accepted,
                "requested": candidate,
                "transform": outcome.transform,
                "art": art,
                "bed": bed,
                "base_scale": base_scale,
                "corners_px": corners,
            }))
        }
    }
}
