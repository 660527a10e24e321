#![deny(unsafe_code)]
//! CLI binary for the mural pencil-sketch engine.
//!
//! Subcommands:
//! - `sketch <image>` — run the agent simulation N frames, write PNG
//! - `filter <image>` — one-shot sketchify filter, write PNG

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use mural_pencil::PencilParams;
use mural_session::{snapshot, SessionConfig, SketchSession};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "mural", about = "Pencil-sketch particle simulation CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the agent simulation over an image and write the stroke raster.
    Sketch {
        /// Source image path (PNG or JPEG).
        image: PathBuf,

        /// Maximum fitted width in pixels.
        #[arg(short = 'W', long, default_value_t = 640)]
        max_width: usize,

        /// Maximum fitted height in pixels.
        #[arg(short = 'H', long, default_value_t = 640)]
        max_height: usize,

        /// Number of animation frames to simulate.
        #[arg(short, long, default_value_t = 60)]
        frames: usize,

        /// Engine steps per frame.
        #[arg(short, long, default_value_t = 800)]
        batch: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of agents in the pool.
        #[arg(long, default_value_t = 1)]
        pool: usize,

        /// Engine parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Output file path.
        #[arg(short, long, default_value = "sketch.png")]
        output: PathBuf,
    },
    /// Apply the one-shot sketch filter to an image.
    Filter {
        /// Source image path (PNG or JPEG).
        image: PathBuf,

        /// Box blur radius.
        #[arg(short, long, default_value_t = mural_filter::DEFAULT_BLUR_RADIUS)]
        radius: usize,

        /// Output file path.
        #[arg(short, long, default_value = "filtered.png")]
        output: PathBuf,
    },
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Sketch {
            image,
            max_width,
            max_height,
            frames,
            batch,
            seed,
            pool,
            params,
            output,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let mut pencil = PencilParams::from_json(&params);
            pencil.pool_size = pool.max(1);

            let bytes = fs::read(&image)
                .map_err(|e| CliError::Io(format!("{}: {e}", image.display())))?;

            let mut session = SketchSession::new(SessionConfig {
                max_width,
                max_height,
                batch,
                seed,
                pencil,
            });
            session.start(&bytes)?;
            for _ in 0..frames {
                session.frame()?;
            }

            let raster = session.raster().ok_or_else(|| {
                CliError::Engine(mural_core::SketchError::InvalidDimensions)
            })?;
            snapshot::write_png(raster, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "image": image.display().to_string(),
                    "width": raster.width(),
                    "height": raster.height(),
                    "frames": frames,
                    "batch": batch,
                    "seed": seed,
                    "pool": pencil.pool_size,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "sketched {} ({}x{}, {frames} frames x {batch} steps, seed {seed}) -> {}",
                    image.display(),
                    raster.width(),
                    raster.height(),
                    output.display()
                );
            }
        }
        Command::Filter {
            image,
            radius,
            output,
        } => {
            let bytes = fs::read(&image)
                .map_err(|e| CliError::Io(format!("{}: {e}", image.display())))?;
            let png = mural_filter::sketchify_bytes(&bytes, radius)?;
            fs::write(&output, png)
                .map_err(|e| CliError::Io(format!("{}: {e}", output.display())))?;

            if cli.json {
                let info = serde_json::json!({
                    "image": image.display().to_string(),
                    "radius": radius,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "filtered {} (radius {radius}) -> {}",
                    image.display(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
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
