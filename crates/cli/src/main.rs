#![deny(unsafe_code)]
//! CLI binary for the flower vector-field simulation.
//!
//! Subcommands:
//! - `render <stroke>` — run a scripted brush for N frames, write a PNG
//! - `list` — print available stroke scripts

mod error;
mod stroke;

use clap::{Parser, Subcommand};
use error::CliError;
use flower_core::{Flower, FlowerParams};
use flower_raster::{render_frame, LineCanvas};
use std::path::PathBuf;
use std::process;
use stroke::{Stroke, StrokeScript};

#[derive(Parser)]
#[command(name = "flower", about = "Vector-field flower simulation CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scripted brush stroke for N frames and write a PNG snapshot.
    Render {
        /// Stroke script name (e.g. "orbit").
        stroke: String,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 1024)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 1024)]
        height: usize,

        /// Number of simulated frames.
        #[arg(short, long, default_value_t = 600)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Brush radius in normalized viewport units.
        #[arg(short, long, default_value_t = 0.1)]
        radius: f32,

        /// Also draw the velocity field ticks.
        #[arg(long)]
        show_field: bool,

        /// Skip the particle streak layer.
        #[arg(long)]
        no_particles: bool,

        /// Skip the brush cursor.
        #[arg(long)]
        no_brush: bool,

        /// Output file path.
        #[arg(short, long, default_value = "flower.png")]
        output: PathBuf,

        /// Simulation parameters as a JSON string
        /// (field_width, field_height, particles).
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available stroke scripts.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let strokes = Stroke::list_names();
            if cli.json {
                let info = serde_json::json!({ "strokes": strokes });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Strokes:");
                for name in strokes {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            stroke,
            width,
            height,
            frames,
            seed,
            radius,
            show_field,
            no_particles,
            no_brush,
            output,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let kind = Stroke::from_name(&stroke)
                .ok_or_else(|| CliError::Input(format!("unknown stroke: {stroke}")))?;

            let sim_params = FlowerParams {
                seed,
                ..FlowerParams::from_json(&params)
            };
            let mut flower = Flower::new(sim_params)?;
            flower.brush_mut().set_radius(radius);
            flower.layers_mut().field = show_field;
            flower.layers_mut().particles = !no_particles;
            flower.layers_mut().brush = !no_brush;

            let mut canvas = LineCanvas::new(width, height)?;
            let script = StrokeScript::new(kind, seed as u32);
            let viewport = canvas.viewport();

            for frame in 0..frames {
                flower.update(&script.input(frame, viewport));
            }
            render_frame(&flower, &mut canvas);
            flower_raster::snapshot::write_png(&canvas, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "stroke": stroke,
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "seed": seed,
                    "radius": radius,
                    "params": sim_params.to_json(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {stroke} ({width}x{height}, {frames} frames, seed {seed}) -> {}",
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
