//! Command-line driver for the potential-field planner.
//!
//! Usage:
//!   micronav plan maps/scenario1.txt --width 2 --height 2 --output out/scenario1.png
//!   micronav bench maps --config planner.yaml --output-dir out
//!   micronav upscale maps/scenario1.txt --scale 4
//!
//! Set `RUST_LOG=debug` to see recovery events.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use micronav::batch::{Scenario, run_batch, scenario_name};
use micronav::loaders::{load_map, upscale, write_map};
use micronav::visualization::save_plan_png;
use micronav::{PlannerConfig, PlannerError, scenario_maps};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a single map and print run statistics
    Plan {
        /// Text map file
        map: PathBuf,
        /// Planner configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Robot width in cells (overrides the config)
        #[arg(long)]
        width: Option<u32>,
        /// Robot height in cells (overrides the config)
        #[arg(long)]
        height: Option<u32>,
        /// Seed for the recovery random walk (overrides the config)
        #[arg(long)]
        seed: Option<u64>,
        /// Write a PNG of the field and path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pixels per cell in the PNG
        #[arg(long, default_value = "8")]
        cell_px: u32,
    },
    /// Plan every `*.txt` map in a directory and print a summary table
    Bench {
        /// Directory of text maps
        dir: PathBuf,
        /// Planner configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write one PNG per map into this directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Pixels per cell in the PNGs
        #[arg(long, default_value = "8")]
        cell_px: u32,
    },
    /// Upscale a map by repeating every cell
    Upscale {
        /// Text map file
        map: PathBuf,
        /// Repetitions per cell along each axis
        #[arg(short, long, default_value = "4")]
        scale: u32,
        /// Output file (defaults to `<name>_highres.txt` next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let outcome = match args.command {
        Command::Plan {
            map,
            config,
            width,
            height,
            seed,
            output,
            cell_px,
        } => load_config(config.as_deref()).and_then(|mut config| {
            if let Some(width) = width {
                config.robot.width = width;
            }
            if let Some(height) = height {
                config.robot.height = height;
            }
            if seed.is_some() {
                config.navigator.seed = seed;
            }
            plan(&map, &config, output.as_deref(), cell_px)
        }),
        Command::Bench {
            dir,
            config,
            output_dir,
            cell_px,
        } => load_config(config.as_deref())
            .and_then(|config| bench(&dir, &config, output_dir.as_deref(), cell_px)),
        Command::Upscale { map, scale, output } => {
            upscale_file(&map, scale, output).map(|_| ExitCode::SUCCESS)
        }
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<PlannerConfig, PlannerError> {
    match path {
        Some(path) => PlannerConfig::load(path),
        None => Ok(PlannerConfig::default()),
    }
}

fn plan(
    map: &Path,
    config: &PlannerConfig,
    output: Option<&Path>,
    cell_px: u32,
) -> Result<ExitCode, PlannerError> {
    let scenario = Scenario::run(map, config)?;
    let grid = &scenario.grid;
    let result = &scenario.result;

    println!("Map:           {}", map.display());
    println!(
        "Robot size:    {}x{}",
        grid.footprint().height,
        grid.footprint().width
    );
    println!("{}", "=".repeat(40));
    println!(
        "Status:        {}",
        if result.success { "SUCCESS" } else { "FAILURE" }
    );
    println!("Time taken:    {:.4} ms", result.stats.planning_time_ms());
    println!("Steps taken:   {}", result.stats.steps_taken);
    println!("Path length:   {}", result.path.len());
    println!("Nodes visited: {}", result.stats.nodes_visited);
    println!("Recoveries:    {}", result.stats.recoveries);
    println!("{}", "=".repeat(40));

    if let Some(output) = output {
        save_plan_png(output, grid, &scenario.field, &result.path, cell_px)?;
        println!("Visualization saved to {}", output.display());
    }

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn bench(
    dir: &Path,
    config: &PlannerConfig,
    output_dir: Option<&Path>,
    cell_px: u32,
) -> Result<ExitCode, PlannerError> {
    let maps = scenario_maps(dir)?;
    if maps.is_empty() {
        println!("No map files found in {}", dir.display());
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{:<25} | {:<10} | {:<10} | {:<8} | {:<8} | {:<6}",
        "SCENARIO", "STATUS", "TIME (ms)", "STEPS", "VISITED", "RECOV"
    );
    println!("{}", "-".repeat(84));

    for entry in run_batch(&maps, config) {
        let name = entry.name();
        match entry.outcome {
            Ok(scenario) => {
                let result = &scenario.result;
                println!(
                    "{:<25} | {:<10} | {:<10.2} | {:<8} | {:<8} | {:<6}",
                    name,
                    if result.success { "SUCCESS" } else { "FAIL" },
                    result.stats.planning_time_ms(),
                    result.path.len(),
                    result.stats.nodes_visited,
                    result.stats.recoveries
                );
                if let Some(output_dir) = output_dir {
                    let png = output_dir.join(format!("{name}.png"));
                    save_plan_png(&png, &scenario.grid, &scenario.field, &result.path, cell_px)?;
                }
            }
            Err(err) => println!("{name:<25} | ERROR: {err}"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn upscale_file(map: &Path, scale: u32, output: Option<PathBuf>) -> Result<(), PlannerError> {
    let grid = load_map(map)?;
    let upscaled = upscale(&grid, scale)?;
    let output = output.unwrap_or_else(|| {
        map.with_file_name(format!("{}_highres.txt", scenario_name(map)))
    });
    std::fs::write(&output, write_map(&upscaled))?;
    println!(
        "Upscaled {} ({}x{}) -> {} ({}x{})",
        map.display(),
        grid.width(),
        grid.height(),
        output.display(),
        upscaled.width(),
        upscaled.height()
    );
    Ok(())
}
