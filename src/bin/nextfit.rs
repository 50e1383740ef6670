//! Next-Fit simulator CLI
//!
//! Reads block and process sizes from comma-separated lists or a scenario
//! file, runs the simulation and prints the transcript.

use anyhow::{Context, Result};
use clap::Parser;
use nextfit_sim::{render_json, render_text, Simulation, SimulationConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "nextfit")]
#[command(about = "Fixed-partition memory allocation simulator using Next-Fit placement")]
struct Args {
    /// Memory block sizes in KB, separated by commas (e.g. "100,500,200")
    #[arg(short = 'b', long, required_unless_present = "config")]
    blocks: Option<String>,

    /// Process sizes in KB, separated by commas (e.g. "212,417")
    #[arg(short = 'p', long, required_unless_present = "config")]
    processes: Option<String>,

    /// Scenario file (.toml or .json); replaces --blocks/--processes
    #[arg(short = 'c', long, conflicts_with_all = ["blocks", "processes"])]
    config: Option<PathBuf>,

    /// Main memory size in KB the blocks must fit in [default: 5120]
    #[arg(short = 'm', long)]
    memory_ceiling: Option<u64>,

    /// Output format (text, json) [default: text]
    #[arg(short = 'f', long, default_value = "text")]
    format: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

/// Parse output format from CLI string
fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "text" | "txt" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format '{}'. Valid options: text, json",
            s
        )),
    }
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let config = match (&args.config, &args.blocks, &args.processes) {
        (Some(path), _, _) => SimulationConfig::load(path)
            .with_context(|| format!("failed to load scenario file {:?}", path))?,
        (None, Some(blocks), Some(processes)) => SimulationConfig::from_lists(blocks, processes)
            .context("please enter valid positive integers separated by commas")?,
        _ => anyhow::bail!("either --config or both --blocks and --processes are required"),
    };

    Ok(match args.memory_ceiling {
        Some(ceiling) => config.with_memory_ceiling(ceiling),
        None => config,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let format = parse_output_format(&args.format).map_err(anyhow::Error::msg)?;

    let config = load_config(&args)?;
    info!(
        "Loaded {} blocks and {} processes (memory ceiling {} KB)",
        config.blocks.len(),
        config.processes.len(),
        config.memory_ceiling
    );

    let report = Simulation::new(config)
        .context("invalid simulation configuration")?
        .run()?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&report)?),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("text"), Ok(OutputFormat::Text));
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert!(parse_output_format("yaml").is_err());
    }

    #[test]
    fn test_args_from_lists() {
        let args = Args::try_parse_from(["nextfit", "-b", "100,500", "-p", "212", "-m", "1024"])
            .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.blocks, vec![100, 500]);
        assert_eq!(config.processes, vec![212]);
        assert_eq!(config.memory_ceiling, 1024);
    }

    #[test]
    fn test_args_require_input() {
        assert!(Args::try_parse_from(["nextfit"]).is_err());
        assert!(Args::try_parse_from(["nextfit", "-b", "100"]).is_err());
        assert!(Args::try_parse_from(["nextfit", "-c", "a.toml", "-b", "100"]).is_err());
    }

    #[test]
    fn test_args_reject_bad_list() {
        let args = Args::try_parse_from(["nextfit", "-b", "100,abc", "-p", "10"]).unwrap();
        assert!(load_config(&args).is_err());
    }
}
