// Elevator Sweep Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/elevator-sweep-simulator --demo
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/elevator-sweep-simulator --min-floor -3 --max-floor 200 --random-batches 50 --seed 42 --verbose
// ```

use anyhow::Context;
use clap::Parser;
use elevator_sweep_simulator::simulation::{collect_batches, BatchRunner, LoggingConfig, RunReport};
use elevator_sweep_simulator::types::config::CliArgs;
use elevator_sweep_simulator::types::{OutputFormat, SimulatorConfig};
use std::process;
use tracing::{error, info, warn};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match SimulatorConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Held until exit so the file writer flushes
    let log_guard = match LoggingConfig::from_cli_args(&args).init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Elevator Sweep Simulator");

    if let Err(e) = run(args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        drop(log_guard);
        process::exit(1);
    }

    info!("Elevator Sweep Simulator completed successfully");
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = SimulatorConfig::from_cli_args(args.clone()).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    let output_format = config.get_output_format()?;

    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no batches will be submitted.");
        print_configuration_summary(&config);
        return Ok(());
    }

    let batches = collect_batches(&args, &config).context("Failed to collect batches")?;
    if batches.is_empty() {
        warn!("No batches to submit; use --demo, --batch, --batches-file or --random-batches");
    }

    let mut runner = BatchRunner::new(&config).context("Failed to construct elevator")?;
    let report = runner.run(&batches);

    print_report(&report, output_format)
}

fn print_report(report: &RunReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn print_configuration_summary(config: &SimulatorConfig) {
    let controller = &config.controller;
    eprintln!("Configuration:");
    eprintln!("  Floors: {} to {}", controller.min_floor, controller.max_floor);
    eprintln!("  Initial Floor: {}", controller.initial_floor);
    eprintln!("  Initial Direction: {}", controller.initial_direction);
    eprintln!("  Up Queue Order: {}", controller.up_queue_order);
    eprintln!("  Random Batches: {}", config.random_batches);
    eprintln!("  Batch Size: {}", config.batch_size);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!("  Output Format: {}", config.output_format);
    eprintln!("  Include History: {}", config.include_history);
    eprintln!();
}
