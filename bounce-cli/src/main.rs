mod config;
mod trace;
mod viewer;

use bounce_core::calibration::{analytic_impact_velocity, measure_impact_velocity};
use bounce_core::config::consts;
use bounce_core::{run, MonotonicClock, SimulationReport};
use clap::{Parser, Subcommand};
use config::ConfigArgs;
use std::io::{self, BufWriter};
use trace::TraceRenderer;

#[derive(Parser)]
#[command(name = "bounce")]
#[command(about = "Real-time simulation of a ball bouncing elastically off the ground", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation in a window, or print its trajectory with --headless
    Run {
        #[command(flatten)]
        config: ConfigArgs,
        /// Print `tick x y z` lines to stdout instead of opening a window
        #[arg(long)]
        headless: bool,
        /// With --headless, print every N-th tick only (N >= 1)
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
        stride: u64,
    },
    /// Estimate the impact velocity used to size the bounce window
    Calibrate {
        /// Drop height
        #[arg(long, default_value_t = consts::INITIAL_HEIGHT)]
        height: f64,
        /// Magnitude of gravitational acceleration
        #[arg(long, default_value_t = consts::GRAVITATIONAL_ACCELERATION)]
        gravity: f64,
        /// Fixed step used for the measured fall, in seconds
        #[arg(long, default_value_t = 0.001)]
        dt: f64,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            headless,
            stride,
        } => run_simulation(&config, headless, stride),
        Commands::Calibrate {
            height,
            gravity,
            dt,
        } => calibrate(height, gravity, dt),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_simulation(
    args: &ConfigArgs,
    headless: bool,
    stride: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, layout) = args.resolve()?;

    if headless {
        let out = BufWriter::new(io::stdout());
        let report = run(
            config,
            &layout,
            MonotonicClock::new(),
            TraceRenderer::new(out, stride),
        )?;
        print_report(&report);
        return Ok(());
    }

    if let Some(report) = viewer::run_viewer(config, layout)? {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &SimulationReport) {
    eprintln!(
        "{} ticks, {} bounces, {:.3} s elapsed, peak height {:.3}, final height {:.3}",
        report.ticks,
        report.bounces,
        report.elapsed.as_secs_f64(),
        report.peak_height,
        report.final_state.height()
    );
}

fn calibrate(height: f64, gravity: f64, dt: f64) -> Result<(), Box<dyn std::error::Error>> {
    let analytic = analytic_impact_velocity(height, gravity)?;
    let measured = measure_impact_velocity(height, gravity, dt)?;

    println!("analytic impact velocity = {:.4}", analytic);
    println!("measured impact velocity = {:.4} (dt = {})", measured, dt);
    println!("bounce window at dt = {}: {:.4}", dt, measured * dt);
    Ok(())
}
