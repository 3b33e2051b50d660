mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::projection::ProjectArgs;
use commands::scenarios::{SensitivityArgs, WhatIfArgs};

/// Law-firm virtual-assistant savings and ROI projections
#[derive(Parser)]
#[command(
    name = "firm-roi",
    version,
    about = "Law-firm virtual-assistant savings and ROI projections",
    long_about = "Estimate what a law firm saves by moving administrative work to a \
                  fixed-cost virtual-assistant team: opportunity cost, loaded admin \
                  overhead, revenue recovery, ROI, break-even and recommendations. \
                  Also runs what-if comparisons and sensitivity grids."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project savings, ROI and break-even for a firm profile
    Project(ProjectArgs),
    /// Compare named variations of a base profile
    WhatIf(WhatIfArgs),
    /// Run sensitivity analysis over one or two profile fields
    Sensitivity(SensitivityArgs),
    /// Print the default projection assumptions
    Assumptions,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("firm_roi_core=warn,firm_roi=warn")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let is_projection = matches!(cli.command, Commands::Project(_));

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::projection::run_project(args),
        Commands::WhatIf(args) => commands::scenarios::run_what_if(args),
        Commands::Sensitivity(args) => commands::scenarios::run_sensitivity(args),
        Commands::Assumptions => commands::projection::run_assumptions(),
        Commands::Version => {
            println!("firm-roi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, is_projection);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
