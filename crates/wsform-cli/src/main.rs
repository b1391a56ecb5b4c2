//! wsform - create-workspace form preview CLI

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wsform_config::GlobalConfig;

#[derive(Parser)]
#[command(name = "wsform")]
#[command(author, version, about = "Create-workspace form initializer", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load namespaces and devfile templates and print the selector options
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fill in the form interactively
    Pick,

    /// Show or edit the configuration
    Config {
        /// Open config in editor
        #[arg(short, long)]
        edit: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => GlobalConfig::config_path()?,
    };

    match cli.command {
        Commands::Show { json } => commands::show(&config_path, json).await,
        Commands::Pick => commands::pick(&config_path).await,
        Commands::Config { edit } => commands::config(&config_path, edit),
    }
}
