mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use obsidiana_core::config::AppConfig;
use obsidiana_core::{Brand, Platform};
use obsidiana_themes::{ThemeFormat, ThemeMode};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "obsidiana")]
#[command(about = "Design-token pipeline for the Obsidiana brands", version)]
struct Cli {
    /// Config file to use instead of the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge, validate and render token artifacts
    Build {
        /// Brands to build (default: all configured)
        #[arg(long = "brand")]
        brands: Vec<Brand>,
        /// Platforms to render (default: all configured)
        #[arg(long = "platform")]
        platforms: Vec<Platform>,
        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,
        /// Skip failing brands instead of stopping
        #[arg(long)]
        keep_going: bool,
    },

    /// Merge and validate without writing anything
    Check {
        #[arg(long = "brand")]
        brands: Vec<Brand>,
    },

    /// Print one theme to stdout
    Theme {
        /// daisyui, mui or shadcn
        format: ThemeFormat,
        #[arg(long)]
        brand: Brand,
        /// light or dark
        #[arg(long)]
        mode: Option<ThemeMode>,
    },

    /// Generate every theme format for every brand
    Themes {
        #[arg(long = "brand")]
        brands: Vec<Brand>,
        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "obsidiana=info",
        1 => "obsidiana=debug",
        _ => "obsidiana=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Build {
            brands,
            platforms,
            out,
            keep_going,
        } => commands::build(&config, &brands, &platforms, out, keep_going),
        Command::Check { brands } => commands::check(&config, &brands),
        Command::Theme {
            format,
            brand,
            mode,
        } => {
            let text = commands::theme(&config, format, brand, mode).await?;
            print!("{text}");
            Ok(())
        }
        Command::Themes { brands, out } => commands::themes(&config, &brands, out).await,
    }
}
