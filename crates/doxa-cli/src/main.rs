//! Doxa CLI
//!
//! Command-line interface for Doxa wikis: list, render and audit pages.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::page::RenderFormat;
use commands::Site;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "doxa")]
#[command(about = "Doxa - render and check markdown wikis")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the site configuration (default: ./doxa.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog pages in navigation order
    Pages,
    /// Render a page by id or request path
    Render {
        /// Page id (`design`) or request path (`/projects/OpenPipette/wiki/design`)
        page: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = RenderFormat::Html)]
        format: RenderFormat,
    },
    /// Classify link targets against the catalog
    Resolve {
        /// Raw link targets
        #[arg(required = true)]
        targets: Vec<String>,
    },
    /// Compute heading anchor ids
    Anchor {
        /// Heading texts
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Audit every page for missing content and broken links
    Check,
    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let site = Site::load(cli.config.as_deref())?;
    init_logging(&site.config.logging.level);

    match cli.command {
        Commands::Pages => commands::page::list(&site, &output),
        Commands::Render { page, format } => commands::page::render(&site, &page, format, &output),
        Commands::Resolve { targets } => commands::link::resolve(&site, &targets, &output),
        Commands::Anchor { texts } => commands::link::anchor(&texts, &output),
        Commands::Check => commands::check::run(&site, &output),
        Commands::Config => commands::config::show(&site, &output),
    }
}

/// `RUST_LOG` wins over the configured level
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
