//! Folio CLI - link resolution and site-tree tooling.
//!
//! Provides commands for:
//! - `resolve`: Resolve one link the way pages render it
//! - `links`: Report unresolved links in markdown files
//! - `tree`: Print the navigation tree of a site
//! - `classify`: Show how embeds of given file types render
//! - `render`: Rewrite links in a parsed document and print HTML

mod commands;
mod error;
mod output;
mod site;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ClassifyArgs, LinksArgs, RenderArgs, ResolveArgs, TreeArgs};
use output::Output;

/// Folio - link resolution and site-tree engine.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a single link.
    Resolve(ResolveArgs),
    /// Check links in markdown files.
    Links(LinksArgs),
    /// Print the navigation tree.
    Tree(TreeArgs),
    /// Classify embed targets.
    Classify(ClassifyArgs),
    /// Render a parsed document to HTML.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Resolve(args) => args.execute(),
        Commands::Links(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
        Commands::Classify(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
