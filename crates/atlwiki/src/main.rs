//! atlwiki CLI - Atlassian wiki reader.
//!
//! Provides commands for:
//! - `page`: Show a page title and, optionally, its storage-format body
//! - `children`: List the IDs of a page's direct children

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ChildrenArgs, ConnectionArgs, PageArgs};
use output::Output;

/// atlwiki - Atlassian wiki reader.
#[derive(Parser)]
#[command(name = "atlwiki", version, about)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a page.
    Page(PageArgs),
    /// List child page IDs.
    Children(ChildrenArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Page(args) => args.execute(&cli.connection, &output),
        Commands::Children(args) => args.execute(&cli.connection, &output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {}", error::error_chain(&err)));
        std::process::exit(1);
    }
}
