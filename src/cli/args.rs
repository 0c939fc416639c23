//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    categories::CategoriesArgs, completions::CompletionsArgs, init::InitArgs, load::LoadArgs,
    stats::StatsArgs,
};

#[derive(Parser)]
#[command(name = "tplload")]
#[command(author, version, about = "Phishing-simulation template catalog loader")]
#[command(
    long_about = "Imports pipe-delimited template records into the SQLite template catalog, creating category lookup rows on first reference."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Target the test catalog instead of the default
    #[arg(long, global = true)]
    pub test: bool,

    /// Catalog database path (overrides config and --test)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Suppress per-row output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load template records from a pipe-delimited file
    Load(LoadArgs),

    /// Create the catalog database and schema
    Init(InitArgs),

    /// List template categories with usage counts
    Categories(CategoriesArgs),

    /// Show catalog metrics
    Stats(StatsArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
