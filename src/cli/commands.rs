//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Photo grid client CLI
#[derive(Parser, Debug)]
#[command(name = "photogrid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token for the photo service
    #[arg(long, global = true, env = "PHOTOGRID_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Page through a photo listing, printing each photo with signed URLs
    List {
        /// Person whose photos to list (omit for the main grid)
        #[arg(long)]
        person: Option<String>,

        /// Stop after this many pages
        #[arg(long)]
        pages: Option<usize>,

        /// Photos per page (overrides the config file)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Print the authenticated URL for a media path
    Sign {
        /// Relative media path or absolute URL
        path: String,
    },

    /// Print the resolved configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one photo per line)
    Json,
    /// Human-readable output
    Pretty,
}
