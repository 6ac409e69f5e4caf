use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Preview and debug content carousels from the command line
#[derive(Parser)]
#[command(name = "cfcarousel")]
#[command(about = "Render and exercise content-fragment carousels", long_about = None)]
pub struct Cli {
    /// Config file (TOML); defaults to the user config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Read a saved query response instead of calling the endpoint
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    /// Persisted-query reference
    #[arg(short, long)]
    pub reference: Option<String>,
    /// Slides per page
    #[arg(short, long)]
    pub slides: Option<usize>,
    /// Enable prev/next arrows
    #[arg(long)]
    pub arrows: bool,
    /// Viewer location (repeatable); defaults to the simulated signal
    #[arg(short, long = "location")]
    pub locations: Vec<String>,
    /// Track width in pixels
    #[arg(long, default_value_t = 1000.0)]
    pub width: f64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load, filter and sort content, then print the block markup
    Render {
        #[command(flatten)]
        source: SourceArgs,
        /// Print a JSON summary instead of HTML
        #[arg(long)]
        json: bool,
    },
    /// Show page ranges and indicator labels for a slide count
    Pages {
        #[arg(short, long)]
        total: usize,
        #[arg(short, long, default_value_t = 3)]
        slides: usize,
    },
    /// Render, then replay events: page:N, left, right, scroll:PX, slide:N, per-page:N
    Simulate {
        #[command(flatten)]
        source: SourceArgs,
        events: Vec<String>,
    },
}
