//! Command-Line Interface

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vitae — render a structured CV to Markdown, Typst, and PDF
#[derive(Parser, Debug)]
#[command(name = "vitae")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a CV file to the configured output artifacts
    Render {
        /// Input CV file (.yaml, .yml, or .json)
        input: PathBuf,

        /// Output directory (overrides the file's settings)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Skip Markdown generation
        #[arg(long)]
        no_markdown: bool,

        /// Skip Typst generation (also skips PDF)
        #[arg(long)]
        no_typst: bool,

        /// Skip PDF compilation
        #[arg(long)]
        no_pdf: bool,

        /// Reference date for "present" and the last-updated note (YYYY-MM-DD)
        #[arg(long)]
        current_date: Option<NaiveDate>,
    },

    /// Validate a CV file without rendering anything
    Check {
        /// Input CV file (.yaml, .yml, or .json)
        input: PathBuf,
    },

    /// Write a starter CV file to edit
    New {
        /// The CV owner's full name, e.g. "John Doe"
        name: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
