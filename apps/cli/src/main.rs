//! vitae — renders a structured CV description to Markdown and Typst, and
//! compiles the Typst source to PDF through the external `typst` engine.

mod assemble;
mod cli;
mod config;
mod errors;
mod ingest;
mod models;
mod render;
mod sample;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse CLI arguments first so --verbose can set the log level.
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("vitae v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Render {
            input,
            output_dir,
            no_markdown,
            no_typst,
            no_pdf,
            current_date,
        } => run_render(
            &input,
            output_dir.as_deref(),
            no_markdown,
            no_typst,
            no_pdf,
            current_date,
        )?,
        Commands::Check { input } => run_check(&input)?,
        Commands::New { name, force } => run_new(&name, force)?,
    }

    Ok(())
}

fn run_render(
    input: &Path,
    output_dir: Option<&Path>,
    no_markdown: bool,
    no_typst: bool,
    no_pdf: bool,
    current_date: Option<NaiveDate>,
) -> Result<()> {
    let mut model = ingest::load_and_validate(input)?;
    model
        .settings
        .apply_cli_overrides(output_dir, no_markdown, no_typst, no_pdf, current_date);

    let artifacts = render::run_pipeline(&model)?;

    let written: Vec<&PathBuf> = [&artifacts.markdown, &artifacts.typst, &artifacts.pdf]
        .into_iter()
        .flatten()
        .collect();
    info!("Done: {} artifact(s) written", written.len());
    Ok(())
}

fn run_check(input: &Path) -> Result<()> {
    let model = ingest::load_and_validate(input)?;
    info!("`{}` is a valid CV file for {}", input.display(), model.cv.name);
    Ok(())
}

fn run_new(name: &str, force: bool) -> Result<()> {
    let path = sample::write_starter_file(name, Path::new("."), force)?;
    info!(
        "Edit `{}`, then run: vitae render {}",
        path.display(),
        path.display()
    );
    Ok(())
}
