//! Render pipeline — assembles the document and writes the requested
//! artifacts: Markdown, Typst, and (via the external engine) PDF.

pub mod markdown;
pub mod pdf;
pub mod typst;

use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use crate::assemble::assemble;
use crate::errors::AppError;
use crate::models::CvModel;
use crate::render::markdown::MarkdownRenderer;
use crate::render::typst::TypstRenderer;

/// Paths of the artifacts a pipeline run produced.
#[derive(Debug, Default)]
pub struct RenderedArtifacts {
    pub markdown: Option<PathBuf>,
    pub typst: Option<PathBuf>,
    pub pdf: Option<PathBuf>,
}

/// Runs the full pipeline for a validated model.
///
/// Steps:
/// 1. assemble() → Document (pure)
/// 2. write Markdown, unless disabled
/// 3. write Typst, unless disabled
/// 4. compile PDF from the Typst file, unless disabled
///
/// The PDF step requires the Typst file; disabling Typst disables PDF too.
pub fn run_pipeline(model: &CvModel) -> Result<RenderedArtifacts, AppError> {
    let settings = &model.settings;
    let name = &model.cv.name;

    // Step 1: assemble the section sequence.
    let document = assemble(model);
    info!(
        "Assembled document for {name}: {} sections, {} connections",
        document.sections.len(),
        document.connections.len()
    );

    std::fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "failed to create output directory `{}`",
            settings.output_dir.display()
        )
    })?;

    let mut artifacts = RenderedArtifacts::default();

    // Step 2: Markdown.
    if settings.generate_markdown {
        let path = settings.markdown_output_path(name);
        let contents = MarkdownRenderer::new().render(&document);
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        info!("Wrote Markdown to `{}`", path.display());
        artifacts.markdown = Some(path);
    }

    // Step 3: Typst.
    if settings.generate_typst {
        let path = settings.typst_output_path(name);
        let contents = TypstRenderer::new().render(&document, &model.design);
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        info!("Wrote Typst to `{}`", path.display());
        artifacts.typst = Some(path);
    }

    // Step 4: PDF via the external engine.
    if settings.generate_pdf {
        match &artifacts.typst {
            Some(typst_path) => {
                let path = settings.pdf_output_path(name);
                pdf::compile_pdf(typst_path, &path)?;
                info!("Wrote PDF to `{}`", path.display());
                artifacts.pdf = Some(path);
            }
            None => {
                info!("Skipping PDF: Typst generation is disabled");
            }
        }
    }

    Ok(artifacts)
}
