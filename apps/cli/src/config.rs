//! Render settings — output locations, per-artifact toggles, keyword bolding,
//! and the reference date used for "present" arithmetic.
//!
//! Output path templates accept ALL-CAPS placeholders (`NAME_IN_SNAKE_CASE`,
//! `YEAR`, ...) so one settings block produces sensibly named files for any
//! CV. Fixing `current_date` makes a render byte-reproducible.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::locale::substitute_placeholders;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RenderSettings {
    /// Directory all artifacts are written into, relative to the working
    /// directory unless absolute.
    pub output_dir: PathBuf,
    pub markdown_path: String,
    pub typst_path: String,
    pub pdf_path: String,
    pub generate_markdown: bool,
    pub generate_typst: bool,
    pub generate_pdf: bool,
    /// Keywords wrapped in bold wherever they appear in content text.
    pub bold_keywords: Vec<String>,
    /// Reference date for "present" and the last-updated note. Defaults to
    /// today when absent.
    pub current_date: Option<NaiveDate>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            output_dir: PathBuf::from("vitae_output"),
            markdown_path: "NAME_IN_SNAKE_CASE_CV.md".to_string(),
            typst_path: "NAME_IN_SNAKE_CASE_CV.typ".to_string(),
            pdf_path: "NAME_IN_SNAKE_CASE_CV.pdf".to_string(),
            generate_markdown: true,
            generate_typst: true,
            generate_pdf: true,
            bold_keywords: vec![],
            current_date: None,
        }
    }
}

impl RenderSettings {
    pub fn resolved_current_date(&self) -> NaiveDate {
        self.current_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Resolves one output path template against the CV owner's name and the
    /// reference date, rooted at `output_dir`.
    pub fn resolve_output_path(&self, template: &str, name: &str) -> PathBuf {
        let resolved = substitute_file_placeholders(template, name, self.resolved_current_date());
        self.output_dir.join(resolved)
    }

    pub fn markdown_output_path(&self, name: &str) -> PathBuf {
        self.resolve_output_path(&self.markdown_path, name)
    }

    pub fn typst_output_path(&self, name: &str) -> PathBuf {
        self.resolve_output_path(&self.typst_path, name)
    }

    pub fn pdf_output_path(&self, name: &str) -> PathBuf {
        self.resolve_output_path(&self.pdf_path, name)
    }

    /// Applies CLI flags on top of the file's settings. Flags always win.
    pub fn apply_cli_overrides(
        &mut self,
        output_dir: Option<&Path>,
        no_markdown: bool,
        no_typst: bool,
        no_pdf: bool,
        current_date: Option<NaiveDate>,
    ) {
        if let Some(dir) = output_dir {
            self.output_dir = dir.to_path_buf();
        }
        if no_markdown {
            self.generate_markdown = false;
        }
        if no_typst {
            self.generate_typst = false;
        }
        if no_pdf {
            self.generate_pdf = false;
        }
        if let Some(date) = current_date {
            self.current_date = Some(date);
        }
    }
}

/// Substitutes the file-name placeholder set. Longest names first, same rule
/// as the locale templates.
fn substitute_file_placeholders(template: &str, name: &str, current_date: NaiveDate) -> String {
    let snake = name.replace(' ', "_");
    let kebab = name.replace(' ', "-");
    substitute_placeholders(
        template,
        &[
            ("NAME_IN_LOWER_SNAKE_CASE", snake.to_lowercase()),
            ("NAME_IN_UPPER_SNAKE_CASE", snake.to_uppercase()),
            ("NAME_IN_SNAKE_CASE", snake),
            ("NAME_IN_LOWER_KEBAB_CASE", kebab.to_lowercase()),
            ("NAME_IN_UPPER_KEBAB_CASE", kebab.to_uppercase()),
            ("NAME_IN_KEBAB_CASE", kebab),
            ("NAME", name.to_string()),
            ("YEAR_IN_TWO_DIGITS", format!("{:02}", current_date.year() % 100)),
            ("YEAR", current_date.year().to_string()),
            ("MONTH_IN_TWO_DIGITS", format!("{:02}", current_date.month())),
            ("MONTH", current_date.month().to_string()),
        ],
    )
}
