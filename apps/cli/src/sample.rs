//! Starter CV generation for `vitae new` — writes a filled-in example file
//! the user edits down to their own history.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::errors::AppError;

/// The starter input file. `{name}` is replaced with the CV owner's name.
const STARTER_TEMPLATE: &str = r#"cv:
  name: {name}
  location: Your City, Country
  email: you@example.com
  website: https://example.com
  social_networks:
    - network: GitHub
      username: yourusername
    - network: LinkedIn
      username: yourusername
  summary: >-
    One short paragraph on who you are and what you build. Keywords listed
    under `settings.bold_keywords` are bolded wherever they appear.
  experience:
    - title: Senior Software Engineer
      organization: Example Corp
      location: Remote
      start_date: 2022-03
      end_date: present
      highlights:
        - Did a concrete thing with a measurable outcome.
        - Did another concrete thing worth a bullet point.
    - title: Software Engineer
      organization: Previous Inc
      location: Your City, Country
      start_date: 2019-07
      end_date: 2022-02
      highlights:
        - Shipped something specific.
  skills:
    - category: Languages
      skills: [Rust, Python, SQL]
    - category: Tools
      skills: [Git, Docker]
  education:
    - institution: Example University
      degree: BS
      location: Your City, Country
      start_date: 2015
      end_date: 2019

design:
  typography:
    font_family: Source Sans 3
  colors:
    accent: '#004f90'

settings:
  bold_keywords: []
"#;

/// Renders the starter file contents for a given name.
pub fn starter_contents(name: &str) -> String {
    STARTER_TEMPLATE.replace("{name}", name)
}

/// The conventional file name for a starter CV: "John Doe" -> `John_Doe_CV.yaml`.
pub fn starter_file_name(name: &str) -> PathBuf {
    PathBuf::from(format!("{}_CV.yaml", name.replace(' ', "_")))
}

/// Writes the starter file into `directory`. Refuses to overwrite an existing
/// file unless `force` is set.
pub fn write_starter_file(name: &str, directory: &Path, force: bool) -> Result<PathBuf, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation(
            "the CV owner's name must not be empty".to_string(),
        ));
    }

    let path = directory.join(starter_file_name(name));
    if path.exists() && !force {
        return Err(AppError::Input(format!(
            "`{}` already exists. Pass --force to overwrite it.",
            path.display()
        )));
    }

    std::fs::write(&path, starter_contents(name))
        .with_context(|| format!("failed to write `{}`", path.display()))?;
    info!("Wrote starter CV to `{}`", path.display());
    Ok(path)
}
