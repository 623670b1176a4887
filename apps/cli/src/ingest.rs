//! Input intake — reads the CV file, deserializes it into the typed model,
//! and runs semantic validation. Every failure path produces a descriptive
//! error naming the file; nothing downstream sees an unvalidated model.

use std::path::Path;

use tracing::info;

use crate::errors::AppError;
use crate::models::CvModel;

const ACCEPTED_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Reads and parses the input file. Shape errors (unknown keys, bad dates,
/// bad dimensions) surface here with the serde message attached.
pub fn load_model(path: &Path) -> Result<CvModel, AppError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::Input(format!(
            "the input file should have one of the following extensions: {}; got `{}`",
            ACCEPTED_EXTENSIONS.join(", "),
            path.display()
        )));
    }

    if !path.exists() {
        return Err(AppError::Input(format!(
            "the input file `{}` does not exist",
            path.display()
        )));
    }

    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Err(AppError::Input(format!(
            "the input file `{}` is empty",
            path.display()
        )));
    }

    let model: CvModel = if extension == "json" {
        serde_json::from_str(&contents)
            .map_err(|e| AppError::Parse(format!("`{}`: {e}", path.display())))?
    } else {
        serde_yaml::from_str(&contents)
            .map_err(|e| AppError::Parse(format!("`{}`: {e}", path.display())))?
    };

    Ok(model)
}

/// Loads and fully validates the input file — the one entry point the CLI
/// commands use.
pub fn load_and_validate(path: &Path) -> Result<CvModel, AppError> {
    let model = load_model(path)?;
    model.validate()?;
    info!(
        "Loaded `{}`: {} experience, {} skill groups, {} education entries",
        path.display(),
        model.cv.experience.len(),
        model.cv.skills.len(),
        model.cv.education.len()
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_input(dir: &tempfile::TempDir, file_name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(file_name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const VALID_YAML: &str = r#"
cv:
  name: A B
  email: a@b.com
  experience:
    - title: Dev
      organization: X
      start_date: 2020
      end_date: present
      highlights:
        - Did thing
"#;

    #[test]
    fn test_valid_yaml_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "cv.yaml", VALID_YAML);
        let model = load_and_validate(&path).unwrap();
        assert_eq!(model.cv.name, "A B");
        assert_eq!(model.cv.experience.len(), 1);
    }

    #[test]
    fn test_json_input_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "cv.json", r#"{"cv": {"name": "A B"}}"#);
        let model = load_and_validate(&path).unwrap();
        assert_eq!(model.cv.name, "A B");
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "cv.toml", "cv = {}");
        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, AppError::Input(_)), "got: {err}");
        assert!(err.to_string().contains("extensions"));
    }

    #[test]
    fn test_missing_file_is_descriptive() {
        let err = load_model(Path::new("/nonexistent/cv.yaml")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_empty_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "cv.yaml", "\n\n");
        let err = load_model(&path).unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }

    #[test]
    fn test_yaml_syntax_error_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "cv.yaml", "cv: [unclosed");
        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)), "got: {err}");
    }

    #[test]
    fn test_semantic_validation_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "cv.yaml", "cv:\n  name: '  '\n");
        let err = load_and_validate(&path).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got: {err}");
    }
}
