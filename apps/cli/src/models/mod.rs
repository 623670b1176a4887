// Typed input model: CV content, presentation options, locale catalog.
// Deserialization catches shape errors; `validate` catches semantic ones.

pub mod cv;
pub mod date;
pub mod design;
pub mod entries;
pub mod locale;

use serde::{Deserialize, Serialize};

use crate::config::RenderSettings;
use crate::errors::AppError;
use crate::models::cv::Cv;
use crate::models::design::Design;
use crate::models::locale::Locale;

/// The parsed input file: one `cv` mapping plus optional `design`, `locale`,
/// and `settings` mappings, all read-only for the lifetime of a render.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CvModel {
    pub cv: Cv,
    #[serde(default)]
    pub design: Design,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub settings: RenderSettings,
}

impl CvModel {
    /// Semantic validation across the whole model. Presentation scalars
    /// (dimensions, colors) were already validated during deserialization.
    pub fn validate(&self) -> Result<(), AppError> {
        let current_date = self.settings.resolved_current_date();
        self.cv.validate(current_date)?;
        self.locale.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_YAML: &str = "cv:\n  name: A B\n";

    #[test]
    fn test_minimal_input_parses_with_defaults() {
        let model: CvModel = serde_yaml::from_str(MINIMAL_YAML).unwrap();
        assert_eq!(model.cv.name, "A B");
        assert_eq!(model.design.page.paper, "us-letter");
        assert_eq!(model.locale.present, "present");
        assert!(model.settings.generate_markdown);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let result: Result<CvModel, _> =
            serde_yaml::from_str("cv:\n  name: A B\nstyling: {}\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_cv_mapping_rejected() {
        let result: Result<CvModel, _> = serde_yaml::from_str("design: {}\n");
        assert!(result.is_err(), "`cv` is the one required mapping");
    }
}
