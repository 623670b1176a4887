//! Locale catalog — the translatable words and formatting templates used when
//! turning dates into display strings.
//!
//! Templates are plain strings with ALL-CAPS placeholders (`MONTH_NAME`,
//! `START_DATE`, ...). Placeholder substitution is longest-first so that
//! `YEAR_IN_TWO_DIGITS` is never clobbered by `YEAR`.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Words and date templates for one language. Defaults are English.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Locale {
    /// Word rendered for an ongoing end date.
    pub present: String,
    /// Prefix of the last-updated note ("Last updated in Aug 2026").
    pub last_updated: String,
    pub year: String,
    pub years: String,
    pub month: String,
    pub months: String,
    /// Full month names, January through December. Must have 12 entries.
    pub month_names: Vec<String>,
    /// Month abbreviations, January through December. Must have 12 entries.
    pub month_abbreviations: Vec<String>,
    /// Template for a single date, e.g. "MONTH_ABBREVIATION YEAR" -> "Aug 2026".
    pub single_date_template: String,
    /// Template combining two formatted dates, e.g. "START_DATE – END_DATE".
    pub date_range_template: String,
    /// Template for a computed duration, e.g. "HOW_MANY_YEARS YEARS HOW_MANY_MONTHS MONTHS".
    pub time_span_template: String,
}

impl Default for Locale {
    fn default() -> Self {
        Locale {
            present: "present".to_string(),
            last_updated: "Last updated in".to_string(),
            year: "year".to_string(),
            years: "years".to_string(),
            month: "month".to_string(),
            months: "months".to_string(),
            month_names: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            // Abbreviations per the Yale library month list.
            month_abbreviations: [
                "Jan", "Feb", "Mar", "Apr", "May", "June", "July", "Aug", "Sept", "Oct", "Nov",
                "Dec",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            single_date_template: "MONTH_ABBREVIATION YEAR".to_string(),
            date_range_template: "START_DATE – END_DATE".to_string(),
            time_span_template: "HOW_MANY_YEARS YEARS HOW_MANY_MONTHS MONTHS".to_string(),
        }
    }
}

impl Locale {
    /// Both month tables must cover exactly January through December.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.month_names.len() != 12 {
            return Err(AppError::Validation(format!(
                "`locale.month_names` must have exactly 12 entries, got {}",
                self.month_names.len()
            )));
        }
        if self.month_abbreviations.len() != 12 {
            return Err(AppError::Validation(format!(
                "`locale.month_abbreviations` must have exactly 12 entries, got {}",
                self.month_abbreviations.len()
            )));
        }
        Ok(())
    }
}

/// Replaces every placeholder occurrence in `template` with its value.
///
/// Longer placeholder names are substituted first, so `YEAR_IN_TWO_DIGITS`
/// wins over `YEAR` when both are present. The result is trimmed: templates
/// like "HOW_MANY_YEARS YEARS HOW_MANY_MONTHS MONTHS" leave stray spaces when
/// some placeholders resolve to empty strings.
pub fn substitute_placeholders(template: &str, placeholders: &[(&str, String)]) -> String {
    let mut pairs: Vec<&(&str, String)> = placeholders.iter().collect();
    pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut result = template.to_string();
    for (name, value) in pairs {
        result = result.replace(name, value);
    }

    // Collapse runs of spaces left behind by empty substitutions.
    let mut collapsed = String::with_capacity(result.len());
    let mut previous_was_space = false;
    for c in result.chars() {
        if c == ' ' {
            if !previous_was_space {
                collapsed.push(c);
            }
            previous_was_space = true;
        } else {
            collapsed.push(c);
            previous_was_space = false;
        }
    }
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale_is_valid() {
        assert!(Locale::default().validate().is_ok());
    }

    #[test]
    fn test_short_month_table_rejected() {
        let locale = Locale {
            month_names: vec!["January".to_string()],
            ..Locale::default()
        };
        let err = locale.validate().unwrap_err();
        assert!(err.to_string().contains("month_names"));
    }

    #[test]
    fn test_substitute_simple_placeholders() {
        let result = substitute_placeholders(
            "START_DATE – END_DATE",
            &[
                ("START_DATE", "2020".to_string()),
                ("END_DATE", "present".to_string()),
            ],
        );
        assert_eq!(result, "2020 – present");
    }

    #[test]
    fn test_longest_placeholder_wins() {
        // YEAR must not clobber the prefix of YEAR_IN_TWO_DIGITS.
        let result = substitute_placeholders(
            "YEAR_IN_TWO_DIGITS YEAR",
            &[
                ("YEAR", "2026".to_string()),
                ("YEAR_IN_TWO_DIGITS", "26".to_string()),
            ],
        );
        assert_eq!(result, "26 2026");
    }

    #[test]
    fn test_empty_substitutions_collapse_spaces() {
        let result = substitute_placeholders(
            "HOW_MANY_YEARS YEARS HOW_MANY_MONTHS MONTHS",
            &[
                ("HOW_MANY_YEARS", "2".to_string()),
                ("YEARS", "years".to_string()),
                ("HOW_MANY_MONTHS", String::new()),
                ("MONTHS", String::new()),
            ],
        );
        assert_eq!(result, "2 years");
    }
}
