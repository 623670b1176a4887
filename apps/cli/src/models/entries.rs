//! Entry types — one employment period, one degree, one skill group.
//!
//! Date rules: `start_date` is required; an absent `end_date` means the
//! position is ongoing and normalizes to the "present" sentinel. A start date
//! after the end date is a validation error, never a silently reordered range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::date::DateValue;

/// One employment period. Highlights render verbatim, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperienceEntry {
    pub title: String,
    pub organization: String,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date: DateValue,
    #[serde(default)]
    pub end_date: Option<DateValue>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl ExperienceEntry {
    /// The effective end date: an omitted `end_date` reads as "present".
    pub fn effective_end_date(&self) -> DateValue {
        self.end_date.clone().unwrap_or(DateValue::Present)
    }

    pub fn validate(&self, index: usize, current_date: NaiveDate) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "experience entry {index}: `title` must not be empty"
            )));
        }
        if self.organization.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "experience entry {index} (`{}`): `organization` must not be empty",
                self.title
            )));
        }
        validate_date_order(
            &self.start_date,
            &self.effective_end_date(),
            current_date,
            &format!("experience entry {index} (`{}`)", self.title),
        )
    }
}

/// One degree. Renders like an experience entry, without highlights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date: DateValue,
    #[serde(default)]
    pub end_date: Option<DateValue>,
}

impl EducationEntry {
    pub fn effective_end_date(&self) -> DateValue {
        self.end_date.clone().unwrap_or(DateValue::Present)
    }

    pub fn validate(&self, index: usize, current_date: NaiveDate) -> Result<(), AppError> {
        if self.institution.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "education entry {index}: `institution` must not be empty"
            )));
        }
        if self.degree.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "education entry {index} (`{}`): `degree` must not be empty",
                self.institution
            )));
        }
        validate_date_order(
            &self.start_date,
            &self.effective_end_date(),
            current_date,
            &format!("education entry {index} (`{}`)", self.institution),
        )
    }
}

/// A category label with its ordered list of skill names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

impl SkillGroup {
    pub fn validate(&self, index: usize) -> Result<(), AppError> {
        if self.category.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "skill group {index}: `category` must not be empty"
            )));
        }
        if self.skills.is_empty() {
            return Err(AppError::Validation(format!(
                "skill group {index} (`{}`): `skills` must list at least one skill",
                self.category
            )));
        }
        Ok(())
    }
}

fn validate_date_order(
    start: &DateValue,
    end: &DateValue,
    current_date: NaiveDate,
    context: &str,
) -> Result<(), AppError> {
    if start.resolve(current_date) > end.resolve(current_date) {
        return Err(AppError::Validation(format!(
            "{context}: `start_date` ({}) cannot be after `end_date` ({})",
            start.to_input_string(),
            end.to_input_string()
        )));
    }
    Ok(())
}
