//! The CV content record — who the person is, where to reach them, and the
//! experience, skills, and education lists the document is assembled from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::entries::{EducationEntry, ExperienceEntry, SkillGroup};

// ────────────────────────────────────────────────────────────────────────────
// Social networks
// ────────────────────────────────────────────────────────────────────────────

/// The social platforms with derivable profile URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    LinkedIn,
    GitHub,
    GitLab,
    Mastodon,
    StackOverflow,
    #[serde(rename = "ORCID")]
    Orcid,
    YouTube,
    #[serde(rename = "Google Scholar")]
    GoogleScholar,
    X,
}

impl Network {
    /// Base profile URL; the username is appended. Mastodon is handled
    /// separately because its domain lives inside the username.
    fn base_url(&self) -> &'static str {
        match self {
            Network::LinkedIn => "https://linkedin.com/in/",
            Network::GitHub => "https://github.com/",
            Network::GitLab => "https://gitlab.com/",
            Network::Mastodon => "",
            Network::StackOverflow => "https://stackoverflow.com/users/",
            Network::Orcid => "https://orcid.org/",
            Network::YouTube => "https://youtube.com/@",
            Network::GoogleScholar => "https://scholar.google.com/citations?user=",
            Network::X => "https://x.com/",
        }
    }

    /// Font Awesome icon name, consumed by the Typst template.
    pub fn icon(&self) -> &'static str {
        match self {
            Network::LinkedIn => "linkedin",
            Network::GitHub => "github",
            Network::GitLab => "gitlab",
            Network::Mastodon => "mastodon",
            Network::StackOverflow => "stack-overflow",
            Network::Orcid => "orcid",
            Network::YouTube => "youtube",
            Network::GoogleScholar => "graduation-cap",
            Network::X => "x-twitter",
        }
    }
}

/// One social profile: the platform plus the username on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialNetwork {
    pub network: Network,
    pub username: String,
}

impl SocialNetwork {
    /// Derives the full profile URL from network + username.
    pub fn url(&self) -> String {
        match self.network {
            Network::Mastodon => {
                // "@username@domain" -> "https://domain/@username"
                let mut parts = self.username.splitn(3, '@');
                let _ = parts.next();
                let username = parts.next().unwrap_or_default();
                let domain = parts.next().unwrap_or_default();
                format!("https://{domain}/@{username}")
            }
            _ => format!("{}{}", self.network.base_url(), self.username),
        }
    }

    /// Display text for the connection line.
    pub fn display_body(&self) -> String {
        match self.network {
            // A Scholar user id is opaque; show the platform name instead.
            Network::GoogleScholar => "Google Scholar".to_string(),
            _ => self.username.clone(),
        }
    }

    /// Per-network username shape checks. Only formats that would otherwise
    /// produce a broken URL are enforced.
    pub fn validate(&self, index: usize) -> Result<(), AppError> {
        if self.username.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "social network {index}: `username` must not be empty"
            )));
        }
        match self.network {
            Network::Mastodon => {
                let parts: Vec<&str> = self.username.split('@').collect();
                let well_formed = parts.len() == 3
                    && parts[0].is_empty()
                    && !parts[1].is_empty()
                    && !parts[2].is_empty();
                if !well_formed {
                    return Err(AppError::Validation(format!(
                        "social network {index}: Mastodon username should be in the \
                        \"@username@domain\" format, got `{}`",
                        self.username
                    )));
                }
            }
            Network::StackOverflow => {
                let mut parts = self.username.splitn(2, '/');
                let id = parts.next().unwrap_or_default();
                let name = parts.next().unwrap_or_default();
                if id.is_empty() || name.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(AppError::Validation(format!(
                        "social network {index}: StackOverflow username should be in the \
                        \"user_id/username\" format, got `{}`",
                        self.username
                    )));
                }
            }
            Network::Orcid => {
                let blocks: Vec<&str> = self.username.split('-').collect();
                let well_formed = blocks.len() == 4
                    && blocks.iter().all(|b| b.len() == 4)
                    && blocks[..3]
                        .iter()
                        .all(|b| b.bytes().all(|c| c.is_ascii_digit()))
                    && blocks[3]
                        .bytes()
                        .enumerate()
                        .all(|(i, c)| c.is_ascii_digit() || (i == 3 && c == b'X'));
                if !well_formed {
                    return Err(AppError::Validation(format!(
                        "social network {index}: ORCID should be in the \
                        \"XXXX-XXXX-XXXX-XXXX\" format, got `{}`",
                        self.username
                    )));
                }
            }
            Network::YouTube => {
                if self.username.starts_with('@') {
                    return Err(AppError::Validation(format!(
                        "social network {index}: YouTube username should not start \
                        with \"@\" (it is added automatically)"
                    )));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// The CV record
// ────────────────────────────────────────────────────────────────────────────

/// The full CV content. Constructed once from the input file, read-only for
/// the lifetime of a render.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cv {
    pub name: String,
    /// Short role line under the name. Falls back to the most recent
    /// experience entry's title when absent.
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub social_networks: Vec<SocialNetwork>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

impl Cv {
    /// Fail-fast structural validation. Empty sections are fine; malformed
    /// fields are not.
    pub fn validate(&self, current_date: NaiveDate) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation(
                "`cv.name` must not be empty".to_string(),
            ));
        }
        if let Some(email) = &self.email {
            // Cheap shape check; full RFC 5322 validation is not the goal.
            let at = email.find('@');
            if !matches!(at, Some(i) if i > 0 && i < email.len() - 1) {
                return Err(AppError::Validation(format!(
                    "`cv.email` does not look like an email address: `{email}`"
                )));
            }
        }
        for (index, social) in self.social_networks.iter().enumerate() {
            social.validate(index)?;
        }
        for (index, entry) in self.experience.iter().enumerate() {
            entry.validate(index, current_date)?;
        }
        self.validate_experience_order(current_date)?;
        for (index, group) in self.skills.iter().enumerate() {
            group.validate(index)?;
        }
        for (index, entry) in self.education.iter().enumerate() {
            entry.validate(index, current_date)?;
        }
        Ok(())
    }

    /// The experience list must stay reverse chronological (newest first),
    /// compared by start date.
    fn validate_experience_order(&self, current_date: NaiveDate) -> Result<(), AppError> {
        for pair in self.experience.windows(2) {
            let newer = &pair[0];
            let older = &pair[1];
            if newer.start_date.resolve(current_date) < older.start_date.resolve(current_date) {
                return Err(AppError::Validation(format!(
                    "experience entries must be sorted newest first: `{}` at {} \
                    appears before `{}` at {}",
                    newer.title,
                    newer.start_date.to_input_string(),
                    older.title,
                    older.start_date.to_input_string()
                )));
            }
        }
        Ok(())
    }

    /// The headline shown under the name: the explicit field when present,
    /// otherwise the most recent experience entry's title.
    pub fn resolved_headline(&self) -> Option<String> {
        self.headline
            .clone()
            .or_else(|| self.experience.first().map(|entry| entry.title.clone()))
    }
}
