//! Document Assembler — turns the validated model into the ordered section
//! sequence both renderers consume.
//!
//! The assembled document is format-neutral: date ranges, time spans, the
//! headline fallback, and keyword bolding are all resolved here, so the
//! Markdown and Typst writers emit identical content for the same input. The
//! section order is fixed: Header, Summary, Experience, Skills, Education.
//! Empty sections stay in the sequence with empty bodies; renderers skip them.

use serde::Serialize;

use crate::models::cv::Cv;
use crate::models::date::{compute_time_span, format_date_range};
use crate::models::CvModel;

// ────────────────────────────────────────────────────────────────────────────
// Assembled block types
// ────────────────────────────────────────────────────────────────────────────

/// One contact line in the header: icon name, optional URL, display text.
#[derive(Debug, Clone, Serialize)]
pub struct Connection {
    pub icon: String,
    pub url: Option<String>,
    pub body: String,
}

/// One experience entry, fully formatted except for output markup.
#[derive(Debug, Clone, Serialize)]
pub struct ExperienceBlock {
    pub title: String,
    pub organization: String,
    pub location: Option<String>,
    pub date_range: String,
    /// Computed duration, present only when the design enables time spans.
    pub time_span: Option<String>,
    pub summary: Option<String>,
    pub highlights: Vec<String>,
}

/// One education entry — an experience block without highlights.
#[derive(Debug, Clone, Serialize)]
pub struct EducationBlock {
    pub degree: String,
    pub institution: String,
    pub location: Option<String>,
    pub date_range: String,
}

/// One "category: skill, skill, skill" line.
#[derive(Debug, Clone, Serialize)]
pub struct SkillLine {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub enum SectionBody {
    Summary(String),
    Experience(Vec<ExperienceBlock>),
    Skills(Vec<SkillLine>),
    Education(Vec<EducationBlock>),
}

impl SectionBody {
    pub fn is_empty(&self) -> bool {
        match self {
            SectionBody::Summary(text) => text.is_empty(),
            SectionBody::Experience(blocks) => blocks.is_empty(),
            SectionBody::Skills(lines) => lines.is_empty(),
            SectionBody::Education(blocks) => blocks.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: String,
    pub body: SectionBody,
}

/// The fully assembled document.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub name: String,
    pub headline: Option<String>,
    pub connections: Vec<Connection>,
    /// "Last updated in Aug 2026", when the design enables it.
    pub last_updated: Option<String>,
    pub sections: Vec<Section>,
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Assembles the document. Pure and total: a validated model always yields
/// the full section sequence, with empty bodies where content is absent.
pub fn assemble(model: &CvModel) -> Document {
    let cv = &model.cv;
    let locale = &model.locale;
    let current_date = model.settings.resolved_current_date();
    let keywords = &model.settings.bold_keywords;
    let bold = |text: &str| make_keywords_bold(text, keywords);

    let experience = cv
        .experience
        .iter()
        .map(|entry| {
            let end = entry.effective_end_date();
            ExperienceBlock {
                title: entry.title.clone(),
                organization: entry.organization.clone(),
                location: entry.location.clone(),
                date_range: format_date_range(&entry.start_date, &end, locale),
                time_span: model.design.show_time_spans.then(|| {
                    compute_time_span(&entry.start_date, &end, locale, current_date)
                }),
                summary: entry.summary.as_deref().map(bold),
                highlights: entry.highlights.iter().map(|h| bold(h)).collect(),
            }
        })
        .collect();

    let skills = cv
        .skills
        .iter()
        .map(|group| SkillLine {
            category: group.category.clone(),
            skills: group.skills.iter().map(|s| bold(s)).collect(),
        })
        .collect();

    let education = cv
        .education
        .iter()
        .map(|entry| EducationBlock {
            degree: entry.degree.clone(),
            institution: entry.institution.clone(),
            location: entry.location.clone(),
            date_range: format_date_range(&entry.start_date, &entry.effective_end_date(), locale),
        })
        .collect();

    let last_updated = model.design.page.show_last_updated_date.then(|| {
        let date = crate::models::date::DateValue::Day(current_date).format(locale);
        format!("{} {date}", locale.last_updated)
    });

    Document {
        name: cv.name.clone(),
        headline: cv.resolved_headline(),
        connections: build_connections(cv),
        last_updated,
        sections: vec![
            Section {
                title: "Summary".to_string(),
                body: SectionBody::Summary(
                    cv.summary.as_deref().map(bold).unwrap_or_default(),
                ),
            },
            Section {
                title: "Experience".to_string(),
                body: SectionBody::Experience(experience),
            },
            Section {
                title: "Skills".to_string(),
                body: SectionBody::Skills(skills),
            },
            Section {
                title: "Education".to_string(),
                body: SectionBody::Education(education),
            },
        ],
    }
}

/// Builds the header contact lines in fixed order: location, email, phone,
/// website, then social profiles in input order.
fn build_connections(cv: &Cv) -> Vec<Connection> {
    let mut connections = Vec::new();

    if let Some(location) = &cv.location {
        connections.push(Connection {
            icon: "location-dot".to_string(),
            url: None,
            body: location.clone(),
        });
    }
    if let Some(email) = &cv.email {
        connections.push(Connection {
            icon: "envelope".to_string(),
            url: Some(format!("mailto:{email}")),
            body: email.clone(),
        });
    }
    if let Some(phone) = &cv.phone {
        connections.push(Connection {
            icon: "phone".to_string(),
            url: Some(format!("tel:{}", phone.replace(' ', ""))),
            body: phone.clone(),
        });
    }
    if let Some(website) = &cv.website {
        connections.push(Connection {
            icon: "link".to_string(),
            url: Some(website.clone()),
            body: clean_url(website),
        });
    }
    for social in &cv.social_networks {
        connections.push(Connection {
            icon: social.network.icon().to_string(),
            url: Some(social.url()),
            body: social.display_body(),
        });
    }

    connections
}

/// Strips the protocol and any trailing slash for display.
pub fn clean_url(url: &str) -> String {
    let cleaned = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    cleaned.strip_suffix('/').unwrap_or(cleaned).to_string()
}

/// Wraps every configured keyword occurrence in Markdown bold markers.
///
/// Single left-to-right pass; at each position the longest matching keyword
/// wins, so "Rust 2021" is bolded as a whole before "Rust" gets a chance.
pub fn make_keywords_bold(text: &str, keywords: &[String]) -> String {
    if keywords.is_empty() {
        return text.to_string();
    }

    let mut sorted: Vec<&str> = keywords.iter().map(|k| k.as_str()).collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    'outer: while !rest.is_empty() {
        for keyword in &sorted {
            if !keyword.is_empty() && rest.starts_with(keyword) {
                result.push_str("**");
                result.push_str(keyword);
                result.push_str("**");
                rest = &rest[keyword.len()..];
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) => {
                result.push(c);
                rest = chars.as_str();
            }
            None => break,
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CvModel;
    use chrono::NaiveDate;

    fn model_from(yaml: &str) -> CvModel {
        let mut model: CvModel = serde_yaml::from_str(yaml).unwrap();
        model.settings.current_date = NaiveDate::from_ymd_opt(2026, 8, 1);
        model.validate().unwrap();
        model
    }

    const FULL_YAML: &str = r#"
cv:
  name: A B
  email: a@b.com
  location: Austin, TX
  social_networks:
    - network: GitHub
      username: ab
  summary: Engineer who ships.
  experience:
    - title: Dev
      organization: X
      start_date: 2020
      end_date: present
      highlights:
        - Did thing
  skills:
    - category: Languages
      skills: [Rust, Python]
  education:
    - institution: MIT
      degree: BS
      start_date: 2016
      end_date: 2020
"#;

    // ── section sequence ────────────────────────────────────────────────────

    #[test]
    fn test_sections_in_fixed_order() {
        let document = assemble(&model_from(FULL_YAML));
        let titles: Vec<&str> = document
            .sections
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Summary", "Experience", "Skills", "Education"]);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let model = model_from(FULL_YAML);
        let first = serde_json::to_string(&assemble(&model)).unwrap();
        let second = serde_json::to_string(&assemble(&model)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_basic_cv_assembles() {
        let document = assemble(&model_from(FULL_YAML));
        assert_eq!(document.name, "A B");
        assert_eq!(document.headline.as_deref(), Some("Dev"));

        let SectionBody::Experience(blocks) = &document.sections[1].body else {
            panic!("second section must be Experience");
        };
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Dev");
        assert_eq!(blocks[0].organization, "X");
        assert_eq!(blocks[0].date_range, "2020 – present");
        assert_eq!(blocks[0].highlights, vec!["Did thing".to_string()]);
    }

    #[test]
    fn test_empty_cv_yields_empty_section_bodies() {
        let document = assemble(&model_from("cv:\n  name: A B\n"));
        assert_eq!(document.sections.len(), 4);
        assert!(document.sections.iter().all(|s| s.body.is_empty()));
    }

    #[test]
    fn test_experience_order_preserved() {
        let yaml = r#"
cv:
  name: A B
  experience:
    - title: Staff
      organization: Y
      start_date: 2023
    - title: Dev
      organization: X
      start_date: 2020
      end_date: 2023
"#;
        let document = assemble(&model_from(yaml));
        let SectionBody::Experience(blocks) = &document.sections[1].body else {
            panic!("expected experience section");
        };
        assert_eq!(blocks[0].title, "Staff");
        assert_eq!(blocks[1].title, "Dev");
    }

    #[test]
    fn test_time_spans_appear_only_when_enabled() {
        let mut model = model_from(FULL_YAML);
        let document = assemble(&model);
        let SectionBody::Experience(blocks) = &document.sections[1].body else {
            panic!("expected experience section");
        };
        assert!(blocks[0].time_span.is_none());

        model.design.show_time_spans = true;
        let document = assemble(&model);
        let SectionBody::Experience(blocks) = &document.sections[1].body else {
            panic!("expected experience section");
        };
        // 2020 (year precision) through present (2026): years-only span.
        assert_eq!(blocks[0].time_span.as_deref(), Some("6 years"));
    }

    #[test]
    fn test_last_updated_note_follows_design_toggle() {
        let mut model = model_from(FULL_YAML);
        assert_eq!(
            assemble(&model).last_updated.as_deref(),
            Some("Last updated in Aug 2026")
        );

        model.design.page.show_last_updated_date = false;
        assert!(assemble(&model).last_updated.is_none());
    }

    // ── connections ─────────────────────────────────────────────────────────

    #[test]
    fn test_connection_order_and_urls() {
        let document = assemble(&model_from(FULL_YAML));
        let bodies: Vec<&str> = document
            .connections
            .iter()
            .map(|c| c.body.as_str())
            .collect();
        assert_eq!(bodies, vec!["Austin, TX", "a@b.com", "ab"]);
        assert_eq!(document.connections[0].url, None);
        assert_eq!(
            document.connections[1].url.as_deref(),
            Some("mailto:a@b.com")
        );
        assert_eq!(
            document.connections[2].url.as_deref(),
            Some("https://github.com/ab")
        );
    }

    #[test]
    fn test_clean_url_strips_protocol_and_slash() {
        assert_eq!(clean_url("https://example.com/"), "example.com");
        assert_eq!(clean_url("http://example.com/cv"), "example.com/cv");
        assert_eq!(clean_url("example.com"), "example.com");
    }

    // ── keyword bolding ─────────────────────────────────────────────────────

    #[test]
    fn test_keywords_bolded() {
        let keywords = vec!["Rust".to_string()];
        assert_eq!(
            make_keywords_bold("Expert in Rust and Java", &keywords),
            "Expert in **Rust** and Java"
        );
    }

    #[test]
    fn test_longest_keyword_wins() {
        let keywords = vec!["Rust".to_string(), "Rust 2021".to_string()];
        assert_eq!(
            make_keywords_bold("Ported to Rust 2021", &keywords),
            "Ported to **Rust 2021**"
        );
    }

    #[test]
    fn test_no_keywords_leaves_text_untouched() {
        assert_eq!(make_keywords_bold("Did thing", &[]), "Did thing");
    }

    #[test]
    fn test_highlights_verbatim_without_keywords() {
        let document = assemble(&model_from(FULL_YAML));
        let SectionBody::Experience(blocks) = &document.sections[1].body else {
            panic!("expected experience section");
        };
        assert_eq!(blocks[0].highlights[0], "Did thing");
    }
}
