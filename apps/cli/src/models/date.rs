//! CV dates — parsing, locale-aware formatting, ranges, and time spans.
//!
//! A date in the input file is an integer year (`2020`), a `YYYY-MM` or
//! `YYYY-MM-DD` string, or the sentinel `present` (end dates only). "present"
//! is a distinguished variant rather than an absent marker; an omitted end
//! date is normalized to it during validation and renders identically.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::locale::{substitute_placeholders, Locale};

/// One parsed date value, as precise as the input provided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDate", into = "String")]
pub enum DateValue {
    Year(i32),
    YearMonth { year: i32, month: u32 },
    Day(NaiveDate),
    Present,
}

/// Serde-facing shape: YAML/JSON dates arrive as bare integers or strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawDate {
    Int(i64),
    Text(String),
}

impl TryFrom<RawDate> for DateValue {
    type Error = String;

    fn try_from(raw: RawDate) -> Result<Self, Self::Error> {
        match raw {
            RawDate::Int(year) => parse_year(&year.to_string()),
            RawDate::Text(text) => DateValue::parse(&text).map_err(|e| e.to_string()),
        }
    }
}

impl From<DateValue> for String {
    fn from(date: DateValue) -> String {
        date.to_input_string()
    }
}

impl DateValue {
    /// Parses a date string: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or `present`.
    pub fn parse(text: &str) -> Result<DateValue, AppError> {
        if text == "present" {
            return Ok(DateValue::Present);
        }

        let parts: Vec<&str> = text.split('-').collect();
        let invalid = || {
            AppError::Validation(format!(
                "`{text}` is not a valid date. Use YYYY-MM-DD, YYYY-MM, or YYYY format \
                (or `present` for an ongoing end date)."
            ))
        };

        match parts.as_slice() {
            [year] => parse_year(year).map_err(|_| invalid()),
            [year, month] => {
                let year: i32 = parse_digits(year, 4).ok_or_else(invalid)?;
                let month: u32 = parse_digits(month, 2).ok_or_else(invalid)?;
                // Reject month 0 or 13 the same way a full date parse would.
                if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
                    return Err(invalid());
                }
                Ok(DateValue::YearMonth { year, month })
            }
            [_, _, _] => {
                let day = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| invalid())?;
                Ok(DateValue::Day(day))
            }
            _ => Err(invalid()),
        }
    }

    /// The canonical input-file spelling of this date.
    pub fn to_input_string(&self) -> String {
        match self {
            DateValue::Year(year) => year.to_string(),
            DateValue::YearMonth { year, month } => format!("{year}-{month:02}"),
            DateValue::Day(day) => day.format("%Y-%m-%d").to_string(),
            DateValue::Present => "present".to_string(),
        }
    }

    /// Collapses the value to a concrete date for comparison and arithmetic.
    /// Year and month precision resolve to the first day of the period;
    /// "present" resolves to `current_date`.
    pub fn resolve(&self, current_date: NaiveDate) -> NaiveDate {
        match self {
            DateValue::Year(year) => NaiveDate::from_ymd_opt(*year, 1, 1)
                .unwrap_or(current_date),
            DateValue::YearMonth { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1)
                .unwrap_or(current_date),
            DateValue::Day(day) => *day,
            DateValue::Present => current_date,
        }
    }

    /// True when the value carries month precision or better.
    pub fn has_month(&self) -> bool {
        matches!(self, DateValue::YearMonth { .. } | DateValue::Day(_))
    }

    /// Formats the value for display. A bare year stays a bare year; month
    /// precision goes through the locale's single-date template; "present"
    /// renders as the locale's word for it.
    pub fn format(&self, locale: &Locale) -> String {
        match self {
            DateValue::Year(year) => year.to_string(),
            DateValue::YearMonth { year, month } => {
                format_month_year(*year, *month, locale)
            }
            DateValue::Day(day) => format_month_year(day.year(), day.month(), locale),
            DateValue::Present => locale.present.clone(),
        }
    }
}

fn parse_year(text: &str) -> Result<DateValue, String> {
    parse_digits(text, 4)
        .map(DateValue::Year)
        .ok_or_else(|| format!("`{text}` is not a valid year (expected YYYY)"))
}

/// Parses a string of exactly `len` ASCII digits. No regex needed.
fn parse_digits<T: std::str::FromStr>(text: &str, len: usize) -> Option<T> {
    if text.len() == len && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

fn format_month_year(year: i32, month: u32, locale: &Locale) -> String {
    let index = (month - 1) as usize;
    substitute_placeholders(
        &locale.single_date_template,
        &[
            ("MONTH_NAME", locale.month_names[index].clone()),
            ("MONTH_ABBREVIATION", locale.month_abbreviations[index].clone()),
            ("MONTH_IN_TWO_DIGITS", format!("{month:02}")),
            ("MONTH", month.to_string()),
            ("YEAR_IN_TWO_DIGITS", format!("{:02}", year % 100)),
            ("YEAR", year.to_string()),
        ],
    )
}

/// Formats a start/end pair through the locale's range template.
pub fn format_date_range(start: &DateValue, end: &DateValue, locale: &Locale) -> String {
    substitute_placeholders(
        &locale.date_range_template,
        &[
            ("START_DATE", start.format(locale)),
            ("END_DATE", end.format(locale)),
        ],
    )
}

/// Computes a human duration between two dates ("2 years 4 months").
///
/// When either endpoint is year-only, the span cannot be more precise than
/// years: it renders as "1 year" below two years, "N years" otherwise. With
/// month precision on both ends, months are counted too, rounding up so a
/// span never reads as zero.
pub fn compute_time_span(
    start: &DateValue,
    end: &DateValue,
    locale: &Locale,
    current_date: NaiveDate,
) -> String {
    let start_resolved = start.resolve(current_date);
    let end_resolved = end.resolve(current_date);

    if !start.has_month() || !(end.has_month() || *end == DateValue::Present) {
        let span_years = end_resolved.year() - start_resolved.year();
        let (how_many, unit) = if span_years < 2 {
            ("1".to_string(), locale.year.clone())
        } else {
            (span_years.to_string(), locale.years.clone())
        };
        return substitute_placeholders(
            &locale.time_span_template,
            &[
                ("HOW_MANY_YEARS", how_many),
                ("YEARS", unit),
                ("HOW_MANY_MONTHS", String::new()),
                ("MONTHS", String::new()),
            ],
        );
    }

    let span_days = (end_resolved - start_resolved).num_days().max(0);
    let mut span_years = span_days / 365;
    let mut span_months = (span_days % 365) / 30 + 1;
    // Prevent "1 year 12 months" style overflow.
    span_years += span_months / 12;
    span_months %= 12;

    let (year_count, year_unit) = match span_years {
        0 => (String::new(), String::new()),
        1 => ("1".to_string(), locale.year.clone()),
        n => (n.to_string(), locale.years.clone()),
    };
    let (month_count, month_unit) = match span_months {
        0 => (String::new(), String::new()),
        1 => ("1".to_string(), locale.month.clone()),
        n => (n.to_string(), locale.months.clone()),
    };

    substitute_placeholders(
        &locale.time_span_template,
        &[
            ("HOW_MANY_YEARS", year_count),
            ("YEARS", year_unit),
            ("HOW_MANY_MONTHS", month_count),
            ("MONTHS", month_unit),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale() -> Locale {
        Locale::default()
    }

    fn current() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    }

    // ── parsing ─────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_bare_year() {
        assert_eq!(DateValue::parse("2020").unwrap(), DateValue::Year(2020));
    }

    #[test]
    fn test_parse_year_month() {
        assert_eq!(
            DateValue::parse("2020-09").unwrap(),
            DateValue::YearMonth { year: 2020, month: 9 }
        );
    }

    #[test]
    fn test_parse_full_date() {
        assert_eq!(
            DateValue::parse("2020-09-24").unwrap(),
            DateValue::Day(NaiveDate::from_ymd_opt(2020, 9, 24).unwrap())
        );
    }

    #[test]
    fn test_parse_present_sentinel() {
        assert_eq!(DateValue::parse("present").unwrap(), DateValue::Present);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["Fall 2023", "20-09", "2020-13", "2020-02-30", "202O"] {
            assert!(
                DateValue::parse(bad).is_err(),
                "`{bad}` should not parse as a date"
            );
        }
    }

    #[test]
    fn test_yaml_integer_year_deserializes() {
        let date: DateValue = serde_yaml::from_str("2020").unwrap();
        assert_eq!(date, DateValue::Year(2020));
    }

    #[test]
    fn test_yaml_string_date_deserializes() {
        let date: DateValue = serde_yaml::from_str("\"2020-09\"").unwrap();
        assert_eq!(date, DateValue::YearMonth { year: 2020, month: 9 });
    }

    // ── formatting ──────────────────────────────────────────────────────────

    #[test]
    fn test_format_year_is_bare() {
        assert_eq!(DateValue::Year(2020).format(&locale()), "2020");
    }

    #[test]
    fn test_format_year_month_uses_abbreviation() {
        let date = DateValue::YearMonth { year: 2025, month: 3 };
        assert_eq!(date.format(&locale()), "Mar 2025");
    }

    #[test]
    fn test_format_present_uses_locale_word() {
        let mut l = locale();
        l.present = "heute".to_string();
        assert_eq!(DateValue::Present.format(&l), "heute");
    }

    #[test]
    fn test_format_date_range_year_to_present() {
        let range = format_date_range(&DateValue::Year(2020), &DateValue::Present, &locale());
        assert_eq!(range, "2020 – present");
    }

    #[test]
    fn test_format_date_range_month_precision() {
        let range = format_date_range(
            &DateValue::YearMonth { year: 2020, month: 6 },
            &DateValue::YearMonth { year: 2023, month: 9 },
            &locale(),
        );
        assert_eq!(range, "June 2020 – Sept 2023");
    }

    // ── resolution ──────────────────────────────────────────────────────────

    #[test]
    fn test_resolve_present_is_current_date() {
        assert_eq!(DateValue::Present.resolve(current()), current());
    }

    #[test]
    fn test_resolve_year_is_january_first() {
        assert_eq!(
            DateValue::Year(2020).resolve(current()),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
    }

    // ── time spans ──────────────────────────────────────────────────────────

    #[test]
    fn test_time_span_year_only_inputs() {
        let span = compute_time_span(
            &DateValue::Year(2020),
            &DateValue::Year(2023),
            &locale(),
            current(),
        );
        assert_eq!(span, "3 years");
    }

    #[test]
    fn test_time_span_same_year_reads_one_year() {
        let span = compute_time_span(
            &DateValue::Year(2020),
            &DateValue::Year(2020),
            &locale(),
            current(),
        );
        assert_eq!(span, "1 year");
    }

    #[test]
    fn test_time_span_month_precision() {
        let span = compute_time_span(
            &DateValue::YearMonth { year: 2020, month: 6 },
            &DateValue::YearMonth { year: 2023, month: 9 },
            &locale(),
            current(),
        );
        assert_eq!(span, "3 years 4 months");
    }

    #[test]
    fn test_time_span_under_a_year_has_no_year_part() {
        let span = compute_time_span(
            &DateValue::YearMonth { year: 2024, month: 1 },
            &DateValue::YearMonth { year: 2024, month: 6 },
            &locale(),
            current(),
        );
        assert_eq!(span, "6 months");
    }
}
