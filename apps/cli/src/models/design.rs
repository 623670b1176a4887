//! Design options — pure presentation. Nothing in here changes document
//! content, only how the Typst output looks.
//!
//! Dimensions and colors are validated at deserialization time so a typo in
//! the input file fails fast instead of producing a Typst compile error later.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Validated scalar types
// ────────────────────────────────────────────────────────────────────────────

/// A Typst dimension string: a number followed by a unit (`2cm`, `0.65em`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypstDim(String);

const DIM_UNITS: &[&str] = &["cm", "in", "pt", "mm", "ex", "em"];

impl TryFrom<String> for TypstDim {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let unit = DIM_UNITS.iter().find(|u| value.ends_with(**u));
        let valid = match unit {
            Some(unit) => {
                let number = &value[..value.len() - unit.len()];
                let number = number.strip_prefix('-').unwrap_or(number);
                !number.is_empty()
                    && number.bytes().all(|b| b.is_ascii_digit() || b == b'.')
                    && number.bytes().filter(|b| *b == b'.').count() <= 1
                    && !number.starts_with('.')
                    && !number.ends_with('.')
            }
            None => false,
        };
        if valid {
            Ok(TypstDim(value))
        } else {
            Err(format!(
                "`{value}` is not a valid dimension. Use a number followed by a unit \
                (cm, in, pt, mm, ex, em), for example `0.5cm`."
            ))
        }
    }
}

impl From<TypstDim> for String {
    fn from(dim: TypstDim) -> String {
        dim.0
    }
}

impl std::fmt::Display for TypstDim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TypstDim {
    fn new(value: &str) -> TypstDim {
        TypstDim(value.to_string())
    }
}

/// A `#rrggbb` hex color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value.strip_prefix('#');
        let valid = matches!(hex, Some(digits) if digits.len() == 6
            && digits.bytes().all(|b| b.is_ascii_hexdigit()));
        if valid {
            Ok(HexColor(value.to_lowercase()))
        } else {
            Err(format!(
                "`{value}` is not a valid color. Use `#rrggbb` hex notation, for example `#004f90`."
            ))
        }
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> String {
        color.0
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl HexColor {
    fn new(value: &str) -> HexColor {
        HexColor(value.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font families
// ────────────────────────────────────────────────────────────────────────────

/// The supported font families, mapped to the names Typst resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    #[serde(rename = "Source Sans 3")]
    SourceSans3,
    #[serde(rename = "New Computer Modern")]
    NewComputerModern,
    #[serde(rename = "Lato")]
    Lato,
    #[serde(rename = "Raleway")]
    Raleway,
    #[serde(rename = "Charter")]
    Charter,
}

impl FontFamily {
    pub fn typst_name(&self) -> &'static str {
        match self {
            FontFamily::SourceSans3 => "Source Sans 3",
            FontFamily::NewComputerModern => "New Computer Modern",
            FontFamily::Lato => "Lato",
            FontFamily::Raleway => "Raleway",
            FontFamily::Charter => "Charter",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Option groups
// ────────────────────────────────────────────────────────────────────────────

/// Paper size, margins, and page furniture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PageOptions {
    /// A Typst paper name ("us-letter", "a4", ...). Passed through unchanged.
    pub paper: String,
    pub top_margin: TypstDim,
    pub bottom_margin: TypstDim,
    pub left_margin: TypstDim,
    pub right_margin: TypstDim,
    pub show_page_numbers: bool,
    /// Render a "Last updated in ..." note under the header.
    pub show_last_updated_date: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        PageOptions {
            paper: "us-letter".to_string(),
            top_margin: TypstDim::new("2cm"),
            bottom_margin: TypstDim::new("2cm"),
            left_margin: TypstDim::new("2cm"),
            right_margin: TypstDim::new("2cm"),
            show_page_numbers: true,
            show_last_updated_date: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Typography {
    pub font_family: FontFamily,
    pub font_size: TypstDim,
    pub name_font_size: TypstDim,
    /// Paragraph leading passed to `#set par`.
    pub leading: TypstDim,
}

impl Default for Typography {
    fn default() -> Self {
        Typography {
            font_family: FontFamily::SourceSans3,
            font_size: TypstDim::new("10pt"),
            name_font_size: TypstDim::new("24pt"),
            leading: TypstDim::new("0.65em"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Palette {
    pub text: HexColor,
    /// Section titles and rules.
    pub accent: HexColor,
    pub links: HexColor,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            text: HexColor::new("#000000"),
            accent: HexColor::new("#004f90"),
            links: HexColor::new("#004f90"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Spacing {
    pub section_spacing: TypstDim,
    pub entry_spacing: TypstDim,
    pub highlight_indent: TypstDim,
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing {
            section_spacing: TypstDim::new("0.6em"),
            entry_spacing: TypstDim::new("1.1em"),
            highlight_indent: TypstDim::new("0.4cm"),
        }
    }
}

/// The full presentation record. Every field has a default, so `design:` may
/// be omitted from the input file entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Design {
    pub page: PageOptions,
    pub typography: Typography,
    pub colors: Palette,
    pub spacing: Spacing,
    /// Append a computed duration ("2 years 4 months") to experience date ranges.
    pub show_time_spans: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dimensions_accepted() {
        for dim in ["2cm", "0.5in", "10pt", "-3mm", "0.65em", "1ex"] {
            assert!(
                TypstDim::try_from(dim.to_string()).is_ok(),
                "`{dim}` should be a valid dimension"
            );
        }
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        for dim in ["2", "cm", "2 cm", "2px", "..5cm", "2.cm", "1.2.3em"] {
            assert!(
                TypstDim::try_from(dim.to_string()).is_err(),
                "`{dim}` should be rejected"
            );
        }
    }

    #[test]
    fn test_valid_hex_colors_accepted() {
        assert!(HexColor::try_from("#004f90".to_string()).is_ok());
        assert_eq!(
            HexColor::try_from("#AABBCC".to_string()).unwrap().to_string(),
            "#aabbcc"
        );
    }

    #[test]
    fn test_invalid_hex_colors_rejected() {
        for color in ["004f90", "#04f", "#gggggg", "#004f901", "blue"] {
            assert!(
                HexColor::try_from(color.to_string()).is_err(),
                "`{color}` should be rejected"
            );
        }
    }

    #[test]
    fn test_design_defaults_from_empty_yaml() {
        let design: Design = serde_yaml::from_str("{}").unwrap();
        assert_eq!(design.page.paper, "us-letter");
        assert_eq!(design.typography.font_family, FontFamily::SourceSans3);
        assert!(!design.show_time_spans);
    }

    #[test]
    fn test_design_rejects_unknown_options() {
        let result: Result<Design, _> = serde_yaml::from_str("font_color: '#000000'");
        assert!(result.is_err(), "unknown design keys must be rejected");
    }

    #[test]
    fn test_font_family_deserializes_from_display_name() {
        let font: FontFamily = serde_yaml::from_str("\"New Computer Modern\"").unwrap();
        assert_eq!(font, FontFamily::NewComputerModern);
        assert_eq!(font.typst_name(), "New Computer Modern");
    }

    #[test]
    fn test_bad_dimension_in_design_fails_deserialization() {
        let result: Result<Design, _> =
            serde_yaml::from_str("page:\n  top_margin: 2bananas");
        assert!(result.is_err());
    }
}
