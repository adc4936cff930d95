//! Case-law source records and their presentation model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A case-law citation record backing an answer.
///
/// Every field is optional on the wire. Blank strings are treated the same
/// as missing fields when the source is presented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub case_name: Option<String>,
    #[serde(default)]
    pub neutral_citation: Option<String>,
    #[serde(default)]
    pub citation: Option<String>,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub judgment_date: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub saflii_url: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

impl Source {
    /// Reads a source out of an arbitrary JSON value.
    ///
    /// Returns `None` for anything that is not an object. Fields holding
    /// non-string values are dropped rather than failing the whole record.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let field = |name: &str| {
            object
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Some(Self {
            case_name: field("case_name"),
            neutral_citation: field("neutral_citation"),
            citation: field("citation"),
            court: field("court"),
            judgment_date: field("judgment_date"),
            summary: field("summary"),
            saflii_url: field("saflii_url"),
            pdf_url: field("pdf_url"),
        })
    }

    /// The citation shown to the user: the neutral form when present,
    /// otherwise the plain citation.
    pub fn display_citation(&self) -> Option<&str> {
        non_blank(&self.neutral_citation).or_else(|| non_blank(&self.citation))
    }

    /// Builds the presentation card for this source at 0-based `index`.
    pub fn to_card(&self, index: usize) -> SourceCard {
        let court_line = match (non_blank(&self.court), non_blank(&self.judgment_date)) {
            (Some(court), Some(date)) => Some(format!("{court} · {date}")),
            (Some(court), None) => Some(court.to_string()),
            (None, Some(date)) => Some(date.to_string()),
            (None, None) => None,
        };

        SourceCard {
            index,
            number: index + 1,
            case_name: non_blank(&self.case_name).map(str::to_string),
            citation: self.display_citation().map(str::to_string),
            court_line,
            summary: non_blank(&self.summary).map(str::to_string),
            saflii_url: non_blank(&self.saflii_url).map(str::to_string),
            pdf_url: non_blank(&self.pdf_url).map(str::to_string),
        }
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Presentation model shared by the sources panel and the source modal.
///
/// A `None` field means the fragment is left out of the markup entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCard {
    /// 0-based position within the owning exchange's sources.
    pub index: usize,
    /// 1-based badge number, matching the inline marker label.
    pub number: usize,
    pub case_name: Option<String>,
    pub citation: Option<String>,
    /// Court and judgment date joined for a single line.
    pub court_line: Option<String>,
    pub summary: Option<String>,
    pub saflii_url: Option<String>,
    pub pdf_url: Option<String>,
}

impl SourceCard {
    /// True when at least one document link is present.
    pub fn has_links(&self) -> bool {
        self.saflii_url.is_some() || self.pdf_url.is_some()
    }
}

/// Builds cards for an ordered source list.
pub fn source_cards(sources: &[Source]) -> Vec<SourceCard> {
    sources
        .iter()
        .enumerate()
        .map(|(index, source)| source.to_card(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_citation_prefers_neutral() {
        let source = Source {
            neutral_citation: Some("[2025] ZANWHC 191".to_string()),
            citation: Some("2025 (3) SA 1 (NWM)".to_string()),
            ..Default::default()
        };
        assert_eq!(source.display_citation(), Some("[2025] ZANWHC 191"));
    }

    #[test]
    fn test_display_citation_skips_blank_neutral() {
        let source = Source {
            neutral_citation: Some("  ".to_string()),
            citation: Some("[2011] ZALAC 7".to_string()),
            ..Default::default()
        };
        assert_eq!(source.display_citation(), Some("[2011] ZALAC 7"));
    }

    #[test]
    fn test_from_value_tolerates_wrong_types() {
        let value = json!({
            "case_name": "NUM obo Employees v CCMA",
            "citation": 42,
            "summary": null,
        });
        let source = Source::from_value(&value).unwrap();
        assert_eq!(source.case_name.as_deref(), Some("NUM obo Employees v CCMA"));
        assert_eq!(source.citation, None);
        assert_eq!(source.summary, None);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Source::from_value(&json!("a string")).is_none());
        assert!(Source::from_value(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_card_omits_missing_fields() {
        let source = Source {
            case_name: Some("Smith v Jones".to_string()),
            ..Default::default()
        };
        let card = source.to_card(2);
        assert_eq!(card.number, 3);
        assert_eq!(card.case_name.as_deref(), Some("Smith v Jones"));
        assert!(card.citation.is_none());
        assert!(card.court_line.is_none());
        assert!(!card.has_links());
    }

    #[test]
    fn test_card_has_links_with_either_url() {
        let pdf_only = Source {
            pdf_url: Some("https://www.saflii.org/za/cases/ZACC/1995/3.pdf".to_string()),
            ..Default::default()
        };
        assert!(pdf_only.to_card(0).has_links());

        let blank = Source {
            saflii_url: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!blank.to_card(0).has_links());
    }

    #[test]
    fn test_card_court_line_combinations() {
        let both = Source {
            court: Some("Labour Appeal Court".to_string()),
            judgment_date: Some("2011-03-01".to_string()),
            ..Default::default()
        };
        assert_eq!(
            both.to_card(0).court_line.as_deref(),
            Some("Labour Appeal Court · 2011-03-01")
        );

        let date_only = Source {
            judgment_date: Some("2011-03-01".to_string()),
            ..Default::default()
        };
        assert_eq!(date_only.to_card(0).court_line.as_deref(), Some("2011-03-01"));
    }
}
