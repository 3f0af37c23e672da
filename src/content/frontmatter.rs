//! Front-matter parsing
//!
//! Metadata never fails a document: every field falls back to its default
//! when missing or of the wrong shape, and an unparseable block leaves the
//! document intact with default metadata.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Accept any YAML value for a string field; non-strings become `None`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_yaml::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Accept any YAML value for a tag list; anything but a sequence becomes
/// the empty list, and non-string items inside a sequence are skipped
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_yaml::Value::Sequence(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_yaml::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Front-matter data from a content document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "lenient_string", default)]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string", default)]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_string_list", default)]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient_string", default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string", default)]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_string", default)]
    pub accent: Option<String>,
    #[serde(deserialize_with = "lenient_string", default)]
    pub author: Option<String>,

    /// Shown under the title on the post page, not part of the summary
    #[serde(deserialize_with = "lenient_string", default)]
    pub subtitle: Option<String>,
    #[serde(rename = "subtitleNote", deserialize_with = "lenient_string", default)]
    pub subtitle_note: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from a document's raw contents.
    /// Returns (front_matter, body).
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start();

        let Some(rest) = trimmed.strip_prefix("---") else {
            return (FrontMatter::default(), trimmed);
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing delimiter, treat the whole document as body
            return (FrontMatter::default(), trimmed);
        };

        let yaml_content = &rest[..end_pos];
        let body = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), body);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => (fm, body),
            Err(e) => {
                // Probably a markdown thematic break rather than metadata;
                // keep the original text so nothing is lost
                tracing::warn!("Unparseable front-matter, using defaults: {}", e);
                (FrontMatter::default(), trimmed)
            }
        }
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_ref().and_then(|s| parse_date_string(s))
    }
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&dt).single();
        }
        // Try parsing date only
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Local.from_local_datetime(&dt).single();
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}
