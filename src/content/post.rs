//! Post models
//!
//! [`Post`] is the lightweight summary used for listings and feeds;
//! [`LoadedPost`] carries the full rendered document for a detail page.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Words per minute assumed when estimating reading time
pub const WORDS_PER_MINUTE: usize = 225;

/// Estimate reading time in whole minutes, never less than one
pub fn reading_minutes(word_count: usize) -> u32 {
    let minutes = word_count.div_ceil(WORDS_PER_MINUTE);
    minutes.max(1) as u32
}

/// A blog post summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Slug (URL-friendly name, taken from the file name)
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Post tags
    pub tags: Vec<String>,

    /// Short summary shown on cards and in meta tags
    pub description: Option<String>,

    /// Cover image URL
    pub image: Option<String>,

    /// Accent color for the card fallback background
    pub accent: Option<String>,

    /// Post author
    pub author: String,

    /// Estimated reading time in minutes
    pub reading_minutes: u32,
}

/// A heading entry for the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Anchor id of the heading element
    pub id: String,
    /// Heading text with markup stripped
    pub text: String,
}

/// A fully loaded post with rendered content
#[derive(Debug, Clone, Serialize)]
pub struct LoadedPost {
    /// Summary fields, identical to the listing entry for the same slug
    #[serde(flatten)]
    pub post: Post,

    /// Optional line shown under the title
    pub subtitle: Option<String>,

    /// Optional note rendered next to the subtitle
    pub subtitle_note: Option<String>,

    /// Raw markdown body, front-matter stripped
    pub raw: String,

    /// Rendered HTML content
    pub html: String,

    /// Section headings for the table of contents
    pub toc: Vec<TocEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_minutes_never_zero() {
        assert_eq!(reading_minutes(0), 1);
        assert_eq!(reading_minutes(1), 1);
    }

    #[test]
    fn test_reading_minutes_rounds_up() {
        assert_eq!(reading_minutes(225), 1);
        assert_eq!(reading_minutes(226), 2);
        assert_eq!(reading_minutes(450), 2);
        assert_eq!(reading_minutes(451), 3);
        assert_eq!(reading_minutes(900), 4);
    }
}
