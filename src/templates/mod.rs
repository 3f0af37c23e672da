//! Built-in site templates using the Tera template engine
//!
//! The default theme is embedded directly in the binary, so a generated
//! site needs no theme directory on disk.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::format_date;

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Disable autoescaping for HTML templates since we're generating HTML
        // and URLs/paths should not be escaped
        tera.autoescape_on(vec![]);

        // Register all templates
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
        ])?;

        // Register custom filters
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// The embedded stylesheet, written out as assets/site.css
    pub fn stylesheet() -> &'static str {
        include_str!("site/site.css")
    }
}

/// Tera filter: format an RFC 3339 date string with Moment.js-style tokens
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "DD/MM/YYYY".to_string(),
    };

    match chrono::DateTime::parse_from_rfc3339(&s) {
        Ok(date) => Ok(tera::Value::String(format_date(&date, &format))),
        Err(_) => Ok(tera::Value::String(s)),
    }
}

/// Data structures for template context

/// One summary card on the listing page
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub title: String,
    pub slug: String,
    pub url: String,
    /// RFC 3339; templates format it with the `date_format` filter
    pub date: String,
    pub author: String,
    pub reading_minutes: u32,
    pub tags: Vec<String>,
    pub description: String,
    pub image: String,
    /// Card gradient color, always set (falls back to the site default)
    pub accent: String,
}

/// Full context for a post page
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub title: String,
    pub subtitle: String,
    pub subtitle_note: String,
    pub date: String,
    pub author: String,
    pub reading_minutes: u32,
    pub tags: Vec<String>,
    pub content: String,
}
