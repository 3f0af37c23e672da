//! Content loader - builds post listings and full documents from a source
//!
//! Listing never fails on a single document: unreadable files are logged and
//! skipped, and metadata problems fall back to defaults field by field.

use anyhow::Result;
use chrono::Local;
use std::collections::HashSet;

use super::post::reading_minutes;
use super::{ContentSource, FrontMatter, LoadedPost, MarkdownRenderer, Post};

/// Loads posts from a content source
pub struct ContentLoader<S> {
    source: S,
    renderer: MarkdownRenderer,
    default_author: String,
}

impl<S: ContentSource> ContentLoader<S> {
    /// Create a new content loader with default settings
    pub fn new(source: S) -> Self {
        Self {
            source,
            renderer: MarkdownRenderer::new(),
            default_author: String::new(),
        }
    }

    /// Create with a site-level author fallback and highlight theme
    pub fn with_options(source: S, author: &str, highlight_theme: &str) -> Self {
        Self {
            source,
            renderer: MarkdownRenderer::with_theme(highlight_theme),
            default_author: author.to_string(),
        }
    }

    /// List all posts, newest first
    pub fn list(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();

        for name in self.source.entries()? {
            let raw = match self.source.read(&name) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", name, e);
                    continue;
                }
            };
            let (fm, body) = FrontMatter::parse(&raw);
            posts.push(self.summarize(&name, &fm, body));
        }

        // Sort by date descending (newest first); the sort is stable, so
        // posts with equal dates keep their discovery order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        warn_duplicate_slugs(&posts);

        Ok(posts)
    }

    /// Load a single post by slug, with rendered content.
    /// Returns `Ok(None)` when no document has that slug.
    pub fn load(&self, slug: &str) -> Result<Option<LoadedPost>> {
        let Some(name) = self
            .source
            .entries()?
            .into_iter()
            .find(|name| stem(name) == slug)
        else {
            return Ok(None);
        };

        let raw = self.source.read(&name)?;
        let (fm, body) = FrontMatter::parse(&raw);
        let post = self.summarize(&name, &fm, body);
        let rendered = self.renderer.render(body)?;

        Ok(Some(LoadedPost {
            post,
            subtitle: fm.subtitle,
            subtitle_note: fm.subtitle_note,
            raw: body.to_string(),
            html: rendered.html,
            toc: rendered.toc,
        }))
    }

    /// Build the summary entry for one document
    fn summarize(&self, name: &str, fm: &FrontMatter, body: &str) -> Post {
        Post {
            slug: stem(name).to_string(),
            title: fm.title.clone().unwrap_or_default(),
            date: fm.parse_date().unwrap_or_else(Local::now),
            tags: fm.tags.clone(),
            description: fm.description.clone(),
            image: fm.image.clone(),
            accent: fm.accent.clone(),
            author: fm
                .author
                .clone()
                .unwrap_or_else(|| self.default_author.clone()),
            reading_minutes: reading_minutes(body.split_whitespace().count()),
        }
    }
}

/// File name without its extension
fn stem(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    }
}

/// Duplicate slugs shadow each other on the generated site; log them
fn warn_duplicate_slugs(posts: &[Post]) {
    let mut seen = HashSet::new();
    for post in posts {
        if !seen.insert(post.slug.as_str()) {
            tracing::warn!("Duplicate slug: {}", post.slug);
        }
    }
}
