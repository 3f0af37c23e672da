//! Generator module - generates static HTML files using built-in Tera templates

use anyhow::Result;
use chrono::Datelike;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Context;
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::content::{ContentLoader, ContentSource, LoadedPost, Post};
use crate::helpers::{full_url_for, post_url, url_for};
use crate::templates::{PostCard, PostPage, TemplateRenderer};

mod head;

pub use head::PageHead;

/// Card gradient color used when a post sets no accent
const DEFAULT_ACCENT: &str = "rgba(59,130,246,0.35)";

/// Static site generator using Tera templates
pub struct Generator {
    config: SiteConfig,
    static_dir: PathBuf,
    public_dir: PathBuf,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(config: &SiteConfig, static_dir: &Path, public_dir: &Path) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            config: config.clone(),
            static_dir: static_dir.to_path_buf(),
            public_dir: public_dir.to_path_buf(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate<S: ContentSource>(&self, loader: &ContentLoader<S>) -> Result<()> {
        // Ensure public directory exists
        fs::create_dir_all(&self.public_dir)?;

        let posts = loader.list()?;

        self.write_stylesheet()?;
        self.copy_static_assets()?;
        self.generate_index(&posts)?;

        let mut loaded_posts = Vec::new();
        for post in &posts {
            let Some(loaded) = loader.load(&post.slug)? else {
                // Removed between listing and loading
                tracing::warn!("Post vanished while generating: {}", post.slug);
                continue;
            };
            self.generate_post_page(&loaded)?;
            loaded_posts.push(loaded);
        }

        self.generate_atom_feed(&loaded_posts)?;

        tracing::info!("Generated {} posts", loaded_posts.len());
        Ok(())
    }

    /// Context keys shared by every page
    fn base_context(&self, head: &PageHead) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.config);
        context.insert("head", &head.render());
        context.insert("css_url", &url_for(&self.config, "assets/site.css"));
        context.insert("home_url", &url_for(&self.config, ""));
        context.insert("year", &chrono::Local::now().year());
        context
    }

    /// Generate the listing page
    fn generate_index(&self, posts: &[Post]) -> Result<()> {
        let cards: Vec<PostCard> = posts.iter().map(|p| self.card_for(p)).collect();

        let head = PageHead::for_site(&self.config);
        let mut context = self.base_context(&head);
        context.insert("posts", &cards);

        let html = self.renderer.render("index.html", &context)?;
        let output_path = self.public_dir.join("index.html");
        fs::write(&output_path, html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::info!("Generated index.html");

        Ok(())
    }

    /// Build the card context for one listing entry
    fn card_for(&self, post: &Post) -> PostCard {
        PostCard {
            title: post.title.clone(),
            slug: post.slug.clone(),
            url: post_url(&self.config, &post.slug),
            date: post.date.to_rfc3339(),
            author: post.author.clone(),
            reading_minutes: post.reading_minutes,
            tags: post.tags.clone(),
            description: post.description.clone().unwrap_or_default(),
            image: post.image.clone().unwrap_or_default(),
            accent: post
                .accent
                .clone()
                .unwrap_or_else(|| DEFAULT_ACCENT.to_string()),
        }
    }

    /// Generate one post page under `<public>/<blog_dir>/<slug>/index.html`
    fn generate_post_page(&self, loaded: &LoadedPost) -> Result<()> {
        let head = PageHead::for_post(&self.config, &loaded.post);
        let mut context = self.base_context(&head);
        context.insert(
            "post",
            &PostPage {
                title: loaded.post.title.clone(),
                subtitle: loaded.subtitle.clone().unwrap_or_default(),
                subtitle_note: loaded.subtitle_note.clone().unwrap_or_default(),
                date: loaded.post.date.to_rfc3339(),
                author: loaded.post.author.clone(),
                reading_minutes: loaded.post.reading_minutes,
                tags: loaded.post.tags.clone(),
                content: loaded.html.clone(),
            },
        );
        context.insert("toc", &loaded.toc);

        let html = self.renderer.render("post.html", &context)?;

        let output_path = self
            .public_dir
            .join(&self.config.blog_dir)
            .join(&loaded.post.slug)
            .join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, &html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated post: {:?}", output_path);

        Ok(())
    }

    /// Generate the Atom feed
    fn generate_atom_feed(&self, posts: &[LoadedPost]) -> Result<()> {
        let base_url = self.config.url.trim_end_matches('/');

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!(
            "  <title>{}</title>\n",
            escape_xml(&self.config.title)
        ));
        feed.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\"/>\n",
            full_url_for(&self.config, "atom.xml")
        ));
        feed.push_str(&format!(
            "  <link href=\"{}\"/>\n",
            full_url_for(&self.config, "/")
        ));
        feed.push_str(&format!(
            "  <updated>{}</updated>\n",
            chrono::Utc::now().to_rfc3339()
        ));
        feed.push_str(&format!("  <id>{}</id>\n", full_url_for(&self.config, "/")));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&self.config.author)
        ));

        // Newest 20 posts, one entry per slug (entry ids must be unique)
        let mut seen_slugs = HashSet::new();
        for loaded in posts
            .iter()
            .filter(|loaded| seen_slugs.insert(loaded.post.slug.as_str()))
            .take(20)
        {
            let link = full_url_for(
                &self.config,
                &format!("{}/{}/", self.config.blog_dir, loaded.post.slug),
            );
            feed.push_str("  <entry>\n");
            feed.push_str(&format!(
                "    <title>{}</title>\n",
                escape_xml(&loaded.post.title)
            ));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", link));
            feed.push_str(&format!("    <id>{}</id>\n", link));
            feed.push_str(&format!(
                "    <published>{}</published>\n",
                loaded.post.date.to_rfc3339()
            ));
            feed.push_str(&format!(
                "    <updated>{}</updated>\n",
                loaded.post.date.to_rfc3339()
            ));
            if let Some(description) = &loaded.post.description {
                feed.push_str(&format!(
                    "    <summary>{}</summary>\n",
                    escape_xml(description)
                ));
            }
            // Convert relative URLs in content to absolute URLs
            let content = convert_relative_urls_to_absolute(&loaded.html, base_url);
            // Strip invalid XML control characters
            let clean_content = strip_invalid_xml_chars(&content);
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                clean_content
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        let output_path = self.public_dir.join("atom.xml");
        fs::write(&output_path, feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }

    /// Write the embedded stylesheet to the assets directory
    fn write_stylesheet(&self) -> Result<()> {
        let assets_dir = self.public_dir.join("assets");
        fs::create_dir_all(&assets_dir)?;
        fs::write(assets_dir.join("site.css"), TemplateRenderer::stylesheet())?;
        Ok(())
    }

    /// Copy static assets (images, etc.) to the public directory
    fn copy_static_assets(&self) -> Result<()> {
        if !self.static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(&self.static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() {
                let relative = path.strip_prefix(&self.static_dir)?;
                let dest = self.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Convert relative URLs in HTML content to absolute URLs
/// Handles href="/...", src="/...", and similar patterns
fn convert_relative_urls_to_absolute(content: &str, base_url: &str) -> String {
    content
        .replace("href=\"/", &format!("href=\"{}/", base_url))
        .replace("src=\"/", &format!("src=\"{}/", base_url))
        .replace("href='/", &format!("href='{}/", base_url))
        .replace("src='/", &format!("src='{}/", base_url))
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
/// XML 1.0 only allows: #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}
