//! Page head metadata
//!
//! Builds the `<head>` block for generated pages: title, description,
//! Open Graph / Twitter cards, canonical link, and the JSON-LD payloads
//! crawlers read. Empty values are omitted rather than emitted blank.

use serde_json::json;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{full_url_for, url_for};

/// Metadata for one generated page
pub struct PageHead {
    site_name: String,
    title: String,
    description: String,
    author: String,
    canonical: String,
    feed_url: String,
    image: Option<String>,
    article: Option<ArticleMeta>,
}

/// Post-only metadata
struct ArticleMeta {
    published: String,
    tags: Vec<String>,
    blog_url: String,
    home_url: String,
}

impl PageHead {
    /// Head block for the listing page
    pub fn for_site(config: &SiteConfig) -> Self {
        Self {
            site_name: config.title.clone(),
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            canonical: full_url_for(config, "/"),
            feed_url: url_for(config, "atom.xml"),
            image: None,
            article: None,
        }
    }

    /// Head block for a post page
    pub fn for_post(config: &SiteConfig, post: &Post) -> Self {
        let canonical = full_url_for(config, &format!("{}/{}/", config.blog_dir, post.slug));
        let image = post.image.as_ref().map(|img| {
            if img.starts_with('/') {
                full_url_for(config, img)
            } else {
                img.clone()
            }
        });

        Self {
            site_name: config.title.clone(),
            title: post.title.clone(),
            description: post.description.clone().unwrap_or_default(),
            author: post.author.clone(),
            canonical,
            feed_url: url_for(config, "atom.xml"),
            image,
            article: Some(ArticleMeta {
                published: post.date.to_rfc3339(),
                tags: post.tags.clone(),
                blog_url: full_url_for(config, &config.blog_dir),
                home_url: full_url_for(config, "/"),
            }),
        }
    }

    /// Window title, `Post Title | Site Name` for posts
    pub fn full_title(&self) -> String {
        if self.title.is_empty() || self.title == self.site_name {
            self.site_name.clone()
        } else {
            format!("{} | {}", self.title, self.site_name)
        }
    }

    /// Render the head block as HTML
    pub fn render(&self) -> String {
        let full_title = self.full_title();
        let mut tags = vec![format!("<title>{}</title>", html_escape(&full_title))];

        if !self.description.is_empty() {
            tags.push(format!(
                r#"<meta name="description" content="{}">"#,
                html_escape(&self.description)
            ));
        }
        if !self.author.is_empty() {
            tags.push(format!(
                r#"<meta name="author" content="{}">"#,
                html_escape(&self.author)
            ));
        }

        tags.push(format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(&self.site_name)
        ));
        tags.push(format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(&full_title)
        ));
        if !self.description.is_empty() {
            tags.push(format!(
                r#"<meta property="og:description" content="{}">"#,
                html_escape(&self.description)
            ));
        }
        tags.push(format!(
            r#"<meta property="og:type" content="{}">"#,
            if self.article.is_some() {
                "article"
            } else {
                "website"
            }
        ));
        tags.push(format!(
            r#"<meta property="og:url" content="{}">"#,
            self.canonical
        ));
        if let Some(img) = &self.image {
            tags.push(format!(r#"<meta property="og:image" content="{}">"#, img));
        }

        if let Some(article) = &self.article {
            tags.push(format!(
                r#"<meta property="article:published_time" content="{}">"#,
                article.published
            ));
            if !self.author.is_empty() {
                tags.push(format!(
                    r#"<meta property="article:author" content="{}">"#,
                    html_escape(&self.author)
                ));
            }
        }

        tags.push(r#"<meta name="twitter:card" content="summary_large_image">"#.to_string());
        tags.push(format!(
            r#"<meta name="twitter:title" content="{}">"#,
            html_escape(&full_title)
        ));
        if !self.description.is_empty() {
            tags.push(format!(
                r#"<meta name="twitter:description" content="{}">"#,
                html_escape(&self.description)
            ));
        }
        if let Some(img) = &self.image {
            tags.push(format!(r#"<meta name="twitter:image" content="{}">"#, img));
        }

        tags.push(format!(
            r#"<link rel="canonical" href="{}">"#,
            self.canonical
        ));
        tags.push(format!(
            r#"<link rel="alternate" href="{}" title="{}" type="application/atom+xml">"#,
            self.feed_url,
            html_escape(&self.site_name)
        ));

        if self.article.is_some() {
            tags.push(self.json_ld());
            tags.push(self.breadcrumb_json_ld());
        }

        tags.join("\n")
    }

    /// BlogPosting JSON-LD for the post page
    fn json_ld(&self) -> String {
        let Some(article) = &self.article else {
            return String::new();
        };
        let ld = json!({
            "@context": "https://schema.org",
            "@type": "BlogPosting",
            "headline": self.title,
            "datePublished": article.published,
            "dateModified": article.published,
            "description": self.description,
            "url": self.canonical,
            "author": {
                "@type": "Person",
                "name": self.author,
            },
            "keywords": article.tags.join(", "),
            "publisher": {
                "@type": "Person",
                "name": self.site_name,
            },
        });
        format!(r#"<script type="application/ld+json">{}</script>"#, ld)
    }

    /// BreadcrumbList JSON-LD: Home / Blog / this post
    fn breadcrumb_json_ld(&self) -> String {
        let Some(article) = &self.article else {
            return String::new();
        };
        let ld = json!({
            "@context": "https://schema.org",
            "@type": "BreadcrumbList",
            "itemListElement": [
                {
                    "@type": "ListItem",
                    "position": 1,
                    "name": "Home",
                    "item": article.home_url,
                },
                {
                    "@type": "ListItem",
                    "position": 2,
                    "name": "Blog",
                    "item": article.blog_url,
                },
                {
                    "@type": "ListItem",
                    "position": 3,
                    "name": self.title,
                    "item": self.canonical,
                },
            ],
        });
        format!(r#"<script type="application/ld+json">{}</script>"#, ld)
    }
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn test_config() -> SiteConfig {
        SiteConfig {
            title: "My Corner".to_string(),
            description: "Notes on systems".to_string(),
            author: "Site Author".to_string(),
            url: "https://example.com".to_string(),
            ..SiteConfig::default()
        }
    }

    fn test_post() -> Post {
        Post {
            slug: "hello-world".to_string(),
            title: "Hello World".to_string(),
            date: Local.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            tags: vec!["rust".to_string(), "notes".to_string()],
            description: Some("A first post".to_string()),
            image: Some("/images/hello.png".to_string()),
            accent: None,
            author: "Ada".to_string(),
            reading_minutes: 2,
        }
    }

    #[test]
    fn test_site_head() {
        let head = PageHead::for_site(&test_config());
        let html = head.render();
        assert!(html.contains("<title>My Corner</title>"));
        assert!(html.contains(r#"<meta property="og:type" content="website">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://example.com/">"#));
        assert!(!html.contains("application/ld+json"));
    }

    #[test]
    fn test_post_head_has_article_meta() {
        let head = PageHead::for_post(&test_config(), &test_post());
        let html = head.render();
        assert!(html.contains("<title>Hello World | My Corner</title>"));
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
        assert!(html.contains(r#"content="https://example.com/blog/hello-world/""#));
        assert!(html.contains(r#"<meta property="article:author" content="Ada">"#));
        assert!(html.contains("article:published_time"));
        assert!(html.contains(r#"og:image" content="https://example.com/images/hello.png""#));
        assert!(html.contains(r#"twitter:card" content="summary_large_image""#));
    }

    #[test]
    fn test_post_head_json_ld() {
        let head = PageHead::for_post(&test_config(), &test_post());
        let html = head.render();
        assert!(html.contains(r#""@type":"BlogPosting""#));
        assert!(html.contains(r#""headline":"Hello World""#));
        assert!(html.contains(r#""keywords":"rust, notes""#));
        assert!(html.contains(r#""@type":"BreadcrumbList""#));
        assert!(html.contains(r#""name":"Blog""#));
    }

    #[test]
    fn test_empty_description_is_omitted() {
        let mut post = test_post();
        post.description = None;
        post.image = None;
        let head = PageHead::for_post(&test_config(), &post);
        let html = head.render();
        assert!(!html.contains(r#"name="description""#));
        assert!(!html.contains("og:description"));
        assert!(!html.contains("og:image"));
        assert!(!html.contains("twitter:image"));
    }

    #[test]
    fn test_empty_title_falls_back_to_site_name() {
        let mut post = test_post();
        post.title = String::new();
        let head = PageHead::for_post(&test_config(), &post);
        assert_eq!(head.full_title(), "My Corner");
    }

    #[test]
    fn test_head_escapes_html() {
        let mut post = test_post();
        post.title = "Tags & <Things>".to_string();
        let head = PageHead::for_post(&test_config(), &post);
        let html = head.render();
        assert!(html.contains("Tags &amp; &lt;Things&gt; | My Corner"));
    }

    #[test]
    fn test_external_image_kept_verbatim() {
        let mut post = test_post();
        post.image = Some("https://cdn.example.net/cover.png".to_string());
        let head = PageHead::for_post(&test_config(), &post);
        let html = head.render();
        assert!(html.contains(r#"og:image" content="https://cdn.example.net/cover.png""#));
    }
}
