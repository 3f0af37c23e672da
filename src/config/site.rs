//! Site configuration (site.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub static_dir: String,
    pub public_dir: String,
    pub blog_dir: String,

    // Presentation
    pub date_format: String,
    pub highlight_theme: String,
    #[serde(default)]
    pub menu: Vec<MenuItem>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            tagline: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),
            blog_dir: "blog".to_string(),

            date_format: "DD/MM/YYYY".to_string(),
            highlight_theme: "base16-ocean.dark".to_string(),
            menu: Vec::new(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from a file if it exists, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }
}

/// A navigation menu entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Folio");
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.blog_dir, "blog");
        assert_eq!(config.date_format, "DD/MM/YYYY");
        assert_eq!(config.root, "/");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Corner
tagline: Notes on systems
author: Test User
url: https://example.org
menu:
  - name: Home
    path: /
  - name: Blog
    path: /blog/
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Corner");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.url, "https://example.org");
        assert_eq!(config.menu.len(), 2);
        assert_eq!(config.menu[1].name, "Blog");
        // Unset fields keep their defaults
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let yaml = "title: T\nanalytics_id: UA-1\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.extra.contains_key("analytics_id"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = SiteConfig::load_or_default("/definitely/not/here/site.yml").unwrap();
        assert_eq!(config.title, "Folio");
    }
}
