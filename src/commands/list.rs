//! List site content

use anyhow::Result;

use crate::content::Post;
use crate::helpers::format_date;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let loader = site.loader();

    match content_type {
        "post" | "posts" => {
            let posts = loader.list()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("{}", post_line(&post, &site.config.date_format));
            }
        }
        "tag" | "tags" => {
            let posts = loader.list()?;
            let mut tags: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: posts, tags", content_type);
        }
    }

    Ok(())
}

/// One listing row, with the date rendered per the configured `date_format`
fn post_line(post: &Post, date_format: &str) -> String {
    format!(
        "  {} - {} [{}] {} min read",
        format_date(&post.date, date_format),
        post.title,
        post.slug,
        post.reading_minutes
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn post() -> Post {
        Post {
            slug: "hello-world".to_string(),
            title: "Hello World".to_string(),
            date: Local.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            tags: vec![],
            description: None,
            image: None,
            accent: None,
            author: "Ada".to_string(),
            reading_minutes: 2,
        }
    }

    #[test]
    fn test_post_line_uses_configured_date_format() {
        assert_eq!(
            post_line(&post(), "DD/MM/YYYY"),
            "  15/01/2024 - Hello World [hello-world] 2 min read"
        );
        assert_eq!(
            post_line(&post(), "D MMMM YYYY"),
            "  15 January 2024 - Hello World [hello-world] 2 min read"
        );
    }
}
