//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Site;

/// Create a new content document named after the slugified title
pub fn run(site: &Site, title: &str) -> Result<()> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);

    fs::create_dir_all(&site.content_dir)?;
    let file_path = site.content_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: {}\ndate: {}\ntags: []\n---\n\n",
        title,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_creates_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();

        run(&site, "My New Post").unwrap();

        let file = site.content_dir.join("my-new-post.md");
        let content = fs::read_to_string(&file).unwrap();
        assert!(content.starts_with("---\ntitle: My New Post\n"));
        assert!(content.contains("tags: []"));

        // Refuses to overwrite
        assert!(run(&site, "My New Post").is_err());
    }
}
