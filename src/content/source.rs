//! Content source abstraction - where documents come from

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Provider of content documents: entry names plus raw contents.
///
/// The loader only ever talks to this trait, so it can run against a real
/// content directory or an in-memory fixture set.
pub trait ContentSource {
    /// Names of every document in the source (file name including extension).
    fn entries(&self) -> Result<Vec<String>>;

    /// Raw contents of one document.
    fn read(&self, name: &str) -> Result<String>;
}

/// Content documents stored as markdown files in a flat directory
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    /// Create a source over a directory (it does not have to exist yet)
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl ContentSource for DirSource {
    fn entries(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }

        // Directory iteration order is not portable; sort for stable output
        names.sort();

        Ok(names)
    }

    fn read(&self, name: &str) -> Result<String> {
        Ok(fs::read_to_string(self.dir.join(name))?)
    }
}

/// In-memory content source, used by tests and fixtures
#[derive(Debug, Default)]
pub struct MemorySource {
    docs: Vec<(String, String)>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document; entries keep insertion order
    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<String>) {
        self.docs.push((name.into(), contents.into()));
    }
}

impl ContentSource for MemorySource {
    fn entries(&self) -> Result<Vec<String>> {
        Ok(self.docs.iter().map(|(name, _)| name.clone()).collect())
    }

    fn read(&self, name: &str) -> Result<String> {
        self.docs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, contents)| contents.clone())
            .ok_or_else(|| anyhow!("No such document: {}", name))
    }
}

/// Check if a file is a markdown/MDX file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "mdx" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_dir_source_lists_markdown_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("beta.md"), "b").unwrap();
        fs::write(dir.path().join("alpha.mdx"), "a").unwrap();
        fs::write(dir.path().join("gamma.markdown"), "c").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.md"), "skip").unwrap();

        let source = DirSource::new(dir.path());
        let entries = source.entries().unwrap();

        assert_eq!(entries, vec!["alpha.mdx", "beta.md", "gamma.markdown"]);
    }

    #[test]
    fn test_dir_source_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(dir.path().join("does-not-exist"));
        assert!(source.entries().unwrap().is_empty());
    }

    #[test]
    fn test_dir_source_read() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("post.md"), "hello").unwrap();

        let source = DirSource::new(dir.path());
        assert_eq!(source.read("post.md").unwrap(), "hello");
        assert!(source.read("missing.md").is_err());
    }

    #[test]
    fn test_memory_source_keeps_insertion_order() {
        let mut source = MemorySource::new();
        source.insert("z.md", "last alphabetically, first inserted");
        source.insert("a.md", "first alphabetically");

        assert_eq!(source.entries().unwrap(), vec!["z.md", "a.md"]);
        assert!(source.read("z.md").unwrap().contains("first inserted"));
        assert!(source.read("nope.md").is_err());
    }
}
