//! Content module - discovery, front-matter, and post loading

mod frontmatter;
mod loader;
mod markdown;
mod post;
mod source;

pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use markdown::{MarkdownRenderer, Rendered};
pub use post::{reading_minutes, LoadedPost, Post, TocEntry, WORDS_PER_MINUTE};
pub use source::{ContentSource, DirSource, MemorySource};
