//! Markdown rendering with syntax highlighting
//!
//! Level-2 and level-3 headings get slugified `id` attributes so the post
//! page can link to them; the level-2 entries come back as the table of
//! contents.

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::content::post::TocEntry;

/// Output of a render pass
#[derive(Debug, Clone)]
pub struct Rendered {
    /// The rendered HTML
    pub html: String,
    /// Section headings, in document order
    pub toc: Vec<TocEntry>,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer with the default highlight theme
    pub fn new() -> Self {
        Self::with_theme("base16-ocean.dark")
    }

    /// Create a renderer using the given syntect theme
    pub fn with_theme(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Render markdown to HTML and collect the table of contents
    pub fn render(&self, markdown: &str) -> Result<Rendered> {
        // Enable most options but NOT YAML metadata blocks
        // We handle front-matter separately in FrontMatter::parse()
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_DEFINITION_LIST
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut toc: Vec<TocEntry> = Vec::new();

        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code_buf = String::new();

        type HeadingStart<'a> = (
            HeadingLevel,
            Option<CowStr<'a>>,
            Vec<CowStr<'a>>,
            Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
        );
        let mut heading: Option<HeadingStart> = None;
        let mut heading_events: Vec<Event> = Vec::new();
        let mut heading_text = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_buf.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted = self.highlight_code(&code_buf, code_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_buf.push_str(&text);
                }
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) if matches!(level, HeadingLevel::H2 | HeadingLevel::H3) => {
                    heading = Some((level, id, classes, attrs));
                    heading_events.clear();
                    heading_text.clear();
                }
                Event::End(TagEnd::Heading(_)) if heading.is_some() => {
                    let Some((level, id, classes, attrs)) = heading.take() else {
                        continue;
                    };
                    // An explicit {#id} attribute wins over the slugified text
                    let anchor = match id {
                        Some(explicit) => explicit.to_string(),
                        None => slug::slugify(&heading_text),
                    };
                    if level == HeadingLevel::H2 {
                        toc.push(TocEntry {
                            id: anchor.clone(),
                            text: heading_text.trim().to_string(),
                        });
                    }
                    events.push(Event::Start(Tag::Heading {
                        level,
                        id: Some(CowStr::from(anchor)),
                        classes,
                        attrs,
                    }));
                    events.append(&mut heading_events);
                    events.push(Event::End(TagEnd::Heading(level)));
                }
                other if heading.is_some() => {
                    if let Event::Text(text) | Event::Code(text) = &other {
                        heading_text.push_str(text);
                    }
                    heading_events.push(other);
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(Rendered {
            html: html_output,
            toc,
        })
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        // Try to find syntax for the language
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted =
            theme.map(|theme| highlighted_html_for_string(code, &self.syntax_set, syntax, theme));

        match highlighted {
            Some(Ok(highlighted)) => format!(
                r#"<figure class="highlight language-{}">{}</figure>"#,
                lang, highlighted
            ),
            _ => {
                // Fallback to plain code block
                let escaped = html_escape(code);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    lang, escaped
                )
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
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

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(out.html.contains("<h1>Hello World</h1>"));
        assert!(out.html.contains("<p>This is a test.</p>"));
        assert!(out.toc.is_empty());
    }

    #[test]
    fn test_h2_gets_slug_id_and_toc_entry() {
        let renderer = MarkdownRenderer::new();
        let out = renderer
            .render("## Getting Started\n\nSome prose.\n\n## Wrapping Up\n")
            .unwrap();
        assert!(out.html.contains(r#"<h2 id="getting-started">Getting Started</h2>"#));
        assert!(out.html.contains(r#"<h2 id="wrapping-up">Wrapping Up</h2>"#));
        assert_eq!(
            out.toc,
            vec![
                TocEntry {
                    id: "getting-started".to_string(),
                    text: "Getting Started".to_string(),
                },
                TocEntry {
                    id: "wrapping-up".to_string(),
                    text: "Wrapping Up".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_h3_gets_id_but_no_toc_entry() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("### Small Print\n").unwrap();
        assert!(out.html.contains(r#"<h3 id="small-print">Small Print</h3>"#));
        assert!(out.toc.is_empty());
    }

    #[test]
    fn test_explicit_heading_id_wins() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("## Getting Started {#intro}\n").unwrap();
        assert!(out.html.contains(r##"<h2 id="intro">"##));
        assert_eq!(out.toc[0].id, "intro");
    }

    #[test]
    fn test_toc_text_strips_inline_code() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("## Using `serde` here\n").unwrap();
        assert_eq!(out.toc[0].id, "using-serde-here");
        assert_eq!(out.toc[0].text, "Using serde here");
        // The rendered heading keeps the inline code markup
        assert!(out.html.contains("<code>serde</code>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(out.html.contains("highlight"));
        assert!(out.html.contains("language-rust"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let renderer = MarkdownRenderer::new();
        let out = renderer.render("```nosuchlang\nplain text\n```").unwrap();
        assert!(out.html.contains("plain text"));
    }
}
