//! Content management for markdown-based pages.
//!
//! This module loads markdown files from `<content_dir>/pages` at startup,
//! reads the YAML frontmatter, and renders the body to HTML once.
//!
//! # Contact Shortcodes
//!
//! Pages can link the clinic's contact channels without repeating them:
//!
//! ```markdown
//! Call us on {{contact "phone"}} or write to {{contact "email"}}.
//! ```
//!
//! Supported channels are `phone`, `email` and `whatsapp`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use chrono::NaiveDate;
use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, ParsedEntity, engine::YAML};
use regex::Regex;
use serde::Deserialize;

use pareena_core::clinic;

/// Metadata for static pages (about, etc.)
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
    /// Headline figures shown above the body, e.g. years in practice.
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

/// A figure and its caption.
#[derive(Debug, Clone, Deserialize)]
pub struct Highlight {
    pub value: String,
    pub label: String,
}

/// A page ready to render: frontmatter plus body HTML.
#[derive(Debug, Clone)]
pub struct Page {
    pub slug: String,
    pub meta: PageMeta,
    pub content_html: String,
}

/// Pages by slug, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    pages: Arc<HashMap<String, Page>>,
}

impl ContentStore {
    /// Read and render every `pages/*.md` under `content_dir`.
    ///
    /// A missing `pages` directory yields an empty store. A page that cannot
    /// be read or parsed fails the whole load, since content ships with the
    /// binary and a broken page is a build mistake.
    ///
    /// # Errors
    ///
    /// Returns the first page that fails, with its path.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let dir = content_dir.join("pages");
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "No pages directory, serving without content");
            return Ok(Self::default());
        }

        let mut pages = HashMap::new();
        for path in markdown_files(&dir)? {
            let page = read_page(&path)?;
            tracing::debug!(slug = %page.slug, "Page loaded");
            pages.insert(page.slug.clone(), page);
        }

        Ok(Self {
            pages: Arc::new(pages),
        })
    }

    #[must_use]
    pub fn get_page(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// `*.md` files directly inside `dir`, sorted so load order is stable.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    let io = |e: std::io::Error| ContentError::Io(format!("{}: {e}", dir.display()));
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io)? {
        let path = entry.map_err(io)?.path();
        if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// The file stem is the page slug.
fn read_page(path: &Path) -> Result<Page, ContentError> {
    let slug = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| ContentError::Parse(format!("{}: unusable file name", path.display())))?
        .to_string();
    let source = std::fs::read_to_string(path)
        .map_err(|e| ContentError::Io(format!("{}: {e}", path.display())))?;
    let (meta, content_html) = parse_page(&source)
        .map_err(|e| ContentError::Parse(format!("{}: {e}", path.display())))?;

    Ok(Page {
        slug,
        meta,
        content_html,
    })
}

/// Split frontmatter from a markdown document and render the body.
fn parse_page(content: &str) -> Result<(PageMeta, String), ContentError> {
    let parsed: ParsedEntity<PageMeta> = Matter::<YAML>::new()
        .parse(content)
        .map_err(|e| ContentError::Parse(format!("bad frontmatter: {e}")))?;
    let Some(meta) = parsed.data else {
        return Err(ContentError::Parse("no frontmatter".to_string()));
    };

    Ok((meta, render_markdown(&parsed.content)))
}

/// Markdown to HTML with tables, strikethrough and autolinks, after
/// shortcode expansion.
fn render_markdown(content: &str) -> String {
    let processed = process_shortcodes(content);

    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.header_ids = Some(String::new());

    // Shortcodes expand to raw anchors
    options.render.r#unsafe = true;

    markdown_to_html(&processed, &options)
}

// =============================================================================
// Shortcode Processing
// =============================================================================

/// Matches `{{contact "channel"}}`.
static CONTACT_SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{\{contact\s+"(\w+)"\s*\}\}"#).expect("Invalid regex"));

fn process_shortcodes(content: &str) -> String {
    CONTACT_SHORTCODE_RE
        .replace_all(content, |caps: &regex::Captures| {
            let channel = &caps[1];
            render_contact_link(channel).unwrap_or_else(|| {
                tracing::warn!("Unknown contact shortcode: {channel}");
                String::new()
            })
        })
        .into_owned()
}

/// Render an anchor for one of the clinic's contact channels.
fn render_contact_link(channel: &str) -> Option<String> {
    let link = match channel {
        "phone" => format!(r#"<a href="{}">{}</a>"#, clinic::PHONE_TEL, clinic::PHONE_DISPLAY),
        "email" => format!(r#"<a href="{}">{}</a>"#, clinic::EMAIL_MAILTO, clinic::EMAIL),
        "whatsapp" => format!(
            r#"<a href="{}" target="_blank" rel="noopener">WhatsApp</a>"#,
            clinic::WHATSAPP_URL
        ),
        _ => return None,
    };
    Some(link)
}

/// Why the content directory could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("cannot read content: {0}")]
    Io(String),
    #[error("invalid page: {0}")]
    Parse(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PAGE: &str = "---\ntitle: About Pareena Eye Care\ndescription: Who we are\nhighlights:\n  - value: \"15+\"\n    label: Years of Experience\n---\n\n## Our Story\n\nCall {{contact \"phone\"}} today.\n";

    #[test]
    fn test_parse_page_reads_frontmatter() {
        let (meta, html) = parse_page(PAGE).unwrap();
        assert_eq!(meta.title, "About Pareena Eye Care");
        assert_eq!(meta.description.as_deref(), Some("Who we are"));
        assert_eq!(meta.highlights.len(), 1);
        assert_eq!(meta.highlights[0].value, "15+");
        assert!(html.contains("Our Story"));
    }

    #[test]
    fn test_contact_shortcodes() {
        let html = process_shortcodes(r#"{{contact "phone"}} / {{contact "email"}}"#);
        assert!(html.contains(r#"href="tel:+919963006059""#));
        assert!(html.contains(r#"href="mailto:pareenaeyecare@gmail.com""#));

        let html = process_shortcodes(r#"{{contact "whatsapp"}}"#);
        assert!(html.contains(r#"rel="noopener""#));

        assert_eq!(process_shortcodes(r#"{{contact "fax"}}"#), "");
    }

    #[test]
    fn test_missing_frontmatter_is_an_error() {
        assert!(parse_page("# Just a heading\n").is_err());
    }

    #[test]
    fn test_load_bundled_content() {
        let store = ContentStore::load(Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/content")))
            .unwrap();
        let about = store.get_page("about").unwrap();
        assert!(!about.meta.highlights.is_empty());
        assert!(about.content_html.contains("Our Story"));
    }

    #[test]
    fn test_missing_pages_dir_is_empty() {
        let store = ContentStore::load(Path::new("/nonexistent/pareena-content")).unwrap();
        assert_eq!(store.page_count(), 0);
        assert!(store.get_page("about").is_none());
    }
}
