//! HTML preview: full-document wrapping, a text rendering for terminals, and
//! hand-off to the system browser.
//!
//! The terminal rendering never runs scripts; `<script>` and `<style>`
//! bodies are dropped before any text is shown.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Jv3Error, Result};

pub const PREVIEW_FILE_NAME: &str = "jv3-preview.html";

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Preview</title>
    <style>
        body { margin: 0; padding: 20px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; }
        * { box-sizing: border-box; }
    </style>
</head>
<body>
    "#;

const DOCUMENT_TAIL: &str = "\n</body>\n</html>";

/// Wrap a fragment in a complete document. Input that already declares a
/// doctype is returned as is.
pub fn document(html: &str) -> String {
    if html.contains("<!DOCTYPE html") {
        return html.to_string();
    }
    format!("{}{}{}", DOCUMENT_HEAD, html, DOCUMENT_TAIL)
}

static HIDDEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<head\b.*?</head\s*>|<!--.*?-->")
        .expect("hidden pattern is valid")
});
static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<li\b[^>]*>").expect("li pattern is valid"));
static BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?(?:div|p|h[1-6]|header|footer|main|section|article|nav|ul|ol|li|br|button|tr|table|body|html)\b[^>]*>")
        .expect("block pattern is valid")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\r\f]+").expect("space pattern is valid"));

/// Approximate what a browser would show, one entry per visual line
pub fn render_text(html: &str) -> Vec<String> {
    let text = HIDDEN_RE.replace_all(html, "");
    let text = LIST_ITEM_RE.replace_all(&text, "\n\u{2022} ");
    let text = BLOCK_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");
    let text = decode_entities(&text);

    text.lines()
        .map(|line| SPACE_RE.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty() && line != "\u{2022}")
        .collect()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Rendered preview of the router's current HTML
#[derive(Debug, Clone, Default)]
pub struct Preview {
    source: String,
    lines: Vec<String>,
    revision: u64,
}

impl Preview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-render if the HTML changed since the last render
    pub fn sync(&mut self, html: &str) {
        if html != self.source || self.revision == 0 {
            self.source = html.to_string();
            self.refresh();
        }
    }

    /// Re-render unconditionally
    pub fn refresh(&mut self) {
        self.lines = render_text(&self.source);
        self.revision += 1;
        tracing::debug!(revision = self.revision, lines = self.lines.len(), "preview rendered");
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Write the full document into `dir` and return its path
    pub fn write_document(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(PREVIEW_FILE_NAME);
        fs::write(&path, document(&self.source))?;
        Ok(path)
    }
}

/// Something that can show a written preview document to the user
pub trait DocumentOpener {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Hands files to the platform's default opener (a browser for `.html`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl DocumentOpener for SystemOpener {
    fn open(&self, path: &Path) -> Result<()> {
        open::that(path).map_err(|e| Jv3Error::Opener(e.to_string()))?;
        tracing::info!(path = %path.display(), "opened preview in browser");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    #[test]
    fn test_document_wraps_fragment() {
        let doc = document("<p>hi</p>");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Preview</title>"));
        assert!(doc.contains("<p>hi</p>"));
    }

    #[test]
    fn test_document_keeps_full_page() {
        let page = "<!DOCTYPE html><html><body>x</body></html>";
        assert_eq!(document(page), page);
    }

    #[test]
    fn test_render_website_template() {
        let html = classify("make me a website").html.unwrap();
        let lines = render_text(&html);
        assert_eq!(lines[0], "Welcome to My Website");
        assert!(lines.contains(&"Generated based on your request: \"make me a website\"".to_string()));
        assert!(lines.contains(&"\u{2022} Responsive design".to_string()));
        assert!(lines.contains(&"Get Started".to_string()));
    }

    #[test]
    fn test_render_drops_scripts_and_decodes() {
        let lines = render_text("<script>alert('x')</script><p>a &amp; b &lt;c&gt;</p><style>p{}</style>");
        assert_eq!(lines, vec!["a & b <c>".to_string()]);
    }

    #[test]
    fn test_render_full_document_skips_head() {
        let lines = render_text(&document("<h2>Title</h2>"));
        assert_eq!(lines, vec!["Title".to_string()]);
    }

    #[test]
    fn test_refresh_bumps_revision() {
        let mut preview = Preview::new();
        preview.sync("<p>one</p>");
        assert_eq!(preview.revision(), 1);
        preview.sync("<p>one</p>");
        assert_eq!(preview.revision(), 1);
        preview.refresh();
        assert_eq!(preview.revision(), 2);
        assert_eq!(preview.lines(), ["one".to_string()]);
    }

    #[test]
    fn test_write_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut preview = Preview::new();
        preview.sync("<p>saved</p>");
        let path = preview.write_document(dir.path()).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains("<p>saved</p>"));
    }
}
