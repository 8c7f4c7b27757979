//! Image reference scanner
//!
//! One compiled alternation pattern finds every image reference in a
//! single left-to-right pass, so matches never overlap and arrive
//! ordered by offset. Alternation order matters: the angle-bracket form
//! must win over the plain paren form at the same position so the
//! brackets are stripped from the captured URL.

use once_cell::sync::Lazy;
use regex::Regex;

/// Syntax variant an [`ImageRef`] was matched as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxKind {
    /// `![alt](url)` or `![alt](url "title")`
    MarkdownParen,
    /// `![alt](<url>)`
    MarkdownAngleBracket,
    /// `<img ... src="url" ...>`
    Html,
    /// `![[filename]]`
    WikiLink,
}

/// One image reference found in the document text
#[derive(Debug, Clone)]
pub struct ImageRef {
    /// Full matched text, e.g. `![alt](./pic.png)`
    pub raw: String,
    /// Captured URL/path portion, e.g. `./pic.png`
    pub url: String,
    /// Which syntax matched
    pub kind: SyntaxKind,
}

static IMAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"!\[[^\]]*\]\(\s*<([^>]+)>\s*\)|!\[[^\]]*\]\(\s*([^)\s]+)[^)]*\)|<img[^>]+src=["']([^"']+)["'][^>]*>|!\[\[([^\]]+)\]\]"#,
    )
    .expect("image reference pattern compiles")
});

/// Scan `text` for image references, in offset order.
///
/// Re-scanning the same text yields the same sequence. References whose
/// URL portion is empty cannot match and are therefore dropped.
pub fn scan(text: &str) -> impl Iterator<Item = ImageRef> + '_ {
    IMAGE_PATTERN.captures_iter(text).filter_map(|caps| {
        let (fragment, kind) = if let Some(m) = caps.get(1) {
            (m, SyntaxKind::MarkdownAngleBracket)
        } else if let Some(m) = caps.get(2) {
            (m, SyntaxKind::MarkdownParen)
        } else if let Some(m) = caps.get(3) {
            (m, SyntaxKind::Html)
        } else if let Some(m) = caps.get(4) {
            (m, SyntaxKind::WikiLink)
        } else {
            return None;
        };

        Some(ImageRef {
            raw: caps[0].to_string(),
            url: fragment.as_str().to_string(),
            kind,
        })
    })
}
