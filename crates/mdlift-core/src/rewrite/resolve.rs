//! Path resolution for scanned image references
//!
//! Remote URLs short-circuit before any filesystem probing. Wiki-link
//! references search a fixed candidate list of attachment folders;
//! everything else resolves against the document directory.

use std::path::{Component, Path, PathBuf};

use super::scanner::{ImageRef, SyntaxKind};

/// Outcome of resolving one reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// Already points at a remote URL or data URI; nothing to do
    Remote,
    /// Existing local file at this absolute path
    Local(PathBuf),
    /// Local reference whose file does not exist; carries the attempted
    /// path for the warning message
    Missing(PathBuf),
}

/// Attachment folders searched for wiki-link references, in order,
/// before falling back to the document directory itself.
const WIKI_ATTACHMENT_DIRS: [&str; 2] = ["attachments", "assets"];

/// Resolve a reference against the directory containing the document.
pub fn resolve(image: &ImageRef, document_dir: &Path) -> ResolvedTarget {
    // Remote detection must come first: URLs are not paths.
    if image.url.starts_with("http") || image.url.starts_with("data:") {
        return ResolvedTarget::Remote;
    }

    let raw = Path::new(&image.url);

    if raw.is_absolute() {
        return probe(raw.to_path_buf());
    }

    if image.kind == SyntaxKind::WikiLink {
        for folder in WIKI_ATTACHMENT_DIRS {
            let candidate = document_dir.join(folder).join(raw);
            if candidate.is_file() {
                return ResolvedTarget::Local(candidate);
            }
        }
        // Fall through to the document directory; when that misses too,
        // this form is the one reported in the warning.
        return probe(document_dir.join(raw));
    }

    probe(normalize(&document_dir.join(raw)))
}

fn probe(path: PathBuf) -> ResolvedTarget {
    if path.is_file() {
        ResolvedTarget::Local(path)
    } else {
        ResolvedTarget::Missing(path)
    }
}

/// Fold `.` and `..` components without touching the filesystem.
/// Lexical on purpose: missing files must still produce a readable
/// attempted path, and `canonicalize` fails on nonexistent paths.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, kind: SyntaxKind) -> ImageRef {
        ImageRef {
            raw: format!("![x]({url})"),
            url: url.to_string(),
            kind,
        }
    }

    #[test]
    fn test_remote_short_circuit() {
        let dir = Path::new("/nonexistent");
        for url in [
            "http://example.com/a.png",
            "https://example.com/a.png",
            "data:image/png;base64,AAAA",
        ] {
            assert_eq!(
                resolve(&image(url, SyntaxKind::MarkdownParen), dir),
                ResolvedTarget::Remote
            );
        }
    }

    #[test]
    fn test_relative_resolves_against_document_dir() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("pic.png"), b"png").unwrap();

        let target = resolve(&image("./pic.png", SyntaxKind::MarkdownParen), temp.path());
        assert_eq!(target, ResolvedTarget::Local(temp.path().join("pic.png")));
    }

    #[test]
    fn test_parent_components_normalized() {
        let temp = tempfile::tempdir().unwrap();
        let sub = temp.path().join("notes");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(temp.path().join("pic.png"), b"png").unwrap();

        let target = resolve(&image("../pic.png", SyntaxKind::MarkdownParen), &sub);
        assert_eq!(target, ResolvedTarget::Local(temp.path().join("pic.png")));
    }

    #[test]
    fn test_absolute_path_probed_directly() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("abs.png");
        std::fs::write(&file, b"png").unwrap();

        let url = file.display().to_string();
        let target = resolve(
            &image(&url, SyntaxKind::Html),
            Path::new("/unrelated"),
        );
        assert_eq!(target, ResolvedTarget::Local(file));
    }

    #[test]
    fn test_missing_reports_attempted_path() {
        let temp = tempfile::tempdir().unwrap();
        let target = resolve(&image("gone.png", SyntaxKind::MarkdownParen), temp.path());
        assert_eq!(target, ResolvedTarget::Missing(temp.path().join("gone.png")));
    }

    #[test]
    fn test_wiki_link_attachment_search_order() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp.path().join("attachments")).unwrap();
        std::fs::create_dir(temp.path().join("assets")).unwrap();
        std::fs::write(temp.path().join("attachments").join("pic.png"), b"a").unwrap();
        std::fs::write(temp.path().join("assets").join("pic.png"), b"b").unwrap();

        let target = resolve(&image("pic.png", SyntaxKind::WikiLink), temp.path());
        assert_eq!(
            target,
            ResolvedTarget::Local(temp.path().join("attachments").join("pic.png"))
        );
    }

    #[test]
    fn test_wiki_link_falls_back_to_assets() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp.path().join("assets")).unwrap();
        std::fs::write(temp.path().join("assets").join("pic.png"), b"b").unwrap();

        let target = resolve(&image("pic.png", SyntaxKind::WikiLink), temp.path());
        assert_eq!(
            target,
            ResolvedTarget::Local(temp.path().join("assets").join("pic.png"))
        );
    }

    #[test]
    fn test_wiki_link_falls_back_to_document_dir() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("pic.png"), b"c").unwrap();

        let target = resolve(&image("pic.png", SyntaxKind::WikiLink), temp.path());
        assert_eq!(target, ResolvedTarget::Local(temp.path().join("pic.png")));
    }

    #[test]
    fn test_wiki_link_missing_uses_document_dir_form() {
        let temp = tempfile::tempdir().unwrap();
        let target = resolve(&image("pic.png", SyntaxKind::WikiLink), temp.path());
        assert_eq!(target, ResolvedTarget::Missing(temp.path().join("pic.png")));
    }
}
