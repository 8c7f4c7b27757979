//! Document seam and an in-memory text buffer implementation
//!
//! The rewrite workflow talks to the host buffer through [`Document`]:
//! read the full text, map byte offsets to line/column positions, and
//! apply a batch of range edits atomically. [`TextDocument`] is the
//! file-backed implementation used by the CLI and by tests.

use crate::error::RewriteError;

/// Zero-based line/column position inside a document.
///
/// `character` counts Unicode scalar values within the line, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

/// Half-open range between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// A single range replacement
#[derive(Debug, Clone)]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

/// Host text buffer as consumed by the rewrite workflow.
///
/// The workflow never constructs or destroys documents; it only reads
/// and writes through this trait.
pub trait Document {
    /// Full document text
    fn text(&self) -> String;

    /// Convert an absolute byte offset into a [`Position`].
    /// Offsets past the end clamp to the final position.
    fn offset_to_position(&self, offset: usize) -> Position;

    /// Apply a batch of edits as one transaction. Either every edit is
    /// applied or none is; ranges must not overlap.
    fn apply_edits(&mut self, edits: Vec<TextEdit>) -> Result<(), RewriteError>;
}

/// In-memory text document
#[derive(Debug, Clone)]
pub struct TextDocument {
    content: String,
}

impl TextDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Current buffer contents
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Map a position back to a byte offset. Out-of-range lines or
    /// columns yield `None`; the column clamps at the end of its line.
    fn position_to_offset(&self, pos: Position) -> Option<usize> {
        let mut base = 0usize;
        for (line_no, line) in self.content.split_inclusive('\n').enumerate() {
            if line_no == pos.line {
                let body = line.strip_suffix('\n').unwrap_or(line);
                let mut offset = base;
                let mut remaining = pos.character;
                for ch in body.chars() {
                    if remaining == 0 {
                        break;
                    }
                    offset += ch.len_utf8();
                    remaining -= 1;
                }
                return Some(offset);
            }
            base += line.len();
        }
        // A position on the line right after a trailing newline (or in an
        // empty document) maps to the end of the buffer.
        if pos.line == self.content.split_inclusive('\n').count() && pos.character == 0 {
            return Some(self.content.len());
        }
        None
    }
}

impl Document for TextDocument {
    fn text(&self) -> String {
        self.content.clone()
    }

    fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.content.len());
        let before = &self.content[..offset];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let character = before[line_start..].chars().count();
        Position { line, character }
    }

    fn apply_edits(&mut self, edits: Vec<TextEdit>) -> Result<(), RewriteError> {
        // Resolve every range to byte offsets up front so a bad edit
        // rejects the whole batch before anything mutates.
        let mut resolved: Vec<(usize, usize, String)> = Vec::with_capacity(edits.len());
        for edit in edits {
            let start = self.position_to_offset(edit.range.start).ok_or_else(|| {
                RewriteError::EditApplication(format!("invalid start {:?}", edit.range.start))
            })?;
            let end = self.position_to_offset(edit.range.end).ok_or_else(|| {
                RewriteError::EditApplication(format!("invalid end {:?}", edit.range.end))
            })?;
            if start > end {
                return Err(RewriteError::EditApplication(format!(
                    "inverted range {:?}",
                    edit.range
                )));
            }
            resolved.push((start, end, edit.new_text));
        }

        resolved.sort_by_key(|(start, _, _)| *start);
        for pair in resolved.windows(2) {
            if pair[0].1 > pair[1].0 {
                return Err(RewriteError::EditApplication(
                    "overlapping edit ranges".to_string(),
                ));
            }
        }

        // Apply back-to-front so earlier offsets stay valid.
        for (start, end, new_text) in resolved.into_iter().rev() {
            self.content.replace_range(start..end, &new_text);
        }
        Ok(())
    }
}
