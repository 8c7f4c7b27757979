//! Transactional application of a replacement plan
//!
//! Originals are re-located by content in the current document text
//! rather than by offsets recorded at scan time, since the buffer may
//! have shifted between planning and applying. Duplicate identical
//! originals resolve against successive occurrences: the search for
//! each original starts after the previous hit for that same string, so
//! the k-th plan entry lands on the k-th occurrence and ranges never
//! collide.

use std::collections::HashMap;

use tracing::warn;

use super::Replacement;
use crate::config::Messages;
use crate::document::{Document, Range, TextEdit};
use crate::error::RewriteError;
use crate::notify::Notifier;

/// Apply the plan to the document as one atomic edit batch, then emit
/// one info notification per replacement performed.
pub(crate) fn apply(
    document: &mut dyn Document,
    plan: &[Replacement],
    notifier: &dyn Notifier,
    messages: &Messages,
) -> Result<usize, RewriteError> {
    // Fresh text, not the scan snapshot.
    let text = document.text();

    let mut cursors: HashMap<&str, usize> = HashMap::new();
    let mut edits = Vec::with_capacity(plan.len());
    let mut applied: Vec<&Replacement> = Vec::with_capacity(plan.len());

    for entry in plan {
        let from = cursors.get(entry.original.as_str()).copied().unwrap_or(0);
        let Some(start) = text[from..].find(&entry.original).map(|i| i + from) else {
            warn!(
                "Planned original {:?} no longer present in document, skipping",
                entry.original
            );
            continue;
        };
        let end = start + entry.original.len();
        cursors.insert(entry.original.as_str(), end);

        edits.push(TextEdit {
            range: Range {
                start: document.offset_to_position(start),
                end: document.offset_to_position(end),
            },
            new_text: entry.replacement.clone(),
        });
        applied.push(entry);
    }

    if edits.is_empty() {
        return Ok(0);
    }

    document.apply_edits(edits)?;

    for entry in &applied {
        notifier.info(&messages.replaced_message(&entry.original, &entry.replacement));
    }
    Ok(applied.len())
}
