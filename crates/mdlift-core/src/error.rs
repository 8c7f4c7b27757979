//! Rewrite workflow error types

use thiserror::Error;

/// Hard failures of the rewrite workflow.
///
/// Soft failures (missing local file, failed upload, nothing to rewrite)
/// are reported through the [`crate::notify::Notifier`] and never abort
/// the workflow.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// No document to operate on
    #[error("no active document")]
    NoActiveDocument,

    /// The edit transaction was rejected by the document
    #[error("failed to apply edits: {0}")]
    EditApplication(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
