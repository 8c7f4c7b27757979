//! mdlift Core - Shared library for markdown image upload and link rewriting
//!
//! This crate provides the core functionality for the mdlift CLI:
//! - Image reference scanning across markdown/HTML/wiki-link syntaxes
//! - Local path resolution with attachment-folder fallback
//! - Deduplicated remote uploads
//! - Transactional document rewriting

pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod notify;
pub mod rewrite;
pub mod uploader;

// Re-exports for convenience
pub use config::Settings;
pub use document::{Document, Position, Range, TextDocument, TextEdit};
pub use error::RewriteError;
pub use notify::{MemoryNotifier, Notifier};
pub use rewrite::{RewriteOutcome, Rewriter};
pub use uploader::{HttpUploader, Uploader};
