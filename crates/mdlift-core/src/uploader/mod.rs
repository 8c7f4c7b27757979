//! Upload primitive seam
//!
//! The rewrite workflow only needs "paths in, URLs out"; transport,
//! retries and timeouts belong to the implementation behind the trait.

mod http;

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

pub use http::HttpUploader;

/// Uploads local files to a remote host.
///
/// Implementations return exactly one URL per input path, in input
/// order. An error or an empty result is treated as a failed upload by
/// the caller.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, paths: &[PathBuf]) -> Result<Vec<String>>;
}
