//! Per-invocation upload deduplication
//!
//! The cache lives for one workflow invocation and never escapes it, so
//! re-running the workflow re-uploads files that changed between runs.
//! Failures are not cached: a later reference to the same path retries
//! the upload independently.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::uploader::Uploader;

/// Maps resolved absolute paths to their uploaded URLs, issuing at most
/// one upload call per distinct path.
pub struct UploadCache<'a> {
    uploader: &'a dyn Uploader,
    entries: HashMap<PathBuf, String>,
}

impl<'a> UploadCache<'a> {
    pub fn new(uploader: &'a dyn Uploader) -> Self {
        Self {
            uploader,
            entries: HashMap::new(),
        }
    }

    /// Remote URL for `path`, uploading on first sight.
    ///
    /// Returns `None` when the upload failed or yielded no URL; the
    /// failure is not remembered.
    pub async fn resolve_url(&mut self, path: &Path) -> Option<String> {
        if let Some(url) = self.entries.get(path) {
            debug!("Upload cache hit for {}", path.display());
            return Some(url.clone());
        }

        match self.uploader.upload(&[path.to_path_buf()]).await {
            Ok(urls) => match urls.into_iter().next() {
                Some(url) => {
                    self.entries.insert(path.to_path_buf(), url.clone());
                    Some(url)
                }
                None => {
                    warn!("Upload of {} returned no URL", path.display());
                    None
                }
            },
            Err(e) => {
                warn!("Upload of {} failed: {}", path.display(), e);
                None
            }
        }
    }

    /// Number of distinct paths uploaded so far
    pub fn uploaded(&self) -> usize {
        self.entries.len()
    }
}
