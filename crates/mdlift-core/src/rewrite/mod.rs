//! Rewrite workflow: scan, resolve, upload, replace
//!
//! Data flows strictly downstream: scanner finds references, the
//! resolver classifies them, the upload cache turns local paths into
//! remote URLs (each distinct path uploaded once), the planner records
//! string replacements in scan order, and the applier commits them as
//! one atomic edit batch.

pub mod apply;
pub mod cache;
pub mod resolve;
pub mod scanner;

use std::path::Path;

use tracing::{debug, info};

use crate::config::Settings;
use crate::document::Document;
use crate::error::RewriteError;
use crate::notify::Notifier;
use crate::uploader::Uploader;

use cache::UploadCache;
use resolve::ResolvedTarget;
use scanner::ImageRef;

/// One planned text replacement. `original` is the full matched
/// reference as it appeared in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub original: String,
    pub replacement: String,
}

/// Summary of one workflow invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Image references found by the scanner
    pub scanned: usize,
    /// Distinct local files uploaded
    pub uploads: usize,
    /// Replacements applied to the document
    pub replacements: usize,
    /// Local references whose file was not found
    pub missing: usize,
    /// Local references whose upload failed
    pub failed: usize,
}

/// Drives the rewrite workflow against its collaborators.
pub struct Rewriter<'a> {
    uploader: &'a dyn Uploader,
    notifier: &'a dyn Notifier,
    settings: &'a Settings,
}

impl<'a> Rewriter<'a> {
    pub fn new(uploader: &'a dyn Uploader, notifier: &'a dyn Notifier, settings: &'a Settings) -> Self {
        Self {
            uploader,
            notifier,
            settings,
        }
    }

    /// Upload every local image referenced by `document` and rewrite the
    /// references to the returned URLs.
    ///
    /// `document_dir` is the directory of the *source* document; relative
    /// references resolve against it. Soft failures (missing files,
    /// failed uploads) are reported through the notifier and skipped;
    /// the workflow continues with the remaining references.
    pub async fn rewrite(
        &self,
        document: &mut dyn Document,
        document_dir: &Path,
    ) -> Result<RewriteOutcome, RewriteError> {
        let text = document.text();
        let refs: Vec<ImageRef> = scanner::scan(&text).collect();

        let mut outcome = RewriteOutcome {
            scanned: refs.len(),
            ..Default::default()
        };

        if refs.is_empty() {
            self.notifier
                .warning(&self.settings.messages.no_local_message());
            return Ok(outcome);
        }

        let mut upload_cache = UploadCache::new(self.uploader);
        let mut plan: Vec<Replacement> = Vec::new();

        for image in &refs {
            match resolve::resolve(image, document_dir) {
                ResolvedTarget::Remote => {
                    debug!("Skipping remote reference {}", image.url);
                }
                ResolvedTarget::Missing(attempted) => {
                    outcome.missing += 1;
                    self.notifier
                        .warning(&self.settings.messages.missing_message(&attempted));
                }
                ResolvedTarget::Local(path) => match upload_cache.resolve_url(&path).await {
                    Some(url) => {
                        let replacement = image.raw.replacen(&image.url, &url, 1);
                        plan.push(Replacement {
                            original: image.raw.clone(),
                            replacement,
                        });
                    }
                    None => outcome.failed += 1,
                },
            }
        }

        outcome.uploads = upload_cache.uploaded();

        if plan.is_empty() {
            debug!("No replacements planned");
            return Ok(outcome);
        }

        outcome.replacements =
            apply::apply(document, &plan, self.notifier, &self.settings.messages)?;

        info!(
            "Rewrote {} reference(s) using {} upload(s) ({} missing, {} failed)",
            outcome.replacements, outcome.uploads, outcome.missing, outcome.failed
        );
        Ok(outcome)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use anyhow::Result;
    use async_trait::async_trait;

    use crate::uploader::Uploader;

    /// Scripted uploader: each call consumes the next queued response.
    /// An exhausted queue yields an empty URL list (the failure signal).
    pub(crate) struct MockUploader {
        responses: Mutex<VecDeque<Result<String>>>,
        calls: AtomicUsize,
        seen: Mutex<Vec<PathBuf>>,
    }

    impl MockUploader {
        pub fn returning(urls: Vec<&str>) -> Self {
            Self {
                responses: Mutex::new(urls.into_iter().map(|u| Ok(u.to_string())).collect()),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn failing_then(urls: Vec<&str>) -> Self {
            let mut responses: VecDeque<Result<String>> =
                VecDeque::from([Err(anyhow::anyhow!("upload failed"))]);
            responses.extend(urls.into_iter().map(|u| Ok(u.to_string())));
            Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn uploaded_paths(&self) -> Vec<PathBuf> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Uploader for MockUploader {
        async fn upload(&self, paths: &[PathBuf]) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().extend(paths.iter().cloned());
            match self.responses.lock().unwrap().pop_front() {
                Some(Ok(url)) => Ok(vec![url]),
                Some(Err(e)) => Err(e),
                None => Ok(Vec::new()),
            }
        }
    }
}
