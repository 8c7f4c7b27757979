//! Multipart HTTP uploader
//!
//! Posts each file as a multipart form to the configured endpoint. The
//! uploaded URL is taken from a `Location` response header when present,
//! otherwise from a JSON body carrying `url` (or `data.url`, a shape
//! several image hosts use).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, multipart};
use tracing::debug;

use super::Uploader;

/// Uploader backed by a multipart HTTP endpoint
pub struct HttpUploader {
    client: reqwest::Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl HttpUploader {
    pub fn new(endpoint: String, auth_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            auth_token,
        }
    }

    async fn upload_one(&self, path: &Path) -> Result<String> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .context("invalid filename")?
            .to_string();

        let mime_type = mime_guess::from_path(path).first_or_octet_stream();

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;

        let part = multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str(mime_type.as_ref())?;
        let form = multipart::Form::new().part("file", part);

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(ref token) = self.auth_token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("upload request to {} failed", self.endpoint))?;

        if !response.status().is_success() {
            anyhow::bail!("upload failed with status {}", response.status());
        }

        if let Some(location) = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
        {
            return Ok(location.to_string());
        }

        let body: serde_json::Value = response
            .json()
            .await
            .context("upload response was neither a Location header nor JSON")?;
        extract_url(&body).context("upload response carried no url field")
    }
}

fn extract_url(body: &serde_json::Value) -> Option<String> {
    body.get("url")
        .or_else(|| body.get("data").and_then(|d| d.get("url")))
        .and_then(|u| u.as_str())
        .map(|u| u.to_string())
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, paths: &[PathBuf]) -> Result<Vec<String>> {
        let mut urls = Vec::with_capacity(paths.len());
        for path in paths {
            let url = self.upload_one(path).await?;
            debug!("Uploaded {} -> {}", path.display(), url);
            urls.push(url);
        }
        Ok(urls)
    }
}
