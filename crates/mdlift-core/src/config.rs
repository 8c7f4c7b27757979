//! Settings loaded from ~/.mdlift/config.toml
//!
//! Every field has a default, so a missing or partial config file is
//! never an error. Message templates support `{path}`, `{original}` and
//! `{replacement}` placeholders.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

/// Workspace settings for the rewrite workflow and uploader
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Place duplicated documents under an `uploadVersion/` subdirectory
    /// instead of next to the source file
    pub use_upload_version_folder: bool,

    /// Upload endpoint configuration
    pub uploader: UploaderSettings,

    /// Optional overrides for user-facing messages
    pub messages: Messages,
}

/// Upload endpoint configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UploaderSettings {
    /// HTTP endpoint receiving multipart image uploads
    pub endpoint: String,

    /// Optional bearer token sent with each upload
    pub auth_token: Option<String>,
}

/// User-facing message templates. `None` falls back to built-in phrasing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub local_image_missing: Option<String>,
    pub no_local_images_found: Option<String>,
    pub replaced_image_link: Option<String>,
}

const DEFAULT_LOCAL_IMAGE_MISSING: &str = "Local image not found: {path}";
const DEFAULT_NO_LOCAL_IMAGES: &str = "No local images found in current document";
const DEFAULT_REPLACED_LINK: &str =
    "Replaced original image link {original} with uploaded image link {replacement}.";

impl Messages {
    /// Warning for a local reference that resolved to a missing file
    pub fn missing_message(&self, path: &Path) -> String {
        self.local_image_missing
            .as_deref()
            .unwrap_or(DEFAULT_LOCAL_IMAGE_MISSING)
            .replace("{path}", &path.display().to_string())
    }

    /// Warning for a document without any image references
    pub fn no_local_message(&self) -> String {
        self.no_local_images_found
            .as_deref()
            .unwrap_or(DEFAULT_NO_LOCAL_IMAGES)
            .to_string()
    }

    /// Confirmation for one performed replacement
    pub fn replaced_message(&self, original: &str, replacement: &str) -> String {
        self.replaced_image_link
            .as_deref()
            .unwrap_or(DEFAULT_REPLACED_LINK)
            .replace("{original}", original)
            .replace("{replacement}", replacement)
    }
}

impl Settings {
    /// Load settings from the default config path, falling back to
    /// defaults when the file is absent or unreadable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from an explicit path
    pub fn load_from(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };

        match toml::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Default config file location (~/.mdlift/config.toml)
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mdlift")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_messages() {
        let messages = Messages::default();
        assert_eq!(
            messages.missing_message(Path::new("/tmp/a.png")),
            "Local image not found: /tmp/a.png"
        );
        assert_eq!(
            messages.no_local_message(),
            "No local images found in current document"
        );
        let replaced = messages.replaced_message("![x](./a.png)", "![x](https://cdn/a.png)");
        assert!(replaced.contains("![x](./a.png)"));
        assert!(replaced.contains("https://cdn/a.png"));
    }

    #[test]
    fn test_template_overrides() {
        let messages = Messages {
            local_image_missing: Some("missing: {path}".to_string()),
            no_local_images_found: Some("nothing to do".to_string()),
            replaced_image_link: Some("{original} -> {replacement}".to_string()),
        };
        assert_eq!(messages.missing_message(Path::new("x.png")), "missing: x.png");
        assert_eq!(messages.no_local_message(), "nothing to do");
        assert_eq!(messages.replaced_message("a", "b"), "a -> b");
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&temp.path().join("nope.toml"));
        assert!(!settings.use_upload_version_folder);
        assert!(settings.uploader.endpoint.is_empty());
    }

    #[test]
    fn test_load_from_partial_config() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
use_upload_version_folder = true

[uploader]
endpoint = "https://img.example.com/upload"

[messages]
local_image_missing = "gone: {path}"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert!(settings.use_upload_version_folder);
        assert_eq!(settings.uploader.endpoint, "https://img.example.com/upload");
        assert!(settings.uploader.auth_token.is_none());
        assert_eq!(
            settings.messages.missing_message(Path::new("p.png")),
            "gone: p.png"
        );
        // Untouched templates keep their defaults
        assert_eq!(
            settings.messages.no_local_message(),
            "No local images found in current document"
        );
    }
}
