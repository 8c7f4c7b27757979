//! Duplicate-document glue for the default rewrite mode
//!
//! The rewritten copy is named `<name>_uploadedVersion.<ext>` and lives
//! next to the source, or under an `uploadVersion/` subdirectory when
//! the config asks for one.

use std::path::{Path, PathBuf};

use mdlift_core::RewriteError;

const UPLOAD_VERSION_DIR: &str = "uploadVersion";
const UPLOAD_VERSION_SUFFIX: &str = "_uploadedVersion";

/// Copy `source` to its upload-version sibling and return the new path.
pub fn duplicate_document(source: &Path, use_upload_folder: bool) -> Result<PathBuf, RewriteError> {
    let dir = source.parent().ok_or(RewriteError::NoActiveDocument)?;
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or(RewriteError::NoActiveDocument)?;

    let target_dir = if use_upload_folder {
        let folder = dir.join(UPLOAD_VERSION_DIR);
        if !folder.exists() {
            std::fs::create_dir_all(&folder)?;
        }
        folder
    } else {
        dir.to_path_buf()
    };

    let file_name = match source.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}{}.{}", stem, UPLOAD_VERSION_SUFFIX, ext),
        None => format!("{}{}", stem, UPLOAD_VERSION_SUFFIX),
    };

    let target = target_dir.join(file_name);
    std::fs::copy(source, &target)?;
    Ok(target)
}
