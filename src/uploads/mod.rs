//! Product photo uploads.
//!
//! Files are written under the configured upload directory with a random
//! prefix so two uploads of `chair.png` never overwrite each other. The path
//! handed back to callers is relative to the site root and is what ends up
//! in `product.photo_path`.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Image extensions accepted for product photos
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// URL prefix under which stored files are served
pub const PUBLIC_PREFIX: &str = "static/uploads";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to store upload at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// True iff `name` has an extension and it is one of [`ALLOWED_EXTENSIONS`]
pub fn allowed_file(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, extension)) => {
            let extension = extension.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&extension.as_str())
        }
        None => false,
    }
}

/// Longest file name most filesystems accept, in bytes
const MAX_FILE_NAME_BYTES: usize = 255;

/// `<prefix>_<stem>.<ext>` for an allowed upload name, or `<prefix>.<ext>`
/// when nothing of the stem survives sanitizing. The extension is split off
/// first and lower-cased, and the stem is cut to keep the whole name within
/// [`MAX_FILE_NAME_BYTES`].
fn stored_file_name(prefix: &str, file_name: &str) -> String {
    let (stem, extension) = file_name.rsplit_once('.').unwrap_or((file_name, ""));
    let extension = extension.to_ascii_lowercase();

    let mut stem = secure_filename(stem);
    // prefix, '_', '.', extension
    let budget = MAX_FILE_NAME_BYTES.saturating_sub(prefix.len() + extension.len() + 2);
    // sanitized names are ASCII, so any byte index is a char boundary
    stem.truncate(budget);
    let stem = stem.trim_end_matches(|c: char| c == '.' || c == '_');

    if stem.is_empty() {
        format!("{}.{}", prefix, extension)
    } else {
        format!("{}_{}.{}", prefix, stem, extension)
    }
}

/// Reduce a client-supplied name to a safe single path component.
///
/// Directory parts are discarded, whitespace runs become `_`, anything outside
/// `[A-Za-z0-9._-]` is dropped and leading/trailing dots and underscores are
/// trimmed. The result may be empty.
pub fn secure_filename(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or("");

    let mut cleaned = String::with_capacity(base.len());
    let mut in_whitespace = false;
    for c in base.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                cleaned.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            cleaned.push(c);
        }
    }

    cleaned.trim_matches(|c: char| c == '.' || c == '_').to_string()
}

#[derive(Debug, Clone)]
pub struct UploadHandler {
    dir: PathBuf,
}

impl UploadHandler {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist an uploaded photo.
    ///
    /// Returns `Ok(None)` without touching the disk when no file was chosen or
    /// the name is not an allowed image; the product is then stored without a
    /// photo.
    pub async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<Option<String>, UploadError> {
        if file_name.is_empty() {
            return Ok(None);
        }

        if !allowed_file(file_name) {
            warn!("Rejected upload '{}': extension not allowed", file_name);
            return Ok(None);
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| UploadError::Io { path: self.dir.clone(), source })?;

        let stored_name = stored_file_name(&Uuid::new_v4().simple().to_string(), file_name);
        let path = self.dir.join(&stored_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| UploadError::Io { path: path.clone(), source })?;

        info!("Stored upload {} ({} bytes)", path.display(), bytes.len());
        Ok(Some(format!("{}/{}", PUBLIC_PREFIX, stored_name)))
    }

    /// Best-effort removal of a file previously returned by [`store`](Self::store)
    pub async fn remove(&self, photo_path: &str) {
        let Some(stored_name) = photo_path
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            warn!("Not removing '{}': outside the upload directory", photo_path);
            return;
        };

        if stored_name.is_empty() || secure_filename(stored_name) != stored_name {
            warn!("Not removing '{}': unexpected file name", photo_path);
            return;
        }

        let path = self.dir.join(stored_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => info!("Removed upload {}", path.display()),
            Err(e) => warn!("Failed to remove upload {}: {}", path.display(), e),
        }
    }

    /// Filesystem location of a stored photo path
    pub fn resolve(&self, photo_path: &str) -> Option<PathBuf> {
        photo_path
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .map(|name| self.dir.join(name))
    }
}
