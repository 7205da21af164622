//! Product image uploads.
//!
//! Images land in one server-controlled directory under generated names of
//! the form `<unix-millis>-<8 hex><.ext>`. Products record only the filename;
//! the `/uploads/` route serves the directory as-is.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

/// Route prefix under which stored files are served.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Errors from upload storage.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("upload io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes uploaded images into a directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if it is missing.
    pub async fn init(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Store an image and return the generated filename.
    pub async fn save(
        &self,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        let filename = generate_filename(original_name);
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&filename), bytes).await?;

        debug!(filename = %filename, size = bytes.len(), "stored upload");
        Ok(filename)
    }
}

/// Timestamp-based name with a random suffix, keeping a sane extension.
fn generate_filename(original_name: Option<&str>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    let extension = original_name.and_then(safe_extension);

    match extension {
        Some(ext) => format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            &suffix[..8],
            ext
        ),
        None => format!("{}-{}", Utc::now().timestamp_millis(), &suffix[..8]),
    }
}

/// Lowercased extension of `name` if it is short and purely alphanumeric.
fn safe_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
