//! Local filesystem implementation of `MediaStore`.
//!
//! Covers are content-addressed: the file name is the SHA-256 of the bytes
//! plus an extension derived from the sniffed image format, so re-uploading
//! the same image is a no-op and names never collide.

use std::path::PathBuf;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;

use domains::{AppError, CoverUpload, MediaStore, Result};

pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Ensures the media root exists. Called once at startup.
    pub async fn prepare(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn cover_file_name(upload: &CoverUpload) -> Result<String> {
        let extension = match image::guess_format(&upload.data) {
            Ok(format) => format
                .extensions_str()
                .first()
                .copied()
                .unwrap_or("img")
                .to_string(),
            Err(_) => {
                // The sniffer knows the common raster formats; fall back on
                // the declared type for anything else, but images only.
                let declared = upload
                    .content_type
                    .clone()
                    .or_else(|| mime_guess::from_path(&upload.filename).first());
                match declared {
                    Some(mime) if mime.type_() == mime::IMAGE => mime.subtype().as_str().to_string(),
                    _ => {
                        return Err(AppError::Validation(
                            "cover upload is not a recognizable image".to_string(),
                        ))
                    }
                }
            }
        };

        let mut hasher = Sha256::new();
        hasher.update(&upload.data);
        let hash = hex::encode(hasher.finalize());
        Ok(format!("{hash}.{extension}"))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn save_cover(&self, upload: CoverUpload) -> Result<String> {
        if upload.data.is_empty() {
            return Err(AppError::Validation("cover upload is empty".to_string()));
        }
        let name = Self::cover_file_name(&upload)?;
        let target = self.root.join(&name);

        if fs::try_exists(&target).await.map_err(AppError::internal)? {
            return Ok(name);
        }

        fs::create_dir_all(&self.root)
            .await
            .map_err(AppError::internal)?;
        fs::write(&target, &upload.data)
            .await
            .map_err(AppError::internal)?;
        tracing::debug!(file = %name, bytes = upload.data.len(), "stored cover");
        Ok(name)
    }

    async fn delete_cover(&self, name: &str) -> Result<()> {
        // Names come from our own records, but never follow a path out of
        // the media root.
        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(AppError::Validation(format!(
                "suspicious cover file name: {name}"
            )));
        }
        match fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AppError::internal(err)),
        }
    }
}
