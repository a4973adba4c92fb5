use std::path::{Path, PathBuf};

use actix_multipart::Multipart;
use chrono::Utc;
use futures_util::{StreamExt, TryStreamExt};
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::domain::error::DomainError;

/// Pulls the first file out of `field_name` in a multipart payload and
/// writes it under `dir` with a timestamped name, keeping the original
/// extension. Returns the public path the file is served from.
pub async fn store_upload(
    mut payload: Multipart,
    field_name: &str,
    dir: &str,
) -> Result<String, DomainError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| DomainError::Validation(format!("invalid multipart payload: {}", e)))?
    {
        if field.name() != field_name {
            continue;
        }

        let ext = field
            .content_disposition()
            .get_filename()
            .and_then(|name| {
                Path::new(name)
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
            })
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let filename = format!("{}{}", Utc::now().timestamp_millis(), ext);
        let path = PathBuf::from(dir).join(&filename);

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| DomainError::Storage(format!("failed to create upload dir: {}", e)))?;
        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| DomainError::Storage(format!("failed to create upload file: {}", e)))?;
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| DomainError::Storage(format!("failed to read upload: {}", e)))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| DomainError::Storage(format!("failed to write upload: {}", e)))?;
        }

        info!(path = %path.display(), "upload stored");
        return Ok(format!("/uploads/{}", filename));
    }

    Err(DomainError::Validation(format!(
        "no file uploaded in field '{}'",
        field_name
    )))
}
