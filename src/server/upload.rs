//! Multipart CSV upload handling.

use std::io::Write;
use std::path::Path;

use actix_multipart::{Field, Multipart};
use actix_web::web;
use futures_util::StreamExt;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::UploadError;

/// Name of the multipart field carrying the CSV file.
pub const FILE_FIELD: &str = "file";

/// Buffered upload bytes are written to disk once they reach this size.
pub const SPILL_BYTES: usize = 1024 * 1024;

/// An uploaded CSV stored in a uniquely named temporary file.
///
/// The file is removed when this value is dropped.
#[derive(Debug)]
pub struct StoredUpload {
    pub file_name: String,
    pub size: usize,
    pub file: NamedTempFile,
}

impl StoredUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Returns true for names ending in `.csv`, ignoring case.
pub fn allowed_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("csv"))
}

/// Streams the `file` field of a multipart payload into a temp file in `dir`.
///
/// Other fields are read and discarded.
///
/// # Errors
///
/// Validation errors if the field is missing, has no file name, is not a
/// `.csv`, or exceeds `limit` bytes. On error nothing is left in `dir`.
pub async fn store_csv_upload(
    mut payload: Multipart,
    dir: &Path,
    limit: usize,
) -> Result<StoredUpload, UploadError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| UploadError::Multipart(e.to_string()))?;

        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            drain(&mut field).await?;
            continue;
        }

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();

        if file_name.is_empty() {
            return Err(UploadError::NoFilename);
        }
        if !allowed_file(&file_name) {
            return Err(UploadError::BadExtension);
        }

        let dir = dir.to_path_buf();
        let mut file = web::block(move || {
            tempfile::Builder::new()
                .prefix("upload-")
                .suffix(".csv")
                .tempfile_in(dir)
        })
        .await
        .map_err(|e| UploadError::Blocking(e.to_string()))??;

        let mut size = 0usize;
        let mut buf = Vec::with_capacity(SPILL_BYTES);
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| UploadError::Multipart(e.to_string()))?;
            size += chunk.len();
            if size > limit {
                return Err(UploadError::TooLarge { limit });
            }
            buf.extend_from_slice(&chunk);
            if buf.len() >= SPILL_BYTES {
                file = spill(file, std::mem::take(&mut buf)).await?;
            }
        }
        file = spill(file, buf).await?;

        debug!(file_name = %file_name, size, path = %file.path().display(), "Upload stored");
        return Ok(StoredUpload {
            file_name,
            size,
            file,
        });
    }

    Err(UploadError::NoFile)
}

/// Appends `buf` to `file` and flushes it on the blocking thread pool.
async fn spill(mut file: NamedTempFile, buf: Vec<u8>) -> Result<NamedTempFile, UploadError> {
    web::block(move || {
        file.write_all(&buf)?;
        file.flush()?;
        Ok::<_, std::io::Error>(file)
    })
    .await
    .map_err(|e| UploadError::Blocking(e.to_string()))?
    .map_err(UploadError::from)
}

async fn drain(field: &mut Field) -> Result<(), UploadError> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|e| UploadError::Multipart(e.to_string()))?;
    }
    Ok(())
}
