use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glanz_enricher::SourceDocument;

/// Photos without a recognizable extension are sent as JPEG
const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported file type: {0}")]
    Unsupported(String),

    #[error("File is empty: {0}")]
    Empty(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Mime types the model accepts inline, keyed by extension
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        _ => return None,
    };
    Some(mime)
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>, SourceError> {
    let data = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
        _ => SourceError::Io(e),
    })?;

    if data.is_empty() {
        return Err(SourceError::Empty(path.to_path_buf()));
    }
    tracing::debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load a photo; non-image extensions are refused
pub async fn read_photo(path: &Path) -> Result<SourceDocument, SourceError> {
    let mime = match mime_for_path(path) {
        Some(mime) if mime.starts_with("image/") => mime,
        Some(other) => return Err(SourceError::Unsupported(other.to_string())),
        None => FALLBACK_IMAGE_MIME,
    };

    let data = read_bytes(path).await?;
    Ok(SourceDocument::new(display_name(path), mime, data))
}

/// Load any supported document, images included
pub async fn read_document(path: &Path) -> Result<SourceDocument, SourceError> {
    let mime = mime_for_path(path).ok_or_else(|| {
        SourceError::Unsupported(
            path.extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_else(|| "no extension".to_string()),
        )
    })?;

    let data = read_bytes(path).await?;
    Ok(SourceDocument::new(display_name(path), mime, data))
}
