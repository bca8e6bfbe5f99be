use std::path::PathBuf;

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ReadingError>;

/// Failures that abort an extraction request.
///
/// Everything else (unreadable chapters, days that match nothing) is absorbed
/// into the shape of the returned reading.
#[derive(Debug, thiserror::Error)]
pub enum ReadingError {
    /// The book's source file does not exist
    #[error("book asset not found: {}", path.display())]
    AssetMissing { path: PathBuf },

    /// The EPUB container could not be parsed
    #[error("failed to parse EPUB {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

impl ReadingError {
    pub fn is_asset_missing(&self) -> bool {
        matches!(self, ReadingError::AssetMissing { .. })
    }
}
