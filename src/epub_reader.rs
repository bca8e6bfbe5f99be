use crate::error::{ReadingError, Result};
use crate::reader::ChapterFragment;
use rbook::prelude::*;
use rbook::Epub;
use std::path::Path;

/// A book's reading order, loaded fresh for a single extraction request.
#[derive(Debug, Clone, Default)]
pub struct Document {
    fragments: Vec<ChapterFragment>,
}

impl Document {
    pub fn from_fragments(fragments: Vec<ChapterFragment>) -> Self {
        Self { fragments }
    }

    pub fn fragments(&self) -> &[ChapterFragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// HTML of the chapter at `index`, or `None` when it is out of range or
    /// could not be read.
    pub fn chapter(&self, index: usize) -> Option<&str> {
        self.fragments.get(index)?.raw_html.as_deref()
    }
}

/// Parses the EPUB at `path` and reads every chapter of its reading order.
///
/// The reading order is read in one pass and the container is closed before
/// returning, so nothing holds the file between requests. Per-chapter access
/// goes through [`Document::chapter`]. A chapter that fails to read is kept as
/// an unreadable slot (`chapter` returns `None`) so chapter positions stay
/// stable.
pub fn load_document(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(ReadingError::AssetMissing {
            path: path.to_path_buf(),
        });
    }

    let epub = Epub::options()
        .strict(false)
        .open(path)
        .map_err(|err| ReadingError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

    let mut fragments = Vec::new();
    let mut reader = epub.reader();

    while let Some(result) = reader.read_next() {
        let chapter_id = format!("chapter-{:03}", fragments.len());
        match result {
            Ok(data) => {
                fragments.push(ChapterFragment::new(chapter_id, data.content().to_string()));
            }
            Err(err) => {
                tracing::warn!(%chapter_id, %err, "failed to read chapter content; skipping");
                fragments.push(ChapterFragment::unreadable(chapter_id));
            }
        }
    }

    tracing::debug!(path = %path.display(), chapters = fragments.len(), "loaded EPUB");
    Ok(Document { fragments })
}

/// Loads the document on the blocking pool.
pub async fn open(path: &Path) -> Result<Document> {
    let owned = path.to_path_buf();
    tokio::task::spawn_blocking(move || load_document(&owned))
        .await
        .map_err(|err| ReadingError::Parse {
            path: path.to_path_buf(),
            reason: format!("parse task failed: {err}"),
        })?
}
