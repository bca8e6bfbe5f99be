use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A daily-reader book the extractor knows how to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDescriptor {
    pub id: String,
    pub title: String,
    pub author: String,
    /// EPUB file name, relative to the assets directory unless absolute
    pub source_file: PathBuf,
    /// Position of January 1st's chapter in the reading order, used when no
    /// chapter mentions the requested date
    pub fallback_chapter_offset: usize,
    /// Whether the book opens each month with an overview essay
    #[serde(default)]
    pub month_overview: bool,
}

impl BookDescriptor {
    fn new(id: &str, title: &str, author: &str, source_file: &str, offset: usize) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            source_file: PathBuf::from(source_file),
            fallback_chapter_offset: offset,
            month_overview: false,
        }
    }

    fn with_month_overview(mut self) -> Self {
        self.month_overview = true;
        self
    }
}

/// Immutable lookup table of books, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct BookRegistry {
    books: Vec<BookDescriptor>,
    by_id: HashMap<String, usize>,
}

impl BookRegistry {
    pub fn new(books: Vec<BookDescriptor>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(books.len());
        for (index, book) in books.iter().enumerate() {
            if by_id.insert(book.id.clone(), index).is_some() {
                bail!("duplicate book id in registry: {}", book.id);
            }
        }
        Ok(Self { books, by_id })
    }

    /// The books shipped with the application.
    pub fn builtin() -> Self {
        let books = vec![
            BookDescriptor::new(
                "daily-stoic",
                "The Daily Stoic",
                "Ryan Holiday",
                "the-daily-stoic.epub",
                8,
            ),
            BookDescriptor::new(
                "daily-laws",
                "The Daily Laws",
                "Robert Greene",
                "the-daily-laws.epub",
                12,
            )
            .with_month_overview(),
            BookDescriptor::new(
                "daily-drucker",
                "The Daily Drucker",
                "Peter F. Drucker",
                "the-daily-drucker.epub",
                6,
            ),
        ];
        let by_id = books
            .iter()
            .enumerate()
            .map(|(index, book)| (book.id.clone(), index))
            .collect();
        Self { books, by_id }
    }

    /// Loads a registry from a JSON array of book descriptors.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read registry: {}", path.display()))?;
        let books: Vec<BookDescriptor> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse registry: {}", path.display()))?;
        Self::new(books)
    }

    pub fn get(&self, id: &str) -> Option<&BookDescriptor> {
        self.by_id.get(id).map(|&index| &self.books[index])
    }

    pub fn books(&self) -> &[BookDescriptor] {
        &self.books
    }

    /// Fallback offset for `id`; books the registry does not know fall back
    /// to the start of the reading order.
    pub fn fallback_offset(&self, id: &str) -> usize {
        self.get(id).map_or(0, |book| book.fallback_chapter_offset)
    }

    pub fn has_month_overview(&self, id: &str) -> bool {
        self.get(id).is_some_and(|book| book.month_overview)
    }

    pub fn asset_path(&self, book: &BookDescriptor, assets_dir: &Path) -> PathBuf {
        if book.source_file.is_absolute() {
            book.source_file.clone()
        } else {
            assets_dir.join(&book.source_file)
        }
    }
}
