use crate::dates::{self, DatePatterns};
use crate::epub_reader::{self, Document};
use crate::error::{ReadingError, Result};
use crate::reader::ReadingResult;
use crate::registry::BookRegistry;
use crate::sanitize::sanitize_html;
use crate::scanner::{self, DayMatcher};
use crate::slicer;
use std::path::Path;

/// Extracts daily readings for the books of a registry.
#[derive(Debug, Clone)]
pub struct DailyReader {
    registry: BookRegistry,
}

impl DailyReader {
    pub fn new(registry: BookRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &BookRegistry {
        &self.registry
    }

    /// Reads `book_id`'s entry for `day_of_year` from the EPUB at `asset_path`.
    ///
    /// Only a missing or unparseable asset is an error; a day that cannot be
    /// located yields [`ReadingResult::not_found`].
    pub async fn extract_daily_content(
        &self,
        asset_path: &Path,
        day_of_year: u32,
        book_id: &str,
    ) -> Result<ReadingResult> {
        let doc = epub_reader::open(asset_path).await?;
        Ok(self.extract_from_document(&doc, day_of_year, dates::current_year(), book_id))
    }

    /// Looks the book up in the registry and reads it from `assets_dir`.
    pub async fn read(
        &self,
        book_id: &str,
        day_of_year: u32,
        assets_dir: &Path,
    ) -> Result<ReadingResult> {
        let Some(book) = self.registry.get(book_id) else {
            return Err(ReadingError::AssetMissing {
                path: assets_dir.join(book_id),
            });
        };
        let asset_path = self.registry.asset_path(book, assets_dir);
        self.extract_daily_content(&asset_path, day_of_year, book_id)
            .await
    }

    /// The extraction pipeline over an already loaded document.
    pub fn extract_from_document(
        &self,
        doc: &Document,
        day_of_year: u32,
        year: i32,
        book_id: &str,
    ) -> ReadingResult {
        let (Some(today), Some(tomorrow)) = (
            dates::date_patterns_in_year(day_of_year, year),
            dates::next_day_patterns(day_of_year, year),
        ) else {
            tracing::info!(day_of_year, year, "day falls outside the calendar");
            return ReadingResult::not_found();
        };

        let mut result = self
            .day_content(doc, &today, &tomorrow)
            .or_else(|| self.fallback_content(doc, day_of_year, book_id))
            .map(|content| ReadingResult {
                content,
                month_intro: None,
                month_theme: None,
            })
            .unwrap_or_else(ReadingResult::not_found);

        if self.registry.has_month_overview(book_id) {
            if let Some(overview) = scanner::find_month_overview(doc, today.month) {
                result.month_intro = Some(sanitize_html(&overview.intro_html));
                result.month_theme = overview.theme;
            }
        }

        result
    }

    fn day_content(
        &self,
        doc: &Document,
        today: &DatePatterns,
        tomorrow: &DatePatterns,
    ) -> Option<String> {
        let matcher = DayMatcher::new(today);
        let found = scanner::find_day_entry(doc, &matcher)?;
        let html = doc.chapter(found.index)?;
        let next_day = DayMatcher::new(tomorrow);
        let entry = slicer::slice_day(html, found.start, &next_day);
        tracing::info!(
            chapter = found.index,
            day = matcher.label(),
            bytes = entry.len(),
            "extracted day entry"
        );
        Some(sanitize_html(entry))
    }

    /// Whole chapter at the book's fixed offset from January 1st.
    fn fallback_content(&self, doc: &Document, day_of_year: u32, book_id: &str) -> Option<String> {
        let index = self
            .registry
            .fallback_offset(book_id)
            .checked_add(usize::try_from(day_of_year).ok()?)?
            .checked_sub(1)?;
        let content = doc
            .chapter(index)
            .map(sanitize_html)
            .filter(|content| !content.is_empty());
        match &content {
            Some(_) => {
                tracing::info!(chapter = index, book_id, "no date match; using fallback chapter");
            }
            None => {
                tracing::info!(
                    chapter = index,
                    chapters = doc.len(),
                    book_id,
                    "no date match and fallback chapter unavailable"
                );
            }
        }
        content
    }
}

impl Default for DailyReader {
    fn default() -> Self {
        Self::new(BookRegistry::builtin())
    }
}
