use serde::Serialize;

/// Literal content returned when no chapter could be matched for a day
pub const NOT_FOUND_MESSAGE: &str = "Content not found for this day.";

/// One entry of an EPUB's reading order
#[derive(Debug, Clone)]
pub struct ChapterFragment {
    pub chapter_id: String,
    /// `None` when the chapter could not be read from the container
    pub raw_html: Option<String>,
}

impl ChapterFragment {
    pub fn new(chapter_id: impl Into<String>, raw_html: impl Into<String>) -> Self {
        Self {
            chapter_id: chapter_id.into(),
            raw_html: Some(raw_html.into()),
        }
    }

    pub fn unreadable(chapter_id: impl Into<String>) -> Self {
        Self {
            chapter_id: chapter_id.into(),
            raw_html: None,
        }
    }
}

/// The day's reading as handed back to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingResult {
    /// Sanitized HTML for the day, or [`NOT_FOUND_MESSAGE`]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_intro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_theme: Option<String>,
}

impl ReadingResult {
    pub fn not_found() -> Self {
        Self {
            content: NOT_FOUND_MESSAGE.to_string(),
            month_intro: None,
            month_theme: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.content == NOT_FOUND_MESSAGE
    }
}
