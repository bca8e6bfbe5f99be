use crate::dates::DatePatterns;
use crate::epub_reader::Document;
use crate::sanitize::strip_tags;
use regex::Regex;
use std::sync::LazyLock;

/// Fragments at or below this many characters never hold a day's entry.
const MIN_DAY_FRAGMENT_CHARS: usize = 200;
/// Month overviews are long-form essays; shorter fragments are skipped.
const MIN_OVERVIEW_FRAGMENT_CHARS: usize = 2000;

/// Inline markup allowed between a block's opening tag and the date.
const INLINE_TAG: &str = r"</?(?i:a|b|i|u|em|strong|span|small|font|sup|sub)\b[^>]*>";

static RE_ANCHOR_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a\b").expect("valid anchor regex"));
static RE_ANY_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h[1-6](?:\s[^>]*)?>(.*?)</h[1-6]\s*>").expect("valid heading regex")
});
static RE_H1: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h1(\s[^>]*)?>(.*?)</h1\s*>").expect("valid h1 regex")
});

/// Table-of-contents pages link to many chapters.
pub fn is_table_of_contents(html: &str) -> bool {
    let anchors = RE_ANCHOR_OPEN.find_iter(html).count();
    anchors > 10 || (anchors > 3 && html.to_lowercase().contains("contents"))
}

/// The three containment shapes a date can take, tried in this order.
struct Shapes {
    heading: Regex,
    paragraph: Regex,
    bare: Regex,
}

impl Shapes {
    fn new(variant: &str) -> Option<Self> {
        let date = regex::escape(variant);
        // Text before the date must not end in a digit, and the date must not
        // be followed by one: "January 2" never matches inside "January 21"
        // and "2 January" never matches inside "12 January".
        let prefix = format!(r"(?:(?:{INLINE_TAG}|[^<])*?(?:{INLINE_TAG}|[^0-9<]))?");
        let heading = Regex::new(&format!(
            r"(?i:<h[1-6](?:\s[^>]*)?>){prefix}{date}(?:[^0-9]|$)"
        ))
        .ok()?;
        let paragraph =
            Regex::new(&format!(r"(?i:<p(?:\s[^>]*)?>){prefix}{date}(?:[^0-9]|$)")).ok()?;
        let bare = Regex::new(&format!(r">\s*{date}\s*<")).ok()?;
        Some(Self {
            heading,
            paragraph,
            bare,
        })
    }

    fn first_match_from(&self, html: &str, from: usize) -> Option<usize> {
        [&self.heading, &self.paragraph, &self.bare]
            .into_iter()
            .find_map(|re| re.find_at(html, from))
            .map(|m| m.start())
    }
}

/// Compiled day-entry matcher for one calendar day.
pub struct DayMatcher {
    label: String,
    shapes: Vec<Shapes>,
}

impl DayMatcher {
    pub fn new(patterns: &DatePatterns) -> Self {
        let shapes = patterns
            .variants()
            .iter()
            .filter_map(|variant| Shapes::new(variant))
            .collect();
        Self {
            label: patterns.variants()[1].clone(),
            shapes,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Offset of the day's entry in `html`, optionally restricted to matches
    /// starting strictly after `after`.
    ///
    /// Variants are tried in priority order and, within a variant, heading
    /// before paragraph before bare text. The first shape that matches wins
    /// even if another shape matches earlier in the text.
    pub fn first_match(&self, html: &str, after: Option<usize>) -> Option<usize> {
        let from = match after {
            Some(offset) => offset.checked_add(1)?,
            None => 0,
        };
        if from > html.len() || !html.is_char_boundary(from) {
            return None;
        }
        self.shapes
            .iter()
            .find_map(|shapes| shapes.first_match_from(html, from))
    }
}

/// Where a day's entry starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMatch {
    /// Position of the containing fragment in the reading order
    pub index: usize,
    /// Byte offset of the entry inside that fragment
    pub start: usize,
}

/// First fragment in reading order holding the day's entry.
pub fn find_day_entry(doc: &Document, matcher: &DayMatcher) -> Option<DayMatch> {
    for (index, fragment) in doc.fragments().iter().enumerate() {
        let Some(html) = fragment.raw_html.as_deref() else {
            tracing::debug!(chapter = %fragment.chapter_id, "chapter unreadable; skipping");
            continue;
        };

        let Some(start) = matcher.first_match(html, None) else {
            continue;
        };
        if html.chars().count() <= MIN_DAY_FRAGMENT_CHARS {
            tracing::debug!(chapter = %fragment.chapter_id, "date found in short fragment; skipping");
            continue;
        }
        if is_table_of_contents(html) {
            tracing::debug!(chapter = %fragment.chapter_id, "date found in table of contents; skipping");
            continue;
        }

        tracing::debug!(chapter = %fragment.chapter_id, start, day = matcher.label(), "found day entry");
        return Some(DayMatch { index, start });
    }
    None
}

/// A month's front-matter essay, with its title heading removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOverview {
    pub index: usize,
    /// Unsanitized HTML of the overview
    pub intro_html: String,
    pub theme: Option<String>,
}

/// Matchers for one month's overview page.
struct MonthPatterns {
    heading: Regex,
    heading_then_theme: Regex,
    day_entry: Regex,
}

impl MonthPatterns {
    fn new(month: &str) -> Option<Self> {
        let month = regex::escape(month);
        let heading_src = format!(
            r"(?i:<h[12](?:\s[^>]*)?>(?:[^<]|{INLINE_TAG})*?{month}(?:[^<]|{INLINE_TAG})*?</h[12]\s*>)"
        );
        let heading = Regex::new(&heading_src).ok()?;
        let heading_then_theme = Regex::new(&format!(
            r"(?s){heading_src}\s*(?i:<h[1-6](?:\s[^>]*)?>)(.*?)(?i:</h[1-6]\s*>)"
        ))
        .ok()?;
        let day_entry = Regex::new(&format!(r"{month}\s+\d+")).ok()?;
        Some(Self {
            heading,
            heading_then_theme,
            day_entry,
        })
    }

    fn is_overview(&self, html: &str) -> bool {
        self.heading.is_match(html) && !self.day_entry.is_match(html)
    }

    fn theme(&self, html: &str) -> Option<String> {
        let combined = self
            .heading_then_theme
            .captures(html)
            .map(|caps| strip_tags(&caps[1]))
            .filter(|theme| !theme.is_empty());
        if combined.is_some() {
            return combined;
        }
        // Second heading anywhere in the fragment.
        RE_ANY_HEADING
            .captures_iter(html)
            .nth(1)
            .map(|caps| strip_tags(&caps[1]))
            .filter(|theme| !theme.is_empty())
    }

    fn intro(&self, html: &str) -> String {
        let demoted = demote_second_h1(html);
        self.heading.replacen(&demoted, 1, "").into_owned()
    }
}

/// Turns the second `<h1>` into an `<h2>` so the overview keeps a
/// title/subtitle hierarchy.
fn demote_second_h1(html: &str) -> String {
    let Some(second) = RE_H1.captures_iter(html).nth(1) else {
        return html.to_string();
    };
    let Some(whole) = second.get(0) else {
        return html.to_string();
    };
    let attrs = second.get(1).map_or("", |m| m.as_str());
    let inner = second.get(2).map_or("", |m| m.as_str());
    format!(
        "{}<h2{attrs}>{inner}</h2>{}",
        &html[..whole.start()],
        &html[whole.end()..]
    )
}

/// First month-overview fragment for `month` in reading order.
pub fn find_month_overview(doc: &Document, month: &str) -> Option<MonthOverview> {
    let patterns = MonthPatterns::new(month)?;
    for (index, fragment) in doc.fragments().iter().enumerate() {
        let Some(html) = fragment.raw_html.as_deref() else {
            continue;
        };
        if html.chars().count() < MIN_OVERVIEW_FRAGMENT_CHARS || is_table_of_contents(html) {
            continue;
        }
        if !patterns.is_overview(html) {
            continue;
        }

        let theme = patterns.theme(html);
        tracing::debug!(chapter = %fragment.chapter_id, month, ?theme, "found month overview");
        return Some(MonthOverview {
            index,
            intro_html: patterns.intro(html),
            theme,
        });
    }
    None
}
