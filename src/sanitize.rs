use crate::dates::MONTH_NAMES;
use regex::{Captures, Regex};
use std::sync::LazyLock;

const ALLOWED_TAGS: [&str; 17] = [
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "br",
    "hr",
    "em",
    "strong",
    "i",
    "b",
    "blockquote",
    "ul",
    "ol",
    "li",
];

/// Class attached to em-dash attribution paragraphs.
pub const ATTRIBUTION_CLASS: &str = "attribution";

// -- Removal of non-content markup --
static RE_SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<head\b[^>]*>.*?</head\s*>",
    )
    .expect("valid script/style regex")
});
static RE_MARKUP_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|<![^>]*>|<\?.*?\?>")
        .expect("valid markup declaration regex")
});
static RE_IMG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").expect("valid img regex"));
static RE_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?a\b[^>]*>").expect("valid anchor regex"));
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9:_-]*)(?:\s[^>]*)?/?>").expect("valid tag regex")
});

// -- Tidying --
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\r\n\x0C]+").expect("valid whitespace regex"));
static RE_EMPTY_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<p>(?:\s|&nbsp;|&#160;|&#xa0;)*</p>").expect("valid empty paragraph regex")
});

// -- Watermarks --
static RE_WATERMARK_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)<p>\s*(?:<(?:i|em|b|strong)>\s*)*OceanofPDF\.com\s*(?:</(?:i|em|b|strong)>\s*)*</p>",
    )
    .expect("valid watermark paragraph regex")
});
static RE_WATERMARK_WRAPPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:i|em)>\s*OceanofPDF\.com\s*</(?:i|em)>")
        .expect("valid wrapped watermark regex")
});
static RE_WATERMARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)OceanofPDF\.com").expect("valid watermark regex"));

// -- Date headers --
static RE_DATE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)<(?:h[1-6]|p)>\s*{EMPHASIS_OPEN}(?:{date})\s*{EMPHASIS_CLOSE}</(?:h[1-6]|p)>",
        date = date_alternation(),
    ))
    .expect("valid date block regex")
});
static RE_DATE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)<(h[1-6]|p)>\s*{EMPHASIS_OPEN}(?:{date})\s*{EMPHASIS_CLOSE}<br>\s*",
        date = date_alternation(),
    ))
    .expect("valid date prefix regex")
});

// -- Attribution --
static RE_ATTRIBUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p>\s*((?:—|&mdash;|&#8212;|&#x2014;)(?:[^<]|</?(?:em|i|strong|b)>)*)</p>")
        .expect("valid attribution regex")
});

const EMPHASIS_OPEN: &str = r"(?:<(?:strong|b|em|i)>\s*)*";
const EMPHASIS_CLOSE: &str = r"(?:</(?:strong|b|em|i)>\s*)*";

fn date_alternation() -> String {
    let months = MONTH_NAMES.join("|");
    format!(r"(?:{months})\s+\d{{1,2}}(?:st|nd|rd|th)?|\d{{1,2}}\s+(?:{months})")
}

/// Normalizes a sliced chapter fragment into the restricted HTML shown to
/// readers. Running it on its own output changes nothing.
pub fn sanitize_html(html: &str) -> String {
    // Removing one piece of markup can turn its neighbours into a new tag or
    // an empty paragraph, so the cleanup runs until nothing changes.
    let mut html = html.to_string();
    loop {
        let next = cleanup_pass(&html);
        if next == html {
            break;
        }
        html = next;
    }

    RE_ATTRIBUTION
        .replace_all(&html, |caps: &Captures| {
            format!("<p class=\"{ATTRIBUTION_CLASS}\">{}</p>", &caps[1])
        })
        .into_owned()
}

fn cleanup_pass(html: &str) -> String {
    let html = RE_SCRIPT_STYLE.replace_all(html, "");
    let html = RE_MARKUP_DECL.replace_all(&html, "");
    let html = RE_IMG.replace_all(&html, "");
    let html = RE_ANCHOR.replace_all(&html, "");
    let html = RE_TAG.replace_all(&html, normalize_tag);
    tidy(&html)
}

fn normalize_tag(caps: &Captures) -> String {
    let closing = &caps[1];
    let name = caps[2].to_ascii_lowercase();
    if !ALLOWED_TAGS.contains(&name.as_str()) {
        return String::new();
    }
    match name.as_str() {
        "br" | "hr" if closing.is_empty() => format!("<{name}>"),
        "br" | "hr" => String::new(),
        _ => format!("<{closing}{name}>"),
    }
}

fn tidy(html: &str) -> String {
    let html = RE_WATERMARK_PARAGRAPH.replace_all(html, "");
    let html = RE_WATERMARK_WRAPPED.replace_all(&html, "");
    let html = RE_WATERMARK.replace_all(&html, "");
    let html = RE_WHITESPACE.replace_all(&html, " ");
    let html = RE_DATE_BLOCK.replace_all(&html, "");
    let html = RE_DATE_PREFIX.replace_all(&html, "<$1>");
    let html = RE_EMPTY_PARAGRAPH.replace_all(&html, "");
    let html = RE_WHITESPACE.replace_all(&html, " ");
    html.trim_matches(|c: char| c.is_ascii_whitespace()).to_string()
}

/// Plain text of an HTML snippet, whitespace collapsed.
pub fn strip_tags(html: &str) -> String {
    let text = RE_TAG.replace_all(html, "");
    RE_WHITESPACE.replace_all(&text, " ").trim().to_string()
}
