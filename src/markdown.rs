use crate::reader::ReadingResult;

/// Renders a reading as Markdown for terminal output.
pub fn reading_to_markdown(reading: &ReadingResult) -> String {
    let mut md = String::new();

    if let Some(theme) = &reading.month_theme {
        md.push_str(&format!("# {}\n\n", theme));
    }
    if let Some(intro) = &reading.month_intro {
        md.push_str(&html2md::parse_html(intro));
        md.push_str("\n\n---\n\n");
    }
    md.push_str(&html2md::parse_html(&reading.content));

    tidy_markdown(&md)
}

/// Strips trailing spaces, keeps at most one blank line between blocks and
/// ends with a single newline.
fn tidy_markdown(md: &str) -> String {
    let mut out = String::with_capacity(md.len());
    let mut blank_run = 0;
    for line in md.lines().map(str::trim_end) {
        if line.is_empty() {
            blank_run += 1;
            continue;
        }
        if !out.is_empty() {
            out.push_str(if blank_run > 0 { "\n\n" } else { "\n" });
        }
        out.push_str(line);
        blank_run = 0;
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tidy_markdown_keeps_one_blank_line_between_blocks() {
        assert_eq!(tidy_markdown("\n\na  \n\n\n\nb\nc\n\n"), "a\n\nb\nc\n");
        assert_eq!(tidy_markdown("  \n"), "");
    }

    #[test]
    fn renders_theme_intro_and_content() {
        let reading = ReadingResult {
            content: "<p>Today the text.</p>".to_string(),
            month_intro: Some("<p>The month opens.</p>".to_string()),
            month_theme: Some("Discipline".to_string()),
        };
        let md = reading_to_markdown(&reading);
        assert!(md.starts_with("# Discipline\n"));
        assert!(md.contains("The month opens."));
        assert!(md.contains("---"));
        assert!(md.trim_end().ends_with("Today the text."));
    }
}
