mod epub_fixture;

use std::path::Path;

use daily_reading::{DailyReader, ReadingError, NOT_FOUND_MESSAGE};
use epub_fixture::{filler, write_epub, write_epub_with_missing};

fn daily_book(dir: &Path) -> std::path::PathBuf {
    let contents = format!(
        "<h1>Contents</h1><ol>{}</ol>",
        (1..=12)
            .map(|i| format!("<li><a href=\"ch{i:03}.xhtml\">January {i}</a></li>"))
            .collect::<String>()
    );
    let january = format!(
        "<h2>January 1st</h2><p>On beginnings.</p>{fill}\
         <h2>January 2nd</h2><p>On habits.</p>{fill}<p>—Epictetus</p>\
         <h2>January 3rd</h2><p>On patience.</p>{fill}",
        fill = filler(3)
    );
    let overview = format!(
        "<h1 class=\"month\">February</h1><h1>Discipline</h1><p>A month on self-mastery.</p>{}",
        filler(40)
    );
    let february = format!(
        "<div class=\"entry\"><h3>February 2</h3><p>Hold the line.</p>{fill}</div>\
         <div class=\"entry\"><h3>February 3</h3><p>Keep going.</p>{fill}</div>",
        fill = filler(3)
    );
    write_epub(
        dir,
        "daily.epub",
        &[
            "<h1>Title Page</h1>".to_string(),
            contents,
            january,
            overview,
            february,
        ],
    )
}

#[tokio::test]
async fn extracts_one_day_between_neighbours() {
    let dir = tempfile::tempdir().unwrap();
    let path = daily_book(dir.path());

    let reading = DailyReader::default()
        .extract_daily_content(&path, 2, "daily-stoic")
        .await
        .unwrap();

    assert!(reading.content.starts_with("<p>On habits.</p>"), "{}", reading.content);
    assert!(reading
        .content
        .contains("<p class=\"attribution\">—Epictetus</p>"));
    assert!(!reading.content.contains("On beginnings."));
    assert!(!reading.content.contains("On patience."));
    assert!(!reading.content.contains("January"));
    assert_eq!(reading.month_intro, None);
    assert_eq!(reading.month_theme, None);
}

#[tokio::test]
async fn last_entry_of_chapter_runs_to_its_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = daily_book(dir.path());

    let reading = DailyReader::default()
        .extract_daily_content(&path, 3, "daily-stoic")
        .await
        .unwrap();

    assert!(reading.content.starts_with("<p>On patience.</p>"));
    assert!(reading.content.ends_with("the key to action.</p>"));
}

#[tokio::test]
async fn daily_laws_gets_month_overview() {
    let dir = tempfile::tempdir().unwrap();
    let path = daily_book(dir.path());

    let reading = DailyReader::default()
        .extract_daily_content(&path, 33, "daily-laws")
        .await
        .unwrap();

    assert!(reading.content.starts_with("<p>Hold the line.</p>"), "{}", reading.content);
    assert!(!reading.content.contains("Keep going."));
    assert_eq!(reading.month_theme.as_deref(), Some("Discipline"));
    let intro = reading.month_intro.unwrap();
    assert!(intro.starts_with("<h2>Discipline</h2><p>A month on self-mastery.</p>"));
    assert!(!intro.contains("February"));
}

#[tokio::test]
async fn other_books_never_get_month_overview() {
    let dir = tempfile::tempdir().unwrap();
    let path = daily_book(dir.path());

    let reading = DailyReader::default()
        .extract_daily_content(&path, 33, "daily-stoic")
        .await
        .unwrap();

    assert!(reading.content.starts_with("<p>Hold the line.</p>"));
    assert_eq!(reading.month_intro, None);
    assert_eq!(reading.month_theme, None);
}

#[tokio::test]
async fn falls_back_to_chapter_position_without_dates() {
    let dir = tempfile::tempdir().unwrap();
    let chapters = (0..5)
        .map(|i| format!("<p>Entry number {i}.</p>"))
        .collect::<Vec<_>>();
    let path = write_epub(dir.path(), "undated.epub", &chapters);
    let reader = DailyReader::default();

    let reading = reader
        .extract_daily_content(&path, 2, "not-in-registry")
        .await
        .unwrap();
    assert_eq!(reading.content, "<p>Entry number 1.</p>");

    let reading = reader
        .extract_daily_content(&path, 120, "not-in-registry")
        .await
        .unwrap();
    assert_eq!(reading.content, NOT_FOUND_MESSAGE);
}

fn book_with_missing_chapter(dir: &Path) -> std::path::PathBuf {
    let chapters = (0..3)
        .map(|i| format!("<p>Entry number {i}.</p>"))
        .collect::<Vec<_>>();
    write_epub_with_missing(dir, "gap.epub", &chapters, &[1])
}

#[test]
fn missing_chapter_file_keeps_its_slot() {
    let dir = tempfile::tempdir().unwrap();
    let path = book_with_missing_chapter(dir.path());

    let doc = daily_reading::epub_reader::load_document(&path).unwrap();
    assert_eq!(doc.len(), 3);
    assert!(doc.chapter(0).unwrap().contains("Entry number 0."));
    assert_eq!(doc.chapter(1), None);
    assert!(doc.chapter(2).unwrap().contains("Entry number 2."));
}

#[tokio::test]
async fn fallback_positions_survive_a_missing_chapter() {
    let dir = tempfile::tempdir().unwrap();
    let path = book_with_missing_chapter(dir.path());
    let reader = DailyReader::default();

    let reading = reader
        .extract_daily_content(&path, 3, "not-in-registry")
        .await
        .unwrap();
    assert_eq!(reading.content, "<p>Entry number 2.</p>");

    let reading = reader
        .extract_daily_content(&path, 2, "not-in-registry")
        .await
        .unwrap();
    assert_eq!(reading.content, NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let path = daily_book(dir.path());
    let reader = DailyReader::default();

    let (first, second) = tokio::join!(
        reader.extract_daily_content(&path, 1, "daily-stoic"),
        reader.extract_daily_content(&path, 2, "daily-stoic"),
    );

    assert!(first.unwrap().content.starts_with("<p>On beginnings.</p>"));
    assert!(second.unwrap().content.starts_with("<p>On habits.</p>"));
}

#[tokio::test]
async fn missing_asset_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DailyReader::default()
        .extract_daily_content(&dir.path().join("absent.epub"), 1, "daily-stoic")
        .await
        .unwrap_err();
    assert!(err.is_asset_missing(), "{err}");
}

#[tokio::test]
async fn malformed_container_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.epub");
    std::fs::write(&path, b"this is not a zip archive").unwrap();

    let err = DailyReader::default()
        .extract_daily_content(&path, 1, "daily-stoic")
        .await
        .unwrap_err();
    assert!(matches!(err, ReadingError::Parse { .. }), "{err}");
}

#[tokio::test]
async fn read_resolves_books_through_the_registry() {
    let dir = tempfile::tempdir().unwrap();
    let built = daily_book(dir.path());
    std::fs::rename(&built, dir.path().join("the-daily-stoic.epub")).unwrap();

    let reader = DailyReader::default();
    let reading = reader.read("daily-stoic", 1, dir.path()).await.unwrap();
    assert!(reading.content.starts_with("<p>On beginnings.</p>"));

    let err = reader.read("no-such-book", 1, dir.path()).await.unwrap_err();
    assert!(err.is_asset_missing());
}
