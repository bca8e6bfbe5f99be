use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;

/// Writes a minimal EPUB 3 whose reading order is `chapters` (XHTML body markup).
pub fn write_epub(dir: &Path, name: &str, chapters: &[String]) -> PathBuf {
    write_epub_with_missing(dir, name, chapters, &[])
}

/// Like [`write_epub`], but the chapters at `missing` stay in the manifest and
/// spine while their files are left out of the archive.
pub fn write_epub_with_missing(
    dir: &Path,
    name: &str,
    chapters: &[String],
    missing: &[usize],
) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("create epub");
    let mut zip = zip::ZipWriter::new(file);

    let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let deflated =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("mimetype", stored).expect("start mimetype");
    zip.write_all(b"application/epub+zip").expect("write mimetype");

    zip.start_file("META-INF/container.xml", deflated)
        .expect("start container.xml");
    zip.write_all(CONTAINER_XML.as_bytes())
        .expect("write container.xml");

    zip.start_file("OEBPS/content.opf", deflated)
        .expect("start content.opf");
    zip.write_all(content_opf(chapters.len()).as_bytes())
        .expect("write content.opf");

    zip.start_file("OEBPS/nav.xhtml", deflated)
        .expect("start nav.xhtml");
    zip.write_all(nav_xhtml(chapters.len()).as_bytes())
        .expect("write nav.xhtml");

    for (i, body) in chapters.iter().enumerate() {
        if missing.contains(&i) {
            continue;
        }
        zip.start_file(format!("OEBPS/ch{i:03}.xhtml"), deflated)
            .expect("start chapter");
        zip.write_all(wrap_xhtml(&format!("Chapter {i}"), body).as_bytes())
            .expect("write chapter");
    }

    zip.finish().expect("finish epub");
    path
}

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

fn content_opf(chapters: usize) -> String {
    let mut manifest = String::from(
        r#"    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
"#,
    );
    let mut spine = String::new();
    for i in 0..chapters {
        manifest.push_str(&format!(
            "    <item id=\"ch{i:03}\" href=\"ch{i:03}.xhtml\" media-type=\"application/xhtml+xml\"/>\n"
        ));
        spine.push_str(&format!("    <itemref idref=\"ch{i:03}\"/>\n"));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="bookid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:identifier id="bookid">urn:uuid:5b0f4c2e-8d0a-4a51-9b59-2f3c1f8e7a10</dc:identifier>
    <dc:title>Fixture Daily Book</dc:title>
    <dc:creator>Test Author</dc:creator>
    <dc:language>en</dc:language>
    <meta property="dcterms:modified">2025-01-01T00:00:00Z</meta>
  </metadata>
  <manifest>
{manifest}  </manifest>
  <spine>
{spine}  </spine>
</package>
"#
    )
}

fn nav_xhtml(chapters: usize) -> String {
    let items = (0..chapters)
        .map(|i| format!("      <li><a href=\"ch{i:03}.xhtml\">Chapter {i}</a></li>\n"))
        .collect::<String>();
    wrap_xhtml(
        "Navigation",
        &format!("<nav epub:type=\"toc\" id=\"toc\">\n    <ol>\n{items}    </ol>\n  </nav>"),
    )
}

fn wrap_xhtml(title: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" lang="en">
<head>
  <title>{title}</title>
</head>
<body>
  {body}
</body>
</html>
"#
    )
}

/// Filler paragraphs so fragments clear the length thresholds.
pub fn filler(paragraphs: usize) -> String {
    "<p>Stillness is the key to clarity, and clarity is the key to action.</p>\n".repeat(paragraphs)
}
