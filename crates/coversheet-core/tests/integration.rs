//! Integration tests for scrape_file() / scrape_dir() end-to-end.
//!
//! Cover sheets are written as real .docx packages (a ZIP holding
//! word/document.xml) into temp directories.

use std::io::Write;
use std::path::Path;

use coversheet_core::error::CoverSheetError;
use coversheet_core::extraction::DocxDocument;
use coversheet_core::headers::builtin::cover_sheet_headers;
use coversheet_core::model::FieldValue;
use coversheet_core::scrape::CoverSheetScraper;
use coversheet_core::{scrape_dir, scrape_file};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}">
  <w:body>
    {body}
    <w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr>
  </w:body>
</w:document>"#
    )
}

fn write_docx(dir: &Path, name: &str, body: &str) {
    let file = std::fs::File::create(dir.join(name)).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::FileOptions::default();
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
        .unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document_xml(body).as_bytes()).unwrap();
    zip.finish().unwrap();
}

fn p(text: &str) -> String {
    format!(r#"<w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
}

fn tc(paragraphs: &[&str]) -> String {
    let inner: String = paragraphs.iter().map(|t| p(t)).collect();
    format!("<w:tc>{inner}</w:tc>")
}

fn tbl(rows: &[&[&[&str]]]) -> String {
    let rows: String = rows
        .iter()
        .map(|cells| {
            let cells: String = cells.iter().map(|c| tc(c)).collect();
            format!("<w:tr>{cells}</w:tr>")
        })
        .collect();
    format!("<w:tbl><w:tblPr><w:tblW w:w=\"0\" w:type=\"auto\"/></w:tblPr>{rows}</w:tbl>")
}

/// A cover sheet in the standard layout: answer tables under known headings,
/// a status checkbox table with no heading.
fn full_cover_sheet() -> String {
    [
        p("FY2024 Q3 Agency Priority Goal Cover Sheet"),
        p("Agency"),
        tbl(&[&[&["Department of Examples"]]]),
        p("Goal Name"),
        tbl(&[&[&["Reduce processing backlog"]]]),
        tbl(&[&[
            &["Overall Status"],
            &["☒"],
            &["On Track"],
            &["☐"],
            &["At Risk"],
            &["☐"],
            &["Off Track"],
        ]]),
        p("Progress Update"),
        tbl(&[&[&["Backlog fell by 12%.", "Staffing is stable."]]]),
        p("Next Steps"),
        p("Challenges and Barriers"),
        tbl(&[&[&["", "Procurement delays"]]]),
    ]
    .concat()
}

#[test]
fn full_cover_sheet_is_scraped() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(dir.path(), "agency.docx", &full_cover_sheet());
    let headers = cover_sheet_headers().unwrap();

    let record = scrape_file(&dir.path().join("agency.docx"), &headers).unwrap();

    assert_eq!(
        record.get("agency"),
        Some(&FieldValue::Text("Department of Examples".into()))
    );
    assert_eq!(
        record.get("goal_name"),
        Some(&FieldValue::Text("Reduce processing backlog".into()))
    );
    assert_eq!(
        record.get("progress_update"),
        Some(&FieldValue::Text(
            "Backlog fell by 12%. Staffing is stable.".into()
        ))
    );
    assert_eq!(record.get("On Track"), Some(&FieldValue::Checkbox(true)));
    assert_eq!(record.get("At Risk"), Some(&FieldValue::Checkbox(false)));
    assert_eq!(record.get("Off Track"), Some(&FieldValue::Checkbox(false)));
    assert!(!record.contains("Overall Status"));
    // "Next Steps" was replaced by the following heading before any table.
    assert!(!record.contains("next_steps"));
    assert_eq!(
        record.get("challenges_narrative"),
        Some(&FieldValue::Text("Procurement delays".into()))
    );
}

#[test]
fn rescraping_same_document_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(dir.path(), "agency.docx", &full_cover_sheet());
    let headers = cover_sheet_headers().unwrap();
    let document = DocxDocument::open(&dir.path().join("agency.docx")).unwrap();
    let scraper = CoverSheetScraper::new(&headers);

    let first = scraper.scrape_source(&document).unwrap();
    let second = scraper.scrape_source(&document).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn directory_batch_unions_columns() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(
        dir.path(),
        "a-agency.docx",
        &[p("Agency"), tbl(&[&[&["x"]]])].concat(),
    );
    write_docx(
        dir.path(),
        "b-agency.docx",
        &tbl(&[&[&["☒"], &["On Track"]]]),
    );
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    std::fs::write(dir.path().join("~$a-agency.docx"), "lock file").unwrap();
    let headers = cover_sheet_headers().unwrap();

    let table = scrape_dir(dir.path(), &headers).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(
        table.columns(),
        &["agency".to_string(), "On Track".to_string()]
    );
    assert_eq!(table.rows()[0].document, "a-agency.docx");
    assert_eq!(table.get(0, "agency"), Some(&FieldValue::Text("x".into())));
    assert_eq!(table.get(0, "On Track"), None);
    assert_eq!(table.get(1, "agency"), None);
    assert_eq!(table.get(1, "On Track"), Some(&FieldValue::Checkbox(true)));

    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json["rows"][0]["fields"]["On Track"], serde_json::Value::Null);
    assert_eq!(json["rows"][1]["fields"]["On Track"], 1);
}

#[test]
fn missing_directory_is_typed_error() {
    let dir = tempfile::tempdir().unwrap();
    let headers = cover_sheet_headers().unwrap();
    let err = scrape_dir(&dir.path().join("missing"), &headers).unwrap_err();
    assert!(matches!(err, CoverSheetError::DirectoryNotFound { .. }));
}

#[test]
fn broken_document_aborts_batch() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(dir.path(), "good.docx", &p("Agency"));
    std::fs::write(dir.path().join("corrupt.docx"), b"not a zip").unwrap();
    let headers = cover_sheet_headers().unwrap();

    let err = scrape_dir(dir.path(), &headers).unwrap_err();
    assert!(matches!(err, CoverSheetError::Zip(_)));
}

#[test]
fn empty_document_body() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(dir.path(), "blank.docx", "");
    let headers = cover_sheet_headers().unwrap();

    let record = scrape_file(&dir.path().join("blank.docx"), &headers).unwrap();
    assert!(record.is_empty());
}
