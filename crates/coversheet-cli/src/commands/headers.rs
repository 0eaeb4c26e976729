use coversheet_core::error::CoverSheetError;
use coversheet_core::headers::{builtin, load_header_map, HeaderMap};
use std::path::Path;

pub fn list() -> Result<(), CoverSheetError> {
    let headers = builtin::cover_sheet_headers()?;
    println!("Built-in cover sheet headings:\n");
    print_headers(&headers);
    println!();
    println!("A table right after one of these headings is read as its free-text answer.");
    println!("Tables without a heading are read for checkboxes (☒ = 1, ☐ = 0).");
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), CoverSheetError> {
    let headers = load_header_map(file)?;
    println!(
        "{} is valid ({} heading(s))\n",
        file.display(),
        headers.len()
    );
    print_headers(&headers);
    Ok(())
}

fn print_headers(headers: &HeaderMap) {
    let width = headers.iter().map(|(h, _)| h.chars().count()).max().unwrap_or(10);
    for (heading, field) in headers.iter() {
        println!("  {:<width$}  -> {}", heading, field, width = width);
    }
}
