use coversheet_core::error::CoverSheetError;
use std::path::PathBuf;

use crate::commands::resolve_headers;
use crate::output;

pub fn run(
    dir: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    headers_file: Option<PathBuf>,
) -> Result<(), CoverSheetError> {
    let headers = resolve_headers(headers_file.as_deref())?;
    let table = coversheet_core::scrape_dir(&dir, &headers)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&table)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Scraped {} cover sheet(s) into {} column(s), written to {}",
                table.len(),
                table.columns().len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&table)?,
            _ => print!("{}", output::table::format_batch(&table)),
        },
    }

    Ok(())
}
