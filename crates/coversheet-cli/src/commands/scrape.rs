use coversheet_core::error::CoverSheetError;
use std::path::PathBuf;

use crate::commands::resolve_headers;
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    headers_file: Option<PathBuf>,
) -> Result<(), CoverSheetError> {
    let headers = resolve_headers(headers_file.as_deref())?;
    let record = coversheet_core::scrape_file(&input_file, &headers)?;

    match output_format {
        "json" => output::json::print(&record)?,
        _ => print!("{}", output::table::format_record(&record)),
    }

    Ok(())
}
