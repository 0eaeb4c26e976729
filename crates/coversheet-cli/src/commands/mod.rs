pub mod batch;
pub mod blocks;
pub mod headers;
pub mod scrape;

use coversheet_core::error::CoverSheetError;
use coversheet_core::headers::{builtin, load_header_map, HeaderMap};
use std::path::Path;

/// Custom header map if one was given, else the built-in cover sheet headings.
pub fn resolve_headers(path: Option<&Path>) -> Result<HeaderMap, CoverSheetError> {
    match path {
        Some(path) => load_header_map(path),
        None => builtin::cover_sheet_headers(),
    }
}
