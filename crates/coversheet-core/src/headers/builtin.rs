use crate::error::CoverSheetError;
use crate::headers::{parse_header_map_str, HeaderMap};

const COVER_SHEET_JSON: &str = include_str!("../../../../headers/cover-sheet.json");

/// Load the header vocabulary of the standard performance cover sheet.
pub fn cover_sheet_headers() -> Result<HeaderMap, CoverSheetError> {
    parse_header_map_str(COVER_SHEET_JSON)
}
