pub mod batch;
pub mod error;
pub mod extraction;
pub mod headers;
pub mod loader;
pub mod model;
pub mod scrape;

use std::path::Path;

use batch::BatchTable;
use error::CoverSheetError;
use extraction::DocxDocument;
use headers::HeaderMap;
use model::ScrapedRecord;
use scrape::CoverSheetScraper;

/// Scrape a single `.docx` cover sheet.
pub fn scrape_file(path: &Path, headers: &HeaderMap) -> Result<ScrapedRecord, CoverSheetError> {
    let document = DocxDocument::open(path)?;
    CoverSheetScraper::new(headers).scrape_source(&document)
}

/// Main API entry point: load every cover sheet in `dir` and build the batch
/// table, one row per document in file-name order.
pub fn scrape_dir(dir: &Path, headers: &HeaderMap) -> Result<BatchTable, CoverSheetError> {
    let documents = loader::load_dir(dir)?;
    tracing::info!(
        documents = documents.len(),
        dir = %dir.display(),
        "loaded cover sheets"
    );
    batch::process(&documents, headers)
}
