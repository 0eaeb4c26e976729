pub mod checkbox;

use crate::error::CoverSheetError;
use crate::extraction::BlockSource;
use crate::headers::HeaderMap;
use crate::model::{Block, FieldValue, Row, ScrapedRecord};
use checkbox::checkbox_pairs;
use tracing::debug;

/// Where the scraper is between blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeState<'h> {
    /// The next table is read for checkboxes.
    Idle,
    /// A known heading was seen; the next table is its free-text answer.
    AwaitingTable { field: &'h str },
}

/// Turns the block sequence of one cover sheet into a [`ScrapedRecord`].
#[derive(Debug, Clone, Copy)]
pub struct CoverSheetScraper<'h> {
    headers: &'h HeaderMap,
}

impl<'h> CoverSheetScraper<'h> {
    pub fn new(headers: &'h HeaderMap) -> Self {
        Self { headers }
    }

    pub fn scrape<'b>(&self, blocks: impl IntoIterator<Item = &'b Block>) -> ScrapedRecord {
        let mut session = ScrapeSession::new(self.headers);
        for block in blocks {
            session.feed(block);
        }
        session.finish()
    }

    /// Scrape a document, stopping at the first block it fails to produce.
    pub fn scrape_source<S: BlockSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<ScrapedRecord, CoverSheetError> {
        let _span = tracing::debug_span!("scrape", document = source.name()).entered();
        let mut session = ScrapeSession::new(self.headers);
        for block in source.blocks() {
            session.feed(&block?);
        }
        let record = session.finish();
        debug!(fields = record.len(), "scraped cover sheet");
        Ok(record)
    }
}

/// One forward pass over a document's blocks.
#[derive(Debug)]
pub struct ScrapeSession<'h> {
    headers: &'h HeaderMap,
    state: ScrapeState<'h>,
    record: ScrapedRecord,
}

impl<'h> ScrapeSession<'h> {
    pub fn new(headers: &'h HeaderMap) -> Self {
        Self {
            headers,
            state: ScrapeState::Idle,
            record: ScrapedRecord::new(),
        }
    }

    pub fn state(&self) -> ScrapeState<'h> {
        self.state
    }

    pub fn feed(&mut self, block: &Block) {
        match block {
            Block::Paragraph { text } => {
                if let Some(field) = self.headers.field_for(text) {
                    if let ScrapeState::AwaitingTable { field: pending } = self.state {
                        debug!(pending, heading = %text, "heading replaced before its answer table");
                    }
                    self.state = ScrapeState::AwaitingTable { field };
                }
            }
            Block::Table { rows } => match std::mem::replace(&mut self.state, ScrapeState::Idle) {
                ScrapeState::AwaitingTable { field } => {
                    self.record.insert(field, FieldValue::Text(join_answer(rows)));
                }
                ScrapeState::Idle => self.read_checkboxes(rows),
            },
        }
    }

    pub fn finish(self) -> ScrapedRecord {
        if let ScrapeState::AwaitingTable { field } = self.state {
            debug!(field, "heading at end of document has no answer table");
        }
        self.record
    }

    fn read_checkboxes(&mut self, rows: &[Row]) {
        let before = self.record.len();
        let mut found = 0usize;
        for row in rows {
            for pair in checkbox_pairs(&row.flatten()) {
                self.record
                    .insert(pair.title, FieldValue::Checkbox(pair.glyph.is_checked()));
                found += 1;
            }
        }
        if found == 0 {
            debug!(rows = rows.len(), "table without heading or checkboxes skipped");
        } else {
            debug!(found, new_fields = self.record.len() - before, "read checkbox table");
        }
    }
}

/// Every paragraph of the table, row by row and cell by cell, joined by
/// single spaces. While nothing has been collected a fragment replaces the
/// text instead of being appended, so empty leading paragraphs vanish.
fn join_answer(rows: &[Row]) -> String {
    let mut answer = String::new();
    for fragment in rows.iter().flat_map(|row| row.flatten()) {
        if !answer.is_empty() {
            answer.push(' ');
        }
        answer.push_str(fragment);
    }
    answer
}
