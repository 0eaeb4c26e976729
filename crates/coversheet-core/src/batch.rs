use rayon::prelude::*;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use tracing::info;

use crate::error::CoverSheetError;
use crate::extraction::BlockSource;
use crate::headers::HeaderMap;
use crate::model::{FieldValue, ScrapedRecord};
use crate::scrape::CoverSheetScraper;

/// One scraped cover sheet and the document it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub document: String,
    pub record: ScrapedRecord,
}

/// Row per document, column per field name seen anywhere in the batch.
///
/// Columns are kept in first-seen order. A field a document did not produce
/// reads as `None` and serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchTable {
    columns: Vec<String>,
    rows: Vec<BatchRow>,
}

impl BatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<D: Into<String>>(
        records: impl IntoIterator<Item = (D, ScrapedRecord)>,
    ) -> Self {
        let mut table = Self::new();
        for (document, record) in records {
            table.push(document, record);
        }
        table
    }

    pub fn push(&mut self, document: impl Into<String>, record: ScrapedRecord) {
        for field in record.fields() {
            if !self.columns.iter().any(|c| c == field) {
                self.columns.push(field.to_string());
            }
        }
        self.rows.push(BatchRow {
            document: document.into(),
            record,
        });
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[BatchRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in row `row`; `None` for a gap or an unknown column.
    pub fn get(&self, row: usize, column: &str) -> Option<&FieldValue> {
        self.rows.get(row)?.record.get(column)
    }

    /// One column top to bottom, with `None` for rows that lack the field.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<&'a FieldValue>> + 'a {
        self.rows.iter().map(move |row| row.record.get(name))
    }
}

/// Scrape every document and assemble the batch table.
///
/// Documents are scraped in parallel; rows keep the input order. Any failure
/// aborts the whole batch and no partial table is returned.
pub fn process<S: BlockSource>(
    documents: &[S],
    headers: &HeaderMap,
) -> Result<BatchTable, CoverSheetError> {
    let scraper = CoverSheetScraper::new(headers);

    let records = documents
        .par_iter()
        .map(|doc| {
            scraper
                .scrape_source(doc)
                .map(|record| (doc.name().to_string(), record))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let table = BatchTable::from_records(records);
    info!(
        documents = table.len(),
        columns = table.columns().len(),
        "assembled batch table"
    );
    Ok(table)
}

impl Serialize for BatchTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<RowView<'_>> = self
            .rows
            .iter()
            .map(|row| RowView {
                columns: &self.columns,
                row,
            })
            .collect();

        let mut s = serializer.serialize_struct("BatchTable", 2)?;
        s.serialize_field("columns", &self.columns)?;
        s.serialize_field("rows", &rows)?;
        s.end()
    }
}

struct RowView<'a> {
    columns: &'a [String],
    row: &'a BatchRow,
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("BatchRow", 2)?;
        s.serialize_field("document", &self.row.document)?;
        s.serialize_field(
            "fields",
            &FieldsView {
                columns: self.columns,
                record: &self.row.record,
            },
        )?;
        s.end()
    }
}

/// Every column of the table, `null` where the record lacks it.
struct FieldsView<'a> {
    columns: &'a [String],
    record: &'a ScrapedRecord,
}

impl Serialize for FieldsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in self.columns {
            map.serialize_entry(column, &self.record.get(column))?;
        }
        map.end()
    }
}
