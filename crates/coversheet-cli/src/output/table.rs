use coversheet_core::batch::BatchTable;
use coversheet_core::model::{Block, FieldValue, ScrapedRecord};
use std::fmt::Write;

const MISSING: &str = "-";

pub fn format_record(record: &ScrapedRecord) -> String {
    let mut out = String::new();
    if record.is_empty() {
        out.push_str("No fields found.\n");
        return out;
    }

    let width = record.fields().map(|f| f.chars().count()).max().unwrap_or(10);
    for (field, value) in record.iter() {
        let _ = writeln!(out, "  {:<width$}  {}", field, one_line(value), width = width);
    }
    out
}

/// Document by document, every column of the table; gaps print as "-".
pub fn format_batch(table: &BatchTable) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} cover sheet(s), {} column(s)\n",
        table.len(),
        table.columns().len()
    );

    let width = table
        .columns()
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(10);

    for (i, row) in table.rows().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "--- {} ---", row.document);
        for column in table.columns() {
            let value = table
                .get(i, column)
                .map(one_line)
                .unwrap_or_else(|| MISSING.to_string());
            let _ = writeln!(out, "  {:<width$}  {}", column, value, width = width);
        }
    }
    out
}

pub fn format_block(index: usize, block: &Block) -> String {
    let mut out = String::new();
    match block {
        Block::Paragraph { text } => {
            let _ = writeln!(out, "[{index}] paragraph  {text:?}");
        }
        Block::Table { rows } => {
            let _ = writeln!(out, "[{index}] table      {} row(s)", rows.len());
            for row in rows {
                let cells: Vec<String> = row
                    .cells
                    .iter()
                    .map(|c| {
                        c.paragraphs
                            .iter()
                            .map(|p| format!("{p:?}"))
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect();
                let _ = writeln!(out, "      | {} |", cells.join(" | "));
            }
        }
    }
    out
}

fn one_line(value: &FieldValue) -> String {
    value.to_string().replace('\n', " ")
}
