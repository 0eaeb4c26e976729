use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Glyph Word renders for a ticked checkbox content control.
pub const CHECKED_GLYPH: &str = "☒";
/// Glyph Word renders for an empty checkbox content control.
pub const UNCHECKED_GLYPH: &str = "☐";

/// A top-level body element of a cover sheet, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Paragraph { text: String },
    Table { rows: Vec<Row> },
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Block {
        Block::Paragraph { text: text.into() }
    }

    pub fn table(rows: Vec<Row>) -> Block {
        Block::Table { rows }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    /// All paragraph texts of the row, left to right across cells.
    pub fn flatten(&self) -> Vec<&str> {
        self.cells
            .iter()
            .flat_map(|c| c.paragraphs.iter().map(|p| p.as_str()))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub paragraphs: Vec<String>,
}

impl Cell {
    pub fn new<S: Into<String>>(paragraphs: impl IntoIterator<Item = S>) -> Cell {
        Cell {
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxGlyph {
    Checked,
    Unchecked,
}

impl CheckboxGlyph {
    /// Matches only when the whole paragraph text is a glyph.
    pub fn from_text(text: &str) -> Option<CheckboxGlyph> {
        match text {
            CHECKED_GLYPH => Some(CheckboxGlyph::Checked),
            UNCHECKED_GLYPH => Some(CheckboxGlyph::Unchecked),
            _ => None,
        }
    }

    pub fn is_checked(self) -> bool {
        matches!(self, CheckboxGlyph::Checked)
    }
}

/// A scraped answer: free text from an answer table, or a checkbox state.
///
/// Checkboxes serialize as the integers `1` / `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checkbox(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Checkbox(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<u8> {
        match self {
            FieldValue::Checkbox(checked) => Some(u8::from(*checked)),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Checkbox(checked) => write!(f, "{}", u8::from(*checked)),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Checkbox(checked) => serializer.serialize_u8(u8::from(*checked)),
        }
    }
}

/// Field name to value, for one cover sheet.
///
/// Keeps insertion order. Re-assigning a field replaces the value but keeps
/// the position where the field was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedRecord {
    fields: Vec<(String, FieldValue)>,
}

impl ScrapedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        let field = field.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ScrapedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reassigning_keeps_first_position() {
        let mut record = ScrapedRecord::new();
        record.insert("a", FieldValue::Checkbox(false));
        record.insert("b", FieldValue::Text("x".into()));
        record.insert("a", FieldValue::Checkbox(true));

        let fields: Vec<&str> = record.fields().collect();
        assert_eq!(fields, vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&FieldValue::Checkbox(true)));
    }

    #[test]
    fn checkbox_serializes_as_integer() {
        let mut record = ScrapedRecord::new();
        record.insert("On Track", FieldValue::Checkbox(true));
        record.insert("Notes", FieldValue::Text("fine".into()));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"On Track":1,"Notes":"fine"}"#);
    }

    #[test]
    fn glyph_must_be_whole_text() {
        assert_eq!(CheckboxGlyph::from_text("☒"), Some(CheckboxGlyph::Checked));
        assert_eq!(CheckboxGlyph::from_text("☐"), Some(CheckboxGlyph::Unchecked));
        assert_eq!(CheckboxGlyph::from_text("☒ Done"), None);
    }

    #[test]
    fn row_flatten_crosses_cells() {
        let row = Row {
            cells: vec![Cell::new(["a", "b"]), Cell::new(["c"])],
        };
        assert_eq!(row.flatten(), vec!["a", "b", "c"]);
    }
}
