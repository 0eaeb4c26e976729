pub mod builtin;

use crate::error::CoverSheetError;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// Recognised heading text mapped to the canonical field name it fills.
///
/// Headings match exactly (no trimming, case-sensitive). Entry order follows
/// the source JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new<H, F>(entries: impl IntoIterator<Item = (H, F)>) -> Self
    where
        H: Into<String>,
        F: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(h, f)| (h.into(), f.into()))
                .collect(),
        }
    }

    /// Field name for a paragraph text, if the text is a known heading.
    pub fn field_for(&self, heading: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(h, _)| h == heading)
            .map(|(_, f)| f.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(h, f)| (h.as_str(), f.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for HeaderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for HeaderMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = HeaderMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping heading text to field names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<HeaderMap, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((heading, field)) = access.next_entry::<String, String>()? {
                    entries.push((heading, field));
                }
                Ok(HeaderMap { entries })
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Load a header map from a JSON file.
pub fn load_header_map(path: &Path) -> Result<HeaderMap, CoverSheetError> {
    let content = std::fs::read_to_string(path).map_err(|e| CoverSheetError::HeaderMapLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let headers: HeaderMap =
        serde_json::from_str(&content).map_err(|e| CoverSheetError::HeaderMapLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_header_map(&headers)?;
    Ok(headers)
}

/// Parse a header map from a JSON string (no file path context).
pub fn parse_header_map_str(json: &str) -> Result<HeaderMap, CoverSheetError> {
    let headers: HeaderMap = serde_json::from_str(json)?;
    validate_header_map(&headers)?;
    Ok(headers)
}

pub fn validate_header_map(headers: &HeaderMap) -> Result<(), CoverSheetError> {
    if headers.is_empty() {
        return Err(CoverSheetError::HeaderMapInvalid(
            "header map must not be empty".into(),
        ));
    }

    for (i, (heading, field)) in headers.entries.iter().enumerate() {
        if heading.is_empty() {
            return Err(CoverSheetError::HeaderMapInvalid(
                "heading text must not be empty".into(),
            ));
        }
        if field.trim().is_empty() {
            return Err(CoverSheetError::HeaderMapInvalid(format!(
                "heading '{}' maps to an empty field name",
                heading
            )));
        }
        if headers.entries[..i].iter().any(|(h, _)| h == heading) {
            return Err(CoverSheetError::HeaderMapInvalid(format!(
                "heading '{}' is listed more than once",
                heading
            )));
        }
    }

    Ok(())
}
