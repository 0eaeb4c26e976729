use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoverSheetError {
    #[error("cover sheet directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("'{document}' is missing package part '{part}'. Is it a .docx file?")]
    MissingPart { document: String, part: String },

    #[error("malformed document XML in '{document}': {reason}")]
    MalformedDocument { document: String, reason: String },

    #[error("failed to read document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to open document package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to load header map from {path}: {reason}")]
    HeaderMapLoad { path: PathBuf, reason: String },

    #[error("invalid header map: {0}")]
    HeaderMapInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
