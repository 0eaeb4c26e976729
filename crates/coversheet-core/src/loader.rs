use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CoverSheetError;
use crate::extraction::DocxDocument;

/// Load every cover sheet in a directory (not recursive).
///
/// Entries are sorted by file name so batch rows come out in a stable order.
/// Only regular `.docx` files are opened; Word lock files (`~$...`) and
/// everything else are skipped.
pub fn load_dir(path: &Path) -> Result<Vec<DocxDocument>, CoverSheetError> {
    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CoverSheetError::DirectoryNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry?;
        let file_path = entry.path();
        if !entry.file_type()?.is_file() {
            debug!(path = %file_path.display(), "skipping non-file entry");
            continue;
        }
        if !is_cover_sheet(&file_path) {
            debug!(path = %file_path.display(), "skipping non-docx file");
            continue;
        }
        files.push(file_path);
    }
    files.sort();

    files.iter().map(|f| DocxDocument::open(f)).collect()
}

fn is_cover_sheet(path: &Path) -> bool {
    let is_lock_file = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with("~$"))
        .unwrap_or(false);
    let is_docx = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("docx"))
        .unwrap_or(false);
    is_docx && !is_lock_file
}
