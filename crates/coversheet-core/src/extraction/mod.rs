pub mod docx;

use crate::error::CoverSheetError;
use crate::model::Block;

pub use docx::{Blocks, DocxDocument};

/// Something that can be walked as an ordered sequence of body blocks.
///
/// Each call to `blocks` starts a fresh walk from the top of the document.
pub trait BlockSource: Send + Sync {
    /// Name used in logs and as the row label of a batch.
    fn name(&self) -> &str;

    fn blocks(&self) -> Box<dyn Iterator<Item = Result<Block, CoverSheetError>> + '_>;
}
