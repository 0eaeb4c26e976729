use coversheet_core::error::CoverSheetError;
use coversheet_core::extraction::DocxDocument;
use coversheet_core::model::Block;
use std::path::PathBuf;

use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), CoverSheetError> {
    let document = DocxDocument::open(&input_file)?;

    match output_format {
        "json" => {
            let blocks: Vec<Block> = document.iter_blocks().collect::<Result<_, _>>()?;
            output::json::print(&blocks)?;
        }
        _ => {
            for (i, block) in document.iter_blocks().enumerate() {
                print!("{}", output::table::format_block(i, &block?));
            }
        }
    }

    Ok(())
}
