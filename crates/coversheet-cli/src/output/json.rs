use coversheet_core::error::CoverSheetError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), CoverSheetError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
