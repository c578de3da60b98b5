use strata_core::error::StrataError;
use strata_core::model::StructuredBlock;

pub fn print(blocks: &[StructuredBlock]) -> Result<(), StrataError> {
    let json = serde_json::to_string_pretty(blocks)?;
    println!("{json}");
    Ok(())
}
