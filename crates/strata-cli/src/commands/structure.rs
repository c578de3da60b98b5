use std::path::PathBuf;
use strata_core::cancel::CancelToken;
use strata_core::error::StrataError;

use crate::commands::{source, Settings};
use crate::output;

pub fn run(
    settings: &Settings,
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    batch_size: Option<usize>,
) -> Result<(), StrataError> {
    let config = settings.effective_config(batch_size)?;
    let mutool = source(&config)?;
    let blocks =
        strata_core::extract_structured_text(&input_file, &mutool, &config, &CancelToken::new())?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&blocks)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Extracted {} block(s), written to {}",
                blocks.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&blocks)?,
            _ => output::table::print(&blocks),
        },
    }

    Ok(())
}
