use std::path::PathBuf;
use strata_core::error::StrataError;
use strata_core::extraction::PageSource;

use crate::commands::{source, Settings};

pub fn run(settings: &Settings, input_file: PathBuf, pages: &[usize]) -> Result<(), StrataError> {
    let config = settings.effective_config(None)?;
    let mutool = source(&config)?;
    let text = strata_core::extract_text(&input_file, &mutool, pages)?;
    print!("{text}");
    Ok(())
}

pub fn page_count(settings: &Settings, input_file: PathBuf) -> Result<(), StrataError> {
    let config = settings.effective_config(None)?;
    let mutool = source(&config)?;
    println!("{}", mutool.page_count(&input_file)?);
    Ok(())
}
