use std::path::Path;
use strata_core::error::StrataError;

use crate::commands::Settings;

pub fn show(settings: &Settings) -> Result<(), StrataError> {
    let config = settings.effective_config(None)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), StrataError> {
    let config = strata_core::config::load_config(file)?;
    println!(
        "Valid config: batch_size {}, mutool {}",
        config.batch_size,
        config
            .mutool
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "auto".into())
    );
    Ok(())
}
