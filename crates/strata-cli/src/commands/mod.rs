pub mod config;
pub mod structure;
pub mod text;

use std::path::PathBuf;
use strata_core::config::{load_config, validate_config, ExtractConfig};
use strata_core::error::StrataError;
use strata_core::extraction::mutool::MutoolSource;

/// Global flags shared by every subcommand.
pub struct Settings {
    pub config: Option<PathBuf>,
    pub mutool: Option<PathBuf>,
}

impl Settings {
    /// Config file (or defaults) with command line overrides applied.
    pub fn effective_config(&self, batch_size: Option<usize>) -> Result<ExtractConfig, StrataError> {
        let mut config = match self.config {
            Some(ref path) => load_config(path)?,
            None => ExtractConfig::default(),
        };
        if let Some(size) = batch_size {
            config.batch_size = size;
        }
        if let Some(ref bin) = self.mutool {
            config.mutool = Some(bin.clone());
        }
        validate_config(&config)?;
        Ok(config)
    }
}

pub fn source(config: &ExtractConfig) -> Result<MutoolSource, StrataError> {
    let source = MutoolSource::discover(config)?;
    log::info!("using {}", source.binary().display());
    Ok(source)
}
