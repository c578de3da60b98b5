use crate::error::StrataError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Pages decoded per renderer invocation.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Extraction settings. Every field has a default, so an empty JSON object is a
/// valid config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Pages requested from the page source at once, in both passes.
    pub batch_size: usize,
    /// Explicit path to the `mutool` binary. Falls back to `$MUPDF_BIN`, then `PATH`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutool: Option<PathBuf>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            mutool: None,
        }
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractConfig, StrataError> {
    let content = std::fs::read_to_string(path).map_err(|e| StrataError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a config from a JSON string read from `source`.
pub fn parse_config(json: &str, source: &Path) -> Result<ExtractConfig, StrataError> {
    let config: ExtractConfig = serde_json::from_str(json).map_err(|e| StrataError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &ExtractConfig) -> Result<(), StrataError> {
    if config.batch_size == 0 {
        return Err(StrataError::ConfigInvalid(
            "batch_size must be at least 1".into(),
        ));
    }

    if let Some(ref bin) = config.mutool {
        if bin.as_os_str().is_empty() {
            return Err(StrataError::ConfigInvalid(
                "mutool path must not be empty".into(),
            ));
        }
    }

    Ok(())
}
