use crate::structure::thresholds::ThresholdSet;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockClass {
    Title,
    Section,
    Subsection,
    Body,
}

impl fmt::Display for BlockClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockClass::Title => write!(f, "Title"),
            BlockClass::Section => write!(f, "Section"),
            BlockClass::Subsection => write!(f, "Subsection"),
            BlockClass::Body => write!(f, "Body"),
        }
    }
}

/// Classify a block by its representative size. The highest matching level
/// wins; absent levels (threshold 0) never match.
pub fn classify(thresholds: &ThresholdSet, size: f64) -> BlockClass {
    if thresholds.title > 0.0 && size >= thresholds.title {
        BlockClass::Title
    } else if thresholds.section > 0.0 && size >= thresholds.section {
        BlockClass::Section
    } else if thresholds.subsection > 0.0 && size >= thresholds.subsection {
        BlockClass::Subsection
    } else {
        BlockClass::Body
    }
}
