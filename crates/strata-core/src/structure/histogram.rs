use crate::model::Page;
use std::collections::BTreeMap;

/// Bias added before rounding so that sizes just under a half point collapse
/// into the bucket above.
const BUCKET_BIAS: f64 = 0.5;

/// Bucket key for a raw font size: `round(size + 0.5)` truncated to an integer.
pub fn bucket(size: f64) -> i64 {
    (size + BUCKET_BIAS).round() as i64
}

/// Occurrence count of rounded font sizes over every text line of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontHistogram {
    counts: BTreeMap<i64, usize>,
}

impl FontHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every line of every text block in `pages`. Non-text blocks are
    /// ignored and leave no entry behind.
    pub fn observe_pages(&mut self, pages: &[Page]) {
        for page in pages {
            for block in page.text_blocks() {
                for line in &block.lines {
                    *self.counts.entry(bucket(line.size())).or_insert(0) += 1;
                }
            }
        }
    }

    pub fn count(&self, size: i64) -> usize {
        self.counts.get(&size).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct buckets.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Distinct bucket keys, largest first.
    pub fn sizes_descending(&self) -> impl Iterator<Item = i64> + '_ {
        self.counts.keys().rev().copied()
    }
}
