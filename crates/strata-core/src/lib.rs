pub mod cancel;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod structure;

use std::io::Write;
use std::path::Path;

use cancel::CancelToken;
use config::ExtractConfig;
use error::StrataError;
use extraction::PageSource;
use model::StructuredBlock;
use structure::aggregate::Aggregator;
use structure::batch::PageBatches;
use structure::histogram::FontHistogram;
use structure::thresholds::{select_thresholds, ThresholdSet};

/// Main API entry point: extract heading-annotated body text from a document.
///
/// Runs two passes over the document in batches of `config.batch_size` pages.
/// The first builds a font-size histogram and derives heading thresholds, the
/// second classifies every text block and aggregates body paragraphs under
/// their Title / Section / Subsection path. Any failure aborts the whole run.
pub fn extract_structured_text(
    path: &Path,
    source: &dyn PageSource,
    config: &ExtractConfig,
    cancel: &CancelToken,
) -> Result<Vec<StructuredBlock>, StrataError> {
    config::validate_config(config)?;
    if cancel.is_cancelled() {
        return Err(StrataError::Cancelled);
    }

    let page_count = source.page_count(path)?;
    if page_count == 0 {
        return Err(StrataError::EmptyDocument {
            path: path.to_path_buf(),
        });
    }
    log::info!(
        "{}: {} page(s), batch size {}, backend {}",
        path.display(),
        page_count,
        config.batch_size,
        source.backend_name()
    );

    let thresholds = compute_thresholds(path, source, config, cancel, page_count)?;
    log::info!(
        "heading thresholds: title {}, section {}, subsection {}",
        thresholds.title,
        thresholds.section,
        thresholds.subsection
    );

    let mut aggregator = Aggregator::new(thresholds);
    for batch in PageBatches::new(source, path, cancel, 2, page_count, config.batch_size) {
        let batch = batch?;
        for (page_number, page) in batch.numbered() {
            for block in &page.blocks {
                aggregator.observe(block, page_number);
            }
        }
    }

    let blocks = aggregator.finish();
    log::info!("emitted {} structured block(s)", blocks.len());
    Ok(blocks)
}

/// First pass: histogram of every text line, then threshold selection.
fn compute_thresholds(
    path: &Path,
    source: &dyn PageSource,
    config: &ExtractConfig,
    cancel: &CancelToken,
    page_count: usize,
) -> Result<ThresholdSet, StrataError> {
    let mut histogram = FontHistogram::new();
    for batch in PageBatches::new(source, path, cancel, 1, page_count, config.batch_size) {
        histogram.observe_pages(&batch?.pages);
    }
    log::debug!("{} distinct font size bucket(s)", histogram.len());
    select_thresholds(&histogram)
}

/// Like [`extract_structured_text`], for a document held in memory.
///
/// The bytes are written to a temporary file for the renderer to read.
pub fn extract_structured_bytes(
    bytes: &[u8],
    source: &dyn PageSource,
    config: &ExtractConfig,
    cancel: &CancelToken,
) -> Result<Vec<StructuredBlock>, StrataError> {
    let mut tmpfile = tempfile::Builder::new().suffix(".pdf").tempfile()?;
    tmpfile.write_all(bytes)?;
    tmpfile.flush()?;
    extract_structured_text(tmpfile.path(), source, config, cancel)
}

/// Plain text of the given 1-based pages, or of the whole document when
/// `pages` is empty.
pub fn extract_text(
    path: &Path,
    source: &dyn PageSource,
    pages: &[usize],
) -> Result<String, StrataError> {
    if let Some(&bad) = pages.iter().find(|&&p| p == 0) {
        return Err(StrataError::ConfigInvalid(format!(
            "page numbers are 1-based, got {bad}"
        )));
    }
    source.extract_text(path, pages)
}
