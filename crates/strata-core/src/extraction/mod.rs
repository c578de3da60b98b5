pub mod mutool;
pub mod stext;

use crate::error::StrataError;
use crate::model::Page;
use std::path::Path;

/// Backend that decodes pages of a document into the structured-text model.
pub trait PageSource: Send + Sync {
    /// Total number of pages in the document.
    fn page_count(&self, path: &Path) -> Result<usize, StrataError>;

    /// Decode pages `from..=to` (1-based, inclusive), in order.
    fn decode_pages(&self, path: &Path, from: usize, to: usize)
        -> Result<Vec<Page>, StrataError>;

    /// Plain text of the given pages (all pages when empty), pages separated
    /// by a form feed.
    ///
    /// The default rebuilds text from the structured model, one block per line.
    fn extract_text(&self, path: &Path, pages: &[usize]) -> Result<String, StrataError> {
        let numbers: Vec<usize> = if pages.is_empty() {
            (1..=self.page_count(path)?).collect()
        } else {
            pages.to_vec()
        };

        let mut out = Vec::with_capacity(numbers.len());
        for n in numbers {
            let decoded = self.decode_pages(path, n, n)?;
            let text = decoded
                .iter()
                .flat_map(|p| p.text_blocks())
                .map(|b| b.joined_text())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            out.push(text);
        }
        Ok(out.join("\x0c"))
    }

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
