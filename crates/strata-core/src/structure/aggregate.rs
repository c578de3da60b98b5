use crate::model::{Block, StructuredBlock};
use crate::structure::classify::{classify, BlockClass};
use crate::structure::thresholds::ThresholdSet;

pub const HIERARCHY_SEPARATOR: &str = " | ";

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Current Title / Section / Subsection text. Setting a level clears every
/// level below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingState {
    pub title: String,
    pub section: String,
    pub subsection: String,
}

impl HeadingState {
    pub fn set_title(&mut self, text: &str) {
        self.title = text.to_string();
        self.section.clear();
        self.subsection.clear();
    }

    pub fn set_section(&mut self, text: &str) {
        self.section = text.to_string();
        self.subsection.clear();
    }

    pub fn set_subsection(&mut self, text: &str) {
        self.subsection = text.to_string();
    }

    /// Populated levels joined by [`HIERARCHY_SEPARATOR`]; empty before the
    /// first heading.
    pub fn hierarchy(&self) -> String {
        [&self.title, &self.section, &self.subsection]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(HIERARCHY_SEPARATOR)
    }
}

/// Streaming heading tracker and paragraph aggregator for the second pass.
///
/// Blocks are fed in document order through [`Aggregator::observe`]. Body
/// paragraphs under the same heading path are merged; a heading or a change of
/// path emits the pending aggregate. Call [`Aggregator::finish`] once all pages
/// have been observed.
#[derive(Debug)]
pub struct Aggregator {
    thresholds: ThresholdSet,
    headings: HeadingState,
    hierarchy: String,
    buffer: String,
    page: usize,
    blocks: Vec<StructuredBlock>,
}

impl Aggregator {
    pub fn new(thresholds: ThresholdSet) -> Self {
        Aggregator {
            thresholds,
            headings: HeadingState::default(),
            hierarchy: String::new(),
            buffer: String::new(),
            page: 0,
            blocks: Vec::new(),
        }
    }

    pub fn headings(&self) -> &HeadingState {
        &self.headings
    }

    /// Structured blocks emitted so far.
    pub fn emitted(&self) -> &[StructuredBlock] {
        &self.blocks
    }

    /// Feed one block found on the 1-based `page_number`. Non-text blocks and
    /// blocks without text are ignored. Returns the class assigned to the
    /// block, or `None` if it was ignored.
    pub fn observe(&mut self, block: &Block, page_number: usize) -> Option<BlockClass> {
        if !block.is_text() {
            return None;
        }
        let text = block.joined_text();
        if text.is_empty() {
            return None;
        }

        let class = classify(&self.thresholds, block.representative_size());
        log::trace!("page {page_number}: {class} {text:?}");
        match class {
            BlockClass::Title => {
                self.flush();
                self.headings.set_title(&text);
            }
            BlockClass::Section => {
                self.flush();
                self.headings.set_section(&text);
            }
            BlockClass::Subsection => {
                self.flush();
                self.headings.set_subsection(&text);
            }
            BlockClass::Body => self.push_paragraph(&text, page_number),
        }
        Some(class)
    }

    fn push_paragraph(&mut self, text: &str, page_number: usize) {
        let hierarchy = self.headings.hierarchy();
        if hierarchy.is_empty() {
            // Body text before the first heading has no path to live under.
            return;
        }
        if hierarchy != self.hierarchy {
            self.flush();
            self.hierarchy = hierarchy;
            self.page = page_number;
        }
        if !self.buffer.is_empty() {
            self.buffer.push_str(PARAGRAPH_SEPARATOR);
        }
        self.buffer.push_str(text);
    }

    /// Emit the pending aggregate, if any.
    pub fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        self.blocks.push(StructuredBlock {
            heading_hierarchy: self.hierarchy.clone(),
            text: self.buffer.trim().to_string(),
            page_number: self.page,
        });
        self.buffer.clear();
    }

    /// Flush the trailing aggregate and return every emitted block.
    pub fn finish(mut self) -> Vec<StructuredBlock> {
        self.flush();
        self.blocks
    }
}
