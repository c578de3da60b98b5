use serde::{Deserialize, Serialize};

/// Axis-aligned box as reported by `stext.json` (origin plus extent).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub h: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Font {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub size: f64,
}

/// One rendered line of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub wmode: i32,
    #[serde(default)]
    pub bbox: BBox,
    #[serde(default)]
    pub font: Font,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub text: String,
}

impl Line {
    /// Convenience constructor used by adapters and tests that only care about
    /// the text and its font size.
    pub fn new(text: impl Into<String>, size: f64) -> Self {
        Line {
            text: text.into(),
            font: Font {
                size,
                ..Font::default()
            },
            ..Line::default()
        }
    }

    pub fn size(&self) -> f64 {
        self.font.size
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    /// Images, vector graphics, untyped blocks and anything else the renderer
    /// emits.
    #[default]
    #[serde(other)]
    Other,
}

/// A typed content region on a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type", default)]
    pub kind: BlockKind,
    #[serde(default)]
    pub bbox: BBox,
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Block {
    pub fn text(lines: Vec<Line>) -> Self {
        Block {
            kind: BlockKind::Text,
            lines,
            ..Block::default()
        }
    }

    pub fn image() -> Self {
        Block {
            kind: BlockKind::Other,
            ..Block::default()
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }

    /// Largest font size among the block's lines, 0 for a block without lines.
    pub fn representative_size(&self) -> f64 {
        self.lines.iter().map(Line::size).fold(0.0, f64::max)
    }

    /// Non-empty trimmed line texts joined by single spaces.
    pub fn joined_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One decoded page: its blocks in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(blocks: Vec<Block>) -> Self {
        Page { blocks }
    }

    pub fn text_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_text())
    }
}

/// A contiguous run of body text under one fixed heading path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredBlock {
    /// Populated heading levels joined by `" | "`, Title first.
    pub heading_hierarchy: String,
    /// Body paragraphs separated by a blank line.
    pub text: String,
    /// 1-based page of the first paragraph.
    pub page_number: usize,
}
