use strata_core::model::StructuredBlock;

pub fn print(blocks: &[StructuredBlock]) {
    print!("{}", format_blocks(blocks));
}

/// Render blocks as a readable outline: heading path, page, then the indented
/// paragraphs.
pub fn format_blocks(blocks: &[StructuredBlock]) -> String {
    if blocks.is_empty() {
        return "No structured text found.\n".into();
    }

    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "=== {} === (page {})\n\n",
            block.heading_hierarchy, block.page_number
        ));
        for line in block.text.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push_str(&format!("  {line}\n"));
            }
        }
    }
    out
}
