use crate::error::StrataError;
use crate::model::Page;
use serde::Deserialize;
use serde_json::Value;

/// Whole-document wrapper emitted by `mutool draw -F stext.json`.
#[derive(Debug, Deserialize)]
struct StextDocument {
    pages: Vec<Page>,
}

/// Parse `stext.json` output into pages.
///
/// Accepts either a single `{"pages": [...]}` document or a stream of
/// concatenated per-page `{"blocks": [...]}` objects, as older MuPDF releases
/// print. Any other shape, or a field of the wrong type, is an error. Blocks
/// whose `type` is not `"text"` are kept as [`crate::model::BlockKind::Other`]
/// so that callers can skip them.
pub fn parse_stext(json: &str) -> Result<Vec<Page>, StrataError> {
    let trimmed = json.trim();
    if trimmed.is_empty() {
        return Err(StrataError::MalformedStext("empty output".into()));
    }

    let mut pages = Vec::new();
    for value in serde_json::Deserializer::from_str(trimmed).into_iter::<Value>() {
        let value = value.map_err(|e| StrataError::MalformedStext(e.to_string()))?;
        let is_document = match &value {
            Value::Object(map) if map.contains_key("pages") => true,
            Value::Object(map) if map.contains_key("blocks") => false,
            _ => {
                return Err(StrataError::MalformedStext(
                    "expected an object with \"pages\" or \"blocks\"".into(),
                ))
            }
        };

        if is_document {
            let doc: StextDocument = serde_json::from_value(value)
                .map_err(|e| StrataError::MalformedStext(e.to_string()))?;
            pages.extend(doc.pages);
        } else {
            let page: Page = serde_json::from_value(value)
                .map_err(|e| StrataError::MalformedStext(e.to_string()))?;
            pages.push(page);
        }
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;

    const SAMPLE: &str = r#"{
      "pages": [
        {
          "blocks": [
            {
              "type": "text",
              "bbox": { "x": 72, "y": 70, "w": 200, "h": 24 },
              "lines": [
                {
                  "wmode": 0,
                  "bbox": { "x": 72, "y": 70, "w": 200, "h": 24 },
                  "font": { "name": "Helvetica-Bold", "family": "sans-serif", "weight": "bold", "style": "normal", "size": 20.0 },
                  "x": 72, "y": 88,
                  "text": "Resume Title"
                }
              ]
            },
            { "type": "image", "bbox": { "x": 400, "y": 60, "w": 80, "h": 80 } },
            {
              "type": "text",
              "bbox": { "x": 72, "y": 120, "w": 400, "h": 30 },
              "lines": [
                { "font": { "size": 10.5 }, "text": "Line one" },
                { "font": { "size": 10.5 }, "text": "line two" }
              ]
            }
          ]
        },
        { "blocks": [] }
      ]
    }"#;

    #[test]
    fn test_parse_document() {
        let pages = parse_stext(SAMPLE).unwrap();
        assert_eq!(pages.len(), 2);

        let first = &pages[0];
        assert_eq!(first.blocks.len(), 3);
        assert_eq!(first.blocks[0].kind, BlockKind::Text);
        assert_eq!(first.blocks[0].lines[0].font.name, "Helvetica-Bold");
        assert_eq!(first.blocks[0].lines[0].size(), 20.0);
        assert_eq!(first.blocks[1].kind, BlockKind::Other);
        assert!(first.blocks[1].lines.is_empty());
        assert_eq!(first.text_blocks().count(), 2);
        assert_eq!(first.blocks[2].joined_text(), "Line one line two");

        assert!(pages[1].blocks.is_empty());
    }

    #[test]
    fn test_parse_page_stream() {
        let json = r#"
            {"blocks":[{"type":"text","lines":[{"font":{"size":12},"text":"a"}]}]}
            {"blocks":[{"type":"text","lines":[{"font":{"size":12},"text":"b"}]}]}
        "#;
        let pages = parse_stext(json).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].blocks[0].lines[0].text, "b");
    }

    #[test]
    fn test_unknown_block_type_is_other() {
        let json = r#"{"pages":[{"blocks":[{"type":"vector"},{"type":"grid"}]}]}"#;
        let pages = parse_stext(json).unwrap();
        assert!(pages[0].blocks.iter().all(|b| b.kind == BlockKind::Other));
    }

    #[test]
    fn test_malformed_payload() {
        let err = parse_stext(r#"{"pages": [ {"blocks": [ "#).unwrap_err();
        assert!(matches!(err, StrataError::MalformedStext(_)));
        assert!(matches!(
            parse_stext("  \n").unwrap_err(),
            StrataError::MalformedStext(_)
        ));
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        for json in [
            r#"{"pages":"oops"}"#,
            r#"{"file":"x.pdf","pages":[{"blocks":[{"type":"text","lines":[{"font":{"size":"12"},"text":"Heading"}]}]}]}"#,
            r#"{"blocks":[{"type":"text","lines":"none"}]}"#,
            r#"{"file":"x.pdf"}"#,
            r#"[1, 2, 3]"#,
        ] {
            let err = parse_stext(json).unwrap_err();
            assert!(matches!(err, StrataError::MalformedStext(_)), "{json}: {err}");
        }
    }

    #[test]
    fn test_block_without_type_is_not_text() {
        let json = r#"{"pages":[{"blocks":[{"lines":[{"font":{"size":30},"text":"Ghost"}]}]}]}"#;
        let pages = parse_stext(json).unwrap();
        assert_eq!(pages[0].blocks[0].kind, BlockKind::Other);
        assert_eq!(pages[0].text_blocks().count(), 0);
    }
}
