// file: src/exporter/docx.rs
// description: walks the markup tree and emits typed docx paragraphs and runs
// reference: wordprocessingml paragraph/run model

use crate::models::docx::QUOTE_INDENT_TWIPS;
use crate::models::{Block, DocxParagraph, DocxRun, MarkupTree, ParagraphKind};
use tracing::{debug, warn};

pub struct DocxExporter;

impl DocxExporter {
    pub fn new() -> Self {
        Self
    }

    /// Always yields at least one paragraph.
    pub fn export(&self, tree: &MarkupTree) -> Vec<DocxParagraph> {
        let mut paragraphs = Vec::with_capacity(tree.len());

        for block in tree.iter() {
            match block {
                Block::Heading { level, text } => paragraphs.push(DocxParagraph::new(
                    ParagraphKind::Heading(*level),
                    vec![DocxRun::text(text.as_str())],
                )),
                Block::Paragraph { runs } => {
                    let runs: Vec<DocxRun> = runs
                        .iter()
                        .filter(|run| !run.is_blank())
                        .map(|run| DocxRun {
                            text: run.text.clone(),
                            bold: run.bold,
                            italic: run.italic,
                            underline: run.underline,
                        })
                        .collect();

                    if runs.is_empty() {
                        paragraphs.push(DocxParagraph::empty());
                    } else {
                        paragraphs.push(DocxParagraph::new(ParagraphKind::Normal, runs));
                    }
                }
                Block::List { kind, items } => {
                    paragraphs.extend(
                        items
                            .iter()
                            .map(|item| DocxParagraph::list_entry(*kind, item.as_str())),
                    );
                }
                Block::Quote { text } => paragraphs.push(
                    DocxParagraph::new(
                        ParagraphKind::Normal,
                        vec![DocxRun::text(text.as_str()).italic()],
                    )
                    .with_indent(QUOTE_INDENT_TWIPS),
                ),
                Block::LineBreak => paragraphs.push(DocxParagraph::empty()),
                Block::Unsupported { tag, .. } => {
                    warn!("Skipping unsupported <{}> block in DOCX export", tag);
                }
            }
        }

        if paragraphs.is_empty() {
            debug!("Nothing to export, emitting a single empty paragraph");
            paragraphs.push(DocxParagraph::empty());
        }

        paragraphs
    }
}

impl Default for DocxExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::docx::DEFAULT_NUMBERING;
    use crate::models::{HeadingLevel, ListKind, Run};
    use crate::parser::MarkupParser;
    use pretty_assertions::assert_eq;

    fn export(markup: &str) -> Vec<DocxParagraph> {
        DocxExporter::new().export(&MarkupParser::new().parse(markup))
    }

    #[test]
    fn test_empty_tree_yields_one_empty_paragraph() {
        let paragraphs = DocxExporter::new().export(&MarkupTree::default());
        assert_eq!(paragraphs, vec![DocxParagraph::empty()]);
        assert!(paragraphs[0].is_empty());
    }

    #[test]
    fn test_headings_are_plain_text() {
        assert_eq!(
            export("<h1>Big <b>news</b></h1><h2>Small</h2>"),
            vec![
                DocxParagraph::new(
                    ParagraphKind::Heading(HeadingLevel::H1),
                    vec![DocxRun::text("Big news")]
                ),
                DocxParagraph::new(
                    ParagraphKind::Heading(HeadingLevel::H2),
                    vec![DocxRun::text("Small")]
                ),
            ]
        );
    }

    #[test]
    fn test_bold_italic_run_keeps_both_flags() {
        let paragraphs = export("<p>Plain <strong><em>loud</em></strong></p>");
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(
            paragraphs[0].runs,
            vec![
                DocxRun::text("Plain "),
                DocxRun {
                    text: "loud".into(),
                    bold: true,
                    italic: true,
                    underline: false
                },
            ]
        );
    }

    #[test]
    fn test_blank_paragraph_keeps_spacing() {
        assert_eq!(export("<p><br></p>"), vec![DocxParagraph::empty()]);
        let tree = MarkupTree::new(vec![Block::Paragraph {
            runs: vec![Run::plain("   ")],
        }]);
        assert_eq!(DocxExporter::new().export(&tree), vec![DocxParagraph::empty()]);
    }

    #[test]
    fn test_lists_are_one_paragraph_per_item() {
        let tree = MarkupTree::new(vec![
            Block::list(ListKind::Bullet, vec!["a".into(), "b".into()]),
            Block::list(ListKind::Numbered, vec!["one".into()]),
        ]);
        let paragraphs = DocxExporter::new().export(&tree);

        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0].kind, ParagraphKind::Bullet { level: 0 });
        assert_eq!(paragraphs[1].text(), "b");
        assert_eq!(
            paragraphs[2].kind,
            ParagraphKind::Numbered {
                reference: DEFAULT_NUMBERING.to_string(),
                level: 0
            }
        );
    }

    #[test]
    fn test_quote_is_italic_and_indented() {
        let paragraphs = export("<blockquote>Be brief</blockquote>");
        assert_eq!(paragraphs[0].indent_left, Some(720));
        assert!(paragraphs[0].runs[0].italic);
        assert_eq!(paragraphs[0].text(), "Be brief");
    }

    #[test]
    fn test_line_break_and_unsupported() {
        assert_eq!(export("<br>"), vec![DocxParagraph::empty()]);
        assert_eq!(export("<table><tr><td>x</td></tr></table>"), vec![DocxParagraph::empty()]);
        assert_eq!(export("<h3>x</h3><p>kept</p>").len(), 1);
    }
}
