// file: src/exporter/packer.rs
// description: packs docx paragraphs into a binary .docx package off the async runtime
// reference: https://docs.rs/docx-rs

use crate::error::{EditorError, Result};
use crate::models::{DocxParagraph, DocxRun, HeadingLevel, ParagraphKind};
use docx_rs::{
    AbstractNumbering, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat, Numbering,
    NumberingId, Paragraph, Run, Start, Style, StyleType,
};
use std::io::Cursor;
use tracing::{debug, info};

// Numbering id 1 is left to the library's defaults
const BULLET_NUMBERING_ID: usize = 2;
const DECIMAL_NUMBERING_ID: usize = 3;

pub struct DocxPackager;

impl DocxPackager {
    pub fn new() -> Self {
        Self
    }

    pub fn pack(&self, paragraphs: &[DocxParagraph]) -> Result<Vec<u8>> {
        let mut docx = base_document();

        for paragraph in paragraphs {
            docx = docx.add_paragraph(build_paragraph(paragraph));
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| EditorError::ExportPackaging(e.to_string()))?;

        let bytes = buffer.into_inner();
        debug!(
            "Packed {} paragraphs into {} bytes",
            paragraphs.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Runs [`DocxPackager::pack`] on the blocking pool and resolves once with
    /// the package or the packaging failure.
    pub async fn pack_async(&self, paragraphs: Vec<DocxParagraph>) -> Result<Vec<u8>> {
        info!("Packing DOCX with {} paragraphs", paragraphs.len());

        tokio::task::spawn_blocking(move || DocxPackager::new().pack(&paragraphs))
            .await
            .map_err(|e| EditorError::Task(format!("DOCX packing task failed: {}", e)))?
    }
}

impl Default for DocxPackager {
    fn default() -> Self {
        Self::new()
    }
}

fn base_document() -> Docx {
    Docx::new()
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_style(
            Style::new("Heading2", StyleType::Paragraph)
                .name("Heading 2")
                .size(26)
                .bold(),
        )
        .add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("\u{2022}"),
            LevelJc::new("left"),
        )))
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
        .add_abstract_numbering(AbstractNumbering::new(DECIMAL_NUMBERING_ID).add_level(
            Level::new(
                0,
                Start::new(1),
                NumberFormat::new("decimal"),
                LevelText::new("%1."),
                LevelJc::new("left"),
            ),
        ))
        .add_numbering(Numbering::new(DECIMAL_NUMBERING_ID, DECIMAL_NUMBERING_ID))
}

fn build_paragraph(source: &DocxParagraph) -> Paragraph {
    let mut paragraph = Paragraph::new();

    paragraph = match &source.kind {
        ParagraphKind::Normal => paragraph,
        ParagraphKind::Heading(HeadingLevel::H1) => paragraph.style("Heading1"),
        ParagraphKind::Heading(HeadingLevel::H2) => paragraph.style("Heading2"),
        ParagraphKind::Bullet { level } => paragraph.numbering(
            NumberingId::new(BULLET_NUMBERING_ID),
            IndentLevel::new(*level),
        ),
        // every numbered entry shares the one decimal definition
        ParagraphKind::Numbered { level, .. } => paragraph.numbering(
            NumberingId::new(DECIMAL_NUMBERING_ID),
            IndentLevel::new(*level),
        ),
    };

    if let Some(left) = source.indent_left {
        paragraph = paragraph.indent(Some(left), None, None, None);
    }

    for run in &source.runs {
        paragraph = paragraph.add_run(build_run(run));
    }

    paragraph
}

fn build_run(source: &DocxRun) -> Run {
    let mut run = Run::new().add_text(source.text.as_str());
    if source.bold {
        run = run.bold();
    }
    if source.italic {
        run = run.italic();
    }
    if source.underline {
        run = run.underline("single");
    }
    run
}
