//! Serialization of a [`Document`] into a `.docx` container.

use super::{Block, Document, Flags, Paragraph};
use crate::config::BinderyConfig;
use crate::error::{BinderyError, Result};
use docx_rs::{BreakType, Docx, Run, SpecialIndentType};
use std::io::Cursor;

/// Layout knobs for the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocxStyle {
    /// First-line indent in twips
    pub first_line_indent: i32,
    /// Heading size in half-points
    pub heading_size: usize,
}

impl Default for DocxStyle {
    fn default() -> Self {
        Self::from(&BinderyConfig::default())
    }
}

impl From<&BinderyConfig> for DocxStyle {
    fn from(config: &BinderyConfig) -> Self {
        Self {
            first_line_indent: config.first_line_indent,
            heading_size: config.heading_size,
        }
    }
}

pub fn to_docx(document: &Document, style: &DocxStyle) -> Result<Vec<u8>> {
    let docx = document
        .blocks
        .iter()
        .fold(Docx::new(), |docx, block| {
            docx.add_paragraph(block_paragraph(block, style))
        });

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| BinderyError::Export(e.to_string()))?;
    Ok(buf.into_inner())
}

fn block_paragraph(block: &Block, style: &DocxStyle) -> docx_rs::Paragraph {
    match block {
        Block::Heading(title) => docx_rs::Paragraph::new().add_run(
            Run::new()
                .add_text(title.as_str())
                .bold()
                .size(style.heading_size),
        ),
        Block::Paragraph(paragraph) => body_paragraph(paragraph, style),
        Block::SectionBreak => {
            docx_rs::Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
        }
    }
}

fn body_paragraph(paragraph: &Paragraph, style: &DocxStyle) -> docx_rs::Paragraph {
    paragraph
        .runs
        .iter()
        .fold(
            docx_rs::Paragraph::new().indent(
                None,
                Some(SpecialIndentType::FirstLine(style.first_line_indent)),
                None,
                None,
            ),
            |p, run| p.add_run(styled_run(&run.text, run.flags)),
        )
}

fn styled_run(text: &str, flags: Flags) -> Run {
    let mut run = Run::new().add_text(text);
    if flags.bold {
        run = run.bold();
    }
    if flags.italic {
        run = run.italic();
    }
    if flags.underline {
        run = run.underline("single");
    }
    run
}
