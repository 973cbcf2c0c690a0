//! # Rich-Text Formatting Engine
//!
//! Chapter content is stored as a small markup subset: `strong`/`b`,
//! `em`/`i`, `u`, the block separators `p` and `div`, and `br`. Everything
//! else is stripped down to its text and no attribute is ever interpreted.
//!
//! ## One traversal, many sinks
//!
//! [`render::render`] walks the parsed markup once and reports what it sees
//! to a [`FormatSink`]:
//!
//! ```text
//!   markup ──parse──▶ node tree ──walk──▶ FormatSink
//!                                           ├── DocumentBuilder  (structured paragraphs)
//!                                           ├── PlainTextSink    (search, statistics)
//!                                           └── DocumentBuilder  (combined, via `combine`)
//! ```
//!
//! The structured [`Document`] is then serialized by [`docx::to_docx`].
//!
//! ## Invariants
//!
//! - Flags only accumulate downwards: a run carries every flag set by its
//!   ancestors.
//! - Plain text never contains formatting markers.
//! - Malformed markup never errors; it only yields a coarser split.

pub mod docx;
pub mod parser;
pub mod plain;
pub mod render;

use parser::Tag;

/// Run-level formatting inherited from enclosing elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Flags {
    pub const BOLD: Flags = Flags {
        bold: true,
        italic: false,
        underline: false,
    };

    /// Union with whatever `tag` contributes.
    pub fn with(self, tag: Tag) -> Flags {
        match tag {
            Tag::Bold => Flags { bold: true, ..self },
            Tag::Italic => Flags {
                italic: true,
                ..self
            },
            Tag::Underline => Flags {
                underline: true,
                ..self
            },
            _ => self,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub flags: Flags,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A top-level element of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(Paragraph),
    SectionBreak,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }
}

/// Receiver of the traversal's paragraph and run events.
pub trait FormatSink {
    fn begin_paragraph(&mut self);
    fn run(&mut self, text: &str, flags: Flags);
    fn end_paragraph(&mut self);
}

/// Collects traversal events into a [`Document`].
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
    current: Option<Paragraph>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&mut self, title: &str) {
        self.document.blocks.push(Block::Heading(title.to_string()));
    }

    pub fn section_break(&mut self) {
        self.document.blocks.push(Block::SectionBreak);
    }

    pub fn finish(self) -> Document {
        self.document
    }
}

impl FormatSink for DocumentBuilder {
    fn begin_paragraph(&mut self) {
        self.current = Some(Paragraph::default());
    }

    fn run(&mut self, text: &str, flags: Flags) {
        let paragraph = self.current.get_or_insert_with(Paragraph::default);
        // Adjacent text with identical formatting is one run
        match paragraph.runs.last_mut() {
            Some(last) if last.flags == flags => last.text.push_str(text),
            _ => paragraph.runs.push(Run {
                text: text.to_string(),
                flags,
            }),
        }
    }

    fn end_paragraph(&mut self) {
        if let Some(paragraph) = self.current.take() {
            self.document.blocks.push(Block::Paragraph(paragraph));
        }
    }
}

/// Structured export of one chapter's markup.
pub fn structured(markup: &str) -> Document {
    let mut builder = DocumentBuilder::new();
    render::render(markup, &mut builder);
    builder.finish()
}

/// Combined export: a heading per chapter, its paragraphs, and a section
/// break between consecutive chapters.
pub fn combine<'a, I>(chapters: I) -> Document
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut builder = DocumentBuilder::new();
    for (i, (title, markup)) in chapters.into_iter().enumerate() {
        if i > 0 {
            builder.section_break();
        }
        builder.heading(title);
        render::render(markup, &mut builder);
    }
    builder.finish()
}

pub use plain::plain_text;
