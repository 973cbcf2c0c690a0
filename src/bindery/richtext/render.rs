//! The one traversal shared by every output mode.
//!
//! Walks the parsed markup depth-first, carrying the inherited [`Flags`].
//! Formatting elements only ever add flags for their subtree. Block
//! elements and line breaks end the current paragraph when it has content;
//! the next text run opens a fresh one.

use super::parser::{self, Node, Tag};
use super::{Flags, FormatSink};

pub fn render<K: FormatSink + ?Sized>(markup: &str, sink: &mut K) {
    let nodes = parser::parse(markup);
    let mut walker = Walker {
        sink,
        open: false,
        trailing_space: false,
    };
    walker.walk(&nodes, Flags::default());
    walker.break_paragraph();
}

struct Walker<'a, K: FormatSink + ?Sized> {
    sink: &'a mut K,
    /// Whether a paragraph with content is currently open
    open: bool,
    /// Whether the last run in the open paragraph ended in a collapsed space
    trailing_space: bool,
}

impl<K: FormatSink + ?Sized> Walker<'_, K> {
    fn walk(&mut self, nodes: &[Node], flags: Flags) {
        for node in nodes {
            match node {
                Node::Text(text) => self.text(text, flags),
                Node::Element { tag, children } => match tag {
                    Tag::Block => {
                        self.break_paragraph();
                        self.walk(children, flags);
                        self.break_paragraph();
                    }
                    Tag::LineBreak => self.break_paragraph(),
                    Tag::Bold | Tag::Italic | Tag::Underline => {
                        self.walk(children, flags.with(*tag))
                    }
                    Tag::Other => self.walk(children, flags),
                },
            }
        }
    }

    fn text(&mut self, raw: &str, flags: Flags) {
        let collapsed = collapse_whitespace(raw);
        let text = if self.open && !self.trailing_space {
            collapsed.as_str()
        } else {
            collapsed.trim_start_matches(' ')
        };
        if text.is_empty() {
            return;
        }
        if !self.open {
            self.sink.begin_paragraph();
            self.open = true;
        }
        self.trailing_space = text.ends_with(' ');
        self.sink.run(text, flags);
    }

    fn break_paragraph(&mut self) {
        if self.open {
            self.sink.end_paragraph();
            self.open = false;
        }
        self.trailing_space = false;
    }
}

/// Source whitespace (newlines, tabs, runs of spaces) renders as one space.
/// Non-breaking spaces are content and are kept.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c') {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
