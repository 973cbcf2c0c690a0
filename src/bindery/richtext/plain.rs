use super::{render, Flags, FormatSink};

/// Flattens traversal events into lines of text, one per paragraph.
#[derive(Debug, Default)]
pub struct PlainTextSink {
    lines: Vec<String>,
}

impl PlainTextSink {
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

impl FormatSink for PlainTextSink {
    fn begin_paragraph(&mut self) {
        self.lines.push(String::new());
    }

    fn run(&mut self, text: &str, _flags: Flags) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        if let Some(line) = self.lines.last_mut() {
            line.extend(text.chars().map(|c| if c == '\u{a0}' { ' ' } else { c }));
        }
    }

    fn end_paragraph(&mut self) {
        if let Some(line) = self.lines.last_mut() {
            let trimmed = line.trim_end().len();
            line.truncate(trimmed);
        }
    }
}

/// Markup to plain text: paragraphs joined by `\n`, no formatting markers.
pub fn plain_text(markup: &str) -> String {
    let mut sink = PlainTextSink::default();
    render::render(markup, &mut sink);
    sink.finish()
}

/// Whitespace-delimited token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
