//! Tolerant parse of the chapter markup subset.
//!
//! The parser never fails. Unclosed elements are closed at end of input,
//! stray closing tags are ignored, attributes are skipped without being
//! interpreted, and a `<` that does not start a tag is kept as text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Bold,
    Italic,
    Underline,
    /// `p` and `div`: paragraph boundaries
    Block,
    LineBreak,
    /// Anything outside the allow-list; contributes only its text
    Other,
}

impl Tag {
    fn from_name(name: &str) -> Self {
        match name {
            "strong" | "b" => Tag::Bold,
            "em" | "i" => Tag::Italic,
            "u" => Tag::Underline,
            "p" | "div" => Tag::Block,
            "br" => Tag::LineBreak,
            _ => Tag::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element { tag: Tag, children: Vec<Node> },
    Text(String),
}

// Elements that never have content, whether or not they are written `<x/>`
const VOID_ELEMENTS: &[&str] = &[
    "br", "hr", "img", "input", "meta", "link", "wbr", "col", "area", "base", "source",
];

enum Token {
    Open { name: String, self_closing: bool },
    Close { name: String },
    Text(String),
}

struct Frame {
    name: String,
    tag: Tag,
    children: Vec<Node>,
}

pub fn parse(markup: &str) -> Vec<Node> {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for token in tokenize(markup) {
        match token {
            Token::Text(text) => {
                if !text.is_empty() {
                    current(&mut root, &mut stack).push(Node::Text(text));
                }
            }
            Token::Open { name, self_closing } => {
                let tag = Tag::from_name(&name);
                if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
                    current(&mut root, &mut stack).push(Node::Element {
                        tag,
                        children: Vec::new(),
                    });
                } else {
                    stack.push(Frame {
                        name,
                        tag,
                        children: Vec::new(),
                    });
                }
            }
            Token::Close { name } => {
                // Stray closers are dropped; otherwise unwind to the match
                if let Some(depth) = stack.iter().rposition(|f| f.name == name) {
                    while stack.len() > depth {
                        close_frame(&mut root, &mut stack);
                    }
                }
            }
        }
    }

    while !stack.is_empty() {
        close_frame(&mut root, &mut stack);
    }
    root
}

fn current<'a>(root: &'a mut Vec<Node>, stack: &'a mut [Frame]) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(frame) => &mut frame.children,
        None => root,
    }
}

fn close_frame(root: &mut Vec<Node>, stack: &mut Vec<Frame>) {
    if let Some(frame) = stack.pop() {
        current(root, stack).push(Node::Element {
            tag: frame.tag,
            children: frame.children,
        });
    }
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    while let Some(lt) = rest.find('<') {
        text.push_str(&rest[..lt]);
        let tail = &rest[lt..];

        if let Some(after) = tail.strip_prefix("<!--") {
            flush_text(&mut tokens, &mut text);
            rest = match after.find("-->") {
                Some(end) => &after[end + 3..],
                None => "",
            };
            continue;
        }

        match parse_tag(tail) {
            Some((token, consumed)) => {
                flush_text(&mut tokens, &mut text);
                if let Some(token) = token {
                    tokens.push(token);
                }
                rest = &tail[consumed..];
            }
            None => {
                text.push('<');
                rest = &tail[1..];
            }
        }
    }
    text.push_str(rest);
    flush_text(&mut tokens, &mut text);
    tokens
}

fn flush_text(tokens: &mut Vec<Token>, text: &mut String) {
    if !text.is_empty() {
        tokens.push(Token::Text(decode_entities(text)));
        text.clear();
    }
}

/// Parses a tag at the start of `input` (which begins with `<`).
///
/// Returns the token (None for declarations like `<!doctype>`) and the
/// number of bytes consumed, or None if this `<` is literal text.
fn parse_tag(input: &str) -> Option<(Option<Token>, usize)> {
    let body = &input[1..];
    let (closing, name_start) = match body.strip_prefix('/') {
        Some(stripped) => (true, stripped),
        None => (false, body),
    };

    let first = name_start.chars().next()?;
    if first == '!' || first == '?' {
        let end = find_tag_end(input).unwrap_or(input.len());
        return Some((None, end));
    }
    if !first.is_ascii_alphabetic() {
        return None;
    }

    let name_len = name_start
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(name_start.len());
    let name = name_start[..name_len].to_ascii_lowercase();

    // Unterminated tags swallow the rest of the input
    let end = find_tag_end(input).unwrap_or(input.len());
    let inner = input[..end].trim_end_matches('>');

    let token = if closing {
        Token::Close { name }
    } else {
        Token::Open {
            name,
            self_closing: inner.ends_with('/'),
        }
    };
    Some((Some(token), end))
}

/// Index just past the `>` closing the tag, honouring quoted attribute values.
fn find_tag_end(input: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi + 1)));
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    fn el(tag: Tag, children: Vec<Node>) -> Node {
        Node::Element { tag, children }
    }

    #[test]
    fn parses_nested_allow_listed_tags() {
        let nodes = parse("<p>Hello <strong>World</strong></p>");
        assert_eq!(
            nodes,
            vec![el(
                Tag::Block,
                vec![text("Hello "), el(Tag::Bold, vec![text("World")])]
            )]
        );
    }

    #[test]
    fn tag_names_are_case_insensitive_and_attributes_ignored() {
        let nodes = parse(r#"<EM class="x" onclick="alert('>')">hi</EM>"#);
        assert_eq!(nodes, vec![el(Tag::Italic, vec![text("hi")])]);
    }

    #[test]
    fn unknown_tags_keep_their_text() {
        let nodes = parse("<span style='color:red'>kept</span>");
        assert_eq!(nodes, vec![el(Tag::Other, vec![text("kept")])]);
    }

    #[test]
    fn br_is_void_with_or_without_slash() {
        let nodes = parse("a<br>b<br/>c");
        assert_eq!(
            nodes,
            vec![
                text("a"),
                el(Tag::LineBreak, vec![]),
                text("b"),
                el(Tag::LineBreak, vec![]),
                text("c"),
            ]
        );
    }

    #[test]
    fn unclosed_elements_close_at_end() {
        let nodes = parse("<p><b>bold");
        assert_eq!(
            nodes,
            vec![el(Tag::Block, vec![el(Tag::Bold, vec![text("bold")])])]
        );
    }

    #[test]
    fn stray_closing_tags_are_ignored() {
        let nodes = parse("a</b>b");
        assert_eq!(nodes, vec![text("a"), text("b")]);
    }

    #[test]
    fn closing_an_outer_tag_closes_inner_ones() {
        let nodes = parse("<p><i>x</p>y");
        assert_eq!(
            nodes,
            vec![el(Tag::Block, vec![el(Tag::Italic, vec![text("x")])]), text("y")]
        );
    }

    #[test]
    fn literal_less_than_is_text() {
        assert_eq!(parse("1 < 2"), vec![text("1 < 2")]);
    }

    #[test]
    fn comments_and_doctype_are_dropped() {
        assert_eq!(
            parse("<!doctype html><!-- note -->x"),
            vec![text("x")]
        );
    }

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(
            parse("a &amp; b &lt;c&gt; &#65;&#x42; &bogus;"),
            vec![text("a & b <c> AB &bogus;")]
        );
    }
}
