//! Message body formatting
//!
//! Every chat message body passes through the same pipeline before display:
//! escape angle brackets, linkify URLs, split into paragraphs on blank
//! lines. The order is load-bearing: escaping runs before linkification so
//! the injected anchor markup is never re-escaped, and the paragraph split
//! runs last so an anchor is never cut across a paragraph boundary.

use regex::Regex;
use std::sync::LazyLock;

/// URL pattern, applied to the already-escaped text. Escaped entities
/// adjacent to a URL contain no whitespace and are absorbed into the link.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s]+").expect("URL pattern is valid"));

/// A formatted message body: one or more paragraphs of spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    pub paragraphs: Vec<Paragraph>,
}

/// One paragraph of a message body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    pub spans: Vec<Span>,
}

/// A run of text or a linkified URL. Both hold the escaped representation;
/// use [`Span::display_text`] for what a reader should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Link(String),
}

impl MessageBody {
    /// Run the full pipeline over a raw message body.
    pub fn from_text(text: &str) -> Self {
        let escaped = escape_markup(text);
        let spans = linkify(&escaped);
        split_paragraphs(spans)
    }

    /// Markup projection: one `<p>` element per paragraph, links as anchors
    /// that open in a new browsing context without opener access.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for paragraph in &self.paragraphs {
            html.push_str("<p>");
            for span in &paragraph.spans {
                match span {
                    Span::Text(text) => html.push_str(text),
                    Span::Link(url) => {
                        html.push_str("<a href=\"");
                        html.push_str(url);
                        html.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                        html.push_str(url);
                        html.push_str("</a>");
                    }
                }
            }
            html.push_str("</p>");
        }
        html
    }

    /// Plain projection for non-markup surfaces: one string per paragraph,
    /// entities decoded. Single newlines survive inside a paragraph.
    pub fn display_paragraphs(&self) -> Vec<String> {
        self.paragraphs.iter().map(Paragraph::display_text).collect()
    }
}

impl Paragraph {
    /// The paragraph's spans joined, entities decoded.
    pub fn display_text(&self) -> String {
        self.spans.iter().map(Span::display_text).collect()
    }
}

impl Span {
    /// What a reader should see for this span.
    pub fn display_text(&self) -> String {
        match self {
            Span::Text(text) => decode_entities(text),
            Span::Link(url) => decode_entities(url),
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Span::Link(_))
    }
}

/// Escape the two markup metacharacters. `&` is deliberately left alone,
/// so the only entities a body can contain are the two produced here;
/// `decode_entities` relies on that.
fn escape_markup(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<").replace("&gt;", ">")
}

/// Split escaped text into text and link spans.
fn linkify(escaped: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;
    for m in URL_PATTERN.find_iter(escaped) {
        if m.start() > last {
            spans.push(Span::Text(escaped[last..m.start()].to_string()));
        }
        spans.push(Span::Link(m.as_str().to_string()));
        last = m.end();
    }
    if last < escaped.len() {
        spans.push(Span::Text(escaped[last..].to_string()));
    }
    spans
}

/// Split a flat span run into paragraphs on `\n\n` boundaries. Only text
/// spans can contain whitespace, so links are never split. Empty fragments
/// become empty paragraphs, matching the flat-string split they replace.
fn split_paragraphs(spans: Vec<Span>) -> MessageBody {
    let mut paragraphs = Vec::new();
    let mut current = Paragraph::default();

    for span in spans {
        match span {
            Span::Link(url) => current.spans.push(Span::Link(url)),
            Span::Text(text) => {
                let mut pieces = text.split("\n\n");
                if let Some(first) = pieces.next() {
                    if !first.is_empty() {
                        current.spans.push(Span::Text(first.to_string()));
                    }
                }
                for piece in pieces {
                    paragraphs.push(std::mem::take(&mut current));
                    if !piece.is_empty() {
                        current.spans.push(Span::Text(piece.to_string()));
                    }
                }
            }
        }
    }

    paragraphs.push(current);
    MessageBody { paragraphs }
}
