//! Prompt assembly and marker-based response parsing.
//!
//! The model is told to answer with `TITLE:` and `CONTENT:` sections;
//! [`parse_response`] splits them back apart. Parsing is all-or-nothing:
//! without a `CONTENT:` marker the whole response is discarded.

use std::sync::LazyLock;

use regex::Regex;

/// Fixed trailer appended to every system prompt so the response can be
/// split mechanically.
pub const OUTPUT_FORMAT_FOOTER: &str = "Return ONLY the translated content in this exact format:\n\nTITLE: [translated title]\n\nCONTENT:\n[translated HTML content]";

static CONTENT_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)CONTENT:").unwrap());
static TITLE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)TITLE:[ \t]*([^\n]*)").unwrap());

pub fn build_system_prompt(instructions: &str) -> String {
    format!("{}\n\n{}", instructions.trim_end(), OUTPUT_FORMAT_FOOTER)
}

pub fn build_user_prompt(title: &str, body_html: &str) -> String {
    format!("Original Title: {title}\n\nOriginal Content:\n{body_html}")
}

/// Title and content split out of a raw model response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    pub title: String,
    pub content: String,
}

impl ParsedResponse {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}

/// Split a raw response on its markers.
///
/// The first `CONTENT:` marker anchors the split: everything after it,
/// trimmed, is the content. The title comes from the first `TITLE:`
/// line before that marker. A response without a `CONTENT:` marker
/// parses to an empty result, never to partial output.
pub fn parse_response(raw: &str) -> ParsedResponse {
    let content_match = match CONTENT_MARKER.find(raw) {
        Some(found) => found,
        None => return ParsedResponse::default(),
    };

    let content = raw[content_match.end()..].trim().to_string();

    let title = TITLE_MARKER
        .captures(&raw[..content_match.start()])
        .and_then(|caps| caps.get(1))
        .map(|line| line.as_str().trim().to_string())
        .unwrap_or_default();

    ParsedResponse { title, content }
}
