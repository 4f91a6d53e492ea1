//! Locates the JSON object inside a free-text model reply.
//!
//! Two lexical passes:
//! 1. Fence scan: the first ```json (or untagged) fenced block containing a `{`
//!    narrows the search to its body. Without one, the whole reply is searched.
//! 2. Brace scan: from each `{` that can open an object (next token `"` or `}`),
//!    walk to its matching `}` while honouring string literals and escapes.
//!    The first balanced span that parses as an object wins. Stray braces in
//!    prose are stepped over.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("model reply was empty")]
    Empty,

    #[error("no JSON object found in model reply")]
    NoJsonObject,

    #[error("JSON object in model reply is never closed")]
    Unterminated,

    #[error("model reply contains malformed JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

const FENCE: &str = "```";

/// Extracts the first JSON object from `raw`, preferring a fenced block.
pub fn extract_json(raw: &str) -> Result<Map<String, Value>, ExtractionError> {
    if raw.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }
    let candidate = fenced_body(raw).unwrap_or(raw);
    first_object(candidate)
}

/// Body of the first fenced block tagged `json` or untagged that holds a `{`.
/// An unclosed fence runs to the end of the text.
fn fenced_body(text: &str) -> Option<&str> {
    let mut rest = text;
    loop {
        let open = rest.find(FENCE)?;
        let after_ticks = &rest[open + FENCE.len()..];

        let tag_len = after_ticks
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(after_ticks.len());
        let tag = &after_ticks[..tag_len];
        let tail = &after_ticks[tag_len..];

        let (body, next) = match tail.find(FENCE) {
            Some(close) => (&tail[..close], &tail[close + FENCE.len()..]),
            None => (tail, ""),
        };

        if (tag.is_empty() || tag.eq_ignore_ascii_case("json")) && body.contains('{') {
            return Some(body);
        }
        rest = next;
    }
}

fn first_object(text: &str) -> Result<Map<String, Value>, ExtractionError> {
    let mut cursor = 0;
    let mut first_error: Option<serde_json::Error> = None;
    let mut saw_unclosed_stray = false;

    while let Some(offset) = text[cursor..].find('{') {
        let start = cursor + offset;

        // `{` not followed by `"` or `}` cannot open an object: prose like `{0-100 scale`.
        if !opens_object(&text[start + 1..]) {
            saw_unclosed_stray |= balanced_len(&text[start..]).is_none();
            cursor = start + 1;
            continue;
        }

        // An object opener that never closes swallows the rest of the text,
        // so anything after it would be a fragment of the truncated object.
        let Some(len) = balanced_len(&text[start..]) else {
            return Err(match first_error {
                Some(e) => ExtractionError::InvalidJson(e),
                None => ExtractionError::Unterminated,
            });
        };

        match serde_json::from_str::<Map<String, Value>>(&text[start..start + len]) {
            Ok(map) => return Ok(map),
            Err(e) => {
                first_error.get_or_insert(e);
                // Skip the whole span so nested objects are never returned alone.
                cursor = start + len;
            }
        }
    }

    Err(match first_error {
        Some(e) => ExtractionError::InvalidJson(e),
        None if saw_unclosed_stray => ExtractionError::Unterminated,
        None => ExtractionError::NoJsonObject,
    })
}

fn opens_object(after_brace: &str) -> bool {
    matches!(after_brace.trim_start().chars().next(), Some('"') | Some('}'))
}

/// Byte length of the balanced `{...}` span at the start of `text`.
fn balanced_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
