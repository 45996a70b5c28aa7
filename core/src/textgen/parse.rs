use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::textgen::error::{TextGenError, json_decode, json_not_found};

fn fenced_json_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").expect("fenced json pattern must compile")
    })
}

/// Finds the first JSON object in a free-form reply: a ```json fenced block
/// wins, otherwise the first balanced `{...}` span counted by brace depth.
pub fn find_json_block(raw: &str) -> Option<String> {
    if let Some(captures) = fenced_json_pattern().captures(raw) {
        return captures.get(1).map(|m| m.as_str().to_string());
    }

    let start = raw.find('{')?;
    let mut depth = 0usize;
    for (offset, ch) in raw[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(raw[start..start + offset + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

pub fn extract_json_value(raw: &str) -> Result<Value, TextGenError> {
    let block = find_json_block(raw)
        .ok_or_else(|| json_not_found("no balanced JSON object in reply").with_raw(raw))?;
    serde_json::from_str(&block)
        .map_err(|err| json_decode(format!("reply JSON failed to parse: {err}")).with_raw(raw))
}
