//! Split the sentence-selection output into one sentence per line.
//!
//! The model is asked for N sentences but nothing enforces that it returns
//! exactly N lines. Whatever non-empty lines come back are used, in order.
//!
//! Models often number or bullet their answer (`1. ...`, `- ...`). Those
//! markers are stripped so the question prompts see only the sentence. A line
//! that is nothing but a marker is kept as-is, so the sentence count always
//! equals the number of non-empty lines.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*•]|\d{1,3}[.)])\s+").unwrap());

/// Split `raw` on newlines, dropping blank lines.
pub fn split_sentences(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_list_marker)
        .collect()
}

fn strip_list_marker(line: &str) -> String {
    let stripped = RE_LIST_MARKER.replace(line, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        line.to_string()
    } else {
        stripped.to_string()
    }
}
