//! Item heading extraction from normalized filing text.
//!
//! Scans plain text for headings of the form "Item 2.02 ..." and produces one
//! [`ExtractedItem`] per distinct section code, in first-occurrence order.
//! There is no failure mode: text with no headings yields an empty sequence.

use eightk_core::ExtractedItem;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximum number of source characters captured into a snippet.
pub const SNIPPET_MAX_CHARS: usize = 800;

/// Maximum number of lines kept in a snippet.
pub const SNIPPET_MAX_LINES: usize = 8;

// The word "item", whitespace, a numeric code like "8.01", optional
// punctuation/whitespace separators, then up to 120 characters of title text.
static ITEM_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)item\s+(\d+(?:\.\d+)?)[\s:\-–—]*([^\n]{0,120})").expect("valid regex")
});

/// Scan text for item headings.
///
/// Matches are non-overlapping, left to right. A section code is recorded at
/// most once per text (first occurrence wins). Each item carries the raw
/// title guess from the heading line, the resolved category label, and an
/// excerpt of up to [`SNIPPET_MAX_CHARS`] characters and
/// [`SNIPPET_MAX_LINES`] lines starting at the heading.
///
/// Pure function: repeated calls on different inputs never interfere.
#[must_use]
pub fn extract_items(text: &str) -> Vec<ExtractedItem> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();

    for caps in ITEM_HEADING.captures_iter(text) {
        let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let code = code.as_str().trim();
        if code.is_empty() || !seen.insert(code.to_string()) {
            continue;
        }

        found.push(ExtractedItem {
            code: code.to_string(),
            title_guess: caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
            label: item_label(code).to_string(),
            snippet: snippet_at(text, whole.start()),
        });
    }

    found
}

/// Take the bounded excerpt starting at a heading's position.
fn snippet_at(text: &str, start: usize) -> String {
    let window: String = text[start..].chars().take(SNIPPET_MAX_CHARS).collect();
    window
        .lines()
        .take(SNIPPET_MAX_LINES)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

// =============================================================================
// Item Label Rules
// =============================================================================

/// Label for codes no rule matches.
const GENERIC_LABEL: &str = "other provisions";

/// Ordered prefix-to-label rules, first match wins.
///
/// Evaluation order is load-bearing: the multi-segment prefixes must come
/// before the single-digit fallbacks, or "5.02" would resolve to the generic
/// governance label instead of the officer/director one.
const LABEL_RULES: &[(&str, &str)] = &[
    ("2.02", "results of operations and financial condition"),
    ("2.03", "material debt or financing obligations"),
    ("2.05", "impairments and restructuring"),
    ("5.02", "officer and director changes"),
    ("5.07", "shareholder vote results"),
    ("8.01", "other material events"),
    ("7.01", "Regulation FD disclosure"),
    ("9.01", "financial statements and exhibits"),
    ("1", "registration and reporting matters"),
    ("3", "securities and markets"),
    ("4", "accounting and financial matters"),
    ("5", "governance and other matters"),
];

/// Resolve the human-readable category label for a section code.
#[must_use]
pub fn item_label(code: &str) -> &'static str {
    LABEL_RULES
        .iter()
        .find(|(prefix, _)| code.starts_with(prefix))
        .map_or(GENERIC_LABEL, |(_, label)| *label)
}
