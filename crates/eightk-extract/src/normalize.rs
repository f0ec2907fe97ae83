//! Markup-to-text normalization.
//!
//! A best-effort, lossy transform: good enough for heading extraction, not a
//! validating markup parser. Malformed input degrades the output but never
//! fails.

use html_escape::decode_html_entities;
use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_BLOCKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*?</script>").expect("valid regex"));
static STYLE_BLOCKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style.*?</style>").expect("valid regex"));
static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</p>|</div>|</li>").expect("valid regex"));
static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static TRAILING_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("valid regex"));
static EXTRA_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Convert raw filing markup to plain text suitable for heading scanning.
///
/// Script and style blocks are dropped entirely; line-break tags and closing
/// paragraph/div/list-item tags become newlines; remaining tags are stripped
/// keeping their enclosed text; entities are decoded; whitespace is tidied
/// (non-breaking spaces to plain spaces, no trailing blanks before newlines,
/// at most one empty line in a row) and the result is trimmed.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let text = SCRIPT_BLOCKS.replace_all(html, "");
    let text = STYLE_BLOCKS.replace_all(&text, "");
    let text = LINE_BREAKS.replace_all(&text, "\n");
    let text = TAGS.replace_all(&text, "");
    let text = decode_html_entities(&text);
    let text = text.replace('\u{a0}', " ");
    let text = TRAILING_WS.replace_all(&text, "\n");
    let text = EXTRA_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}
