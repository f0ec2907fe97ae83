//! Digest rendering for one filing.
//!
//! Pure formatting: a filing plus its extracted items in, a titled text
//! digest out. All wording is fixed English; there is no localization and no
//! failure mode.

use eightk_core::{ExtractedItem, FilingReference, FilingSummary, LookbackWindow, Symbol};

/// Characters of the snippet shown when a heading had no usable title guess.
const SNIPPET_PREVIEW_CHARS: usize = 60;

/// Line rendered when no item headings were recognized.
const NO_ITEMS_LINE: &str =
    "• No recognizable item headings were found in this filing; read the source document for the full text.";

/// Topical tags appended to every digest.
const TOPIC_TAGS: &[&str] = &[
    "#SEC8K",
    "#USMarkets",
    "#MaterialEvents",
    "#FilingWatch",
    "#CorporateDisclosures",
];

/// Render the digest for one filing.
///
/// Each item becomes a bulleted line with its code, category label, and the
/// whitespace-collapsed title guess; a heading without a usable guess falls
/// back to the first [`SNIPPET_PREVIEW_CHARS`] characters of its excerpt.
/// Zero items render a single advisory line instead.
#[must_use]
pub fn render_summary(
    symbol: &Symbol,
    filing: &FilingReference,
    items: &[ExtractedItem],
    window: LookbackWindow,
) -> FilingSummary {
    let title = format!("[{}] 8-K highlights ({})", symbol, filing.filing_date);

    let item_lines = if items.is_empty() {
        NO_ITEMS_LINE.to_string()
    } else {
        items
            .iter()
            .map(bullet_line)
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = format!(
        "{title}\n\
         \n\
         Official 8-K disclosures (past {days} days), key items:\n\
         {item_lines}\n\
         \n\
         How to read this:\n\
         1) Prioritize 2.02 (results), 2.03 (debt/financing), 5.02 (management changes), 5.07 (vote results), and 8.01 (other material events).\n\
         2) Cross-check with 10-Q/10-K filings and investor materials; do not act on the digest alone.\n\
         3) This is not investment advice; the SEC source document is authoritative.\n\
         \n\
         Source: {doc_url}\n\
         \n\
         {tags}",
        days = window.days(),
        doc_url = filing.doc_url,
        tags = TOPIC_TAGS.join(" "),
    );

    FilingSummary { title, body }
}

fn bullet_line(item: &ExtractedItem) -> String {
    let guess = collapse_whitespace(&item.title_guess);
    let shown = if guess.is_empty() {
        item.snippet.chars().take(SNIPPET_PREVIEW_CHARS).collect()
    } else {
        guess
    };
    format!("• Item {} ({}): {}…", item.code, item.label, shown)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn filing() -> FilingReference {
        FilingReference {
            form: "8-K".to_string(),
            filing_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            report_date: None,
            doc_url: "https://www.sec.gov/Archives/edgar/data/320193/000032019324000010/a.htm"
                .to_string(),
        }
    }

    fn item(code: &str, title_guess: &str, label: &str, snippet: &str) -> ExtractedItem {
        ExtractedItem {
            code: code.to_string(),
            title_guess: title_guess.to_string(),
            label: label.to_string(),
            snippet: snippet.to_string(),
        }
    }

    #[test]
    fn titled_items_render_with_collapsed_whitespace() {
        let items = vec![item(
            "5.02",
            "Departure  of\n Directors",
            "officer and director changes",
            "Item 5.02 Departure of Directors",
        )];
        let summary = render_summary(&Symbol::new("ACME"), &filing(), &items, LookbackWindow::new(1));

        assert_eq!(summary.title, "[ACME] 8-K highlights (2024-03-10)");
        assert!(summary.body.contains(
            "• Item 5.02 (officer and director changes): Departure of Directors…"
        ));
    }

    #[test]
    fn untitled_items_fall_back_to_snippet_prefix() {
        let snippet = "Item 9.01 ".to_string() + &"x".repeat(200);
        let items = vec![item("9.01", "", "financial statements and exhibits", &snippet)];
        let summary = render_summary(&Symbol::new("ACME"), &filing(), &items, LookbackWindow::new(1));

        let expected: String = snippet.chars().take(SNIPPET_PREVIEW_CHARS).collect();
        assert!(summary.body.contains(&format!(
            "• Item 9.01 (financial statements and exhibits): {expected}…"
        )));
    }

    #[test]
    fn zero_items_render_the_advisory_line() {
        let summary = render_summary(&Symbol::new("ACME"), &filing(), &[], LookbackWindow::new(3));
        assert!(summary.body.contains("No recognizable item headings"));
        assert!(summary.body.contains("past 3 days"));
    }

    #[test]
    fn body_carries_source_url_and_tags() {
        let summary = render_summary(&Symbol::new("ACME"), &filing(), &[], LookbackWindow::new(1));
        assert!(summary.body.contains(&filing().doc_url));
        assert!(summary.body.contains("#SEC8K"));
        assert!(summary.body.starts_with(&summary.title));
    }
}
