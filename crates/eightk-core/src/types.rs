//! Core data types for the filing digest pipeline.
//!
//! This module defines the entities that flow through a single request:
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`Cik`] - SEC filer identifier
//! - [`LookbackWindow`] - Clamped recency window in days
//! - [`SubmissionHistory`] - A filer's filing index
//! - [`FilingReference`] - One discovered filing document
//! - [`ExtractedItem`] - One item heading found in a filing
//! - [`FilingSummary`] - Rendered digest text for one filing
//! - [`FilingDigest`] - A filing together with its items and summary
//! - [`SymbolReport`] - Per-symbol processing result
//!
//! Nothing here is mutated after construction; every value is created and
//! discarded within one request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A SEC Central Index Key, stored zero-padded to 10 digits.
///
/// The padded form is what the submissions endpoint expects in its URL path;
/// the archive path for individual documents uses the unpadded integer form,
/// available via [`Cik::as_number`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cik(String);

impl Cik {
    /// Creates a CIK from any digit string, zero-padding to 10 digits.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(format!("{:0>10}", raw.into()))
    }

    /// Creates a CIK from the integer form used in archive paths.
    #[must_use]
    pub fn from_number(n: u64) -> Self {
        Self(format!("{n:010}"))
    }

    /// Returns the zero-padded 10-digit form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the unpadded integer form.
    #[must_use]
    pub fn as_number(&self) -> u64 {
        self.0.trim_start_matches('0').parse().unwrap_or(0)
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Smallest accepted lookback window, in days.
pub const MIN_LOOKBACK_DAYS: i64 = 1;

/// Largest accepted lookback window, in days.
pub const MAX_LOOKBACK_DAYS: i64 = 30;

/// A recency window in days, clamped to `[1, 30]` on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookbackWindow(i64);

impl LookbackWindow {
    /// Creates a window, clamping the day count into the accepted range.
    #[must_use]
    pub fn new(days: i64) -> Self {
        Self(days.clamp(MIN_LOOKBACK_DAYS, MAX_LOOKBACK_DAYS))
    }

    /// Returns the day count.
    #[must_use]
    pub const fn days(&self) -> i64 {
        self.0
    }
}

impl Default for LookbackWindow {
    fn default() -> Self {
        Self(MIN_LOOKBACK_DAYS)
    }
}

/// One row of a filer's filing index, as reported by the submissions
/// endpoint. Dates are kept in their raw `YYYY-MM-DD` string form; parsing
/// happens when the recency filter runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmissionEntry {
    /// Form type (e.g. "8-K", "8-K/A", "10-Q").
    pub form: String,
    /// Filing date string as reported by the index.
    pub filing_date: String,
    /// Report date string, if the index carries one.
    pub report_date: Option<String>,
    /// Accession number with internal hyphens (e.g. "0000320193-24-000001").
    pub accession_number: String,
    /// Primary document filename within the submission.
    pub primary_document: String,
}

/// A filer's submission history: the integer CIK the index reports for
/// itself plus its filing rows in index order (typically most-recent-first).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmissionHistory {
    /// Integer CIK as reported by the submissions document.
    pub cik: u64,
    /// Filing rows in source index order.
    pub entries: Vec<SubmissionEntry>,
}

/// One filing document discovered in a filer's index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingReference {
    /// Form type of the filing.
    pub form: String,
    /// Date the filing was submitted.
    pub filing_date: NaiveDate,
    /// Date of the reported event, if known.
    pub report_date: Option<NaiveDate>,
    /// Canonical URL of the primary document.
    pub doc_url: String,
}

/// One item section found in a filing's text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedItem {
    /// Section code exactly as matched (e.g. "2.02").
    pub code: String,
    /// Same-line text following the heading; may be empty.
    pub title_guess: String,
    /// Human-readable category label resolved from the code.
    pub label: String,
    /// Bounded excerpt starting at the heading.
    pub snippet: String,
}

/// Rendered digest text for one filing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilingSummary {
    /// One-line headline.
    pub title: String,
    /// Full formatted digest body.
    pub body: String,
}

/// A filing together with its extracted items and rendered summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilingDigest {
    /// The filing this digest was built from.
    #[serde(flatten)]
    pub reference: FilingReference,
    /// Items in first-occurrence order.
    pub items: Vec<ExtractedItem>,
    /// Rendered digest.
    pub summary: FilingSummary,
}

/// Outcome of processing one filing document.
///
/// A skipped filing is omitted from rendered output; the skip itself is
/// recorded here with its reason.
#[derive(Clone, Debug, PartialEq)]
pub enum FilingOutcome {
    /// The document was fetched and digested.
    Digested(FilingDigest),
    /// The document could not be digested and was dropped from output.
    Skipped {
        /// URL of the document that was skipped.
        doc_url: String,
        /// Why the filing was dropped.
        reason: String,
    },
}

impl FilingOutcome {
    /// Returns the digest if this filing was digested.
    #[must_use]
    pub fn digest(&self) -> Option<&FilingDigest> {
        match self {
            Self::Digested(digest) => Some(digest),
            Self::Skipped { .. } => None,
        }
    }

    /// Returns true if this filing was skipped.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// How processing ended for one requested symbol.
#[derive(Clone, Debug)]
pub enum SymbolOutcome {
    /// The symbol resolved to a filer and its filings were processed.
    Resolved {
        /// The filer identifier the symbol resolved to.
        cik: Cik,
        /// Per-filing outcomes in filing index order.
        filings: Vec<FilingOutcome>,
    },
    /// The symbol could not be processed.
    Failed {
        /// Why the symbol failed.
        error: String,
    },
}

/// Per-symbol processing result.
#[derive(Clone, Debug)]
pub struct SymbolReport {
    /// The requested symbol.
    pub symbol: Symbol,
    /// The window the query ran with.
    pub window: LookbackWindow,
    /// How processing ended.
    pub outcome: SymbolOutcome,
}

impl SymbolReport {
    /// Creates a report for a symbol that resolved and was processed.
    #[must_use]
    pub fn resolved(
        symbol: Symbol,
        window: LookbackWindow,
        cik: Cik,
        filings: Vec<FilingOutcome>,
    ) -> Self {
        Self {
            symbol,
            window,
            outcome: SymbolOutcome::Resolved { cik, filings },
        }
    }

    /// Creates a report for a symbol that failed.
    #[must_use]
    pub fn failed(symbol: Symbol, window: LookbackWindow, error: impl Into<String>) -> Self {
        Self {
            symbol,
            window,
            outcome: SymbolOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// Returns the successfully digested filings, in filing index order.
    #[must_use]
    pub fn digests(&self) -> Vec<&FilingDigest> {
        match &self.outcome {
            SymbolOutcome::Resolved { filings, .. } => {
                filings.iter().filter_map(FilingOutcome::digest).collect()
            }
            SymbolOutcome::Failed { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_is_uppercased() {
        let symbol = Symbol::new("aapl");
        assert_eq!(symbol.as_str(), "AAPL");
    }

    #[test]
    fn cik_is_zero_padded() {
        let cik = Cik::new("320193");
        assert_eq!(cik.as_str(), "0000320193");
        assert_eq!(cik.as_str().len(), 10);
        assert_eq!(cik.as_number(), 320193);
    }

    #[test]
    fn cik_from_number_round_trips() {
        let cik = Cik::from_number(1318605);
        assert_eq!(cik.as_str(), "0001318605");
        assert_eq!(cik.as_number(), 1318605);
    }

    #[test]
    fn window_clamps_below_and_above() {
        assert_eq!(LookbackWindow::new(0).days(), 1);
        assert_eq!(LookbackWindow::new(500).days(), 30);
        assert_eq!(LookbackWindow::new(7).days(), 7);
        assert_eq!(LookbackWindow::default().days(), 1);
    }

    #[test]
    fn digest_serializes_with_wire_field_names() {
        let digest = FilingDigest {
            reference: FilingReference {
                form: "8-K".to_string(),
                filing_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                report_date: None,
                doc_url: "https://www.sec.gov/Archives/edgar/data/320193/x/doc.htm".to_string(),
            },
            items: vec![ExtractedItem {
                code: "2.02".to_string(),
                title_guess: "Results".to_string(),
                label: "results of operations and financial condition".to_string(),
                snippet: "Item 2.02 Results".to_string(),
            }],
            summary: FilingSummary {
                title: "t".to_string(),
                body: "b".to_string(),
            },
        };

        let value = serde_json::to_value(&digest).unwrap();
        assert_eq!(value["form"], "8-K");
        assert_eq!(value["filingDate"], "2024-03-01");
        assert!(value["reportDate"].is_null());
        assert!(value["docUrl"].as_str().unwrap().contains("320193"));
        assert_eq!(value["items"][0]["titleGuess"], "Results");
        assert_eq!(value["summary"]["title"], "t");
    }

    #[test]
    fn skipped_outcome_is_observable() {
        let outcome = FilingOutcome::Skipped {
            doc_url: "https://example.invalid/doc.htm".to_string(),
            reason: "document unavailable".to_string(),
        };
        assert!(outcome.is_skipped());
        assert!(outcome.digest().is_none());
    }
}
