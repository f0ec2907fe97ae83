//! Digest orchestration across symbols and filings.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use eightk_core::{
    Cik, FilingDigest, FilingError, FilingOutcome, FilingReference, FilingSource, LookbackWindow,
    Result, Symbol, SymbolReport,
};
use eightk_edgar::recent_filings;
use eightk_extract::{extract_items, html_to_text};

use crate::render::render_summary;

/// Form-type prefix this service digests. "8-K/A" amendments match too.
const FORM_PREFIX: &str = "8-K";

/// Sequential digest pipeline over a filing source.
///
/// One [`run`](Self::run) handles one inbound request: the ticker map is
/// fetched once, then symbols and their filings are processed strictly in
/// order, one outbound fetch at a time. Nothing is cached between runs.
///
/// Failure severity is stratified per tier:
///
/// - ticker-map failure aborts the run (the caller gets an `Err`);
/// - an unresolved symbol or a failed submissions fetch fails that symbol
///   only, and never triggers further fetches for it;
/// - a failed document fetch skips that filing only, recorded as a
///   [`FilingOutcome::Skipped`] and omitted from rendered output.
#[derive(Debug)]
pub struct DigestService {
    source: Arc<dyn FilingSource>,
}

impl DigestService {
    /// Creates a service over the given filing source.
    #[must_use]
    pub fn new(source: Arc<dyn FilingSource>) -> Self {
        Self { source }
    }

    /// Digest the recent filings of each symbol, evaluating the recency
    /// window against the current time.
    pub async fn run(
        &self,
        symbols: &[Symbol],
        window: LookbackWindow,
    ) -> Result<Vec<SymbolReport>> {
        self.run_at(symbols, window, Utc::now()).await
    }

    /// Deterministic variant of [`run`](Self::run): the recency window is
    /// evaluated against the supplied instant.
    pub async fn run_at(
        &self,
        symbols: &[Symbol],
        window: LookbackWindow,
        now: DateTime<Utc>,
    ) -> Result<Vec<SymbolReport>> {
        let map = self.source.ticker_map().await?;

        let mut reports = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            reports.push(self.digest_symbol(&map, symbol, window, now).await);
        }
        Ok(reports)
    }

    async fn digest_symbol(
        &self,
        map: &HashMap<String, Cik>,
        symbol: &Symbol,
        window: LookbackWindow,
        now: DateTime<Utc>,
    ) -> SymbolReport {
        let Some(cik) = map.get(symbol.as_str()) else {
            debug!(symbol = %symbol, "Symbol has no CIK mapping");
            return SymbolReport::failed(
                symbol.clone(),
                window,
                FilingError::SymbolNotFound(symbol.to_string()).to_string(),
            );
        };

        let history = match self.source.submissions(cik).await {
            Ok(history) => history,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Submission history fetch failed");
                return SymbolReport::failed(symbol.clone(), window, e.to_string());
            }
        };

        let filings = recent_filings(&history, FORM_PREFIX, window, now);
        debug!(symbol = %symbol, count = filings.len(), "Filings within window");

        let mut outcomes = Vec::with_capacity(filings.len());
        for filing in filings {
            outcomes.push(self.digest_filing(symbol, filing, window).await);
        }

        SymbolReport::resolved(symbol.clone(), window, cik.clone(), outcomes)
    }

    async fn digest_filing(
        &self,
        symbol: &Symbol,
        filing: FilingReference,
        window: LookbackWindow,
    ) -> FilingOutcome {
        match self.source.document(&filing.doc_url).await {
            Ok(Some(markup)) => {
                let text = html_to_text(&markup);
                let items = extract_items(&text);
                let summary = render_summary(symbol, &filing, &items, window);
                FilingOutcome::Digested(FilingDigest {
                    reference: filing,
                    items,
                    summary,
                })
            }
            Ok(None) => {
                debug!(symbol = %symbol, url = %filing.doc_url, "Document unavailable, skipping filing");
                FilingOutcome::Skipped {
                    doc_url: filing.doc_url,
                    reason: "document unavailable".to_string(),
                }
            }
            Err(e) => {
                warn!(symbol = %symbol, url = %filing.doc_url, error = %e, "Document fetch failed, skipping filing");
                FilingOutcome::Skipped {
                    doc_url: filing.doc_url,
                    reason: e.to_string(),
                }
            }
        }
    }
}
