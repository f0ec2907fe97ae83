#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/eightk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR access for the filing digest pipeline.
//!
//! This crate covers the three outbound operations of the service:
//!
//! - Ticker-to-CIK resolution from the SEC company tickers file
//! - Per-filer submission history fetch and recency filtering
//! - Individual filing document fetch from the EDGAR archives
//!
//! # Example
//!
//! ```no_run
//! use eightk_edgar::{recent_filings, EdgarClient};
//! use eightk_core::{LookbackWindow, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new("eightk/0.1 (contact@example.com)");
//!
//!     let map = client.ticker_map().await?;
//!     let cik = map.get("AAPL").expect("AAPL is in the SEC ticker file");
//!
//!     let history = client.submissions(cik).await?;
//!     let filings = recent_filings(&history, "8-K", LookbackWindow::new(7), chrono::Utc::now());
//!     for filing in filings {
//!         println!("{} filed {}: {}", filing.form, filing.filing_date, filing.doc_url);
//!     }
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use eightk_core::{
    Cik, FilingError, FilingReference, FilingSource, LookbackWindow, Result, SubmissionEntry,
    SubmissionHistory,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// SEC EDGAR API base URL
const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// SEC company tickers URL
const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// EDGAR archives base URL for individual filing documents
const ARCHIVES_BASE_URL: &str = "https://www.sec.gov/Archives/edgar/data";

/// Default rate limit: 10 requests per second (SEC requirement)
const DEFAULT_RATE_LIMIT: StdDuration = StdDuration::from_millis(100);

/// Rate limiter to ensure we don't exceed SEC's rate limits
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: StdDuration,
}

impl RateLimiter {
    fn new(min_interval: StdDuration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// SEC EDGAR filing client.
///
/// Fetches the ticker map, submission histories, and filing documents.
/// Implements rate limiting per SEC requirements (max 10 requests/second).
/// Nothing is cached between calls.
#[derive(Debug)]
pub struct EdgarClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl EdgarClient {
    /// Create a new EDGAR client with the specified user agent.
    ///
    /// The SEC requires identifying user agent headers. Format should be:
    /// "AppName/Version (contact@email.com)"
    ///
    /// # Example
    /// ```
    /// use eightk_edgar::EdgarClient;
    ///
    /// let client = EdgarClient::new("eightk/0.1 (contact@example.com)");
    /// ```
    pub fn new(user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(StdDuration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self::with_client(client)
    }

    /// Create a new EDGAR client with a custom HTTP client.
    ///
    /// The client should already carry an identifying user agent.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(DEFAULT_RATE_LIMIT))),
        }
    }

    /// Fetch the SEC ticker file and build the ticker-to-CIK mapping.
    ///
    /// Keys are uppercased tickers; values are zero-padded 10-digit CIKs.
    pub async fn ticker_map(&self) -> Result<HashMap<String, Cik>> {
        self.rate_limiter.lock().await.wait().await;

        debug!("Fetching company tickers from SEC");
        let response = self
            .client
            .get(COMPANY_TICKERS_URL)
            .send()
            .await
            .map_err(|e| FilingError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FilingError::Network(format!(
                "Failed to fetch company tickers: HTTP {}",
                response.status()
            )));
        }

        let data: HashMap<String, CompanyTickerInfo> = response
            .json()
            .await
            .map_err(|e| FilingError::Parse(format!("Failed to parse company tickers: {}", e)))?;

        let mut map = HashMap::with_capacity(data.len());
        for company in data.into_values() {
            if company.ticker.is_empty() {
                continue;
            }
            map.insert(
                company.ticker.to_uppercase(),
                Cik::from_number(company.cik_str),
            );
        }

        debug!("Loaded {} ticker mappings", map.len());
        Ok(map)
    }

    /// Fetch a filer's submission history.
    pub async fn submissions(&self, cik: &Cik) -> Result<SubmissionHistory> {
        self.rate_limiter.lock().await.wait().await;

        let url = format!("{}/submissions/CIK{}.json", EDGAR_BASE_URL, cik);

        debug!("Fetching submission history from {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FilingError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FilingError::Network(format!(
                "Failed to fetch submissions for CIK {}: HTTP {}",
                cik,
                response.status()
            )));
        }

        let payload: SubmissionsResponse = response
            .json()
            .await
            .map_err(|e| FilingError::Parse(format!("Failed to parse submissions: {}", e)))?;

        Ok(payload.into_history())
    }

    /// Fetch the raw markup of one filing document.
    ///
    /// A non-success status is not an error: the document is reported as
    /// missing and the caller skips the filing.
    pub async fn document(&self, url: &str) -> Result<Option<String>> {
        self.rate_limiter.lock().await.wait().await;

        debug!("Fetching filing document from {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FilingError::Network(e.to_string()))?;

        if !response.status().is_success() {
            debug!(
                "Document fetch returned HTTP {}, treating as missing",
                response.status()
            );
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| FilingError::Network(e.to_string()))?;

        Ok(Some(body))
    }
}

#[async_trait]
impl FilingSource for EdgarClient {
    fn name(&self) -> &str {
        "SEC EDGAR"
    }

    async fn ticker_map(&self) -> Result<HashMap<String, Cik>> {
        Self::ticker_map(self).await
    }

    async fn submissions(&self, cik: &Cik) -> Result<SubmissionHistory> {
        Self::submissions(self, cik).await
    }

    async fn document(&self, url: &str) -> Result<Option<String>> {
        Self::document(self, url).await
    }
}

/// Select the filings within the lookback window and build their document
/// URLs.
///
/// Entries qualify when their form type starts with `form_prefix`
/// (case-insensitive) and their filing date, taken as midnight UTC, is no
/// older than `now` minus the window. The lower bound is inclusive at
/// millisecond precision; a filing exactly `days * 24h` old is kept. Entries
/// with unparseable dates, or missing an accession number or primary
/// document, are dropped. Output preserves the index order of the history.
pub fn recent_filings(
    history: &SubmissionHistory,
    form_prefix: &str,
    window: LookbackWindow,
    now: DateTime<Utc>,
) -> Vec<FilingReference> {
    let cutoff = now - Duration::days(window.days());
    let prefix = form_prefix.to_uppercase();

    let mut out = Vec::new();
    for entry in &history.entries {
        if !entry.form.to_uppercase().starts_with(&prefix) {
            continue;
        }
        let Some(filing_date) = parse_index_date(&entry.filing_date) else {
            continue;
        };
        let filed_at = filing_date.and_time(NaiveTime::MIN).and_utc();
        if filed_at < cutoff {
            continue;
        }
        if entry.accession_number.is_empty() || entry.primary_document.is_empty() {
            continue;
        }

        out.push(FilingReference {
            form: entry.form.clone(),
            filing_date,
            report_date: entry.report_date.as_deref().and_then(parse_index_date),
            doc_url: document_url(history.cik, &entry.accession_number, &entry.primary_document),
        });
    }
    out
}

/// Build the canonical archive URL for one filing document.
fn document_url(cik: u64, accession_number: &str, primary_document: &str) -> String {
    let accession = accession_number.replace('-', "");
    format!(
        "{}/{}/{}/{}",
        ARCHIVES_BASE_URL, cik, accession, primary_document
    )
}

fn parse_index_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

// =============================================================================
// SEC API Response Types
// =============================================================================

/// Company ticker information from SEC JSON.
#[derive(Debug, Deserialize)]
struct CompanyTickerInfo {
    /// CIK as a number (SEC returns this as an integer)
    cik_str: u64,
    /// Ticker symbol
    ticker: String,
}

/// Response from the submissions endpoint.
///
/// The filing index arrives column-oriented: parallel arrays indexed by
/// filing. [`SubmissionsResponse::into_history`] zips them into rows.
#[derive(Debug, Deserialize)]
struct SubmissionsResponse {
    /// CIK as reported by the document (an unpadded digit string).
    cik: String,
    #[serde(default)]
    filings: FilingIndex,
}

#[derive(Debug, Default, Deserialize)]
struct FilingIndex {
    #[serde(default)]
    recent: RecentColumns,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentColumns {
    #[serde(default)]
    form: Vec<String>,
    #[serde(default)]
    filing_date: Vec<String>,
    #[serde(default)]
    report_date: Vec<String>,
    #[serde(default)]
    accession_number: Vec<String>,
    #[serde(default)]
    primary_document: Vec<String>,
}

impl SubmissionsResponse {
    fn into_history(self) -> SubmissionHistory {
        let recent = self.filings.recent;
        let mut entries = Vec::with_capacity(recent.form.len());
        for (i, form) in recent.form.iter().enumerate() {
            let report_date = recent
                .report_date
                .get(i)
                .filter(|date| !date.is_empty())
                .cloned();
            entries.push(SubmissionEntry {
                form: form.clone(),
                filing_date: recent.filing_date.get(i).cloned().unwrap_or_default(),
                report_date,
                accession_number: recent.accession_number.get(i).cloned().unwrap_or_default(),
                primary_document: recent.primary_document.get(i).cloned().unwrap_or_default(),
            });
        }

        SubmissionHistory {
            cik: self.cik.parse().unwrap_or(0),
            entries,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
