//! End-to-end digest tests against an in-memory filing source.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use eightk::{
    Cik, DigestService, FilingError, FilingOutcome, FilingSource, LookbackWindow, Result,
    SubmissionEntry, SubmissionHistory, Symbol, SymbolOutcome,
};

const ACME_DOC_URL: &str =
    "https://www.sec.gov/Archives/edgar/data/320193/000032019324000010/acme-8k.htm";

#[derive(Debug, Default)]
struct StubSource {
    tickers: HashMap<String, Cik>,
    histories: HashMap<String, SubmissionHistory>,
    documents: HashMap<String, String>,
    fail_ticker_map: bool,
    fail_submissions: bool,
    submissions_calls: AtomicUsize,
}

#[async_trait]
impl FilingSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn ticker_map(&self) -> Result<HashMap<String, Cik>> {
        if self.fail_ticker_map {
            return Err(FilingError::Network("ticker map offline".to_string()));
        }
        Ok(self.tickers.clone())
    }

    async fn submissions(&self, cik: &Cik) -> Result<SubmissionHistory> {
        self.submissions_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_submissions {
            return Err(FilingError::Network("submissions offline".to_string()));
        }
        Ok(self
            .histories
            .get(cik.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn document(&self, url: &str) -> Result<Option<String>> {
        Ok(self.documents.get(url).cloned())
    }
}

fn acme_history() -> SubmissionHistory {
    SubmissionHistory {
        cik: 320193,
        entries: vec![SubmissionEntry {
            form: "8-K".to_string(),
            filing_date: "2024-03-10".to_string(),
            report_date: Some("2024-03-08".to_string()),
            accession_number: "0000320193-24-000010".to_string(),
            primary_document: "acme-8k.htm".to_string(),
        }],
    }
}

fn acme_stub() -> StubSource {
    let mut stub = StubSource::default();
    stub.tickers.insert("ACME".to_string(), Cik::new("320193"));
    stub.histories
        .insert("0000320193".to_string(), acme_history());
    stub
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn officer_change_filing_digests_end_to_end() {
    let mut stub = acme_stub();
    stub.documents.insert(
        ACME_DOC_URL.to_string(),
        "<p>Item 5.02: Officer Change</p><p>Details follow.</p>".to_string(),
    );
    let service = DigestService::new(Arc::new(stub));

    let reports = service
        .run_at(&[Symbol::new("ACME")], LookbackWindow::new(1), now())
        .await
        .unwrap();

    assert_eq!(reports.len(), 1);
    let digests = reports[0].digests();
    assert_eq!(digests.len(), 1);

    let digest = digests[0];
    assert_eq!(digest.reference.doc_url, ACME_DOC_URL);
    assert_eq!(digest.items.len(), 1);
    assert_eq!(digest.items[0].code, "5.02");
    assert_eq!(digest.items[0].title_guess, "Officer Change");
    assert_eq!(digest.items[0].label, "officer and director changes");
    assert!(digest.summary.body.contains(ACME_DOC_URL));
    assert!(
        digest
            .summary
            .body
            .contains("• Item 5.02 (officer and director changes): Officer Change…")
    );
}

#[tokio::test]
async fn unresolved_symbol_fails_without_a_submissions_fetch() {
    let stub = Arc::new(acme_stub());
    let service = DigestService::new(stub.clone() as Arc<dyn FilingSource>);

    let reports = service
        .run_at(
            &[Symbol::new("ZZZZ"), Symbol::new("ACME")],
            LookbackWindow::new(1),
            now(),
        )
        .await
        .unwrap();

    assert_eq!(reports.len(), 2);
    match &reports[0].outcome {
        SymbolOutcome::Failed { error } => assert!(error.contains("ZZZZ")),
        other => panic!("expected failure, got {other:?}"),
    }
    // The sibling still resolved, and only it hit the submissions endpoint.
    assert!(matches!(
        reports[1].outcome,
        SymbolOutcome::Resolved { .. }
    ));
    assert_eq!(stub.submissions_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn ticker_map_failure_aborts_the_whole_run() {
    let mut stub = acme_stub();
    stub.fail_ticker_map = true;
    let service = DigestService::new(Arc::new(stub));

    let result = service
        .run_at(&[Symbol::new("ACME")], LookbackWindow::new(1), now())
        .await;

    assert!(matches!(result, Err(FilingError::Network(_))));
}

#[tokio::test]
async fn submissions_failure_fails_the_symbol_only() {
    let mut stub = acme_stub();
    stub.fail_submissions = true;
    let service = DigestService::new(Arc::new(stub));

    let reports = service
        .run_at(&[Symbol::new("ACME")], LookbackWindow::new(1), now())
        .await
        .unwrap();

    match &reports[0].outcome {
        SymbolOutcome::Failed { error } => assert!(error.contains("submissions offline")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_document_becomes_a_named_skip() {
    // No documents registered: the fetch answers "no document".
    let service = DigestService::new(Arc::new(acme_stub()));

    let reports = service
        .run_at(&[Symbol::new("ACME")], LookbackWindow::new(1), now())
        .await
        .unwrap();

    let SymbolOutcome::Resolved { filings, .. } = &reports[0].outcome else {
        panic!("expected resolved outcome");
    };
    assert_eq!(filings.len(), 1);
    assert!(filings[0].is_skipped());
    match &filings[0] {
        FilingOutcome::Skipped { doc_url, reason } => {
            assert_eq!(doc_url, ACME_DOC_URL);
            assert_eq!(reason, "document unavailable");
        }
        FilingOutcome::Digested(_) => unreachable!(),
    }
    // Skips never surface in rendered output.
    assert!(reports[0].digests().is_empty());
}

#[tokio::test]
async fn documents_without_headings_render_the_advisory() {
    let mut stub = acme_stub();
    stub.documents.insert(
        ACME_DOC_URL.to_string(),
        "<p>Press release text with no section headings.</p>".to_string(),
    );
    let service = DigestService::new(Arc::new(stub));

    let reports = service
        .run_at(&[Symbol::new("ACME")], LookbackWindow::new(1), now())
        .await
        .unwrap();

    let digests = reports[0].digests();
    assert_eq!(digests.len(), 1);
    assert!(digests[0].items.is_empty());
    assert!(
        digests[0]
            .summary
            .body
            .contains("No recognizable item headings")
    );
}
