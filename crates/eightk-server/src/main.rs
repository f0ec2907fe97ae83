//! HTTP endpoint serving 8-K filing digests.
//!
//! `GET /eightk?symbol=AAPL,TSLA&days=3` answers with a JSON payload of
//! per-symbol digest results; `GET /health` is a liveness probe.
//!
//! Configuration comes from the environment, read once at startup:
//!
//! - `EDGAR_CONTACT` - contact string for the outbound SEC User-Agent
//!   (placeholder fallback if unset)
//! - `EIGHTK_ADDR` - bind address, default `0.0.0.0:3000`

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use eightk::{
    DigestService, EdgarClient, FilingDigest, FilingOutcome, LookbackWindow, Symbol, SymbolOutcome,
    SymbolReport,
};

/// Ticker digested when the query names none.
const DEFAULT_SYMBOL: &str = "AAPL";

/// Contact placeholder used when none is configured.
const FALLBACK_CONTACT: &str = "contact@example.com";

/// Server configuration, read once at startup.
#[derive(Clone, Debug)]
struct ServerConfig {
    contact: String,
    bind_addr: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        let contact =
            std::env::var("EDGAR_CONTACT").unwrap_or_else(|_| FALLBACK_CONTACT.to_string());
        let bind_addr =
            std::env::var("EIGHTK_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        Self { contact, bind_addr }
    }

    /// Identifying User-Agent for outbound SEC requests.
    fn user_agent(&self) -> String {
        format!("eightk/{} ({})", env!("CARGO_PKG_VERSION"), self.contact)
    }
}

/// Shared application state.
struct AppState {
    service: DigestService,
}

/// Query parameters of the digest endpoint.
///
/// Both fields arrive as raw strings: malformed values degrade to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
struct DigestParams {
    symbol: Option<String>,
    days: Option<String>,
}

impl DigestParams {
    /// Comma-separated ticker list; blanks dropped, default when absent or
    /// empty.
    fn symbols(&self) -> Vec<Symbol> {
        self.symbol
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .unwrap_or(DEFAULT_SYMBOL)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Symbol::new)
            .collect()
    }

    /// Day count, default 1, clamped to the accepted window.
    fn window(&self) -> LookbackWindow {
        let days = self
            .days
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(1);
        LookbackWindow::new(days)
    }
}

// Response types

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DigestResponse {
    ok: bool,
    updated_at: String,
    results: Vec<SymbolEntry>,
}

#[derive(Serialize)]
struct ErrorResponse {
    ok: bool,
    error: String,
}

/// One per requested symbol: a digest payload or a per-symbol error.
#[derive(Serialize)]
#[serde(untagged)]
enum SymbolEntry {
    Resolved {
        ok: bool,
        symbol: String,
        cik: String,
        days: i64,
        count: usize,
        filings: Vec<FilingDigest>,
    },
    Failed {
        ok: bool,
        symbol: String,
        error: String,
    },
}

impl From<SymbolReport> for SymbolEntry {
    fn from(report: SymbolReport) -> Self {
        match report.outcome {
            SymbolOutcome::Resolved { cik, filings } => {
                // Skipped filings are dropped from the wire payload.
                let digests: Vec<FilingDigest> = filings
                    .into_iter()
                    .filter_map(|outcome| match outcome {
                        FilingOutcome::Digested(digest) => Some(digest),
                        FilingOutcome::Skipped { .. } => None,
                    })
                    .collect();
                Self::Resolved {
                    ok: true,
                    symbol: report.symbol.to_string(),
                    cik: cik.to_string(),
                    days: report.window.days(),
                    count: digests.len(),
                    filings: digests,
                }
            }
            SymbolOutcome::Failed { error } => Self::Failed {
                ok: false,
                symbol: report.symbol.to_string(),
                error,
            },
        }
    }
}

// Handlers

async fn health() -> &'static str {
    "OK"
}

async fn digest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DigestParams>,
) -> Result<Json<DigestResponse>, (StatusCode, Json<ErrorResponse>)> {
    let symbols = params.symbols();
    let window = params.window();

    let reports = state.service.run(&symbols, window).await.map_err(|e| {
        error!(error = %e, "Digest run failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                ok: false,
                error: e.to_string(),
            }),
        )
    })?;

    Ok(Json(DigestResponse {
        ok: true,
        updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        results: reports.into_iter().map(SymbolEntry::from).collect(),
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let client = Arc::new(EdgarClient::new(&config.user_agent()));
    let state = Arc::new(AppState {
        service: DigestService::new(client),
    });

    let app = Router::new()
        .route("/health", get(health))
        .route("/eightk", get(digest))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eightk::Cik;

    fn params(symbol: Option<&str>, days: Option<&str>) -> DigestParams {
        DigestParams {
            symbol: symbol.map(String::from),
            days: days.map(String::from),
        }
    }

    #[test]
    fn symbols_default_when_absent_or_blank() {
        assert_eq!(params(None, None).symbols(), vec![Symbol::new("AAPL")]);
        assert_eq!(params(Some(""), None).symbols(), vec![Symbol::new("AAPL")]);
        assert_eq!(
            params(Some("  "), None).symbols(),
            vec![Symbol::new("AAPL")]
        );
    }

    #[test]
    fn symbols_split_trim_and_uppercase() {
        assert_eq!(
            params(Some("tsla, nvda ,,AAPL"), None).symbols(),
            vec![Symbol::new("TSLA"), Symbol::new("NVDA"), Symbol::new("AAPL")]
        );
    }

    #[test]
    fn days_default_and_clamp() {
        assert_eq!(params(None, None).window().days(), 1);
        assert_eq!(params(None, Some("0")).window().days(), 1);
        assert_eq!(params(None, Some("500")).window().days(), 30);
        assert_eq!(params(None, Some("7")).window().days(), 7);
        assert_eq!(params(None, Some("abc")).window().days(), 1);
    }

    #[test]
    fn resolved_entry_serializes_wire_shape() {
        let report = SymbolReport::resolved(
            Symbol::new("ACME"),
            LookbackWindow::new(3),
            Cik::new("320193"),
            Vec::new(),
        );
        let value = serde_json::to_value(SymbolEntry::from(report)).unwrap();

        assert_eq!(value["ok"], true);
        assert_eq!(value["symbol"], "ACME");
        assert_eq!(value["cik"], "0000320193");
        assert_eq!(value["days"], 3);
        assert_eq!(value["count"], 0);
        assert!(value["filings"].as_array().unwrap().is_empty());
    }

    #[test]
    fn failed_entry_serializes_wire_shape() {
        let report = SymbolReport::failed(
            Symbol::new("ZZZZ"),
            LookbackWindow::new(1),
            "Symbol not found: ZZZZ",
        );
        let value = serde_json::to_value(SymbolEntry::from(report)).unwrap();

        assert_eq!(value["ok"], false);
        assert_eq!(value["symbol"], "ZZZZ");
        assert_eq!(value["error"], "Symbol not found: ZZZZ");
        assert!(value.get("filings").is_none());
    }

    #[test]
    fn skipped_filings_are_dropped_from_the_wire_payload() {
        let report = SymbolReport::resolved(
            Symbol::new("ACME"),
            LookbackWindow::new(1),
            Cik::new("320193"),
            vec![FilingOutcome::Skipped {
                doc_url: "https://example.invalid/doc.htm".to_string(),
                reason: "document unavailable".to_string(),
            }],
        );
        let value = serde_json::to_value(SymbolEntry::from(report)).unwrap();

        assert_eq!(value["count"], 0);
        assert!(value["filings"].as_array().unwrap().is_empty());
    }
}
