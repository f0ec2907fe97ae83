#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/eightk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! 8-K filing digest pipeline over SEC EDGAR.
//!
//! This crate ties the pieces together: the [`eightk_core`] vocabulary, the
//! [`EdgarClient`] backend, the [`eightk_extract`] text passes, the
//! [`render_summary`](render::render_summary) formatter, and
//! [`DigestService`](digest::DigestService) which runs one request's worth
//! of sequential fetching and digesting.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use eightk::{DigestService, EdgarClient, LookbackWindow, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> eightk::Result<()> {
//!     let client = Arc::new(EdgarClient::new("eightk/0.1 (contact@example.com)"));
//!     let service = DigestService::new(client);
//!
//!     let reports = service
//!         .run(&[Symbol::new("AAPL")], LookbackWindow::new(7))
//!         .await?;
//!     for report in reports {
//!         for digest in report.digests() {
//!             println!("{}", digest.summary.body);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use eightk_core::*;

// EDGAR backend
pub use eightk_edgar::{recent_filings, EdgarClient};

// Text passes
pub use eightk_extract::{extract_items, html_to_text, item_label};

/// Digest orchestration across symbols and filings.
pub mod digest;
/// Digest rendering for one filing.
pub mod render;

pub use digest::DigestService;
pub use render::render_summary;
