#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/eightk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and traits for the 8-K filing digest service.
//!
//! This crate provides the shared vocabulary of the digest pipeline:
//!
//! - [`Symbol`], [`Cik`], [`LookbackWindow`] - typed request inputs
//! - [`SubmissionHistory`] - a filer's filing index
//! - [`FilingReference`], [`ExtractedItem`], [`FilingDigest`] - pipeline output
//! - [`SymbolReport`] / [`FilingOutcome`] - per-symbol and per-filing results
//! - [`FilingSource`](source::FilingSource) - the backend seam
//! - [`FilingError`] - error type covering fetch and decode failures

/// Error types for filing digest operations.
pub mod error;
/// The backend seam between orchestration and a disclosure source.
pub mod source;
/// Core data types flowing through the digest pipeline.
pub mod types;

// Re-export commonly used items at crate root
pub use error::{FilingError, Result};
pub use source::FilingSource;
pub use types::{
    Cik, ExtractedItem, FilingDigest, FilingOutcome, FilingReference, FilingSummary,
    LookbackWindow, SubmissionEntry, SubmissionHistory, Symbol, SymbolOutcome, SymbolReport,
    MAX_LOOKBACK_DAYS, MIN_LOOKBACK_DAYS,
};
