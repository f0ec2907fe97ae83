//! The [`FilingSource`] trait: the seam between digest orchestration and a
//! concrete disclosure backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{Cik, SubmissionHistory},
};

/// A source of filing index data and filing documents.
///
/// The production implementation talks to SEC EDGAR; tests substitute an
/// in-memory stub. All three operations map to one outbound fetch each, and
/// none of them caches across calls.
#[async_trait]
pub trait FilingSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g. "SEC EDGAR").
    fn name(&self) -> &str;

    /// Fetches the ticker-to-CIK mapping.
    ///
    /// Keys are uppercased ticker symbols. A fetch or decode failure is an
    /// error; there is no retry and no caching between calls.
    async fn ticker_map(&self) -> Result<HashMap<String, Cik>>;

    /// Fetches a filer's submission history.
    async fn submissions(&self, cik: &Cik) -> Result<SubmissionHistory>;

    /// Fetches the raw markup of one filing document.
    ///
    /// Returns `Ok(None)` when the source answers with a non-success status;
    /// the caller treats that as "no document" and skips the filing.
    async fn document(&self, url: &str) -> Result<Option<String>>;
}
