//! The fetch loop.
//!
//! Fetches every configured source once, one after another.  A source that
//! fails is logged and skipped; the others still contribute their entries.

use crate::source::{DataSource, RawEntry};

/// A source that could not be fetched this run.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub source: String,
    pub error: String,
}

/// Everything one pass over the sources produced.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Entries in source order, then document order.
    pub entries: Vec<RawEntry>,
    pub failures: Vec<FetchFailure>,
}

/// Fetch all `sources` sequentially.
pub fn fetch_all(sources: &[Box<dyn DataSource>]) -> FetchReport {
    let mut report = FetchReport::default();

    for src in sources {
        match src.fetch() {
            Ok(items) => {
                tracing::debug!(source = src.name(), count = items.len(), "fetched");
                report.entries.extend(items);
            }
            Err(e) => {
                let error = format!("{e:#}");
                tracing::warn!(source = src.name(), error = %error, "skipping source");
                report.failures.push(FetchFailure {
                    source: src.name().to_string(),
                    error,
                });
            }
        }
    }

    report
}
