//! Data source abstraction layer.
//!
//! This module defines the [`DataSource`] trait and the [`RawEntry`] type
//! sources produce.  Concrete source implementations live in sub-modules
//! (currently only [`rss`], which also understands Atom).
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `json_feed.rs`).
//! 2. Define a struct and implement [`DataSource`] for it.
//! 3. Add `mod json_feed;` below and re-export your struct in the `pub use` block.
//! 4. Construct instances from the config in `run::build_sources`.
//!
//! The fetch loop, identity resolution and merge are all source-agnostic.

mod raw_entry;
mod rss;

pub use raw_entry::RawEntry;
pub use self::rss::RssSource;

#[cfg(test)]
pub(crate) use raw_entry::tests::make_raw;

use anyhow::Result;

/// Trait that every data source must implement.
///
/// The fetch loop calls [`fetch()`](DataSource::fetch) once per run, one
/// source at a time.
pub trait DataSource {
    /// Human-readable label used in log lines.
    fn name(&self) -> &str;

    /// Fetch the current batch of entries.
    ///
    /// Errors are logged by the fetch loop and the source is skipped for
    /// this run; they never abort the merge.
    fn fetch(&self) -> Result<Vec<RawEntry>>;
}
