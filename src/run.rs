//! One complete merge run.
//!
//! Load prior state, fetch, merge, publish, remember.  Only the final two
//! writes (and a seen-set that exists but cannot be trusted) can fail a run;
//! everything on the read side degrades to "no prior data".

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

use crate::config::Config;
use crate::emit;
use crate::merge::{self, MergeOptions};
use crate::poll;
use crate::source::{DataSource, RssSource};
use crate::store::{OutputReader, SeenStore, StoreError};

/// Counts describing what a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub added: usize,
    pub suppressed: usize,
    pub emitted: usize,
    pub seen: usize,
    pub failed_sources: usize,
}

/// One [`RssSource`] per configured feed, sharing a single HTTP client.
pub fn build_sources(config: &Config) -> Result<Vec<Box<dyn DataSource>>> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .context("failed to build HTTP client")?;

    Ok(config
        .feeds
        .iter()
        .map(|feed| {
            let source = RssSource::new(&feed.url, feed.label(), client.clone());
            Box::new(source) as Box<dyn DataSource>
        })
        .collect())
}

pub fn run(config: &Config, sources: &[Box<dyn DataSource>]) -> Result<RunSummary> {
    let seen_store = SeenStore::new(&config.index_path);
    // A corrupt index must not be silently replaced by a smaller one.
    let seen = match seen_store.load() {
        Ok(seen) => seen,
        Err(e @ StoreError::Corrupt { .. }) => {
            return Err(anyhow::Error::new(e)
                .context("refusing to run: repair or remove the seen-set index first"));
        }
        Err(e) => return Err(e.into()),
    };
    let existing = OutputReader::new(&config.output_path, config.recovery_ids).load();
    tracing::info!(seen = seen.len(), existing = existing.len(), "loaded prior state");

    let report = poll::fetch_all(sources);
    let fetched = report.entries.len();
    if !report.failures.is_empty() {
        let failed: Vec<&str> = report.failures.iter().map(|f| f.source.as_str()).collect();
        tracing::warn!(?failed, "some sources were skipped this run");
    }

    let options = MergeOptions {
        max_items: config.max_items,
        ordering: config.ordering,
    };
    let outcome = merge::merge(existing, report.entries, &seen, &options);

    let channel = emit::build_channel(&outcome.entries, &config.channel);
    emit::write(&config.output_path, &channel)?;
    seen_store
        .save(&outcome.seen)
        .context("output was written but the seen-set could not be saved")?;

    let summary = RunSummary {
        fetched,
        added: outcome.added,
        suppressed: outcome.suppressed,
        emitted: outcome.entries.len(),
        seen: outcome.seen.len(),
        failed_sources: report.failures.len(),
    };
    tracing::info!(
        fetched = summary.fetched,
        added = summary.added,
        suppressed = summary.suppressed,
        emitted = summary.emitted,
        seen = summary.seen,
        failed_sources = summary.failed_sources,
        "merge complete"
    );
    Ok(summary)
}
