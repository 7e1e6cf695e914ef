//! RSS (and Atom) feed source implementation.
//!
//! Fetches a feed over HTTP(S) with a shared blocking [`reqwest`] client and
//! parses it with the [`rss`] crate.  Bodies that are not RSS 2.0 get a
//! second chance as Atom via [`atom_syndication`].
//!
//! The parsing helpers are pure functions (no I/O) so tests can exercise
//! them without hitting the network.

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;

use super::{DataSource, RawEntry};

/// A feed data source reached over HTTP(S).
pub struct RssSource {
    /// The feed URL.
    pub url: String,
    /// A human-readable label used in logs.
    pub label: String,
    client: Client,
}

impl RssSource {
    /// Create a new source sharing `client` with the other sources.
    ///
    /// # Arguments
    ///
    /// * `url` — full URL of the feed.
    /// * `label` — short name used in log lines for this feed.
    /// * `client` — HTTP client carrying the configured timeout and user agent.
    pub fn new(url: impl Into<String>, label: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
            client,
        }
    }

    /// Parse an already-fetched [`rss::Channel`] into [`RawEntry`]s.
    pub fn parse_channel(channel: &rss::Channel) -> Vec<RawEntry> {
        channel
            .items()
            .iter()
            .map(|item| RawEntry {
                id: item.guid().map(|g| g.value().to_string()),
                link: item.link().map(String::from),
                title: item.title().unwrap_or_default().to_string(),
                published: item.pub_date().map(String::from),
                summary: item.description().map(String::from),
            })
            .collect()
    }

    /// Parse an already-fetched Atom [`Feed`](atom_syndication::Feed).
    ///
    /// Atom dates are re-rendered as RFC 2822 so they look like every other
    /// `pubDate` in the merged RSS output.
    pub fn parse_atom(feed: &atom_syndication::Feed) -> Vec<RawEntry> {
        feed.entries()
            .iter()
            .map(|entry| {
                // Prefer the alternate link, else whatever comes first.
                let link = entry
                    .links()
                    .iter()
                    .find(|l| l.rel() == "alternate")
                    .or_else(|| entry.links().first())
                    .map(|l| l.href().to_string());

                let published = entry
                    .published()
                    .unwrap_or_else(|| entry.updated())
                    .to_rfc2822();

                RawEntry {
                    id: Some(entry.id().to_string()).filter(|id| !id.is_empty()),
                    link,
                    title: entry.title().value.clone(),
                    published: Some(published),
                    summary: entry.summary().map(|s| s.value.clone()),
                }
            })
            .collect()
    }

    /// Parse a feed document, trying RSS first and then Atom.
    pub fn parse_body(body: &[u8]) -> Result<Vec<RawEntry>> {
        match rss::Channel::read_from(body) {
            Ok(channel) => Ok(Self::parse_channel(&channel)),
            Err(rss_err) => atom_syndication::Feed::read_from(body)
                .map(|feed| Self::parse_atom(&feed))
                .map_err(|atom_err| {
                    anyhow!("not an RSS feed ({rss_err}) nor an Atom feed ({atom_err})")
                }),
        }
    }
}

impl DataSource for RssSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch(&self) -> Result<Vec<RawEntry>> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .with_context(|| format!("failed to fetch {}", self.url))?
            .bytes()
            .with_context(|| format!("failed to read body of {}", self.url))?;

        let entries = Self::parse_body(body.as_ref())
            .with_context(|| format!("failed to parse {}", self.url))?;

        tracing::debug!(source = %self.label, count = entries.len(), "parsed feed");
        Ok(entries)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
