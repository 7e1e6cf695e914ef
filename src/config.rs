//! Run configuration.
//!
//! Everything a run needs (feed list, file locations, limits, channel
//! metadata) lives in one immutable [`Config`] that is passed down
//! explicitly.  It is read from a TOML file; every field has a default, so
//! an empty file, or no file at all, gives a working setup.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::entry::DateOrdering;
use crate::store::RecoveryIds;

pub const DEFAULT_CONFIG_PATH: &str = "rss-merge.toml";

const DEFAULT_FEEDS: [&str; 10] = [
    "https://politepol.com/fd/hYxyD0YIwERV.xml",
    "https://politepol.com/fd/252sONZTOIDX.xml",
    "https://politepol.com/fd/42bU3PeKaKjf.xml",
    "https://politepol.com/fd/svZEZwEXeeYC.xml",
    "https://politepol.com/fd/vkBVLkhLdU6Y.xml",
    "https://politepol.com/fd/pL68k3eA2SrA.xml",
    "https://politepol.com/fd/qmEwvjQrNyvg.xml",
    "https://politepol.com/fd/lHWPAUKpkaqz.xml",
    "https://politepol.com/fd/V9Hk3fW83a2N.xml",
    "https://politepol.com/fd/jvYL3YgY1MBF.xml",
];

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub feeds: Vec<FeedConfig>,
    pub output_path: PathBuf,
    pub index_path: PathBuf,
    pub max_items: usize,
    pub ordering: DateOrdering,
    pub recovery_ids: RecoveryIds,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub channel: ChannelConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FeedConfig {
    pub url: String,
    /// Name used in log lines; the URL when absent.
    pub label: Option<String>,
}

impl FeedConfig {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.url)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChannelConfig {
    pub title: String,
    /// Public URL of the merged feed; also written as the `atom:link` self link.
    pub link: String,
    pub description: String,
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feeds: DEFAULT_FEEDS
                .iter()
                .map(|url| FeedConfig {
                    url: url.to_string(),
                    label: None,
                })
                .collect(),
            output_path: PathBuf::from("combined.xml"),
            index_path: PathBuf::from("index.txt"),
            max_items: 200,
            ordering: DateOrdering::default(),
            recovery_ids: RecoveryIds::default(),
            fetch_timeout_secs: 30,
            user_agent: concat!("rss-merge/", env!("CARGO_PKG_VERSION")).to_string(),
            channel: ChannelConfig::default(),
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            title: "Merged RSS Feed".to_string(),
            link: "https://yourusername.github.io/rss-merged-feed/combined.xml".to_string(),
            description: "Combined feed from several sources, no duplicates".to_string(),
            language: "en".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, or fall back to defaults when it does not exist and was
    /// not asked for explicitly.
    pub fn load_or_default(path: &Path, explicit: bool) -> Result<Self> {
        if !explicit && !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_items == 0 {
            bail!("max_items must be at least 1");
        }
        if self.feeds.is_empty() {
            bail!("at least one feed must be configured");
        }
        if let Some(feed) = self.feeds.iter().find(|f| f.url.trim().is_empty()) {
            bail!("feed {:?} has an empty url", feed.label());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_the_classic_setup() {
        let config = Config::default();
        assert_eq!(config.feeds.len(), 10);
        assert_eq!(config.output_path, PathBuf::from("combined.xml"));
        assert_eq!(config.index_path, PathBuf::from("index.txt"));
        assert_eq!(config.max_items, 200);
        assert_eq!(config.ordering, DateOrdering::Lexical);
        assert_eq!(config.recovery_ids, RecoveryIds::Native);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.max_items, 200);
        assert_eq!(config.channel, ChannelConfig::default());
    }

    #[test]
    fn parses_full_config() {
        let config = Config::parse(
            r#"
output_path = "public/feed.xml"
index_path = "state/seen.txt"
max_items = 50
ordering = "chronological"
recovery_ids = "link"
fetch_timeout_secs = 5

[channel]
title = "My Feed"

[[feeds]]
url = "https://example.com/a.xml"
label = "A"

[[feeds]]
url = "https://example.com/b.xml"
"#,
        )
        .unwrap();

        assert_eq!(config.output_path, PathBuf::from("public/feed.xml"));
        assert_eq!(config.index_path, PathBuf::from("state/seen.txt"));
        assert_eq!(config.max_items, 50);
        assert_eq!(config.ordering, DateOrdering::Chronological);
        assert_eq!(config.recovery_ids, RecoveryIds::Link);
        assert_eq!(config.fetch_timeout_secs, 5);
        assert_eq!(config.channel.title, "My Feed");
        assert_eq!(config.channel.language, "en");
        assert_eq!(config.feeds.len(), 2);
        assert_eq!(config.feeds[0].label(), "A");
        assert_eq!(config.feeds[1].label(), "https://example.com/b.xml");
    }

    #[test]
    fn rejects_zero_max_items() {
        assert!(Config::parse("max_items = 0").is_err());
    }

    #[test]
    fn rejects_empty_feed_list() {
        assert!(Config::parse("feeds = []").is_err());
    }

    #[test]
    fn rejects_unknown_ordering() {
        assert!(Config::parse(r#"ordering = "random""#).is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_items = 7").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.max_items, 7);
    }

    #[test]
    fn missing_default_file_falls_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rss-merge.toml");

        assert!(Config::load_or_default(&path, false).is_ok());
        assert!(Config::load_or_default(&path, true).is_err());
    }
}
