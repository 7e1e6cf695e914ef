//! Recover previously published entries from the last output artifact.
//!
//! The seen-set only stores ids, so the full content of entries that are no
//! longer served upstream lives nowhere but the artifact we wrote last time.
//! Reading it back lets those entries stay in the feed until they are
//! trimmed.
//!
//! This reader never fails: a missing or malformed artifact just means there
//! is no prior state.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use serde::Deserialize;

use crate::entry::{Entry, EntryMap};
use crate::identity;

/// Which fields identify an entry recovered from the artifact.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryIds {
    /// `<guid>`, then link, then title hash.  The emitter writes every
    /// entry's id as its `<guid>`, so recovered ids match the fetched ones.
    #[default]
    Native,
    /// Link, then title hash; `<guid>` is ignored.  An entry fetched with a
    /// native id comes back under a different id.
    Link,
}

pub struct OutputReader {
    path: PathBuf,
    recovery: RecoveryIds,
}

impl OutputReader {
    pub fn new(path: impl Into<PathBuf>, recovery: RecoveryIds) -> Self {
        Self {
            path: path.into(),
            recovery,
        }
    }

    /// Entries from the existing artifact, keyed by id, in document order.
    pub fn load(&self) -> EntryMap {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return EntryMap::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "cannot open existing output, starting empty"
                );
                return EntryMap::new();
            }
        };

        match rss::Channel::read_from(BufReader::new(file)) {
            Ok(channel) => {
                let entries = entries_from_channel(&channel, self.recovery);
                tracing::debug!(
                    path = %self.path.display(),
                    count = entries.len(),
                    "recovered existing entries"
                );
                entries
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "existing output is malformed, starting empty"
                );
                EntryMap::new()
            }
        }
    }
}

/// Convert the items of a parsed artifact into entries.
pub fn entries_from_channel(channel: &rss::Channel, recovery: RecoveryIds) -> EntryMap {
    channel
        .items()
        .iter()
        .map(|item| {
            let title = item.title().unwrap_or_default();
            let guid = match recovery {
                RecoveryIds::Native => item.guid().map(|g| g.value()),
                RecoveryIds::Link => None,
            };
            let id = identity::resolve_id(guid, item.link(), title);

            Entry {
                id,
                title: title.to_string(),
                link: item.link().map(String::from),
                pub_date: item.pub_date().map(String::from),
                description: item.description().map(String::from),
            }
        })
        .collect()
}
