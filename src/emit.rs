//! Render the merged entries as an RSS 2.0 document.
//!
//! Pure serialization: the entries arrive already deduplicated, ordered and
//! trimmed.  Every item carries its resolved id as a non-permalink `<guid>`
//! so the next run can recover it under the same id.

use std::path::Path;

use anyhow::{Context, Result};
use rss::extension::atom::{AtomExtension, Link};
use rss::{Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};

use crate::config::ChannelConfig;
use crate::entry::Entry;
use crate::store::write_atomically;

const GENERATOR: &str = concat!("rss-merge ", env!("CARGO_PKG_VERSION"));

/// Build the output channel for `entries`, in the order given.
///
/// No `lastBuildDate` is set, so an unchanged run renders identical bytes.
pub fn build_channel(entries: &[Entry], meta: &ChannelConfig) -> Channel {
    let mut self_link = Link::default();
    self_link.set_href(meta.link.clone());
    self_link.set_rel("self");
    self_link.set_mime_type(Some("application/rss+xml".to_string()));

    let mut atom = AtomExtension::default();
    atom.set_links(vec![self_link]);

    ChannelBuilder::default()
        .title(meta.title.clone())
        .link(meta.link.clone())
        .description(meta.description.clone())
        .language(Some(meta.language.clone()))
        .generator(Some(GENERATOR.to_string()))
        .atom_ext(Some(atom))
        .items(entries.iter().map(to_item).collect::<Vec<_>>())
        .build()
}

fn to_item(entry: &Entry) -> Item {
    let guid = GuidBuilder::default()
        .value(entry.id.clone())
        .permalink(false)
        .build();

    ItemBuilder::default()
        .guid(Some(guid))
        .title(Some(entry.title.clone()))
        .link(entry.link.clone())
        .pub_date(entry.pub_date.clone())
        .description(entry.description.clone())
        .build()
}

/// Serialize `channel` and replace the artifact at `path`.
pub fn write(path: &Path, channel: &Channel) -> Result<()> {
    let xml = channel
        .pretty_write_to(Vec::new(), b' ', 2)
        .context("failed to serialize output feed")?;
    write_atomically(path, &xml)
        .with_context(|| format!("failed to write output feed {}", path.display()))
}
