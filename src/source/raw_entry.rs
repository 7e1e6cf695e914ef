//! The entry type every data source produces.
//!
//! `RawEntry` is what a source hands back before any identity resolution has
//! happened.  Every source implementation converts its native format into
//! `RawEntry`s so the merge engine can stay source-agnostic.
//!
//! ## For contributors
//!
//! If you are adding a new data source you do **not** need to modify this file
//! unless your source requires extra fields.  Just construct `RawEntry` values
//! in your source's `fetch()` implementation.

use crate::entry::Entry;
use crate::identity;

/// A single feed entry as fetched, with every field except the title optional.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RawEntry {
    /// The source's own identifier (RSS `<guid>`, Atom `<id>`).
    pub id: Option<String>,

    /// URL to the full content.
    pub link: Option<String>,

    /// Headline.  Sources substitute an empty string when there is none.
    pub title: String,

    /// Publication date as the source wrote it.
    pub published: Option<String>,

    /// Summary or description text.
    pub summary: Option<String>,
}

impl RawEntry {
    /// The id this entry is known by: native id, then link, then title hash.
    pub fn resolve_id(&self) -> String {
        identity::resolve_id(self.id.as_deref(), self.link.as_deref(), &self.title)
    }

    /// Normalise into an [`Entry`] under the given id.
    pub fn into_entry(self, id: String) -> Entry {
        Entry {
            id,
            title: self.title,
            link: self.link,
            pub_date: self.published,
            description: self.summary,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Shorthand constructor for tests.
    pub fn make_raw(id: Option<&str>, title: &str, published: Option<&str>) -> RawEntry {
        RawEntry {
            id: id.map(String::from),
            link: None,
            title: title.to_string(),
            published: published.map(String::from),
            summary: None,
        }
    }

    #[test]
    fn resolve_id_prefers_native_id() {
        let mut raw = make_raw(Some("guid-1"), "T", None);
        raw.link = Some("https://example.com/1".into());
        assert_eq!(raw.resolve_id(), "guid-1");
    }

    #[test]
    fn resolve_id_uses_link_without_native_id() {
        let mut raw = make_raw(None, "T", None);
        raw.link = Some("https://example.com/1".into());
        assert_eq!(raw.resolve_id(), "https://example.com/1");
    }

    #[test]
    fn into_entry_maps_fields() {
        let raw = RawEntry {
            id: Some("g".into()),
            link: Some("https://example.com/a".into()),
            title: "Title".into(),
            published: Some("Mon, 01 Jan 2024 00:00:00 +0000".into()),
            summary: Some("<p>Body</p>".into()),
        };
        let entry = raw.into_entry("g".into());

        assert_eq!(entry.id, "g");
        assert_eq!(entry.title, "Title");
        assert_eq!(entry.link.as_deref(), Some("https://example.com/a"));
        assert_eq!(entry.pub_date.as_deref(), Some("Mon, 01 Jan 2024 00:00:00 +0000"));
        assert_eq!(entry.description.as_deref(), Some("<p>Body</p>"));
    }
}
