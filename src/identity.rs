//! Stable identifiers for feed entries.
//!
//! Every entry needs an id that stays the same from one run to the next so
//! the seen-set can recognise it.  Sources are inconsistent about which
//! fields they fill in, so the id comes from a fallback chain:
//!
//! 1. the source's own identifier (RSS `<guid>`, Atom `<id>`),
//! 2. the entry link,
//! 3. a SHA-256 digest of the title, hex encoded.
//!
//! Native ids and links are normalised before use: surrounding whitespace
//! is trimmed and control characters become spaces, so an id looks the same
//! whether it was fetched, recovered from the output, or read from the index.
//!
//! Two entries with no id, no link and the same title end up with the same
//! id.  That is a known limitation and is left as is.

use sha2::{Digest, Sha256};

/// Resolve the id for an entry from its optional native id, link and title.
///
/// Values that are empty after normalising count as absent, so a blank
/// `<guid>` falls through to the link rather than producing an empty id.
pub fn resolve_id(native_id: Option<&str>, link: Option<&str>, title: &str) -> String {
    native_id
        .and_then(normalize)
        .or_else(|| link.and_then(normalize))
        .unwrap_or_else(|| title_digest(title))
}

/// Lowercase hex SHA-256 of the title's UTF-8 bytes.
pub fn title_digest(title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hex::encode(hasher.finalize())
}

fn normalize(value: &str) -> Option<String> {
    let cleaned: String = value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let trimmed = cleaned.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_id_wins() {
        let id = resolve_id(Some("guid-1"), Some("https://example.com/1"), "Title");
        assert_eq!(id, "guid-1");
    }

    #[test]
    fn falls_back_to_link() {
        let id = resolve_id(None, Some("https://example.com/1"), "Title");
        assert_eq!(id, "https://example.com/1");
    }

    #[test]
    fn blank_native_id_is_ignored() {
        let id = resolve_id(Some("   "), Some("https://example.com/1"), "Title");
        assert_eq!(id, "https://example.com/1");
    }

    #[test]
    fn falls_back_to_title_hash() {
        let id = resolve_id(None, None, "hello");
        assert_eq!(
            id,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn empty_title_hashes_to_sha256_of_nothing() {
        let id = resolve_id(None, Some(""), "");
        assert_eq!(
            id,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(resolve_id(Some("  padded \n"), None, "T"), "padded");
        assert_eq!(
            resolve_id(None, Some("\thttps://example.com/1 "), "T"),
            "https://example.com/1"
        );
    }

    #[test]
    fn control_characters_become_spaces() {
        assert_eq!(resolve_id(Some("a\tb"), None, "T"), "a b");
        assert_eq!(resolve_id(Some("line\nbreak"), None, "T"), "line break");
        assert_eq!(resolve_id(Some("nul\0"), None, "T"), "nul");
    }

    #[test]
    fn hash_prefixed_ids_are_kept() {
        assert_eq!(resolve_id(Some("#frag"), None, "T"), "#frag");
    }

    #[test]
    fn same_title_gives_same_id() {
        assert_eq!(resolve_id(None, None, "A"), resolve_id(None, None, "A"));
        assert_ne!(resolve_id(None, None, "A"), resolve_id(None, None, "B"));
    }
}
