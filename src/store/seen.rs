//! Persistent set of every entry id that has ever been published.
//!
//! The store is a plain text file with one id per line.  Blank lines and
//! lines starting with `#` are ignored on read.  The set only ever grows,
//! which is what stops trimmed entries from coming back.
//!
//! Ids are escaped on write so that any string reads back unchanged:
//! `\\`, `\n`, `\r`, `\t`, a leading `\#`, and `\u{hex}` for other control
//! characters and for whitespace at either end of the id.  A backslash that
//! does not start one of these sequences is read literally.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::write_atomically;

/// Ids that have been included in an output at least once.
pub type SeenSet = HashSet<String>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access seen-set store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("seen-set store {path} is corrupt at line {line}: {reason}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        reason: &'static str,
    },
}

pub struct SeenStore {
    path: PathBuf,
}

impl SeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored ids.  A missing file is an empty set.
    pub fn load(&self) -> Result<SeenSet, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SeenSet::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let text = String::from_utf8(bytes).map_err(|e| {
            // Report the line holding the first invalid byte.
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            StoreError::Corrupt {
                path: self.path.clone(),
                line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
                reason: "not valid UTF-8",
            }
        })?;

        let mut seen = SeenSet::new();
        for (idx, line) in text.lines().enumerate() {
            if line.starts_with('#') {
                continue;
            }
            let id = line.trim();
            if id.is_empty() {
                continue;
            }
            if id.chars().any(char::is_control) {
                return Err(StoreError::Corrupt {
                    path: self.path.clone(),
                    line: idx + 1,
                    reason: "control character in id",
                });
            }
            seen.insert(unescape_id(id));
        }

        tracing::debug!(path = %self.path.display(), count = seen.len(), "loaded seen-set");
        Ok(seen)
    }

    /// Replace the store with `seen`, one escaped id per line, sorted.
    pub fn save(&self, seen: &SeenSet) -> Result<(), StoreError> {
        let mut ids: Vec<&str> = seen.iter().map(String::as_str).collect();
        ids.sort_unstable();

        let mut out = String::new();
        for id in ids {
            out.push_str(&escape_id(id));
            out.push('\n');
        }

        write_atomically(&self.path, out.as_bytes()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn escape_id(id: &str) -> String {
    let last = id.chars().count().saturating_sub(1);
    let mut out = String::with_capacity(id.len());
    for (i, c) in id.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '#' if i == 0 => out.push_str("\\#"),
            c if c.is_control() || (c.is_whitespace() && (i == 0 || i == last)) => {
                out.push_str(&format!("\\u{{{:x}}}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out
}

fn unescape_id(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        match decode_escape(tail) {
            Some((c, used)) => {
                out.push(c);
                rest = &tail[used..];
            }
            None => {
                out.push('\\');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode the sequence following a backslash; returns the char and the
/// number of bytes it consumed.
fn decode_escape(tail: &str) -> Option<(char, usize)> {
    let c = match tail.chars().next()? {
        '\\' => '\\',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '#' => '#',
        'u' => {
            let body = tail.strip_prefix("u{")?;
            let end = body.find('}')?;
            let c = u32::from_str_radix(&body[..end], 16)
                .ok()
                .and_then(char::from_u32)?;
            return Some((c, "u{".len() + end + 1));
        }
        _ => return None,
    };
    Some((c, 1))
}
