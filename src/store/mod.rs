//! Durable state kept between runs.
//!
//! * [`seen`] — the seen-set store (`index.txt`).
//! * [`output`] — reads the previously published artifact (`combined.xml`)
//!   back into entries.
//!
//! Both files are read in full at the start of a run and rewritten in full
//! at the end.

pub mod output;
pub mod seen;

pub use output::{OutputReader, RecoveryIds};
pub use seen::{SeenSet, SeenStore, StoreError};

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write `contents` to a sibling temp file, then rename it over `path`.
///
/// A reader never observes a half-written file; on failure the previous
/// contents of `path` are left untouched.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let tmp = temp_path(path);
    fs::write(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
