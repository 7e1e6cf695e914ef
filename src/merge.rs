//! The merge engine: union, dedupe, order, trim.
//!
//! Freshly fetched entries are layered over the entries recovered from the
//! previous artifact.  Anything whose id is already in the seen-set is left
//! out, so an entry that was trimmed away never comes back, even if a source
//! keeps serving it.

use crate::entry::{DateOrdering, Entry, EntryMap};
use crate::source::RawEntry;
use crate::store::SeenSet;

#[derive(Debug, Clone, Copy)]
pub struct MergeOptions {
    /// Retention bound for the output.
    pub max_items: usize,
    pub ordering: DateOrdering,
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// At most `max_items` entries, newest first.
    pub entries: Vec<Entry>,
    /// The incoming seen-set plus every id added this run.
    pub seen: SeenSet,
    /// Fetched entries that were not yet seen.
    pub added: usize,
    /// Fetched entries skipped because their id was already seen.
    pub suppressed: usize,
}

/// Merge `fetched` into `existing`, filtered by `seen`, sorted and trimmed.
///
/// Duplicates are checked against the seen-set as it was at the start of the
/// run, so two fetched entries with the same new id are both accepted and the
/// later one wins.
pub fn merge(
    existing: EntryMap,
    fetched: Vec<RawEntry>,
    seen: &SeenSet,
    options: &MergeOptions,
) -> MergeOutcome {
    let mut combined = existing;
    let mut updated_seen = seen.clone();
    let mut added = 0;
    let mut suppressed = 0;

    for raw in fetched {
        let id = raw.resolve_id();
        if seen.contains(&id) {
            suppressed += 1;
            continue;
        }
        updated_seen.insert(id.clone());
        combined.insert(raw.into_entry(id));
        added += 1;
    }

    let mut entries = combined.into_entries();
    // Stable: equal keys keep map order.
    entries.sort_by(|a, b| options.ordering.newest_first(a, b));
    entries.truncate(options.max_items);

    MergeOutcome {
        entries,
        seen: updated_seen,
        added,
        suppressed,
    }
}
