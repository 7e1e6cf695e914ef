//! rss-merge — combine several feeds into one deduplicated, bounded RSS feed.
//!
//! ## Architecture overview
//!
//! ```text
//!  index.txt ──► store::seen ──┐
//!                              │ seen-set
//! combined.xml ─► store::output┤ existing      ┌──────────┐
//!                              ├─────────────► │ merge.rs │ ─► emit.rs ─► combined.xml
//!   sources ──► poll.rs ───────┘ fetched       └──────────┘
//!                                                   │ updated seen-set
//!                                                   └──► store::seen ─► index.txt
//! ```
//!
//! * **`source/`** — the `DataSource` trait and the RSS/Atom implementation.
//! * **`poll`** — fetches every source once, skipping the ones that fail.
//! * **`identity`** — the id fallback chain (native id, link, title hash).
//! * **`entry`** — the merged entry type, id-keyed map and date ordering.
//! * **`merge`** — union, seen-set filter, sort, trim.
//! * **`emit`** — renders the result as RSS.
//! * **`store`** — the seen-set file and the existing-output reader.
//! * **`run`** — one complete pass wiring the above together.
//! * **`config`** / **`args`** — TOML config file and command-line overrides.
//!
//! Exit status is 0 when the output and index were written, even if some
//! sources failed, and non-zero otherwise.

mod args;
mod config;
mod emit;
mod entry;
mod identity;
mod merge;
mod poll;
mod run;
mod source;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::Args;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Args::parse().into_config()?;
    let sources = run::build_sources(&config)?;

    run::run(&config, &sources)?;
    Ok(())
}
