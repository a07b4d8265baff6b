//! Member-dump ingestion utilities.
//!
//! sortfix consumes dumps produced by extraction collaborators (the AST
//! walkers that turn declarations into `(name, size, span)` member lists).
//! It intentionally does not enforce strict schema validation here; the
//! extractor's conformance harness should do that. sortfix is tolerant so it
//! can still check ordering when a dump carries extra fields or misses
//! optional ones.

mod load;

pub use load::{DumpLoadError, LoadedDump, load_dump_file, load_dumps};
