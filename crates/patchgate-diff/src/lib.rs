//! Hunk construction and diff statistics.
//!
//! Windows line-granularity change streams (from the `similar` crate) into
//! coherent hunks with correct context and 1-based line numbering, and
//! reduces hunks to additive per-file counters.

mod hunks;
mod language;
mod stats;

pub use hunks::{build_hunks, MERGE_THRESHOLD};
pub use language::detect_language;
pub use stats::{compute_stats, PERCENTAGE_SMOOTHING};
