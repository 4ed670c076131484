//! Preview assembly and risk assessment for proposed file operations.
//!
//! This crate turns a batch of [`Operation`](patchgate_core::Operation)s into
//! a complete [`Preview`](patchgate_core::Preview): per-file diffs from
//! `patchgate-diff`, an aggregate summary, a heuristic risk assessment, and
//! batch-level warnings and suggestions.
//!
//! Original file contents come through the [`ContentSource`] seam so hosts
//! can back the pipeline with a workspace directory, an editor buffer, or an
//! in-memory map.

mod advice;
mod assemble;
mod observer;
mod risk;
mod source;

pub use advice::{suggestions, warnings};
pub use assemble::PreviewAssembler;
pub use observer::{NullObserver, PreviewObserver};
pub use risk::RiskAssessor;
pub use source::{ContentSource, FsContentSource, MemoryContentSource};
