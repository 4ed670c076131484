//! Core types, configuration, and error handling for patchgate.
//!
//! This crate provides the shared foundation used by all other patchgate
//! crates:
//! - [`PatchgateError`] — unified error type using `thiserror`
//! - [`PatchgateConfig`] — configuration loaded from `.patchgate.toml`
//! - The preview data model: [`Operation`], [`Change`], [`Hunk`],
//!   [`FileDiff`], [`Stats`], [`RiskFactor`], [`RiskAssessment`],
//!   [`Summary`], [`Preview`], [`DiffOptions`]

mod config;
mod error;
mod types;

pub use config::{DiffConfig, PatchgateConfig, RiskConfig};
pub use error::PatchgateError;
pub use types::{
    Change, ChangeKind, DiffFormat, DiffOptions, FileDiff, Hunk, Operation, OperationKind,
    Preview, RiskAssessment, RiskFactor, RiskFactorKind, RiskLevel, Stats, Summary,
    MAX_CONTEXT_LINES,
};

/// A convenience `Result` type for patchgate operations.
pub type Result<T> = std::result::Result<T, PatchgateError>;
