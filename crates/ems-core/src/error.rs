//! Core error type.
//!
//! Sub-crates define their own error enums and either wrap `CoreError` as one
//! variant (via `#[from]`) or convert at the boundary.  Both patterns are
//! acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

/// Errors from core type validation.
///
/// All three variants signal caller bugs or bad input data, never transient
/// conditions: an edge attribute outside its documented domain, an AHP tier
/// whose coefficients do not sum to 1, or a non-positive normalization scale.
/// None of them are silently clamped away.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("edge attribute `{field}` out of domain: {value}")]
    InvalidAttribute { field: &'static str, value: f64 },

    #[error("AHP {tier} weights must sum to 1, got {sum}")]
    InvalidWeights { tier: &'static str, sum: f64 },

    #[error("reference scale `{field}` must be positive and finite, got {value}")]
    InvalidScale { field: &'static str, value: f64 },
}

/// Shorthand result type for all `ems-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
