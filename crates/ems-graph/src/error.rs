//! Graph-subsystem error type.

use thiserror::Error;

use ems_core::{CoreError, VertexId};

/// Errors produced by `ems-graph`.
///
/// All construction-time problems — duplicate labels, dangling endpoints,
/// out-of-domain attributes — surface here, before any solve begins.  The
/// solver in `ems-solve` assumes a well-formed graph and does not re-validate.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("duplicate vertex label `{0}`")]
    DuplicateLabel(String),

    #[error("vertex {0} not found in graph")]
    UnknownVertex(VertexId),

    #[error(transparent)]
    Attribute(#[from] CoreError),

    #[cfg(feature = "csv")]
    #[error("CSV parse error: {0}")]
    Parse(String),

    #[cfg(feature = "csv")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
