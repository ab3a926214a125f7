//! Solver-subsystem error type.

use thiserror::Error;

use ems_core::{EdgeId, VertexId};

/// Errors produced by `ems-solve`.
#[derive(Debug, Error)]
pub enum SolveError {
    /// A computed composite weight was negative or non-finite.  Signals a
    /// coefficient or normalization bug; the solve aborts rather than
    /// returning a silently wrong ranking.
    #[error("composite weight of edge {edge} is {value}; weights must be finite and ≥ 0")]
    InvalidWeight { edge: EdgeId, value: f64 },

    /// No hospital can reach the emergency site.  A legitimate real-world
    /// state (disconnected regions), reported as an error so callers cannot
    /// mistake a fabricated result for a dispatch plan.
    #[error("no hospital has a route to emergency site {emergency}")]
    NoRouteFound { emergency: VertexId },

    /// A query referenced a vertex outside the graph.
    #[error("vertex {0} not found in graph")]
    UnknownVertex(VertexId),
}

pub type SolveResult<T> = Result<T, SolveError>;
