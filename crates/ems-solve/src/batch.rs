//! Rayon batch queries (feature = `"parallel"`).
//!
//! Independent queries — different emergency sites against the same static
//! graph snapshot — share nothing mutable: each one builds its own reversed
//! graph, weight vector, and distance table, while `DispatchGraph` and
//! `WeightModel` are read-only after construction.  That makes the batch a
//! plain `par_iter` with no coordination.

use rayon::prelude::*;

use ems_core::{VertexId, WeightModel};
use ems_graph::DispatchGraph;

use crate::result::DispatchResult;
use crate::selector::plan_dispatch;
use crate::SolveResult;

/// One emergency and its candidate hospitals.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchQuery {
    pub emergency: VertexId,
    pub hospitals: Vec<VertexId>,
}

/// Solve every query in parallel.  Output order matches input order; each
/// query succeeds or fails on its own.
pub fn plan_dispatch_batch(
    graph: &DispatchGraph,
    model: &WeightModel,
    queries: &[DispatchQuery],
) -> Vec<SolveResult<DispatchResult>> {
    queries
        .par_iter()
        .map(|q| plan_dispatch(graph, model, q.emergency, &q.hospitals))
        .collect()
}
