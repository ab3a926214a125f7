//! Hospital ranking, selection, and path pricing.

use ems_core::{VertexId, WeightModel};
use ems_graph::DispatchGraph;

use crate::result::{DispatchResult, HospitalOutcome, HospitalRank, RouteBreakdown};
use crate::solver::ReverseSolve;
use crate::{SolveError, SolveResult};

/// Run one full dispatch query: reverse the graph, solve from the emergency
/// vertex, rank the hospitals, and reconstruct the winning forward path.
///
/// # Ranking
///
/// Reachable hospitals sort ascending by `(composite_cost, VertexId)` — the
/// id tiebreak makes equal-cost results deterministic.  Unreachable
/// hospitals are appended in id order, marked as such rather than dropped.
/// If no hospital is reachable the query fails with
/// [`SolveError::NoRouteFound`]; a partial or fabricated plan is never
/// returned.
///
/// # Cost
///
/// One `reversed()` + one Dijkstra run per call, O((V+E) log V), regardless
/// of how many hospitals are queried.
pub fn plan_dispatch(
    graph: &DispatchGraph,
    model: &WeightModel,
    emergency: VertexId,
    hospitals: &[VertexId],
) -> SolveResult<DispatchResult> {
    let solve = ReverseSolve::run(graph, model, emergency, hospitals)?;
    select(&solve, hospitals)
}

/// Build the ranked [`DispatchResult`] from a finished solve.
///
/// Split out from [`plan_dispatch`] so callers holding a `ReverseSolve` can
/// re-rank different hospital subsets without re-running Dijkstra (only
/// valid when the solve ran without early exit, i.e. with the superset).
pub fn select(solve: &ReverseSolve, hospitals: &[VertexId]) -> SolveResult<DispatchResult> {
    let mut ranking: Vec<HospitalRank> = hospitals
        .iter()
        .map(|&h| HospitalRank { hospital: h, outcome: outcome_for(solve, h) })
        .collect();

    // Reachable ascending by (cost, id); unreachable last, ascending by id.
    ranking.sort_by(|a, b| match (a.composite_cost(), b.composite_cost()) {
        (Some(x), Some(y)) => x.total_cmp(&y).then(a.hospital.cmp(&b.hospital)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.hospital.cmp(&b.hospital),
    });

    let best = ranking
        .first()
        .filter(|r| r.is_reachable())
        .ok_or(SolveError::NoRouteFound { emergency: solve.source() })?;

    let (total_cost, path, breakdown) = match &best.outcome {
        HospitalOutcome::Reachable { composite_cost, path, breakdown } => {
            (*composite_cost, path.clone(), breakdown.clone())
        }
        HospitalOutcome::Unreachable => unreachable!("filtered above"),
    };
    let selected = best.hospital;

    Ok(DispatchResult {
        emergency: solve.source(),
        selected,
        total_cost,
        path,
        breakdown,
        ranking,
    })
}

fn outcome_for(solve: &ReverseSolve, hospital: VertexId) -> HospitalOutcome {
    let Some(composite_cost) = solve.distance_to(hospital) else {
        return HospitalOutcome::Unreachable;
    };
    // Reached vertices always have a pred chain back to the source.
    let path = solve.forward_path(hospital).expect("reached hospital has a path");
    let edges = solve.path_edges(hospital).expect("reached hospital has path edges");

    // Sum raw criteria along the route.  Reversed edges carry the same
    // attributes as their original-direction counterparts, so these totals
    // are original-direction route metrics.
    let mut breakdown = RouteBreakdown::default();
    for edge in edges {
        let attrs = &solve.reversed().edge_attrs[edge.index()];
        breakdown.travel_time += attrs.travel_time;
        breakdown.cost += attrs.cost;
        breakdown.risk.accumulate(solve.model().risk_share(attrs));
    }

    HospitalOutcome::Reachable { composite_cost, path, breakdown }
}
