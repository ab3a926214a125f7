//! Console-style text report.

use std::io::Write;

use ems_graph::DispatchGraph;
use ems_solve::{DispatchResult, HospitalOutcome};

use crate::ReportResult;

/// Join a vertex path into `A → B → C` using graph labels.
fn route_string(graph: &DispatchGraph, path: &[ems_core::VertexId]) -> String {
    path.iter()
        .map(|&v| graph.label(v))
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Write a human-readable dispatch report.
///
/// Layout: the selected dispatch first (hospital, cost, route, straight-line
/// distance, per-criterion breakdown), then the full hospital ranking with
/// unreachable hospitals marked as such.
pub fn write_text_report<W: Write>(
    w: &mut W,
    graph: &DispatchGraph,
    result: &DispatchResult,
) -> ReportResult<()> {
    let emergency = result.emergency;

    writeln!(w, "Dispatch plan — emergency at {}", graph.label(emergency))?;
    writeln!(
        w,
        "Selected hospital: {} (composite cost {:.4})",
        graph.label(result.selected),
        result.total_cost
    )?;
    writeln!(w, "Route: {}", route_string(graph, &result.path))?;

    let crow_km = graph
        .position(result.selected)
        .distance_m(graph.position(emergency))
        / 1_000.0;
    writeln!(w, "Straight-line distance: {crow_km:.1} km")?;

    let b = &result.breakdown;
    writeln!(
        w,
        "Breakdown: {:.1} min travel, {:.2} cost, weighted IT risk {:.4} \
         (network {:.4}, gps {:.4}, data {:.4})",
        b.travel_time,
        b.cost,
        b.risk.total(),
        b.risk.network,
        b.risk.gps,
        b.risk.data,
    )?;

    writeln!(w)?;
    writeln!(w, "Hospital ranking:")?;
    for (i, rank) in result.ranking.iter().enumerate() {
        let label = graph.label(rank.hospital);
        match &rank.outcome {
            HospitalOutcome::Reachable { composite_cost, path, .. } => {
                writeln!(
                    w,
                    "  {}. {:<20} {:.4}  {}",
                    i + 1,
                    label,
                    composite_cost,
                    route_string(graph, path)
                )?;
            }
            HospitalOutcome::Unreachable => {
                writeln!(w, "  -. {label:<20} unreachable")?;
            }
        }
    }
    Ok(())
}
