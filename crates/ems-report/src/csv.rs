//! CSV ranking export.
//!
//! One row per queried hospital, reachable or not, in ranking order.
//! Unreachable hospitals get empty numeric columns and status `unreachable`
//! rather than being dropped.

use std::io::Write;

use csv::Writer;

use ems_graph::DispatchGraph;
use ems_solve::{DispatchResult, HospitalOutcome};

use crate::ReportResult;

/// Write the hospital ranking as CSV.
///
/// Columns: `rank,hospital,status,composite_cost,travel_time_min,cost,`
/// `risk_network,risk_gps,risk_data,route`.  The route column joins vertex
/// labels with `|` so it survives comma-separated parsing.
pub fn write_ranking_csv<W: Write>(
    w: W,
    graph: &DispatchGraph,
    result: &DispatchResult,
) -> ReportResult<()> {
    let mut out = Writer::from_writer(w);
    out.write_record([
        "rank",
        "hospital",
        "status",
        "composite_cost",
        "travel_time_min",
        "cost",
        "risk_network",
        "risk_gps",
        "risk_data",
        "route",
    ])?;

    for (i, rank) in result.ranking.iter().enumerate() {
        let label = graph.label(rank.hospital);
        match &rank.outcome {
            HospitalOutcome::Reachable { composite_cost, path, breakdown } => {
                let route = path
                    .iter()
                    .map(|&v| graph.label(v))
                    .collect::<Vec<_>>()
                    .join("|");
                out.write_record(&[
                    (i + 1).to_string(),
                    label.to_string(),
                    "reachable".to_string(),
                    format!("{composite_cost:.6}"),
                    format!("{:.3}", breakdown.travel_time),
                    format!("{:.3}", breakdown.cost),
                    format!("{:.6}", breakdown.risk.network),
                    format!("{:.6}", breakdown.risk.gps),
                    format!("{:.6}", breakdown.risk.data),
                    route,
                ])?;
            }
            HospitalOutcome::Unreachable => {
                out.write_record(&[
                    String::new(),
                    label.to_string(),
                    "unreachable".to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                ])?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
