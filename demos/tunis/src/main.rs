//! tunis — ambulance dispatch demo for the rust_ems planner.
//!
//! Rebuilds the source study's Tunis network (4 hospitals, incident at
//! Tunisia Mall), runs one dispatch query, and prints the text report.

mod network;

use std::io::stdout;
use std::time::Instant;

use anyhow::{Context, Result};

use ems_core::WeightModel;
use ems_report::write_text_report;
use ems_solve::plan_dispatch;

use network::build_network;

fn main() -> Result<()> {
    let graph = build_network()?;
    let model = WeightModel::standard();

    let emergency = graph
        .emergency_site()
        .context("network has no emergency site vertex")?;
    let hospitals: Vec<_> = graph.hospitals().collect();

    println!(
        "Tunis network: {} vertices, {} edges, {} hospitals",
        graph.vertex_count(),
        graph.edge_count(),
        hospitals.len()
    );

    let started = Instant::now();
    let result = plan_dispatch(&graph, &model, emergency, &hospitals)
        .context("dispatch query failed")?;
    println!("Solved in {:?}\n", started.elapsed());

    write_text_report(&mut stdout().lock(), &graph, &result)?;
    Ok(())
}
