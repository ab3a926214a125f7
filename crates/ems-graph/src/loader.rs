//! CSV graph loader.
//!
//! # CSV format
//!
//! Two files: one for vertices, one for directed edges.  Vertices must be
//! loaded first because edges reference them by label.
//!
//! ```csv
//! label,kind,lat,lon
//! Mongi_Slim,hospital,36.8705,10.2715
//! Tunisia_Mall,emergency,36.8482,10.2724
//! Ain_Zaghouan,intermediate,36.8611,10.2610
//! ```
//!
//! ```csv
//! from,to,travel_time,network_reliability,gps_accuracy,data_integrity,cost
//! Mongi_Slim,Ain_Zaghouan,3,0.6,0.5,0.7,0.76
//! Ain_Zaghouan,Tunisia_Mall,6,0.4,0.3,0.5,1.83
//! ```
//!
//! **`kind`** field:
//!
//! | Value          | Meaning                      |
//! |----------------|------------------------------|
//! | `hospital`     | `VertexKind::Hospital`       |
//! | `emergency`    | `VertexKind::EmergencySite`  |
//! | `intermediate` | `VertexKind::Intermediate`   |
//!
//! Rows with unknown labels, unknown kinds, or out-of-domain attributes are
//! rejected — the loader never builds a graph the solver could choke on.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ems_core::{EdgeAttrs, GeoPoint, VertexKind};

use crate::network::{DispatchGraph, DispatchGraphBuilder};
use crate::{GraphError, GraphResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct VertexRecord {
    label: String,
    kind:  String,
    lat:   f32,
    lon:   f32,
}

#[derive(Deserialize)]
struct EdgeRecord {
    from:                String,
    to:                  String,
    travel_time:         f64,
    network_reliability: f64,
    gps_accuracy:        f64,
    data_integrity:      f64,
    cost:                f64,
}

fn parse_kind(s: &str) -> GraphResult<VertexKind> {
    match s {
        "hospital"     => Ok(VertexKind::Hospital),
        "emergency"    => Ok(VertexKind::EmergencySite),
        "intermediate" => Ok(VertexKind::Intermediate),
        other => Err(GraphError::Parse(format!("unknown vertex kind `{other}`"))),
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`DispatchGraph`] from a vertex CSV and an edge CSV.
pub fn load_graph_csv(vertices: &Path, edges: &Path) -> GraphResult<DispatchGraph> {
    let v = std::fs::File::open(vertices).map_err(GraphError::Io)?;
    let e = std::fs::File::open(edges).map_err(GraphError::Io)?;
    load_graph_readers(v, e)
}

/// Like [`load_graph_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass `std::io::Cursor`s) or loading from embedded
/// string constants.
pub fn load_graph_readers<V: Read, E: Read>(vertices: V, edges: E) -> GraphResult<DispatchGraph> {
    let mut builder = DispatchGraphBuilder::new();

    // ── Vertices ──────────────────────────────────────────────────────────
    let mut vertex_reader = csv::Reader::from_reader(vertices);
    for result in vertex_reader.deserialize::<VertexRecord>() {
        let row = result.map_err(|e| GraphError::Parse(e.to_string()))?;
        let kind = parse_kind(&row.kind)?;
        builder.add_vertex(row.label, kind, GeoPoint::new(row.lat, row.lon))?;
    }

    // ── Edges ─────────────────────────────────────────────────────────────
    let mut edge_reader = csv::Reader::from_reader(edges);
    for result in edge_reader.deserialize::<EdgeRecord>() {
        let row = result.map_err(|e| GraphError::Parse(e.to_string()))?;

        let from = builder_lookup(&builder, &row.from)?;
        let to = builder_lookup(&builder, &row.to)?;
        let attrs = EdgeAttrs::new(
            row.travel_time,
            row.network_reliability,
            row.gps_accuracy,
            row.data_integrity,
            row.cost,
        )?;
        builder.add_edge(from, to, attrs)?;
    }

    Ok(builder.build())
}

fn builder_lookup(
    builder: &DispatchGraphBuilder,
    label: &str,
) -> GraphResult<ems_core::VertexId> {
    builder
        .vertex_by_label(label)
        .ok_or_else(|| GraphError::Parse(format!("edge references unknown vertex `{label}`")))
}
