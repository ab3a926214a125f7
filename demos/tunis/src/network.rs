//! The Tunis dispatch network from the source study.
//!
//! Four hospitals, five intermediate junctions, and the incident site at
//! Tunisia Mall.  Edge attributes come from the study's field estimates;
//! the study records per-edge *risk* factors, so reliabilities here are
//! `1 − risk`.  Coordinates are approximate city positions, good enough for
//! the report's straight-line distance line.

use anyhow::Result;

use ems_core::{EdgeAttrs, GeoPoint, VertexKind};
use ems_graph::{DispatchGraph, DispatchGraphBuilder};

pub fn build_network() -> Result<DispatchGraph> {
    let mut b = DispatchGraphBuilder::with_capacity(10, 11);

    // ── Hospitals ─────────────────────────────────────────────────────────
    let mongi   = b.add_vertex("Mongi_Slim", VertexKind::Hospital, GeoPoint::new(36.8866, 10.3214))?;
    let charles = b.add_vertex("Charles_Nicolle", VertexKind::Hospital, GeoPoint::new(36.8101, 10.1622))?;
    let habib   = b.add_vertex("Habib_Thamer", VertexKind::Hospital, GeoPoint::new(36.7902, 10.1756))?;
    let rabta   = b.add_vertex("Rabta", VertexKind::Hospital, GeoPoint::new(36.8156, 10.1514))?;

    // ── Intermediate junctions ────────────────────────────────────────────
    let ain    = b.add_vertex("Ain_Zaghouan", VertexKind::Intermediate, GeoPoint::new(36.8638, 10.2953))?;
    let jardin = b.add_vertex("Jardin_Carthage", VertexKind::Intermediate, GeoPoint::new(36.8534, 10.3102))?;
    let moncef = b.add_vertex("Avenue_Moncef_Bey", VertexKind::Intermediate, GeoPoint::new(36.7948, 10.1897))?;
    let sadoun = b.add_vertex("Bab_Sadoun", VertexKind::Intermediate, GeoPoint::new(36.8123, 10.1560))?;
    let bhar   = b.add_vertex("Beb_Bhar", VertexKind::Intermediate, GeoPoint::new(36.7971, 10.1822))?;

    // ── Emergency site ────────────────────────────────────────────────────
    let mall = b.add_vertex("Tunisia_Mall", VertexKind::EmergencySite, GeoPoint::new(36.8482, 10.2724))?;

    // Edge: (from, to, minutes, cost TND, risk (network, gps, data)).
    let edge = |b: &mut DispatchGraphBuilder, from, to, t, c, risk: (f64, f64, f64)| {
        let attrs = EdgeAttrs::new(t, 1.0 - risk.0, 1.0 - risk.1, 1.0 - risk.2, c)?;
        b.add_edge(from, to, attrs)?;
        Ok::<(), anyhow::Error>(())
    };

    edge(&mut b, mongi, ain, 3.0, 0.76, (0.4, 0.5, 0.3))?;
    edge(&mut b, mongi, jardin, 5.0, 1.77, (0.3, 0.4, 0.2))?;
    edge(&mut b, charles, sadoun, 2.0, 0.88, (0.5, 0.6, 0.4))?;
    edge(&mut b, charles, bhar, 9.0, 1.89, (0.4, 0.5, 0.3))?;
    edge(&mut b, habib, moncef, 5.0, 1.07, (0.3, 0.4, 0.2))?;
    edge(&mut b, rabta, sadoun, 5.0, 0.88, (0.4, 0.5, 0.4))?;
    edge(&mut b, ain, mall, 6.0, 1.83, (0.6, 0.7, 0.5))?;
    edge(&mut b, jardin, mall, 9.0, 1.96, (0.2, 0.3, 0.1))?;
    edge(&mut b, moncef, mall, 19.0, 7.575, (0.3, 0.4, 0.2))?;
    edge(&mut b, sadoun, mall, 22.0, 8.21, (0.5, 0.6, 0.4))?;
    edge(&mut b, bhar, mall, 22.0, 8.21, (0.4, 0.5, 0.3))?;

    Ok(b.build())
}
