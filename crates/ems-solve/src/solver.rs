//! Reverse single-source Dijkstra.
//!
//! # Algorithm
//!
//! The solve runs on the **reversed** graph from the emergency vertex.  A
//! shortest path emergency → hospital in the reversed graph is exactly a
//! shortest path hospital → emergency in the original direction, so one run
//! prices every hospital simultaneously.
//!
//! Vertices move through three states: unvisited → frontier (in the heap) →
//! settled.  A vertex settles exactly once, when popped with the minimal
//! tentative distance; settled vertices never re-enter the frontier.
//!
//! # Determinism
//!
//! Heap entries carry a push sequence number as secondary key, so two
//! frontier entries with equal tentative distance pop in insertion order.
//! Together with the graph's stable edge ordering this makes every solve
//! bit-for-bit reproducible.
//!
//! # Weights
//!
//! Composite weights are computed once per edge, up front, before the
//! relaxation loop — never inside it.  Any negative or non-finite weight
//! aborts the solve with [`SolveError::InvalidWeight`]: Dijkstra's
//! correctness depends on non-negative weights, and a silently wrong
//! ranking is worse than no ranking.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ems_core::{EdgeId, VertexId, WeightModel};
use ems_graph::DispatchGraph;

use crate::{SolveError, SolveResult};

// ── DistanceTable ─────────────────────────────────────────────────────────────

/// Per-vertex solver state, SoA layout.  Indexed by `VertexId`.
///
/// `dist` is `f64::INFINITY` for unreached vertices; `pred_vertex` /
/// `pred_edge` are `INVALID` for the source and for unreached vertices.
/// `pred_edge` ids refer to the **reversed** graph.
pub struct DistanceTable {
    pub dist:        Vec<f64>,
    pub pred_vertex: Vec<VertexId>,
    pub pred_edge:   Vec<EdgeId>,
    pub settled:     Vec<bool>,
}

impl DistanceTable {
    fn new(vertex_count: usize) -> Self {
        Self {
            dist:        vec![f64::INFINITY; vertex_count],
            pred_vertex: vec![VertexId::INVALID; vertex_count],
            pred_edge:   vec![EdgeId::INVALID; vertex_count],
            settled:     vec![false; vertex_count],
        }
    }

    /// `true` if the solve found any path between `v` and the source.
    #[inline]
    pub fn is_reached(&self, v: VertexId) -> bool {
        self.dist[v.index()].is_finite()
    }
}

// ── Frontier entry ────────────────────────────────────────────────────────────

/// Heap entry: tentative distance, then push sequence for stable ties.
///
/// `BinaryHeap` is a max-heap, so `Ord` is inverted: smaller distance (and,
/// on equal distance, earlier push) compares greater.
struct FrontierEntry {
    dist:   f64,
    seq:    u64,
    vertex: VertexId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

// ── ReverseSolve ──────────────────────────────────────────────────────────────

/// The completed result of one reverse-Dijkstra run.
///
/// Owns the reversed graph (built once per query, discarded with the solve)
/// and the distance table; the original graph is left untouched for
/// forward-direction reporting.
pub struct ReverseSolve {
    reversed: DispatchGraph,
    model:    WeightModel,
    source:   VertexId,
    table:    DistanceTable,
}

impl ReverseSolve {
    /// Reverse the graph and run Dijkstra from `emergency`.
    ///
    /// `hospitals` only drives the early exit: once every listed hospital is
    /// settled the loop stops, which cannot change any settled distance.
    /// Passing an empty slice runs the solve to full settlement.
    pub fn run(
        graph: &DispatchGraph,
        model: &WeightModel,
        emergency: VertexId,
        hospitals: &[VertexId],
    ) -> SolveResult<Self> {
        let vertex_count = graph.vertex_count();
        for &v in hospitals.iter().chain(std::iter::once(&emergency)) {
            if v.index() >= vertex_count {
                return Err(SolveError::UnknownVertex(v));
            }
        }

        let reversed = graph.reversed();
        let weights = composite_weights(&reversed, model)?;

        let mut table = DistanceTable::new(vertex_count);
        table.dist[emergency.index()] = 0.0;

        let mut is_target = vec![false; vertex_count];
        for &h in hospitals {
            is_target[h.index()] = true;
        }
        let mut targets_open = is_target.iter().filter(|t| **t).count();

        let mut heap: BinaryHeap<FrontierEntry> = BinaryHeap::new();
        let mut seq = 0u64;
        heap.push(FrontierEntry { dist: 0.0, seq, vertex: emergency });

        while let Some(entry) = heap.pop() {
            let u = entry.vertex;
            // Stale entry: already settled via a shorter path.
            if table.settled[u.index()] {
                continue;
            }
            table.settled[u.index()] = true;

            if is_target[u.index()] {
                targets_open -= 1;
                if targets_open == 0 {
                    break;
                }
            }

            let base = table.dist[u.index()];
            for edge in reversed.out_edges(u) {
                let w = reversed.edge_to[edge.index()];
                if table.settled[w.index()] {
                    continue;
                }
                let candidate = base + weights[edge.index()];
                if candidate < table.dist[w.index()] {
                    table.dist[w.index()] = candidate;
                    table.pred_vertex[w.index()] = u;
                    table.pred_edge[w.index()] = edge;
                    seq += 1;
                    heap.push(FrontierEntry { dist: candidate, seq, vertex: w });
                }
            }
        }

        Ok(Self { reversed, model: *model, source: emergency, table })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The reversed graph the solve ran on.  Its edge attributes equal the
    /// original-direction attributes, so route metrics can be summed here.
    pub fn reversed(&self) -> &DispatchGraph {
        &self.reversed
    }

    pub fn model(&self) -> &WeightModel {
        &self.model
    }

    /// The emergency vertex the solve started from.
    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn table(&self) -> &DistanceTable {
        &self.table
    }

    /// Minimal composite cost from `v` to the emergency site in the original
    /// direction, or `None` if unreachable.
    pub fn distance_to(&self, v: VertexId) -> Option<f64> {
        self.table.is_reached(v).then(|| self.table.dist[v.index()])
    }

    // ── Path reconstruction ───────────────────────────────────────────────

    /// Forward-direction path from `start` to the emergency site.
    ///
    /// Predecessor links in the reversed solve point back toward the source,
    /// and each reversed edge `(u → v)` corresponds to the original edge
    /// `(v → u)` — so walking the chain from `start` already yields the
    /// vertex sequence in original hospital → emergency order.  No final
    /// reversal is needed; that is the payoff of running the solve backward.
    ///
    /// Returns `None` if `start` was never reached.
    pub fn forward_path(&self, start: VertexId) -> Option<Vec<VertexId>> {
        if !self.table.is_reached(start) {
            return None;
        }
        let mut path = vec![start];
        let mut current = start;
        while current != self.source {
            current = self.table.pred_vertex[current.index()];
            path.push(current);
        }
        Some(path)
    }

    /// Reversed-graph edge ids along [`forward_path`](Self::forward_path),
    /// for summing per-criterion route metrics.
    pub fn path_edges(&self, start: VertexId) -> Option<Vec<EdgeId>> {
        if !self.table.is_reached(start) {
            return None;
        }
        let mut edges = Vec::new();
        let mut current = start;
        while current != self.source {
            edges.push(self.table.pred_edge[current.index()]);
            current = self.table.pred_vertex[current.index()];
        }
        Some(edges)
    }
}

// ── Weight precomputation ─────────────────────────────────────────────────────

/// Composite weight of every edge, computed exactly once per query.
///
/// Fails fast on the first negative or non-finite weight.  The builder's
/// attribute domains make this impossible for a valid model, so hitting it
/// means a coefficient or scale bug upstream.
fn composite_weights(graph: &DispatchGraph, model: &WeightModel) -> SolveResult<Vec<f64>> {
    graph
        .edge_attrs
        .iter()
        .enumerate()
        .map(|(i, attrs)| {
            let w = model.composite(attrs);
            if w.is_finite() && w >= 0.0 {
                Ok(w)
            } else {
                Err(SolveError::InvalidWeight { edge: EdgeId(i as u32), value: w })
            }
        })
        .collect()
}
