//! Dispatch graph representation, builder, and reversal.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `VertexId v`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ vertex_out_start[v] .. vertex_out_start[v+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_attrs`) are sorted by
//! source vertex and indexed by `EdgeId`.  Iteration over a vertex's
//! outgoing edges is therefore a contiguous memory scan — ideal for the
//! Dijkstra inner loop.
//!
//! # Reversal
//!
//! [`DispatchGraph::reversed`] produces a new graph with the same vertex set
//! in which every edge `(u → v, attrs)` appears as `(v → u, attrs)`.  Raw
//! attributes are copied unchanged, only the direction flips.  The original
//! graph is untouched; it remains the reference for forward-direction path
//! reporting.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `VertexId`.  Used
//! to snap an incoming incident location to the closest graph vertex before
//! a query.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use ems_core::{EdgeAttrs, EdgeId, GeoPoint, VertexId, VertexKind};

use crate::{GraphError, GraphResult};

// ── R-tree vertex entry ───────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `VertexId`.
#[derive(Clone)]
struct VertexEntry {
    point: [f32; 2], // [lat, lon]
    id: VertexId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    /// Squared Euclidean distance in lat/lon space.  Sufficient for
    /// nearest-vertex queries within a city (error < 0.1 % at ≤ 60° lat).
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── DispatchGraph ─────────────────────────────────────────────────────────────

/// Directed dispatch graph in CSR format plus a spatial index for vertex
/// snapping.
///
/// Edge arrays are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`DispatchGraphBuilder`], which enforces the
/// well-formedness invariants (unique labels, valid attribute domains, no
/// dangling endpoints) before any solve can run.
pub struct DispatchGraph {
    // ── Vertex data (indexed by VertexId) ─────────────────────────────────
    labels:    Vec<String>,
    kinds:     Vec<VertexKind>,
    positions: Vec<GeoPoint>,
    /// Label → id lookup for callers holding external location names.
    label_idx: FxHashMap<String, VertexId>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of vertex `v` are at EdgeIds
    /// `vertex_out_start[v] .. vertex_out_start[v+1]`.
    /// Length = `vertex_count + 1`.
    pub vertex_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source vertex of each edge.
    pub edge_from: Vec<VertexId>,

    /// Destination vertex of each edge.
    pub edge_to: Vec<VertexId>,

    /// Raw criteria of each edge.  The solver derives composite weights
    /// from these once per query.
    pub edge_attrs: Vec<EdgeAttrs>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<VertexEntry>,
}

impl DispatchGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    // ── Vertex accessors ──────────────────────────────────────────────────

    pub fn label(&self, v: VertexId) -> &str {
        &self.labels[v.index()]
    }

    pub fn kind(&self, v: VertexId) -> VertexKind {
        self.kinds[v.index()]
    }

    pub fn position(&self, v: VertexId) -> GeoPoint {
        self.positions[v.index()]
    }

    /// Look up a vertex by its external location label.
    pub fn vertex_by_label(&self, label: &str) -> Option<VertexId> {
        self.label_idx.get(label).copied()
    }

    /// All vertices tagged [`VertexKind::Hospital`], in id order.
    pub fn hospitals(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.kinds
            .iter()
            .enumerate()
            .filter(|(_, k)| k.is_hospital())
            .map(|(i, _)| VertexId(i as u32))
    }

    /// The vertex tagged [`VertexKind::EmergencySite`], if any.  When the
    /// loader tags several, the lowest id wins.
    pub fn emergency_site(&self) -> Option<VertexId> {
        self.kinds
            .iter()
            .position(|k| *k == VertexKind::EmergencySite)
            .map(|i| VertexId(i as u32))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `vertex`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.vertex_out_start[vertex.index()] as usize;
        let end   = self.vertex_out_start[vertex.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `vertex` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        let start = self.vertex_out_start[vertex.index()] as usize;
        let end   = self.vertex_out_start[vertex.index() + 1] as usize;
        end - start
    }

    /// First edge `from → to`, if one exists.  Linear in `out_degree(from)`;
    /// fine for report metrics, not for inner loops.
    pub fn find_edge(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.out_edges(from).find(|e| self.edge_to[e.index()] == to)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `VertexId` of the nearest graph vertex to `pos`.
    ///
    /// Returns `None` only if the graph has no vertices.
    pub fn snap_to_vertex(&self, pos: GeoPoint) -> Option<VertexId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    // ── Reversal ──────────────────────────────────────────────────────────

    /// Build the reversed graph: every edge `(u → v, attrs)` becomes
    /// `(v → u, attrs)`.
    ///
    /// O(V + E) via counting sort on destination vertices.  Within one
    /// reversed source vertex, edges keep the original graph's edge-id
    /// order, so downstream tie-breaking stays deterministic.  Constructed
    /// once per query and discarded after the solve; `self` is not mutated.
    pub fn reversed(&self) -> DispatchGraph {
        let vertex_count = self.vertex_count();
        let edge_count = self.edge_count();

        // CSR row pointer for the reversed adjacency: count in-edges.
        let mut vertex_out_start = vec![0u32; vertex_count + 1];
        for to in &self.edge_to {
            vertex_out_start[to.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            vertex_out_start[i] += vertex_out_start[i - 1];
        }
        debug_assert_eq!(vertex_out_start[vertex_count] as usize, edge_count);

        // Scatter original edge ids into their reversed CSR slots.
        let mut cursor = vertex_out_start.clone();
        let mut source_edge = vec![0u32; edge_count];
        for e in 0..edge_count {
            let slot = &mut cursor[self.edge_to[e].index()];
            source_edge[*slot as usize] = e as u32;
            *slot += 1;
        }

        let edge_from: Vec<VertexId> =
            source_edge.iter().map(|&e| self.edge_to[e as usize]).collect();
        let edge_to: Vec<VertexId> =
            source_edge.iter().map(|&e| self.edge_from[e as usize]).collect();
        let edge_attrs: Vec<EdgeAttrs> =
            source_edge.iter().map(|&e| self.edge_attrs[e as usize]).collect();

        DispatchGraph {
            labels:    self.labels.clone(),
            kinds:     self.kinds.clone(),
            positions: self.positions.clone(),
            label_idx: self.label_idx.clone(),
            vertex_out_start,
            edge_from,
            edge_to,
            edge_attrs,
            spatial_idx: self.spatial_idx.clone(),
        }
    }
}

// ── DispatchGraphBuilder ──────────────────────────────────────────────────────

/// Construct a [`DispatchGraph`] incrementally, then call
/// [`build`](Self::build).
///
/// The builder accepts vertices and directed edges in any order and rejects
/// malformed input eagerly: duplicate labels, endpoints that were never
/// added, and attributes outside their documented domains all fail at the
/// `add_*` call, so a successfully built graph is well-formed by
/// construction.
///
/// # Example
///
/// ```
/// use ems_core::{EdgeAttrs, GeoPoint, VertexKind};
/// use ems_graph::DispatchGraphBuilder;
///
/// let mut b = DispatchGraphBuilder::new();
/// let h = b.add_vertex("Mongi_Slim", VertexKind::Hospital, GeoPoint::new(36.87, 10.27))?;
/// let e = b.add_vertex("Tunisia_Mall", VertexKind::EmergencySite, GeoPoint::new(36.85, 10.27))?;
/// b.add_edge(h, e, EdgeAttrs::new(6.0, 0.6, 0.7, 0.5, 1.83)?)?;
/// let graph = b.build();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DispatchGraphBuilder {
    labels:    Vec<String>,
    kinds:     Vec<VertexKind>,
    positions: Vec<GeoPoint>,
    label_idx: FxHashMap<String, VertexId>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:  VertexId,
    to:    VertexId,
    attrs: EdgeAttrs,
}

impl DispatchGraphBuilder {
    pub fn new() -> Self {
        Self {
            labels:    Vec::new(),
            kinds:     Vec::new(),
            positions: Vec::new(),
            label_idx: FxHashMap::default(),
            raw_edges: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of vertices and edges to reduce
    /// reallocations when bulk-loading from CSV.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            labels:    Vec::with_capacity(vertices),
            kinds:     Vec::with_capacity(vertices),
            positions: Vec::with_capacity(vertices),
            label_idx: FxHashMap::default(),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a location vertex and return its `VertexId` (sequential from 0).
    ///
    /// Labels must be unique within one graph instance.
    pub fn add_vertex(
        &mut self,
        label: impl Into<String>,
        kind: VertexKind,
        pos: GeoPoint,
    ) -> GraphResult<VertexId> {
        let label = label.into();
        if self.label_idx.contains_key(&label) {
            return Err(GraphError::DuplicateLabel(label));
        }
        let id = VertexId(self.labels.len() as u32);
        self.label_idx.insert(label.clone(), id);
        self.labels.push(label);
        self.kinds.push(kind);
        self.positions.push(pos);
        Ok(id)
    }

    /// Add a **directed** edge from `from` to `to`.
    ///
    /// Rejects endpoints that were never added (`UnknownVertex`) and
    /// attributes outside their domains (`InvalidAttribute`) — nothing is
    /// clamped.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, attrs: EdgeAttrs) -> GraphResult<()> {
        for v in [from, to] {
            if v.index() >= self.labels.len() {
                return Err(GraphError::UnknownVertex(v));
            }
        }
        attrs.validate()?;
        self.raw_edges.push(RawEdge { from, to, attrs });
        Ok(())
    }

    /// Convenience: add edges in **both directions** with identical
    /// attributes, for an undirected road segment.
    pub fn add_road(&mut self, a: VertexId, b: VertexId, attrs: EdgeAttrs) -> GraphResult<()> {
        self.add_edge(a, b, attrs)?;
        self.add_edge(b, a, attrs)
    }

    /// Look up a vertex added earlier by its label (used by the CSV loader
    /// to resolve edge endpoints).
    pub fn vertex_by_label(&self, label: &str) -> Option<VertexId> {
        self.label_idx.get(label).copied()
    }

    pub fn vertex_count(&self) -> usize { self.labels.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`DispatchGraph`].
    ///
    /// Time complexity: O(E log E) for the edge sort + O(V log V) for R-tree
    /// bulk load.  The sort is stable so edges keep insertion order within
    /// one source vertex — required for reproducible tie-breaking later.
    pub fn build(self) -> DispatchGraph {
        let vertex_count = self.labels.len();
        let edge_count = self.raw_edges.len();

        // Stable sort by source vertex for CSR construction.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:  Vec<VertexId>  = raw.iter().map(|e| e.from).collect();
        let edge_to:    Vec<VertexId>  = raw.iter().map(|e| e.to).collect();
        let edge_attrs: Vec<EdgeAttrs> = raw.iter().map(|e| e.attrs).collect();

        // Build CSR row pointer (vertex_out_start).
        let mut vertex_out_start = vec![0u32; vertex_count + 1];
        for e in &raw {
            vertex_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            vertex_out_start[i] += vertex_out_start[i - 1];
        }
        debug_assert_eq!(vertex_out_start[vertex_count] as usize, edge_count);

        // Bulk-load R-tree for O(V log V) construction (faster than V inserts).
        let entries: Vec<VertexEntry> = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| VertexEntry {
                point: [pos.lat, pos.lon],
                id: VertexId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        DispatchGraph {
            labels: self.labels,
            kinds: self.kinds,
            positions: self.positions,
            label_idx: self.label_idx,
            vertex_out_start,
            edge_from,
            edge_to,
            edge_attrs,
            spatial_idx,
        }
    }
}

impl Default for DispatchGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
