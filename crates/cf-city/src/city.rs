//! City graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays are sorted by tail node and indexed by `EdgeId`, so
//! iteration over a node's outgoing edges is a contiguous memory scan —
//! ideal for the planner's relaxation loop.
//!
//! # Mutability
//!
//! Per-edge `length` and `capacity` are fixed at build time.  `occupancy`
//! and the `blocked` flag are the only mutable state; they are updated by
//! the simulation layer, never by the planner or a policy (both of which
//! only ever see `&City`).

use cf_core::{EdgeId, NodeId};

// ── City ──────────────────────────────────────────────────────────────────────

/// Directed capacity-constrained street graph.
///
/// Construct via [`CityBuilder`]; all read access goes through the accessor
/// methods below.  Indexing with an ID that does not belong to this city is
/// a caller contract violation and panics.
#[derive(Debug)]
pub struct City {
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.  Length = node_count + 1.
    node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Tail node of each edge.  Redundant with CSR but required for
    /// efficient route reconstruction (trace `prev_edge` back to its tail).
    edge_from: Vec<NodeId>,

    /// Head node of each edge.
    edge_to: Vec<NodeId>,

    /// Intrinsic travel cost of each edge.  Non-negative, immutable.
    edge_length: Vec<f64>,

    /// Maximum simultaneous occupancy of each edge.  Positive, immutable.
    edge_capacity: Vec<f64>,

    /// Current load on each edge.  Non-negative; may transiently exceed
    /// capacity under congestion.  Mutated only by the simulation layer.
    edge_occupancy: Vec<f64>,

    /// Road-closure flags.  Blocked edges are skipped during planning and
    /// cannot be entered by agents.
    edge_blocked: Vec<bool>,
}

impl City {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_out_start.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// The `EdgeId` of the directed edge `from → to`, if one exists.
    ///
    /// Linear in the out-degree of `from`; intended for scenario setup and
    /// tests, not hot paths.
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.out_edges(from).find(|&e| self.edge_to[e.index()] == to)
    }

    // ── Per-edge accessors ────────────────────────────────────────────────

    /// Tail (source) node of `edge`.
    #[inline]
    pub fn edge_from(&self, edge: EdgeId) -> NodeId {
        self.edge_from[edge.index()]
    }

    /// Head (destination) node of `edge`.
    #[inline]
    pub fn edge_to(&self, edge: EdgeId) -> NodeId {
        self.edge_to[edge.index()]
    }

    /// Intrinsic travel cost of `edge`.  Never changes after build.
    #[inline]
    pub fn length(&self, edge: EdgeId) -> f64 {
        self.edge_length[edge.index()]
    }

    /// Maximum simultaneous occupancy of `edge`.  Never changes after build.
    #[inline]
    pub fn capacity(&self, edge: EdgeId) -> f64 {
        self.edge_capacity[edge.index()]
    }

    /// Current load on `edge`.
    #[inline]
    pub fn occupancy(&self, edge: EdgeId) -> f64 {
        self.edge_occupancy[edge.index()]
    }

    /// Whether `edge` is closed to traffic.
    #[inline]
    pub fn is_blocked(&self, edge: EdgeId) -> bool {
        self.edge_blocked[edge.index()]
    }

    // ── Occupancy mutators (simulation layer only) ────────────────────────

    /// Overwrite the load on `edge`.  Negative values are clamped to zero;
    /// values above capacity are kept as-is (transient congestion is legal).
    pub fn set_occupancy(&mut self, edge: EdgeId, occupancy: f64) {
        self.edge_occupancy[edge.index()] = occupancy.max(0.0);
    }

    /// Record one more unit of load on `edge` (an agent entering it).
    pub fn add_occupant(&mut self, edge: EdgeId) {
        self.edge_occupancy[edge.index()] += 1.0;
    }

    /// Record one unit of load leaving `edge`.  Saturates at zero.
    pub fn remove_occupant(&mut self, edge: EdgeId) {
        let occ = &mut self.edge_occupancy[edge.index()];
        *occ = (*occ - 1.0).max(0.0);
    }

    /// Reset every edge's load to zero (scenario reset).
    pub fn clear_occupancy(&mut self) {
        self.edge_occupancy.fill(0.0);
    }

    /// Open or close `edge` to traffic.
    pub fn set_blocked(&mut self, edge: EdgeId, blocked: bool) {
        self.edge_blocked[edge.index()] = blocked;
    }
}

// ── CityBuilder ───────────────────────────────────────────────────────────────

/// Construct a [`City`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and directed streets in any order.  `build()`
/// sorts streets by tail node and constructs the CSR arrays.
///
/// # Example
///
/// ```
/// use cf_city::CityBuilder;
///
/// let mut b = CityBuilder::new();
/// let a = b.add_node();
/// let c = b.add_node();
/// b.add_street(a, c, 1.5, 4.0); // one-way, length 1.5, capacity 4
/// let city = b.build();
/// assert_eq!(city.node_count(), 2);
/// assert_eq!(city.edge_count(), 1);
/// ```
pub struct CityBuilder {
    node_count: usize,
    raw_edges: Vec<RawStreet>,
}

struct RawStreet {
    from: NodeId,
    to: NodeId,
    length: f64,
    capacity: f64,
}

impl CityBuilder {
    pub fn new() -> Self {
        Self { node_count: 0, raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of streets to reduce
    /// reallocations when bulk-loading a scenario.
    pub fn with_capacity(edges: usize) -> Self {
        Self { node_count: 0, raw_edges: Vec::with_capacity(edges) }
    }

    /// Add an intersection and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.node_count as u32);
        self.node_count += 1;
        id
    }

    /// Add `n` intersections at once; returns the id of the first.
    pub fn add_nodes(&mut self, n: usize) -> NodeId {
        let first = NodeId(self.node_count as u32);
        self.node_count += n;
        first
    }

    /// Add a **directed** street from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint was not added first, if `length` is
    /// negative or non-finite, or if `capacity` is not strictly positive.
    /// These are construction contract violations, not runtime conditions.
    pub fn add_street(&mut self, from: NodeId, to: NodeId, length: f64, capacity: f64) {
        assert!(
            from.index() < self.node_count && to.index() < self.node_count,
            "street endpoint out of range: {from} -> {to} with {} nodes",
            self.node_count
        );
        assert!(
            length.is_finite() && length >= 0.0,
            "street length must be finite and non-negative, got {length}"
        );
        assert!(
            capacity.is_finite() && capacity > 0.0,
            "street capacity must be finite and positive, got {capacity}"
        );
        self.raw_edges.push(RawStreet { from, to, length, capacity });
    }

    /// Convenience: add streets in **both directions** between `a` and `b`.
    pub fn add_two_way(&mut self, a: NodeId, b: NodeId, length: f64, capacity: f64) {
        self.add_street(a, b, length, capacity);
        self.add_street(b, a, length, capacity);
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.raw_edges.len()
    }

    /// Consume the builder and produce a [`City`].
    ///
    /// Time complexity: O(E log E) for the tail-node sort, where E = streets.
    pub fn build(self) -> City {
        let node_count = self.node_count;
        let edge_count = self.raw_edges.len();

        // Sort streets by tail node for CSR construction.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from: Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to: Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length: Vec<f64> = raw.iter().map(|e| e.length).collect();
        let edge_capacity: Vec<f64> = raw.iter().map(|e| e.capacity).collect();

        // Build CSR row pointer.
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        City {
            node_out_start,
            edge_from,
            edge_to,
            edge_length,
            edge_capacity,
            edge_occupancy: vec![0.0; edge_count],
            edge_blocked: vec![false; edge_count],
        }
    }
}

impl Default for CityBuilder {
    fn default() -> Self {
        Self::new()
    }
}
