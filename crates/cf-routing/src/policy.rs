//! The `RoutePolicy` trait and its shipped implementations.
//!
//! A policy bundles two independent strategies:
//!
//! 1. a **cost model** — how expensive is it to cross a given street right
//!    now, and
//! 2. an **adaptivity rule** — should an agent standing at a node recompute
//!    its route.
//!
//! Separating the two lets a policy pair any cost model with any reroute
//! cadence while the planner stays ignorant of both.

use cf_agent::Agent;
use cf_city::City;
use cf_core::EdgeId;

/// Pluggable routing strategy.
///
/// Implementations must be pure: every decision is a function of the `City`
/// and `Agent` passed in at call time, with no internal graph or agent state.
/// A policy may be lightly parameterized (a weighting coefficient, say) but
/// holds nothing mutable.
///
/// # Contract
///
/// [`edge_cost`][Self::edge_cost] must return a finite, non-negative value
/// for every edge belonging to `city`.  Dijkstra's correctness is not
/// guaranteed if a policy violates non-negativity; the planner debug-asserts
/// it.  Passing an `EdgeId` from a different city is a contract violation
/// and may panic.
///
/// # Thread safety
///
/// `Send + Sync` so a policy can be shared by planners running read-only
/// queries from multiple threads (the host must still keep occupancy fixed
/// for the duration of such a batch).
pub trait RoutePolicy: Send + Sync {
    /// Traversal cost of `edge` under this policy's model, given the city's
    /// current state.  May read occupancy; must not depend on anything else
    /// mutable.
    fn edge_cost(&self, city: &City, edge: EdgeId) -> f64;

    /// Whether `agent`, standing at a node, should recompute its route now.
    fn should_reroute_on_node(&self, agent: &Agent) -> bool;
}

// ── ShortestPathPolicy ────────────────────────────────────────────────────────

/// Static shortest-path routing: cost is the street's intrinsic length,
/// traffic is ignored entirely.
///
/// Since static weights never change, a computed route never needs
/// recomputation — the reroute rule fires only for agents with no route.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortestPathPolicy;

impl RoutePolicy for ShortestPathPolicy {
    fn edge_cost(&self, city: &City, edge: EdgeId) -> f64 {
        city.length(edge)
    }

    fn should_reroute_on_node(&self, agent: &Agent) -> bool {
        agent.path().is_empty()
    }
}

// ── CongestionPolicy ──────────────────────────────────────────────────────────

/// Default congestion weighting.
pub const DEFAULT_ALPHA: f64 = 2.0;

/// Congestion-aware routing:
///
/// ```text
/// cost = length + alpha * occupancy / capacity
/// ```
///
/// At zero occupancy the cost reduces to the street length; it grows
/// strictly with relative load.  Because traffic may have shifted since the
/// last computation, every node arrival triggers a fresh search.
#[derive(Debug, Clone, Copy)]
pub struct CongestionPolicy {
    alpha: f64,
}

impl CongestionPolicy {
    /// A policy with the given congestion weighting.
    ///
    /// # Panics
    ///
    /// Panics if `alpha` is negative or non-finite, which could make edge
    /// costs negative and break the planner's preconditions.
    pub fn new(alpha: f64) -> Self {
        assert!(
            alpha.is_finite() && alpha >= 0.0,
            "congestion weighting must be finite and non-negative, got {alpha}"
        );
        Self { alpha }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Default for CongestionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

impl RoutePolicy for CongestionPolicy {
    fn edge_cost(&self, city: &City, edge: EdgeId) -> f64 {
        city.length(edge) + self.alpha * city.occupancy(edge) / city.capacity(edge)
    }

    fn should_reroute_on_node(&self, _agent: &Agent) -> bool {
        true
    }
}
