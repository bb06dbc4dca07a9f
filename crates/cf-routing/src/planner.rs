//! The route planner: policy-driven Dijkstra over the city graph.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use cf_agent::{Agent, Path};
use cf_city::City;
use cf_core::{EdgeId, NodeId};

use crate::RoutePolicy;

// ── Frontier entry ────────────────────────────────────────────────────────────

/// A `(tentative cost, node)` frontier entry, ordered so the `BinaryHeap`
/// max-heap pops the cheapest entry first.  Ties break on node id; callers
/// must not read any meaning into which of several equal-cost routes wins.
struct Candidate {
    cost: f64,
    node: NodeId,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: the cheapest candidate must be the heap maximum.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

// ── RoutePlanner ──────────────────────────────────────────────────────────────

/// Computes routes for agents using the currently bound [`RoutePolicy`].
///
/// The planner holds no search state between calls; its only persistent
/// state is the boxed policy, swappable at any time between computations via
/// [`set_policy`](Self::set_policy).  A swap never affects a previously
/// returned path.
///
/// Unreachable destinations are an expected outcome and yield an empty path,
/// never an error.  Passing a city/agent pair whose IDs don't belong
/// together is a contract violation and panics.
pub struct RoutePlanner {
    policy: Box<dyn RoutePolicy>,
}

impl RoutePlanner {
    /// A planner bound to `policy`.
    pub fn new(policy: Box<dyn RoutePolicy>) -> Self {
        Self { policy }
    }

    /// Replace the active policy.  Takes effect for the next
    /// [`compute_path`](Self::compute_path) call; in-flight paths computed
    /// under the old policy are unaffected.
    pub fn set_policy(&mut self, policy: Box<dyn RoutePolicy>) {
        self.policy = policy;
    }

    /// The currently bound policy.
    pub fn policy(&self) -> &dyn RoutePolicy {
        self.policy.as_ref()
    }

    /// Plan a route for `agent` at its current decision point.
    ///
    /// 1. If the policy's reroute rule says no, the agent's existing path is
    ///    returned unchanged — no search runs.
    /// 2. Otherwise a shortest-path search runs from the agent's current
    ///    node to its destination, weighting each street by
    ///    [`RoutePolicy::edge_cost`].
    /// 3. No route (destination unreachable, or current node equals the
    ///    destination) returns an empty path.
    ///
    /// The call has no side effect on the city or the agent; the caller
    /// decides whether to install the returned path.
    pub fn compute_path(&self, city: &City, agent: &Agent) -> Path {
        if !self.policy.should_reroute_on_node(agent) {
            return agent.path().clone();
        }

        let start = agent.current_node();
        let goal = agent.destination();
        if start == goal {
            return Path::new();
        }

        self.dijkstra(city, start, goal)
    }

    /// Single-source shortest path from `start`, stopping as soon as `goal`
    /// is finalized.  Stale frontier entries are skipped lazily on
    /// extraction.  Blocked streets are never relaxed.
    fn dijkstra(&self, city: &City, start: NodeId, goal: NodeId) -> Path {
        let n = city.node_count();
        // dist[v] = best known cost to reach v.
        let mut dist = vec![f64::INFINITY; n];
        // prev_edge[v] = edge that reached v; INVALID while unreached.
        let mut prev_edge = vec![EdgeId::INVALID; n];

        dist[start.index()] = 0.0;
        let mut frontier = BinaryHeap::new();
        frontier.push(Candidate { cost: 0.0, node: start });

        while let Some(Candidate { cost, node }) = frontier.pop() {
            if node == goal {
                return reconstruct(city, &prev_edge, start, goal);
            }
            if cost > dist[node.index()] {
                continue; // stale entry; node already finalized cheaper
            }

            for edge in city.out_edges(node) {
                if city.is_blocked(edge) {
                    continue;
                }
                let edge_cost = self.policy.edge_cost(city, edge);
                debug_assert!(
                    edge_cost.is_finite() && edge_cost >= 0.0,
                    "policy returned invalid cost {edge_cost} for {edge}"
                );

                let neighbor = city.edge_to(edge);
                let new_cost = cost + edge_cost;
                if new_cost < dist[neighbor.index()] {
                    dist[neighbor.index()] = new_cost;
                    prev_edge[neighbor.index()] = edge;
                    frontier.push(Candidate { cost: new_cost, node: neighbor });
                }
            }
        }

        Path::new() // frontier exhausted without reaching goal
    }
}

/// Walk the predecessor-edge array backwards from `goal` to `start`,
/// accumulating the forward-ordered edge sequence.
fn reconstruct(city: &City, prev_edge: &[EdgeId], start: NodeId, goal: NodeId) -> Path {
    let mut path = Path::new();
    let mut cur = goal;
    while cur != start {
        let e = prev_edge[cur.index()];
        debug_assert_ne!(e, EdgeId::INVALID, "reconstruction hit an unreached node");
        path.push_front(e);
        cur = city.edge_from(e);
    }
    path
}
