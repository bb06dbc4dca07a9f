//! Agent state and per-step movement.

use std::collections::VecDeque;

use cf_city::City;
use cf_core::{AgentId, EdgeId, NodeId};

/// The remaining route of an agent: an ordered walk of street edges from its
/// current node to its destination.  Empty means "no route known" (or the
/// agent has arrived).
pub type Path = VecDeque<EdgeId>;

/// A mobile agent traversing the city.
///
/// An agent is either **at a node** (`current_edge() == None`) or **on an
/// edge** it entered last step.  Movement is step-quantised: entering a
/// street takes one step and finishing it takes the next, so travel time is
/// simply the number of steps until arrival, including any steps spent
/// waiting at a node for a full street to drain.
///
/// The planner never mutates an agent; the simulation layer installs freshly
/// computed paths via [`set_path`](Agent::set_path) and advances movement via
/// [`step`](Agent::step).
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    origin: NodeId,
    destination: NodeId,
    current_node: NodeId,
    current_edge: Option<EdgeId>,
    path: Path,
    steps_taken: u32,
    arrival_step: Option<u32>,
}

impl Agent {
    /// Create an agent at `origin` heading for `destination` with no route.
    ///
    /// An agent whose origin equals its destination counts as arrived
    /// immediately, with a travel time of zero.
    pub fn new(id: AgentId, origin: NodeId, destination: NodeId) -> Self {
        Self {
            id,
            origin,
            destination,
            current_node: origin,
            current_edge: None,
            path: Path::new(),
            steps_taken: 0,
            arrival_step: if origin == destination { Some(0) } else { None },
        }
    }

    // ── Read interface (consumed by policies and the planner) ─────────────

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn origin(&self) -> NodeId {
        self.origin
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    /// The node the agent is at, or the tail of the edge it is currently on.
    pub fn current_node(&self) -> NodeId {
        self.current_node
    }

    /// The edge the agent is currently traversing, if any.
    pub fn current_edge(&self) -> Option<EdgeId> {
        self.current_edge
    }

    /// The remaining planned route.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `true` once the agent has reached its destination.
    pub fn has_arrived(&self) -> bool {
        self.arrival_step.is_some()
    }

    /// `true` while the agent has neither a route nor has arrived.
    pub fn needs_route(&self) -> bool {
        self.path.is_empty() && !self.has_arrived()
    }

    /// `true` when the agent is standing at a node (a reroute decision point).
    pub fn at_node(&self) -> bool {
        self.current_edge.is_none()
    }

    /// Steps elapsed until arrival, or steps taken so far if still en route.
    pub fn travel_time(&self) -> u32 {
        self.arrival_step.unwrap_or(self.steps_taken)
    }

    // ── Route installation (simulation layer) ─────────────────────────────

    /// Replace the remaining route wholesale.  The path must start at the
    /// agent's current node; the planner guarantees this for its output.
    pub fn set_path(&mut self, path: Path) {
        self.path = path;
    }

    // ── Movement (simulation layer) ───────────────────────────────────────

    /// Advance the agent by one simulation step, updating street occupancy.
    ///
    /// - Already arrived: no-op.
    /// - On an edge: finish it — leave the edge (occupancy −1), move to its
    ///   head node, and detect arrival.
    /// - At a node with a route: enter the next edge if it is open and has
    ///   spare capacity (occupancy +1).  A blocked next edge drops the whole
    ///   route so the next reroute decision starts from scratch; a full edge
    ///   means the agent waits in place.
    /// - At a node without a route: wait.
    ///
    /// Time passes (the step counter advances) in every non-arrived case,
    /// including waiting.
    pub fn step(&mut self, city: &mut City) {
        if self.has_arrived() {
            return;
        }
        self.steps_taken += 1;

        // Finish the edge entered last step.
        if let Some(edge) = self.current_edge.take() {
            city.remove_occupant(edge);
            self.current_node = city.edge_to(edge);
            if self.current_node == self.destination {
                self.arrival_step = Some(self.steps_taken);
            }
            return;
        }

        let Some(&next) = self.path.front() else {
            return; // stuck at a node with no route
        };

        if city.is_blocked(next) {
            // Road closed since the route was computed; force a replan.
            self.path.clear();
            return;
        }

        if city.occupancy(next) + 1.0 <= city.capacity(next) {
            self.path.pop_front();
            self.current_edge = Some(next);
            city.add_occupant(next);
        }
        // else: street full — wait at the node and retry next step.
    }
}
