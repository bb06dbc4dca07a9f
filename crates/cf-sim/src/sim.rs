//! The `Simulation` controller and its tick loop.

use cf_agent::Agent;
use cf_city::{City, GridSpec, block_streets};
use cf_core::{AgentId, NodeId, SimRng};
use cf_routing::{RoutePlanner, RoutePolicy};

use crate::{Metrics, Preset, SimError, SimObserver, SimResult};

/// Owns the whole scenario — city, agents, planner, metrics — and drives the
/// per-tick control flow:
///
/// 1. Every agent standing at a node is offered a replan: the planner is
///    called once per agent and its result installed (the planner internally
///    consults the policy's reroute rule, so this is a cheap no-op for
///    agents whose policy sees no reason to recompute).
/// 2. Every agent takes one movement step, updating street occupancy.
/// 3. Arrivals and street loads are recorded in [`Metrics`].
///
/// The controller is the *only* component that mutates the city or the
/// agents; planner and policies see immutable borrows for the duration of
/// each call.
pub struct Simulation {
    city: City,
    agents: Vec<Agent>,
    planner: RoutePlanner,
    metrics: Metrics,
    running: bool,
    /// Whether each agent has left its origin yet (for departure metrics).
    departed: Vec<bool>,
    /// Origin/destination pairs for [`reset`](Self::reset).
    spawn_pairs: Vec<(NodeId, NodeId)>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("agents", &self.agents)
            .field("metrics", &self.metrics)
            .field("running", &self.running)
            .field("departed", &self.departed)
            .field("spawn_pairs", &self.spawn_pairs)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Assemble a simulation from pre-built parts.
    pub fn new(city: City, agents: Vec<Agent>, policy: Box<dyn RoutePolicy>) -> Self {
        let spawn_pairs = agents.iter().map(|a| (a.origin(), a.destination())).collect();
        let departed = vec![false; agents.len()];
        Self {
            city,
            agents,
            planner: RoutePlanner::new(policy),
            metrics: Metrics::new(),
            running: false,
            departed,
            spawn_pairs,
        }
    }

    /// Build the grid scenario a [`Preset`] describes: lattice, closures,
    /// seeded agent population, and the configured policy.
    pub fn from_preset(preset: &Preset) -> SimResult<Self> {
        preset.validate()?;

        let spec = GridSpec::new(preset.rows, preset.cols, preset.street_capacity);
        let mut city = spec.build()?;
        block_streets(&mut city, &preset.blocked_pairs())?;

        if preset.agent_count > 0 && city.node_count() < 2 {
            return Err(SimError::Preset(format!(
                "{}: cannot spawn agents on a single-node grid",
                preset.name
            )));
        }

        let mut rng = SimRng::new(preset.seed);
        let node_count = city.node_count() as u32;
        let agents = (0..preset.agent_count)
            .map(|i| {
                let origin = NodeId(rng.gen_range(0..node_count));
                let mut destination = NodeId(rng.gen_range(0..node_count));
                while destination == origin {
                    destination = NodeId(rng.gen_range(0..node_count));
                }
                Agent::new(AgentId(i), origin, destination)
            })
            .collect();

        Ok(Self::new(city, agents, preset.build_policy()))
    }

    // ── Run control ───────────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Return the scenario to its initial state: agents respawned at their
    /// origins with no routes, occupancy zeroed, metrics discarded.  Street
    /// closures are part of the scenario and stay in place.
    pub fn reset(&mut self) {
        self.running = false;
        self.metrics.reset();
        self.city.clear_occupancy();
        self.agents = self
            .spawn_pairs
            .iter()
            .enumerate()
            .map(|(i, &(origin, destination))| Agent::new(AgentId(i as u32), origin, destination))
            .collect();
        self.departed.fill(false);
    }

    /// Swap the active routing policy.  Takes effect from the next tick's
    /// replans; routes already installed on agents are untouched until their
    /// next reroute decision.
    pub fn set_policy(&mut self, policy: Box<dyn RoutePolicy>) {
        self.planner.set_policy(policy);
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance the whole simulation by one tick.
    pub fn tick(&mut self) {
        self.metrics.tick();

        for (i, agent) in self.agents.iter_mut().enumerate() {
            if agent.has_arrived() {
                continue;
            }

            // Replan at decision points.  The planner returns the existing
            // path untouched when the policy declines to reroute, so this
            // installs either a fresh route or the old one.
            if agent.at_node() {
                let path = self.planner.compute_path(&self.city, agent);
                agent.set_path(path);
            }

            agent.step(&mut self.city);

            if !self.departed[i] && agent.current_edge().is_some() {
                self.departed[i] = true;
                self.metrics.record_departure();
            }
            if agent.has_arrived() {
                self.metrics.record_arrival(agent.travel_time());
            }
            if let Some(edge) = agent.current_edge() {
                self.metrics.observe_edge_load(self.city.occupancy(edge));
            }
        }

        self.metrics.snapshot_edge_loads(&self.city);
    }

    /// Run exactly `n` ticks, invoking `observer` at each boundary.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        self.running = true;
        for _ in 0..n {
            let now = self.metrics.current_tick();
            observer.on_tick_start(now);
            self.tick();
            observer.on_tick_end(self.metrics.current_tick(), self.en_route(), &self.metrics);
        }
        self.running = false;
        observer.on_run_end(self.metrics.current_tick(), &self.metrics);
    }

    /// Run until every agent has arrived or `max_ticks` have elapsed,
    /// whichever comes first.  Returns the number of ticks executed.
    ///
    /// Agents with unreachable destinations never arrive, so a finite
    /// budget is mandatory.
    pub fn run_until_done<O: SimObserver>(&mut self, max_ticks: u64, observer: &mut O) -> u64 {
        self.running = true;
        let mut executed = 0;
        while executed < max_ticks && !self.all_arrived() {
            let now = self.metrics.current_tick();
            observer.on_tick_start(now);
            self.tick();
            executed += 1;
            observer.on_tick_end(self.metrics.current_tick(), self.en_route(), &self.metrics);
        }
        self.running = false;
        observer.on_run_end(self.metrics.current_tick(), &self.metrics);
        executed
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn city(&self) -> &City {
        &self.city
    }

    /// Mutable city access for hosts that script closures or exogenous load.
    pub fn city_mut(&mut self) -> &mut City {
        &mut self.city
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn planner(&self) -> &RoutePlanner {
        &self.planner
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn all_arrived(&self) -> bool {
        self.agents.iter().all(Agent::has_arrived)
    }

    /// Number of agents still travelling.
    pub fn en_route(&self) -> usize {
        self.agents.iter().filter(|a| !a.has_arrived()).count()
    }
}
