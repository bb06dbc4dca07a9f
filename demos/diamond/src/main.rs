//! diamond — smallest runnable cityflow scenario.
//!
//! One agent crosses the 4-node diamond network twice: once under static
//! shortest-path routing, once under congestion-aware routing with the short
//! branch pre-loaded.  The run prints each tick and a final summary, showing
//! the policy swap changing the chosen branch without any change to the
//! planner.

use anyhow::Result;

use cf_agent::Agent;
use cf_city::{City, CityBuilder};
use cf_core::{AgentId, NodeId};
use cf_routing::{CongestionPolicy, RoutePolicy, ShortestPathPolicy};
use cf_sim::{Metrics, SimObserver, Simulation};

const MAX_TICKS: u64 = 32;

/// A→B→D is the short branch (1 + 1), A→C→D the long one (5 + 1).
fn build_diamond() -> (City, [NodeId; 4]) {
    let mut b = CityBuilder::new();
    let a = b.add_node();
    let bn = b.add_node();
    let c = b.add_node();
    let d = b.add_node();
    b.add_street(a, bn, 1.0, 1.0);
    b.add_street(a, c, 5.0, 1.0);
    b.add_street(bn, d, 1.0, 1.0);
    b.add_street(c, d, 1.0, 1.0);
    (b.build(), [a, bn, c, d])
}

struct TickPrinter;

impl SimObserver for TickPrinter {
    fn on_tick_end(&mut self, tick: u64, en_route: usize, _metrics: &Metrics) {
        println!("  tick {tick:>2}: {en_route} agent(s) en route");
    }
}

fn run_scenario(label: &str, policy: Box<dyn RoutePolicy>, loaded: bool) -> Result<()> {
    println!("{label}");
    let (mut city, [a, bn, _, d]) = build_diamond();
    if loaded {
        // Exogenous congestion on the short branch's second street.
        let bd = city.find_edge(bn, d).expect("diamond has B->D");
        city.set_occupancy(bd, 3.0);
        println!("  (B->D pre-loaded to occupancy 3)");
    }

    let agents = vec![Agent::new(AgentId(0), a, d)];
    let mut sim = Simulation::new(city, agents, policy);
    let ticks = sim.run_until_done(MAX_TICKS, &mut TickPrinter);

    let m = sim.metrics();
    println!(
        "  done in {ticks} ticks: {} arrival(s), avg trip {:.1} steps, peak load {:.1}\n",
        m.total_throughput(),
        m.average_trip_time(),
        m.max_edge_load()
    );
    Ok(())
}

fn main() -> Result<()> {
    run_scenario("shortest-path, empty city", Box::new(ShortestPathPolicy), false)?;
    run_scenario(
        "shortest-path, short branch congested (blind policy queues at the full street)",
        Box::new(ShortestPathPolicy),
        true,
    )?;
    run_scenario(
        "congestion-aware, short branch congested (agent detours via C)",
        Box::new(CongestionPolicy::default()),
        true,
    )?;
    Ok(())
}
