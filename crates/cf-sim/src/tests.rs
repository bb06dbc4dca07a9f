//! Unit tests for cf-sim.

#[cfg(test)]
mod helpers {
    use cf_agent::Agent;
    use cf_city::{City, CityBuilder};
    use cf_core::{AgentId, NodeId};
    use cf_routing::ShortestPathPolicy;

    use crate::Simulation;

    /// One-way corridor n0 → n1 → n2, capacity 1, with one agent n0 → n2.
    pub fn corridor_sim() -> (Simulation, [NodeId; 3]) {
        let mut b = CityBuilder::new();
        let n0 = b.add_node();
        let n1 = b.add_node();
        let n2 = b.add_node();
        b.add_street(n0, n1, 1.0, 1.0);
        b.add_street(n1, n2, 1.0, 1.0);
        let city = b.build();
        let agents = vec![Agent::new(AgentId(0), n0, n2)];
        (Simulation::new(city, agents, Box::new(ShortestPathPolicy)), [n0, n1, n2])
    }

    /// The diamond from the routing tests, as a raw city.
    pub fn diamond_city() -> (City, [NodeId; 4]) {
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
}

// ── Preset parsing & validation ───────────────────────────────────────────────

#[cfg(test)]
mod preset {
    use crate::{PolicyKind, Preset, SimError};

    const FULL: &str = r#"{
        "name": "rush-hour",
        "rows": 4,
        "cols": 4,
        "street_capacity": 2.0,
        "blocked_streets": [[0, 1]],
        "agent_count": 12,
        "seed": 7,
        "policy": "congestion_aware",
        "alpha": 3.5
    }"#;

    #[test]
    fn parses_full_preset() {
        let p = Preset::from_json(FULL).unwrap();
        assert_eq!(p.name, "rush-hour");
        assert_eq!((p.rows, p.cols), (4, 4));
        assert_eq!(p.policy, PolicyKind::CongestionAware);
        assert_eq!(p.alpha, 3.5);
        assert_eq!(p.blocked_pairs().len(), 1);
    }

    #[test]
    fn optional_fields_default() {
        let p = Preset::from_json(
            r#"{"name":"min","rows":2,"cols":2,"agent_count":1,"policy":"shortest_path"}"#,
        )
        .unwrap();
        assert_eq!(p.street_capacity, 1.0);
        assert_eq!(p.seed, 42);
        assert_eq!(p.alpha, cf_routing::DEFAULT_ALPHA);
        assert!(p.blocked_streets.is_empty());
    }

    #[test]
    fn zero_dimension_rejected() {
        let err = Preset::from_json(
            r#"{"name":"bad","rows":0,"cols":3,"agent_count":1,"policy":"shortest_path"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::Preset(_)), "got {err}");
    }

    #[test]
    fn blocked_street_outside_grid_rejected() {
        let err = Preset::from_json(
            r#"{"name":"bad","rows":2,"cols":2,"agent_count":1,
                "blocked_streets":[[0,99]],"policy":"shortest_path"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::Preset(_)));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = Preset::from_json("{not json").unwrap_err();
        assert!(matches!(err, SimError::Json(_)));
    }

    #[test]
    fn policy_round_trips_through_serde() {
        let p = Preset::from_json(FULL).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back = Preset::from_json(&json).unwrap();
        assert_eq!(back.policy, p.policy);
        assert_eq!(back.seed, p.seed);
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics {
    use crate::Metrics;

    #[test]
    fn empty_run_averages_zero() {
        let m = Metrics::new();
        assert_eq!(m.average_trip_time(), 0.0);
        assert_eq!(m.total_throughput(), 0);
        assert_eq!(m.current_tick(), 0);
    }

    #[test]
    fn arrivals_land_in_current_tick_bucket() {
        let mut m = Metrics::new();
        m.tick();
        m.record_arrival(3);
        m.tick();
        m.record_arrival(5);
        m.record_arrival(7);
        assert_eq!(m.throughput_per_tick(), &[1, 2]);
        assert_eq!(m.total_throughput(), 3);
        assert_eq!(m.average_trip_time(), 5.0);
    }

    #[test]
    fn max_load_is_monotone() {
        let mut m = Metrics::new();
        m.observe_edge_load(2.0);
        m.observe_edge_load(1.0);
        assert_eq!(m.max_edge_load(), 2.0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut m = Metrics::new();
        m.tick();
        m.record_departure();
        m.record_arrival(4);
        m.observe_edge_load(9.0);
        m.reset();
        assert_eq!(m.current_tick(), 0);
        assert_eq!(m.departures(), 0);
        assert_eq!(m.total_throughput(), 0);
        assert_eq!(m.max_edge_load(), 0.0);
        assert!(m.throughput_per_tick().is_empty());
    }
}

// ── Simulation loop ───────────────────────────────────────────────────────────

#[cfg(test)]
mod simulation {
    use cf_agent::Agent;
    use cf_city::CityBuilder;
    use cf_core::AgentId;
    use cf_routing::{CongestionPolicy, ShortestPathPolicy};

    use super::helpers::{corridor_sim, diamond_city};
    use crate::{Metrics, NoopObserver, SimObserver, Simulation};

    #[test]
    fn corridor_agent_arrives() {
        let (mut sim, _) = corridor_sim();
        let ticks = sim.run_until_done(10, &mut NoopObserver);

        // enter, finish, enter, finish → 4 ticks.
        assert_eq!(ticks, 4);
        assert!(sim.all_arrived());
        assert_eq!(sim.metrics().total_throughput(), 1);
        assert_eq!(sim.metrics().average_trip_time(), 4.0);
        assert_eq!(sim.metrics().departures(), 1);
    }

    #[test]
    fn unreachable_agent_spends_the_budget() {
        let mut b = CityBuilder::new();
        let n0 = b.add_node();
        let n1 = b.add_node();
        b.add_street(n1, n0, 1.0, 1.0); // only the wrong direction exists
        let city = b.build();
        let agents = vec![Agent::new(AgentId(0), n0, n1)];
        let mut sim = Simulation::new(city, agents, Box::new(ShortestPathPolicy));

        let ticks = sim.run_until_done(5, &mut NoopObserver);
        assert_eq!(ticks, 5);
        assert!(!sim.all_arrived());
        assert_eq!(sim.en_route(), 1);
        assert_eq!(sim.metrics().total_throughput(), 0);
    }

    #[test]
    fn congestion_policy_avoids_loaded_branch() {
        let (mut city, [a, bn, c, d]) = diamond_city();
        // Exogenous load on B→D pushes that branch past the tipping point.
        let bd = city.find_edge(bn, d).unwrap();
        city.set_occupancy(bd, 3.0);

        let agents = vec![Agent::new(AgentId(0), a, d)];
        let mut sim = Simulation::new(city, agents, Box::new(CongestionPolicy::new(2.0)));

        sim.tick();
        let ac = sim.city().find_edge(a, c).unwrap();
        assert_eq!(sim.agents()[0].current_edge(), Some(ac));
    }

    #[test]
    fn policy_swap_takes_effect_next_tick() {
        let (mut city, [a, bn, c, d]) = diamond_city();
        let bd = city.find_edge(bn, d).unwrap();
        city.set_occupancy(bd, 3.0);

        let agents = vec![Agent::new(AgentId(0), a, d)];
        // Under the static policy the load is invisible: the agent takes B.
        let mut sim = Simulation::new(city, agents, Box::new(ShortestPathPolicy));
        sim.tick();
        let ab = sim.city().find_edge(a, bn).unwrap();
        assert_eq!(sim.agents()[0].current_edge(), Some(ab));

        // Swap to congestion-aware and reset: the same scenario now avoids B.
        sim.set_policy(Box::new(CongestionPolicy::new(2.0)));
        sim.reset();
        sim.city_mut().set_occupancy(bd, 3.0); // reset cleared the load
        sim.tick();
        let ac = sim.city().find_edge(a, c).unwrap();
        assert_eq!(sim.agents()[0].current_edge(), Some(ac));
    }

    #[test]
    fn reset_restores_initial_state() {
        let (mut sim, [n0, ..]) = corridor_sim();
        sim.run_until_done(10, &mut NoopObserver);
        assert!(sim.all_arrived());

        sim.reset();
        assert!(!sim.all_arrived());
        assert_eq!(sim.agents()[0].current_node(), n0);
        assert!(sim.agents()[0].path().is_empty());
        assert_eq!(sim.metrics().current_tick(), 0);
        assert!(!sim.is_running());

        // The rerun behaves identically.
        let ticks = sim.run_until_done(10, &mut NoopObserver);
        assert_eq!(ticks, 4);
    }

    #[test]
    fn observer_sees_every_tick() {
        #[derive(Default)]
        struct Counter {
            starts: u64,
            ends: u64,
            run_ends: u64,
            final_en_route: usize,
        }
        impl SimObserver for Counter {
            fn on_tick_start(&mut self, _tick: u64) {
                self.starts += 1;
            }
            fn on_tick_end(&mut self, _tick: u64, en_route: usize, _m: &Metrics) {
                self.ends += 1;
                self.final_en_route = en_route;
            }
            fn on_run_end(&mut self, _final_tick: u64, _m: &Metrics) {
                self.run_ends += 1;
            }
        }

        let (mut sim, _) = corridor_sim();
        let mut counter = Counter::default();
        sim.run_ticks(3, &mut counter);
        assert_eq!(counter.starts, 3);
        assert_eq!(counter.ends, 3);
        assert_eq!(counter.run_ends, 1);
        assert_eq!(counter.final_en_route, 1); // not yet arrived after 3 ticks
    }
}

// ── Preset-built scenarios ────────────────────────────────────────────────────

#[cfg(test)]
mod from_preset {
    use crate::{NoopObserver, Preset, SimError, Simulation};

    fn grid_preset(policy: &str) -> Preset {
        Preset::from_json(&format!(
            r#"{{"name":"t","rows":3,"cols":3,"street_capacity":4.0,
                 "agent_count":6,"seed":11,"policy":"{policy}"}}"#
        ))
        .unwrap()
    }

    #[test]
    fn same_seed_spawns_same_population() {
        fn pairs(s: &Simulation) -> Vec<(cf_core::NodeId, cf_core::NodeId)> {
            s.agents().iter().map(|x| (x.origin(), x.destination())).collect()
        }

        let p = grid_preset("shortest_path");
        let a = Simulation::from_preset(&p).unwrap();
        let b = Simulation::from_preset(&p).unwrap();
        assert_eq!(pairs(&a), pairs(&b));
        assert_eq!(a.agents().len(), 6);
        // Spawning never produces a trivially-arrived agent.
        assert!(a.agents().iter().all(|x| x.origin() != x.destination()));
    }

    #[test]
    fn blocked_streets_are_applied() {
        let p = Preset::from_json(
            r#"{"name":"t","rows":2,"cols":2,"agent_count":0,
                "blocked_streets":[[0,1]],"policy":"shortest_path"}"#,
        )
        .unwrap();
        let sim = Simulation::from_preset(&p).unwrap();
        let city = sim.city();
        let e = city.find_edge(cf_core::NodeId(0), cf_core::NodeId(1)).unwrap();
        assert!(city.is_blocked(e));
    }

    #[test]
    fn grid_population_settles() {
        let p = grid_preset("congestion_aware");
        let mut sim = Simulation::from_preset(&p).unwrap();
        // 3x3 grid, 6 agents, generous budget: everyone gets home.
        sim.run_until_done(200, &mut NoopObserver);
        assert!(sim.all_arrived());
        assert_eq!(sim.metrics().total_throughput(), 6);
        assert!(sim.metrics().average_trip_time() > 0.0);
    }

    #[test]
    fn agents_on_single_node_grid_rejected() {
        let p = Preset::from_json(
            r#"{"name":"t","rows":1,"cols":1,"agent_count":1,"policy":"shortest_path"}"#,
        )
        .unwrap();
        let err = Simulation::from_preset(&p).unwrap_err();
        assert!(matches!(err, SimError::Preset(_)));
    }
}

// ── Report output ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod report {
    use std::fs;

    use tempfile::TempDir;

    use super::helpers::corridor_sim;
    use crate::{NoopObserver, RunSummary, write_csv_report, write_json_summary};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_report_files_written() {
        let (mut sim, _) = corridor_sim();
        sim.run_until_done(10, &mut NoopObserver);

        let dir = tmp();
        write_csv_report(sim.metrics(), dir.path()).unwrap();

        let trips = fs::read_to_string(dir.path().join("trips.csv")).unwrap();
        let mut lines = trips.lines();
        assert_eq!(lines.next(), Some("trip,travel_time_steps"));
        assert_eq!(lines.next(), Some("0,4"));

        let ticks = fs::read_to_string(dir.path().join("ticks.csv")).unwrap();
        // Header plus one row per tick.
        assert_eq!(ticks.lines().count(), 1 + sim.metrics().current_tick() as usize);
    }

    #[test]
    fn json_summary_round_trips() {
        let (mut sim, _) = corridor_sim();
        sim.run_until_done(10, &mut NoopObserver);

        let dir = tmp();
        write_json_summary(sim.metrics(), dir.path()).unwrap();

        let raw = fs::read_to_string(dir.path().join("summary.json")).unwrap();
        let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(v["total_throughput"], 1);
        assert_eq!(v["average_trip_time"], 4.0);

        let s = RunSummary::from_metrics(sim.metrics());
        assert_eq!(s.ticks, 4);
    }
}
