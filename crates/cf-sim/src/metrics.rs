//! Per-run traffic metrics.

use cf_city::City;
use cf_core::EdgeId;

/// Aggregated measurements collected across a simulation run.
///
/// The controller feeds this once per tick; nothing here feeds back into
/// routing decisions.
#[derive(Debug, Default)]
pub struct Metrics {
    trip_times: Vec<u32>,
    departures: u32,
    throughput_per_tick: Vec<u32>,
    edge_load_history: Vec<Vec<f64>>,
    max_edge_load: f64,
    current_tick: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new tick: advances the tick counter and starts a fresh
    /// throughput bucket.
    pub fn tick(&mut self) {
        self.current_tick += 1;
        self.throughput_per_tick.push(0);
    }

    /// Record an agent leaving its origin.
    pub fn record_departure(&mut self) {
        self.departures += 1;
    }

    /// Record an agent completing its trip in `steps` simulation steps.
    pub fn record_arrival(&mut self, steps: u32) {
        self.trip_times.push(steps);
        if let Some(bucket) = self.throughput_per_tick.last_mut() {
            *bucket += 1;
        }
    }

    /// Track the highest street load seen anywhere so far.
    pub fn observe_edge_load(&mut self, load: f64) {
        if load > self.max_edge_load {
            self.max_edge_load = load;
        }
    }

    /// Append a snapshot of every street's current load.
    pub fn snapshot_edge_loads(&mut self, city: &City) {
        let loads: Vec<f64> = (0..city.edge_count())
            .map(|i| city.occupancy(EdgeId(i as u32)))
            .collect();
        let peak = loads.iter().copied().fold(0.0f64, f64::max);
        self.observe_edge_load(peak);
        self.edge_load_history.push(loads);
    }

    // ── Aggregates ────────────────────────────────────────────────────────

    /// Mean completed-trip time, or 0 when no trip has finished.
    pub fn average_trip_time(&self) -> f64 {
        if self.trip_times.is_empty() {
            return 0.0;
        }
        self.trip_times.iter().map(|&t| t as f64).sum::<f64>() / self.trip_times.len() as f64
    }

    /// Total completed trips.
    pub fn total_throughput(&self) -> u32 {
        self.trip_times.len() as u32
    }

    pub fn departures(&self) -> u32 {
        self.departures
    }

    pub fn max_edge_load(&self) -> f64 {
        self.max_edge_load
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    pub fn trip_times(&self) -> &[u32] {
        &self.trip_times
    }

    pub fn throughput_per_tick(&self) -> &[u32] {
        &self.throughput_per_tick
    }

    pub fn edge_load_history(&self) -> &[Vec<f64>] {
        &self.edge_load_history
    }

    /// Discard everything and start a fresh run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
