//! Simulation observer trait for progress reporting and data collection.

use crate::Metrics;

/// Callbacks invoked by [`Simulation::run_ticks`][crate::Simulation::run_ticks]
/// at tick boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: u64, en_route: usize, metrics: &Metrics) {
///         println!("tick {tick}: {en_route} agents still travelling");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: u64) {}

    /// Called at the end of each tick.
    ///
    /// `en_route` is the number of agents that have not yet arrived.
    fn on_tick_end(&mut self, _tick: u64, _en_route: usize, _metrics: &Metrics) {}

    /// Called once when the run finishes (all agents arrived or the tick
    /// budget was spent).
    fn on_run_end(&mut self, _final_tick: u64, _metrics: &Metrics) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call a run
/// method but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
