//! `cf-sim` — tick-loop orchestration for the cityflow framework.
//!
//! # Per-tick control flow
//!
//! ```text
//! for each tick:
//!   ① Replan  — every agent standing at a node is passed to the planner,
//!               which consults the active policy's reroute rule and either
//!               hands back the existing route or runs a fresh search.
//!   ② Step    — every agent advances one step (entering, traversing, or
//!               waiting for a street), updating occupancy as it goes.
//!   ③ Record  — arrivals, departures, and street loads land in Metrics.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`sim`]      | `Simulation` controller                           |
//! | [`preset`]   | `Preset` (JSON scenario config), `PolicyKind`     |
//! | [`metrics`]  | `Metrics` run measurements                        |
//! | [`observer`] | `SimObserver`, `NoopObserver`                     |
//! | [`report`]   | CSV / JSON report output                          |
//! | [`error`]    | `SimError`, `SimResult<T>`                        |

pub mod error;
pub mod metrics;
pub mod observer;
pub mod preset;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

pub use error::{SimError, SimResult};
pub use metrics::Metrics;
pub use observer::{NoopObserver, SimObserver};
pub use preset::{PolicyKind, Preset};
pub use report::{RunSummary, write_csv_report, write_json_summary};
pub use sim::Simulation;
