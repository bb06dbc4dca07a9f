//! `cf-agent` — mobile agent state for the cityflow framework.
//!
//! A single module: [`agent`] holds the [`Agent`] type and its step-quantised
//! movement model.  Route *computation* lives in `cf-routing`; this crate
//! only moves agents along routes that the simulation layer installs.

pub mod agent;


pub use agent::{Agent, Path};
