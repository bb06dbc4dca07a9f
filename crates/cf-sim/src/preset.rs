//! Scenario presets: serde-backed configuration for grid scenarios.
//!
//! A preset fully describes a reproducible scenario: grid dimensions, street
//! closures, population size, RNG seed, and the routing policy to bind.
//! Presets are loaded from JSON and validated before anything is built.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use cf_core::NodeId;
use cf_routing::{CongestionPolicy, DEFAULT_ALPHA, RoutePolicy, ShortestPathPolicy};

use crate::{SimError, SimResult};

/// Which shipped routing policy a preset binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    ShortestPath,
    CongestionAware,
}

/// A named, reproducible scenario configuration.
///
/// # JSON shape
///
/// ```json
/// {
///   "name": "rush-hour",
///   "rows": 4,
///   "cols": 4,
///   "street_capacity": 2.0,
///   "blocked_streets": [[0, 1]],
///   "agent_count": 12,
///   "seed": 42,
///   "policy": "congestion_aware",
///   "alpha": 2.0
/// }
/// ```
///
/// `blocked_streets`, `seed`, and `alpha` are optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub rows: u32,
    pub cols: u32,

    /// Capacity of every street in the grid.
    #[serde(default = "default_capacity")]
    pub street_capacity: f64,

    /// Node-id pairs whose connecting streets are closed (both directions).
    #[serde(default)]
    pub blocked_streets: Vec<(u32, u32)>,

    pub agent_count: u32,

    /// Seed for agent spawning.
    #[serde(default = "default_seed")]
    pub seed: u64,

    pub policy: PolicyKind,

    /// Congestion weighting; ignored by the shortest-path policy.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_capacity() -> f64 {
    1.0
}

fn default_seed() -> u64 {
    42
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

impl Preset {
    /// Parse a preset from a JSON string and validate it.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let preset: Preset = serde_json::from_str(json)?;
        preset.validate()?;
        Ok(preset)
    }

    /// Read and parse a preset file.
    pub fn from_file(path: &Path) -> SimResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Check the preset for authoring mistakes.
    ///
    /// Grid dimensions and capacity must be positive, the alpha must be
    /// usable as a congestion weighting, and every blocked pair must name
    /// nodes inside the grid.
    pub fn validate(&self) -> SimResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SimError::Preset(format!(
                "{}: grid dimensions must be non-zero, got {}x{}",
                self.name, self.rows, self.cols
            )));
        }
        if !(self.street_capacity.is_finite() && self.street_capacity > 0.0) {
            return Err(SimError::Preset(format!(
                "{}: street capacity must be positive, got {}",
                self.name, self.street_capacity
            )));
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(SimError::Preset(format!(
                "{}: alpha must be finite and non-negative, got {}",
                self.name, self.alpha
            )));
        }
        let node_count = self.rows * self.cols;
        for &(a, b) in &self.blocked_streets {
            if a >= node_count || b >= node_count {
                return Err(SimError::Preset(format!(
                    "{}: blocked street ({a}, {b}) names a node outside the {}-node grid",
                    self.name, node_count
                )));
            }
        }
        Ok(())
    }

    /// The blocked pairs as typed node ids.
    pub fn blocked_pairs(&self) -> Vec<(NodeId, NodeId)> {
        self.blocked_streets
            .iter()
            .map(|&(a, b)| (NodeId(a), NodeId(b)))
            .collect()
    }

    /// Instantiate the routing policy this preset binds.
    pub fn build_policy(&self) -> Box<dyn RoutePolicy> {
        match self.policy {
            PolicyKind::ShortestPath => Box::new(ShortestPathPolicy),
            PolicyKind::CongestionAware => Box::new(CongestionPolicy::new(self.alpha)),
        }
    }
}
