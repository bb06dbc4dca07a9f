//! `cf-core` — foundational types for the `cityflow` traffic routing framework.
//!
//! This crate is a dependency of every other `cf-*` crate.  It intentionally
//! has no `cf-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module  | Contents                         |
//! |---------|----------------------------------|
//! | [`ids`] | `AgentId`, `NodeId`, `EdgeId`    |
//! | [`rng`] | `SimRng` (seeded scenario RNG)   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{AgentId, EdgeId, NodeId};
pub use rng::SimRng;
