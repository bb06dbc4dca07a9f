//! `cf-city` — the directed, capacity-constrained city graph.
//!
//! # Crate layout
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`city`]  | `City` (CSR adjacency), `CityBuilder`             |
//! | [`grid`]  | `GridSpec` lattice builder, `block_streets`       |
//! | [`error`] | `CityError`, `CityResult<T>`                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                            |
//! |---------|---------------------------------------------------|
//! | `serde` | Propagates serde derives to `cf-core` ID types.   |

pub mod city;
pub mod error;
pub mod grid;


pub use city::{City, CityBuilder};
pub use error::{CityError, CityResult};
pub use grid::{GridSpec, block_streets};
