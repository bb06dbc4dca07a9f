//! `cf-routing` — pluggable routing policies and the route planner.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`policy`]  | `RoutePolicy` trait, `ShortestPathPolicy`, `CongestionPolicy` |
//! | [`planner`] | `RoutePlanner` (policy-driven Dijkstra)                   |
//!
//! # Quick-start
//!
//! ```
//! use cf_agent::Agent;
//! use cf_city::CityBuilder;
//! use cf_core::AgentId;
//! use cf_routing::{CongestionPolicy, RoutePlanner, ShortestPathPolicy};
//!
//! let mut b = CityBuilder::new();
//! let a = b.add_node();
//! let c = b.add_node();
//! b.add_street(a, c, 2.0, 1.0);
//! let city = b.build();
//!
//! let mut planner = RoutePlanner::new(Box::new(ShortestPathPolicy));
//! let agent = Agent::new(AgentId(0), a, c);
//! let path = planner.compute_path(&city, &agent);
//! assert_eq!(path.len(), 1);
//!
//! // Swap the cost model without touching the search engine.
//! planner.set_policy(Box::new(CongestionPolicy::default()));
//! assert_eq!(planner.compute_path(&city, &agent).len(), 1);
//! ```

pub mod planner;
pub mod policy;


pub use planner::RoutePlanner;
pub use policy::{CongestionPolicy, DEFAULT_ALPHA, RoutePolicy, ShortestPathPolicy};
