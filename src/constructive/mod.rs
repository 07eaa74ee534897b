//! Constructive heuristics for building pickup routes.
//!
//! - [`PickupRoutePlanner`]: greedy best-next-stop route per bin, O(k · s)

mod pickup_route;

pub use pickup_route::PickupRoutePlanner;
