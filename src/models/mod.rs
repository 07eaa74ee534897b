//! Domain model types for cargo pickup planning.
//!
//! Provides the core value types: coordinates, demand records and the chunks
//! cut from them, supply points, bins, routes made of legs, and the finished
//! plan.

mod bin;
mod coordinates;
mod demand;
mod plan;
mod route;
mod supply;

pub use bin::Bin;
pub use coordinates::{round_distance, Coordinates};
pub use demand::{Chunk, DemandRecord};
pub use plan::{Plan, Strategy};
pub use route::{LegAction, Route, RouteLeg, RETURN_LABEL};
pub use supply::{StopKey, SupplyPoint};
