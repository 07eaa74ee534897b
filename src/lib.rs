//! # cargo-planner
//!
//! Cargo pickup planning: splits a list of required goods into
//! capacity-bounded loads, then builds a multi-stop pickup route for each
//! load from a home location through supply points and back.
//!
//! ## Modules
//!
//! - [`models`]: Domain types (Coordinates, Chunk, SupplyPoint, Route, Plan)
//! - [`catalog`]: Star system catalog and commodity affinity table
//! - [`index`]: Supply index and commodity co-occurrence
//! - [`packing`]: Chunking and affinity-guided bin packing
//! - [`constructive`]: Greedy pickup route construction
//! - [`evaluation`]: Plan consistency checking
//! - [`planner`]: Request orchestration
//! - [`demand`]: Demand CSV reader
//! - [`config`]: Planner configuration

pub mod catalog;
pub mod config;
pub mod constructive;
pub mod demand;
pub mod error;
pub mod evaluation;
pub mod index;
pub mod models;
pub mod packing;
pub mod planner;

pub use error::{PlannerError, Result};
