//! Request orchestration: home resolution, index selection, and the
//! chunk → pack → route pipeline.

mod home;
mod orchestrator;

pub use home::{resolve_home, HomeLocation, HomeSpec, DEFAULT_HOME_LABEL};
pub use orchestrator::{PlanRequest, Planner};
