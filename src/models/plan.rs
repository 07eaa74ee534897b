//! The finished plan returned for a request.

use serde::Serialize;

use super::{Chunk, Coordinates, Route};

/// How the chunks were packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strategy {
    /// Packing grouped by affinity key and guided by co-occurrence.
    #[serde(rename = "economy-aware")]
    EconomyAware,
    /// Plain size-descending best-fit packing.
    #[serde(rename = "basic")]
    Basic,
}

impl Strategy {
    /// The label reported alongside the plan.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::EconomyAware => "economy-aware",
            Strategy::Basic => "basic",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Routes for every bin plus the request summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub success: bool,
    pub bins: Vec<Route>,
    /// Sum of unrounded bin totals, rounded once.
    pub grand_total_distance: f64,
    pub bins_count: usize,
    pub home_label: String,
    pub home_coordinates: Coordinates,
    /// Chunks in creation order, each carrying its bin assignment.
    pub original_chunks: Vec<Chunk>,
    #[serde(rename = "strategyLabel")]
    pub strategy: Strategy,
    pub ship_capacity: u32,
}

impl Plan {
    /// Total number of `UNREACHABLE` legs across all bins.
    pub fn num_unreachable(&self) -> usize {
        self.bins
            .iter()
            .flat_map(|r| r.legs())
            .filter(|l| l.action == super::LegAction::Unreachable)
            .count()
    }
}
