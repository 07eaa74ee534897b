//! Plan checker that re-verifies packing and routing invariants.

use std::collections::BTreeMap;

use crate::models::{LegAction, Plan};

/// Slack for comparing two-decimal leg distances against the leg limit.
const ROUNDING_SLACK: f64 = 0.005;

/// A type of invariant violation in a finished plan.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// A bin holds more than the cargo capacity.
    CapacityExceeded {
        /// Bin number (1-based).
        bin_number: usize,
        /// Units assigned to the bin.
        load: u64,
        /// Cargo capacity.
        capacity: u32,
    },
    /// A chunk has no bin, or points at a bin that does not exist.
    ChunkUnassigned {
        /// Commodity of the chunk.
        commodity: String,
        /// Chunk size.
        size: u32,
    },
    /// A pickup leg is longer than the maximum leg distance.
    LegTooLong {
        /// Bin number (1-based).
        bin_number: usize,
        /// Index of the leg within its route.
        leg_index: usize,
        /// Reported leg distance.
        distance: f64,
        /// Maximum leg distance.
        max_distance: f64,
    },
    /// A route does not end with exactly one return leg.
    MissingReturn {
        /// Bin number (1-based).
        bin_number: usize,
    },
}

/// An invariant violation found in a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Checks a plan against the capacity, assignment, and leg-length rules.
///
/// A well-formed plan yields no violations.
///
/// # Examples
///
/// ```
/// use cargo_planner::evaluation::PlanEvaluator;
/// use cargo_planner::models::{Coordinates, Plan, Strategy};
///
/// let plan = Plan {
///     success: true,
///     bins: vec![],
///     grand_total_distance: 0.0,
///     bins_count: 0,
///     home_label: "home (default)".to_string(),
///     home_coordinates: Coordinates::origin(),
///     original_chunks: vec![],
///     strategy: Strategy::Basic,
///     ship_capacity: 704,
/// };
/// assert!(PlanEvaluator::new(166.0).evaluate(&plan).is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PlanEvaluator {
    max_leg_distance: f64,
}

impl PlanEvaluator {
    /// Creates an evaluator for the given leg limit.
    pub fn new(max_leg_distance: f64) -> Self {
        Self { max_leg_distance }
    }

    /// Returns every violation found in the plan.
    pub fn evaluate(&self, plan: &Plan) -> Vec<Violation> {
        let mut violations = Vec::new();

        let mut loads: BTreeMap<usize, u64> = BTreeMap::new();
        for chunk in &plan.original_chunks {
            match chunk.bin {
                Some(b) if b >= 1 && b <= plan.bins_count => {
                    *loads.entry(b).or_insert(0) += u64::from(chunk.size);
                }
                _ => violations.push(Violation::new(ViolationType::ChunkUnassigned {
                    commodity: chunk.commodity.clone(),
                    size: chunk.size,
                })),
            }
        }
        for (bin_number, load) in loads {
            if load > u64::from(plan.ship_capacity) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    bin_number,
                    load,
                    capacity: plan.ship_capacity,
                }));
            }
        }

        for route in &plan.bins {
            for (leg_index, leg) in route.legs().iter().enumerate() {
                if leg.action == LegAction::Pickup
                    && leg.distance > self.max_leg_distance + ROUNDING_SLACK
                {
                    violations.push(Violation::new(ViolationType::LegTooLong {
                        bin_number: route.bin_number(),
                        leg_index,
                        distance: leg.distance,
                        max_distance: self.max_leg_distance,
                    }));
                }
            }

            let returns = route.legs_with(LegAction::Return).count();
            let ends_home = route.legs().last().map(|l| l.action) == Some(LegAction::Return);
            if returns != 1 || !ends_home {
                violations.push(Violation::new(ViolationType::MissingReturn {
                    bin_number: route.bin_number(),
                }));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Chunk, Coordinates, Route, RouteLeg, Strategy};

    fn plan(chunks: Vec<Chunk>, routes: Vec<Route>) -> Plan {
        Plan {
            success: true,
            bins_count: routes.len(),
            bins: routes,
            grand_total_distance: 0.0,
            home_label: "home (default)".to_string(),
            home_coordinates: Coordinates::origin(),
            original_chunks: chunks,
            strategy: Strategy::Basic,
            ship_capacity: 10,
        }
    }

    fn assigned(commodity: &str, size: u32, bin: usize) -> Chunk {
        Chunk {
            bin: Some(bin),
            ..Chunk::new(commodity, size)
        }
    }

    fn closed_route(bin: usize, pickup_distance: f64) -> Route {
        let mut r = Route::new(bin);
        let names = vec!["Gold".to_string()];
        let stop = Coordinates::new(pickup_distance, 0.0, 0.0);
        r.push_leg(RouteLeg::pickup(Coordinates::origin(), stop, "Sol", "Galileo", &names, pickup_distance));
        r.push_leg(RouteLeg::return_home(stop, Coordinates::origin(), pickup_distance));
        r
    }

    #[test]
    fn test_valid_plan() {
        let p = plan(
            vec![assigned("Gold", 10, 1), assigned("Gold", 5, 2)],
            vec![closed_route(1, 50.0), closed_route(2, 50.0)],
        );
        assert!(PlanEvaluator::new(166.0).evaluate(&p).is_empty());
    }

    #[test]
    fn test_capacity_exceeded() {
        let p = plan(
            vec![assigned("Gold", 10, 1), assigned("Silver", 5, 1)],
            vec![closed_route(1, 1.0)],
        );
        let v = PlanEvaluator::new(166.0).evaluate(&p);
        assert_eq!(v.len(), 1);
        assert!(matches!(
            v[0].kind,
            ViolationType::CapacityExceeded { bin_number: 1, load: 15, capacity: 10 }
        ));
    }

    #[test]
    fn test_unassigned_chunk() {
        let p = plan(
            vec![Chunk::new("Gold", 3), assigned("Silver", 3, 7)],
            vec![closed_route(1, 1.0)],
        );
        let v = PlanEvaluator::new(166.0).evaluate(&p);
        assert_eq!(v.len(), 2);
        assert!(v.iter().all(|x| matches!(x.kind, ViolationType::ChunkUnassigned { .. })));
    }

    #[test]
    fn test_leg_too_long() {
        let p = plan(vec![assigned("Gold", 1, 1)], vec![closed_route(1, 170.0)]);
        let v = PlanEvaluator::new(166.0).evaluate(&p);
        assert_eq!(v.len(), 1);
        assert!(matches!(v[0].kind, ViolationType::LegTooLong { leg_index: 0, .. }));
    }

    #[test]
    fn test_return_leg_not_checked_against_limit() {
        // The return leg may exceed the limit; only pickups are bounded.
        let mut r = Route::new(1);
        r.push_leg(RouteLeg::return_home(Coordinates::new(300.0, 0.0, 0.0), Coordinates::origin(), 300.0));
        let p = plan(vec![assigned("Gold", 1, 1)], vec![r]);
        assert!(PlanEvaluator::new(166.0).evaluate(&p).is_empty());
    }

    #[test]
    fn test_missing_return() {
        let mut r = Route::new(1);
        r.push_leg(RouteLeg::unreachable(Coordinates::origin(), "Gold"));
        let p = plan(vec![assigned("Gold", 1, 1)], vec![r]);
        let v = PlanEvaluator::new(166.0).evaluate(&p);
        assert_eq!(v, vec![Violation::new(ViolationType::MissingReturn { bin_number: 1 })]);
    }
}
