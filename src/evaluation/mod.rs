//! Plan checking: capacity, chunk assignment, and leg-length invariants.

mod evaluator;

pub use evaluator::{PlanEvaluator, Violation, ViolationType};
