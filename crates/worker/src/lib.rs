//! Rotation executor: applies the core evaluator's decisions to persisted
//! state, for one employee (manual trigger) or for every eligible employee
//! (bulk sweep). Used by the API handlers, the background sweep task, and
//! the standalone `schichtplan-worker` binary.

pub mod executor;
pub mod store;

pub use executor::{
    rotate_employee, run_sweep, EmployeeRotationResult, RotationError, RotationOutcome,
    RotationResult, SweepReport,
};
pub use store::RotationStore;
