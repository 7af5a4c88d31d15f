//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod assignment_repo;
pub mod event_repo;
pub mod notification_repo;
pub mod shift_pattern_repo;
pub mod time_adjustment_repo;
pub mod user_repo;

pub use assignment_repo::AssignmentRepo;
pub use event_repo::EventRepo;
pub use notification_repo::NotificationRepo;
pub use shift_pattern_repo::ShiftPatternRepo;
pub use time_adjustment_repo::TimeAdjustmentRepo;
pub use user_repo::UserRepo;
