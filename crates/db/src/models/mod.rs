//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the write paths that need them

pub mod assignment;
pub mod notification;
pub mod shift_pattern;
pub mod time_adjustment;
pub mod user;
