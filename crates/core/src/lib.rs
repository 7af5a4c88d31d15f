//! Schichtplan domain core.
//!
//! Pure scheduling logic with zero internal deps so it can be used by the
//! API/repository layer, the worker binary, and any future CLI tooling:
//!
//! - [`rotation`] — Woche rotation evaluator (next pattern, due check).
//! - [`pattern`] — shift types, weekday slots, weekly-hours derivation.
//! - [`adjustment`] — flexible shift-time adjustment arithmetic and bounds.

pub mod adjustment;
pub mod error;
pub mod pattern;
pub mod roles;
pub mod rotation;
pub mod types;
