//! Schichtplan event bus and persistence infrastructure.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] — the canonical domain event envelope, with the
//!   rotation and time-change event names as constants.
//! - [`EventPersistence`] — background service that durably writes every
//!   event to the `events` table.

pub mod bus;
pub mod persistence;

pub use bus::{
    EventBus, PlatformEvent, EVENT_ROTATION_COMPLETED, EVENT_SHIFT_TIME_CHANGED,
    EVENT_SWEEP_COMPLETED,
};
pub use persistence::EventPersistence;
