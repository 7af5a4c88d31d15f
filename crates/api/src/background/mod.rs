//! Background tasks spawned by the API server.

pub mod auto_rotation;
