//! Persistence adapter for the application state aggregate.
//!
//! # Responsibility
//! - Map the whole `AppState` to one serialized value in a key-value slot.
//! - Classify what was found on load instead of failing on bad data.
//!
//! # Invariants
//! - Every save overwrites the complete record.
//! - Malformed records are reported as a load outcome, never as an error.

pub mod state_repo;
