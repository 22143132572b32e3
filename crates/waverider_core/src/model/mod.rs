//! Domain model for the wax resource, logged sessions, and the state aggregate.
//!
//! # Responsibility
//! - Define the canonical records owned by the application state.
//! - Enforce field-level invariants at construction and deserialization.
//!
//! # Invariants
//! - Wax level never leaves `[0, 100]`.
//! - Sessions are immutable once constructed.

pub mod ledger;
pub mod session;
pub mod spot;
pub mod state;
pub mod wax;
