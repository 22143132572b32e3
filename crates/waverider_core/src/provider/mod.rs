//! Injectable randomness and time sources.
//!
//! # Responsibility
//! - Keep every nondeterministic input of the core behind a trait so tests can
//!   replay fixed values.

pub mod clock;
pub mod random;
