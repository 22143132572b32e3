//! Core use-case services.
//!
//! # Responsibility
//! - Own the application state and expose its mutations to the view layer.
//! - Keep view code decoupled from storage, randomness, and time sources.

pub mod conditions;
pub mod controller;
