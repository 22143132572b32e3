//! Logged surf session records.
//!
//! # Responsibility
//! - Validate user-supplied session input.
//! - Define the immutable session record and its persisted wire shape.
//!
//! # Invariants
//! - `spot` is non-empty after trimming.
//! - `hours` is finite and strictly positive.
//! - `waves` is a non-negative integer.
//! - Fields are private; a constructed session is never modified.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reason for a session that fails a field constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    EmptySpot,
    InvalidHours(f64),
    InvalidWaves(f64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySpot => write!(f, "spot cannot be empty"),
            Self::InvalidHours(hours) => {
                write!(f, "hours must be a finite number greater than 0, got {hours}")
            }
            Self::InvalidWaves(waves) => {
                write!(f, "waves must be a non-negative whole number, got {waves}")
            }
        }
    }
}

impl Error for ValidationError {}

impl ValidationError {
    /// Stable machine-readable code for logs and UI mapping.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptySpot => "empty_spot",
            Self::InvalidHours(_) => "invalid_hours",
            Self::InvalidWaves(_) => "invalid_waves",
        }
    }
}

/// Raw session input as entered in the log form.
///
/// `waves` arrives as a number so that fractional or non-finite entries can be
/// rejected instead of silently truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInput {
    pub spot: String,
    pub hours: f64,
    pub waves: f64,
}

impl SessionInput {
    pub fn new(spot: impl Into<String>, hours: f64, waves: f64) -> Self {
        Self {
            spot: spot.into(),
            hours,
            waves,
        }
    }
}

/// One logged surf outing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct Session {
    spot: String,
    hours: f64,
    waves: u32,
    /// Unix epoch milliseconds when the session was logged.
    #[serde(rename = "date")]
    logged_at_ms: i64,
}

/// Unchecked wire shape used while decoding persisted sessions.
#[derive(Deserialize)]
struct SessionRecord {
    spot: String,
    hours: f64,
    waves: u32,
    date: i64,
}

impl TryFrom<SessionRecord> for Session {
    type Error = ValidationError;

    /// Restored spots keep their stored text; only blank ones are rejected.
    fn try_from(value: SessionRecord) -> Result<Self, Self::Error> {
        if value.spot.trim().is_empty() {
            return Err(ValidationError::EmptySpot);
        }
        validate_hours(value.hours)?;
        Ok(Self {
            spot: value.spot,
            hours: value.hours,
            waves: value.waves,
            logged_at_ms: value.date,
        })
    }
}

impl Session {
    /// Builds a session from form input stamped at `logged_at_ms`.
    ///
    /// # Errors
    /// - `EmptySpot` when the trimmed spot is empty.
    /// - `InvalidHours` when hours is not finite or not above zero.
    /// - `InvalidWaves` when waves is negative, fractional, non-finite, or
    ///   beyond `u32::MAX`.
    pub fn from_input(input: &SessionInput, logged_at_ms: i64) -> Result<Self, ValidationError> {
        let spot = validate_spot(&input.spot)?;
        validate_hours(input.hours)?;
        let waves = validate_waves(input.waves)?;

        Ok(Self {
            spot,
            hours: input.hours,
            waves,
            logged_at_ms,
        })
    }

    pub fn spot(&self) -> &str {
        &self.spot
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn waves(&self) -> u32 {
        self.waves
    }

    pub fn logged_at_ms(&self) -> i64 {
        self.logged_at_ms
    }
}

fn validate_spot(spot: &str) -> Result<String, ValidationError> {
    let trimmed = spot.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptySpot);
    }
    Ok(trimmed.to_string())
}

fn validate_hours(hours: f64) -> Result<(), ValidationError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(ValidationError::InvalidHours(hours));
    }
    Ok(())
}

fn validate_waves(waves: f64) -> Result<u32, ValidationError> {
    if !waves.is_finite() || waves < 0.0 || waves.fract() != 0.0 || waves > f64::from(u32::MAX) {
        return Err(ValidationError::InvalidWaves(waves));
    }
    Ok(waves as u32)
}
