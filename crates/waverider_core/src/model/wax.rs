//! Wax resource model.
//!
//! # Responsibility
//! - Hold the wax level and apply depletion/replenishment rules.
//! - Derive the presentation tier and critical hint.
//!
//! # Invariants
//! - The level is finite and within `[MIN_WAX_LEVEL, MAX_WAX_LEVEL]`.
//! - Depletion clamps at `MIN_WAX_LEVEL`; replenishment sets exactly
//!   `MAX_WAX_LEVEL`.

use crate::provider::random::RandomSource;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::NonZeroU32;

pub const MIN_WAX_LEVEL: f64 = 0.0;
pub const MAX_WAX_LEVEL: f64 = 100.0;
/// Smallest wax amount one logged session can consume.
pub const MIN_DEPLETION: u32 = 15;
/// Largest wax amount one logged session can consume.
pub const MAX_DEPLETION: u32 = 24;

const HIGH_TIER_FLOOR: f64 = 60.0;
const MEDIUM_TIER_FLOOR: f64 = 30.0;
const CRITICAL_BELOW: f64 = 20.0;
const CRITICAL_HINT: &str = "Wax up! Your board's slipping!";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaxLevelError {
    OutOfRange(f64),
}

impl Display for WaxLevelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange(value) => write!(
                f,
                "wax level {value} must be a finite number within [{MIN_WAX_LEVEL}, {MAX_WAX_LEVEL}]"
            ),
        }
    }
}

impl Error for WaxLevelError {}

/// Current wax level of the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct WaxLevel(f64);

impl Default for WaxLevel {
    fn default() -> Self {
        Self::full()
    }
}

impl WaxLevel {
    /// Freshly waxed board.
    pub fn full() -> Self {
        Self(MAX_WAX_LEVEL)
    }

    /// Validates a restored level.
    pub fn new(value: f64) -> Result<Self, WaxLevelError> {
        if !value.is_finite() || !(MIN_WAX_LEVEL..=MAX_WAX_LEVEL).contains(&value) {
            return Err(WaxLevelError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Removes `amount` of wax, clamping at zero. Returns the new level.
    ///
    /// Every depletion removes at least one unit; a zero amount is not
    /// representable.
    pub fn deplete(&mut self, amount: NonZeroU32) -> f64 {
        self.0 = (self.0 - f64::from(amount.get())).max(MIN_WAX_LEVEL);
        self.0
    }

    /// Rewaxes the board back to full.
    pub fn replenish(&mut self) -> f64 {
        self.0 = MAX_WAX_LEVEL;
        self.0
    }

    pub fn reading(self) -> WaxReading {
        tier(self.0)
    }
}

impl TryFrom<f64> for WaxLevel {
    type Error = WaxLevelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WaxLevel> for f64 {
    fn from(value: WaxLevel) -> Self {
        value.0
    }
}

/// Draws how much wax one session consumes, in
/// `[MIN_DEPLETION, MAX_DEPLETION]`.
pub fn draw_depletion(random: &mut impl RandomSource) -> NonZeroU32 {
    let amount = random
        .uniform_inclusive(MIN_DEPLETION, MAX_DEPLETION)
        .clamp(MIN_DEPLETION, MAX_DEPLETION);
    NonZeroU32::new(amount).unwrap_or(NonZeroU32::MIN)
}

/// Presentation tier of the wax level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaxTier {
    /// Above 60.
    High,
    /// Above 30, up to and including 60.
    Medium,
    /// 30 or below.
    Low,
}

/// Derived, non-persisted view of a wax level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaxReading {
    pub value: f64,
    pub tier: WaxTier,
    /// Set when the level drops below 20.
    pub critical: bool,
}

impl WaxReading {
    /// Status line such as `Wax Level: 80%`.
    pub fn status_label(&self) -> String {
        format!("Wax Level: {:.0}%", self.value)
    }

    pub fn hint(&self) -> Option<&'static str> {
        self.critical.then_some(CRITICAL_HINT)
    }
}

/// Maps a wax level onto its tier and critical flag.
pub fn tier(value: f64) -> WaxReading {
    let tier = if value > HIGH_TIER_FLOOR {
        WaxTier::High
    } else if value > MEDIUM_TIER_FLOOR {
        WaxTier::Medium
    } else {
        WaxTier::Low
    };

    WaxReading {
        value,
        tier,
        critical: value < CRITICAL_BELOW,
    }
}
