//! Simulated surf conditions for the home view.
//!
//! Conditions are drawn fresh on every request and never persisted.

use crate::provider::random::RandomSource;
use serde::Serialize;
use std::fmt::{Display, Formatter};

const WAVE_HEIGHT_MIN_TENTHS: u32 = 10;
const WAVE_HEIGHT_MAX_TENTHS: u32 = 50;
const WIND_MIN_MPH: u32 = 5;
const WIND_MAX_MPH: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tide {
    Low,
    Rising,
    High,
    Falling,
}

const TIDES: [Tide; 4] = [Tide::Low, Tide::Rising, Tide::High, Tide::Falling];

impl Display for Tide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Rising => "Rising",
            Self::High => "High",
            Self::Falling => "Falling",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfConditions {
    /// One decimal place, within `[1.0, 5.0]`.
    pub wave_height_ft: f64,
    pub wind_mph: u32,
    pub tide: Tide,
}

impl SurfConditions {
    pub fn wave_height_label(&self) -> String {
        format!("{:.1} ft", self.wave_height_ft)
    }

    pub fn wind_label(&self) -> String {
        format!("{} mph", self.wind_mph)
    }
}

/// Draws a new set of conditions from `random`.
///
/// Every draw is clamped into its range, so a source that ignores the
/// requested bounds still yields valid conditions.
pub fn sample_conditions(random: &mut impl RandomSource) -> SurfConditions {
    let tenths = draw(random, WAVE_HEIGHT_MIN_TENTHS, WAVE_HEIGHT_MAX_TENTHS);
    let wind_mph = draw(random, WIND_MIN_MPH, WIND_MAX_MPH);
    let tide_index = draw(random, 0, (TIDES.len() - 1) as u32) as usize;

    SurfConditions {
        wave_height_ft: f64::from(tenths) / 10.0,
        wind_mph,
        tide: TIDES.get(tide_index).copied().unwrap_or(Tide::Low),
    }
}

fn draw(random: &mut impl RandomSource, low: u32, high: u32) -> u32 {
    random.uniform_inclusive(low, high).clamp(low, high)
}
