//! Ordered collection of logged sessions.
//!
//! # Responsibility
//! - Validate and append sessions, newest first.
//! - Couple each successful append to exactly one wax depletion.
//!
//! # Invariants
//! - Index 0 is the most recently logged session.
//! - Timestamps never decrease from tail to head.
//! - A rejected append leaves both the ledger and the wax level untouched.

use crate::model::session::{Session, SessionInput, ValidationError};
use crate::model::wax::{draw_depletion, WaxLevel};
use crate::provider::random::RandomSource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLedger {
    sessions: Vec<Session>,
}

impl SessionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `input` and inserts it at the head.
    ///
    /// The stored timestamp is `logged_at_ms`, raised to the newest existing
    /// timestamp if the clock went backwards.
    pub fn append(
        &mut self,
        input: &SessionInput,
        logged_at_ms: i64,
    ) -> Result<&[Session], ValidationError> {
        let logged_at_ms = self
            .latest()
            .map_or(logged_at_ms, |newest| logged_at_ms.max(newest.logged_at_ms()));
        let session = Session::from_input(input, logged_at_ms)?;
        self.sessions.insert(0, session);
        Ok(&self.sessions)
    }

    /// Appends `input` and depletes `wax` by a freshly drawn amount.
    ///
    /// Returns the depletion applied. Nothing is drawn or depleted when
    /// validation fails.
    pub fn record(
        &mut self,
        input: &SessionInput,
        logged_at_ms: i64,
        wax: &mut WaxLevel,
        random: &mut impl RandomSource,
    ) -> Result<u32, ValidationError> {
        self.append(input, logged_at_ms)?;
        let depletion = draw_depletion(random);
        wax.deplete(depletion);
        Ok(depletion.get())
    }

    /// All sessions, newest first. Empty is a normal state.
    pub fn list(&self) -> &[Session] {
        &self.sessions
    }

    pub fn latest(&self) -> Option<&Session> {
        self.sessions.first()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
