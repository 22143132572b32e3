//! Core domain logic for WaveRider.
//! This crate is the single source of truth for wax and session invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod provider;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::ledger::SessionLedger;
pub use model::session::{Session, SessionInput, ValidationError};
pub use model::spot::{spot_catalog, SurfSpot};
pub use model::state::{known_views, AppState, SessionsView, ViewId, ViewIdError};
pub use model::wax::{draw_depletion, tier, WaxLevel, WaxLevelError, WaxReading, WaxTier};
pub use provider::clock::{Clock, SteppingClock, SystemClock};
pub use provider::random::{RandomSource, RngRandomSource, SequenceRandomSource};
pub use repo::state_repo::{LoadOutcome, MalformedRecordError, StateRepository};
pub use service::conditions::{sample_conditions, SurfConditions, Tide};
pub use service::controller::{
    AppController, ControllerError, ControllerResult, IllegalStateError,
};
pub use store::{
    InMemoryKeyValueStore, KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
