//! Application state controller.
//!
//! # Responsibility
//! - Own the single `AppState` instance and every mutation of it.
//! - Persist the full aggregate after each mutation.
//!
//! # Invariants
//! - Every operation except `initialize` and `sample_conditions` requires the
//!   `Ready` lifecycle state.
//! - Mutations run validate -> mutate a working copy -> persist -> commit.
//!   A failed step leaves the in-memory state exactly as it was.
//! - A failed write is reported to the caller; nothing is retried.

use crate::config::{ConfigError, CoreConfig, DEFAULT_STORAGE_KEY};
use crate::model::session::{SessionInput, ValidationError};
use crate::model::state::{AppState, ViewId, ViewIdError};
use crate::provider::clock::Clock;
use crate::provider::random::RandomSource;
use crate::repo::state_repo::{LoadOutcome, StateRepository};
use crate::service::conditions::{sample_conditions, SurfConditions};
use crate::store::{KeyValueStore, StoreError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Operation invoked in the wrong lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalStateError {
    NotInitialized,
    AlreadyInitialized,
}

impl Display for IllegalStateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "controller is not initialized"),
            Self::AlreadyInitialized => write!(f, "controller is already initialized"),
        }
    }
}

impl Error for IllegalStateError {}

#[derive(Debug)]
pub enum ControllerError {
    IllegalState(IllegalStateError),
    Validation(ValidationError),
    InvalidView(ViewIdError),
    Persistence(StoreError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalState(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidView(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "persistence failed: {err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IllegalState(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidView(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<IllegalStateError> for ControllerError {
    fn from(value: IllegalStateError) -> Self {
        Self::IllegalState(value)
    }
}

impl From<ValidationError> for ControllerError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ViewIdError> for ControllerError {
    fn from(value: ViewIdError) -> Self {
        Self::InvalidView(value)
    }
}

impl From<StoreError> for ControllerError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

#[derive(Debug)]
enum Lifecycle {
    Uninitialized,
    Ready(AppState),
}

/// Single owner of the application state.
///
/// Generic over the durable store, the depletion random source, and the
/// session clock so tests can inject deterministic collaborators.
pub struct AppController<S: KeyValueStore, R: RandomSource, C: Clock> {
    repo: StateRepository<S>,
    random: R,
    clock: C,
    lifecycle: Lifecycle,
}

impl<S: KeyValueStore, R: RandomSource, C: Clock> AppController<S, R, C> {
    /// Creates an uninitialized controller using the default storage key.
    pub fn new(store: S, random: R, clock: C) -> Self {
        Self::with_storage_key(store, DEFAULT_STORAGE_KEY, random, clock)
    }

    /// Creates an uninitialized controller storing state under `config`'s key.
    pub fn from_config(
        store: S,
        config: &CoreConfig,
        random: R,
        clock: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_storage_key(
            store,
            config.storage_key.trim(),
            random,
            clock,
        ))
    }

    fn with_storage_key(store: S, key: &str, random: R, clock: C) -> Self {
        Self {
            repo: StateRepository::new(store, key),
            random,
            clock,
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Ready(_))
    }

    pub fn repository(&self) -> &StateRepository<S> {
        &self.repo
    }

    /// Restores persisted state, or defaults when none is usable.
    ///
    /// Returns how the state was obtained so callers can surface a fallback.
    ///
    /// # Errors
    /// - `IllegalState(AlreadyInitialized)` on a second call.
    /// - `Persistence` when the store cannot be read; the controller stays
    ///   uninitialized.
    pub fn initialize(&mut self) -> ControllerResult<LoadOutcome> {
        if self.is_ready() {
            return Err(IllegalStateError::AlreadyInitialized.into());
        }

        let (state, outcome) = self.repo.load()?;
        debug!(
            "event=controller_init module=controller status=ok defaults={} wax_level={}",
            outcome.used_defaults(),
            state.wax().value()
        );
        self.lifecycle = Lifecycle::Ready(state);
        Ok(outcome)
    }

    /// Read-only snapshot for rendering.
    pub fn state(&self) -> ControllerResult<&AppState> {
        match &self.lifecycle {
            Lifecycle::Ready(state) => Ok(state),
            Lifecycle::Uninitialized => Err(IllegalStateError::NotInitialized.into()),
        }
    }

    /// Validates and records a session, then depletes wax by a random amount.
    ///
    /// # Errors
    /// - `Validation` when a field is invalid; nothing is mutated or written.
    /// - `Persistence` when the write fails; in-memory state is unchanged.
    pub fn log_session(&mut self, input: &SessionInput) -> ControllerResult<&AppState> {
        let mut next = self.state()?.clone();
        let logged_at_ms = self.clock.now_epoch_ms();

        let (ledger, wax) = next.ledger_and_wax_mut();
        let depletion = match ledger.record(input, logged_at_ms, wax, &mut self.random) {
            Ok(depletion) => depletion,
            Err(err) => {
                warn!(
                    "event=session_rejected module=controller status=error reason={}",
                    err.code()
                );
                return Err(err.into());
            }
        };

        let wax_level = next.wax().value();
        let sessions = next.sessions().len();
        let state = self.commit(next)?;
        info!(
            "event=session_logged module=controller status=ok depletion={} wax_level={} sessions={}",
            depletion, wax_level, sessions
        );
        Ok(state)
    }

    /// Resets wax to full.
    pub fn rewax(&mut self) -> ControllerResult<&AppState> {
        let mut next = self.state()?.clone();
        let previous = next.wax().value();
        next.wax_mut().replenish();

        let state = self.commit(next)?;
        info!(
            "event=rewax module=controller status=ok previous_wax_level={}",
            previous
        );
        Ok(state)
    }

    /// Erases the persisted record and returns to defaults.
    ///
    /// Without `confirmed`, nothing is changed or written.
    pub fn reset(&mut self, confirmed: bool) -> ControllerResult<&AppState> {
        self.state()?;

        if !confirmed {
            info!("event=reset module=controller status=skipped reason=unconfirmed");
            return self.state();
        }

        self.repo.clear()?;
        self.lifecycle = Lifecycle::Ready(AppState::default());
        info!("event=reset module=controller status=ok");
        self.state()
    }

    /// Records the selected view in memory.
    ///
    /// The selection is not written on its own; the next mutation persists it.
    pub fn select_view(&mut self, view: &str) -> ControllerResult<&AppState> {
        let Lifecycle::Ready(state) = &mut self.lifecycle else {
            return Err(IllegalStateError::NotInitialized.into());
        };
        let view = ViewId::parse(view)?;

        debug!(
            "event=view_selected module=controller status=ok view={} known={}",
            view,
            view.is_known()
        );
        state.set_current_view(view);
        Ok(&*state)
    }

    /// Draws simulated conditions. Works in any lifecycle state.
    pub fn sample_conditions(&mut self) -> SurfConditions {
        sample_conditions(&mut self.random)
    }

    fn commit(&mut self, next: AppState) -> ControllerResult<&AppState> {
        self.repo.save(&next)?;
        self.lifecycle = Lifecycle::Ready(next);
        self.state()
    }
}
