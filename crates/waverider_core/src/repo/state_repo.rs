//! JSON state repository over a `KeyValueStore` slot.

use crate::model::state::AppState;
use crate::store::{KeyValueStore, StoreError, StoreResult};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Persisted record that could not be decoded into a valid `AppState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecordError {
    message: String,
}

impl MalformedRecordError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for MalformedRecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed persisted state: {}", self.message)
    }
}

impl Error for MalformedRecordError {}

impl From<serde_json::Error> for MalformedRecordError {
    fn from(value: serde_json::Error) -> Self {
        Self::new(value.to_string())
    }
}

/// What `load` found in the storage slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A valid record was decoded.
    Restored,
    /// No record exists; defaults were used.
    Absent,
    /// A record exists but failed validation; defaults were used.
    Malformed(MalformedRecordError),
}

impl LoadOutcome {
    pub fn used_defaults(&self) -> bool {
        !matches!(self, Self::Restored)
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Restored => "restored",
            Self::Absent => "absent",
            Self::Malformed(_) => "malformed",
        }
    }
}

/// Reads and writes the application state under one storage key.
pub struct StateRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StateRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the persisted state, substituting defaults for absent or
    /// malformed records.
    ///
    /// # Errors
    /// - Returns the store error when the slot itself cannot be read.
    pub fn load(&self) -> StoreResult<(AppState, LoadOutcome)> {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw,
            Err(err) => {
                error!(
                    "event=state_load module=repo status=error error_code=store_read_failed error={}",
                    err
                );
                return Err(err);
            }
        };

        let (state, outcome) = match raw {
            None => (AppState::default(), LoadOutcome::Absent),
            Some(raw) => match decode_state(&raw) {
                Ok(state) => (state, LoadOutcome::Restored),
                Err(err) => (AppState::default(), LoadOutcome::Malformed(err)),
            },
        };

        match &outcome {
            LoadOutcome::Malformed(err) => warn!(
                "event=state_load module=repo status=ok outcome=malformed fallback=defaults error={}",
                err.message()
            ),
            other => info!(
                "event=state_load module=repo status=ok outcome={} sessions={}",
                other.label(),
                state.sessions().len()
            ),
        }

        Ok((state, outcome))
    }

    /// Overwrites the slot with the full serialized state.
    pub fn save(&self, state: &AppState) -> StoreResult<()> {
        let result = serde_json::to_string(state)
            .map_err(StoreError::from)
            .and_then(|raw| self.store.set(&self.key, &raw));

        match &result {
            Ok(()) => info!(
                "event=state_save module=repo status=ok sessions={}",
                state.sessions().len()
            ),
            Err(err) => error!(
                "event=state_save module=repo status=error error_code=store_write_failed error={}",
                err
            ),
        }
        result
    }

    /// Removes the slot entirely.
    pub fn clear(&self) -> StoreResult<()> {
        let result = self.store.remove(&self.key);
        match &result {
            Ok(()) => info!("event=state_clear module=repo status=ok"),
            Err(err) => error!(
                "event=state_clear module=repo status=error error_code=store_remove_failed error={}",
                err
            ),
        }
        result
    }
}

// serde accepts JSON arrays for structs; only objects are valid records.
fn decode_state(raw: &str) -> Result<AppState, MalformedRecordError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(MalformedRecordError::new("expected a JSON object"));
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::{LoadOutcome, StateRepository};
    use crate::model::state::AppState;
    use crate::store::InMemoryKeyValueStore;

    #[test]
    fn absent_slot_loads_defaults() {
        let repo = StateRepository::new(InMemoryKeyValueStore::new(), "waveRider");
        assert_eq!(repo.key(), "waveRider");
        let (state, outcome) = repo.load().unwrap();
        assert_eq!(state, AppState::default());
        assert_eq!(outcome, LoadOutcome::Absent);
        assert!(outcome.used_defaults());
    }

    #[test]
    fn garbage_loads_defaults_and_reports_malformed() {
        let store = InMemoryKeyValueStore::with_entry("waveRider", "{not json");
        let repo = StateRepository::new(store, "waveRider");
        let (state, outcome) = repo.load().unwrap();
        assert_eq!(state, AppState::default());
        assert!(matches!(outcome, LoadOutcome::Malformed(_)));
    }

    #[test]
    fn clear_removes_slot() {
        let repo = StateRepository::new(InMemoryKeyValueStore::new(), "waveRider");
        repo.save(&AppState::default()).unwrap();
        assert!(repo.store().raw("waveRider").is_some());

        repo.clear().unwrap();
        assert!(repo.store().raw("waveRider").is_none());
    }
}
