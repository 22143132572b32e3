//! Application state aggregate.
//!
//! # Responsibility
//! - Combine wax level, session ledger, and view selection into one record.
//! - Define the persisted wire shape (`currentView`, `waxLevel`, `sessions`).
//!
//! # Invariants
//! - The aggregate is always serialized and deserialized as a whole.
//! - Fields missing from a persisted record take their defaults; present
//!   fields must pass their own validation.

use crate::model::ledger::SessionLedger;
use crate::model::session::Session;
use crate::model::wax::WaxLevel;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const HOME_VIEW: &str = "home";
pub const SESSIONS_VIEW: &str = "sessions";
pub const SPOTS_VIEW: &str = "spots";

const KNOWN_VIEWS: &[&str] = &[HOME_VIEW, SESSIONS_VIEW, SPOTS_VIEW];

static VIEW_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_-]{0,31}$").expect("valid view id regex"));

/// Returns the view identifiers the bundled front end knows how to render.
pub fn known_views() -> &'static [&'static str] {
    KNOWN_VIEWS
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewIdError {
    Invalid(String),
}

impl Display for ViewIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(value) => write!(
                f,
                "invalid view id `{value}`; expected a lowercase slug of at most 32 characters"
            ),
        }
    }
}

impl Error for ViewIdError {}

/// Identifier of the currently selected view. Presentation-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ViewId(String);

impl ViewId {
    pub fn parse(value: &str) -> Result<Self, ViewIdError> {
        let trimmed = value.trim();
        if !VIEW_ID_RE.is_match(trimmed) {
            return Err(ViewIdError::Invalid(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        KNOWN_VIEWS.contains(&self.0.as_str())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self(HOME_VIEW.to_string())
    }
}

impl Display for ViewId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ViewId {
    type Error = ViewIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ViewId> for String {
    fn from(value: ViewId) -> Self {
        value.0
    }
}

/// What the sessions view should render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionsView<'a> {
    /// No sessions yet; render the "start surfing" prompt.
    Empty,
    Entries(&'a [Session]),
}

/// Aggregate root persisted under the configured storage key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    #[serde(rename = "currentView")]
    current_view: ViewId,
    #[serde(rename = "waxLevel")]
    wax: WaxLevel,
    #[serde(rename = "sessions")]
    ledger: SessionLedger,
}

impl AppState {
    pub fn current_view(&self) -> &ViewId {
        &self.current_view
    }

    pub fn wax(&self) -> WaxLevel {
        self.wax
    }

    pub fn sessions(&self) -> &[Session] {
        self.ledger.list()
    }

    pub fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }

    pub fn sessions_for_display(&self) -> SessionsView<'_> {
        if self.ledger.is_empty() {
            SessionsView::Empty
        } else {
            SessionsView::Entries(self.ledger.list())
        }
    }

    pub(crate) fn wax_mut(&mut self) -> &mut WaxLevel {
        &mut self.wax
    }

    pub(crate) fn ledger_and_wax_mut(&mut self) -> (&mut SessionLedger, &mut WaxLevel) {
        (&mut self.ledger, &mut self.wax)
    }

    pub(crate) fn set_current_view(&mut self, view: ViewId) {
        self.current_view = view;
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, SessionsView, ViewId, ViewIdError};

    #[test]
    fn defaults_match_fresh_install() {
        let state = AppState::default();
        assert_eq!(state.current_view().as_str(), "home");
        assert_eq!(state.wax().value(), 100.0);
        assert!(state.sessions().is_empty());
        assert_eq!(state.sessions_for_display(), SessionsView::Empty);
    }

    #[test]
    fn view_id_accepts_slugs_only() {
        assert_eq!(ViewId::parse(" spots ").unwrap().as_str(), "spots");
        assert!(ViewId::parse("sessions").unwrap().is_known());
        assert!(!ViewId::parse("settings").unwrap().is_known());
        assert_eq!(
            ViewId::parse("Home View").unwrap_err(),
            ViewIdError::Invalid("Home View".to_string())
        );
        assert!(ViewId::parse("").is_err());
    }

    #[test]
    fn partial_record_merges_with_defaults() {
        let state: AppState = serde_json::from_str(r#"{"waxLevel": 42}"#).unwrap();
        assert_eq!(state.wax().value(), 42.0);
        assert_eq!(state.current_view().as_str(), "home");
        assert!(state.sessions().is_empty());
    }

    #[test]
    fn serializes_with_record_field_names() {
        let json = serde_json::to_value(AppState::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "currentView": "home",
                "waxLevel": 100.0,
                "sessions": []
            })
        );
    }
}
