use waverider_core::{
    AppController, ControllerError, InMemoryKeyValueStore, LoadOutcome, SequenceRandomSource,
    SessionInput, SessionsView, SteppingClock, ValidationError,
};

const KEY: &str = "waveRider";

fn controller_with(
    store: &InMemoryKeyValueStore,
    depletions: Vec<u32>,
) -> AppController<&InMemoryKeyValueStore, SequenceRandomSource, SteppingClock> {
    let mut controller = AppController::new(
        store,
        SequenceRandomSource::new(depletions),
        SteppingClock::new(1_700_000_000_000, 60_000),
    );
    controller.initialize().unwrap();
    controller
}

fn persisted(store: &InMemoryKeyValueStore) -> serde_json::Value {
    serde_json::from_str(&store.raw(KEY).expect("record should be persisted")).unwrap()
}

#[test]
fn fresh_start_logs_pipeline_session() {
    let store = InMemoryKeyValueStore::new();
    let mut controller = controller_with(&store, vec![20]);

    let state = controller
        .log_session(&SessionInput::new("Pipeline", 1.5, 8.0))
        .unwrap();

    assert_eq!(state.wax().value(), 80.0);
    assert_eq!(state.sessions().len(), 1);
    let session = &state.sessions()[0];
    assert_eq!(session.spot(), "Pipeline");
    assert_eq!(session.hours(), 1.5);
    assert_eq!(session.waves(), 8);
    assert_eq!(session.logged_at_ms(), 1_700_000_000_000);

    let record = persisted(&store);
    assert_eq!(record["waxLevel"], 80.0);
    assert_eq!(record["currentView"], "home");
    assert_eq!(record["sessions"][0]["spot"], "Pipeline");
    assert_eq!(record["sessions"][0]["date"], 1_700_000_000_000_i64);
}

#[test]
fn depletion_clamps_at_zero() {
    let store = InMemoryKeyValueStore::with_entry(
        KEY,
        r#"{"currentView":"home","waxLevel":10,"sessions":[]}"#,
    );
    let mut controller = controller_with(&store, vec![15]);

    let state = controller
        .log_session(&SessionInput::new("Wedge", 1.0, 4.0))
        .unwrap();

    assert_eq!(state.wax().value(), 0.0);
    assert!(state.wax().reading().critical);
}

#[test]
fn sessions_are_ordered_most_recent_first() {
    let store = InMemoryKeyValueStore::new();
    let mut controller = controller_with(&store, vec![15, 16, 17, 18, 19]);
    let spots = ["Pipeline", "Wedge", "Shark Island", "Mavericks", "Teahupoo"];

    for (index, spot) in spots.iter().enumerate() {
        controller
            .log_session(&SessionInput::new(*spot, 1.0, index as f64))
            .unwrap();
    }

    let state = controller.state().unwrap();
    let logged: Vec<&str> = state.sessions().iter().map(|s| s.spot()).collect();
    assert_eq!(
        logged,
        ["Teahupoo", "Mavericks", "Shark Island", "Wedge", "Pipeline"]
    );
    assert!(state
        .sessions()
        .windows(2)
        .all(|pair| pair[0].logged_at_ms() >= pair[1].logged_at_ms()));
    assert_eq!(state.wax().value(), 100.0 - 15.0 - 16.0 - 17.0 - 18.0 - 19.0);
}

#[test]
fn rejected_session_changes_nothing_and_writes_nothing() {
    let store = InMemoryKeyValueStore::new();
    let mut controller = controller_with(&store, vec![20]);

    let err = controller
        .log_session(&SessionInput::new("", 1.0, 2.0))
        .unwrap_err();

    assert!(matches!(
        err,
        ControllerError::Validation(ValidationError::EmptySpot)
    ));
    let state = controller.state().unwrap();
    assert_eq!(state.wax().value(), 100.0);
    assert_eq!(state.sessions_for_display(), SessionsView::Empty);
    assert_eq!(store.write_count(), 0);
    assert!(store.raw(KEY).is_none());
}

#[test]
fn invalid_hours_and_waves_are_rejected() {
    let store = InMemoryKeyValueStore::new();
    let mut controller = controller_with(&store, vec![20]);

    assert!(matches!(
        controller.log_session(&SessionInput::new("Wedge", 0.0, 2.0)),
        Err(ControllerError::Validation(ValidationError::InvalidHours(_)))
    ));
    assert!(matches!(
        controller.log_session(&SessionInput::new("Wedge", 1.0, 2.5)),
        Err(ControllerError::Validation(ValidationError::InvalidWaves(_)))
    ));
    assert!(matches!(
        controller.log_session(&SessionInput::new("Wedge", 1.0, f64::NAN)),
        Err(ControllerError::Validation(ValidationError::InvalidWaves(_)))
    ));
    assert_eq!(store.write_count(), 0);
}

#[test]
fn rewax_restores_full_from_empty() {
    let store = InMemoryKeyValueStore::with_entry(KEY, r#"{"waxLevel":0}"#);
    let mut controller = controller_with(&store, vec![20]);

    let state = controller.rewax().unwrap();
    assert_eq!(state.wax().value(), 100.0);
    assert_eq!(persisted(&store)["waxLevel"], 100.0);

    controller.rewax().unwrap();
    assert_eq!(controller.state().unwrap().wax().value(), 100.0);
}

#[test]
fn unconfirmed_reset_is_a_no_op() {
    let store = InMemoryKeyValueStore::new();
    let mut controller = controller_with(&store, vec![20]);
    controller
        .log_session(&SessionInput::new("Pipeline", 2.0, 10.0))
        .unwrap();
    let writes_before = store.write_count();
    let before = controller.state().unwrap().clone();

    let state = controller.reset(false).unwrap();

    assert_eq!(state, &before);
    assert_eq!(store.write_count(), writes_before);
    assert!(store.raw(KEY).is_some());
}

#[test]
fn confirmed_reset_removes_record_and_restores_defaults() {
    let store = InMemoryKeyValueStore::new();
    let mut controller = controller_with(&store, vec![20]);
    controller
        .log_session(&SessionInput::new("Pipeline", 2.0, 10.0))
        .unwrap();
    controller.select_view("sessions").unwrap();

    let state = controller.reset(true).unwrap();

    assert_eq!(state.wax().value(), 100.0);
    assert!(state.sessions().is_empty());
    assert_eq!(state.current_view().as_str(), "home");
    assert!(store.raw(KEY).is_none());
    assert!(controller.is_ready());
}

#[test]
fn failed_write_keeps_previous_state() {
    let store = InMemoryKeyValueStore::new();
    let mut controller = controller_with(&store, vec![20]);
    controller
        .log_session(&SessionInput::new("Pipeline", 1.0, 3.0))
        .unwrap();
    let before = controller.state().unwrap().clone();
    let record_before = store.raw(KEY);

    store.set_fail_writes(true);
    let log_err = controller
        .log_session(&SessionInput::new("Wedge", 1.0, 3.0))
        .unwrap_err();
    let rewax_err = controller.rewax().unwrap_err();
    let reset_err = controller.reset(true).unwrap_err();

    assert!(matches!(log_err, ControllerError::Persistence(_)));
    assert!(matches!(rewax_err, ControllerError::Persistence(_)));
    assert!(matches!(reset_err, ControllerError::Persistence(_)));
    assert_eq!(controller.state().unwrap(), &before);
    assert_eq!(store.raw(KEY), record_before);

    store.set_fail_writes(false);
    let state = controller
        .log_session(&SessionInput::new("Wedge", 1.0, 3.0))
        .unwrap();
    assert_eq!(state.sessions().len(), 2);
}

#[test]
fn selected_view_is_persisted_with_next_mutation() {
    let store = InMemoryKeyValueStore::new();
    let mut controller = controller_with(&store, vec![20]);

    controller.select_view("spots").unwrap();
    assert_eq!(store.write_count(), 0);
    assert!(matches!(
        controller.select_view("Not A View"),
        Err(ControllerError::InvalidView(_))
    ));
    assert_eq!(controller.state().unwrap().current_view().as_str(), "spots");

    controller.rewax().unwrap();
    assert_eq!(persisted(&store)["currentView"], "spots");
}

#[test]
fn restart_restores_previous_state() {
    let store = InMemoryKeyValueStore::new();
    let saved = {
        let mut controller = controller_with(&store, vec![22]);
        controller
            .log_session(&SessionInput::new("Shark Island", 0.75, 6.0))
            .unwrap()
            .clone()
    };

    let mut controller = AppController::new(
        &store,
        SequenceRandomSource::constant(20),
        SteppingClock::fixed(0),
    );
    let outcome = controller.initialize().unwrap();

    assert_eq!(outcome, LoadOutcome::Restored);
    assert_eq!(controller.state().unwrap(), &saved);
}

#[test]
fn clock_going_backwards_keeps_timestamps_monotonic() {
    let store = InMemoryKeyValueStore::new();
    let mut controller = AppController::new(
        &store,
        SequenceRandomSource::constant(15),
        SteppingClock::new(5_000, -1_000),
    );
    controller.initialize().unwrap();

    controller
        .log_session(&SessionInput::new("Pipeline", 1.0, 1.0))
        .unwrap();
    let state = controller
        .log_session(&SessionInput::new("Wedge", 1.0, 1.0))
        .unwrap();

    assert_eq!(state.sessions()[0].logged_at_ms(), 5_000);
    assert_eq!(state.sessions()[1].logged_at_ms(), 5_000);
}
