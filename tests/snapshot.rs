//! Snapshot behaviour: copy-with-changes, structural equality and the JSON
//! shape shared with clients.

use taskstate::{
    AppState, FilterType, FixedClock, ProcessType, SequentialIds, SyncFailure, SyncState, Task,
    TaskFactory,
};

fn buy_milk() -> Task {
    Task::new("t1", 100).with_title("Buy milk")
}

#[test]
fn completing_a_task_hides_it_from_active() {
    let state = AppState::new(vec![buy_milk()], FilterType::Active, SyncState::Idle);
    let visible: Vec<&Task> = state.visible_tasks().collect();
    assert_eq!(visible, vec![&buy_milk()]);

    let (state, replaced) = state.with_task_replaced(buy_milk().with_completed(true));
    assert!(replaced);
    assert_eq!(state.visible_tasks().count(), 0);

    let state = state.with_filter(FilterType::Complete);
    assert_eq!(state.visible_tasks().count(), 1);
}

#[test]
fn changing_one_field_keeps_the_others() {
    let base = AppState::new(vec![buy_milk()], FilterType::Any, SyncState::Idle);

    let filtered = base.clone().with_filter(FilterType::Active);
    assert_ne!(filtered, base);
    assert_eq!(filtered.tasks(), base.tasks());
    assert_eq!(filtered.sync_state(), base.sync_state());

    let syncing = base
        .clone()
        .with_sync_state(SyncState::Process(ProcessType::Refresh));
    assert_ne!(syncing, base);
    assert_eq!(syncing.tasks(), base.tasks());
    assert_eq!(syncing.filter(), base.filter());

    let emptied = base.clone().with_tasks(Vec::new());
    assert_ne!(emptied, base);
    assert_eq!(emptied.filter(), base.filter());

    assert_eq!(base.clone().with_filter(FilterType::Any), base);
}

#[test]
fn refresh_lifecycle_through_snapshots() {
    let state = AppState::default();
    assert!(state.sync_state().is_idle());

    let state = state
        .with_sync_transition(SyncState::Process(ProcessType::Refresh))
        .unwrap();
    assert!(state.sync_state().is_processing());

    let state = state
        .with_sync_transition(SyncState::failed("connection reset"))
        .unwrap();
    assert!(state.sync_state().is_error());
    assert_eq!(state.sync_state().to_string(), "ERROR(connection reset)");

    // Retry must go back through IDLE
    let err = state
        .clone()
        .with_sync_transition(SyncState::Process(ProcessType::Refresh))
        .unwrap_err();
    assert_eq!(err.from, SyncState::failed("connection reset"));

    let state = state.with_sync_transition(SyncState::Idle).unwrap();
    assert_eq!(state, AppState::default());
}

#[test]
fn create_flow_with_injected_sources() {
    let factory = TaskFactory::new(FixedClock(1_000), SequentialIds::new("task-"));

    let state = AppState::default()
        .with_sync_transition(SyncState::Process(ProcessType::Create))
        .unwrap()
        .with_task_added(factory.create_with("Write report", "Q3 numbers"))
        .with_sync_transition(SyncState::Idle)
        .unwrap();

    let task = state.task("task-1").unwrap();
    assert_eq!(task.title(), "Write report");
    assert_eq!(task.last_update(), 1_000);
}

#[test]
fn snapshot_json_shape() {
    let state = AppState::new(
        vec![buy_milk(), Task::new("t2", 200).with_completed(true)],
        FilterType::Complete,
        SyncState::Process(ProcessType::Update),
    );

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "tasks": [
                {
                    "id": "t1",
                    "lastUpdate": 100,
                    "title": "Buy milk",
                    "description": "",
                    "completed": false
                },
                {
                    "id": "t2",
                    "lastUpdate": 200,
                    "title": "New Task",
                    "description": "",
                    "completed": true
                }
            ],
            "filter": "COMPLETE",
            "syncState": { "PROCESS": "UPDATE" }
        })
    );

    let back: AppState = serde_json::from_value(json).unwrap();
    assert_eq!(back, state);
}

#[test]
fn error_snapshot_reads_back_equal() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let state = AppState::default()
        .with_sync_state(SyncState::Error(SyncFailure::new(io)));

    let text = serde_json::to_string(&state).unwrap();
    assert!(text.contains(r#""syncState":{"ERROR":"refused"}"#));

    let back: AppState = serde_json::from_str(&text).unwrap();
    assert_eq!(back, state);
}

#[test]
fn idle_snapshot_uses_literal() {
    let text = serde_json::to_string(&AppState::default()).unwrap();
    assert_eq!(text, r#"{"tasks":[],"filter":"ANY","syncState":"IDLE"}"#);
}
