use std::sync::Once;

use chrono::{Duration, TimeZone, Utc};
use dashboard_core::{
    update, AnalysisRecord, AnalysisStatus, AppState, BulkAction, Effect, Msg,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

fn record(id: u64) -> AnalysisRecord {
    let stamp = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap() + Duration::seconds(id as i64);
    AnalysisRecord {
        id,
        url: format!("https://site-{id}.com"),
        status: AnalysisStatus::Done,
        page_title: None,
        html_version: None,
        headings_count: None,
        internal_links_count: None,
        external_links_count: None,
        inaccessible_links_count: None,
        has_login_form: None,
        created_at: stamp,
        updated_at: stamp,
    }
}

fn with_selected(ids: &[u64]) -> AppState {
    let records = vec![record(3), record(4), record(5)];
    let (state, _effects) = update(AppState::new(), Msg::PollTick);
    let (mut state, _effects) = update(
        state,
        Msg::RecordsFetched {
            records,
            warning: None,
        },
    );
    for id in ids {
        let (next, _effects) = update(state, Msg::SelectionToggled(*id));
        state = next;
    }
    state
}

#[test]
fn declined_confirmation_makes_no_call_and_keeps_everything() {
    init_logging();
    let state = with_selected(&[3, 4]);

    let (state, effects) = update(state, Msg::DeleteSelectedRequested { confirmed: false });

    assert!(effects.is_empty());
    assert_eq!(state.selected_ids(), vec![3, 4]);
    assert!(!state.is_busy());
}

#[test]
fn confirmed_delete_emits_one_effect_and_sets_busy() {
    init_logging();
    let state = with_selected(&[3, 4]);

    let (state, effects) = update(state, Msg::DeleteSelectedRequested { confirmed: true });

    assert_eq!(effects, vec![Effect::DeleteRecords { ids: vec![3, 4] }]);
    assert!(state.is_busy());
}

#[test]
fn second_bulk_action_while_busy_is_a_noop() {
    init_logging();
    let state = with_selected(&[3]);
    let (state, _effects) = update(state, Msg::DeleteSelectedRequested { confirmed: true });

    // The busy flag is shared between both bulk actions.
    let (state, effects) = update(state, Msg::RerunSelectedRequested);
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::DeleteSelectedRequested { confirmed: true });
    assert!(effects.is_empty());
    assert!(state.is_busy());
}

#[test]
fn empty_selection_never_reaches_the_client() {
    init_logging();
    let state = with_selected(&[]);

    let (state, effects) = update(state, Msg::DeleteSelectedRequested { confirmed: true });
    assert!(effects.is_empty());
    assert!(!state.is_busy());

    let (state, effects) = update(state, Msg::RerunSelectedRequested);
    assert!(effects.is_empty());
    assert!(!state.is_busy());
}

#[test]
fn successful_delete_clears_selection_and_refreshes_now() {
    init_logging();
    let state = with_selected(&[3, 5]);
    let (state, _effects) = update(state, Msg::DeleteSelectedRequested { confirmed: true });

    let (state, effects) = update(
        state,
        Msg::BulkActionFinished {
            action: BulkAction::Delete,
            outcome: Ok(()),
        },
    );

    assert!(!state.is_busy());
    assert!(state.selected_ids().is_empty());
    assert_eq!(effects, vec![Effect::FetchRecords]);
}

#[test]
fn failed_delete_keeps_selection_and_allows_retry() {
    init_logging();
    let state = with_selected(&[3, 5]);
    let (state, _effects) = update(state, Msg::DeleteSelectedRequested { confirmed: true });

    let (state, effects) = update(
        state,
        Msg::BulkActionFinished {
            action: BulkAction::Delete,
            outcome: Err("http status 500".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.is_busy());
    assert_eq!(state.selected_ids(), vec![3, 5]);
    let warning = state.view().last_warning.expect("warning surfaced");
    assert!(warning.contains("delete"));

    // Retry goes through.
    let (_state, effects) = update(state, Msg::DeleteSelectedRequested { confirmed: true });
    assert_eq!(effects, vec![Effect::DeleteRecords { ids: vec![3, 5] }]);
}

#[test]
fn rerun_needs_no_confirmation_and_refreshes_on_success() {
    init_logging();
    let state = with_selected(&[4]);

    let (state, effects) = update(state, Msg::RerunSelectedRequested);
    assert_eq!(effects, vec![Effect::RerunRecords { ids: vec![4] }]);
    assert!(state.is_busy());

    let (state, effects) = update(
        state,
        Msg::BulkActionFinished {
            action: BulkAction::Rerun,
            outcome: Ok(()),
        },
    );
    assert!(!state.is_busy());
    assert!(state.selected_ids().is_empty());
    assert_eq!(effects, vec![Effect::FetchRecords]);
}

#[test]
fn bulk_refresh_coalesces_with_an_inflight_poll() {
    init_logging();
    let state = with_selected(&[3]);
    let (state, _effects) = update(state, Msg::DeleteSelectedRequested { confirmed: true });

    // A timer tick starts a fetch while the delete is in flight.
    let (state, effects) = update(state, Msg::PollTick);
    assert_eq!(effects, vec![Effect::FetchRecords]);

    // The delete completes before the fetch does: its refresh is deferred,
    // not issued concurrently.
    let (state, effects) = update(
        state,
        Msg::BulkActionFinished {
            action: BulkAction::Delete,
            outcome: Ok(()),
        },
    );
    assert!(effects.is_empty());

    // The deferred refresh fires when the in-flight fetch settles.
    let (_state, effects) = update(
        state,
        Msg::RecordsFetched {
            records: Vec::new(),
            warning: None,
        },
    );
    assert_eq!(effects, vec![Effect::FetchRecords]);
}
