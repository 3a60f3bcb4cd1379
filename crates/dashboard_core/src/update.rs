use url::Url;

use crate::{AppState, BulkAction, Effect, FetchPhase, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PollTick => request_refresh(&mut state),
        Msg::RecordsFetched { records, warning } => {
            // Idle is forced on every response so the next tick can always
            // start a fetch, even after a failure.
            state.finish_fetch();
            let duplicates = state.replace_records(records);
            if duplicates > 0 {
                state.set_warning(format!(
                    "server response repeated {duplicates} record id(s); kept the later occurrence"
                ));
            }
            if let Some(warning) = warning {
                state.set_warning(warning);
            }
            if state.refresh_pending() {
                state.set_refresh_pending(false);
                state.begin_fetch();
                vec![Effect::FetchRecords]
            } else {
                Vec::new()
            }
        }
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.is_submitting() {
                return (state, Vec::new());
            }
            let input = state.input().trim().to_string();
            match validate_submission(&input) {
                Ok(url) => {
                    state.set_input_error(None);
                    state.set_submitting(true);
                    vec![Effect::CreateRecord { url }]
                }
                Err(reason) => {
                    state.set_input_error(Some(reason));
                    Vec::new()
                }
            }
        }
        Msg::CreateFinished { outcome } => {
            state.set_submitting(false);
            match outcome {
                Ok(_id) => {
                    state.clear_input();
                    request_refresh(&mut state)
                }
                Err(reason) => {
                    // Input stays so the user can retry.
                    state.set_warning(format!("failed to submit URL: {reason}"));
                    Vec::new()
                }
            }
        }
        Msg::SearchChanged(term) => {
            state.set_search(term);
            Vec::new()
        }
        Msg::SortRequested(key) => {
            state.request_sort(key);
            Vec::new()
        }
        Msg::NextPageClicked => {
            state.change_page(1);
            Vec::new()
        }
        Msg::PrevPageClicked => {
            state.change_page(-1);
            Vec::new()
        }
        Msg::SelectionToggled(id) => {
            state.toggle_selected(id);
            Vec::new()
        }
        Msg::SelectAllVisible => {
            state.select_visible();
            Vec::new()
        }
        Msg::ClearSelection => {
            state.clear_selection();
            Vec::new()
        }
        Msg::DeleteSelectedRequested { confirmed } => {
            if !confirmed || state.is_busy() {
                return (state, Vec::new());
            }
            let ids = state.selected_ids();
            if ids.is_empty() {
                Vec::new()
            } else {
                state.set_busy(true);
                vec![Effect::DeleteRecords { ids }]
            }
        }
        Msg::RerunSelectedRequested => {
            if state.is_busy() {
                return (state, Vec::new());
            }
            let ids = state.selected_ids();
            if ids.is_empty() {
                Vec::new()
            } else {
                state.set_busy(true);
                vec![Effect::RerunRecords { ids }]
            }
        }
        Msg::BulkActionFinished { action, outcome } => {
            // busy clears on either outcome so the user may retry.
            state.set_busy(false);
            match outcome {
                Ok(()) => {
                    state.clear_selection();
                    // Bound staleness after a mutation to the action's own
                    // round trip instead of waiting for the next timer tick.
                    request_refresh(&mut state)
                }
                Err(reason) => {
                    let label = match action {
                        BulkAction::Delete => "delete selected records",
                        BulkAction::Rerun => "re-run analysis",
                    };
                    state.set_warning(format!("failed to {label}: {reason}"));
                    Vec::new()
                }
            }
        }
        Msg::RecordOpened(id) => {
            state.open_detail(id);
            Vec::new()
        }
        Msg::DetailDismissed => {
            state.close_detail();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Refresh-now semantics shared by the poll tick, create completion, and bulk
/// completion paths: start a fetch when idle, otherwise coalesce into a
/// pending refresh that fires as soon as the in-flight fetch settles.
fn request_refresh(state: &mut AppState) -> Vec<Effect> {
    match state.fetch_phase() {
        FetchPhase::Idle => {
            state.begin_fetch();
            vec![Effect::FetchRecords]
        }
        FetchPhase::Fetching => {
            state.set_refresh_pending(true);
            Vec::new()
        }
    }
}

fn validate_submission(input: &str) -> Result<String, String> {
    if input.is_empty() {
        return Err("Please enter a URL".to_string());
    }
    match Url::parse(input) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(input.to_string()),
        Ok(parsed) => Err(format!(
            "unsupported scheme '{}'; use http or https",
            parsed.scheme()
        )),
        Err(_) => Err("Please enter a valid URL (e.g., https://example.com)".to_string()),
    }
}
