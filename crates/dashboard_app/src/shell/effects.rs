use std::sync::mpsc;
use std::thread;

use dashboard_client::{ClientCommand, ClientEvent, ClientHandle};
use dashboard_core::{BulkAction, Effect, Msg};
use dashboard_logging::dash_info;

use super::app::ShellEvent;

/// Executes the effects the core requests and pumps the client's completion
/// events back into the main loop as messages.
pub struct EffectRunner {
    handle: ClientHandle,
}

impl EffectRunner {
    /// Starts the pump thread that translates `ClientEvent`s into core
    /// messages. The thread exits when either channel side hangs up.
    pub fn new(
        handle: ClientHandle,
        client_events: mpsc::Receiver<ClientEvent>,
        event_tx: mpsc::Sender<ShellEvent>,
    ) -> Self {
        thread::spawn(move || {
            while let Ok(event) = client_events.recv() {
                let msg = msg_for_event(event);
                if event_tx.send(ShellEvent::Msg(msg)).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchRecords => {
                    dash_info!("fetching analysis results");
                    self.handle.send(ClientCommand::FetchAll);
                }
                Effect::CreateRecord { url } => {
                    dash_info!("submitting {url} for analysis");
                    self.handle.send(ClientCommand::Create { url });
                }
                Effect::DeleteRecords { ids } => {
                    dash_info!("deleting {} record(s)", ids.len());
                    self.handle.send(ClientCommand::DeleteMany { ids });
                }
                Effect::RerunRecords { ids } => {
                    dash_info!("re-running analysis for {} record(s)", ids.len());
                    self.handle.send(ClientCommand::RerunMany { ids });
                }
            }
        }
    }
}

/// A failed fetch becomes an empty dataset plus a warning; the polling loop
/// itself never observes an error. The other completions carry their error
/// text through to the matching `Finished` message.
fn msg_for_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::Fetched(Ok(records)) => Msg::RecordsFetched {
            records,
            warning: None,
        },
        ClientEvent::Fetched(Err(err)) => Msg::RecordsFetched {
            records: Vec::new(),
            warning: Some(format!("failed to fetch analysis results: {err}")),
        },
        ClientEvent::Created(outcome) => Msg::CreateFinished {
            outcome: outcome.map(|job| job.id).map_err(|err| err.to_string()),
        },
        ClientEvent::Deleted(outcome) => Msg::BulkActionFinished {
            action: BulkAction::Delete,
            outcome: outcome.map_err(|err| err.to_string()),
        },
        ClientEvent::RerunsFinished(outcome) => Msg::BulkActionFinished {
            action: BulkAction::Rerun,
            outcome: outcome.map_err(|err| err.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use dashboard_client::ApiError;

    use super::*;

    #[test]
    fn fetch_failure_becomes_empty_dataset_with_warning() {
        let msg = msg_for_event(ClientEvent::Fetched(Err(ApiError::Timeout)));
        match msg {
            Msg::RecordsFetched { records, warning } => {
                assert!(records.is_empty());
                assert!(warning.is_some());
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn create_completion_carries_the_new_id() {
        let job = dashboard_client::CreatedJob {
            id: 42,
            status: dashboard_core::AnalysisStatus::Queued,
        };
        let msg = msg_for_event(ClientEvent::Created(Ok(job)));
        assert_eq!(msg, Msg::CreateFinished { outcome: Ok(42) });
    }

    #[test]
    fn bulk_completions_name_their_action() {
        let deleted = msg_for_event(ClientEvent::Deleted(Ok(())));
        assert_eq!(
            deleted,
            Msg::BulkActionFinished {
                action: BulkAction::Delete,
                outcome: Ok(()),
            }
        );
        let rerun = msg_for_event(ClientEvent::RerunsFinished(Err(ApiError::Status { code: 502 })));
        match rerun {
            Msg::BulkActionFinished {
                action: BulkAction::Rerun,
                outcome: Err(_),
            } => {}
            other => panic!("unexpected message {other:?}"),
        }
    }
}
