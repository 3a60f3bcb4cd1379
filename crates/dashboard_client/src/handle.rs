use std::sync::{mpsc, Arc};
use std::thread;

use dashboard_core::{AnalysisRecord, RecordId};
use dashboard_logging::dash_debug;

use crate::client::{CreatedJob, JobClient};
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    FetchAll,
    Create { url: String },
    DeleteMany { ids: Vec<RecordId> },
    RerunMany { ids: Vec<RecordId> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Fetched(Result<Vec<AnalysisRecord>, ApiError>),
    Created(Result<CreatedJob, ApiError>),
    Deleted(Result<(), ApiError>),
    RerunsFinished(Result<(), ApiError>),
}

/// Sender half of the client thread. The thread owns a tokio runtime and
/// executes one task per command, so a slow fetch never blocks a bulk action
/// or vice versa.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    /// Spawns the client thread and returns the handle plus the event
    /// receiver. The thread exits when the handle (and its clones) drop.
    pub fn spawn(client: Arc<dyn JobClient>) -> (Self, mpsc::Receiver<ClientEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>();
        let (event_tx, event_rx) = mpsc::channel::<ClientEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn send(&self, command: ClientCommand) {
        dash_debug!("client command: {command:?}");
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(
    client: &dyn JobClient,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    let event = match command {
        ClientCommand::FetchAll => ClientEvent::Fetched(client.list().await),
        ClientCommand::Create { url } => ClientEvent::Created(client.create(&url).await),
        ClientCommand::DeleteMany { ids } => ClientEvent::Deleted(client.delete_many(&ids).await),
        ClientCommand::RerunMany { ids } => {
            ClientEvent::RerunsFinished(client.rerun_many(&ids).await)
        }
    };
    let _ = event_tx.send(event);
}
