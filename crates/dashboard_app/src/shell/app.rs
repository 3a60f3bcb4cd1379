use std::io::{self, Write};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use dashboard_client::{ClientHandle, ClientSettings, ReqwestJobClient};
use dashboard_core::{update, AppState, Msg};
use dashboard_logging::{dash_info, dash_warn};

use super::commands::{self, Command};
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::render;

/// Interval of the background refresh timer.
const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Everything the main event loop reacts to. Core messages come from the
/// poll timer, the command reader, and the client event pump; the other two
/// variants are shell-local.
pub enum ShellEvent {
    Msg(Msg),
    ShowRequested,
    QuitRequested,
}

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let settings = ClientSettings::from_env();
    dash_info!("dashboard starting; api base {}", settings.base_url);

    let client = Arc::new(ReqwestJobClient::new(settings)?);
    let (handle, client_events) = ClientHandle::spawn(client);

    let (event_tx, event_rx) = mpsc::channel::<ShellEvent>();
    let runner = EffectRunner::new(handle, client_events, event_tx.clone());
    spawn_poll_timer(event_tx.clone());
    spawn_command_reader(event_tx);

    println!("URL analysis dashboard — type 'help' for commands.");

    let mut state = AppState::new();
    let mut poll_tick: u64 = 0;
    let mut shown_warning: Option<String> = None;

    while let Ok(event) = event_rx.recv() {
        let msg = match event {
            ShellEvent::Msg(msg) => msg,
            ShellEvent::ShowRequested => {
                render::render_table(&state.view());
                continue;
            }
            ShellEvent::QuitRequested => break,
        };

        if matches!(msg, Msg::PollTick) {
            poll_tick += 1;
            dashboard_logging::set_poll_tick(poll_tick);
        }

        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.run(effects);

        if state.consume_dirty() {
            let view = state.view();
            if view.last_warning != shown_warning {
                if let Some(warning) = &view.last_warning {
                    dash_warn!("{warning}");
                    eprintln!("warning: {warning}");
                }
                shown_warning = view.last_warning.clone();
            }
            render::render_status(&view);
        }
    }

    dash_info!("dashboard shutting down after {poll_tick} poll tick(s)");
    Ok(())
}

/// Issues a poll tick immediately and then every `POLL_INTERVAL`. The thread
/// exits once the event loop hangs up; an in-flight fetch just gets its
/// completion dropped with the channel.
fn spawn_poll_timer(event_tx: mpsc::Sender<ShellEvent>) {
    thread::spawn(move || {
        while event_tx.send(ShellEvent::Msg(Msg::PollTick)).is_ok() {
            thread::sleep(POLL_INTERVAL);
        }
    });
}

fn spawn_command_reader(event_tx: mpsc::Sender<ShellEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            if line.trim().is_empty() {
                continue;
            }
            match commands::parse(&line) {
                Ok(command) => {
                    let quitting = matches!(command, Command::Quit);
                    for event in command_events(command) {
                        if event_tx.send(event).is_err() {
                            return;
                        }
                    }
                    if quitting {
                        return;
                    }
                }
                Err(reason) => eprintln!("{reason}"),
            }
        }
        // stdin closed; shut the loop down.
        let _ = event_tx.send(ShellEvent::QuitRequested);
    });
}

fn command_events(command: Command) -> Vec<ShellEvent> {
    match command {
        Command::Add(url) => vec![
            ShellEvent::Msg(Msg::InputChanged(url)),
            ShellEvent::Msg(Msg::SubmitClicked),
        ],
        Command::Search(term) => vec![ShellEvent::Msg(Msg::SearchChanged(term))],
        Command::Sort(key) => vec![ShellEvent::Msg(Msg::SortRequested(key))],
        Command::Next => vec![ShellEvent::Msg(Msg::NextPageClicked)],
        Command::Prev => vec![ShellEvent::Msg(Msg::PrevPageClicked)],
        Command::Select(id) => vec![ShellEvent::Msg(Msg::SelectionToggled(id))],
        Command::SelectPage => vec![ShellEvent::Msg(Msg::SelectAllVisible)],
        Command::Clear => vec![ShellEvent::Msg(Msg::ClearSelection)],
        Command::Delete => {
            // Confirmation happens here, before anything reaches the core;
            // a declined prompt still flows through as `confirmed: false`.
            let confirmed = confirm("Delete the selected records? [y/N] ");
            vec![ShellEvent::Msg(Msg::DeleteSelectedRequested { confirmed })]
        }
        Command::Rerun => vec![ShellEvent::Msg(Msg::RerunSelectedRequested)],
        Command::Open(id) => vec![ShellEvent::Msg(Msg::RecordOpened(id))],
        Command::Close => vec![ShellEvent::Msg(Msg::DetailDismissed)],
        Command::Refresh => vec![ShellEvent::Msg(Msg::PollTick)],
        Command::Show => vec![ShellEvent::ShowRequested],
        Command::Help => {
            println!("{}", commands::HELP);
            Vec::new()
        }
        Command::Quit => vec![ShellEvent::QuitRequested],
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}
