//! Terminal shell: wires the pure core update loop to the client thread,
//! the poll timer, and a line-oriented command interface.
mod app;
mod commands;
mod effects;
mod logging;
mod render;

pub use app::run_app;
