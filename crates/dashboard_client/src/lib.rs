//! Dashboard client: typed REST boundary to the analysis backend.
mod client;
mod error;
mod handle;
mod settings;

pub use client::{CreatedJob, JobClient, ReqwestJobClient};
pub use error::ApiError;
pub use handle::{ClientCommand, ClientEvent, ClientHandle};
pub use settings::{ClientSettings, DEFAULT_BASE_URL};
