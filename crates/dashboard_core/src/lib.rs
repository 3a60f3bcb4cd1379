//! Dashboard core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod record;
mod selection;
mod state;
mod update;
mod view;

pub use effect::Effect;
pub use msg::{BulkAction, Msg};
pub use record::{AnalysisRecord, AnalysisStatus, HeadingsCount, RecordId};
pub use selection::SelectionSet;
pub use state::{AppState, FetchPhase, ViewState};
pub use update::update;
pub use view::{
    compare_records, filter_records, page_slice, sort_records, total_pages, DashboardViewModel,
    DetailView, LinksChartInput, RecordRowView, SortDirection, SortKey, PAGE_SIZE,
};
