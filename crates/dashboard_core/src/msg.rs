use crate::view::SortKey;
use crate::{AnalysisRecord, RecordId};

/// Which bulk operation a completion message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Delete,
    Rerun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Timer-driven or manual ("refresh now") poll trigger.
    PollTick,
    /// A list fetch settled. On transport failure the records are empty and
    /// the warning carries the reason; the polling loop never sees an error.
    RecordsFetched {
        records: Vec<AnalysisRecord>,
        warning: Option<String>,
    },
    /// User edited the URL submission input.
    InputChanged(String),
    /// User submitted the current input for analysis.
    SubmitClicked,
    /// The create request settled; `Ok` carries the new record's id.
    CreateFinished { outcome: Result<RecordId, String> },
    /// User edited the search box.
    SearchChanged(String),
    /// User clicked a column header.
    SortRequested(SortKey),
    NextPageClicked,
    PrevPageClicked,
    /// User toggled one row's checkbox.
    SelectionToggled(RecordId),
    /// User checked the header checkbox: selects the visible page only.
    SelectAllVisible,
    /// User cleared the selection.
    ClearSelection,
    /// User asked to delete the selection; `confirmed` is the answer to the
    /// confirmation prompt the shell showed beforehand.
    DeleteSelectedRequested { confirmed: bool },
    /// User asked to re-run the selection. Non-destructive, no confirmation.
    RerunSelectedRequested,
    /// A bulk action settled.
    BulkActionFinished {
        action: BulkAction,
        outcome: Result<(), String>,
    },
    /// User opened a row's detail view.
    RecordOpened(RecordId),
    /// Explicit dismiss of the detail view.
    DetailDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
