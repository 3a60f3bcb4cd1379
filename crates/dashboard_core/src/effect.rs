use crate::RecordId;

/// I/O requested by `update`, executed by the shell's effect runner. Results
/// re-enter the loop as messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the full dataset from the remote service.
    FetchRecords,
    /// Submit one URL for analysis.
    CreateRecord { url: String },
    /// Bulk delete by id.
    DeleteRecords { ids: Vec<RecordId> },
    /// Trigger re-analysis per id.
    RerunRecords { ids: Vec<RecordId> },
}
