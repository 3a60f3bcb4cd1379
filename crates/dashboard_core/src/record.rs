use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned identity of an analysis record. Stable for the record's
/// lifetime; the primary key for selection and de-duplication.
pub type RecordId = u64;

/// Lifecycle of a server-side analysis job. Transitions happen on the server
/// only; the client observes snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Queued,
    Running,
    Done,
    Error,
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisStatus::Queued => write!(f, "queued"),
            AnalysisStatus::Running => write!(f, "running"),
            AnalysisStatus::Done => write!(f, "done"),
            AnalysisStatus::Error => write!(f, "error"),
        }
    }
}

/// Occurrence counts per heading level, populated once analysis completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadingsCount {
    #[serde(default)]
    pub h1: u32,
    #[serde(default)]
    pub h2: u32,
    #[serde(default)]
    pub h3: u32,
    #[serde(default)]
    pub h4: u32,
    #[serde(default)]
    pub h5: u32,
    #[serde(default)]
    pub h6: u32,
}

impl HeadingsCount {
    /// Human-readable summary of the non-zero levels, e.g. `H1: 1, H2: 4`.
    pub fn summary(&self) -> String {
        let levels = [
            ("H1", self.h1),
            ("H2", self.h2),
            ("H3", self.h3),
            ("H4", self.h4),
            ("H5", self.h5),
            ("H6", self.h6),
        ];
        let parts: Vec<String> = levels
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(tag, count)| format!("{tag}: {count}"))
            .collect();
        if parts.is_empty() {
            "N/A".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// One immutable snapshot of an analysis job as reported by the server.
///
/// The whole collection is replaced wholesale on every poll; nothing here is
/// ever mutated client-side. Optional fields are populated once the job
/// reaches `done`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: RecordId,
    pub url: String,
    pub status: AnalysisStatus,
    #[serde(default)]
    pub page_title: Option<String>,
    #[serde(default)]
    pub html_version: Option<String>,
    // The backend stores the headings map as a JSON column, hence the name.
    #[serde(default, rename = "headingsCountJson")]
    pub headings_count: Option<HeadingsCount>,
    #[serde(default)]
    pub internal_links_count: Option<u64>,
    #[serde(default)]
    pub external_links_count: Option<u64>,
    #[serde(default)]
    pub inaccessible_links_count: Option<u64>,
    #[serde(default)]
    pub has_login_form: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_backend_shape() {
        let json = r#"{
            "id": 3,
            "url": "https://example.com",
            "status": "done",
            "htmlVersion": "HTML5",
            "pageTitle": "Example Domain",
            "headingsCountJson": {"h1": 1, "h2": 4},
            "internalLinksCount": 12,
            "externalLinksCount": 5,
            "inaccessibleLinksCount": 0,
            "hasLoginForm": false,
            "createdAt": "2026-08-20T10:15:00Z",
            "updatedAt": "2026-08-20T10:15:42Z"
        }"#;

        let record: AnalysisRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 3);
        assert_eq!(record.status, AnalysisStatus::Done);
        assert_eq!(record.page_title.as_deref(), Some("Example Domain"));
        let headings = record.headings_count.unwrap();
        assert_eq!(headings.h1, 1);
        assert_eq!(headings.h2, 4);
        assert_eq!(headings.h3, 0);
        assert_eq!(record.internal_links_count, Some(12));
        assert!(record.created_at < record.updated_at);
    }

    #[test]
    fn record_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": 9,
            "url": "https://example.com/queued",
            "status": "queued",
            "createdAt": "2026-08-21T08:00:00Z",
            "updatedAt": "2026-08-21T08:00:00Z"
        }"#;

        let record: AnalysisRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, AnalysisStatus::Queued);
        assert_eq!(record.page_title, None);
        assert_eq!(record.headings_count, None);
        assert_eq!(record.has_login_form, None);
    }

    #[test]
    fn headings_summary_skips_zero_levels() {
        let headings = HeadingsCount {
            h1: 1,
            h3: 2,
            ..HeadingsCount::default()
        };
        assert_eq!(headings.summary(), "H1: 1, H3: 2");
        assert_eq!(HeadingsCount::default().summary(), "N/A");
    }
}
