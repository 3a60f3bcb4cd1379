use std::cmp::Ordering;
use std::str::FromStr;

use crate::{AnalysisRecord, AnalysisStatus, RecordId};

/// Fixed number of rows per page.
pub const PAGE_SIZE: usize = 10;

/// Sortable columns of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Url,
    PageTitle,
    Status,
    HtmlVersion,
    InternalLinks,
    ExternalLinks,
    CreatedAt,
    UpdatedAt,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url" => Ok(SortKey::Url),
            "title" => Ok(SortKey::PageTitle),
            "status" => Ok(SortKey::Status),
            "html" => Ok(SortKey::HtmlVersion),
            "internal" => Ok(SortKey::InternalLinks),
            "external" => Ok(SortKey::ExternalLinks),
            "created" => Ok(SortKey::CreatedAt),
            "updated" => Ok(SortKey::UpdatedAt),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Natural ordering of two records under one sort key: lexicographic for
/// strings, numeric for counts, chronological for timestamps. Absent optional
/// values order before present ones.
pub fn compare_records(a: &AnalysisRecord, b: &AnalysisRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Url => a.url.cmp(&b.url),
        SortKey::PageTitle => a.page_title.cmp(&b.page_title),
        SortKey::Status => a.status.cmp(&b.status),
        SortKey::HtmlVersion => a.html_version.cmp(&b.html_version),
        SortKey::InternalLinks => a.internal_links_count.cmp(&b.internal_links_count),
        SortKey::ExternalLinks => a.external_links_count.cmp(&b.external_links_count),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

/// Keeps records whose `url` or `pageTitle` contains `term`,
/// case-insensitively. An empty term passes everything.
pub fn filter_records<'a>(records: &'a [AnalysisRecord], term: &str) -> Vec<&'a AnalysisRecord> {
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record.url.to_lowercase().contains(&needle)
                || record
                    .page_title
                    .as_deref()
                    .is_some_and(|title| title.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable sort in place; ties keep their original relative order.
pub fn sort_records(rows: &mut [&AnalysisRecord], key: SortKey, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = compare_records(a, b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Total page count for `row_count` filtered rows; never less than one.
pub fn total_pages(row_count: usize) -> usize {
    row_count.div_ceil(PAGE_SIZE).max(1)
}

/// The visible slice for a 1-based `page`. The caller clamps the page to
/// `[1, total_pages]` before slicing.
pub fn page_slice<'a, 'r>(rows: &'a [&'r AnalysisRecord], page: usize) -> &'a [&'r AnalysisRecord] {
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(rows.len());
    if start >= rows.len() {
        &[]
    } else {
        &rows[start..end]
    }
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRowView {
    pub record: AnalysisRecord,
    pub selected: bool,
}

/// Input pair for the chart collaborator: it consumes two integers and
/// produces a figure, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinksChartInput {
    pub internal: u64,
    pub external: u64,
}

/// Read-only projection of a single record for the detail surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub record: AnalysisRecord,
    pub headings_summary: String,
    pub links_chart: LinksChartInput,
}

impl DetailView {
    pub fn for_record(record: &AnalysisRecord) -> Self {
        Self {
            record: record.clone(),
            headings_summary: record
                .headings_count
                .map(|headings| headings.summary())
                .unwrap_or_else(|| "N/A".to_string()),
            links_chart: LinksChartInput {
                internal: record.internal_links_count.unwrap_or(0),
                external: record.external_links_count.unwrap_or(0),
            },
        }
    }
}

/// Owned snapshot of everything the UI needs for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardViewModel {
    pub rows: Vec<RecordRowView>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Number of rows that survive the filter, across all pages.
    pub total_matching: usize,
    pub search_term: String,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    /// Checked state of the header checkbox: every visible row is selected.
    /// Derived, never stored.
    pub all_visible_selected: bool,
    pub selected_count: usize,
    pub busy: bool,
    pub fetching: bool,
    pub input: String,
    pub input_error: Option<String>,
    pub last_warning: Option<String>,
    pub detail: Option<DetailView>,
    pub dirty: bool,
}

impl DashboardViewModel {
    /// Ids of the rows on the visible page.
    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.rows.iter().map(|row| row.record.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    // Keep the enum order in one place so a reordering shows up here.
    const STATUS_ORDER: [AnalysisStatus; 4] = [
        AnalysisStatus::Queued,
        AnalysisStatus::Running,
        AnalysisStatus::Done,
        AnalysisStatus::Error,
    ];

    fn record(id: RecordId, url: &str, title: Option<&str>) -> AnalysisRecord {
        AnalysisRecord {
            id,
            url: url.to_string(),
            status: AnalysisStatus::Done,
            page_title: title.map(str::to_string),
            html_version: None,
            headings_count: None,
            internal_links_count: None,
            external_links_count: None,
            inaccessible_links_count: None,
            has_login_form: None,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, id as u32 % 60).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, id as u32 % 60).unwrap(),
        }
    }

    #[test]
    fn filter_matches_url_or_title_case_insensitively() {
        let records = vec![
            record(1, "https://example.com", Some("Example Domain")),
            record(2, "https://other.net", Some("Something Else")),
            record(3, "https://EXAMPLE.org", None),
        ];

        let matched = filter_records(&records, "example");
        let ids: Vec<_> = matched.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);

        // Every surviving record really contains the term.
        for row in &matched {
            let in_url = row.url.to_lowercase().contains("example");
            let in_title = row
                .page_title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains("example"));
            assert!(in_url || in_title);
        }
    }

    #[test]
    fn filter_is_idempotent_for_fixed_term() {
        let records = vec![
            record(1, "https://example.com", None),
            record(2, "https://other.net", None),
        ];
        let once: Vec<AnalysisRecord> = filter_records(&records, "example")
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<AnalysisRecord> = filter_records(&once, "example")
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_term_passes_everything() {
        let records = vec![record(1, "https://a.com", None), record(2, "https://b.com", None)];
        assert_eq!(filter_records(&records, "").len(), 2);
    }

    #[test]
    fn sort_is_stable_and_reversal_flips_distinct_keys() {
        // Two records share a URL; their relative order must survive sorting
        // in either direction.
        let records = vec![
            record(1, "https://b.com", None),
            record(2, "https://a.com", None),
            record(3, "https://b.com", None),
        ];

        let mut ascending: Vec<&AnalysisRecord> = records.iter().collect();
        sort_records(&mut ascending, SortKey::Url, SortDirection::Ascending);
        let asc_ids: Vec<_> = ascending.iter().map(|r| r.id).collect();
        assert_eq!(asc_ids, vec![2, 1, 3]);

        // Applying the same sort again yields the same order.
        sort_records(&mut ascending, SortKey::Url, SortDirection::Ascending);
        let again: Vec<_> = ascending.iter().map(|r| r.id).collect();
        assert_eq!(asc_ids, again);

        let mut descending: Vec<&AnalysisRecord> = records.iter().collect();
        sort_records(&mut descending, SortKey::Url, SortDirection::Descending);
        let desc_ids: Vec<_> = descending.iter().map(|r| r.id).collect();
        // Distinct keys reverse, equal keys keep original relative order.
        assert_eq!(desc_ids, vec![1, 3, 2]);
    }

    #[test]
    fn absent_optional_values_sort_before_present_ones() {
        let records = vec![
            record(1, "https://a.com", Some("Titled")),
            record(2, "https://b.com", None),
        ];
        let mut rows: Vec<&AnalysisRecord> = records.iter().collect();
        sort_records(&mut rows, SortKey::PageTitle, SortDirection::Ascending);
        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn status_natural_order_follows_lifecycle() {
        for pair in STATUS_ORDER.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn pagination_partitions_the_filtered_set() {
        let records: Vec<AnalysisRecord> = (1..=23)
            .map(|id| record(id, &format!("https://site-{id}.com"), None))
            .collect();
        let rows: Vec<&AnalysisRecord> = records.iter().collect();

        let pages = total_pages(rows.len());
        assert_eq!(pages, 3);

        let mut seen = 0;
        for page in 1..=pages {
            let slice = page_slice(&rows, page);
            assert!(slice.len() <= PAGE_SIZE);
            seen += slice.len();
        }
        assert_eq!(seen, rows.len());
        // Last page is the short one.
        assert_eq!(page_slice(&rows, pages).len(), 3);
    }

    #[test]
    fn total_pages_is_at_least_one() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let records = vec![record(1, "https://a.com", None)];
        let rows: Vec<&AnalysisRecord> = records.iter().collect();
        assert!(page_slice(&rows, 5).is_empty());
    }
}
