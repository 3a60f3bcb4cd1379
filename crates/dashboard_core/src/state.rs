use std::collections::{hash_map::Entry, BTreeSet, HashMap};

use crate::selection::SelectionSet;
use crate::view::{
    filter_records, page_slice, sort_records, total_pages, DashboardViewModel, DetailView,
    RecordRowView, SortDirection, SortKey,
};
use crate::{AnalysisRecord, RecordId};

/// Polling controller phase: at most one list fetch is in flight at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Fetching,
}

/// Session-local table parameters. Survives poll ticks; never sent to the
/// server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    /// 1-based, clamped to `[1, total_pages]` on every derivation.
    pub current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort_key: SortKey::CreatedAt,
            sort_direction: SortDirection::Descending,
            current_page: 1,
        }
    }
}

/// The whole client-side state. Mutated only through `update`; readers get an
/// owned [`DashboardViewModel`] snapshot per render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    records: Vec<AnalysisRecord>,
    view_state: ViewState,
    selected: SelectionSet,
    fetch_phase: FetchPhase,
    /// A poll tick arrived while a fetch was in flight; honored as soon as
    /// the in-flight fetch settles.
    refresh_pending: bool,
    /// One bulk action (delete or re-run) in flight at a time.
    busy: bool,
    /// A create request is in flight; the submit control is disabled.
    submitting: bool,
    input: String,
    input_error: Option<String>,
    last_warning: Option<String>,
    detail_id: Option<RecordId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the full render snapshot: filter, stable sort, paginate, then
    /// project the visible slice with selection flags.
    pub fn view(&self) -> DashboardViewModel {
        let mut rows = filter_records(&self.records, &self.view_state.search_term);
        sort_records(
            &mut rows,
            self.view_state.sort_key,
            self.view_state.sort_direction,
        );
        let total_matching = rows.len();
        let pages = total_pages(total_matching);
        let page = self.view_state.current_page.clamp(1, pages);

        let row_views: Vec<RecordRowView> = page_slice(&rows, page)
            .iter()
            .map(|record| RecordRowView {
                record: (*record).clone(),
                selected: self.selected.is_selected(record.id),
            })
            .collect();
        let all_visible_selected = !row_views.is_empty() && row_views.iter().all(|row| row.selected);

        let detail = self
            .detail_id
            .and_then(|id| self.records.iter().find(|record| record.id == id))
            .map(DetailView::for_record);

        DashboardViewModel {
            rows: row_views,
            current_page: page,
            total_pages: pages,
            total_matching,
            search_term: self.view_state.search_term.clone(),
            sort_key: self.view_state.sort_key,
            sort_direction: self.view_state.sort_direction,
            all_visible_selected,
            selected_count: self.selected.len(),
            busy: self.busy,
            fetching: self.fetch_phase == FetchPhase::Fetching,
            input: self.input.clone(),
            input_error: self.input_error.clone(),
            last_warning: self.last_warning.clone(),
            detail,
            dirty: self.dirty,
        }
    }

    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.selected.ids()
    }

    pub fn fetch_phase(&self) -> FetchPhase {
        self.fetch_phase
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns whether a render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replaces the dataset wholesale and reconciles dependent state in the
    /// same transition: selection is intersected with the new id set, the
    /// page resets to 1, and a detail view on a vanished record closes.
    ///
    /// A repeated id is a backend contract violation; the later occurrence
    /// wins, kept at the first occurrence's position. Returns how many
    /// duplicates were coalesced so the caller can surface a warning.
    pub(crate) fn replace_records(&mut self, records: Vec<AnalysisRecord>) -> usize {
        let mut deduped: Vec<AnalysisRecord> = Vec::with_capacity(records.len());
        let mut index_by_id: HashMap<RecordId, usize> = HashMap::with_capacity(records.len());
        let mut duplicates = 0;
        for record in records {
            match index_by_id.entry(record.id) {
                Entry::Occupied(entry) => {
                    duplicates += 1;
                    deduped[*entry.get()] = record;
                }
                Entry::Vacant(entry) => {
                    entry.insert(deduped.len());
                    deduped.push(record);
                }
            }
        }
        self.records = deduped;

        let known: BTreeSet<RecordId> = self.records.iter().map(|record| record.id).collect();
        self.selected.reconcile(&known);
        self.view_state.current_page = 1;
        if self.detail_id.is_some_and(|id| !known.contains(&id)) {
            self.detail_id = None;
        }
        self.mark_dirty();
        duplicates
    }

    pub(crate) fn set_search(&mut self, term: String) {
        if self.view_state.search_term == term {
            return;
        }
        self.view_state.search_term = term;
        self.view_state.current_page = 1;
        self.mark_dirty();
    }

    /// Click on a column header: a new key sorts ascending, the active key
    /// flips direction. The page is deliberately left alone.
    pub(crate) fn request_sort(&mut self, key: SortKey) {
        if self.view_state.sort_key == key {
            self.view_state.sort_direction = self.view_state.sort_direction.flipped();
        } else {
            self.view_state.sort_key = key;
            self.view_state.sort_direction = SortDirection::Ascending;
        }
        self.mark_dirty();
    }

    pub(crate) fn change_page(&mut self, delta: i64) {
        let filtered = filter_records(&self.records, &self.view_state.search_term);
        let pages = total_pages(filtered.len());
        let current = self.view_state.current_page.clamp(1, pages) as i64;
        let next = (current + delta).clamp(1, pages as i64) as usize;
        if next != self.view_state.current_page {
            self.view_state.current_page = next;
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_selected(&mut self, id: RecordId) {
        // Only ids the server reported can ever enter the selection.
        if !self.records.iter().any(|record| record.id == id) {
            return;
        }
        self.selected.toggle(id);
        self.mark_dirty();
    }

    /// Selects the rows of the visible page only; other pages are untouched.
    pub(crate) fn select_visible(&mut self) {
        let ids = self.visible_ids();
        if ids.is_empty() {
            return;
        }
        self.selected.select_all_visible(ids);
        self.mark_dirty();
    }

    pub(crate) fn clear_selection(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.selected.clear_all();
        self.mark_dirty();
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.fetch_phase = FetchPhase::Fetching;
        self.mark_dirty();
    }

    /// Forced on every response, success or failure, to guarantee liveness.
    pub(crate) fn finish_fetch(&mut self) {
        self.fetch_phase = FetchPhase::Idle;
        self.mark_dirty();
    }

    pub(crate) fn refresh_pending(&self) -> bool {
        self.refresh_pending
    }

    pub(crate) fn set_refresh_pending(&mut self, pending: bool) {
        self.refresh_pending = pending;
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.mark_dirty();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
        self.mark_dirty();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn set_input(&mut self, input: String) {
        self.input = input;
        self.mark_dirty();
    }

    pub(crate) fn clear_input(&mut self) {
        self.input.clear();
        self.input_error = None;
        self.mark_dirty();
    }

    pub(crate) fn set_input_error(&mut self, error: Option<String>) {
        self.input_error = error;
        self.mark_dirty();
    }

    pub(crate) fn set_warning(&mut self, warning: String) {
        self.last_warning = Some(warning);
        self.mark_dirty();
    }

    pub(crate) fn open_detail(&mut self, id: RecordId) {
        if !self.records.iter().any(|record| record.id == id) {
            return;
        }
        self.detail_id = Some(id);
        self.mark_dirty();
    }

    pub(crate) fn close_detail(&mut self) {
        if self.detail_id.take().is_some() {
            self.mark_dirty();
        }
    }

    fn visible_ids(&self) -> Vec<RecordId> {
        let mut rows = filter_records(&self.records, &self.view_state.search_term);
        sort_records(
            &mut rows,
            self.view_state.sort_key,
            self.view_state.sort_direction,
        );
        let page = self.view_state.current_page.clamp(1, total_pages(rows.len()));
        page_slice(&rows, page)
            .iter()
            .map(|record| record.id)
            .collect()
    }
}
