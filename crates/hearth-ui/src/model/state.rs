//! UI state model for the Hearth palette.
//!
//! This module defines the state machine and data structures for the palette.
//! These types hold no collaborators, so they can be tested directly.

use hearth_core::{ResultKind, SearchResult};

// =============================================================================
// Palette Phase State Machine
// =============================================================================

/// Top-level state machine. Invalid states are impossible.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum PalettePhase {
    /// Palette is hidden, no transient state kept.
    #[default]
    Closed,
    /// Palette is visible and interactive.
    Open(OpenState),
}

impl PalettePhase {
    /// Get the open state if the palette is open.
    pub fn open(&self) -> Option<&OpenState> {
        match self {
            PalettePhase::Open(state) => Some(state),
            PalettePhase::Closed => None,
        }
    }

    /// Get mutable open state if the palette is open.
    pub fn open_mut(&mut self) -> Option<&mut OpenState> {
        match self {
            PalettePhase::Open(state) => Some(state),
            PalettePhase::Closed => None,
        }
    }

    /// Check if the palette is open.
    pub fn is_open(&self) -> bool {
        matches!(self, PalettePhase::Open(_))
    }
}

/// Phase plus the request counter that outlives open/close cycles.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PaletteModel {
    pub phase: PalettePhase,

    /// Latest issued search generation. Responses carrying any other value
    /// are stale.
    pub generation: u64,
}

impl PaletteModel {
    /// Issue a new generation, invalidating every pending search.
    pub fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Whether `generation` is the latest one issued.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Immutable view for subscribers.
    pub fn snapshot(&self) -> PaletteSnapshot {
        match &self.phase {
            PalettePhase::Closed => PaletteSnapshot::default(),
            PalettePhase::Open(open) => PaletteSnapshot {
                status: match open.stage {
                    OpenStage::Empty => PaletteStatus::Empty,
                    OpenStage::Querying => PaletteStatus::Querying,
                    OpenStage::Results => PaletteStatus::Results,
                },
                query: open.query.clone(),
                entries: open.entries(),
                results: open.results.clone(),
                cursor_index: open.cursor_index,
            },
        }
    }
}

// =============================================================================
// Open State
// =============================================================================

/// Which sub-state of Open the palette is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenStage {
    /// No query. Recent items and quick actions are shown.
    #[default]
    Empty,
    /// A search is pending. Previous rows stay visible.
    Querying,
    /// Rows for the current query are shown.
    Results,
}

/// State while the palette is visible.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OpenState {
    /// Current query text, as typed.
    pub query: String,

    /// Recent items loaded when the palette opened.
    pub recent: Vec<SearchResult>,

    /// Rows currently displayed.
    pub results: Vec<SearchResult>,

    /// Index into `results` of the highlighted row.
    pub cursor_index: usize,

    pub stage: OpenStage,
}

impl OpenState {
    /// Fresh state with the empty-query rows already in place.
    pub fn new(recent: Vec<SearchResult>, empty_rows: Vec<SearchResult>) -> Self {
        Self {
            query: String::new(),
            recent,
            results: empty_rows,
            cursor_index: 0,
            stage: OpenStage::Empty,
        }
    }

    /// Replace the rows and move the cursor back to the top.
    pub fn set_results(&mut self, results: Vec<SearchResult>) {
        self.results = results;
        self.cursor_index = 0;
    }

    /// Get the highlighted row.
    pub fn selected(&self) -> Option<&SearchResult> {
        self.results.get(self.cursor_index)
    }

    /// Move cursor up.
    pub fn cursor_up(&mut self) {
        if self.cursor_index > 0 {
            self.cursor_index -= 1;
        }
    }

    /// Move cursor down.
    pub fn cursor_down(&mut self) {
        if self.cursor_index + 1 < self.results.len() {
            self.cursor_index += 1;
        }
    }

    /// Jump to the first row.
    pub fn cursor_home(&mut self) {
        self.cursor_index = 0;
    }

    /// Jump to the last row.
    pub fn cursor_end(&mut self) {
        self.cursor_index = self.results.len().saturating_sub(1);
    }

    /// Move the cursor to `index`, clamped to the rows on screen.
    pub fn select(&mut self, index: usize) {
        self.cursor_index = index.min(self.results.len().saturating_sub(1));
    }

    /// Flatten rows into render entries.
    ///
    /// With no query, rows are split into "Recent" and "Quick Actions"
    /// sections; otherwise they are ungrouped.
    pub fn entries(&self) -> Vec<ListEntry> {
        let mut entries = Vec::with_capacity(self.results.len() + 2);
        let mut section: Option<&'static str> = None;

        for (flat_index, item) in self.results.iter().enumerate() {
            if self.stage == OpenStage::Empty {
                let title = if item.kind == ResultKind::Action {
                    "Quick Actions"
                } else {
                    "Recent"
                };
                if section != Some(title) {
                    entries.push(ListEntry::GroupHeader {
                        title: title.to_string(),
                    });
                    section = Some(title);
                }
            }
            entries.push(ListEntry::Item {
                item: item.clone(),
                flat_index,
            });
        }

        entries
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Coarse palette status for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaletteStatus {
    #[default]
    Closed,
    Empty,
    Querying,
    Results,
}

/// Everything a view needs to draw the palette.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteSnapshot {
    pub status: PaletteStatus,
    pub query: String,
    pub results: Vec<SearchResult>,
    pub entries: Vec<ListEntry>,
    pub cursor_index: usize,
}

impl PaletteSnapshot {
    pub fn is_open(&self) -> bool {
        self.status != PaletteStatus::Closed
    }

    /// Titles of the displayed rows, in order.
    pub fn titles(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.title.as_str()).collect()
    }

    /// The highlighted row.
    pub fn selected(&self) -> Option<&SearchResult> {
        self.results.get(self.cursor_index)
    }
}

// =============================================================================
// List Entry
// =============================================================================

/// An entry in the flattened list for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry {
    /// A group header row.
    GroupHeader { title: String },

    /// A result row.
    Item {
        item: SearchResult,
        /// Index into the flat result list (for cursor matching).
        flat_index: usize,
    },
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::QuickAction;

    fn contact(id: &str, title: &str) -> SearchResult {
        SearchResult::link(id, ResultKind::Contact, title, format!("/crm/contacts/{}", id))
    }

    fn action(id: &str, title: &str) -> SearchResult {
        QuickAction::new(id, title, "", "plus").to_result()
    }

    #[test]
    fn test_phase_default() {
        let model = PaletteModel::default();
        assert!(!model.phase.is_open());
        assert!(model.phase.open().is_none());
        assert_eq!(model.snapshot().status, PaletteStatus::Closed);
    }

    #[test]
    fn test_generation() {
        let mut model = PaletteModel::default();
        let first = model.bump_generation();
        let second = model.bump_generation();
        assert!(second > first);
        assert!(model.is_current(second));
        assert!(!model.is_current(first));
    }

    #[test]
    fn test_cursor_navigation_clamps() {
        let mut state = OpenState::default();
        state.cursor_down();
        assert_eq!(state.cursor_index, 0);
        state.cursor_end();
        assert_eq!(state.cursor_index, 0);

        state.set_results(vec![contact("1", "One"), contact("2", "Two"), contact("3", "Three")]);
        state.cursor_down();
        state.cursor_down();
        state.cursor_down();
        assert_eq!(state.cursor_index, 2);
        assert_eq!(state.selected().unwrap().title, "Three");

        state.cursor_up();
        assert_eq!(state.cursor_index, 1);
        state.cursor_home();
        state.cursor_up();
        assert_eq!(state.cursor_index, 0);

        state.select(99);
        assert_eq!(state.cursor_index, 2);
    }

    #[test]
    fn test_set_results_resets_cursor() {
        let mut state = OpenState::new(vec![], vec![contact("1", "One"), contact("2", "Two")]);
        state.cursor_down();
        state.set_results(vec![contact("3", "Three")]);
        assert_eq!(state.cursor_index, 0);
    }

    #[test]
    fn test_empty_stage_entries_have_sections() {
        let recent = vec![contact("1", "Maria Okafor")];
        let mut rows = recent.clone();
        rows.push(action("create_task", "Create New Task"));
        let state = OpenState::new(recent, rows);

        let entries = state.entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(
            entries[0],
            ListEntry::GroupHeader {
                title: "Recent".to_string()
            }
        );
        assert_eq!(
            entries[2],
            ListEntry::GroupHeader {
                title: "Quick Actions".to_string()
            }
        );
        assert!(matches!(entries[3], ListEntry::Item { flat_index: 1, .. }));
    }

    #[test]
    fn test_results_stage_entries_are_flat() {
        let mut state = OpenState::default();
        state.stage = OpenStage::Results;
        state.set_results(vec![contact("1", "One"), action("create_task", "Create New Task")]);
        assert_eq!(state.entries().len(), 2);
    }

    #[test]
    fn test_snapshot_of_open_state() {
        let mut model = PaletteModel::default();
        model.phase = PalettePhase::Open(OpenState::new(vec![], vec![contact("1", "One")]));

        let snapshot = model.snapshot();
        assert!(snapshot.is_open());
        assert_eq!(snapshot.status, PaletteStatus::Empty);
        assert_eq!(snapshot.titles(), vec!["One"]);
        assert_eq!(snapshot.selected().unwrap().id.0, "1");
    }
}
