//! Palette controller - owns the palette state machine.
//!
//! ```text
//!            open / cmd+k                 set_query("acme")
//!  Closed ───────────────► Open(Empty) ─────────────────► Open(Querying)
//!    ▲                         ▲   ▲                             │ debounce, then
//!    │ escape / backdrop /     │   └──── set_query("") ──────────┤ backend.search
//!    │ activate                │                                 ▼
//!    └─────────────────────────┴──────────────────────────── Open(Results)
//! ```
//!
//! ## Ordering
//!
//! Every query change (and every close) issues a new generation. A debounced
//! search checks its generation before calling the backend and again before
//! applying the answer, so a slow response for an old query can never replace
//! rows for a newer one.
//!
//! ## Errors
//!
//! Nothing here returns an error. Search failures become an empty result
//! list, storage failures an empty recent list; both are logged.

use std::sync::Arc;

use hearth_core::{Activation, BackendError, PaletteConfig, SearchResult};
use hearth_palette::{
    CapabilityProvider, KeyHandler, Keystroke, PaletteRegistry, RecentItems,
};
use tokio::sync::watch;

use crate::actions::{command_from_name, PaletteCommand};
use crate::backend::Backend;
use crate::model::{ObservablePalette, OpenStage, OpenState, PalettePhase, PaletteSnapshot};
use crate::navigation::Navigator;

/// Headless command palette.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct PaletteController {
    backend: Arc<dyn Backend>,
    recent: Arc<RecentItems>,
    registry: Arc<PaletteRegistry>,
    capabilities: Arc<dyn CapabilityProvider>,
    navigator: Arc<dyn Navigator>,
    config: Arc<PaletteConfig>,
    state: Arc<ObservablePalette>,
}

impl PaletteController {
    /// Create a closed palette.
    pub fn new(
        backend: Arc<dyn Backend>,
        recent: Arc<RecentItems>,
        registry: Arc<PaletteRegistry>,
        capabilities: Arc<dyn CapabilityProvider>,
        navigator: Arc<dyn Navigator>,
        config: PaletteConfig,
    ) -> Self {
        Self {
            backend,
            recent,
            registry,
            capabilities,
            navigator,
            config: Arc::new(config),
            state: Arc::new(ObservablePalette::new()),
        }
    }

    // -------------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------------

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<PaletteSnapshot> {
        self.state.subscribe()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> PaletteSnapshot {
        self.state.snapshot()
    }

    /// Check if the palette is open.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    /// Open the palette with an empty query. No-op if already open.
    pub fn open(&self) {
        if self.state.is_open() {
            return;
        }

        let recent = self.recent.load();
        let actions = self.permitted_actions();

        self.state.update(|model| {
            if model.phase.is_open() {
                return;
            }
            model.bump_generation();
            let rows = self.empty_query_rows(&recent, &actions);
            model.phase = PalettePhase::Open(OpenState::new(recent, rows));
            tracing::debug!("Palette opened");
        });
    }

    /// Close the palette and drop all transient state. No-op if closed.
    pub fn close(&self) {
        self.state.update(|model| {
            if model.phase.is_open() {
                model.bump_generation();
                model.phase = PalettePhase::Closed;
                tracing::debug!("Palette closed");
            }
        });
    }

    /// Open if closed, close if open.
    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Click outside the palette.
    pub fn backdrop_click(&self) {
        self.close();
    }

    // -------------------------------------------------------------------------
    // Query
    // -------------------------------------------------------------------------

    /// Replace the query text.
    ///
    /// An empty query shows recent items and quick actions immediately.
    /// Anything else schedules a debounced search that supersedes every
    /// search scheduled before it. Ignored while closed.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        let is_empty = query.trim().is_empty();
        let actions = if is_empty {
            self.permitted_actions()
        } else {
            Vec::new()
        };

        let generation = self.state.update(|model| {
            if !model.phase.is_open() {
                return None;
            }
            let generation = model.bump_generation();
            let open = model.phase.open_mut()?;
            open.query = query.clone();

            if is_empty {
                let rows = self.empty_query_rows(&open.recent, &actions);
                open.set_results(rows);
                open.stage = OpenStage::Empty;
            } else {
                open.stage = OpenStage::Querying;
            }
            Some(generation)
        });

        match generation {
            Some(generation) if !is_empty => self.schedule_search(generation, query),
            Some(_) => {}
            None => tracing::debug!("Ignoring query while palette is closed"),
        }
    }

    fn schedule_search(&self, generation: u64, query: String) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime; dropping search for '{}'", query);
            self.apply_search_results(generation, Err(BackendError::RuntimeUnavailable));
            return;
        };

        let this = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(this.config.debounce()).await;
            if !this.state.is_current(generation) {
                tracing::debug!("Search for '{}' superseded before dispatch", query);
                return;
            }

            let result = this.backend.search(query).await;
            this.apply_search_results(generation, result);
        });
    }

    fn apply_search_results(
        &self,
        generation: u64,
        result: Result<Vec<SearchResult>, BackendError>,
    ) {
        self.state.update(|model| {
            if !model.is_current(generation) {
                tracing::debug!("Dropping stale search results (generation {})", generation);
                return;
            }
            let Some(open) = model.phase.open_mut() else {
                return;
            };

            match result {
                Ok(results) => {
                    tracing::debug!("apply_search_results: {} rows", results.len());
                    open.set_results(results);
                }
                Err(e) => {
                    tracing::warn!("Search failed: {}", e);
                    open.set_results(Vec::new());
                }
            }
            open.stage = OpenStage::Results;
        });
    }

    // -------------------------------------------------------------------------
    // Cursor
    // -------------------------------------------------------------------------

    pub fn cursor_up(&self) {
        self.with_open(OpenState::cursor_up);
    }

    pub fn cursor_down(&self) {
        self.with_open(OpenState::cursor_down);
    }

    pub fn cursor_home(&self) {
        self.with_open(OpenState::cursor_home);
    }

    pub fn cursor_end(&self) {
        self.with_open(OpenState::cursor_end);
    }

    /// Highlight row `index` (pointer hover), clamped to the visible rows.
    pub fn select_index(&self, index: usize) {
        self.with_open(|open| open.select(index));
    }

    fn with_open(&self, f: impl FnOnce(&mut OpenState)) {
        self.state.update(|model| {
            if let Some(open) = model.phase.open_mut() {
                f(open);
            }
        });
    }

    // -------------------------------------------------------------------------
    // Activation
    // -------------------------------------------------------------------------

    /// Activate the highlighted row.
    pub fn activate(&self) -> Option<Activation> {
        let selected = self
            .state
            .read(|model| model.phase.open().and_then(|open| open.selected().cloned()))?;
        Some(self.activate_result(selected))
    }

    /// Highlight then activate row `index` (pointer click).
    pub fn activate_index(&self, index: usize) -> Option<Activation> {
        self.select_index(index);
        self.activate()
    }

    /// Activate a specific result.
    ///
    /// Links are recorded as recent and navigated to; quick actions run their
    /// handler. The palette closes in both cases. Collaborators run after
    /// the state lock is released.
    pub fn activate_result(&self, result: SearchResult) -> Activation {
        let activation = Activation::for_result(&result);
        match &activation {
            Activation::Navigated { url } => {
                self.recent.save(&result);
                self.close();
                self.navigator.navigate(url);
            }
            Activation::ActionInvoked { action_id } => {
                self.close();
                self.registry.handlers().invoke(action_id);
            }
        }
        tracing::debug!("Activated '{}': {:?}", result.id, activation);
        activation
    }

    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    /// Dispatch a key event. Returns `true` if a binding handled it.
    pub fn handle_key(&self, key: &Keystroke) -> bool {
        let open = self.is_open();
        match self.registry.keymap().resolve(key, open) {
            Some(KeyHandler::Action(name)) => match command_from_name(&name) {
                Some(command) => {
                    self.execute(command);
                    true
                }
                None => {
                    tracing::warn!("Unknown command '{}' bound to {}", name, key);
                    false
                }
            },
            Some(KeyHandler::QuickAction { id }) => self.run_quick_action(&id),
            None => false,
        }
    }

    /// Run a built-in command.
    pub fn execute(&self, command: PaletteCommand) {
        match command {
            PaletteCommand::Toggle => self.toggle(),
            PaletteCommand::Open => self.open(),
            PaletteCommand::Dismiss => self.close(),
            PaletteCommand::CursorUp => self.cursor_up(),
            PaletteCommand::CursorDown => self.cursor_down(),
            PaletteCommand::CursorHome => self.cursor_home(),
            PaletteCommand::CursorEnd => self.cursor_end(),
            PaletteCommand::Submit => {
                self.activate();
            }
        }
    }

    /// Run a quick action bound directly to a key, if the user may see it.
    fn run_quick_action(&self, id: &str) -> bool {
        let quick_actions = self.registry.quick_actions();
        if !quick_actions.is_permitted(self.capabilities.as_ref(), id) {
            tracing::debug!("Quick action '{}' not permitted", id);
            return false;
        }
        self.close();
        self.registry.handlers().invoke(id)
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn permitted_actions(&self) -> Vec<SearchResult> {
        self.registry
            .quick_actions()
            .permitted_results(self.capabilities.as_ref())
    }

    /// Recent items (top few) followed by every permitted quick action.
    fn empty_query_rows(
        &self,
        recent: &[SearchResult],
        actions: &[SearchResult],
    ) -> Vec<SearchResult> {
        recent
            .iter()
            .take(self.config.recent.empty_query_limit)
            .chain(actions)
            .cloned()
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
