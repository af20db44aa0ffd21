//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! Fetch results come back through [`AppState::apply_fetch`], a reducer-style
//! transition that enforces latest-wins ordering.

use std::path::PathBuf;
use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::widgets::TableState;

use crate::app::fetch_runtime::FetchUpdate;
use crate::config::AppConfig;
use crate::core::category::{Category, CATEGORY_FIELDS};
use crate::core::query::{Page, Query, SortState};
use crate::core::route::EditRoute;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    List,
    Controls,
}

/// Top-level application state.
pub struct AppState {
    /// The remote collection this browser is bound to.
    pub resource: String,
    /// Catalog file backing the bundled provider (shown in the title bar).
    pub catalog: PathBuf,
    /// The current page of records, in provider order. Never re-sorted here.
    pub records: Vec<Category>,
    /// Active sort, round-tripped with every fetch.
    pub sort: SortState,
    /// Current pagination window.
    pub page: Page,
    /// Collection size reported by the last successful fetch.
    pub total: Option<u64>,
    /// `true` while a fetch is in flight.
    pub loading: bool,
    /// Error message from the last failed fetch, shown in the status bar.
    pub error: Option<String>,
    /// Ratatui table selection + scroll offset.
    pub table_state: TableState,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// User-configurable keybindings and view settings.
    pub config: AppConfig,
    /// Flag set by event handlers to request a re-fetch on the next frame.
    pub needs_fetch: bool,
    /// Monotonic generation id used to ignore stale fetch results.
    pub fetch_generation: u64,
    /// Navigation intent recorded by the Edit action; printed on exit.
    pub edit_route: Option<EditRoute>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Tick counter driving the fetch spinner.
    pub tick: u64,
    /// Table pane geometry from the last draw, for mouse hit-testing.
    pub table_area: Option<Rect>,
    /// Last left-clicked row and click time, for double-click detection.
    pub last_left_click: Option<(usize, Instant)>,
}

impl AppState {
    pub fn new(catalog: PathBuf, config: AppConfig) -> Self {
        let page = Page::first(config.per_page);
        Self {
            resource: "categories".to_string(),
            catalog,
            records: Vec::new(),
            sort: SortState::initial(),
            page,
            total: None,
            loading: false,
            error: None,
            table_state: TableState::default(),
            active_view: ActiveView::default(),
            config,
            needs_fetch: true,
            fetch_generation: 0,
            edit_route: None,
            should_quit: false,
            tick: 0,
            table_area: None,
            last_left_click: None,
        }
    }

    /// The query the view sends for its current sort and page. The field
    /// projection is fixed: always exactly `{id, title, createdAt}`.
    pub fn current_query(&self) -> Query {
        Query {
            resource: self.resource.clone(),
            fields: CATEGORY_FIELDS.to_vec(),
            sort: self.sort.clone(),
            page: self.page,
        }
    }

    /// Start a new fetch generation. Returns what the fetch runtime needs;
    /// any still-running request from an earlier generation is superseded.
    pub fn begin_fetch(&mut self) -> (u64, Query) {
        self.needs_fetch = false;
        self.loading = true;
        self.fetch_generation = self.fetch_generation.wrapping_add(1);
        (self.fetch_generation, self.current_query())
    }

    /// Apply a fetch result. Results from superseded generations are dropped
    /// so a slow earlier request can never overwrite a newer one.
    pub fn apply_fetch(&mut self, update: FetchUpdate) {
        let FetchUpdate::Page { generation, result } = update;
        if generation != self.fetch_generation {
            tracing::trace!(generation, current = self.fetch_generation, "stale fetch dropped");
            return;
        }

        self.loading = false;
        match result {
            Ok(list) => {
                self.records = list.records;
                self.sort = list.sort;
                self.total = Some(list.total);
                self.page = list.page;
                self.error = None;
                self.clamp_selection();
            }
            Err(e) => {
                // Keep the previous rows on screen; just surface the error.
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn selected_record(&self) -> Option<&Category> {
        self.records.get(self.table_state.selected()?)
    }

    pub fn select_next(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) => (i + 1).min(self.records.len() - 1),
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn select_prev(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let prev = self.table_state.selected().unwrap_or(0).saturating_sub(1);
        self.table_state.select(Some(prev));
    }

    pub fn select_row(&mut self, row: usize) {
        if row < self.records.len() {
            self.table_state.select(Some(row));
        }
    }

    /// Keep the selection inside the new record set after a fetch.
    fn clamp_selection(&mut self) {
        if self.records.is_empty() {
            self.table_state.select(None);
            return;
        }
        let clamped = self
            .table_state
            .selected()
            .unwrap_or(0)
            .min(self.records.len() - 1);
        self.table_state.select(Some(clamped));
    }
}
