//! Input handling — maps key/mouse events to state mutations.
//!
//! Handlers never fetch; they update the sort/page state and raise
//! `needs_fetch`, and the main loop issues the request after the next draw.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::query::{Field, Page};
use crate::core::route::EditRoute;

use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::List => handle_list_key(state, key),
        ActiveView::Controls => handle_controls_key(state, key),
    }
}

// ── List view (configurable bindings) ───────────────────────────

fn handle_list_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::MoveUp => state.select_prev(),
        Action::MoveDown => state.select_next(),
        Action::PrevPage => goto_page(state, state.page.number.saturating_sub(1)),
        Action::NextPage => goto_page(state, state.page.number.saturating_add(1)),
        Action::ToggleSort => {
            state.sort = state.sort.toggle(Field::CreatedAt);
            state.needs_fetch = true;
        }
        Action::Refresh => {
            state.needs_fetch = true;
        }
        Action::Edit => edit_selected(state),
        Action::OpenControls => {
            state.active_view = ActiveView::Controls;
        }
        Action::Quit => {
            state.should_quit = true;
        }
    }
}

/// Jump to `number`, clamped to the known page range. Only a page that
/// actually changes triggers a fetch.
fn goto_page(state: &mut AppState, number: u32) {
    let last = state
        .total
        .map(|t| Page::count_for(t, state.page.per_page))
        .unwrap_or(u32::MAX);
    let clamped = number.clamp(1, last);
    if clamped != state.page.number {
        state.page.number = clamped;
        state.needs_fetch = true;
    }
}

/// Record the edit navigation intent for the selected row and leave the
/// list view. The record itself is untouched.
fn edit_selected(state: &mut AppState) {
    let Some(id) = state.selected_record().map(|r| r.id) else {
        return;
    };
    state.edit_route = Some(EditRoute::new(state.resource.clone(), id));
    state.should_quit = true;
}

// ── Controls popup (hardcoded keys) ─────────────────────────────

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::List;
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::List {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => state.select_prev(),
        MouseEventKind::ScrollDown => state.select_next(),
        MouseEventKind::Down(MouseButton::Left) => {
            handle_left_click(state, mouse.column, mouse.row);
        }
        _ => {}
    }
}

/// Select the clicked row; a second click on the same row within the
/// double-click window activates Edit.
fn handle_left_click(state: &mut AppState, column: u16, row: u16) {
    let Some(area) = state.table_area else {
        return;
    };

    // Rows start below the top border and the header row.
    let first_row_y = area.y + 2;
    let inside_x = column > area.x && column < area.x + area.width.saturating_sub(1);
    let inside_y = row >= first_row_y && row < area.y + area.height.saturating_sub(1);
    if !inside_x || !inside_y {
        return;
    }

    let idx = state.table_state.offset() + (row - first_row_y) as usize;
    if idx >= state.records.len() {
        return;
    }

    let now = Instant::now();
    let is_double = matches!(
        state.last_left_click,
        Some((prev, at)) if prev == idx
            && now.duration_since(at).as_millis() as u64 <= state.config.double_click_ms
    );

    state.select_row(idx);
    if is_double {
        state.last_left_click = None;
        edit_selected(state);
    } else {
        state.last_left_click = Some((idx, now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::category::Category;
    use crate::core::query::SortDirection;
    use std::path::PathBuf;

    fn state_with_records(ids: &[u64]) -> AppState {
        let mut st = AppState::new(PathBuf::from("catalog.json"), AppConfig::defaults());
        st.needs_fetch = false;
        st.records = ids
            .iter()
            .map(|&id| Category {
                id,
                title: None,
                created_at: None,
            })
            .collect();
        if !st.records.is_empty() {
            st.table_state.select(Some(0));
        }
        st
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn toggle_sort_requests_exactly_one_fetch_with_single_pair() {
        let mut st = state_with_records(&[1, 2]);

        handle_key(&mut st, press(KeyCode::Char('s')));

        assert!(st.needs_fetch);
        let query = st.current_query();
        assert_eq!(query.sort.orders().len(), 1);
        assert_eq!(
            query.sort.direction_of(Field::CreatedAt),
            Some(SortDirection::Ascending)
        );
        // The initial id sort was discarded, not appended to.
        assert_eq!(query.sort.direction_of(Field::Id), None);

        handle_key(&mut st, press(KeyCode::Char('s')));
        assert_eq!(
            st.current_query().sort.direction_of(Field::CreatedAt),
            Some(SortDirection::Descending)
        );
    }

    #[test]
    fn edit_records_one_navigation_intent_without_mutating_records() {
        let mut st = state_with_records(&[3, 7, 9]);
        st.select_row(1);
        let before = st.records.clone();

        handle_key(&mut st, press(KeyCode::Enter));

        assert_eq!(
            st.edit_route.as_ref().map(|r| r.path()).as_deref(),
            Some("categories/7/edit")
        );
        assert!(st.should_quit);
        assert_eq!(st.records, before);
        assert!(!st.needs_fetch);
    }

    #[test]
    fn edit_is_a_noop_on_an_empty_table() {
        let mut st = state_with_records(&[]);
        handle_key(&mut st, press(KeyCode::Enter));
        assert!(st.edit_route.is_none());
        assert!(!st.should_quit);
    }

    #[test]
    fn paging_clamps_to_the_known_range() {
        let mut st = state_with_records(&[1]);
        st.total = Some(25); // 3 pages at per_page = 10

        handle_key(&mut st, press(KeyCode::Left));
        assert_eq!(st.page.number, 1);
        assert!(!st.needs_fetch); // nothing changed, nothing fetched

        handle_key(&mut st, press(KeyCode::Right));
        assert_eq!(st.page.number, 2);
        assert!(st.needs_fetch);

        st.needs_fetch = false;
        st.page.number = 3;
        handle_key(&mut st, press(KeyCode::Right));
        assert_eq!(st.page.number, 3);
        assert!(!st.needs_fetch);
    }

    #[test]
    fn controls_popup_opens_and_closes() {
        let mut st = state_with_records(&[1]);

        handle_key(&mut st, press(KeyCode::Char('?')));
        assert_eq!(st.active_view, ActiveView::Controls);

        // List-view bindings are inert while the popup is open.
        handle_key(&mut st, press(KeyCode::Char('s')));
        assert!(!st.needs_fetch);

        handle_key(&mut st, press(KeyCode::Esc));
        assert_eq!(st.active_view, ActiveView::List);
    }

    #[test]
    fn ctrl_c_quits_from_any_view() {
        let mut st = state_with_records(&[1]);
        st.active_view = ActiveView::Controls;
        handle_key(
            &mut st,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(st.should_quit);
    }

    #[test]
    fn wheel_scroll_moves_the_selection() {
        let mut st = state_with_records(&[1, 2, 3]);
        let scroll = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };

        handle_mouse(&mut st, scroll(MouseEventKind::ScrollDown));
        assert_eq!(st.table_state.selected(), Some(1));
        handle_mouse(&mut st, scroll(MouseEventKind::ScrollUp));
        assert_eq!(st.table_state.selected(), Some(0));
    }
}
