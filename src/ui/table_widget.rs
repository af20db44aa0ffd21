//! The category table — fixed columns over provider-ordered rows.
//!
//! Column order and formatting are the whole contract of this view: ID and
//! Title raw, Created At in the long date format with the sort indicator,
//! and a compact icon-only edit control per row.  Rows render exactly as
//! the provider returned them; nothing here re-sorts.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    widgets::{Block, Cell, Row, StatefulWidget, Table, TableState},
};

use crate::core::category::Category;
use crate::core::datetime;
use crate::core::query::{default_sort_order, Field, SortDirection, SortState};

use super::theme::Theme;

/// Per-row edit control, icon-only.
const EDIT_ICON: &str = "✎";

pub const COLUMN_LABELS: [&str; 4] = ["ID", "Title", "Created At", "Actions"];

/// Index of the one sortable column (Created At).
const SORT_COLUMN: usize = 2;

/// Header cells, with the `▲`/`▼` indicator attached to the sortable column
/// exactly when it is the active sort field.
pub fn header_cells(sort: &SortState) -> Vec<String> {
    COLUMN_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if i != SORT_COLUMN {
                return (*label).to_string();
            }
            match default_sort_order(Field::CreatedAt, sort) {
                Some(SortDirection::Ascending) => format!("{label} ▲"),
                Some(SortDirection::Descending) => format!("{label} ▼"),
                None => (*label).to_string(),
            }
        })
        .collect()
}

/// Cell values for one record, in column order.  Absent fields render blank.
pub fn row_cells(record: &Category) -> [String; 4] {
    [
        record.id.to_string(),
        record.title.clone().unwrap_or_default(),
        record
            .created_at
            .as_ref()
            .map(datetime::long_datetime)
            .unwrap_or_default(),
        EDIT_ICON.to_string(),
    ]
}

/// The table widget itself — created fresh each frame.
pub struct CategoryTable<'a> {
    records: &'a [Category],
    sort: &'a SortState,
    block: Option<Block<'a>>,
}

impl<'a> CategoryTable<'a> {
    pub fn new(records: &'a [Category], sort: &'a SortState) -> Self {
        Self {
            records,
            sort,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl StatefulWidget for CategoryTable<'_> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TableState) {
        let header = Row::new(header_cells(self.sort).into_iter().map(Cell::from))
            .style(Theme::header_style())
            .height(1);

        let rows = self.records.iter().map(|record| {
            let [id, title, created, action] = row_cells(record);
            Row::new([
                Cell::from(id),
                Cell::from(title),
                Cell::from(created),
                Cell::from(action).style(Theme::action_style()),
            ])
            .style(Theme::row_style())
        });

        let widths = [
            Constraint::Length(6),  // ID
            Constraint::Min(16),    // Title
            Constraint::Length(29), // Created At (longest month + indicator)
            Constraint::Length(7),  // Actions
        ];

        let mut table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .row_highlight_style(Theme::selected_style());
        if let Some(block) = self.block {
            table = table.block(block);
        }

        StatefulWidget::render(table, area, buf, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    fn record(id: u64, title: &str, created: &str) -> Category {
        Category {
            id,
            title: Some(title.to_string()),
            created_at: Some(created.parse().unwrap()),
        }
    }

    #[test]
    fn renders_the_documented_sample_row() {
        let cat = record(1, "Books", "2023-01-01T10:00:00Z");
        let [id, title, created, action] = row_cells(&cat);
        assert_eq!(id, "1");
        assert_eq!(title, "Books");
        assert_eq!(created, "January 1, 2023 10:00 AM");
        assert_eq!(action, "✎");
    }

    #[test]
    fn absent_fields_render_blank() {
        let cat = Category {
            id: 4,
            title: None,
            created_at: None,
        };
        let [id, title, created, _] = row_cells(&cat);
        assert_eq!(id, "4");
        assert_eq!(title, "");
        assert_eq!(created, "");
    }

    #[test]
    fn one_row_per_record_in_provider_order() {
        let records = vec![
            record(3, "Games", "2024-03-20T22:05:00Z"),
            record(1, "Books", "2023-01-01T10:00:00Z"),
            record(2, "Music", "2022-06-15T08:30:00Z"),
        ];

        let ids: Vec<String> = records.iter().map(|r| row_cells(r)[0].clone()).collect();
        // Provider order preserved: no client-side re-sorting.
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn sort_indicator_tracks_the_sort_state() {
        let none = SortState::initial();
        assert_eq!(header_cells(&none)[SORT_COLUMN], "Created At");

        let asc = SortState::single(Field::CreatedAt, SortDirection::Ascending);
        assert_eq!(header_cells(&asc)[SORT_COLUMN], "Created At ▲");

        let desc = asc.toggle(Field::CreatedAt);
        assert_eq!(header_cells(&desc)[SORT_COLUMN], "Created At ▼");
    }

    #[test]
    fn other_headers_never_carry_an_indicator() {
        let sort = SortState::single(Field::CreatedAt, SortDirection::Ascending);
        let headers = header_cells(&sort);
        assert_eq!(headers[0], "ID");
        assert_eq!(headers[1], "Title");
        assert_eq!(headers[3], "Actions");
    }

    #[test]
    fn created_at_column_fits_the_longest_month() {
        let ts = Utc.with_ymd_and_hms(2023, 9, 28, 22, 30, 0).unwrap();
        let cat = Category {
            id: 1,
            title: None,
            created_at: Some(ts),
        };
        let created = &row_cells(&cat)[2];
        assert_eq!(created, "September 28, 2023 10:30 PM");
        assert!(created.chars().count() <= 29);
    }
}
