//! Query model — field projection, sort state, and pagination.
//!
//! A [`Query`] is the full request the view hands to the data provider.
//! Sort state round-trips: the view sends it with the fetch and the
//! provider echoes back what it actually applied.

/// A projectable record field, by wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Title,
    CreatedAt,
}

impl Field {
    /// Wire name as it appears in catalog records.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Title => "title",
            Field::CreatedAt => "createdAt",
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

/// One `(field, direction)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: Field,
    pub direction: SortDirection,
}

/// The active sort sequence.
///
/// Kept as a sequence because that is what crosses the provider boundary,
/// but this view only ever holds a single pair at a time: replacing the
/// sort discards every previous pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState(Vec<SortOrder>);

impl SortState {
    /// The list view's initial sort: `id` ascending.
    pub fn initial() -> Self {
        Self::single(Field::Id, SortDirection::Ascending)
    }

    /// A single-pair sort state, dropping everything that came before.
    pub fn single(field: Field, direction: SortDirection) -> Self {
        SortState(vec![SortOrder { field, direction }])
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.0
    }

    /// The direction applied to `field`, if it is part of the active sort.
    /// This is what places the indicator on a column header.
    pub fn direction_of(&self, field: Field) -> Option<SortDirection> {
        self.0.iter().find(|o| o.field == field).map(|o| o.direction)
    }

    /// Sort interaction on a column header: a column that is not the active
    /// sort field becomes the sole sort (ascending); the active column flips
    /// direction. Either way the previous pairs are discarded.
    pub fn toggle(&self, field: Field) -> Self {
        match self.direction_of(field) {
            Some(dir) => Self::single(field, dir.flipped()),
            None => Self::single(field, SortDirection::Ascending),
        }
    }
}

/// Convenience lookup mirroring the provider-side contract: which default
/// sort order should a column header show for `field` right now?
pub fn default_sort_order(field: Field, sort: &SortState) -> Option<SortDirection> {
    sort.direction_of(field)
}

/// 1-based pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub per_page: u32,
}

impl Page {
    pub const DEFAULT_PER_PAGE: u32 = 10;

    pub fn first(per_page: u32) -> Self {
        Page {
            number: 1,
            per_page: per_page.max(1),
        }
    }

    /// Number of pages needed for `total` records (at least 1).
    pub fn count_for(total: u64, per_page: u32) -> u32 {
        let per = u64::from(per_page.max(1));
        (total.div_ceil(per).max(1)).min(u64::from(u32::MAX)) as u32
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::first(Page::DEFAULT_PER_PAGE)
    }
}

/// A full page request against a named resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Remote collection name, e.g. `"categories"`.
    pub resource: String,
    /// Fields to project. Records come back with everything else absent.
    pub fields: Vec<Field>,
    pub sort: SortState,
    pub page: Page,
}
