//! The `Category` record — the one entity this browser displays.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::query::Field;

/// The field projection the list view requests on every fetch.
/// Fixed regardless of which columns actually render.
pub const CATEGORY_FIELDS: &[Field] = &[Field::Id, Field::Title, Field::CreatedAt];

/// One category record, as returned by the data provider.
///
/// Everything except `id` is optional: a field left out of the query's
/// projection simply never arrives, and the table renders it blank.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable row identity and default sort key.
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn deserializes_camel_case_record() {
        let cat: Category = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Books",
            "createdAt": "2023-01-01T10:00:00Z",
        }))
        .unwrap();

        assert_eq!(cat.id, 1);
        assert_eq!(cat.title.as_deref(), Some("Books"));
        assert_eq!(
            cat.created_at,
            Some(Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn missing_projected_fields_become_none() {
        let cat: Category = serde_json::from_value(serde_json::json!({ "id": 7 })).unwrap();
        assert_eq!(cat.id, 7);
        assert!(cat.title.is_none());
        assert!(cat.created_at.is_none());
    }
}
