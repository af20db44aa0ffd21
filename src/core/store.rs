//! JSON catalog store — the bundled [`DataProvider`].
//!
//! The catalog file is a single JSON object mapping resource names to record
//! arrays. `fetch` applies the query server-side, the way a remote list
//! endpoint would: sort the whole collection, slice the requested page, then
//! project each record onto the requested fields.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};

use super::category::Category;
use super::provider::{DataProvider, ListPage, ProviderError};
use super::query::{Field, Query, SortDirection};

pub struct JsonStore {
    collections: HashMap<String, Vec<Value>>,
}

impl JsonStore {
    /// Load a catalog snapshot from disk.
    pub fn open(path: &Path) -> Result<Self, ProviderError> {
        let contents = std::fs::read_to_string(path)?;
        let root: Value = serde_json::from_str(&contents)?;
        Self::from_value(root)
    }

    /// Build a store from an already-parsed catalog object.
    pub fn from_value(root: Value) -> Result<Self, ProviderError> {
        let Value::Object(map) = root else {
            return Err(ProviderError::InvalidCatalog(
                "root must be an object of resource arrays".to_string(),
            ));
        };

        let mut collections = HashMap::new();
        for (name, value) in map {
            let rows = match value {
                Value::Array(rows) => rows,
                _ => {
                    return Err(ProviderError::InvalidCatalog(format!(
                        "resource `{name}` must be an array"
                    )))
                }
            };
            collections.insert(name, rows);
        }

        Ok(JsonStore { collections })
    }
}

impl DataProvider for JsonStore {
    fn fetch(&self, query: &Query) -> Result<ListPage, ProviderError> {
        let rows = self
            .collections
            .get(&query.resource)
            .ok_or_else(|| ProviderError::UnknownResource(query.resource.clone()))?;

        // Sort the whole collection before slicing the page window.
        // Stable sort keeps the file order for ties.
        let mut ordered: Vec<&Value> = rows.iter().collect();
        for order in query.sort.orders().iter().rev() {
            ordered.sort_by(|a, b| {
                let cmp = SortKey::of(a, order.field).cmp(&SortKey::of(b, order.field));
                match order.direction {
                    SortDirection::Ascending => cmp,
                    SortDirection::Descending => cmp.reverse(),
                }
            });
        }

        let total = ordered.len() as u64;
        let per_page = query.page.per_page.max(1) as usize;
        let start = (query.page.number.max(1) as usize - 1).saturating_mul(per_page);

        let mut records = Vec::new();
        for &row in ordered.iter().skip(start).take(per_page) {
            let projected = project(row, &query.fields);
            let record: Category = serde_json::from_value(Value::Object(projected)).map_err(
                |source| ProviderError::Malformed {
                    resource: query.resource.clone(),
                    source,
                },
            )?;
            records.push(record);
        }

        Ok(ListPage {
            records,
            sort: query.sort.clone(),
            total,
            page: query.page,
        })
    }
}

/// Keep only the requested fields. `id` survives regardless — it is the row
/// identity, not payload.
fn project(row: &Value, fields: &[Field]) -> Map<String, Value> {
    let mut out = Map::new();
    let Value::Object(obj) = row else {
        return out;
    };

    if let Some(id) = obj.get(Field::Id.as_str()) {
        out.insert(Field::Id.as_str().to_string(), id.clone());
    }
    for field in fields {
        if let Some(value) = obj.get(field.as_str()) {
            out.insert(field.as_str().to_string(), value.clone());
        }
    }
    out
}

/// Typed comparison key for one field of one row.
///
/// Missing values order first so ascending sorts put blank rows on top.
/// Timestamps compare as strings — RFC 3339 UTC is lexicographically
/// chronological.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Null,
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(row: &Value, field: Field) -> SortKey {
        match row.get(field.as_str()) {
            None | Some(Value::Null) => SortKey::Null,
            Some(Value::Number(n)) => SortKey::Number(n.as_f64().unwrap_or(0.0)),
            Some(Value::String(s)) => SortKey::Text(s.clone()),
            Some(other) => SortKey::Text(other.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    fn cmp(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category::CATEGORY_FIELDS;
    use crate::core::query::{Page, SortState};
    use serde_json::json;
    use std::io::Write;

    fn sample_store() -> JsonStore {
        JsonStore::from_value(json!({
            "categories": [
                {"id": 1, "title": "Books",  "createdAt": "2023-01-01T10:00:00Z", "slug": "books"},
                {"id": 2, "title": "Music",  "createdAt": "2022-06-15T08:30:00Z", "slug": "music"},
                {"id": 3, "title": "Games",  "createdAt": "2024-03-20T22:05:00Z", "slug": "games"},
            ]
        }))
        .unwrap()
    }

    fn query(sort: SortState, page: Page) -> Query {
        Query {
            resource: "categories".into(),
            fields: CATEGORY_FIELDS.to_vec(),
            sort,
            page,
        }
    }

    #[test]
    fn sorts_by_created_at_in_both_directions() {
        let store = sample_store();

        let asc = store
            .fetch(&query(
                SortState::single(Field::CreatedAt, SortDirection::Ascending),
                Page::default(),
            ))
            .unwrap();
        let ids: Vec<u64> = asc.records.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        let desc = store
            .fetch(&query(
                SortState::single(Field::CreatedAt, SortDirection::Descending),
                Page::default(),
            ))
            .unwrap();
        let ids: Vec<u64> = desc.records.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn echoes_sort_state_and_total() {
        let store = sample_store();
        let sort = SortState::initial();
        let page = store.fetch(&query(sort.clone(), Page::default())).unwrap();

        assert_eq!(page.sort, sort);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn paginates_with_one_based_windows() {
        let store = sample_store();
        let page2 = store
            .fetch(&query(
                SortState::initial(),
                Page {
                    number: 2,
                    per_page: 2,
                },
            ))
            .unwrap();

        let ids: Vec<u64> = page2.records.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3]);
        assert_eq!(page2.total, 3);
    }

    #[test]
    fn projection_drops_unrequested_fields() {
        let store = sample_store();
        let mut q = query(SortState::initial(), Page::default());
        q.fields = vec![Field::Id, Field::Title];

        let page = store.fetch(&q).unwrap();
        // createdAt was not requested: it must not survive projection.
        assert!(page.records.iter().all(|c| c.created_at.is_none()));
        assert!(page.records.iter().all(|c| c.title.is_some()));
    }

    #[test]
    fn unknown_resource_is_an_error() {
        let store = sample_store();
        let err = store
            .fetch(&query(SortState::initial(), Page::default()).resource_named("tags"))
            .unwrap_err();
        assert!(matches!(err, ProviderError::UnknownResource(name) if name == "tags"));
    }

    #[test]
    fn malformed_record_is_an_error() {
        let store = JsonStore::from_value(json!({
            "categories": [{"id": "not-a-number"}]
        }))
        .unwrap();
        let err = store
            .fetch(&query(SortState::initial(), Page::default()))
            .unwrap_err();
        assert!(matches!(err, ProviderError::Malformed { .. }));
    }

    #[test]
    fn rows_missing_the_sort_field_order_first_ascending() {
        let store = JsonStore::from_value(json!({
            "categories": [
                {"id": 1, "createdAt": "2023-01-01T10:00:00Z"},
                {"id": 2},
            ]
        }))
        .unwrap();

        let page = store
            .fetch(&query(
                SortState::single(Field::CreatedAt, SortDirection::Ascending),
                Page::default(),
            ))
            .unwrap();
        let ids: Vec<u64> = page.records.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn opens_a_catalog_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"categories": [{{"id": 1, "title": "Books", "createdAt": "2023-01-01T10:00:00Z"}}]}}"#
        )
        .unwrap();

        let store = JsonStore::open(file.path()).unwrap();
        let page = store
            .fetch(&query(SortState::initial(), Page::default()))
            .unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].title.as_deref(), Some("Books"));
    }

    impl Query {
        fn resource_named(mut self, name: &str) -> Self {
            self.resource = name.into();
            self
        }
    }
}
