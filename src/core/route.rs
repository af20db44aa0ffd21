//! Navigation targets emitted by the list view.

/// An edit destination for one record of a resource.
///
/// The TUI never renders this itself — it is handed to the shell wrapper on
/// exit, which resolves it against the admin base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRoute {
    pub resource: String,
    pub id: u64,
}

impl EditRoute {
    pub fn new(resource: impl Into<String>, id: u64) -> Self {
        EditRoute {
            resource: resource.into(),
            id,
        }
    }

    /// Relative route path, e.g. `"categories/7/edit"`.
    pub fn path(&self) -> String {
        format!("{}/{}/edit", self.resource, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_path_embeds_resource_and_id() {
        assert_eq!(EditRoute::new("categories", 7).path(), "categories/7/edit");
    }
}
