use crate::error::{LeadError, Result, ValidationErrors};
use crate::models::{Creator, FilterGroup, SavedView};

use super::{next_sequential_id, LeadStore};

impl LeadStore {
    pub fn save_view(
        &mut self,
        name: &str,
        description: Option<String>,
        filter: FilterGroup,
        created_by: Creator,
    ) -> Result<&SavedView> {
        if name.trim().is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("name", "View name is required");
            return Err(errors.into());
        }

        let mut view = SavedView::new(name.trim().to_string(), filter, created_by);
        view.description = description.filter(|d| !d.trim().is_empty());
        view.id = next_sequential_id("view", self.views.iter().map(|v| v.id.as_str()))?;
        tracing::info!(id = %view.id, name = %view.name, "view saved");

        self.views.push(view);
        Ok(&self.views[self.views.len() - 1])
    }

    pub fn get_view(&self, id: &str) -> Option<&SavedView> {
        self.views.iter().find(|v| v.id == id)
    }

    pub fn list_views(&self) -> &[SavedView] {
        &self.views
    }

    pub fn delete_view(&mut self, id: &str) -> Result<SavedView> {
        let idx = self
            .views
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| LeadError::ViewNotFound(id.to_string()))?;
        tracing::info!(id, "view deleted");
        Ok(self.views.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{
        Creator, FilterCondition, FilterGroup, FilterOperator, LeadField, LogicalOperator,
    };
    use crate::store::LeadStore;

    fn filter() -> FilterGroup {
        FilterGroup::new(
            LogicalOperator::And,
            vec![FilterCondition::new(
                LeadField::Company,
                FilterOperator::Contains,
                "corp",
            )],
        )
    }

    #[test]
    fn test_save_view_records_creator() {
        let mut store = LeadStore::with_demo_data();
        let view = store
            .save_view(
                "Corporates",
                Some(" ".to_string()),
                filter(),
                Creator::new("user2", "Sales Rep"),
            )
            .unwrap();
        assert_eq!(view.id, "view2");
        assert!(view.description.is_none());
        assert_eq!(view.created_by.as_ref().unwrap().name, "Sales Rep");
        assert_eq!(store.list_views().len(), 2);
    }

    #[test]
    fn test_save_view_requires_name() {
        let mut store = LeadStore::new();
        assert!(store
            .save_view("", None, filter(), Creator::new("user1", "Admin User"))
            .is_err());
    }

    #[test]
    fn test_delete_view() {
        let mut store = LeadStore::with_demo_data();
        store.delete_view("view1").unwrap();
        assert!(store.get_view("view1").is_none());
        assert!(store.delete_view("view1").is_err());
    }
}
