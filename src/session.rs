//! Per-session state for the lead screen.
//!
//! The store holds records; the session holds what the user is looking at:
//! the ad-hoc filter, the active segment or saved view, the table query and
//! the selection. Exactly one of segment / view drives the visible set at a
//! time.

use std::path::{Path, PathBuf};

use anyhow::Result as AnyResult;

use crate::error::{LeadError, Result, ValidationErrors};
use crate::export::write_export;
use crate::filter::{apply_filter, search_and_sort, segment_members, TableQuery};
use crate::models::{
    ActivityType, Creator, FilterGroup, Lead, LeadActivity, LeadStatus, LeadUpdate, NewLead,
    SavedView, Segment, SegmentCriteria, SegmentUpdate,
};
use crate::store::{team_members, LeadStore};

#[derive(Debug)]
pub struct Session {
    store: LeadStore,
    user: Creator,
    selected: Vec<String>,
    current_filter: Option<FilterGroup>,
    active_segment: Option<String>,
    active_view: Option<String>,
    pub query: TableQuery,
}

impl Session {
    pub fn new(store: LeadStore, user: Creator) -> Self {
        Self {
            store,
            user,
            selected: Vec::new(),
            current_filter: None,
            active_segment: None,
            active_view: None,
            query: TableQuery::default(),
        }
    }

    pub fn store(&self) -> &LeadStore {
        &self.store
    }

    pub fn user(&self) -> &Creator {
        &self.user
    }

    pub fn current_filter(&self) -> Option<&FilterGroup> {
        self.current_filter.as_ref()
    }

    pub fn active_segment(&self) -> Option<&Segment> {
        self.active_segment
            .as_deref()
            .and_then(|id| self.store.get_segment(id))
    }

    pub fn active_view(&self) -> Option<&SavedView> {
        self.active_view
            .as_deref()
            .and_then(|id| self.store.get_view(id))
    }

    // ==================== FILTERS, SEGMENTS, VIEWS ====================

    /// Replace the ad-hoc filter. Clears any active segment or view.
    pub fn apply_filter(&mut self, filter: Option<FilterGroup>) {
        self.current_filter = filter;
        self.active_segment = None;
        self.active_view = None;
        tracing::debug!(
            filter = %self.current_filter.as_ref().map(|f| f.to_string()).unwrap_or_default(),
            "filter applied"
        );
    }

    /// Activate a segment, or pass `None` to fall back to the current filter.
    pub fn select_segment(&mut self, id: Option<&str>) -> Result<()> {
        match id {
            Some(id) => {
                if self.store.get_segment(id).is_none() {
                    return Err(LeadError::SegmentNotFound(id.to_string()));
                }
                self.active_segment = Some(id.to_string());
                self.active_view = None;
            }
            None => self.active_segment = None,
        }
        Ok(())
    }

    /// Activate a saved view. Its filter becomes the current filter.
    pub fn select_view(&mut self, id: &str) -> Result<()> {
        let view = self
            .store
            .get_view(id)
            .ok_or_else(|| LeadError::ViewNotFound(id.to_string()))?;
        self.current_filter = Some(view.filter.clone());
        self.active_view = Some(id.to_string());
        self.active_segment = None;
        Ok(())
    }

    /// Save `filter` as a view owned by the session user and make it active.
    pub fn save_view(
        &mut self,
        name: &str,
        description: Option<String>,
        filter: FilterGroup,
    ) -> Result<String> {
        let id = self
            .store
            .save_view(name, description, filter.clone(), self.user.clone())?
            .id
            .clone();
        self.current_filter = Some(filter);
        self.active_view = Some(id.clone());
        self.active_segment = None;
        Ok(id)
    }

    /// Save whatever filter is applied right now.
    pub fn save_current_filter(&mut self, name: &str, description: Option<String>) -> Result<String> {
        let filter = match &self.current_filter {
            Some(filter) if !filter.is_empty() => filter.clone(),
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add("filter", "Add at least one condition before saving a view");
                return Err(errors.into());
            }
        };
        self.save_view(name, description, filter)
    }

    /// Delete a view. Deleting the active view also drops the current filter.
    pub fn delete_view(&mut self, id: &str) -> Result<SavedView> {
        let view = self.store.delete_view(id)?;
        if self.active_view.as_deref() == Some(id) {
            self.active_view = None;
            self.current_filter = None;
        }
        Ok(view)
    }

    /// Create a segment and make it active.
    pub fn create_segment(
        &mut self,
        name: &str,
        description: &str,
        criteria: SegmentCriteria,
    ) -> Result<String> {
        let id = self
            .store
            .create_segment(name, description, criteria)?
            .id
            .clone();
        self.select_segment(Some(id.as_str()))?;
        Ok(id)
    }

    pub fn update_segment(&mut self, id: &str, update: SegmentUpdate) -> Result<&Segment> {
        self.store.update_segment(id, update)
    }

    pub fn delete_segment(&mut self, id: &str) -> Result<Segment> {
        let segment = self.store.delete_segment(id)?;
        if self.active_segment.as_deref() == Some(id) {
            self.active_segment = None;
        }
        Ok(segment)
    }

    // ==================== VISIBLE LEADS ====================

    /// Leads the table is built from, before search and sort.
    pub fn visible_leads(&self) -> Vec<&Lead> {
        match self.active_segment() {
            Some(segment) => segment_members(self.store.list_leads(), &segment.criteria),
            None => apply_filter(self.store.list_leads(), self.current_filter.as_ref()),
        }
    }

    /// Visible leads after the table's search box and sort column.
    pub fn table_rows(&self) -> Vec<&Lead> {
        search_and_sort(self.visible_leads(), &self.query)
    }

    // ==================== SELECTION ====================

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Select every row currently in the table.
    pub fn select_all_visible(&mut self) -> usize {
        self.selected = self.table_rows().iter().map(|l| l.id.clone()).collect();
        self.selected.len()
    }

    /// Flip one lead in or out of the selection. Returns the new state.
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        if let Some(idx) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(idx);
            false
        } else {
            self.selected.push(id.to_string());
            true
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    // ==================== LEAD ACTIONS ====================

    pub fn add_lead(&mut self, new_lead: NewLead) -> Result<&Lead> {
        self.store.insert_lead(new_lead)
    }

    pub fn update_status(&mut self, id: &str, status: LeadStatus) -> Result<&Lead> {
        self.store.update_status(id, status)
    }

    pub fn update_lead(&mut self, id: &str, update: LeadUpdate) -> Result<&Lead> {
        self.store.update_lead(id, update)
    }

    pub fn delete_lead(&mut self, id: &str) -> Result<Lead> {
        let lead = self.store.remove_lead(id)?;
        self.selected.retain(|s| s != id);
        Ok(lead)
    }

    /// Set the status of every selected lead. The selection is kept.
    pub fn bulk_update_status(&mut self, status: LeadStatus) -> usize {
        self.store.bulk_update_status(&self.selected, status)
    }

    /// Delete every selected lead and clear the selection.
    pub fn bulk_delete(&mut self) -> usize {
        let removed = self.store.bulk_remove(&self.selected);
        self.selected.clear();
        removed
    }

    /// Hand the selection to a team member. Assignment is not stored on the
    /// lead; the selection is cleared.
    pub fn assign_selected(&mut self, user_id: &str) -> Result<(Creator, usize)> {
        let member = team_members()
            .into_iter()
            .find(|m| m.id == user_id)
            .ok_or_else(|| LeadError::InvalidValue {
                kind: "team member",
                value: user_id.to_string(),
            })?;
        let count = self.selected.len();
        tracing::info!(leads = ?self.selected, assignee = %member.name, "leads assigned");
        self.selected.clear();
        Ok((member, count))
    }

    /// Leads in the selection, in store order.
    pub fn selected_leads(&self) -> Vec<&Lead> {
        self.store
            .list_leads()
            .iter()
            .filter(|l| self.is_selected(&l.id))
            .collect()
    }

    /// Write the selected leads to a CSV file in `dir`.
    pub fn export_selected(&self, dir: &Path) -> AnyResult<PathBuf> {
        write_export(dir, self.selected_leads())
    }

    pub fn add_activity(
        &mut self,
        lead_id: &str,
        activity_type: ActivityType,
        content: &str,
    ) -> Result<&LeadActivity> {
        let user = self.user.clone();
        self.store.add_activity(lead_id, activity_type, content, user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilterCondition, FilterOperator, LeadField, LogicalOperator};
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new(LeadStore::with_demo_data(), Creator::new("user1", "Admin User"))
    }

    fn source_filter(value: &str) -> FilterGroup {
        FilterGroup::new(
            LogicalOperator::And,
            vec![FilterCondition::new(LeadField::Source, FilterOperator::Contains, value)],
        )
    }

    fn ids(leads: &[&Lead]) -> Vec<String> {
        leads.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_no_filter_shows_everything() {
        let s = session();
        assert_eq!(s.visible_leads().len(), 5);
        // default sort is newest first
        assert_eq!(s.table_rows()[0].name, "John Smith");
    }

    #[test]
    fn test_apply_filter_clears_segment_and_view() {
        let mut s = session();
        s.select_view("view1").unwrap();
        assert_eq!(ids(&s.visible_leads()), ["3"]);

        s.select_segment(Some("seg1")).unwrap();
        assert!(s.active_view().is_none());
        assert_eq!(ids(&s.visible_leads()), ["1"]);

        s.apply_filter(Some(source_filter("web")));
        assert!(s.active_segment().is_none());
        assert!(s.active_view().is_none());
        assert_eq!(ids(&s.visible_leads()), ["1"]);
    }

    #[test]
    fn test_select_view_clears_segment() {
        let mut s = session();
        s.select_segment(Some("seg2")).unwrap();
        s.select_view("view1").unwrap();
        assert!(s.active_segment().is_none());
        assert_eq!(s.current_filter().unwrap().conditions.len(), 2);
    }

    #[test]
    fn test_unknown_segment_and_view() {
        let mut s = session();
        assert!(matches!(
            s.select_segment(Some("seg99")),
            Err(LeadError::SegmentNotFound(_))
        ));
        assert!(matches!(s.select_view("nope"), Err(LeadError::ViewNotFound(_))));
    }

    #[test]
    fn test_save_current_filter_becomes_active_view() {
        let mut s = session();
        assert!(s.save_current_filter("Empty", None).is_err());

        s.apply_filter(Some(source_filter("in")));
        let id = s.save_current_filter("Linked", None).unwrap();
        assert_eq!(id, "view2");
        assert_eq!(s.active_view().unwrap().created_by.as_ref().unwrap().id, "user1");
    }

    #[test]
    fn test_delete_active_view_clears_filter() {
        let mut s = session();
        s.select_view("view1").unwrap();
        s.delete_view("view1").unwrap();
        assert!(s.current_filter().is_none());
        assert_eq!(s.visible_leads().len(), 5);
    }

    #[test]
    fn test_create_segment_activates_it() {
        let mut s = session();
        let criteria = SegmentCriteria {
            status: vec![LeadStatus::Qualified, LeadStatus::Customer],
            ..Default::default()
        };
        let id = s.create_segment("Hot", "", criteria).unwrap();
        assert_eq!(s.active_segment().unwrap().id, id);
        assert_eq!(s.visible_leads().len(), 2);

        s.delete_segment(&id).unwrap();
        assert!(s.active_segment().is_none());
        assert_eq!(s.visible_leads().len(), 5);
    }

    #[test]
    fn test_selection_and_bulk_status() {
        let mut s = session();
        s.apply_filter(Some(source_filter("e")));
        let visible = s.table_rows().len();
        assert_eq!(s.select_all_visible(), visible);

        assert!(!s.toggle_selection("1"));
        assert!(s.toggle_selection("1"));

        let updated = s.bulk_update_status(LeadStatus::Qualified);
        assert_eq!(updated, visible);
        assert_eq!(s.selected().len(), visible);
        assert_eq!(s.store().get_segment("seg1").unwrap().count, Some(0));
    }

    #[test]
    fn test_delete_lead_drops_it_from_selection() {
        let mut s = session();
        s.toggle_selection("2");
        s.toggle_selection("3");
        s.delete_lead("2").unwrap();
        assert_eq!(s.selected(), ["3".to_string()]);
    }

    #[test]
    fn test_bulk_delete_clears_selection() {
        let mut s = session();
        s.toggle_selection("4");
        s.toggle_selection("5");
        assert_eq!(s.bulk_delete(), 2);
        assert!(s.selected().is_empty());
        assert_eq!(s.store().count_leads(), 3);
    }

    #[test]
    fn test_assign_selected() {
        let mut s = session();
        s.toggle_selection("1");
        let (member, count) = s.assign_selected("user2").unwrap();
        assert_eq!(member.name, "Sales Rep");
        assert_eq!(count, 1);
        assert!(s.selected().is_empty());
        assert!(s.assign_selected("user9").is_err());
    }

    #[test]
    fn test_export_selected() {
        let dir = TempDir::new().unwrap();
        let mut s = session();
        s.toggle_selection("1");
        let path = s.export_selected(dir.path()).unwrap();
        let csv = std::fs::read_to_string(path).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("\"John Smith\""));
    }

    #[test]
    fn test_activity_recorded_as_session_user() {
        let mut s = session();
        let activity = s.add_activity("2", ActivityType::Task, "Send contract").unwrap();
        assert_eq!(activity.created_by.name, "Admin User");
    }
}
