use crate::error::{LeadError, Result};
use crate::models::{Lead, LeadStatus, LeadUpdate, NewLead};
use crate::validate::{validate_lead_fields, validate_new_lead};

use super::{next_sequential_id, LeadStore};

impl LeadStore {
    // ==================== LEAD CREATE ====================

    /// Validate and add a lead. New leads go to the front of the list.
    pub fn insert_lead(&mut self, new_lead: NewLead) -> Result<&Lead> {
        validate_new_lead(&new_lead)?;

        let mut lead = new_lead.into_lead();
        lead.id = next_sequential_id("", self.leads.iter().map(|l| l.id.as_str()))?;
        tracing::info!(id = %lead.id, name = %lead.name, "lead added");

        self.leads.insert(0, lead);
        self.refresh_segment_counts();
        Ok(&self.leads[0])
    }

    // ==================== LEAD READ ====================

    pub fn get_lead(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == id)
    }

    pub fn list_leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn count_leads(&self) -> usize {
        self.leads.len()
    }

    /// Unique sources in first-seen order, for the segment builder.
    pub fn distinct_sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::new();
        for lead in &self.leads {
            if !lead.source.is_empty() && !sources.contains(&lead.source.as_str()) {
                sources.push(&lead.source);
            }
        }
        sources
    }

    // ==================== LEAD UPDATE ====================

    pub fn update_lead(&mut self, id: &str, update: LeadUpdate) -> Result<&Lead> {
        let idx = self.position(id)?;

        let mut edited = self.leads[idx].clone();
        update.apply(&mut edited);
        validate_lead_fields(&edited.name, &edited.email, &edited.source)?;

        self.leads[idx] = edited;
        tracing::info!(id, "lead updated");
        self.refresh_segment_counts();
        Ok(&self.leads[idx])
    }

    pub fn update_status(&mut self, id: &str, status: LeadStatus) -> Result<&Lead> {
        let idx = self.position(id)?;
        let lead = &mut self.leads[idx];
        lead.status = status;
        lead.touch();
        tracing::info!(id, status = %status, "lead status changed");

        self.refresh_segment_counts();
        Ok(&self.leads[idx])
    }

    /// Set `status` on every listed lead that exists. Returns how many changed.
    pub fn bulk_update_status(&mut self, ids: &[String], status: LeadStatus) -> usize {
        let mut updated = 0;
        for lead in self.leads.iter_mut().filter(|l| ids.contains(&l.id)) {
            lead.status = status;
            lead.touch();
            updated += 1;
        }
        tracing::info!(updated, status = %status, "bulk status update");
        self.refresh_segment_counts();
        updated
    }

    // ==================== LEAD DELETE ====================

    /// Remove a lead along with its activity timeline.
    pub fn remove_lead(&mut self, id: &str) -> Result<Lead> {
        let idx = self.position(id)?;
        let lead = self.leads.remove(idx);
        self.activities.retain(|a| a.lead_id != lead.id);
        tracing::info!(id, "lead removed");

        self.refresh_segment_counts();
        Ok(lead)
    }

    /// Remove every listed lead. Returns how many were removed.
    pub fn bulk_remove(&mut self, ids: &[String]) -> usize {
        let before = self.leads.len();
        self.leads.retain(|l| !ids.contains(&l.id));
        self.activities.retain(|a| !ids.contains(&a.lead_id));
        let removed = before - self.leads.len();
        tracing::info!(removed, "bulk delete");

        self.refresh_segment_counts();
        removed
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.leads
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| LeadError::LeadNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::LeadError;
    use crate::models::{LeadStatus, LeadUpdate, NewLead};
    use crate::store::LeadStore;

    fn new_lead(name: &str) -> NewLead {
        NewLead {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            source: "Website".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_assigns_next_id_and_prepends() {
        let mut store = LeadStore::with_demo_data();
        let lead = store.insert_lead(new_lead("Thomas")).unwrap();
        assert_eq!(lead.id, "6");
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.created_at, lead.updated_at);
        assert_eq!(store.list_leads()[0].name, "Thomas");
        assert_eq!(store.count_leads(), 6);
    }

    #[test]
    fn test_insert_after_delete_does_not_reuse_ids() {
        let mut store = LeadStore::with_demo_data();
        store.remove_lead("2").unwrap();
        let id = store.insert_lead(new_lead("Emily")).unwrap().id.clone();
        assert_eq!(id, "6");
        assert_eq!(store.list_leads().iter().filter(|l| l.id == id).count(), 1);
    }

    #[test]
    fn test_insert_rejects_invalid_form() {
        let mut store = LeadStore::new();
        let mut form = new_lead("Bad");
        form.email = "not-an-email".to_string();
        let err = store.insert_lead(form).unwrap_err();
        assert!(matches!(err, LeadError::Validation(_)));
        assert_eq!(store.count_leads(), 0);
    }

    #[test]
    fn test_insert_refreshes_segment_counts() {
        let mut store = LeadStore::with_demo_data();
        store.insert_lead(new_lead("Sarah")).unwrap();
        // seg1 = status new, seg2 = source Website
        assert_eq!(store.get_segment("seg1").unwrap().count, Some(2));
        assert_eq!(store.get_segment("seg2").unwrap().count, Some(2));
    }

    #[test]
    fn test_update_status_bumps_updated_at() {
        let mut store = LeadStore::with_demo_data();
        let before = store.get_lead("1").unwrap().updated_at;
        let lead = store.update_status("1", LeadStatus::Contacted).unwrap();
        assert_eq!(lead.status, LeadStatus::Contacted);
        assert!(lead.updated_at > before);
        assert_eq!(store.get_segment("seg1").unwrap().count, Some(0));
    }

    #[test]
    fn test_update_unknown_lead() {
        let mut store = LeadStore::with_demo_data();
        let err = store.update_status("99", LeadStatus::Customer).unwrap_err();
        assert!(matches!(err, LeadError::LeadNotFound(ref id) if id == "99"));
    }

    #[test]
    fn test_update_lead_validates_result() {
        let mut store = LeadStore::with_demo_data();
        let err = store
            .update_lead(
                "1",
                LeadUpdate {
                    email: Some("broken".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, LeadError::Validation(_)));
        assert_eq!(store.get_lead("1").unwrap().email, "john@example.com");

        let lead = store
            .update_lead(
                "1",
                LeadUpdate {
                    company: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(lead.company.is_none());
    }

    #[test]
    fn test_bulk_update_and_remove() {
        let mut store = LeadStore::with_demo_data();
        let ids = vec!["1".to_string(), "2".to_string(), "42".to_string()];

        assert_eq!(store.bulk_update_status(&ids, LeadStatus::Qualified), 2);
        assert_eq!(store.get_lead("2").unwrap().status, LeadStatus::Qualified);

        assert_eq!(store.bulk_remove(&ids), 2);
        assert_eq!(store.count_leads(), 3);
        assert!(store.activities_for("1").is_empty());
    }

    #[test]
    fn test_distinct_sources_in_first_seen_order() {
        let store = LeadStore::with_demo_data();
        assert_eq!(
            store.distinct_sources(),
            vec!["Website", "Referral", "LinkedIn", "Facebook Ad", "Conference"]
        );
    }
}
