use crate::error::{LeadError, Result, ValidationErrors};
use crate::models::{ActivityType, Creator, LeadActivity};

use super::LeadStore;

impl LeadStore {
    /// Record a timeline entry. Content must not be blank.
    pub fn add_activity(
        &mut self,
        lead_id: &str,
        activity_type: ActivityType,
        content: &str,
        created_by: Creator,
    ) -> Result<&LeadActivity> {
        if self.get_lead(lead_id).is_none() {
            return Err(LeadError::LeadNotFound(lead_id.to_string()));
        }
        if content.trim().is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("content", "Activity content is required");
            return Err(errors.into());
        }

        let activity = LeadActivity::new(
            lead_id.to_string(),
            activity_type,
            content.trim().to_string(),
            created_by,
        );
        tracing::info!(lead_id, activity_type = %activity_type, "activity added");

        self.activities.push(activity);
        Ok(&self.activities[self.activities.len() - 1])
    }

    /// Timeline for one lead, newest first.
    pub fn activities_for(&self, lead_id: &str) -> Vec<&LeadActivity> {
        let mut timeline: Vec<&LeadActivity> = self
            .activities
            .iter()
            .filter(|a| a.lead_id == lead_id)
            .collect();
        timeline.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        timeline
    }
}
