use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{LeadError, Result};
use crate::filter::count_segment;
use crate::models::{Lead, LeadActivity, SavedView, Segment};

mod activities;
mod leads;
mod seed;
mod segments;
mod source;
mod views;

pub use seed::{demo_workspace, team_members};
pub use source::{FileLeadSource, LeadSource, MockLeadSource};

/// Everything a session works on, in the shape of a JSON workspace file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub views: Vec<SavedView>,
    #[serde(default)]
    pub activities: Vec<LeadActivity>,
}

impl Workspace {
    /// Reject records the store cannot hold: repeated ids, and leads whose
    /// `updatedAt` is earlier than their `createdAt`.
    pub fn validate(&self) -> Result<()> {
        ensure_unique("lead", self.leads.iter().map(|l| l.id.as_str()))?;
        ensure_unique("segment", self.segments.iter().map(|s| s.id.as_str()))?;
        ensure_unique("view", self.views.iter().map(|v| v.id.as_str()))?;

        if let Some(lead) = self.leads.iter().find(|l| l.updated_at < l.created_at) {
            return Err(LeadError::InvalidWorkspace(format!(
                "lead {} was updated before it was created",
                lead.id
            )));
        }
        Ok(())
    }
}

fn ensure_unique<'a, I>(kind: &str, ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LeadError::InvalidWorkspace(format!("duplicate {} id {}", kind, id)));
        }
    }
    Ok(())
}

/// In-memory lead store. Owns every record for one session; nothing is written
/// back anywhere.
#[derive(Debug, Default)]
pub struct LeadStore {
    leads: Vec<Lead>,
    segments: Vec<Segment>,
    views: Vec<SavedView>,
    activities: Vec<LeadActivity>,
}

impl LeadStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from a validated workspace. Segment counts are computed
    /// immediately.
    pub fn from_workspace(workspace: Workspace) -> Result<Self> {
        workspace.validate()?;
        Ok(Self::build(workspace))
    }

    fn build(workspace: Workspace) -> Self {
        let mut store = Self {
            leads: workspace.leads,
            segments: workspace.segments,
            views: workspace.views,
            activities: workspace.activities,
        };
        store.refresh_segment_counts();
        tracing::debug!(
            leads = store.leads.len(),
            segments = store.segments.len(),
            views = store.views.len(),
            "store loaded"
        );
        store
    }

    /// Store holding the built-in demo records.
    pub fn with_demo_data() -> Self {
        Self::build(demo_workspace())
    }

    pub fn to_workspace(&self) -> Workspace {
        Workspace {
            leads: self.leads.clone(),
            segments: self.segments.clone(),
            views: self.views.clone(),
            activities: self.activities.clone(),
        }
    }

    /// Recount every segment against the current leads. Returns how many
    /// cached counts changed.
    pub fn refresh_segment_counts(&mut self) -> usize {
        let leads = &self.leads;
        let mut changed = 0;
        for segment in &mut self.segments {
            let count = count_segment(leads, &segment.criteria);
            if segment.count != Some(count) {
                segment.count = Some(count);
                changed += 1;
            }
        }
        if changed > 0 {
            tracing::debug!(changed, "segment counts refreshed");
        }
        changed
    }
}

/// Next id for a `<prefix><N>` sequence: one past the largest N in use.
fn next_sequential_id<'a, I>(prefix: &str, existing: I) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let max = existing
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    let next = max
        .checked_add(1)
        .ok_or_else(|| LeadError::IdsExhausted(prefix.to_string()))?;
    Ok(format!("{}{}", prefix, next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_store_counts_segments() {
        let store = LeadStore::with_demo_data();
        assert_eq!(store.count_leads(), 5);

        let new_leads = store.get_segment("seg1").unwrap();
        assert_eq!(new_leads.count, Some(1));
        let website = store.get_segment("seg2").unwrap();
        assert_eq!(website.count, Some(1));
    }

    #[test]
    fn test_refresh_reports_no_change_when_idle() {
        let mut store = LeadStore::with_demo_data();
        assert_eq!(store.refresh_segment_counts(), 0);
    }

    #[test]
    fn test_workspace_round_trips_through_json() {
        let store = LeadStore::with_demo_data();
        let json = serde_json::to_string(&store.to_workspace()).unwrap();
        let restored = LeadStore::from_workspace(serde_json::from_str(&json).unwrap()).unwrap();
        assert_eq!(restored.to_workspace(), store.to_workspace());
    }

    #[test]
    fn test_demo_workspace_is_valid() {
        demo_workspace().validate().unwrap();
    }

    #[test]
    fn test_duplicate_lead_ids_rejected() {
        let mut workspace = demo_workspace();
        let copy = workspace.leads[0].clone();
        workspace.leads.push(copy);
        let err = LeadStore::from_workspace(workspace).unwrap_err();
        assert!(matches!(err, LeadError::InvalidWorkspace(_)));
        assert!(err.to_string().contains("duplicate lead id 1"));
    }

    #[test]
    fn test_duplicate_segment_ids_rejected() {
        let mut workspace = demo_workspace();
        let copy = workspace.segments[0].clone();
        workspace.segments.push(copy);
        assert!(LeadStore::from_workspace(workspace).is_err());
    }

    #[test]
    fn test_updated_before_created_rejected() {
        let mut workspace = demo_workspace();
        let lead = &mut workspace.leads[0];
        lead.updated_at = lead.created_at - chrono::Duration::seconds(1);
        let err = LeadStore::from_workspace(workspace).unwrap_err();
        assert!(err.to_string().contains("updated before it was created"));
    }

    #[test]
    fn test_next_sequential_id() {
        assert_eq!(next_sequential_id("seg", ["seg1", "seg7", "other"]).unwrap(), "seg8");
        assert_eq!(next_sequential_id("", Vec::<&str>::new()).unwrap(), "1");
        assert_eq!(next_sequential_id("", ["2", "10", "x"]).unwrap(), "11");
    }

    #[test]
    fn test_next_sequential_id_exhausted() {
        let max = u64::MAX.to_string();
        let err = next_sequential_id("", [max.as_str()]).unwrap_err();
        assert!(matches!(err, LeadError::IdsExhausted(_)));
    }

    #[test]
    fn test_insert_after_largest_id_is_an_error() {
        let mut workspace = demo_workspace();
        workspace.leads[0].id = u64::MAX.to_string();
        let mut store = LeadStore::from_workspace(workspace).unwrap();
        let new_lead = crate::models::NewLead {
            name: "Thomas Anderson".to_string(),
            email: "neo@example.com".to_string(),
            company: None,
            phone: None,
            source: "Website".to_string(),
            status: crate::models::LeadStatus::New,
            notes: None,
        };
        assert!(matches!(store.insert_lead(new_lead), Err(LeadError::IdsExhausted(_))));
        assert_eq!(store.count_leads(), 5);
    }
}
