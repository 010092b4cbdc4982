use chrono::Utc;

use crate::error::{LeadError, Result, ValidationErrors};
use crate::models::{Segment, SegmentCriteria, SegmentUpdate};

use super::{next_sequential_id, LeadStore};

impl LeadStore {
    pub fn create_segment(
        &mut self,
        name: &str,
        description: &str,
        criteria: SegmentCriteria,
    ) -> Result<&Segment> {
        require_name(name)?;

        let mut segment = Segment::new(name.trim().to_string(), description.to_string(), criteria);
        segment.id = next_sequential_id("seg", self.segments.iter().map(|s| s.id.as_str()))?;
        tracing::info!(id = %segment.id, name = %segment.name, "segment created");

        self.segments.push(segment);
        self.refresh_segment_counts();
        Ok(&self.segments[self.segments.len() - 1])
    }

    pub fn get_segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn list_segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn update_segment(&mut self, id: &str, update: SegmentUpdate) -> Result<&Segment> {
        if let Some(ref name) = update.name {
            require_name(name)?;
        }

        let idx = self
            .segments
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| LeadError::SegmentNotFound(id.to_string()))?;

        let segment = &mut self.segments[idx];
        if let Some(name) = update.name {
            segment.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            segment.description = description;
        }
        if let Some(criteria) = update.criteria {
            segment.criteria = criteria;
        }
        segment.updated_at = Utc::now().max(segment.created_at);
        tracing::info!(id, "segment updated");

        self.refresh_segment_counts();
        Ok(&self.segments[idx])
    }

    pub fn delete_segment(&mut self, id: &str) -> Result<Segment> {
        let idx = self
            .segments
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| LeadError::SegmentNotFound(id.to_string()))?;
        tracing::info!(id, "segment deleted");
        Ok(self.segments.remove(idx))
    }
}

fn require_name(name: &str) -> Result<()> {
    let mut errors = ValidationErrors::new();
    if name.trim().is_empty() {
        errors.add("name", "Segment name is required");
    }
    errors.into_result().map_err(LeadError::from)
}
