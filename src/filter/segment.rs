use crate::models::{Lead, SegmentCriteria};

use super::predicate::evaluate_condition;

/// Whether `lead` belongs to a segment with these criteria.
pub fn segment_matches(lead: &Lead, criteria: &SegmentCriteria) -> bool {
    if !criteria.status.is_empty() && !criteria.status.contains(&lead.status) {
        return false;
    }

    if !criteria.source.is_empty() && !criteria.source.iter().any(|s| *s == lead.source) {
        return false;
    }

    if let Some(min) = criteria.min_created_at {
        if lead.created_at < min {
            return false;
        }
    }

    if let Some(max) = criteria.max_created_at {
        if lead.created_at > max {
            return false;
        }
    }

    criteria
        .custom_fields
        .iter()
        .all(|rule| evaluate_condition(lead, &rule.as_condition()))
}

/// Full recount of segment members.
pub fn count_segment<'a, I>(leads: I, criteria: &SegmentCriteria) -> usize
where
    I: IntoIterator<Item = &'a Lead>,
{
    leads
        .into_iter()
        .filter(|lead| segment_matches(lead, criteria))
        .count()
}

pub fn segment_members<'a, I>(leads: I, criteria: &SegmentCriteria) -> Vec<&'a Lead>
where
    I: IntoIterator<Item = &'a Lead>,
{
    leads
        .into_iter()
        .filter(|lead| segment_matches(lead, criteria))
        .collect()
}
