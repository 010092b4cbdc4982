use crate::models::{FilterGroup, Lead, LogicalOperator};

use super::predicate::evaluate_condition;

/// Combine every condition of `group` with its logical operator.
///
/// An empty AND group matches everything and an empty OR group matches
/// nothing; use [`apply_filter`] when an empty group should mean "no filter".
pub fn evaluate_group(lead: &Lead, group: &FilterGroup) -> bool {
    let mut results = group.conditions.iter().map(|c| evaluate_condition(lead, c));
    match group.logical_operator {
        LogicalOperator::And => results.all(|r| r),
        LogicalOperator::Or => results.any(|r| r),
    }
}

/// Leads visible under `filter`. `None` or a group without conditions shows everything.
pub fn apply_filter<'a, I>(leads: I, filter: Option<&FilterGroup>) -> Vec<&'a Lead>
where
    I: IntoIterator<Item = &'a Lead>,
{
    match filter {
        Some(group) if !group.is_empty() => {
            let matched: Vec<&Lead> = leads
                .into_iter()
                .filter(|lead| evaluate_group(lead, group))
                .collect();
            tracing::debug!(
                conditions = group.conditions.len(),
                matched = matched.len(),
                "applied filter"
            );
            matched
        }
        _ => leads.into_iter().collect(),
    }
}
