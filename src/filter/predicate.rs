//! Single-condition evaluation against one lead.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::{FilterCondition, FilterOperator, Lead};

/// Evaluate one condition. Never fails: anything that cannot match is `false`.
///
/// A condition with no field or an empty value always passes, so a half-built
/// row in the filter builder never hides records.
pub fn evaluate_condition(lead: &Lead, condition: &FilterCondition) -> bool {
    let field = match condition.field {
        Some(field) if !condition.value.is_empty() => field,
        _ => return true,
    };

    let actual = match field.text(lead) {
        Some(text) => text,
        None => return false,
    };

    let expected = match condition.operator {
        FilterOperator::GreaterThan => Ordering::Greater,
        FilterOperator::LessThan => Ordering::Less,
        op => return text_matches(&actual, op, &condition.value),
    };

    // Timestamp fields compare at full precision, not via their text form.
    let ordering = match field.timestamp(lead) {
        Some(at) => parse_date(&condition.value).map(|value| at.cmp(&value)),
        None => compare_as_dates(&actual, &condition.value),
    };
    ordering == Some(expected)
}

/// Case-insensitive text comparison for the string operators.
/// Date operators always return `false` here.
pub fn text_matches(actual: &str, operator: FilterOperator, expected: &str) -> bool {
    let actual = actual.to_lowercase();
    let expected = expected.to_lowercase();

    match operator {
        FilterOperator::Equals => actual == expected,
        FilterOperator::Contains => actual.contains(&expected),
        FilterOperator::StartsWith => actual.starts_with(&expected),
        FilterOperator::EndsWith => actual.ends_with(&expected),
        FilterOperator::GreaterThan | FilterOperator::LessThan => false,
    }
}

/// Order two strings by the instants they name. `None` if either is not a date.
pub fn compare_as_dates(left: &str, right: &str) -> Option<Ordering> {
    let left = parse_date(left)?;
    let right = parse_date(right)?;
    Some(left.cmp(&right))
}

/// Parse the date spellings the lead screens produce: RFC 3339 timestamps,
/// bare `YYYY-MM-DDTHH:MM[:SS]` (read as UTC), `YYYY-MM-DD` (UTC midnight),
/// and US `M/D/YYYY`.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeadField, LeadStatus};

    fn lead() -> Lead {
        let mut lead = Lead::new(
            "John Smith".to_string(),
            "john@example.com".to_string(),
            "Website".to_string(),
        );
        lead.id = "1".to_string();
        lead.company = Some("Acme Corp".to_string());
        lead.created_at = "2025-04-10T10:00:00Z".parse().unwrap();
        lead.updated_at = lead.created_at;
        lead
    }

    fn cond(field: LeadField, op: FilterOperator, value: &str) -> FilterCondition {
        FilterCondition::new(field, op, value)
    }

    #[test]
    fn test_blank_conditions_always_pass() {
        let lead = lead();
        let mut unset = cond(LeadField::Name, FilterOperator::Equals, "nobody");
        unset.field = None;
        assert!(evaluate_condition(&lead, &unset));

        let empty_value = cond(LeadField::Phone, FilterOperator::Equals, "");
        assert!(evaluate_condition(&lead, &empty_value));

        let empty_date = cond(LeadField::CreatedAt, FilterOperator::GreaterThan, "");
        assert!(evaluate_condition(&lead, &empty_date));
    }

    #[test]
    fn test_equals_own_value_for_every_field() {
        let mut lead = lead();
        lead.phone = Some("555-123-4567".to_string());
        lead.notes = Some("Met at expo".to_string());

        for field in LeadField::ALL {
            let value = field.text(&lead).unwrap().to_uppercase();
            assert!(
                evaluate_condition(&lead, &cond(field, FilterOperator::Equals, &value)),
                "{} should equal its own value",
                field
            );
        }
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let lead = lead();
        assert!(evaluate_condition(
            &lead,
            &cond(LeadField::Source, FilterOperator::Contains, "web")
        ));
        assert!(!evaluate_condition(
            &lead,
            &cond(LeadField::Source, FilterOperator::Contains, "referral")
        ));
    }

    #[test]
    fn test_starts_and_ends_with() {
        let lead = lead();
        assert!(evaluate_condition(
            &lead,
            &cond(LeadField::Email, FilterOperator::StartsWith, "JOHN@")
        ));
        assert!(evaluate_condition(
            &lead,
            &cond(LeadField::Email, FilterOperator::EndsWith, ".com")
        ));
        assert!(!evaluate_condition(
            &lead,
            &cond(LeadField::Email, FilterOperator::EndsWith, ".org")
        ));
    }

    #[test]
    fn test_absent_field_is_false() {
        let lead = lead();
        assert!(!evaluate_condition(
            &lead,
            &cond(LeadField::Phone, FilterOperator::Contains, "555")
        ));
        assert!(!evaluate_condition(
            &lead,
            &cond(LeadField::Notes, FilterOperator::Equals, "x")
        ));
    }

    #[test]
    fn test_status_matches_by_name() {
        let mut lead = lead();
        lead.status = LeadStatus::Qualified;
        assert!(evaluate_condition(
            &lead,
            &cond(LeadField::Status, FilterOperator::Equals, "Qualified")
        ));
    }

    #[test]
    fn test_date_comparisons_use_instants() {
        let lead = lead();
        assert!(evaluate_condition(
            &lead,
            &cond(LeadField::CreatedAt, FilterOperator::GreaterThan, "2025-04-09")
        ));
        assert!(!evaluate_condition(
            &lead,
            &cond(LeadField::CreatedAt, FilterOperator::GreaterThan, "2025-04-11")
        ));
        assert!(evaluate_condition(
            &lead,
            &cond(LeadField::CreatedAt, FilterOperator::LessThan, "2025-04-10T10:00:01Z")
        ));
        assert!(!evaluate_condition(
            &lead,
            &cond(LeadField::CreatedAt, FilterOperator::LessThan, "2025-04-10T10:00:00Z")
        ));
    }

    #[test]
    fn test_date_comparison_keeps_subsecond_precision() {
        let mut lead = lead();
        lead.created_at = "2025-04-10T10:00:00.700Z".parse().unwrap();
        assert!(!evaluate_condition(
            &lead,
            &cond(LeadField::CreatedAt, FilterOperator::LessThan, "2025-04-10T10:00:00.500Z")
        ));
        assert!(evaluate_condition(
            &lead,
            &cond(LeadField::CreatedAt, FilterOperator::GreaterThan, "2025-04-10T10:00:00.500Z")
        ));
        assert!(evaluate_condition(
            &lead,
            &cond(LeadField::CreatedAt, FilterOperator::LessThan, "2025-04-10T10:00:00.900Z")
        ));
    }

    #[test]
    fn test_date_comparison_on_non_dates_is_false() {
        let lead = lead();
        assert!(!evaluate_condition(
            &lead,
            &cond(LeadField::Name, FilterOperator::GreaterThan, "2020-01-01")
        ));
        assert!(!evaluate_condition(
            &lead,
            &cond(LeadField::Name, FilterOperator::LessThan, "2030-01-01")
        ));
        assert!(!evaluate_condition(
            &lead,
            &cond(LeadField::CreatedAt, FilterOperator::LessThan, "next week")
        ));
    }

    #[test]
    fn test_parse_date_spellings() {
        let midnight: DateTime<Utc> = "2025-04-10T00:00:00Z".parse().unwrap();
        assert_eq!(parse_date("2025-04-10"), Some(midnight));
        assert_eq!(parse_date("4/10/2025"), Some(midnight));
        assert_eq!(parse_date("2025-04-10T00:00"), Some(midnight));
        assert_eq!(parse_date("2025-04-10T02:00:00+02:00"), Some(midnight));
        assert_eq!(parse_date("John Smith"), None);
        assert_eq!(parse_date(""), None);
    }
}
