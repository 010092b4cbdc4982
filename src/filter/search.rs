//! Free-text search and column sorting for the lead table.

use std::cmp::Ordering;

use crate::models::{Lead, LeadField};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Arrow shown next to the sorted column header.
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Search, sort field and direction for one render of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub search: String,
    pub sort_field: LeadField,
    pub order: SortOrder,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_field: LeadField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

impl TableQuery {
    /// Clicking the sorted column flips direction; clicking another column
    /// sorts it ascending.
    pub fn sort_by(&mut self, field: LeadField) {
        if field == self.sort_field {
            self.order = self.order.toggled();
        } else {
            self.sort_field = field;
            self.order = SortOrder::Asc;
        }
    }
}

const SEARCH_FIELDS: [LeadField; 6] = [
    LeadField::Name,
    LeadField::Email,
    LeadField::Company,
    LeadField::Source,
    LeadField::Status,
    LeadField::Notes,
];

/// Case-insensitive substring hit on any searchable field. Empty terms match.
pub fn matches_search(lead: &Lead, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    SEARCH_FIELDS.iter().any(|field| {
        field
            .text(lead)
            .map_or(false, |value| value.to_lowercase().contains(&term))
    })
}

/// Ascending comparison of two leads on `field`.
///
/// Dates compare by instant. Everything else compares as text, with a missing
/// optional value ordering before any present one.
pub fn compare_leads(a: &Lead, b: &Lead, field: LeadField) -> Ordering {
    match field {
        LeadField::CreatedAt => a.created_at.cmp(&b.created_at),
        LeadField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        _ => {
            let left = field.text(a);
            let right = field.text(b);
            left.as_deref().cmp(&right.as_deref())
        }
    }
}

/// Filter by the search term, then stable-sort by the query's column.
pub fn search_and_sort<'a, I>(leads: I, query: &TableQuery) -> Vec<&'a Lead>
where
    I: IntoIterator<Item = &'a Lead>,
{
    let mut rows: Vec<&Lead> = leads
        .into_iter()
        .filter(|lead| matches_search(lead, &query.search))
        .collect();

    rows.sort_by(|a, b| {
        let ord = compare_leads(a, b, query.sort_field);
        match query.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadStatus;

    fn lead(id: &str, name: &str, created: &str) -> Lead {
        let mut lead = Lead::new(
            name.to_string(),
            format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            "Website".to_string(),
        );
        lead.id = id.to_string();
        lead.created_at = created.parse().unwrap();
        lead.updated_at = lead.created_at;
        lead
    }

    fn ids(rows: &[&Lead]) -> Vec<String> {
        rows.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_created_desc_puts_newest_first() {
        let leads = vec![
            lead("5", "Michael Brown", "2025-04-06T08:45:00Z"),
            lead("1", "John Smith", "2025-04-10T10:00:00Z"),
        ];
        let rows = search_and_sort(&leads, &TableQuery::default());
        assert_eq!(ids(&rows), vec!["1", "5"]);
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let leads = vec![
            lead("1", "John Smith", "2025-04-10T10:00:00Z"),
            lead("2", "Alex Johnson", "2025-04-08T09:15:00Z"),
            lead("3", "Jane Doe", "2025-04-09T14:30:00Z"),
        ];
        let query = TableQuery {
            sort_field: LeadField::Name,
            order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(ids(&search_and_sort(&leads, &query)), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_equal_keys_keep_input_order_in_both_directions() {
        let mut leads = vec![
            lead("a", "Same", "2025-04-10T10:00:00Z"),
            lead("b", "Same", "2025-04-10T10:00:00Z"),
            lead("c", "Same", "2025-04-10T10:00:00Z"),
        ];
        for l in &mut leads {
            l.status = LeadStatus::Contacted;
        }

        let mut query = TableQuery {
            sort_field: LeadField::Status,
            order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(ids(&search_and_sort(&leads, &query)), vec!["a", "b", "c"]);
        query.order = SortOrder::Desc;
        assert_eq!(ids(&search_and_sort(&leads, &query)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_optional_values_sort_first_ascending() {
        let mut with_company = lead("1", "A", "2025-04-10T10:00:00Z");
        with_company.company = Some("Acme".to_string());
        let without_company = lead("2", "B", "2025-04-10T10:00:00Z");
        let leads = vec![with_company, without_company];

        let query = TableQuery {
            sort_field: LeadField::Company,
            order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(ids(&search_and_sort(&leads, &query)), vec!["2", "1"]);
    }

    #[test]
    fn test_search_hits_any_field() {
        let mut jane = lead("2", "Jane Doe", "2025-04-09T14:30:00Z");
        jane.notes = Some("Interested in PREMIUM plan".to_string());
        let john = lead("1", "John Smith", "2025-04-10T10:00:00Z");
        let leads = vec![john, jane];

        let query = TableQuery {
            search: "premium".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&search_and_sort(&leads, &query)), vec!["2"]);

        let query = TableQuery {
            search: "WEBSITE".to_string(),
            ..Default::default()
        };
        assert_eq!(search_and_sort(&leads, &query).len(), 2);
    }

    #[test]
    fn test_search_ignores_phone() {
        let mut lead = lead("3", "Alex Johnson", "2025-04-08T09:15:00Z");
        lead.phone = Some("555-123-4567".to_string());
        assert!(!matches_search(&lead, "555"));
    }

    #[test]
    fn test_sort_by_toggles_same_column() {
        let mut query = TableQuery::default();
        query.sort_by(LeadField::CreatedAt);
        assert_eq!(query.order, SortOrder::Asc);
        query.sort_by(LeadField::Name);
        assert_eq!(query.sort_field, LeadField::Name);
        assert_eq!(query.order, SortOrder::Asc);
        query.sort_by(LeadField::Name);
        assert_eq!(query.order, SortOrder::Desc);
    }
}
