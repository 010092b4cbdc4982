//! Demo records used when no workspace file is given.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::Workspace;
use crate::models::{
    ActivityType, Creator, FilterCondition, FilterGroup, FilterOperator, Lead, LeadActivity,
    LeadField, LeadStatus, LogicalOperator, SavedView, Segment, SegmentCriteria,
};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn lead(
    id: &str,
    name: &str,
    email: &str,
    company: Option<&str>,
    phone: Option<&str>,
    source: &str,
    status: LeadStatus,
    notes: Option<&str>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Lead {
    Lead {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        company: company.map(str::to_string),
        phone: phone.map(str::to_string),
        source: source.to_string(),
        status,
        notes: notes.map(str::to_string),
        created_at,
        updated_at,
    }
}

fn admin() -> Creator {
    Creator::new("user1", "Admin User")
}

/// Team members leads can be assigned to.
pub fn team_members() -> Vec<Creator> {
    vec![
        Creator::new("user1", "Admin User"),
        Creator::new("user2", "Sales Rep"),
        Creator::new("user3", "Marketing Manager"),
    ]
}

pub fn demo_workspace() -> Workspace {
    let leads = vec![
        lead(
            "1",
            "John Smith",
            "john@example.com",
            Some("Acme Corp"),
            None,
            "Website",
            LeadStatus::New,
            None,
            at(2025, 4, 10, 10, 0),
            at(2025, 4, 10, 10, 0),
        ),
        lead(
            "2",
            "Jane Doe",
            "jane@example.com",
            Some("Tech Solutions"),
            None,
            "Referral",
            LeadStatus::Contacted,
            Some("Had an initial call, interested in premium plan"),
            at(2025, 4, 9, 14, 30),
            at(2025, 4, 9, 15, 45),
        ),
        lead(
            "3",
            "Alex Johnson",
            "alex@example.com",
            None,
            Some("555-123-4567"),
            "LinkedIn",
            LeadStatus::Qualified,
            None,
            at(2025, 4, 8, 9, 15),
            at(2025, 4, 8, 16, 20),
        ),
        lead(
            "4",
            "Sarah Williams",
            "sarah@example.com",
            Some("Design Studio"),
            Some("555-987-6543"),
            "Facebook Ad",
            LeadStatus::Disqualified,
            Some("Budget constraints, maybe revisit next quarter"),
            at(2025, 4, 7, 11, 20),
            at(2025, 4, 7, 13, 10),
        ),
        lead(
            "5",
            "Michael Brown",
            "michael@example.com",
            Some("Global Enterprises"),
            None,
            "Conference",
            LeadStatus::Customer,
            Some("Converted to customer on Pro plan"),
            at(2025, 4, 6, 8, 45),
            at(2025, 4, 6, 17, 30),
        ),
    ];

    let segments = vec![
        Segment {
            id: "seg1".to_string(),
            name: "New Leads".to_string(),
            description: "All new leads that need initial contact".to_string(),
            criteria: SegmentCriteria {
                status: vec![LeadStatus::New],
                ..Default::default()
            },
            count: None,
            created_at: at(2025, 4, 5, 10, 0),
            updated_at: at(2025, 4, 5, 10, 0),
        },
        Segment {
            id: "seg2".to_string(),
            name: "Website Leads".to_string(),
            description: "Leads that came from the website".to_string(),
            criteria: SegmentCriteria {
                source: vec!["Website".to_string()],
                ..Default::default()
            },
            count: None,
            created_at: at(2025, 4, 4, 10, 0),
            updated_at: at(2025, 4, 4, 10, 0),
        },
    ];

    let mut high_priority = FilterGroup::new(
        LogicalOperator::And,
        vec![
            FilterCondition::new(LeadField::Status, FilterOperator::Equals, "qualified"),
            FilterCondition::new(LeadField::Source, FilterOperator::Equals, "LinkedIn"),
        ],
    );
    high_priority.id = "filter1".to_string();

    let views = vec![SavedView {
        id: "view1".to_string(),
        name: "High Priority".to_string(),
        description: Some("Qualified leads from LinkedIn".to_string()),
        filter: high_priority,
        is_default: false,
        created_at: at(2025, 4, 3, 10, 0),
        created_by: Some(admin()),
    }];

    let activity = |lead_id: &str, kind: ActivityType, content: &str, when: DateTime<Utc>| {
        LeadActivity {
            id: Uuid::new_v4(),
            lead_id: lead_id.to_string(),
            activity_type: kind,
            content: content.to_string(),
            created_by: admin(),
            created_at: when,
        }
    };

    let activities = vec![
        activity("1", ActivityType::Note, "Initial contact made via email", at(2025, 4, 12, 9, 30)),
        activity("1", ActivityType::Email, "Sent product information brochure", at(2025, 4, 13, 14, 0)),
        activity(
            "2",
            ActivityType::Call,
            "Had a 15-minute intro call. They're interested in premium plan.",
            at(2025, 4, 9, 15, 30),
        ),
        activity("3", ActivityType::Meeting, "Scheduled demo for next week", at(2025, 4, 10, 11, 0)),
    ];

    Workspace {
        leads,
        segments,
        views,
        activities,
    }
}
