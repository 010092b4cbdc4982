use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::view::Creator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[default]
    Note,
    Call,
    Email,
    Meeting,
    Task,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        Self::Note,
        Self::Call,
        Self::Email,
        Self::Meeting,
        Self::Task,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Call => "call",
            Self::Email => "email",
            Self::Meeting => "meeting",
            Self::Task => "task",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "call" => Self::Call,
            "email" => Self::Email,
            "meeting" => Self::Meeting,
            "task" => Self::Task,
            _ => Self::Note,
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timeline entry recorded against a lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadActivity {
    pub id: Uuid,
    pub lead_id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub content: String,
    pub created_by: Creator,
    pub created_at: DateTime<Utc>,
}

impl LeadActivity {
    pub fn new(
        lead_id: String,
        activity_type: ActivityType,
        content: String,
        created_by: Creator,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            lead_id,
            activity_type,
            content,
            created_by,
            created_at: Utc::now(),
        }
    }
}
