use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filter::FilterGroup;

/// Team member reference carried on views and activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub id: String,
    pub name: String,
}

impl Creator {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedView {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub filter: FilterGroup,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Creator>,
}

impl SavedView {
    pub fn new(name: String, filter: FilterGroup, created_by: Creator) -> Self {
        Self {
            id: String::new(),
            name,
            description: None,
            filter,
            is_default: false,
            created_at: Utc::now(),
            created_by: Some(created_by),
        }
    }
}
