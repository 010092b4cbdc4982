use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filter::{FilterCondition, FilterOperator, LeadField};
use super::lead::LeadStatus;
use crate::error::LeadError;

/// Comparisons allowed inside a segment's custom field rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextOperator {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
}

impl TextOperator {
    pub fn as_filter_operator(&self) -> FilterOperator {
        match self {
            Self::Equals => FilterOperator::Equals,
            Self::Contains => FilterOperator::Contains,
            Self::StartsWith => FilterOperator::StartsWith,
            Self::EndsWith => FilterOperator::EndsWith,
        }
    }
}

impl TryFrom<FilterOperator> for TextOperator {
    type Error = LeadError;

    fn try_from(op: FilterOperator) -> Result<Self, Self::Error> {
        match op {
            FilterOperator::Equals => Ok(Self::Equals),
            FilterOperator::Contains => Ok(Self::Contains),
            FilterOperator::StartsWith => Ok(Self::StartsWith),
            FilterOperator::EndsWith => Ok(Self::EndsWith),
            other => Err(LeadError::InvalidValue {
                kind: "segment operator",
                value: other.as_str().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldRule {
    pub field: LeadField,
    pub operator: TextOperator,
    pub value: String,
}

impl CustomFieldRule {
    pub fn as_condition(&self) -> FilterCondition {
        FilterCondition::new(self.field, self.operator.as_filter_operator(), self.value.clone())
    }
}

/// Membership rules for a segment. Empty sets and absent bounds do not restrict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SegmentCriteria {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<LeadStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldRule>,
}

impl SegmentCriteria {
    /// Add the status if absent, remove it if present.
    pub fn toggle_status(&mut self, status: LeadStatus) {
        if let Some(pos) = self.status.iter().position(|s| *s == status) {
            self.status.remove(pos);
        } else {
            self.status.push(status);
        }
    }

    /// Add the source if absent, remove it if present. Blank sources are ignored.
    pub fn toggle_source(&mut self, source: &str) {
        if source.trim().is_empty() {
            return;
        }
        if let Some(pos) = self.source.iter().position(|s| s == source) {
            self.source.remove(pos);
        } else {
            self.source.push(source.to_string());
        }
    }

    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.status.is_empty() {
            let s: Vec<&str> = self.status.iter().map(|s| s.as_str()).collect();
            parts.push(format!("status in [{}]", s.join(", ")));
        }
        if !self.source.is_empty() {
            parts.push(format!("source in [{}]", self.source.join(", ")));
        }
        if let Some(min) = self.min_created_at {
            parts.push(format!("created >= {}", min.format("%Y-%m-%d")));
        }
        if let Some(max) = self.max_created_at {
            parts.push(format!("created <= {}", max.format("%Y-%m-%d")));
        }
        for rule in &self.custom_fields {
            parts.push(rule.as_condition().to_string());
        }
        if parts.is_empty() {
            "all leads".to_string()
        } else {
            parts.join("; ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub criteria: SegmentCriteria,
    /// Cached member count, refreshed by the store after every change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Segment {
    pub fn new(name: String, description: String, criteria: SegmentCriteria) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name,
            description,
            criteria,
            count: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial edit of a segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub criteria: Option<SegmentCriteria>,
}
