//! Declarative filter definitions: which lead attribute, which comparison, which value.
//!
//! Field lookup goes through [`LeadField`] so that every attribute a filter can
//! name has a typed accessor instead of a by-name property lookup.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::lead::{format_timestamp, Lead};
use crate::error::LeadError;

/// A lead attribute that filters, sorting and segments can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeadField {
    Id,
    Name,
    Email,
    Company,
    Phone,
    Source,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}

impl LeadField {
    pub const ALL: [LeadField; 10] = [
        Self::Id,
        Self::Name,
        Self::Email,
        Self::Company,
        Self::Phone,
        Self::Source,
        Self::Status,
        Self::Notes,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Company => "company",
            Self::Phone => "phone",
            Self::Source => "source",
            Self::Status => "status",
            Self::Notes => "notes",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Accepts camelCase, snake_case and kebab-case spellings, plus the
    /// short forms `created` / `updated` used by the list command.
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "company" => Some(Self::Company),
            "phone" => Some(Self::Phone),
            "source" => Some(Self::Source),
            "status" => Some(Self::Status),
            "notes" => Some(Self::Notes),
            "createdat" | "created" => Some(Self::CreatedAt),
            "updatedat" | "updated" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Company => "Company",
            Self::Phone => "Phone",
            Self::Source => "Source",
            Self::Status => "Status",
            Self::Notes => "Notes",
            Self::CreatedAt => "Created Date",
            Self::UpdatedAt => "Updated Date",
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Self::CreatedAt | Self::UpdatedAt)
    }

    /// Timestamp value for the date attributes. Other fields have none.
    pub fn timestamp(&self, lead: &Lead) -> Option<DateTime<Utc>> {
        match self {
            Self::CreatedAt => Some(lead.created_at),
            Self::UpdatedAt => Some(lead.updated_at),
            _ => None,
        }
    }

    /// Stringified value of this attribute on `lead`, or `None` when the lead
    /// does not carry it.
    pub fn text<'a>(&self, lead: &'a Lead) -> Option<Cow<'a, str>> {
        match self {
            Self::Id => Some(Cow::Borrowed(lead.id.as_str())),
            Self::Name => Some(Cow::Borrowed(lead.name.as_str())),
            Self::Email => Some(Cow::Borrowed(lead.email.as_str())),
            Self::Company => lead.company.as_deref().map(Cow::Borrowed),
            Self::Phone => lead.phone.as_deref().map(Cow::Borrowed),
            Self::Source => Some(Cow::Borrowed(lead.source.as_str())),
            Self::Status => Some(Cow::Borrowed(lead.status.as_str())),
            Self::Notes => lead.notes.as_deref().map(Cow::Borrowed),
            Self::CreatedAt => Some(Cow::Owned(format_timestamp(&lead.created_at))),
            Self::UpdatedAt => Some(Cow::Owned(format_timestamp(&lead.updated_at))),
        }
    }
}

impl std::fmt::Display for LeadField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LeadField {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LeadError::InvalidValue {
            kind: "field",
            value: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    #[default]
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 6] = [
        Self::Equals,
        Self::Contains,
        Self::StartsWith,
        Self::EndsWith,
        Self::GreaterThan,
        Self::LessThan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Contains => "contains",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "equals" | "eq" | "=" => Some(Self::Equals),
            "contains" => Some(Self::Contains),
            "startswith" => Some(Self::StartsWith),
            "endswith" => Some(Self::EndsWith),
            "greaterthan" | "gt" | ">" => Some(Self::GreaterThan),
            "lessthan" | "lt" | "<" => Some(Self::LessThan),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::Contains => "Contains",
            Self::StartsWith => "Starts with",
            Self::EndsWith => "Ends with",
            Self::GreaterThan => "Greater than",
            Self::LessThan => "Less than",
        }
    }

    /// Operators that compare values as dates.
    pub fn is_ordering(&self) -> bool {
        matches!(self, Self::GreaterThan | Self::LessThan)
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FilterOperator {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LeadError::InvalidValue {
            kind: "operator",
            value: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// `all` / `and` combine with AND, `any` / `or` with OR.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "and" | "all" => Some(Self::And),
            "or" | "any" => Some(Self::Or),
            _ => None,
        }
    }
}

impl std::str::FromStr for LogicalOperator {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LeadError::InvalidValue {
            kind: "logical operator",
            value: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    #[serde(default)]
    pub id: String,
    /// `None` while the user has not picked a field yet; serialized as `""`.
    #[serde(default, with = "field_or_empty")]
    pub field: Option<LeadField>,
    #[serde(default)]
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: String,
}

impl FilterCondition {
    pub fn new(field: LeadField, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            field: Some(field),
            operator,
            value: value.into(),
        }
    }

    /// An unset field or empty value makes the condition a no-op.
    pub fn is_blank(&self) -> bool {
        self.field.is_none() || self.value.is_empty()
    }
}

impl std::fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field = self.field.map(|f| f.as_str()).unwrap_or("(any)");
        write!(f, "{} {} \"{}\"", field, self.operator, self.value)
    }
}

/// Parses `field:operator:value`. The value may itself contain colons.
impl std::str::FromStr for FilterCondition {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (field, operator, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(f), Some(o), Some(v)) => (f, o, v),
            _ => {
                return Err(LeadError::InvalidValue {
                    kind: "condition",
                    value: s.to_string(),
                })
            }
        };

        let field = if field.trim().is_empty() {
            None
        } else {
            Some(field.parse::<LeadField>()?)
        };

        Ok(Self {
            id: String::new(),
            field,
            operator: operator.parse()?,
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    #[serde(default)]
    pub id: String,
    pub logical_operator: LogicalOperator,
    pub conditions: Vec<FilterCondition>,
}

impl FilterGroup {
    pub fn new(logical_operator: LogicalOperator, conditions: Vec<FilterCondition>) -> Self {
        let conditions = conditions
            .into_iter()
            .enumerate()
            .map(|(i, mut c)| {
                if c.id.is_empty() {
                    c.id = (i + 1).to_string();
                }
                c
            })
            .collect();
        Self {
            id: "main".to_string(),
            logical_operator,
            conditions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl std::fmt::Display for FilterGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joiner = match self.logical_operator {
            LogicalOperator::And => " AND ",
            LogicalOperator::Or => " OR ",
        };
        let parts: Vec<String> = self.conditions.iter().map(|c| c.to_string()).collect();
        f.write_str(&parts.join(joiner))
    }
}

mod field_or_empty {
    use super::*;

    pub fn serialize<S: Serializer>(field: &Option<LeadField>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(field.map(|f| f.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<LeadField>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => LeadField::parse(name)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown lead field: {}", name))),
        }
    }
}
