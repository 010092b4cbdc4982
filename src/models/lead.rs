use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Pipeline stage of a lead. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Disqualified,
    Customer,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        Self::New,
        Self::Contacted,
        Self::Qualified,
        Self::Disqualified,
        Self::Customer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Disqualified => "disqualified",
            Self::Customer => "customer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Some(Self::New),
            "contacted" => Some(Self::Contacted),
            "qualified" => Some(Self::Qualified),
            "disqualified" => Some(Self::Disqualified),
            "customer" => Some(Self::Customer),
            _ => None,
        }
    }

    /// Capitalized label for menus ("Qualified").
    pub fn label(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LeadStatus {
    type Err = crate::error::LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::error::LeadError::InvalidValue {
            kind: "status",
            value: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub source: String,
    pub status: LeadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Create a lead stamped with the current time. The store assigns the id.
    pub fn new(name: String, email: String, source: String) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name,
            email,
            company: None,
            phone: None,
            source,
            status: LeadStatus::default(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump `updated_at`, never letting it fall behind `created_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}

/// Canonical text form of a timestamp ("2025-04-10T10:00:00Z").
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Input collected by the add form before the store assigns identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub source: String,
    pub status: LeadStatus,
    pub notes: Option<String>,
}

impl NewLead {
    pub fn into_lead(self) -> Lead {
        let mut lead = Lead::new(self.name, self.email, self.source);
        lead.company = self.company;
        lead.phone = self.phone;
        lead.status = self.status;
        lead.notes = self.notes;
        lead
    }
}

/// Partial edit applied from the lead detail screen. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub source: Option<String>,
    pub status: Option<LeadStatus>,
    pub notes: Option<Option<String>>,
}

impl LeadUpdate {
    pub fn apply(self, lead: &mut Lead) {
        if let Some(name) = self.name {
            lead.name = name;
        }
        if let Some(email) = self.email {
            lead.email = email;
        }
        if let Some(company) = self.company {
            lead.company = company;
        }
        if let Some(phone) = self.phone {
            lead.phone = phone;
        }
        if let Some(source) = self.source {
            lead.source = source;
        }
        if let Some(status) = self.status {
            lead.status = status;
        }
        if let Some(notes) = self.notes {
            lead.notes = notes;
        }
        lead.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(LeadStatus::parse("Qualified"), Some(LeadStatus::Qualified));
        assert_eq!(LeadStatus::parse(" customer "), Some(LeadStatus::Customer));
        assert_eq!(LeadStatus::parse("won"), None);
        assert!("won".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn test_status_label_capitalizes() {
        assert_eq!(LeadStatus::Disqualified.label(), "Disqualified");
    }

    #[test]
    fn test_new_lead_timestamps_match() {
        let lead = Lead::new("A".into(), "a@example.com".into(), "Website".into());
        assert_eq!(lead.created_at, lead.updated_at);
        assert_eq!(lead.status, LeadStatus::New);
    }

    #[test]
    fn test_update_touches_timestamp() {
        let mut lead = Lead::new("A".into(), "a@example.com".into(), "Website".into());
        lead.created_at = "2025-04-01T00:00:00Z".parse().unwrap();
        lead.updated_at = lead.created_at;

        LeadUpdate {
            status: Some(LeadStatus::Contacted),
            notes: Some(Some("called".to_string())),
            ..Default::default()
        }
        .apply(&mut lead);

        assert_eq!(lead.status, LeadStatus::Contacted);
        assert_eq!(lead.notes.as_deref(), Some("called"));
        assert!(lead.updated_at > lead.created_at);
    }

    #[test]
    fn test_deserializes_camel_case_json() {
        let json = r#"{
            "id": "1",
            "name": "John Smith",
            "email": "john@example.com",
            "company": "Acme Corp",
            "source": "Website",
            "status": "new",
            "createdAt": "2025-04-10T10:00:00Z",
            "updatedAt": "2025-04-10T10:00:00Z"
        }"#;
        let lead: Lead = serde_json::from_str(json).unwrap();
        assert_eq!(lead.company.as_deref(), Some("Acme Corp"));
        assert!(lead.phone.is_none());
        assert_eq!(format_timestamp(&lead.created_at), "2025-04-10T10:00:00Z");
    }
}
