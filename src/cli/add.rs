use anyhow::{anyhow, Result};

use crate::cli::ui::{non_empty, prompt_field_optional, select, FormResult};
use crate::error::LeadError;
use crate::models::{LeadStatus, NewLead};
use crate::session::Session;

/// Source choices offered by the add form.
pub const LEAD_SOURCES: [&str; 8] = [
    "Website",
    "Referral",
    "LinkedIn",
    "Facebook Ad",
    "Google Ad",
    "Conference",
    "Email Campaign",
    "Other",
];

/// Values collected from flags or prompts
#[derive(Debug, Default, Clone)]
pub struct AddInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl AddInput {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.company.is_none()
            && self.source.is_none()
            && self.status.is_none()
            && self.notes.is_none()
    }

    fn into_new_lead(self) -> Result<NewLead> {
        let status = match self.status.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => {
                LeadStatus::parse(s).ok_or_else(|| anyhow!("Unknown status: {}", s))?
            }
            _ => LeadStatus::New,
        };
        Ok(NewLead {
            name: self.name.unwrap_or_default().trim().to_string(),
            email: self.email.unwrap_or_default().trim().to_string(),
            company: self.company.and_then(non_empty),
            phone: self.phone.and_then(non_empty),
            source: self.source.unwrap_or_default().trim().to_string(),
            status,
            notes: self.notes.and_then(non_empty),
        })
    }
}

/// Execute the add command. With no flags the form is interactive.
pub fn run_add(session: &mut Session, input: AddInput) -> Result<()> {
    let input = if input.is_empty() {
        match interactive_mode()? {
            Some(input) => input,
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        }
    } else {
        input
    };

    let new_lead = input.into_new_lead()?;
    match session.add_lead(new_lead) {
        Ok(lead) => {
            println!("\nCreated: {} (id {})", lead.name, lead.id);
            Ok(())
        }
        Err(LeadError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("  {}: {}", field, message);
            }
            Err(anyhow!("Lead not added."))
        }
        Err(e) => Err(e.into()),
    }
}

fn interactive_mode() -> Result<Option<AddInput>> {
    let mut input = AddInput::default();

    for (label, slot) in [
        ("name", &mut input.name),
        ("email", &mut input.email),
        ("phone", &mut input.phone),
        ("company", &mut input.company),
    ] {
        match prompt_field_optional(label)? {
            FormResult::Value(v) => *slot = non_empty(v),
            FormResult::Cancelled => return Ok(None),
        }
    }

    let Some(idx) = select("source", &LEAD_SOURCES)? else {
        return Ok(None);
    };
    input.source = Some(LEAD_SOURCES[idx].to_string());

    let labels: Vec<String> = LeadStatus::ALL.iter().map(|s| s.label()).collect();
    let Some(idx) = select("status", &labels)? else {
        return Ok(None);
    };
    input.status = Some(LeadStatus::ALL[idx].as_str().to_string());

    match prompt_field_optional("notes")? {
        FormResult::Value(v) => input.notes = non_empty(v),
        FormResult::Cancelled => return Ok(None),
    }

    Ok(Some(input))
}
