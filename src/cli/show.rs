use anyhow::{anyhow, Result};

use crate::cli::display::print_lead_detail;
use crate::cli::ui::{
    clear_screen, confirm, non_empty, prompt_field, select, status, text_input, wait_for_continue,
    FormResult,
};
use crate::filter::matches_search;
use crate::models::{ActivityType, Lead, LeadStatus, LeadUpdate};
use crate::session::Session;

/// Resolve an identifier to leads: an exact id wins, otherwise a name match.
pub fn find_leads<'a>(session: &'a Session, identifier: &str) -> Vec<&'a Lead> {
    if let Some(lead) = session.store().get_lead(identifier) {
        return vec![lead];
    }
    session
        .store()
        .list_leads()
        .iter()
        .filter(|l| l.name.to_lowercase().contains(&identifier.to_lowercase()))
        .collect()
}

/// Execute the show command
pub fn run_show(session: &Session, identifier: &str) -> Result<()> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(anyhow!("Identifier cannot be empty."));
    }

    let matches = find_leads(session, identifier);
    match matches.len() {
        0 => println!("No matches."),
        1 => {
            let lead = matches[0];
            print_lead_detail(lead, &session.store().activities_for(&lead.id));
        }
        _ => {
            println!("{} matches:", matches.len());
            for lead in matches {
                println!("  {:<4} {}  <{}>", lead.id, lead.name, lead.email);
            }
        }
    }
    Ok(())
}

// ==================== INTERACTIVE ====================

/// Pick a lead by id or name, searching across the usual table fields.
pub fn pick_lead(session: &Session, prompt: &str) -> Result<Option<String>> {
    let Some(term) = text_input(prompt, None)? else {
        return Ok(None);
    };
    let term = term.trim();
    if term.is_empty() {
        return Ok(None);
    }

    let mut candidates = find_leads(session, term);
    if candidates.is_empty() {
        candidates = session
            .table_rows()
            .into_iter()
            .filter(|l| matches_search(l, term))
            .collect();
    }

    match candidates.len() {
        0 => {
            println!("No matches.");
            Ok(None)
        }
        1 => Ok(Some(candidates[0].id.clone())),
        _ => {
            let labels: Vec<String> = candidates
                .iter()
                .map(|l| format!("{} <{}>", l.name, l.email))
                .collect();
            Ok(select("lead", &labels)?.map(|i| candidates[i].id.clone()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeadAction {
    Status,
    Edit,
    Activity,
    Select,
    Delete,
    Back,
}

impl LeadAction {
    const ALL: [LeadAction; 6] = [
        Self::Status,
        Self::Edit,
        Self::Activity,
        Self::Select,
        Self::Delete,
        Self::Back,
    ];

    fn label(self, selected: bool) -> &'static str {
        match self {
            Self::Status => "Change status",
            Self::Edit => "Edit",
            Self::Activity => "Add activity",
            Self::Select if selected => "Unselect",
            Self::Select => "Select",
            Self::Delete => "Delete",
            Self::Back => "Back",
        }
    }
}

/// Lead detail screen with status, edit, activity and delete actions.
pub fn lead_screen(session: &mut Session, id: &str) -> Result<()> {
    loop {
        let _ = clear_screen();
        let Some(lead) = session.store().get_lead(id) else {
            return Ok(());
        };
        print_lead_detail(lead, &session.store().activities_for(id));
        println!();

        let selected = session.is_selected(id);
        let labels: Vec<&str> = LeadAction::ALL.iter().map(|a| a.label(selected)).collect();
        let Some(idx) = select("action", &labels)? else {
            return Ok(());
        };

        let result = match LeadAction::ALL[idx] {
            LeadAction::Status => change_status(session, id),
            LeadAction::Edit => edit_lead(session, id),
            LeadAction::Activity => add_activity(session, id),
            LeadAction::Select => {
                session.toggle_selection(id);
                Ok(())
            }
            LeadAction::Delete => {
                if confirm("Delete this lead?")? {
                    let removed = session.delete_lead(id)?;
                    status(&format!("Deleted {}.", removed.name));
                    return Ok(());
                }
                Ok(())
            }
            LeadAction::Back => return Ok(()),
        };

        if let Err(e) = result {
            eprintln!("\n{}", e);
            wait_for_continue();
        }
    }
}

fn change_status(session: &mut Session, id: &str) -> Result<()> {
    let labels: Vec<String> = LeadStatus::ALL.iter().map(|s| s.label()).collect();
    if let Some(idx) = select("status", &labels)? {
        session.update_status(id, LeadStatus::ALL[idx])?;
    }
    Ok(())
}

fn add_activity(session: &mut Session, id: &str) -> Result<()> {
    let labels: Vec<&str> = ActivityType::ALL.iter().map(|t| t.as_str()).collect();
    let Some(idx) = select("type", &labels)? else {
        return Ok(());
    };
    let content = match prompt_field("content", None)? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(()),
    };
    session.add_activity(id, ActivityType::ALL[idx], &content)?;
    Ok(())
}

fn edit_lead(session: &mut Session, id: &str) -> Result<()> {
    let lead = session
        .store()
        .get_lead(id)
        .cloned()
        .ok_or_else(|| anyhow!("Lead not found: {}", id))?;

    let prompts = [
        ("name", Some(lead.name.as_str())),
        ("email", Some(lead.email.as_str())),
        ("company", lead.company.as_deref()),
        ("phone", lead.phone.as_deref()),
        ("source", Some(lead.source.as_str())),
        ("notes", lead.notes.as_deref()),
    ];
    let mut answers = Vec::with_capacity(prompts.len());
    for (label, current) in prompts {
        match prompt_field(label, current)? {
            FormResult::Value(v) => answers.push(v),
            FormResult::Cancelled => {
                status("Cancelled.");
                return Ok(());
            }
        }
    }
    let [name, email, company, phone, source, notes]: [String; 6] = answers
        .try_into()
        .map_err(|_| anyhow!("Incomplete form"))?;

    let update = LeadUpdate {
        name: Some(name),
        email: Some(email),
        company: Some(non_empty(company)),
        phone: Some(non_empty(phone)),
        source: Some(source),
        status: None,
        notes: Some(non_empty(notes)),
    };
    session.update_lead(id, update)?;
    status("Saved.");
    Ok(())
}
