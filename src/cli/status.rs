use anyhow::{anyhow, Result};

use crate::cli::list::print_lead_table;
use crate::cli::ui::warning;
use crate::models::LeadStatus;
use crate::session::Session;

/// Execute the status command: set one status on every listed lead.
pub fn run_status(session: &mut Session, ids: &[String], status: &str) -> Result<()> {
    let status = LeadStatus::parse(status).ok_or_else(|| {
        let valid: Vec<&str> = LeadStatus::ALL.iter().map(|s| s.as_str()).collect();
        anyhow!("Unknown status '{}'. Use one of: {}", status, valid.join(", "))
    })?;
    if ids.is_empty() {
        return Err(anyhow!("No lead ids given."));
    }

    let missing: Vec<&str> = ids
        .iter()
        .filter(|id| session.store().get_lead(id).is_none())
        .map(String::as_str)
        .collect();
    for id in &missing {
        warning(&format!("no lead with id {}", id));
    }

    session.clear_selection();
    for id in ids {
        if !session.is_selected(id) {
            session.toggle_selection(id);
        }
    }
    let updated = session.bulk_update_status(status);
    println!("Updated {} lead(s) to {}.\n", updated, status.label());

    let rows = session.selected_leads();
    print_lead_table(&rows, &session.query, None);
    session.clear_selection();

    if updated == 0 {
        return Err(anyhow!("No leads updated."));
    }
    Ok(())
}
