use anyhow::Result;

use crate::cli::list::print_lead_table;
use crate::cli::ui::{confirm, non_empty, prompt_field, select, status, truncate, FormResult};
use crate::models::SavedView;
use crate::session::Session;

fn format_view_line(view: &SavedView, active: bool) -> String {
    let owner = view
        .created_by
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("");
    format!(
        "{} {:<7} {:<20} {:<18} {}",
        if active { "*" } else { " " },
        view.id,
        truncate(&view.name, 20),
        truncate(owner, 18),
        view.filter
    )
}

/// Execute the views command
pub fn run_views(session: &Session) -> Result<()> {
    let views = session.store().list_views();
    if views.is_empty() {
        println!("No saved views.");
        return Ok(());
    }

    let active = session.active_view().map(|v| v.id.as_str());
    for view in views {
        println!("{}", format_view_line(view, active == Some(view.id.as_str())));
        if let Some(ref description) = view.description {
            println!("          {}", description);
        }
    }
    Ok(())
}

/// Execute the view command: apply a saved view and list its leads
pub fn run_view(session: &mut Session, id: &str) -> Result<()> {
    session.select_view(id)?;
    if let Some(view) = session.active_view() {
        println!("{}  (where {})\n", view.name, view.filter);
    }

    let rows = session.table_rows();
    print_lead_table(&rows, &session.query, None);
    Ok(())
}

// ==================== INTERACTIVE ====================

/// View picker for the menu: apply or delete.
pub fn manage_views(session: &mut Session) -> Result<()> {
    let views: Vec<(String, String)> = session
        .store()
        .list_views()
        .iter()
        .map(|v| {
            let active = session.active_view().is_some_and(|a| a.id == v.id);
            (v.id.clone(), format_view_line(v, active))
        })
        .collect();
    if views.is_empty() {
        status("No saved views. Apply a filter, then save it.");
        return Ok(());
    }

    let labels: Vec<&str> = views.iter().map(|(_, label)| label.as_str()).collect();
    let Some(idx) = select("views", &labels)? else {
        return Ok(());
    };
    let id = &views[idx].0;

    match select("view", &["Apply", "Delete"])? {
        Some(0) => session.select_view(id)?,
        Some(1) => {
            if confirm("Delete this view?")? {
                let removed = session.delete_view(id)?;
                status(&format!("Deleted {}.", removed.name));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Save the current filter as a view, prompting for name and description.
pub fn save_view_interactive(session: &mut Session) -> Result<()> {
    let name = match prompt_field("view name", None)? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(()),
    };
    let description = match prompt_field("description", None)? {
        FormResult::Value(v) => non_empty(v),
        FormResult::Cancelled => return Ok(()),
    };

    let id = session.save_current_filter(&name, description)?;
    status(&format!("Saved as {}.", id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Creator;
    use crate::store::LeadStore;

    fn session() -> Session {
        Session::new(LeadStore::with_demo_data(), Creator::new("user1", "Admin User"))
    }

    #[test]
    fn test_view_line_shows_owner_and_filter() {
        let s = session();
        let view = s.store().get_view("view1").unwrap();
        let line = format_view_line(view, false);
        assert!(line.contains("High Priority"));
        assert!(line.contains("Admin User"));
        assert!(line.contains("status equals \"qualified\""));
    }

    #[test]
    fn test_run_view_applies_filter() {
        let mut s = session();
        run_view(&mut s, "view1").unwrap();
        assert_eq!(s.active_view().unwrap().id, "view1");
        assert_eq!(s.visible_leads().len(), 1);
        assert!(run_view(&mut s, "view9").is_err());
    }
}
