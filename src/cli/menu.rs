//! Interactive session for leadcmd
//!
//! Every change made here lives in the session's store until the program
//! exits.

use anyhow::{anyhow, Result};
use inquire::Select;
use std::io::{self, IsTerminal};
use std::path::Path;

use crate::cli::add::{run_add, AddInput};
use crate::cli::filter::build_filter;
use crate::cli::list::print_lead_table;
use crate::cli::segments::manage_segments;
use crate::cli::show::{lead_screen, pick_lead};
use crate::cli::stats::run_stats;
use crate::cli::ui::{
    clear_screen, confirm, minimal_render_config, select, status, text_input, wait_for_continue,
};
use crate::cli::views::{manage_views, save_view_interactive};
use crate::models::{LeadField, LeadStatus};
use crate::session::Session;
use crate::store::team_members;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Open,
    Search,
    Sort,
    Filter,
    SaveView,
    Segments,
    Views,
    Add,
    Select,
    Bulk,
    Stats,
    Quit,
}

impl MenuOption {
    const ALL: &'static [MenuOption] = &[
        MenuOption::Open,
        MenuOption::Search,
        MenuOption::Sort,
        MenuOption::Filter,
        MenuOption::SaveView,
        MenuOption::Segments,
        MenuOption::Views,
        MenuOption::Add,
        MenuOption::Select,
        MenuOption::Bulk,
        MenuOption::Stats,
        MenuOption::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuOption::Open => "Open lead",
            MenuOption::Search => "Search",
            MenuOption::Sort => "Sort",
            MenuOption::Filter => "Filter",
            MenuOption::SaveView => "Save filter as view",
            MenuOption::Segments => "Segments",
            MenuOption::Views => "Saved views",
            MenuOption::Add => "Add lead",
            MenuOption::Select => "Selection",
            MenuOption::Bulk => "Bulk actions",
            MenuOption::Stats => "Stats",
            MenuOption::Quit => "Quit",
        }
    }

    fn from_label(s: &str) -> Option<MenuOption> {
        MenuOption::ALL.iter().find(|opt| opt.label() == s).copied()
    }
}

/// One line describing what the table is showing.
fn context_line(session: &Session) -> String {
    let mut parts = vec![format!(
        "{} of {} leads",
        session.table_rows().len(),
        session.store().count_leads()
    )];
    if let Some(segment) = session.active_segment() {
        parts.push(format!("segment: {}", segment.name));
    } else if let Some(view) = session.active_view() {
        parts.push(format!("view: {}", view.name));
    } else if let Some(filter) = session.current_filter().filter(|f| !f.is_empty()) {
        parts.push(format!("where {}", filter));
    }
    if !session.query.search.is_empty() {
        parts.push(format!("search: {}", session.query.search));
    }
    if !session.selected().is_empty() {
        parts.push(format!("{} selected", session.selected().len()));
    }
    parts.join("  |  ")
}

/// Run the interactive session menu
pub fn run_menu(session: &mut Session, export_dir: &Path) -> Result<()> {
    if !io::stdin().is_terminal() {
        return Err(anyhow!(
            "Interactive menu requires a terminal. Use subcommands for non-interactive use:\n  \
            leadcmd list\n  \
            leadcmd filter --where source:contains:web\n  \
            leadcmd show <id>\n  \
            Run 'leadcmd --help' for all options."
        ));
    }

    let menu_labels: Vec<&str> = MenuOption::ALL.iter().map(|opt| opt.label()).collect();

    loop {
        let _ = clear_screen();
        let rows = session.table_rows();
        print_lead_table(&rows, &session.query, Some(&*session));
        println!("\n{}\n", context_line(session));

        let selection = Select::new("leadcmd", menu_labels.clone())
            .with_render_config(minimal_render_config())
            .with_page_size(menu_labels.len())
            .with_vim_mode(true)
            .prompt_skippable();

        let Ok(Some(choice_label)) = selection else {
            return Ok(());
        };
        let Some(choice) = MenuOption::from_label(choice_label) else {
            continue;
        };
        if choice == MenuOption::Quit {
            return Ok(());
        }

        if let Err(e) = execute_command(session, choice, export_dir) {
            eprintln!("\nError: {}", e);
            wait_for_continue();
        }
    }
}

fn execute_command(session: &mut Session, choice: MenuOption, export_dir: &Path) -> Result<()> {
    match choice {
        MenuOption::Open => {
            if let Some(id) = pick_lead(session, "lead (id or name): ")? {
                lead_screen(session, &id)?;
            }
        }
        MenuOption::Search => {
            let current = session.query.search.clone();
            if let Some(term) = text_input("search: ", Some(&current))? {
                session.query.search = term.trim().to_string();
            }
        }
        MenuOption::Sort => {
            let labels: Vec<&str> = LeadField::ALL.iter().map(|f| f.label()).collect();
            if let Some(idx) = select("sort by", &labels)? {
                session.query.sort_by(LeadField::ALL[idx]);
            }
        }
        MenuOption::Filter => {
            let current = session.current_filter().cloned();
            if let Some(group) = build_filter(current.as_ref())? {
                session.apply_filter((!group.is_empty()).then_some(group));
            }
        }
        MenuOption::SaveView => save_view_interactive(session)?,
        MenuOption::Segments => manage_segments(session)?,
        MenuOption::Views => manage_views(session)?,
        MenuOption::Add => {
            run_add(session, AddInput::default())?;
            wait_for_continue();
        }
        MenuOption::Select => selection_menu(session)?,
        MenuOption::Bulk => bulk_menu(session, export_dir)?,
        MenuOption::Stats => {
            let _ = clear_screen();
            run_stats(session)?;
            wait_for_continue();
        }
        MenuOption::Quit => {}
    }
    Ok(())
}

fn selection_menu(session: &mut Session) -> Result<()> {
    let actions = ["Select all visible", "Toggle one lead", "Clear selection"];
    match select("selection", &actions)? {
        Some(0) => {
            let n = session.select_all_visible();
            status(&format!("{} selected.", n));
        }
        Some(1) => {
            if let Some(id) = pick_lead(session, "lead (id or name): ")? {
                session.toggle_selection(&id);
            }
        }
        Some(2) => session.clear_selection(),
        _ => {}
    }
    Ok(())
}

fn bulk_menu(session: &mut Session, export_dir: &Path) -> Result<()> {
    let count = session.selected().len();
    if count == 0 {
        status("Select leads first.");
        wait_for_continue();
        return Ok(());
    }

    let actions = ["Change status", "Assign", "Export CSV", "Delete"];
    match select(&format!("{} selected", count), &actions)? {
        Some(0) => {
            let labels: Vec<String> = LeadStatus::ALL.iter().map(|s| s.label()).collect();
            if let Some(idx) = select("status", &labels)? {
                let updated = session.bulk_update_status(LeadStatus::ALL[idx]);
                status(&format!("Updated {}.", updated));
            }
        }
        Some(1) => {
            let members = team_members();
            let labels: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
            if let Some(idx) = select("assign to", &labels)? {
                let (member, n) = session.assign_selected(&members[idx].id)?;
                status(&format!("{} leads assigned to {}.", n, member.name));
                wait_for_continue();
            }
        }
        Some(2) => {
            let path = session.export_selected(export_dir)?;
            status(&format!("Exported to {}", path.display()));
            wait_for_continue();
        }
        Some(3) => {
            if confirm(&format!("Delete {} leads?", count))? {
                let removed = session.bulk_delete();
                status(&format!("Deleted {}.", removed));
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Creator;
    use crate::store::LeadStore;

    #[test]
    fn test_menu_option_roundtrip() {
        for opt in MenuOption::ALL {
            assert_eq!(MenuOption::from_label(opt.label()), Some(*opt), "{:?}", opt);
        }
        assert_eq!(MenuOption::from_label("Invalid"), None);
    }

    #[test]
    fn test_context_line() {
        let mut session =
            Session::new(LeadStore::with_demo_data(), Creator::new("user1", "Admin User"));
        assert_eq!(context_line(&session), "5 of 5 leads");

        session.select_segment(Some("seg1")).unwrap();
        session.toggle_selection("1");
        assert_eq!(
            context_line(&session),
            "1 of 5 leads  |  segment: New Leads  |  1 selected"
        );
    }
}
