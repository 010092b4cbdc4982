use std::path::Path;

use anyhow::{anyhow, Result};

use crate::cli::ui::warning;
use crate::session::Session;

/// Execute the export command.
///
/// `--all` exports every visible row; otherwise the listed ids are selected
/// first. The file lands in `dir` as `leads_export_<date>.csv`.
pub fn run_export(session: &mut Session, ids: &[String], all: bool, dir: &Path) -> Result<()> {
    if all {
        session.select_all_visible();
    } else if !ids.is_empty() {
        session.clear_selection();
        for id in ids {
            if session.store().get_lead(id).is_none() {
                warning(&format!("no lead with id {}", id));
            } else if !session.is_selected(id) {
                session.toggle_selection(id);
            }
        }
    }

    if session.selected().is_empty() {
        return Err(anyhow!("Nothing to export. Pass lead ids or --all."));
    }

    let path = session.export_selected(dir)?;
    println!("Exported {} lead(s) to {}", session.selected().len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Creator;
    use crate::store::LeadStore;
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new(LeadStore::with_demo_data(), Creator::new("user1", "Admin User"))
    }

    fn exported(dir: &TempDir) -> String {
        let entry = std::fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap();
        std::fs::read_to_string(entry.path()).unwrap()
    }

    #[test]
    fn test_export_listed_ids() {
        let dir = TempDir::new().unwrap();
        let mut s = session();
        run_export(&mut s, &["1".to_string(), "3".to_string()], false, dir.path()).unwrap();
        let csv = exported(&dir);
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("\"Alex Johnson\""));
    }

    #[test]
    fn test_export_all_visible() {
        let dir = TempDir::new().unwrap();
        let mut s = session();
        s.select_segment(Some("seg2")).unwrap();
        run_export(&mut s, &[], true, dir.path()).unwrap();
        assert_eq!(exported(&dir).lines().count(), 2);
    }

    #[test]
    fn test_export_requires_selection() {
        let dir = TempDir::new().unwrap();
        let mut s = session();
        assert!(run_export(&mut s, &[], false, dir.path()).is_err());
        assert!(run_export(&mut s, &["77".to_string()], false, dir.path()).is_err());
    }
}
