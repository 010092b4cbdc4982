use anyhow::{anyhow, Result};

use crate::cli::filter::build_filter;
use crate::cli::list::print_lead_table;
use crate::cli::ui::{
    confirm, multi_select, non_empty, prompt_field, select, status, text_input, truncate,
    FormResult,
};
use crate::filter::parse_date;
use crate::models::{
    CustomFieldRule, FilterGroup, LeadStatus, LogicalOperator, Segment, SegmentCriteria,
    SegmentUpdate, TextOperator,
};
use crate::session::Session;

fn format_segment_line(segment: &Segment, active: bool) -> String {
    let count = segment
        .count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} {:<6} {:<24} {:>4}  {}",
        if active { "*" } else { " " },
        segment.id,
        truncate(&segment.name, 24),
        count,
        segment.criteria.summary()
    )
}

/// Execute the segments command
pub fn run_segments(session: &Session) -> Result<()> {
    let segments = session.store().list_segments();
    if segments.is_empty() {
        println!("No segments.");
        return Ok(());
    }

    let active = session.active_segment().map(|s| s.id.as_str());
    for segment in segments {
        println!("{}", format_segment_line(segment, active == Some(segment.id.as_str())));
        if !segment.description.is_empty() {
            println!("         {}", segment.description);
        }
    }
    Ok(())
}

/// Execute the segment command: activate one segment and list its leads
pub fn run_segment(session: &mut Session, id: &str) -> Result<()> {
    session.select_segment(Some(id))?;
    let Some(segment) = session.active_segment() else {
        return Err(anyhow!("Segment disappeared: {}", id));
    };
    println!("{}  ({})\n", segment.name, segment.criteria.summary());

    let rows = session.table_rows();
    print_lead_table(&rows, &session.query, None);
    Ok(())
}

// ==================== INTERACTIVE ====================

/// Segment picker for the menu: activate, edit, delete or create.
pub fn manage_segments(session: &mut Session) -> Result<()> {
    let mut labels: Vec<String> = session
        .store()
        .list_segments()
        .iter()
        .map(|s| {
            let active = session.active_segment().is_some_and(|a| a.id == s.id);
            format_segment_line(s, active)
        })
        .collect();
    labels.push("+ New segment".to_string());
    if session.active_segment().is_some() {
        labels.push("Clear active segment".to_string());
    }

    let Some(idx) = select("segments", &labels)? else {
        return Ok(());
    };

    let segment_ids: Vec<String> = session
        .store()
        .list_segments()
        .iter()
        .map(|s| s.id.clone())
        .collect();

    if idx == segment_ids.len() {
        return create_segment_interactive(session);
    }
    if idx > segment_ids.len() {
        session.select_segment(None)?;
        status("Showing all leads.");
        return Ok(());
    }

    let id = &segment_ids[idx];
    let actions = ["Show leads", "Edit", "Delete"];
    match select("segment", &actions)? {
        Some(0) => {
            session.select_segment(Some(id))?;
        }
        Some(1) => edit_segment_interactive(session, id)?,
        Some(2) => {
            if confirm("Delete this segment?")? {
                let removed = session.delete_segment(id)?;
                status(&format!("Deleted {}.", removed.name));
            }
        }
        _ => {}
    }
    Ok(())
}

fn create_segment_interactive(session: &mut Session) -> Result<()> {
    let name = match prompt_field("name", None)? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(()),
    };
    let description = match prompt_field("description", None)? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(()),
    };

    let sources = distinct_sources(session);
    let Some(criteria) = build_criteria(&SegmentCriteria::default(), &sources)? else {
        status("Cancelled.");
        return Ok(());
    };

    let id = session.create_segment(&name, &description, criteria)?;
    let count = session.active_segment().and_then(|s| s.count).unwrap_or(0);
    status(&format!("Created {} ({} leads).", id, count));
    Ok(())
}

fn edit_segment_interactive(session: &mut Session, id: &str) -> Result<()> {
    let current = session
        .store()
        .get_segment(id)
        .cloned()
        .ok_or_else(|| anyhow!("Segment not found: {}", id))?;

    let name = match prompt_field("name", Some(&current.name))? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(()),
    };
    let description = match prompt_field("description", Some(&current.description))? {
        FormResult::Value(v) => v,
        FormResult::Cancelled => return Ok(()),
    };

    let sources = distinct_sources(session);
    let Some(criteria) = build_criteria(&current.criteria, &sources)? else {
        status("Cancelled.");
        return Ok(());
    };

    let updated = session.update_segment(
        id,
        SegmentUpdate {
            name: Some(name),
            description: Some(description),
            criteria: Some(criteria),
        },
    )?;
    status(&format!("Saved. {} leads.", updated.count.unwrap_or(0)));
    Ok(())
}

fn distinct_sources(session: &Session) -> Vec<String> {
    session
        .store()
        .distinct_sources()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Walk through statuses, sources, date bounds and text rules.
fn build_criteria(current: &SegmentCriteria, sources: &[String]) -> Result<Option<SegmentCriteria>> {
    let mut criteria = SegmentCriteria::default();

    let labels: Vec<String> = LeadStatus::ALL.iter().map(|s| s.label()).collect();
    let checked: Vec<usize> = LeadStatus::ALL
        .iter()
        .enumerate()
        .filter(|(_, s)| current.status.contains(*s))
        .map(|(i, _)| i)
        .collect();
    let Some(chosen) = multi_select("status (none = any)", &labels, &checked)? else {
        return Ok(None);
    };
    for idx in chosen {
        criteria.toggle_status(LeadStatus::ALL[idx]);
    }

    // Sources already in the criteria stay choosable even when no lead has them
    let mut options: Vec<String> = sources.to_vec();
    for s in &current.source {
        if !options.contains(s) {
            options.push(s.clone());
        }
    }
    let checked: Vec<usize> = options
        .iter()
        .enumerate()
        .filter(|(_, s)| current.source.contains(*s))
        .map(|(i, _)| i)
        .collect();
    if !options.is_empty() {
        let Some(chosen) = multi_select("source (none = any)", &options, &checked)? else {
            return Ok(None);
        };
        for idx in chosen {
            criteria.toggle_source(&options[idx]);
        }
    }

    let min_default = current.min_created_at.map(|d| d.format("%Y-%m-%d").to_string());
    let prompt = "created on or after (YYYY-MM-DD, blank = none): ";
    let Some(min) = text_input(prompt, min_default.as_deref())? else {
        return Ok(None);
    };
    criteria.min_created_at = non_empty(min).and_then(|d| parse_date(&d));

    let max_default = current.max_created_at.map(|d| d.format("%Y-%m-%d").to_string());
    let prompt = "created on or before (YYYY-MM-DD, blank = none): ";
    let Some(max) = text_input(prompt, max_default.as_deref())? else {
        return Ok(None);
    };
    criteria.max_created_at = non_empty(max).and_then(|d| parse_date(&d));

    // Custom rules reuse the filter builder, keeping only text comparisons
    let seed = (!current.custom_fields.is_empty()).then(|| {
        FilterGroup::new(
            LogicalOperator::And,
            current.custom_fields.iter().map(|r| r.as_condition()).collect(),
        )
    });
    if seed.is_some() || confirm("Add field rules?")? {
        if let Some(group) = build_filter(seed.as_ref())? {
            criteria.custom_fields = group
                .conditions
                .iter()
                .filter_map(|c| {
                    let field = c.field?;
                    let operator = TextOperator::try_from(c.operator).ok()?;
                    Some(CustomFieldRule {
                        field,
                        operator,
                        value: c.value.clone(),
                    })
                })
                .collect();
        }
    }

    Ok(Some(criteria))
}
