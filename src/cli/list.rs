use anyhow::{anyhow, Result};

use crate::cli::display::format_short_date;
use crate::cli::ui::{fit, selection_marker, term_size};
use crate::filter::{SortOrder, TableQuery};
use crate::models::{Lead, LeadField};
use crate::session::Session;

/// Column widths for the lead table, chosen from the terminal width
struct ColumnLayout {
    name_width: usize,
    email_width: usize,
    company_width: usize,
    source_width: usize,
    show_company: bool,
}

impl ColumnLayout {
    fn for_width(width: usize) -> Self {
        if width >= 110 {
            ColumnLayout {
                name_width: 22,
                email_width: 28,
                company_width: 20,
                source_width: 14,
                show_company: true,
            }
        } else {
            // id, marker, status and date take about 40 columns
            ColumnLayout {
                name_width: 18,
                email_width: width.saturating_sub(72).max(16),
                company_width: 0,
                source_width: 12,
                show_company: false,
            }
        }
    }
}

const STATUS_WIDTH: usize = 12;

fn header_label(field: LeadField, query: &TableQuery) -> String {
    let label = match field {
        LeadField::CreatedAt => "CREATED".to_string(),
        _ => field.label().to_uppercase(),
    };
    if field == query.sort_field {
        format!("{}{}", label, query.order.indicator())
    } else {
        label
    }
}

fn print_table_header(layout: &ColumnLayout, query: &TableQuery, with_marker: bool) {
    let mut line = String::new();
    if with_marker {
        line.push_str("    ");
    }
    line.push_str(&format!("{:<4} ", "ID"));
    line.push_str(&fit(&header_label(LeadField::Name, query), layout.name_width));
    line.push_str("  ");
    line.push_str(&fit(&header_label(LeadField::Email, query), layout.email_width));
    line.push_str("  ");
    if layout.show_company {
        line.push_str(&fit(&header_label(LeadField::Company, query), layout.company_width));
        line.push_str("  ");
    }
    line.push_str(&fit(&header_label(LeadField::Source, query), layout.source_width));
    line.push_str("  ");
    line.push_str(&fit(&header_label(LeadField::Status, query), STATUS_WIDTH));
    line.push_str("  ");
    line.push_str(&header_label(LeadField::CreatedAt, query));
    println!("{}", line.trim_end());
}

fn format_lead_row(lead: &Lead, layout: &ColumnLayout, marker: Option<bool>) -> String {
    let mut line = String::new();
    if let Some(selected) = marker {
        line.push_str(selection_marker(selected));
        line.push(' ');
    }
    line.push_str(&format!("{:<4} ", lead.id));
    line.push_str(&fit(&lead.name, layout.name_width));
    line.push_str("  ");
    line.push_str(&fit(&lead.email, layout.email_width));
    line.push_str("  ");
    if layout.show_company {
        line.push_str(&fit(lead.company.as_deref().unwrap_or(""), layout.company_width));
        line.push_str("  ");
    }
    line.push_str(&fit(&lead.source, layout.source_width));
    line.push_str("  ");
    line.push_str(&fit(lead.status.as_str(), STATUS_WIDTH));
    line.push_str("  ");
    line.push_str(&format_short_date(&lead.created_at));
    line
}

/// Print the table for `rows`. With a session, rows carry selection markers.
pub fn print_lead_table(rows: &[&Lead], query: &TableQuery, session: Option<&Session>) {
    if rows.is_empty() {
        println!("No leads found.");
        return;
    }

    let layout = ColumnLayout::for_width(term_size().0);
    print_table_header(&layout, query, session.is_some());
    for lead in rows {
        let marker = session.map(|s| s.is_selected(&lead.id));
        println!("{}", format_lead_row(lead, &layout, marker));
    }
}

/// Execute the list command
pub fn run_list(
    session: &mut Session,
    search: Option<String>,
    sort: Option<String>,
    order: Option<String>,
) -> Result<()> {
    if let Some(sort) = sort {
        session.query.sort_field =
            LeadField::parse(&sort).ok_or_else(|| anyhow!("Unknown sort field: {}", sort))?;
    }
    if let Some(order) = order {
        session.query.order =
            SortOrder::parse(&order).ok_or_else(|| anyhow!("Sort order must be asc or desc"))?;
    }
    session.query.search = search.unwrap_or_default();

    let rows = session.table_rows();
    let total = session.store().count_leads();
    if rows.len() == total {
        println!("Leads ({} total)\n", total);
    } else {
        println!("Leads ({} of {})\n", rows.len(), total);
    }
    print_lead_table(&rows, &session.query, None);
    Ok(())
}
