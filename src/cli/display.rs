use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

use crate::models::{Lead, LeadActivity};

/// Print a lead with only its non-empty fields, then its timeline.
pub fn print_lead_detail(lead: &Lead, timeline: &[&LeadActivity]) {
    println!("{}  ({})\n", lead.name, lead.status.label());

    if let Some(ref company) = lead.company {
        println!("  {}", company);
    }
    println!("  {}", lead.email);
    if let Some(ref phone) = lead.phone {
        println!("  {}", phone);
    }
    println!("  source: {}", lead.source);

    if let Some(ref notes) = lead.notes {
        if !notes.is_empty() {
            println!("\n  {}", notes);
        }
    }

    let now = Local::now();
    println!(
        "\n  created {}  updated {}",
        format_relative(&lead.created_at, &now),
        format_relative(&lead.updated_at, &now)
    );

    println!("\nActivity");
    if timeline.is_empty() {
        println!("  (none)");
    }
    for activity in timeline {
        println!(
            "  {:<8} {:<24} {}",
            activity.activity_type.as_str(),
            format_relative(&activity.created_at, &now),
            activity.created_by.name
        );
        for line in activity.content.lines() {
            println!("           {}", line);
        }
    }
}

/// Human date relative to `now`: "Today at 9:30am", "Apr 12 at 2:00pm",
/// "Apr 12, 2024 at 2:00pm".
pub fn format_relative<Tz>(at: &DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let local = at.with_timezone(&now.timezone());
    let today = now.date_naive();
    let day = local.date_naive();
    let time = local.format("%-I:%M%P");

    if day == today {
        format!("Today at {}", time)
    } else if Some(day) == today.pred_opt() {
        format!("Yesterday at {}", time)
    } else if local.year() == now.year() {
        format!("{} at {}", local.format("%b %-d"), time)
    } else {
        format!("{} at {}", local.format("%b %-d, %Y"), time)
    }
}

/// Short table date: "Apr 10, 2025"
pub fn format_short_date(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%b %-d, %Y").to_string()
}
