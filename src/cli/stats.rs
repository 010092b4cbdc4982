use anyhow::Result;
use chrono::Utc;

use crate::analytics::LeadAnalytics;
use crate::session::Session;

const BAR_WIDTH: usize = 30;

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH).div_ceil(max);
    "#".repeat(len)
}

/// Execute the stats command
pub fn run_stats(session: &Session) -> Result<()> {
    let stats = LeadAnalytics::compute(session.store().list_leads(), Utc::now());

    println!("Total leads      {}", stats.total_leads);
    println!("New today        {}", stats.new_leads_today);
    println!("Conversion rate  {:.1}%", stats.conversion_rate);

    let max = stats.leads_by_status.iter().map(|(_, n)| *n).max().unwrap_or(0);
    println!("\nBy status");
    for (status, count) in &stats.leads_by_status {
        println!("  {:<13} {:>4}  {}", status.label(), count, bar(*count, max));
    }

    let max = stats.leads_by_source.iter().map(|(_, n)| *n).max().unwrap_or(0);
    println!("\nBy source");
    for (source, count) in &stats.leads_by_source {
        println!("  {:<16} {:>4}  {}", source, count, bar(*count, max));
    }

    println!("\nBy day");
    for day in &stats.leads_by_time {
        println!("  {}  {:>4}", day.date.format("%Y-%m-%d"), day.count);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Creator;
    use crate::store::LeadStore;

    #[test]
    fn test_bar_scales_to_max() {
        assert_eq!(bar(0, 0), "");
        assert_eq!(bar(5, 5).len(), BAR_WIDTH);
        assert_eq!(bar(1, 3).len(), 10);
        assert_eq!(bar(1, 100).len(), 1);
    }

    #[test]
    fn test_run_stats() {
        let session = Session::new(LeadStore::with_demo_data(), Creator::new("user1", "Admin User"));
        run_stats(&session).unwrap();
    }
}
