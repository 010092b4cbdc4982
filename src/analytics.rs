//! Dashboard numbers computed from the current lead set.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{Lead, LeadStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadAnalytics {
    pub total_leads: usize,
    pub new_leads_today: usize,
    /// Customers as a percentage of all leads, 0 when there are none.
    pub conversion_rate: f64,
    /// Every status appears, zero counts included, in pipeline order.
    pub leads_by_status: Vec<(LeadStatus, usize)>,
    /// Sorted by count descending, then by name.
    pub leads_by_source: Vec<(String, usize)>,
    /// One entry per calendar day (UTC) that has leads, oldest first.
    pub leads_by_time: Vec<DailyCount>,
}

impl LeadAnalytics {
    pub fn compute(leads: &[Lead], now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let total_leads = leads.len();

        let new_leads_today = leads
            .iter()
            .filter(|l| l.created_at.date_naive() == today)
            .count();

        let leads_by_status: Vec<(LeadStatus, usize)> = LeadStatus::ALL
            .iter()
            .map(|&status| (status, leads.iter().filter(|l| l.status == status).count()))
            .collect();

        let customers = leads
            .iter()
            .filter(|l| l.status == LeadStatus::Customer)
            .count();
        let conversion_rate = if total_leads == 0 {
            0.0
        } else {
            customers as f64 / total_leads as f64 * 100.0
        };

        let mut by_source: BTreeMap<&str, usize> = BTreeMap::new();
        for lead in leads {
            *by_source.entry(lead.source.as_str()).or_insert(0) += 1;
        }
        let mut leads_by_source: Vec<(String, usize)> = by_source
            .into_iter()
            .map(|(source, count)| (source.to_string(), count))
            .collect();
        leads_by_source.sort_by(|a, b| b.1.cmp(&a.1));

        let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for lead in leads {
            *by_day.entry(lead.created_at.date_naive()).or_insert(0) += 1;
        }
        let leads_by_time = by_day
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect();

        Self {
            total_leads,
            new_leads_today,
            conversion_rate,
            leads_by_status,
            leads_by_source,
            leads_by_time,
        }
    }

    pub fn status_count(&self, status: LeadStatus) -> usize {
        self.leads_by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::demo_workspace;

    fn now() -> DateTime<Utc> {
        "2025-04-10T18:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_demo_analytics() {
        let leads = demo_workspace().leads;
        let stats = LeadAnalytics::compute(&leads, now());

        assert_eq!(stats.total_leads, 5);
        assert_eq!(stats.new_leads_today, 1);
        assert!((stats.conversion_rate - 20.0).abs() < f64::EPSILON);
        assert_eq!(stats.status_count(LeadStatus::Customer), 1);
        assert_eq!(stats.leads_by_status.len(), LeadStatus::ALL.len());
        assert_eq!(stats.leads_by_source.len(), 5);
        assert_eq!(stats.leads_by_time.len(), 5);
        assert_eq!(
            stats.leads_by_time[0].date,
            NaiveDate::from_ymd_opt(2025, 4, 6).unwrap()
        );
    }

    #[test]
    fn test_empty_lead_set() {
        let stats = LeadAnalytics::compute(&[], now());
        assert_eq!(stats.total_leads, 0);
        assert_eq!(stats.conversion_rate, 0.0);
        assert!(stats.leads_by_status.iter().all(|(_, n)| *n == 0));
        assert!(stats.leads_by_source.is_empty());
    }

    #[test]
    fn test_sources_sorted_by_count() {
        let mut leads = demo_workspace().leads;
        leads[1].source = "Website".to_string();
        let stats = LeadAnalytics::compute(&leads, now());
        assert_eq!(stats.leads_by_source[0], ("Website".to_string(), 2));
    }
}
