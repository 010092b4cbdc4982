//! CSV export of leads.
//!
//! Column order is fixed: `ID,Name,Email,Company,Phone,Source,Status,Notes,Created,Updated`.
//! The header is written bare; every non-numeric data field is quoted. Dates are
//! rendered as `M/D/YYYY`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use csv::{QuoteStyle, WriterBuilder};

use crate::models::Lead;

pub const EXPORT_COLUMNS: [&str; 10] = [
    "ID", "Name", "Email", "Company", "Phone", "Source", "Status", "Notes", "Created", "Updated",
];

fn display_date(at: &DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}

fn record(lead: &Lead) -> [String; 10] {
    [
        lead.id.clone(),
        lead.name.clone(),
        lead.email.clone(),
        lead.company.clone().unwrap_or_default(),
        lead.phone.clone().unwrap_or_default(),
        lead.source.clone(),
        lead.status.as_str().to_string(),
        lead.notes.clone().unwrap_or_default(),
        display_date(&lead.created_at),
        display_date(&lead.updated_at),
    ]
}

/// Serialize leads to CSV text, header first, rows in the given order.
pub fn export_csv<'a, I>(leads: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Lead>,
{
    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());
    header.write_record(EXPORT_COLUMNS)?;
    let mut out = header
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to finish CSV header")?;

    let mut rows = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(Vec::new());
    let mut count = 0usize;
    for lead in leads {
        rows.write_record(record(lead))?;
        count += 1;
    }
    out.extend(
        rows.into_inner()
            .map_err(|e| e.into_error())
            .context("Failed to finish CSV rows")?,
    );

    tracing::debug!(rows = count, "csv rendered");
    String::from_utf8(out).context("CSV output was not UTF-8")
}

/// `leads_export_<YYYY-MM-DD>.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("leads_export_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the export into `dir`, named for today's date. Returns the file path.
pub fn write_export<'a, I>(dir: &Path, leads: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a Lead>,
{
    let csv = export_csv(leads)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(export_file_name(Utc::now().date_naive()));
    std::fs::write(&path, csv).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "leads exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadStatus;
    use crate::store::demo_workspace;
    use tempfile::TempDir;

    fn john() -> Lead {
        demo_workspace()
            .leads
            .into_iter()
            .find(|l| l.name == "John Smith")
            .unwrap()
    }

    #[test]
    fn test_header_is_fixed() {
        let csv = export_csv(Vec::<&Lead>::new()).unwrap();
        assert_eq!(
            csv.lines().next().unwrap(),
            "ID,Name,Email,Company,Phone,Source,Status,Notes,Created,Updated"
        );
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_john_smith_row() {
        let lead = john();
        let csv = export_csv([&lead]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"John Smith\""));
        assert!(row.starts_with("1,\"John Smith\",\"john@example.com\",\"Acme Corp\","));
        assert!(row.ends_with("\"4/10/2025\",\"4/10/2025\""));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let fields = reader.records().next().unwrap().unwrap();
        let fields: Vec<&str> = fields.iter().collect();
        assert_eq!(
            fields,
            ["1", "John Smith", "john@example.com", "Acme Corp", "", "Website", "new", "", "4/10/2025", "4/10/2025"]
        );
    }

    #[test]
    fn test_embedded_quotes_and_commas_are_escaped() {
        let mut lead = john();
        lead.notes = Some("Said \"maybe\", call back".to_string());
        lead.status = LeadStatus::Contacted;
        let csv = export_csv([&lead]).unwrap();
        assert!(csv.contains("\"Said \"\"maybe\"\", call back\""));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[7], "Said \"maybe\", call back");
        assert_eq!(&row[6], "contacted");
    }

    #[test]
    fn test_file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
        assert_eq!(export_file_name(date), "leads_export_2025-04-15.csv");
    }

    #[test]
    fn test_write_export_creates_file() {
        let dir = TempDir::new().unwrap();
        let leads = demo_workspace().leads;
        let path = write_export(&dir.path().join("out"), &leads).unwrap();

        assert!(path.file_name().unwrap().to_string_lossy().starts_with("leads_export_"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 6);
    }
}
