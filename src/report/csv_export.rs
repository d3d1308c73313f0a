use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::MonthlyReport;

/// Write the report rows as `Expense_Report_<month>.csv` into `dir`.
pub(crate) fn export_csv(report: &MonthlyReport, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;
    let path = dir.join(report.file_name("csv"));

    let mut wtr = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    wtr.write_record(["#", "Date", "Category", "Description", "Type", "Amount", "Largest"])?;
    for row in &report.rows {
        wtr.write_record([
            row.number.to_string(),
            row.date.clone(),
            row.category.to_string(),
            row.description.clone(),
            row.kind.to_string(),
            format!("{:.2}", row.amount),
            if row.highlighted { "yes" } else { "" }.to_string(),
        ])?;
    }
    wtr.flush()?;

    tracing::info!(path = %path.display(), rows = report.rows.len(), "exported CSV report");
    Ok(path)
}
