use crate::error::Result;
use crate::types::{Headline, MetricsTableRow, Report, SummaryStats};
use crate::util::{format_int, format_ratio};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

pub const TOTAL_LABEL: &str = "Total";
/// CTR percentages do not sum, so the total row shows a placeholder.
pub const CTR_TOTAL_PLACEHOLDER: &str = "-";

/// One display row per normalized row, then the synthetic total row.
pub fn table_rows(report: &Report) -> Vec<MetricsTableRow> {
    let mut rows: Vec<MetricsTableRow> = report
        .rows
        .iter()
        .map(|r| MetricsTableRow {
            date: r.start_date.clone(),
            impressions: format_int(r.impressions),
            reach: format_int(r.reach),
            ctr: format_ratio(r.ctr),
            clicks: format_int(r.clicks),
            page_engagement: format_int(r.page_engagement),
        })
        .collect();

    let totals = &report.aggregates;
    rows.push(MetricsTableRow {
        date: TOTAL_LABEL.to_string(),
        impressions: format_int(totals.total_impressions),
        reach: format_int(totals.total_reach),
        ctr: CTR_TOTAL_PLACEHOLDER.to_string(),
        clicks: format_int(totals.total_clicks),
        page_engagement: format_int(totals.total_page_engagement),
    });
    rows
}

pub fn headline(report: &Report) -> Headline {
    Headline {
        total_impressions: format_int(report.aggregates.total_impressions),
        total_reach: format_int(report.aggregates.total_reach),
        total_clicks: format_int(report.aggregates.total_clicks),
        reporting_period: report.period.to_string(),
    }
}

pub fn summary(report: &Report, generated_on: &str) -> SummaryStats {
    SummaryStats {
        generated_on: generated_on.to_string(),
        rows: report.rows.len(),
        reporting_starts: report.period.first.clone(),
        reporting_ends: report.period.last.clone(),
        total_impressions: report.aggregates.total_impressions,
        total_reach: report.aggregates.total_reach,
        total_clicks: report.aggregates.total_clicks,
        total_page_engagement: report.aggregates.total_page_engagement,
    }
}

pub fn markdown_table<T>(rows: &[T]) -> String
where
    T: Tabled + Clone,
{
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(rows.to_vec()).with(Style::markdown()).to_string()
}

/// Text rendering of the report body: headline block, then the table.
pub fn render_report_text(report: &Report, generated_on: &str) -> String {
    let h = headline(report);
    let mut out = String::new();
    out.push_str("Facebook Ads Campaign Report\n");
    out.push_str(&format!("Generated on: {}\n", generated_on));
    out.push_str(&format!("Reporting period: {}\n\n", h.reporting_period));
    out.push_str(&format!("Total Impressions: {}\n", h.total_impressions));
    out.push_str(&format!("Total Reach: {}\n", h.total_reach));
    out.push_str(&format!("Total Clicks: {}\n\n", h.total_clicks));
    out.push_str(&format!(
        "The campaign reached {} people with {} impressions and generated {} clicks.\n\n",
        h.total_reach, h.total_impressions, h.total_clicks
    ));
    out.push_str(&markdown_table(&table_rows(report)));
    out.push('\n');
    out
}

pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    debug!(path, rows = rows.len(), "Wrote CSV");
    Ok(())
}

pub fn write_json<T: Serialize + ?Sized>(path: &str, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    debug!(path, "Wrote JSON");
    Ok(())
}
