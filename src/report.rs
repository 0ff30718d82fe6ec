use crate::aggregate::aggregate;
use crate::error::Result;
use crate::normalize::normalize_rows;
use crate::schema::{validate, RequiredSchema};
use crate::types::{NormalizedRow, RawTable, Report, ReportAggregates, ReportingPeriod, TimeSeries};
use std::fmt;
use tracing::{debug, info};

pub const NOT_AVAILABLE: &str = "N/A";

impl ReportingPeriod {
    /// First row's start date through last row's end date.
    pub fn from_rows(rows: &[NormalizedRow]) -> Self {
        match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => ReportingPeriod {
                first: first.start_date.clone(),
                last: last.end_date.clone(),
            },
            _ => ReportingPeriod {
                first: NOT_AVAILABLE.to_string(),
                last: NOT_AVAILABLE.to_string(),
            },
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.first, self.last)
    }
}

pub fn assemble(rows: Vec<NormalizedRow>, aggregates: ReportAggregates, series: TimeSeries) -> Report {
    let period = ReportingPeriod::from_rows(&rows);
    Report {
        rows,
        aggregates,
        series,
        period,
    }
}

/// Validate, normalize, aggregate and assemble in one synchronous run.
///
/// Fails before any row is touched if the input is empty or a required
/// column is missing.
pub fn build_report(table: &RawTable, schema: &RequiredSchema) -> Result<Report> {
    validate(&table.records, schema)?;

    let rows = normalize_rows(&table.records);
    debug!(rows = rows.len(), "Normalized rows");

    let (aggregates, series) = aggregate(&rows);
    let report = assemble(rows, aggregates, series);
    info!(
        rows = report.rows.len(),
        period = %report.period,
        impressions = report.aggregates.total_impressions,
        reach = report.aggregates.total_reach,
        clicks = report.aggregates.total_clicks,
        "Report built"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::loader::parse_csv_str;

    const SAMPLE: &str = "\
Reporting starts,Reporting ends,Impressions,Reach,Clicks (all),CTR (all),Page engagement
2024-01-01,2024-01-07,1000,800,50,5.0,30
2024-01-08,2024-01-14,2000,1500,75,3.75,60
";

    #[test]
    fn zero_rows_period_is_not_available() {
        let period = ReportingPeriod::from_rows(&[]);
        assert_eq!(period.first, "N/A");
        assert_eq!(period.last, "N/A");
        assert_eq!(period.to_string(), "N/A to N/A");
    }

    #[test]
    fn builds_example_report() {
        let table = parse_csv_str(SAMPLE).unwrap();
        let report = build_report(&table, &RequiredSchema::default()).unwrap();

        assert_eq!(report.aggregates.total_impressions, 3000);
        assert_eq!(report.aggregates.total_reach, 2300);
        assert_eq!(report.aggregates.total_clicks, 125);
        assert_eq!(report.aggregates.total_page_engagement, 90);
        assert_eq!(report.period.to_string(), "2024-01-01 to 2024-01-14");
        assert_eq!(report.series.dates, vec!["2024-01-01", "2024-01-08"]);
        assert_eq!(report.series.reach, vec![800, 1500]);
        assert_eq!(report.series.clicks, vec![50, 75]);
    }

    #[test]
    fn same_input_builds_equal_reports() {
        let table = parse_csv_str(SAMPLE).unwrap();
        let schema = RequiredSchema::default();
        let a = build_report(&table, &schema).unwrap();
        let b = build_report(&table, &schema).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn exponent_cells_count_their_leading_digits() {
        let header = SAMPLE.lines().next().unwrap();
        let text = format!(
            "{header}\n2024-01-01,2024-01-07,1e300,1e300,5,1.0,1\n2024-01-08,2024-01-14,1e300,2,5,1.0,1\n"
        );
        let report = build_report(&parse_csv_str(&text).unwrap(), &RequiredSchema::default()).unwrap();
        assert_eq!(report.aggregates.total_impressions, 2);
        assert_eq!(report.aggregates.total_reach, 3);
    }

    #[test]
    fn missing_column_stops_the_run() {
        let table = parse_csv_str("Reporting starts,Impressions\n2024-01-01,1\n").unwrap();
        let err = build_report(&table, &RequiredSchema::default()).unwrap_err();
        assert!(matches!(err, ReportError::Schema { ref missing } if missing.len() == 5));
    }

    #[test]
    fn header_only_input_is_empty() {
        let header = SAMPLE.lines().next().unwrap();
        let table = parse_csv_str(header).unwrap();
        assert!(matches!(
            build_report(&table, &RequiredSchema::default()),
            Err(ReportError::EmptyInput)
        ));
    }
}
