use ads_report::chart::ChartSpec;
use ads_report::config::ReportConfig;
use ads_report::export::{export_report, report_region_lines, ControlState, PdfExporter, Snapshot};
use ads_report::loader::{load_csv, parse_csv_str};
use ads_report::output::table_rows;
use ads_report::schema::RequiredSchema;
use ads_report::session::ReportSession;
use ads_report::types::RawRecord;
use ads_report::{build_report, ReportError};
use std::env;
use std::fs;
use std::path::Path;

const FIXTURE: &str = "tests/fixtures/campaign.csv";

#[test]
fn test_full_pipeline_from_fixture() {
    let table = load_csv(FIXTURE).expect("Failed to load fixture");
    let report = build_report(&table, &RequiredSchema::default()).unwrap();

    assert_eq!(report.rows.len(), 3);
    // The unreadable impressions cell counts as zero, the row is kept.
    assert_eq!(report.rows[2].impressions, 0);
    assert_eq!(report.rows[2].ctr, 0.0);
    assert_eq!(report.aggregates.total_impressions, 3000);
    assert_eq!(report.aggregates.total_reach, 2700);
    assert_eq!(report.aggregates.total_clicks, 150);
    assert_eq!(report.aggregates.total_page_engagement, 100);
    assert_eq!(report.series.len(), 3);
    assert_eq!(report.period.to_string(), "2024-01-01 to 2024-01-21");
}

#[test]
fn test_totals_equal_column_sums() {
    let rows: Vec<RawRecord> = (0..50u64)
        .map(|i| {
            RawRecord::from_pairs([
                ("Reporting starts".to_string(), format!("day-{i}")),
                ("Reporting ends".to_string(), format!("day-{i}")),
                ("Impressions".to_string(), (i * 10).to_string()),
                ("Reach".to_string(), (i * 7).to_string()),
                ("Clicks (all)".to_string(), i.to_string()),
                ("CTR (all)".to_string(), "1.0".to_string()),
                ("Page engagement".to_string(), (i % 3).to_string()),
            ])
        })
        .collect();
    let table = ads_report::types::RawTable {
        headers: vec![],
        records: rows,
    };
    let report = build_report(&table, &RequiredSchema::default()).unwrap();

    let n: u64 = (0..50).sum();
    assert_eq!(report.aggregates.total_impressions, n * 10);
    assert_eq!(report.aggregates.total_reach, n * 7);
    assert_eq!(report.aggregates.total_clicks, n);
    assert_eq!(
        report.aggregates.total_page_engagement,
        (0..50u64).map(|i| i % 3).sum::<u64>()
    );
    assert_eq!(report.series.dates.len(), 50);
    assert_eq!(report.series.reach.len(), 50);
    assert_eq!(report.series.clicks.len(), 50);
    assert_eq!(report.series.dates[49], "day-49");
    assert_eq!(report.series.clicks[49], 49);
}

#[test]
fn test_missing_columns_reported_exactly() {
    let text = "Reporting starts,Reach,CTR (all)\n2024-01-01,1,1.0\n";
    let table = parse_csv_str(text).unwrap();
    match build_report(&table, &RequiredSchema::default()) {
        Err(ReportError::Schema { missing }) => assert_eq!(
            missing,
            vec!["Reporting ends", "Impressions", "Clicks (all)", "Page engagement"]
        ),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn test_rebuilding_is_idempotent() {
    let bytes = fs::read_to_string(FIXTURE).unwrap();
    let a = build_report(&parse_csv_str(&bytes).unwrap(), &RequiredSchema::default()).unwrap();
    let b = build_report(&parse_csv_str(&bytes).unwrap(), &RequiredSchema::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_table_has_total_row() {
    let table = load_csv(FIXTURE).unwrap();
    let report = build_report(&table, &RequiredSchema::default()).unwrap();
    let rows = table_rows(&report);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3].date, "Total");
    assert_eq!(rows[3].ctr, "-");
}

#[test]
fn test_session_run_then_export() {
    let config = ReportConfig::default();
    let mut session = ReportSession::new();
    session.run(Path::new(FIXTURE), &config).unwrap();
    assert!(session.is_visible());

    let report = session.report().unwrap();
    let chart = session.chart().unwrap();
    assert_eq!(chart, &ChartSpec::from_series(&report.series, config.clicks_scale));

    let snapshot = Snapshot::capture(
        report_region_lines(report, chart, "2026-10-16"),
        config.capture_scale,
    );
    let path = env::temp_dir().join("ads_report_it_export.pdf");
    let _ = fs::remove_file(&path);

    export_report(
        &mut session.export_control,
        &PdfExporter::new(config.page),
        &snapshot,
        &path,
    )
    .unwrap();

    assert_eq!(session.export_control.state(), ControlState::Ready);
    assert!(fs::metadata(&path).unwrap().len() > 0);
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_failed_run_keeps_one_message() {
    let path = env::temp_dir().join("ads_report_it_empty.csv");
    fs::write(&path, "Reporting starts,Reporting ends\n").unwrap();

    let mut session = ReportSession::new();
    assert!(matches!(
        session.run(&path, &ReportConfig::default()),
        Err(ReportError::EmptyInput)
    ));
    assert_eq!(
        session.message(),
        Some("CSV file is empty or contains no valid data.")
    );
    assert!(!session.is_visible());

    fs::remove_file(&path).unwrap();
}
