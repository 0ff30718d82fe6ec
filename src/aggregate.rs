use crate::types::{NormalizedRow, ReportAggregates, TimeSeries};

impl ReportAggregates {
    /// Fold one row into the running totals. Totals saturate at `u64::MAX`.
    pub fn add(&mut self, row: &NormalizedRow) {
        self.total_impressions = self.total_impressions.saturating_add(row.impressions);
        self.total_reach = self.total_reach.saturating_add(row.reach);
        self.total_clicks = self.total_clicks.saturating_add(row.clicks);
        self.total_page_engagement = self
            .total_page_engagement
            .saturating_add(row.page_engagement);
    }
}

impl TimeSeries {
    pub fn push(&mut self, row: &NormalizedRow) {
        self.dates.push(row.start_date.clone());
        self.reach.push(row.reach);
        self.clicks.push(row.clicks);
    }
}

/// Single pass over the rows in input order. Every row lands in every total
/// and at the same index in every series.
pub fn aggregate(rows: &[NormalizedRow]) -> (ReportAggregates, TimeSeries) {
    let mut totals = ReportAggregates::default();
    let mut series = TimeSeries {
        dates: Vec::with_capacity(rows.len()),
        reach: Vec::with_capacity(rows.len()),
        clicks: Vec::with_capacity(rows.len()),
    };
    for row in rows {
        totals.add(row);
        series.push(row);
    }
    (totals, series)
}
