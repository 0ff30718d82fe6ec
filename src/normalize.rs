//! Row normalization: untyped record in, typed row out.
//!
//! Normalization never fails. A numeric cell that cannot be read as its
//! target type becomes zero, and the row is still kept.

use crate::types::{
    NormalizedRow, RawRecord, RawValue, COL_CLICKS, COL_CTR, COL_IMPRESSIONS,
    COL_PAGE_ENGAGEMENT, COL_REACH, COL_REPORTING_ENDS, COL_REPORTING_STARTS,
};
use crate::util::{parse_count_safe, parse_ratio_safe};

/// What an unreadable numeric cell turns into.
///
/// `ZeroDefault` is the only policy; a strict variant would slot in here
/// without changing the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoercionPolicy {
    #[default]
    ZeroDefault,
}

impl CoercionPolicy {
    pub fn count(self, value: Option<&RawValue>) -> u64 {
        match self {
            CoercionPolicy::ZeroDefault => read_count(value).unwrap_or(0),
        }
    }

    pub fn ratio(self, value: Option<&RawValue>) -> f64 {
        match self {
            CoercionPolicy::ZeroDefault => read_ratio(value).unwrap_or(0.0),
        }
    }
}

// Cells are always read from their text, numeric-typed or not, so
// `"1e3"` counts as 1 just like it does for `parseInt`.
fn read_count(value: Option<&RawValue>) -> Option<u64> {
    match value? {
        RawValue::Empty => None,
        v => parse_count_safe(Some(v.as_text())),
    }
}

fn read_ratio(value: Option<&RawValue>) -> Option<f64> {
    match value? {
        RawValue::Empty => None,
        v => parse_ratio_safe(Some(v.as_text())),
    }
}

/// Integer coercion under the default policy.
pub fn coerce_count(value: Option<&RawValue>) -> u64 {
    CoercionPolicy::ZeroDefault.count(value)
}

/// Floating-point coercion under the default policy.
pub fn coerce_ratio(value: Option<&RawValue>) -> f64 {
    CoercionPolicy::ZeroDefault.ratio(value)
}

fn text_field(record: &RawRecord, column: &str) -> String {
    record
        .get(column)
        .map(|v| v.as_text().to_string())
        .unwrap_or_default()
}

pub fn normalize_row(record: &RawRecord) -> NormalizedRow {
    NormalizedRow {
        start_date: text_field(record, COL_REPORTING_STARTS),
        end_date: text_field(record, COL_REPORTING_ENDS),
        impressions: coerce_count(record.get(COL_IMPRESSIONS)),
        reach: coerce_count(record.get(COL_REACH)),
        clicks: coerce_count(record.get(COL_CLICKS)),
        ctr: coerce_ratio(record.get(COL_CTR)),
        page_engagement: coerce_count(record.get(COL_PAGE_ENGAGEMENT)),
    }
}

pub fn normalize_rows(records: &[RawRecord]) -> Vec<NormalizedRow> {
    records.iter().map(normalize_row).collect()
}
