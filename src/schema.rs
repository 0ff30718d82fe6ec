use crate::error::{ReportError, Result};
use crate::types::{
    RawRecord, COL_CLICKS, COL_CTR, COL_IMPRESSIONS, COL_PAGE_ENGAGEMENT, COL_REACH,
    COL_REPORTING_ENDS, COL_REPORTING_STARTS,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Columns a campaign export must carry, in the order they are reported.
pub static CAMPAIGN_COLUMNS: Lazy<RequiredSchema> = Lazy::new(|| {
    RequiredSchema::new([
        COL_REPORTING_STARTS,
        COL_REPORTING_ENDS,
        COL_IMPRESSIONS,
        COL_REACH,
        COL_CLICKS,
        COL_CTR,
        COL_PAGE_ENGAGEMENT,
    ])
});

/// Ordered set of column names that every record must contain.
///
/// Names are matched exactly, including case and parenthetical qualifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequiredSchema {
    columns: Vec<String>,
}

impl RequiredSchema {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Required names absent from `record`, in schema order.
    pub fn missing_from(&self, record: &RawRecord) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !record.contains(c))
            .cloned()
            .collect()
    }
}

impl Default for RequiredSchema {
    fn default() -> Self {
        CAMPAIGN_COLUMNS.clone()
    }
}

/// Check that the record set is non-empty and that its first record carries
/// every required column. Nothing downstream runs when this fails.
pub fn validate(records: &[RawRecord], schema: &RequiredSchema) -> Result<()> {
    let Some(first) = records.first() else {
        return Err(ReportError::EmptyInput);
    };
    let missing = schema.missing_from(first);
    if !missing.is_empty() {
        debug!(?missing, "Schema validation failed");
        return Err(ReportError::Schema { missing });
    }
    debug!(records = records.len(), "Schema validated");
    Ok(())
}
