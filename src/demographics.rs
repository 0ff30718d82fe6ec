//! Gender x age breakdown of an ad-set export.

use crate::error::Result;
use crate::normalize::coerce_count;
use crate::schema::{validate, RequiredSchema};
use crate::types::{DemographicRow, RawTable, COL_CLICKS, COL_IMPRESSIONS, COL_REACH};
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::info;

pub const COL_GENDER: &str = "Gender";
pub const COL_AGE: &str = "Age";

pub const GENDER_ORDER: [&str; 3] = ["female", "male", "unknown"];
pub const AGE_ORDER: [&str; 7] = ["13-17", "18-24", "25-34", "35-44", "45-54", "55-64", "65+"];

pub static DEMOGRAPHIC_COLUMNS: Lazy<RequiredSchema> = Lazy::new(|| {
    RequiredSchema::new([COL_GENDER, COL_AGE, COL_IMPRESSIONS, COL_REACH, COL_CLICKS])
});

/// Values outside `order` sort after every listed value, then by text.
fn category_cmp(order: &[&str], a: &str, b: &str) -> Ordering {
    let rank = |v: &str| order.iter().position(|o| *o == v).unwrap_or(order.len());
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

pub fn gender_age_breakdown(table: &RawTable) -> Result<Vec<DemographicRow>> {
    validate(&table.records, &DEMOGRAPHIC_COLUMNS)?;

    let mut map: HashMap<(String, String), DemographicRow> = HashMap::new();
    for r in &table.records {
        let gender = r.get(COL_GENDER).map(|v| v.as_text().trim().to_string()).unwrap_or_default();
        let age = r.get(COL_AGE).map(|v| v.as_text().trim().to_string()).unwrap_or_default();
        let e = map
            .entry((gender.clone(), age.clone()))
            .or_insert_with(|| DemographicRow {
                gender,
                age,
                total_impressions: 0,
                total_reach: 0,
                total_clicks: 0,
            });
        e.total_impressions = e.total_impressions.saturating_add(coerce_count(r.get(COL_IMPRESSIONS)));
        e.total_reach = e.total_reach.saturating_add(coerce_count(r.get(COL_REACH)));
        e.total_clicks = e.total_clicks.saturating_add(coerce_count(r.get(COL_CLICKS)));
    }

    let mut rows: Vec<DemographicRow> = map.into_values().collect();
    rows.sort_by(|a, b| {
        category_cmp(&GENDER_ORDER, &a.gender, &b.gender)
            .then_with(|| category_cmp(&AGE_ORDER, &a.age, &b.age))
    });
    info!(groups = rows.len(), "Built gender/age breakdown");
    Ok(rows)
}
