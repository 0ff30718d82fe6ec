use serde::Serialize;
use std::collections::HashMap;
use tabled::Tabled;

pub const COL_REPORTING_STARTS: &str = "Reporting starts";
pub const COL_REPORTING_ENDS: &str = "Reporting ends";
pub const COL_IMPRESSIONS: &str = "Impressions";
pub const COL_REACH: &str = "Reach";
pub const COL_CLICKS: &str = "Clicks (all)";
pub const COL_CTR: &str = "CTR (all)";
pub const COL_PAGE_ENGAGEMENT: &str = "Page engagement";

/// An untyped cell as handed over by the CSV parser.
///
/// Cells that look numeric are typed as numbers at parse time, everything
/// else stays text. The original cell text is kept for numbers so text
/// columns can still be passed through verbatim. `Empty` is a
/// present-but-blank cell; a column missing from a record entirely is simply
/// not in the map.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number { value: f64, text: String },
    Text(String),
    Empty,
}

impl RawValue {
    /// Type a raw cell the way a header-driven, dynamically typed parser does.
    pub fn from_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return RawValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => RawValue::Number {
                value,
                text: cell.to_string(),
            },
            _ => RawValue::Text(cell.to_string()),
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            RawValue::Number { text, .. } => text,
            RawValue::Text(s) => s,
            RawValue::Empty => "",
        }
    }
}

/// One parsed line of the input, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, RawValue>,
}

impl RawRecord {
    pub fn new(fields: HashMap<String, RawValue>) -> Self {
        Self { fields }
    }

    /// Convenience for building records from literal text cells.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: AsRef<str>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), RawValue::from_cell(v.as_ref())))
            .collect();
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.fields.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Parsed input: the header row plus all records in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    pub start_date: String,
    pub end_date: String,
    pub impressions: u64,
    pub reach: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub page_engagement: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportAggregates {
    pub total_impressions: u64,
    pub total_reach: u64,
    pub total_clicks: u64,
    pub total_page_engagement: u64,
}

/// Index-aligned series feeding the chart; values are never rescaled here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    pub dates: Vec<String>,
    pub reach: Vec<u64>,
    pub clicks: Vec<u64>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportingPeriod {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub rows: Vec<NormalizedRow>,
    pub aggregates: ReportAggregates,
    pub series: TimeSeries,
    pub period: ReportingPeriod,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct MetricsTableRow {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: String,
    #[serde(rename = "Impressions")]
    #[tabled(rename = "Impressions")]
    pub impressions: String,
    #[serde(rename = "Reach")]
    #[tabled(rename = "Reach")]
    pub reach: String,
    #[serde(rename = "CTR (%)")]
    #[tabled(rename = "CTR (%)")]
    pub ctr: String,
    #[serde(rename = "Clicks")]
    #[tabled(rename = "Clicks")]
    pub clicks: String,
    #[serde(rename = "Page Engagement")]
    #[tabled(rename = "Page Engagement")]
    pub page_engagement: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Headline {
    pub total_impressions: String,
    pub total_reach: String,
    pub total_clicks: String,
    pub reporting_period: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub generated_on: String,
    pub rows: usize,
    pub reporting_starts: String,
    pub reporting_ends: String,
    pub total_impressions: u64,
    pub total_reach: u64,
    pub total_clicks: u64,
    pub total_page_engagement: u64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct DemographicRow {
    #[serde(rename = "Gender")]
    #[tabled(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    #[tabled(rename = "Age")]
    pub age: String,
    #[serde(rename = "Total_Impressions")]
    #[tabled(rename = "Total_Impressions")]
    pub total_impressions: u64,
    #[serde(rename = "Total_Reach")]
    #[tabled(rename = "Total_Reach")]
    pub total_reach: u64,
    #[serde(rename = "Total_Clicks")]
    #[tabled(rename = "Total_Clicks")]
    pub total_clicks: u64,
}
