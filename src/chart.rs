//! Grouped bar chart of reach and clicks per date.
//!
//! Click bars are multiplied by a display-only factor so they are visible
//! next to reach bars; their labels always show the raw counts. The
//! scaling happens here and nowhere else.

use crate::types::TimeSeries;
use crate::util::format_int;

pub const REACH_LABEL: &str = "Reach";
pub const CLICKS_LABEL: &str = "Clicks (scaled)";

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    /// Bar heights as drawn.
    pub values: Vec<f64>,
    /// Per-bar labels, always derived from the unscaled values.
    pub value_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSpec {
    pub fn from_series(series: &TimeSeries, clicks_scale: f64) -> Self {
        let reach = Dataset {
            label: REACH_LABEL.to_string(),
            values: series.reach.iter().map(|&v| v as f64).collect(),
            value_labels: series.reach.iter().map(|&v| format_int(v)).collect(),
        };
        let clicks = Dataset {
            label: CLICKS_LABEL.to_string(),
            values: series.clicks.iter().map(|&v| v as f64 * clicks_scale).collect(),
            value_labels: series.clicks.iter().map(|&v| format_int(v)).collect(),
        };
        ChartSpec {
            labels: series.dates.clone(),
            datasets: vec![reach, clicks],
        }
    }

    pub fn max_value(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|d| d.values.iter().copied())
            .fold(0.0, f64::max)
    }
}

/// Draws a chart. Implementations own every display-only transform.
pub trait ChartRenderer {
    type Output;

    fn render(&self, chart: &ChartSpec) -> Self::Output;
}

/// Horizontal text bars, one group per date.
#[derive(Debug, Clone)]
pub struct TextBarChart {
    pub width: usize,
}

impl Default for TextBarChart {
    fn default() -> Self {
        Self { width: 40 }
    }
}

impl TextBarChart {
    fn bar_len(&self, value: f64, max: f64) -> usize {
        if max <= 0.0 || value <= 0.0 {
            return 0;
        }
        let len = (value / max * self.width as f64).round() as usize;
        len.clamp(1, self.width)
    }
}

impl ChartRenderer for TextBarChart {
    type Output = Vec<String>;

    fn render(&self, chart: &ChartSpec) -> Vec<String> {
        let max = chart.max_value();
        let name_width = chart
            .datasets
            .iter()
            .map(|d| d.label.len())
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        for (idx, date) in chart.labels.iter().enumerate() {
            lines.push(date.clone());
            for (d, glyph) in chart.datasets.iter().zip(['#', '=']) {
                let value = d.values.get(idx).copied().unwrap_or(0.0);
                let label = d.value_labels.get(idx).map(String::as_str).unwrap_or("");
                let bar: String = std::iter::repeat(glyph).take(self.bar_len(value, max)).collect();
                lines.push(format!(
                    "  {:<name_width$} |{:<width$}| {}",
                    d.label,
                    bar,
                    label,
                    width = self.width
                ));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> TimeSeries {
        TimeSeries {
            dates: vec!["2024-01-01".to_string(), "2024-01-08".to_string()],
            reach: vec![800, 1500],
            clicks: vec![50, 75],
        }
    }

    #[test]
    fn clicks_are_scaled_but_labelled_raw() {
        let chart = ChartSpec::from_series(&series(), 30.0);
        let clicks = &chart.datasets[1];
        assert_eq!(clicks.label, "Clicks (scaled)");
        assert_eq!(clicks.values, vec![1500.0, 2250.0]);
        assert_eq!(clicks.value_labels, vec!["50", "75"]);
    }

    #[test]
    fn reach_is_not_scaled() {
        let chart = ChartSpec::from_series(&series(), 30.0);
        assert_eq!(chart.datasets[0].values, vec![800.0, 1500.0]);
        assert_eq!(chart.datasets[0].value_labels, vec!["800", "1,500"]);
        assert_eq!(chart.labels, vec!["2024-01-01", "2024-01-08"]);
    }

    #[test]
    fn scaling_leaves_series_untouched() {
        let s = series();
        let _ = ChartSpec::from_series(&s, 30.0);
        assert_eq!(s.clicks, vec![50, 75]);
    }

    #[test]
    fn text_chart_draws_group_per_date() {
        let chart = ChartSpec::from_series(&series(), 30.0);
        let lines = TextBarChart { width: 10 }.render(&chart);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "2024-01-01");
        // The largest bar (scaled clicks on the second date) fills the width.
        assert!(lines[5].contains("|==========| 75"));
    }

    #[test]
    fn empty_series_renders_nothing() {
        let chart = ChartSpec::from_series(&TimeSeries::default(), 30.0);
        assert!(TextBarChart::default().render(&chart).is_empty());
        assert_eq!(chart.max_value(), 0.0);
    }
}
