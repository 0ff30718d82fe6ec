//! Report configuration.
//!
//! Defaults are built in; a JSON file can override any subset of fields.

use crate::error::{ReportError, Result};
use crate::schema::RequiredSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Page geometry in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// A4 portrait at 72 dpi (210mm x 297mm).
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub required_columns: RequiredSchema,
    /// Display-only multiplier applied to click bars so they are comparable
    /// with reach bars. Labels always show the raw counts.
    pub clicks_scale: f64,
    /// Resolution multiplier used when snapshotting the report for export.
    pub capture_scale: f64,
    pub page: PageSize,
    pub pdf_file: String,
    pub table_csv_file: String,
    pub summary_json_file: String,
    pub demographics_json_file: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            required_columns: RequiredSchema::default(),
            clicks_scale: 30.0,
            capture_scale: 2.0,
            page: PageSize::A4,
            pdf_file: "facebook_ads_report.pdf".to_string(),
            table_csv_file: "report_table.csv".to_string(),
            summary_json_file: "report_summary.json".to_string(),
            demographics_json_file: "gender_age_data.json".to_string(),
        }
    }
}

impl ReportConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: ReportConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!(path = %path.display(), "Loaded report config");
        Ok(config)
    }

    /// Reject geometry and scales the layout and chart code cannot work with.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.page.width) || !positive(self.page.height) {
            return Err(ReportError::Config(format!(
                "page size must be positive, got {} x {}",
                self.page.width, self.page.height
            )));
        }
        if !positive(self.capture_scale) {
            return Err(ReportError::Config(format!(
                "capture_scale must be positive, got {}",
                self.capture_scale
            )));
        }
        if !self.clicks_scale.is_finite() || self.clicks_scale < 0.0 {
            return Err(ReportError::Config(format!(
                "clicks_scale must be zero or positive, got {}",
                self.clicks_scale
            )));
        }
        Ok(())
    }

    /// Load from `path` when given, otherwise fall back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn defaults_match_facebook_export() {
        let config = ReportConfig::default();
        assert_eq!(config.clicks_scale, 30.0);
        assert_eq!(config.pdf_file, "facebook_ads_report.pdf");
        assert_eq!(config.page, PageSize::A4);
        assert_eq!(config.required_columns.columns().len(), 7);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let path = env::temp_dir().join("ads_report_test_config.json");
        fs::write(&path, r#"{ "clicks_scale": 10.0, "pdf_file": "out.pdf" }"#).unwrap();

        let config = ReportConfig::from_file(&path).unwrap();
        assert_eq!(config.clicks_scale, 10.0);
        assert_eq!(config.pdf_file, "out.pdf");
        assert_eq!(config.capture_scale, 2.0);
        assert_eq!(config.required_columns, RequiredSchema::default());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn zero_page_height_is_rejected() {
        let path = env::temp_dir().join("ads_report_test_config_zero_page.json");
        fs::write(&path, r#"{ "page": { "width": 595.28, "height": 0 } }"#).unwrap();

        let err = ReportConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
        assert!(err.to_string().starts_with("Invalid configuration: "));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn validate_rejects_bad_scales() {
        let mut config = ReportConfig::default();
        assert!(config.validate().is_ok());

        config.capture_scale = 0.0;
        assert!(matches!(config.validate(), Err(ReportError::Config(_))));

        config.capture_scale = 2.0;
        config.clicks_scale = -1.0;
        assert!(matches!(config.validate(), Err(ReportError::Config(_))));

        config.clicks_scale = 30.0;
        config.page.width = f64::NAN;
        assert!(matches!(config.validate(), Err(ReportError::Config(_))));
    }

    #[test]
    fn load_without_path_uses_defaults() {
        let config = ReportConfig::load(None).unwrap();
        assert_eq!(config.table_csv_file, "report_table.csv");
    }
}
