use thiserror::Error;

/// Everything that can stop a report run.
///
/// `Read`, `Parse`, `EmptyInput` and `Schema` are mutually exclusive and terminal for
/// the current run; their `Display` text is what the user sees.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read CSV file: {0}")]
    Read(String),

    #[error("Error parsing CSV: {0}")]
    Parse(String),

    #[error("CSV file is empty or contains no valid data.")]
    EmptyInput,

    #[error(
        "Missing required CSV columns: {}. Please ensure your CSV has these exact headers.",
        .missing.join(", ")
    )]
    Schema { missing: Vec<String> },

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<lopdf::Error> for ReportError {
    fn from(e: lopdf::Error) -> Self {
        ReportError::Export(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_message_lists_missing_columns_comma_joined() {
        let err = ReportError::Schema {
            missing: vec!["Reach".to_string(), "CTR (all)".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required CSV columns: Reach, CTR (all). Please ensure your CSV has these exact headers."
        );
    }

    #[test]
    fn parse_message_is_surfaced_verbatim() {
        let err = ReportError::Parse("found record with 2 fields".to_string());
        assert_eq!(err.to_string(), "Error parsing CSV: found record with 2 fields");
    }

    #[test]
    fn read_message_carries_the_os_error() {
        let err = ReportError::Read("No such file or directory (os error 2)".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to read CSV file: No such file or directory (os error 2)"
        );
    }

    #[test]
    fn empty_input_message() {
        assert_eq!(
            ReportError::EmptyInput.to_string(),
            "CSV file is empty or contains no valid data."
        );
    }
}
