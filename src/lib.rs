//! Campaign metrics report generator.
//!
//! Pipeline: CSV text -> [`loader`] -> [`schema`] check -> [`normalize`] ->
//! [`aggregate`] -> [`report`]. Everything after that ([`output`],
//! [`chart`], [`export`]) only renders an already built [`types::Report`].

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod convert;
pub mod demographics;
pub mod error;
pub mod export;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod report;
pub mod schema;
pub mod session;
pub mod types;
pub mod util;

pub use error::{ReportError, Result};
pub use report::build_report;
pub use types::Report;
