//! Conversion of `npm audit --json` reports into SonarQube generic issue
//! reports.
//!
//! - `schema`: validation of the untrusted audit document into an [`AuditReport`].
//! - `rules`: rule ids and the npm → SonarQube severity mapping.
//! - `locate`: line/column lookup of a dependency inside `package.json`.
//! - `report`: issue list assembly and JSON rendering.
//! - `engine`: the read → validate → build → write pipeline.
//! - `logging`: injected diagnostics sink and tracing setup.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod locate;
pub mod logging;
pub mod report;
pub mod rules;
pub mod schema;
pub mod types;

pub use config::Parameters;
pub use engine::Converter;
pub use error::{ConvertError, ErrorKind};
pub use locate::LocateMode;
pub use schema::{AuditReport, Violation};
pub use types::{Issue, IssueReport, IssueSeverity};
