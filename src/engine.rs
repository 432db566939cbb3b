//! Conversion pipeline: read → parse → validate → build issues → write.
//!
//! Every step is terminal on failure. The output file is only touched once
//! the full issue list has been built and rendered.

use crate::config::Parameters;
use crate::error::ConvertError;
use crate::locate::LocateMode;
use crate::logging::{Category, Diagnostic, DiagnosticLevel, DiagnosticSink};
use crate::report;
use crate::schema::{self, AuditReport};
use crate::types::IssueReport;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub struct Converter<'a, S: DiagnosticSink + ?Sized> {
    sink: &'a S,
    mode: LocateMode,
}

impl<'a, S: DiagnosticSink + ?Sized> Converter<'a, S> {
    pub fn new(sink: &'a S) -> Self {
        Self {
            sink,
            mode: LocateMode::default(),
        }
    }

    pub fn with_locate_mode(mut self, mode: LocateMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn run(&self, params: &Parameters) -> Result<IssueReport, ConvertError> {
        let input = display(&params.input_file_path);
        let manifest_path = display(&params.package_file_path);
        let output = display(&params.output_file_path);

        self.info(Category::Io, format!("converting {}", input));

        let text = self.read(&params.input_file_path, "input file read failed")?;
        let value = self.parse(&text, &input)?;
        let audit = self.validate(&value)?;

        // Left empty when no direct vulnerability needs a position.
        let manifest = if audit.direct_vulnerabilities().next().is_some() {
            self.read(&params.package_file_path, "package file read failed")?
        } else {
            String::new()
        };

        let issues = report::build_issues(&audit, &manifest, &manifest_path, self.mode)
            .inspect_err(|e| self.error(Category::Data, "dependency location failed", e))?;
        let rendered = report::render(&issues)
            .inspect_err(|e| self.error(Category::Data, "issue report serialization failed", e))?;
        self.sink.emit(
            Diagnostic::new(DiagnosticLevel::Debug, Category::Data, "issues generated")
                .with_detail(issues.issues.len()),
        );

        fs::write(&params.output_file_path, rendered)
            .map_err(|source| ConvertError::Write {
                path: output.clone(),
                source,
            })
            .inspect_err(|e| self.error(Category::Io, "output file write failed", e))?;

        self.info(Category::Io, format!("report written to {}", output));
        Ok(issues)
    }

    fn read(&self, path: &Path, message: &str) -> Result<String, ConvertError> {
        fs::read_to_string(path)
            .map_err(|source| ConvertError::Read {
                path: display(path),
                source,
            })
            .inspect_err(|e| self.error(Category::Io, message, e))
    }

    fn parse(&self, text: &str, path: &str) -> Result<Value, ConvertError> {
        serde_json::from_str(text)
            .map_err(|source| ConvertError::Parse {
                path: path.to_string(),
                source,
            })
            .inspect_err(|e| self.error(Category::Data, "entry data invalid, parsing error", e))
    }

    fn validate(&self, value: &Value) -> Result<AuditReport, ConvertError> {
        schema::check(value).map_err(|violations| {
            for violation in &violations {
                self.error(Category::Data, "invalid audit report field", violation);
            }
            ConvertError::Schema { violations }
        })
    }

    fn info(&self, category: Category, message: String) {
        self.sink
            .emit(Diagnostic::new(DiagnosticLevel::Info, category, message));
    }

    fn error(&self, category: Category, message: &str, detail: impl std::fmt::Display) {
        self.sink
            .emit(Diagnostic::new(DiagnosticLevel::Error, category, message).with_detail(detail));
    }
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
