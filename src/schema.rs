//! Structural validation of untrusted `npm audit --json` output.
//!
//! [`check`] walks the whole document and collects every [`Violation`] it
//! finds instead of stopping at the first one. An [`AuditReport`] can only be
//! obtained through this walk, so downstream code never touches raw JSON.

use crate::types::{AuditSeverity, FixAvailable, Vulnerability};
use serde_json::{Map, Value};
use std::fmt;

/// A single field that does not match the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub reason: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// A validated audit report. Entry order follows the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    version: u64,
    severity_counts: Vec<(String, u64)>,
    vulnerabilities: Vec<(String, Vulnerability)>,
}

impl AuditReport {
    pub fn from_value(value: &Value) -> Result<Self, Vec<Violation>> {
        check(value)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn severity_counts(&self) -> &[(String, u64)] {
        &self.severity_counts
    }

    pub fn vulnerabilities(&self) -> &[(String, Vulnerability)] {
        &self.vulnerabilities
    }

    /// Vulnerabilities on packages declared in the manifest itself.
    pub fn direct_vulnerabilities(&self) -> impl Iterator<Item = (&str, &Vulnerability)> {
        self.vulnerabilities
            .iter()
            .filter(|(_, v)| v.is_direct)
            .map(|(name, v)| (name.as_str(), v))
    }
}

/// Returns true when `candidate` is a well-formed audit report.
pub fn validate(candidate: &Value) -> bool {
    check(candidate).is_ok()
}

/// Validates `candidate` and builds the typed report, or returns every
/// violation found.
pub fn check(candidate: &Value) -> Result<AuditReport, Vec<Violation>> {
    let Some(root) = candidate.as_object() else {
        return Err(vec![Violation::new(
            "$",
            format!("expected an object, found {}", type_name(candidate)),
        )]);
    };

    let mut violations = Vec::new();

    let version = match root.get("auditReportVersion") {
        Some(v) => match v.as_u64() {
            Some(n) => Some(n),
            None => {
                violations.push(Violation::new(
                    "auditReportVersion",
                    format!("expected a non-negative integer, found {}", type_name(v)),
                ));
                None
            }
        },
        None => {
            violations.push(Violation::new("auditReportVersion", "missing"));
            None
        }
    };

    let severity_counts = match root
        .get("metadata")
        .and_then(|m| m.get("vulnerabilities"))
    {
        Some(Value::Object(counts)) => check_counts(counts, &mut violations),
        Some(other) => {
            violations.push(Violation::new(
                "metadata.vulnerabilities",
                format!("expected an object, found {}", type_name(other)),
            ));
            Vec::new()
        }
        None => {
            violations.push(Violation::new("metadata.vulnerabilities", "missing"));
            Vec::new()
        }
    };

    let vulnerabilities = match root.get("vulnerabilities") {
        Some(Value::Object(entries)) => check_vulnerabilities(entries, &mut violations),
        Some(other) => {
            violations.push(Violation::new(
                "vulnerabilities",
                format!("expected an object, found {}", type_name(other)),
            ));
            Vec::new()
        }
        None => {
            violations.push(Violation::new("vulnerabilities", "missing"));
            Vec::new()
        }
    };

    match version {
        Some(version) if violations.is_empty() => Ok(AuditReport {
            version,
            severity_counts,
            vulnerabilities,
        }),
        _ => Err(violations),
    }
}

fn check_counts(counts: &Map<String, Value>, violations: &mut Vec<Violation>) -> Vec<(String, u64)> {
    let mut out = Vec::with_capacity(counts.len());
    for (level, value) in counts {
        match value.as_u64() {
            Some(n) => out.push((level.clone(), n)),
            None => violations.push(Violation::new(
                format!("metadata.vulnerabilities.{level}"),
                format!("expected a non-negative integer, found {}", type_name(value)),
            )),
        }
    }
    out
}

fn check_vulnerabilities(
    entries: &Map<String, Value>,
    violations: &mut Vec<Violation>,
) -> Vec<(String, Vulnerability)> {
    let mut out = Vec::with_capacity(entries.len());
    for (name, value) in entries {
        if let Some(vuln) = check_vulnerability(name, value, violations) {
            out.push((name.clone(), vuln));
        }
    }
    out
}

fn check_vulnerability(
    name: &str,
    value: &Value,
    violations: &mut Vec<Violation>,
) -> Option<Vulnerability> {
    let prefix = format!("vulnerabilities.{name}");
    let Some(entry) = value.as_object() else {
        violations.push(Violation::new(
            prefix,
            format!("expected an object, found {}", type_name(value)),
        ));
        return None;
    };

    let severity = match entry.get("severity") {
        Some(Value::String(s)) => match s.parse::<AuditSeverity>() {
            Ok(sev) => Some(sev),
            Err(_) => {
                violations.push(Violation::new(
                    format!("{prefix}.severity"),
                    format!("unknown severity '{s}'"),
                ));
                None
            }
        },
        other => {
            violations.push(Violation::new(
                format!("{prefix}.severity"),
                format!("expected a string, found {}", opt_type_name(other)),
            ));
            None
        }
    };

    let is_direct = match entry.get("isDirect") {
        Some(Value::Bool(b)) => Some(*b),
        other => {
            violations.push(Violation::new(
                format!("{prefix}.isDirect"),
                format!("expected a boolean, found {}", opt_type_name(other)),
            ));
            None
        }
    };

    let fix_available = match entry.get("fixAvailable") {
        Some(Value::Bool(false)) => Some(FixAvailable::None),
        Some(Value::Object(fix)) => match (fix.get("name"), fix.get("version")) {
            (Some(Value::String(name)), Some(Value::String(version))) => {
                Some(FixAvailable::Upgrade {
                    name: name.clone(),
                    version: version.clone(),
                })
            }
            _ => {
                violations.push(Violation::new(
                    format!("{prefix}.fixAvailable"),
                    "expected string fields `name` and `version`",
                ));
                None
            }
        },
        other => {
            violations.push(Violation::new(
                format!("{prefix}.fixAvailable"),
                format!("expected false or an object, found {}", opt_type_name(other)),
            ));
            None
        }
    };

    Some(Vulnerability {
        severity: severity?,
        is_direct: is_direct?,
        fix_available: fix_available?,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(true) => "true",
        Value::Bool(false) => "false",
        Value::Number(n) if n.is_f64() => "a fractional number",
        Value::Number(n) if n.is_i64() && !n.is_u64() => "a negative number",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn opt_type_name(value: Option<&Value>) -> &'static str {
    value.map_or("nothing", type_name)
}
