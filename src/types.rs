use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Severity levels reported by `npm audit`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum AuditSeverity {
    Info,
    Low,
    Moderate,
    High,
    Critical,
}

impl AuditSeverity {
    pub const ALL: [AuditSeverity; 5] = [
        AuditSeverity::Info,
        AuditSeverity::Low,
        AuditSeverity::Moderate,
        AuditSeverity::High,
        AuditSeverity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditSeverity::Info => "info",
            AuditSeverity::Low => "low",
            AuditSeverity::Moderate => "moderate",
            AuditSeverity::High => "high",
            AuditSeverity::Critical => "critical",
        }
    }
}

impl FromStr for AuditSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuditSeverity::ALL
            .into_iter()
            .find(|sev| sev.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for AuditSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remediation advertised by the audit for a vulnerable package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixAvailable {
    None,
    Upgrade { name: String, version: String },
}

/// One entry of the audit `vulnerabilities` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vulnerability {
    pub severity: AuditSeverity,
    pub is_direct: bool,
    pub fix_available: FixAvailable,
}

/// Severity buckets understood by the SonarQube generic issue format.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueSeverity {
    Info,
    Minor,
    Major,
    Critical,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    Vulnerability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    pub start_line: usize,
    pub start_column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub message: String,
    pub file_path: String,
    pub text_range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub engine_id: String,
    pub rule_id: &'static str,
    pub severity: IssueSeverity,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub primary_location: Location,
}

impl Issue {
    pub fn new(
        engine_id: String,
        rule_id: &'static str,
        severity: IssueSeverity,
        primary_location: Location,
    ) -> Self {
        Self {
            engine_id,
            rule_id,
            severity,
            issue_type: IssueType::Vulnerability,
            primary_location,
        }
    }
}

/// Top-level document written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueReport {
    pub issues: Vec<Issue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_severity() {
        for sev in AuditSeverity::ALL {
            assert_eq!(sev.as_str().parse::<AuditSeverity>(), Ok(sev));
        }
    }

    #[test]
    fn rejects_unknown_or_uppercase_severity() {
        assert!("severe".parse::<AuditSeverity>().is_err());
        assert!("HIGH".parse::<AuditSeverity>().is_err());
    }

    #[test]
    fn summary_range_omits_end_column() {
        let range = TextRange {
            start_line: 1,
            start_column: 0,
            end_column: None,
        };
        let json = serde_json::to_value(&range).unwrap();
        assert_eq!(json, serde_json::json!({ "startLine": 1, "startColumn": 0 }));
    }

    #[test]
    fn issue_serializes_with_sonar_field_names() {
        let issue = Issue::new(
            "npm-audit-2".to_string(),
            "dependency-vulnerability",
            IssueSeverity::Major,
            Location {
                message: "m".to_string(),
                file_path: "/p/package.json".to_string(),
                text_range: TextRange {
                    start_line: 5,
                    start_column: 4,
                    end_column: Some(12),
                },
            },
        );
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["engineId"], "npm-audit-2");
        assert_eq!(json["ruleId"], "dependency-vulnerability");
        assert_eq!(json["severity"], "MAJOR");
        assert_eq!(json["type"], "VULNERABILITY");
        assert_eq!(json["primaryLocation"]["filePath"], "/p/package.json");
        assert_eq!(json["primaryLocation"]["textRange"]["endColumn"], 12);
    }
}
