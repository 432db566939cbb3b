use crate::error::ConvertError;
use crate::types::{AuditSeverity, IssueSeverity};

#[derive(Debug, Clone)]
pub struct Rule {
    pub id: &'static str,
    pub message: &'static str,
}

pub const RULE_DEPENDENCY_VULNERABILITY: Rule = Rule {
    id: "dependency-vulnerability",
    message: "Direct dependency with a known vulnerability",
};

pub const RULE_SUMMARY: Rule = Rule {
    id: "summary-dependency-vulnerability",
    message: "Vulnerability counts by severity for the whole dependency tree",
};

pub fn all_rules() -> &'static [Rule] {
    &[RULE_DEPENDENCY_VULNERABILITY, RULE_SUMMARY]
}

/// Engine id shared by every issue produced from one audit report.
pub fn engine_id(report_version: u64) -> String {
    format!("npm-audit-{}", report_version)
}

impl From<AuditSeverity> for IssueSeverity {
    fn from(severity: AuditSeverity) -> Self {
        match severity {
            AuditSeverity::Info => IssueSeverity::Info,
            AuditSeverity::Low | AuditSeverity::Moderate => IssueSeverity::Minor,
            AuditSeverity::High => IssueSeverity::Major,
            AuditSeverity::Critical => IssueSeverity::Critical,
        }
    }
}

/// Maps a raw audit severity name. Anything outside the five npm levels is an
/// internal inconsistency, since validation already rejected it.
pub fn issue_severity(severity: &str) -> Result<IssueSeverity, ConvertError> {
    severity
        .parse::<AuditSeverity>()
        .map(IssueSeverity::from)
        .map_err(ConvertError::UnknownSeverity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_audit_severity() {
        let expected = [
            ("info", IssueSeverity::Info),
            ("low", IssueSeverity::Minor),
            ("moderate", IssueSeverity::Minor),
            ("high", IssueSeverity::Major),
            ("critical", IssueSeverity::Critical),
        ];
        for (input, output) in expected {
            assert_eq!(issue_severity(input).unwrap(), output, "{input}");
        }
    }

    #[test]
    fn unknown_severity_is_an_error() {
        let err = issue_severity("severe").unwrap_err();
        assert!(matches!(err, ConvertError::UnknownSeverity(ref s) if s == "severe"));
    }

    #[test]
    fn engine_id_carries_report_version() {
        assert_eq!(engine_id(2), "npm-audit-2");
    }

    #[test]
    fn rule_ids_are_distinct() {
        let rules = all_rules();
        assert_eq!(rules.len(), 2);
        assert_ne!(rules[0].id, rules[1].id);
    }
}
