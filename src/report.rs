use crate::error::ConvertError;
use crate::locate::{self, LocateMode};
use crate::rules::{self, RULE_DEPENDENCY_VULNERABILITY, RULE_SUMMARY};
use crate::schema::AuditReport;
use crate::types::{
    FixAvailable, Issue, IssueReport, IssueSeverity, Location, TextRange, Vulnerability,
};
use colored::*;
use serde::Serialize;

const JSON_INDENT: &[u8] = b"    ";

/// One issue per direct vulnerability in report order, then the summary.
pub fn build_issues(
    audit: &AuditReport,
    manifest: &str,
    manifest_path: &str,
    mode: LocateMode,
) -> Result<IssueReport, ConvertError> {
    let engine_id = rules::engine_id(audit.version());
    let mut issues = Vec::new();

    for (name, vuln) in audit.direct_vulnerabilities() {
        let text_range = locate::locate(manifest, name, manifest_path, mode)?;
        issues.push(dependency_issue(&engine_id, name, vuln, manifest_path, text_range));
    }

    issues.push(summary_issue(&engine_id, audit, manifest_path));
    Ok(IssueReport { issues })
}

fn dependency_issue(
    engine_id: &str,
    name: &str,
    vuln: &Vulnerability,
    manifest_path: &str,
    text_range: TextRange,
) -> Issue {
    let mut message = format!("The dependency {} has vulnerability", name);
    if let FixAvailable::Upgrade { name, version } = &vuln.fix_available {
        message.push_str(&format!(", fix available in {} version : {}", name, version));
    }

    Issue::new(
        engine_id.to_string(),
        RULE_DEPENDENCY_VULNERABILITY.id,
        vuln.severity.into(),
        Location {
            message,
            file_path: manifest_path.to_string(),
            text_range,
        },
    )
}

fn summary_issue(engine_id: &str, audit: &AuditReport, manifest_path: &str) -> Issue {
    Issue::new(
        engine_id.to_string(),
        RULE_SUMMARY.id,
        IssueSeverity::Info,
        Location {
            message: summary_message(audit),
            file_path: manifest_path.to_string(),
            text_range: TextRange {
                start_line: 1,
                start_column: 0,
                end_column: None,
            },
        },
    )
}

fn summary_message(audit: &AuditReport) -> String {
    audit
        .severity_counts()
        .iter()
        .map(|(level, count)| format!("- {} {}", count, level))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty JSON with four-space indentation, no trailing newline.
pub fn render(report: &IssueReport) -> Result<String, ConvertError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    report.serialize(&mut ser).map_err(ConvertError::Serialize)?;
    String::from_utf8(buf).map_err(|e| ConvertError::Serialize(serde::ser::Error::custom(e)))
}

pub fn print_summary(report: &IssueReport, output_path: &str) {
    let (summary, dependency_issues) = match report.issues.split_last() {
        Some((last, rest)) => (Some(last), rest),
        None => (None, &report.issues[..]),
    };

    println!("\n{}", "═".repeat(80).bright_black());
    println!(
        "{} {}",
        "SONARQUBE REPORT:".bold().white(),
        output_path.yellow().bold()
    );
    println!("{}", "─".repeat(80).bright_black());

    if dependency_issues.is_empty() {
        println!("{}", "✅ No vulnerable direct dependencies.".green().bold());
    } else {
        println!(
            "⚠️  {} vulnerable direct dependencies:\n",
            dependency_issues.len().to_string().bold()
        );
        for issue in dependency_issues {
            let badge = match issue.severity {
                IssueSeverity::Critical => "CRITICAL".red().bold(),
                IssueSeverity::Major => "MAJOR   ".yellow().bold(),
                IssueSeverity::Minor => "MINOR   ".normal(),
                IssueSeverity::Info => "INFO    ".bright_black(),
            };
            let range = &issue.primary_location.text_range;
            println!(
                "   {} {} ({}:{})",
                badge,
                issue.primary_location.message.cyan(),
                range.start_line,
                range.start_column
            );
        }
    }

    if let Some(summary) = summary {
        println!("\n{}", "AUDIT SUMMARY".bold());
        for line in summary.primary_location.message.lines() {
            println!("   {}", line);
        }
    }
}
