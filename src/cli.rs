use crate::logging::LogFormat;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

const TAGLINE: &str = "Convert npm-audit json report to sonarqube generic data issue report";
const NOTICE: &str = concat!(
    "*** NOTICE : audiso v",
    env!("CARGO_PKG_VERSION"),
    "\nThis module convert npm-audit json report to sonarqube generic data issue report."
);

pub const DEFAULT_INPUT_FILE: &str = "audit-dependency-report.json";
pub const DEFAULT_OUTPUT_FILE: &str = "audit-dependency-report-sonarqube.json";
pub const DEFAULT_PACKAGE_FILE: &str = "package.json";

#[derive(Parser, Debug)]
#[command(name = "audiso")]
#[command(version, disable_version_flag = true)]
#[command(about = TAGLINE, long_about = None, before_help = NOTICE)]
pub struct Args {
    /// The path of package.json
    #[arg(short = 'p', long = "package-file", default_value = DEFAULT_PACKAGE_FILE)]
    pub package_file: String,

    /// The output path of sonarqube issue report
    #[arg(short = 'o', long = "output-file", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// The input path of npm-audit report
    #[arg(short = 'i', long = "input-file", default_value = DEFAULT_INPUT_FILE)]
    pub input_file: String,

    /// Fail when a vulnerable dependency name does not appear in package.json
    #[arg(long)]
    pub strict_locations: bool,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log output format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Do not print the conversion summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_arguments() {
        let args = Args::try_parse_from(["audiso"]).unwrap();
        assert_eq!(args.input_file, DEFAULT_INPUT_FILE);
        assert_eq!(args.output_file, DEFAULT_OUTPUT_FILE);
        assert_eq!(args.package_file, DEFAULT_PACKAGE_FILE);
        assert!(!args.strict_locations);
        assert_eq!(args.log_format, LogFormat::Pretty);
    }

    #[test]
    fn attached_and_detached_forms_are_equivalent() {
        let attached = Args::try_parse_from([
            "audiso",
            "--input-file=my-package/audit.json",
            "--output-file=my-package/sonar.json",
            "--package-file=my-package/package.json",
        ])
        .unwrap();
        let detached = Args::try_parse_from([
            "audiso",
            "--input-file",
            "my-package/audit.json",
            "--output-file",
            "my-package/sonar.json",
            "--package-file",
            "my-package/package.json",
        ])
        .unwrap();
        assert_eq!(attached.input_file, detached.input_file);
        assert_eq!(attached.output_file, detached.output_file);
        assert_eq!(attached.package_file, detached.package_file);
    }

    #[test]
    fn short_aliases() {
        let args = Args::try_parse_from(["audiso", "-i", "a.json", "-o", "b.json", "-p", "c.json"]).unwrap();
        assert_eq!(
            (args.input_file.as_str(), args.output_file.as_str(), args.package_file.as_str()),
            ("a.json", "b.json", "c.json")
        );
    }

    #[test]
    fn version_and_help_short_circuit() {
        let err = Args::try_parse_from(["audiso", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        let err = Args::try_parse_from(["audiso", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("*** NOTICE : audiso v"));
    }
}
