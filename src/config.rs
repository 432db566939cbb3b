//! Run parameters: the three file paths, resolved against the working
//! directory before the engine sees them.

use crate::cli::{Args, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_PACKAGE_FILE};
use crate::error::ConvertError;
use crate::locate::LocateMode;
use crate::logging::LogConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    pub input_file_path: PathBuf,
    pub output_file_path: PathBuf,
    pub package_file_path: PathBuf,
}

impl Parameters {
    pub fn new(
        input_file_path: impl Into<PathBuf>,
        output_file_path: impl Into<PathBuf>,
        package_file_path: impl Into<PathBuf>,
    ) -> Result<Self, ConvertError> {
        let params = Self {
            input_file_path: input_file_path.into(),
            output_file_path: output_file_path.into(),
            package_file_path: package_file_path.into(),
        };
        for (name, path) in [
            ("inputFilePath", &params.input_file_path),
            ("outputFilePath", &params.output_file_path),
            ("packageFilePath", &params.package_file_path),
        ] {
            if path.as_os_str().to_string_lossy().trim().is_empty() {
                return Err(ConvertError::InvalidParameter { name });
            }
        }
        Ok(params)
    }

    /// Blank arguments fall back to their defaults; relative paths are joined
    /// onto `cwd`.
    pub fn resolve(args: &Args, cwd: &Path) -> Result<Self, ConvertError> {
        Self::new(
            resolve_path(cwd, &args.input_file, DEFAULT_INPUT_FILE),
            resolve_path(cwd, &args.output_file, DEFAULT_OUTPUT_FILE),
            resolve_path(cwd, &args.package_file, DEFAULT_PACKAGE_FILE),
        )
    }
}

fn resolve_path(cwd: &Path, value: &str, default: &str) -> PathBuf {
    let value = value.trim();
    let value = if value.is_empty() { default } else { value };
    cwd.join(value)
}

pub fn log_config(args: &Args) -> LogConfig {
    LogConfig {
        level: args.log_level.clone(),
        format: args.log_format,
        file: args.log_file.clone(),
    }
}

pub fn locate_mode(args: &Args) -> LocateMode {
    if args.strict_locations {
        LocateMode::Strict
    } else {
        LocateMode::Compat
    }
}
