//! Diagnostics plumbing.
//!
//! The engine never reaches for a global logger. It is handed a
//! [`DiagnosticSink`] at construction; the binary uses [`TracingSink`] on top
//! of a subscriber installed by [`Logging::init`], tests use [`MemorySink`].

use anyhow::Result;
use std::cell::RefCell;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::dispatcher::{self, DefaultGuard, Dispatch};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Which side of the run a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Io,
    Data,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Io => f.write_str("IO"),
            Category::Data => f.write_str("DATA"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub category: Category,
    pub message: String,
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, category: Category, message: impl Into<String>) -> Self {
        Self {
            level,
            category,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl fmt::Display) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}

pub trait DiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to whatever `tracing` subscriber is current.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, d: Diagnostic) {
        let detail = d.detail.as_deref().unwrap_or_default();
        match d.level {
            DiagnosticLevel::Debug => tracing::debug!(category = %d.category, detail, "{}", d.message),
            DiagnosticLevel::Info => tracing::info!(category = %d.category, detail, "{}", d.message),
            DiagnosticLevel::Warn => tracing::warn!(category = %d.category, detail, "{}", d.message),
            DiagnosticLevel::Error => tracing::error!(category = %d.category, detail, "{}", d.message),
        }
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RefCell<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.borrow().clone()
    }

    pub fn at_level(&self, level: DiagnosticLevel) -> Vec<Diagnostic> {
        self.records
            .borrow()
            .iter()
            .filter(|d| d.level == level)
            .cloned()
            .collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.records.borrow_mut().push(diagnostic);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    /// Plain-text copy of every event, appended to this file.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

/// Scoped tracing setup. Events go to the installed subscriber until
/// [`Logging::finish`] is called or the value is dropped.
pub struct Logging {
    file: Option<Arc<File>>,
    _guard: DefaultGuard,
}

impl Logging {
    /// `RUST_LOG` takes precedence over `config.level`.
    pub fn init(config: &LogConfig) -> Result<Self> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .map_err(|e| anyhow::anyhow!("invalid log level '{}': {}", config.level, e))?;

        let file = match &config.file {
            Some(path) => Some(Arc::new(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| anyhow::anyhow!("cannot open log file {}: {}", path.display(), e))?,
            )),
            None => None,
        };
        let file_layer = file.clone().map(|f| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(f)
        });

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer);
        let dispatch = match config.format {
            LogFormat::Pretty => Dispatch::new(
                subscriber.with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                ),
            ),
            LogFormat::Json => Dispatch::new(
                subscriber.with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                ),
            ),
        };

        Ok(Self {
            file,
            _guard: dispatcher::set_default(&dispatch),
        })
    }

    /// Flushes the log file and uninstalls the subscriber.
    pub fn finish(self) -> Result<()> {
        if let Some(file) = &self.file {
            (&**file).flush()?;
        }
        Ok(())
    }
}
