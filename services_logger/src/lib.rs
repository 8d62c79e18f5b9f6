//! # Logger Service
//!
//! Routes `tracing` events into the host's output channel.
//!
//! ## Philosophy
//!
//! - Logging is explicit and structured: message plus `key=value` fields
//! - Two user-facing verbosity steps ([`DebugLevel`]), configured at runtime
//! - The sink is a trait, so tests capture output in memory
//!
//! Code logs with the ordinary `tracing` macros. `info!`, `warn!` and
//! `error!` are standard output; `debug!` and `trace!` only appear once the
//! configured debug level is detailed.
//!
//! ## Example
//!
//! ```ignore
//! use services_logger::{init_output_logging, Verbosity};
//!
//! // At extension activation, once per process:
//! let verbosity = Verbosity::default();
//! init_output_logging(output_channel, verbosity.clone());
//! let service = DiagramEditorService::new(host.settings(), verbosity);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// Output verbosity scale of the `debugLevel` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    /// Always written
    Standard = 0,
    /// Written only when the configured level is at least 1
    Detailed = 1,
}

impl DebugLevel {
    /// Whether a message at this level passes the configured threshold
    ///
    /// With no threshold configured only standard messages pass.
    pub fn is_enabled(self, configured: Option<i64>) -> bool {
        (self as i64) <= configured.unwrap_or(DebugLevel::Standard as i64)
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl LogLevel {
    /// Verbosity step this level belongs to
    pub fn debug_level(self) -> DebugLevel {
        match self {
            LogLevel::Trace | LogLevel::Debug => DebugLevel::Detailed,
            LogLevel::Info | LogLevel::Warn | LogLevel::Error => DebugLevel::Standard,
        }
    }

    fn label(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.label(), self.message)?;
        for (key, value) in &self.fields {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

/// Destination of formatted log lines (the host's output channel)
pub trait OutputSink: Send + Sync + 'static {
    fn append_line(&self, line: &str);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory sink, mainly for tests
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line written so far
    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        lock(&self.lines).iter().any(|line| line.contains(needle))
    }

    pub fn clear(&self) {
        lock(&self.lines).clear();
    }
}

impl OutputSink for MemorySink {
    fn append_line(&self, line: &str) {
        lock(&self.lines).push(line.to_string());
    }
}

/// Shared handle to the configured `debugLevel`
///
/// Cloned into the logging layer; the editor service updates it whenever it
/// re-reads settings.
#[derive(Debug, Clone, Default)]
pub struct Verbosity {
    level: Arc<Mutex<Option<i64>>>,
}

impl Verbosity {
    pub fn new(level: Option<i64>) -> Self {
        Self {
            level: Arc::new(Mutex::new(level)),
        }
    }

    pub fn set(&self, level: Option<i64>) {
        *lock(&self.level) = level;
    }

    pub fn get(&self) -> Option<i64> {
        *lock(&self.level)
    }

    /// Whether entries at `level` are currently written
    pub fn allows(&self, level: LogLevel) -> bool {
        level.debug_level().is_enabled(self.get())
    }
}

/// Collects the message and fields of an event
#[derive(Default)]
struct EntryVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for EntryVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields
                .push((field.name().to_string(), format!("{:?}", value)));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }
}

/// A [`tracing_subscriber::Layer`] that writes events to an [`OutputSink`]
pub struct OutputChannelLayer<K> {
    sink: K,
    verbosity: Verbosity,
}

impl<K: OutputSink> OutputChannelLayer<K> {
    pub fn new(sink: K, verbosity: Verbosity) -> Self {
        Self { sink, verbosity }
    }
}

impl<S, K> tracing_subscriber::Layer<S> for OutputChannelLayer<K>
where
    S: Subscriber,
    K: OutputSink,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = LogLevel::from(event.metadata().level());
        if !self.verbosity.allows(level) {
            return;
        }

        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);
        if visitor.message.is_empty() {
            visitor.message = event.metadata().name().to_string();
        }

        let entry = LogEntry {
            level,
            message: visitor.message,
            fields: visitor.fields,
        };
        self.sink.append_line(&entry.to_string());
    }
}

/// Installs the output channel layer as the global subscriber
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_output_logging<K: OutputSink>(sink: K, verbosity: Verbosity) -> bool {
    tracing_subscriber::registry()
        .with(OutputChannelLayer::new(sink, verbosity))
        .try_init()
        .is_ok()
}
