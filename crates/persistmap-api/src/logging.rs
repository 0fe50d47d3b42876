//! Logging setup for applications embedding persistmap.
//!
//! The map itself only emits `tracing` events (`debug` for opens and
//! persisted snapshots, `warn` when a snapshot could not be written). This
//! module installs a global subscriber for them. `RUST_LOG` takes precedence
//! over the configured filter.

use persistmap_core::{Error, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_subscriber::{Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
    /// Daily-rotated files `<dir>/<prefix>.YYYY-MM-DD`, written off-thread
    File {
        /// Directory holding the log files
        dir: PathBuf,
        /// File name prefix
        prefix: String,
    },
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"persistmap=debug"`
    pub filter: String,
    /// Output destination
    pub target: LogTarget,
    /// Single-line output instead of the default full format
    pub compact: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            target: LogTarget::Stderr,
            compact: false,
        }
    }
}

impl LogConfig {
    /// Config with the given filter directive, logging to stderr
    pub fn new<S: Into<String>>(filter: S) -> Self {
        Self {
            filter: filter.into(),
            ..Default::default()
        }
    }

    /// Shows every persisted snapshot
    pub fn debug() -> Self {
        Self::new("debug")
    }

    /// Log to stdout
    pub fn with_stdout(mut self) -> Self {
        self.target = LogTarget::Stdout;
        self
    }

    /// Log to daily-rotated files in `dir`
    pub fn with_file<P: Into<PathBuf>, S: Into<String>>(mut self, dir: P, prefix: S) -> Self {
        self.target = LogTarget::File {
            dir: dir.into(),
            prefix: prefix.into(),
        };
        self
    }

    /// Use the compact single-line format
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }

    /// Installs the global subscriber.
    ///
    /// For file output the returned guard owns the background writer; keep
    /// it alive for as long as logs should be flushed.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the filter does not parse or a global
    /// subscriber is already installed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use persistmap::logging::LogConfig;
    ///
    /// let _guard = LogConfig::debug().compact().init()?;
    /// # Ok::<(), persistmap::Error>(())
    /// ```
    pub fn init(self) -> Result<Option<WorkerGuard>> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.filter))
            .map_err(|e| Error::InvalidArgument(format!("Invalid log filter: {}", e)))?;

        let (layer, guard) = match self.target {
            LogTarget::Stdout => (fmt_layer(std::io::stdout, self.compact), None),
            LogTarget::Stderr => (fmt_layer(std::io::stderr, self.compact), None),
            LogTarget::File { dir, prefix } => {
                let appender = tracing_appender::rolling::daily(dir, prefix);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (fmt_layer(writer, self.compact), Some(guard))
            }
        };

        tracing_subscriber::registry()
            .with(layer)
            .with(env_filter)
            .try_init()
            .map_err(|e| Error::InvalidArgument(format!("Logging already initialized: {}", e)))?;

        Ok(guard)
    }
}

fn fmt_layer<W>(writer: W, compact: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer);
    if compact {
        layer.compact().boxed()
    } else {
        layer.boxed()
    }
}
