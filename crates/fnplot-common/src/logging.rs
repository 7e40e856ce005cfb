//! Structured logging bootstrap for applications embedding fnplot

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "fnplot_plots=debug")
    pub level: String,
    /// Whether to emit one JSON object per event
    pub json_format: bool,
    /// Whether to enable pretty formatting with colors
    pub pretty_format: bool,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_format: false,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_new(&config.level).or_else(|_| EnvFilter::try_new("info"))?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let file = match &config.file_path {
        Some(path) => Some(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?,
        ),
        None => None,
    };

    if config.json_format {
        let layer = fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_target(config.include_targets);
        match file {
            Some(file) => registry.with(layer.with_writer(file)).try_init()?,
            None => registry.with(layer).try_init()?,
        }
    } else if config.pretty_format {
        let layer = fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_target(config.include_targets);
        match file {
            Some(file) => registry
                .with(layer.with_ansi(false).with_writer(file))
                .try_init()?,
            None => registry.with(layer).try_init()?,
        }
    } else {
        let layer = fmt::layer()
            .compact()
            .with_span_events(span_events)
            .with_target(config.include_targets)
            .with_thread_names(true);
        match file {
            Some(file) => registry
                .with(layer.with_ansi(false).with_writer(file))
                .try_init()?,
            None => registry.with(layer).try_init()?,
        }
    }

    Ok(())
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(LoggingConfig::default())
}

/// Initialize logging for development (pretty, debug level for fnplot crates)
pub fn init_dev_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(LoggingConfig {
        level: "info,fnplot_plots=debug,fnplot_config=debug".to_string(),
        pretty_format: true,
        include_spans: true,
        ..LoggingConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(!config.pretty_format);
        assert!(config.file_path.is_none());
        assert!(!config.include_spans);
        assert!(config.include_targets);
    }

    #[test]
    fn test_unwritable_log_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            file_path: Some(dir.path().join("missing").join("fnplot.log").display().to_string()),
            ..LoggingConfig::default()
        };

        assert!(init_logging(config).is_err());
    }
}
