//! Error types and utilities for fnplot

use thiserror::Error;

/// Result type alias for fnplot operations
pub type Result<T> = std::result::Result<T, PlotError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for fnplot operations
#[derive(Error, Debug)]
pub enum PlotError {
    /// A parameter was rejected before any rendering took place
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the value
        message: String,
        /// Name of the rejected parameter, if known
        field: Option<String>,
    },

    /// The requested operation is not available for this kind of plot
    #[error("Unsupported operation: {message}")]
    Unsupported {
        /// Which operation was refused
        message: String,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Drawing errors reported by the charting backend
    #[error("Render error: {message}")]
    Render {
        /// Human-readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxedSource>,
    },

    /// Image or document encoding errors
    #[error("Encode error: {message}")]
    Encode {
        /// Human-readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxedSource>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxedSource>,
    },

    /// Viewer launch and session errors
    #[error("Viewer error: {message}")]
    Viewer {
        /// Human-readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxedSource>,
    },
}

impl PlotError {
    /// Create a new invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new invalid argument error naming the offending parameter
    pub fn invalid_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new unsupported operation error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new encode error
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new encode error with source
    pub fn encode_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Encode {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new viewer error
    pub fn viewer(msg: impl Into<String>) -> Self {
        Self::Viewer {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new viewer error with source
    pub fn viewer_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Viewer {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true for errors caused by caller-supplied parameters
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns true for operations the plot kind does not offer
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

// Error conversion implementations for external types

/// Convert from toml::de::Error to PlotError
impl From<toml::de::Error> for PlotError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

#[cfg(feature = "image")]
/// Convert from image encoder errors to PlotError
impl From<image::ImageError> for PlotError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Self::Io(io),
            other => Self::encode_with_source("Image encoding failed", other),
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to PlotError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for PlotError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::render_with_source("Chart rendering failed", err)
    }
}
