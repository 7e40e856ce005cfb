//! Settings loading from TOML files and `FNPLOT_*` environment variables.

use crate::schema::PlotSettings;
use fnplot_common::Result as PlotResult;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the settings file.
pub const CONFIG_PATH_VAR: &str = "FNPLOT_CONFIG";

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "fnplot.toml";

/// Settings loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading the settings file
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML settings: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Name of the offending variable
        var: String,
        /// Why the value could not be parsed
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Validation failed after loading
    #[error("Settings validation failed: {0}")]
    ValidationError(#[from] fnplot_common::PlotError),
}

impl From<ConfigError> for fnplot_common::PlotError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(inner) => inner,
            other => fnplot_common::PlotError::config_with_source("Failed to load settings", other),
        }
    }
}

/// Settings loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlotSettings, ConfigError> {
        Self::load_config_with(path, env_lookup)
    }

    fn load_config_with<P, F>(path: P, lookup: F) -> Result<PlotSettings, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut settings = Self::parse(&content)?;

        Self::apply_overrides(&mut settings, lookup)?;
        settings.validate()?;

        debug!(path = %path.as_ref().display(), "loaded plot settings");
        Ok(settings)
    }

    /// Parse settings from TOML text without overrides or validation
    pub fn parse(content: &str) -> Result<PlotSettings, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from the environment and the usual file locations
    pub fn load() -> PlotResult<PlotSettings> {
        Self::load_with(env_lookup)
    }

    /// Like [`ConfigLoader::load`], reading variables through `lookup`
    pub fn load_with<F>(lookup: F) -> PlotResult<PlotSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = if let Some(config_path) = lookup(CONFIG_PATH_VAR) {
            Self::load_config_with(&config_path, &lookup)?
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::load_config_with(DEFAULT_CONFIG_FILE, &lookup)?
        } else {
            info!("no settings file found, using defaults");
            let mut settings = PlotSettings::default();
            Self::apply_overrides(&mut settings, &lookup)?;
            settings.validate()?;
            settings
        };

        Ok(settings)
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PlotResult<PlotSettings> {
        Ok(Self::load_config(path)?)
    }

    /// Apply `FNPLOT_*` overrides read through `lookup`
    pub fn apply_overrides<F>(settings: &mut PlotSettings, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("FNPLOT_WINDOW_WIDTH") {
            settings.window.width = parse_var("FNPLOT_WINDOW_WIDTH", &value)?;
        }

        if let Some(value) = lookup("FNPLOT_WINDOW_HEIGHT") {
            settings.window.height = parse_var("FNPLOT_WINDOW_HEIGHT", &value)?;
        }

        if let Some(value) = lookup("FNPLOT_BACKGROUND") {
            settings.appearance.background = value;
        }

        if let Some(value) = lookup("FNPLOT_FONT_FAMILY") {
            settings.appearance.font_family = value;
        }

        if let Some(value) = lookup("FNPLOT_PALETTE") {
            settings.appearance.palette = value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(value) = lookup("FNPLOT_NUMBER_FORMAT") {
            settings.appearance.number_format = value;
        }

        if let Some(value) = lookup("FNPLOT_LEGEND_VISIBLE") {
            settings.appearance.legend_visible = parse_var("FNPLOT_LEGEND_VISIBLE", &value)?;
        }

        if let Some(value) = lookup("FNPLOT_JPEG_QUALITY") {
            settings.export.jpeg_quality = parse_var("FNPLOT_JPEG_QUALITY", &value)?;
        }

        if let Some(value) = lookup("FNPLOT_SURFACE_ALPHA") {
            settings.surface.alpha = parse_var("FNPLOT_SURFACE_ALPHA", &value)?;
        }

        if let Some(value) = lookup("FNPLOT_SURFACE_WIREFRAME") {
            settings.surface.wireframe = parse_var("FNPLOT_SURFACE_WIREFRAME", &value)?;
        }

        if let Some(value) = lookup("FNPLOT_VIEWER_ENABLED") {
            settings.viewer.enabled = parse_var("FNPLOT_VIEWER_ENABLED", &value)?;
        }

        if let Some(value) = lookup("FNPLOT_VIEWER_COMMAND") {
            let command: Vec<String> = value.split_whitespace().map(str::to_string).collect();
            settings.viewer.command = if command.is_empty() { None } else { Some(command) };
        }

        Ok(())
    }
}

fn env_lookup(var: &str) -> Option<String> {
    env::var(var).ok()
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let settings = ConfigLoader::parse(
            r##"
            [window]
            width = 1024

            [appearance]
            palette = ["#112233"]
            "##,
        )
        .unwrap();

        assert_eq!(settings.window.width, 1024);
        assert_eq!(settings.window.height, 400);
        assert_eq!(settings.appearance.palette, vec!["#112233".to_string()]);
        assert_eq!(settings.appearance.number_format, "#.##");
        assert_eq!(settings.export.jpeg_quality, 90);
    }

    #[test]
    fn test_parse_error() {
        let result = ConfigLoader::parse("[window\nwidth = 3");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_overrides() {
        let mut settings = PlotSettings::default();
        let lookup = lookup_from(&[
            ("FNPLOT_WINDOW_HEIGHT", "600"),
            ("FNPLOT_PALETTE", "#000000, #FFFFFF"),
            ("FNPLOT_SURFACE_WIREFRAME", "true"),
            ("FNPLOT_VIEWER_COMMAND", "feh --scale-down"),
        ]);

        ConfigLoader::apply_overrides(&mut settings, lookup).unwrap();

        assert_eq!(settings.window.height, 600);
        assert_eq!(settings.appearance.palette.len(), 2);
        assert!(settings.surface.wireframe);
        assert_eq!(
            settings.viewer.command,
            Some(vec!["feh".to_string(), "--scale-down".to_string()])
        );
    }

    #[test]
    fn test_override_parse_failure_names_variable() {
        let mut settings = PlotSettings::default();
        let lookup = lookup_from(&[("FNPLOT_JPEG_QUALITY", "best")]);

        let error = ConfigLoader::apply_overrides(&mut settings, lookup).unwrap_err();
        assert!(error.to_string().contains("FNPLOT_JPEG_QUALITY"));
    }

    #[test]
    fn test_load_from_file_validates() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[export]\njpeg_quality = 101").unwrap();

        let result = ConfigLoader::load_from_file(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_with_reads_named_file_and_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[window]\nwidth = 1024").unwrap();
        let path = file.path().display().to_string();

        let lookup = lookup_from(&[(CONFIG_PATH_VAR, path.as_str()), ("FNPLOT_WINDOW_HEIGHT", "300")]);
        let settings = ConfigLoader::load_with(lookup).unwrap();

        assert_eq!(settings.window.width, 1024);
        assert_eq!(settings.window.height, 300);
    }

    #[test]
    fn test_load_with_rejects_invalid_override() {
        let lookup = lookup_from(&[("FNPLOT_SURFACE_ALPHA", "2.0")]);
        assert!(ConfigLoader::load_with(lookup).is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigLoader::load_config(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
