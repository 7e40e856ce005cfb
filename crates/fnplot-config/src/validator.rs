//! Settings validation.

use crate::schema::PlotSettings;
use fnplot_common::{PlotError, Result};

/// Returns true for colors of the form `#RRGGBB`.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Settings validator.
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validates all sections, reporting the first problem found.
    pub fn validate(settings: &PlotSettings) -> Result<()> {
        let window = &settings.window;
        if window.width == 0 || window.height == 0 {
            return Err(PlotError::config(format!(
                "window size must be positive, got {}x{}",
                window.width, window.height
            )));
        }

        let appearance = &settings.appearance;
        check_color(&appearance.background, "appearance.background")?;
        check_color(&appearance.fallback_color, "appearance.fallback_color")?;
        for (index, color) in appearance.palette.iter().enumerate() {
            check_color(color, &format!("appearance.palette[{index}]"))?;
        }
        if appearance.font_family.trim().is_empty() {
            return Err(PlotError::config("appearance.font_family cannot be empty"));
        }
        if appearance.title_font_size == 0
            || appearance.label_font_size == 0
            || appearance.tick_font_size == 0
        {
            return Err(PlotError::config("font sizes must be positive"));
        }
        if appearance.line_width == 0 {
            return Err(PlotError::config("appearance.line_width must be positive"));
        }
        if appearance.number_format.trim().is_empty() {
            return Err(PlotError::config("appearance.number_format cannot be empty"));
        }

        let export = &settings.export;
        if !(1..=100).contains(&export.jpeg_quality) {
            return Err(PlotError::config(format!(
                "export.jpeg_quality must be within 1..=100, got {}",
                export.jpeg_quality
            )));
        }

        let surface = &settings.surface;
        if !(0.0..=1.0).contains(&surface.alpha) {
            return Err(PlotError::config(format!(
                "surface.alpha must be within 0.0..=1.0, got {}",
                surface.alpha
            )));
        }
        if !surface.yaw.is_finite() || !surface.pitch.is_finite() {
            return Err(PlotError::config("surface camera angles must be finite"));
        }
        if !(surface.scale.is_finite() && surface.scale > 0.0) {
            return Err(PlotError::config("surface.scale must be positive"));
        }
        if surface.label_font_size == 0 {
            return Err(PlotError::config("surface.label_font_size must be positive"));
        }

        if let Some(command) = &settings.viewer.command {
            if command.first().map_or(true, |program| program.trim().is_empty()) {
                return Err(PlotError::config("viewer.command needs a program name"));
            }
        }

        Ok(())
    }
}

fn check_color(value: &str, field: &str) -> Result<()> {
    if is_hex_color(value) {
        Ok(())
    } else {
        Err(PlotError::config(format!(
            "{field} must be a #RRGGBB color, got '{value}'"
        )))
    }
}

impl PlotSettings {
    /// Validates the settings.
    pub fn validate(&self) -> Result<()> {
        SettingsValidator::validate(self)
    }
}
