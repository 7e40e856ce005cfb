//! Color parsing, positional default palette and the height color ramp.

use fnplot_common::{PlotError, Result};
use plotters::style::{HSLColor, RGBColor};

/// Parse a `#RRGGBB` color string.
pub fn parse_color(color_str: &str) -> Result<RGBColor> {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Ok(RGBColor(r, g, b));
            }
        }
    }
    Err(PlotError::invalid_field(
        format!("expected a #RRGGBB color, got '{color_str}'"),
        "color",
    ))
}

/// Default series colors assigned by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<RGBColor>,
    fallback: RGBColor,
}

impl Palette {
    /// Creates a palette; indices past the end get `fallback`.
    pub fn new(colors: Vec<RGBColor>, fallback: RGBColor) -> Self {
        Self { colors, fallback }
    }

    /// Parses palette entries and the fallback color.
    pub fn parse(colors: &[String], fallback: &str) -> Result<Self> {
        let colors = colors
            .iter()
            .map(|c| parse_color(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(colors, parse_color(fallback)?))
    }

    /// Color for the series at `index`.
    pub fn color_for(&self, index: usize) -> RGBColor {
        self.colors.get(index).copied().unwrap_or(self.fallback)
    }
}

impl Default for Palette {
    /// Red, green, blue, then black for every further series.
    fn default() -> Self {
        Self::new(
            vec![RGBColor(255, 0, 0), RGBColor(0, 255, 0), RGBColor(0, 0, 255)],
            RGBColor(0, 0, 0),
        )
    }
}

/// Continuous rainbow ramp over `[min, max]`: blue at `min`, red at `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainbowRamp {
    min: f64,
    max: f64,
}

impl RainbowRamp {
    /// Creates a ramp bounded by the given extremes.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `value` in the ramp, clamped to `[0, 1]`.
    pub fn position(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span.is_nan() || span <= 0.0 || !value.is_finite() {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Color of `value`.
    pub fn color(&self, value: f64) -> HSLColor {
        // Hue runs from 240 degrees (blue) down to 0 (red).
        let hue = (1.0 - self.position(value)) * 2.0 / 3.0;
        HSLColor(hue, 1.0, 0.5)
    }
}
