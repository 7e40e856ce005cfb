//! Immutable chart descriptions and their rendering with plotters.
//!
//! A 2D plot never mutates a chart that a reader might be drawing. Each
//! re-synchronization produces a new [`ChartDescription`] which is then
//! swapped into the plot's handle.

use crate::colors::{parse_color, Palette};
use crate::export::Render;
use crate::format::NumberFormat;
use crate::types::{Marker, MarkerShape, Point2D, Stroke};
use fnplot_common::Result;
use fnplot_config::AppearanceSettings;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::sync::Arc;

/// Fraction of the data span added on both sides of auto-ranged axes.
const AUTO_RANGE_MARGIN: f64 = 0.05;

/// Fonts, colors and defaults shared by every chart of a plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    /// Fill behind the whole chart.
    pub background: RGBColor,
    /// Font used for all text.
    pub font_family: String,
    /// Caption size.
    pub title_font_size: u32,
    /// Axis description size.
    pub label_font_size: u32,
    /// Tick label and legend size.
    pub tick_font_size: u32,
    /// Outer margin in pixels.
    pub margin: u32,
    /// Colors of series without an explicit color.
    pub palette: Palette,
    /// Line width of unstyled series.
    pub line_width: u32,
    /// Marker size of unstyled series.
    pub marker_size: u32,
    /// Tick label format of axes without their own.
    pub number_format: NumberFormat,
    /// Initial legend visibility.
    pub legend_visible: bool,
}

impl ChartTheme {
    /// Builds a theme from appearance settings.
    pub fn from_settings(settings: &AppearanceSettings) -> Result<Self> {
        Ok(Self {
            background: parse_color(&settings.background)?,
            font_family: settings.font_family.clone(),
            title_font_size: settings.title_font_size,
            label_font_size: settings.label_font_size,
            tick_font_size: settings.tick_font_size,
            margin: settings.margin,
            palette: Palette::parse(&settings.palette, &settings.fallback_color)?,
            line_width: settings.line_width,
            marker_size: settings.marker_size,
            number_format: NumberFormat::new(&settings.number_format)?,
            legend_visible: settings.legend_visible,
        })
    }

    fn font(&self, size: u32) -> FontDesc<'_> {
        (self.font_family.as_str(), f64::from(size)).into_font()
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: WHITE,
            font_family: "sans-serif".to_string(),
            title_font_size: 20,
            label_font_size: 14,
            tick_font_size: 12,
            margin: 10,
            palette: Palette::default(),
            line_width: 1,
            marker_size: 3,
            number_format: NumberFormat::default(),
            legend_visible: false,
        }
    }
}

/// How the range axis chooses its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisRange {
    /// Fit the data with a small margin.
    Auto,
    /// Fixed bounds.
    Fixed {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

/// One resolved series: points plus the concrete color, marker and stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Legend entry; empty names are left out of the legend.
    pub name: String,
    /// Points in drawing order.
    pub points: Vec<Point2D>,
    /// Line and marker color.
    pub color: RGBColor,
    /// Marker drawn at each point, if any.
    pub marker: Option<Marker>,
    /// Connecting line, if any.
    pub stroke: Option<Stroke>,
}

impl ChartSeries {
    /// Whether markers are drawn at the points.
    pub fn shapes_visible(&self) -> bool {
        self.marker.is_some()
    }

    /// Whether consecutive points are connected.
    pub fn lines_visible(&self) -> bool {
        self.stroke.is_some()
    }

    /// Runs of finite points. A non-finite coordinate breaks the line.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            if point.x.is_finite() && point.y.is_finite() {
                current.push(point.as_tuple());
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Everything needed to draw one 2D chart.
#[derive(Debug, Clone)]
pub struct ChartDescription {
    /// Caption; empty draws none.
    pub title: String,
    /// Domain axis description.
    pub x_label: String,
    /// Range axis description.
    pub y_label: String,
    /// Domain axis tick labels.
    pub x_format: NumberFormat,
    /// Range axis tick labels.
    pub y_format: NumberFormat,
    /// Whether the legend box is drawn.
    pub legend_visible: bool,
    /// Range axis bounds.
    pub y_range: AxisRange,
    /// Series in z-order, first drawn first.
    pub series: Vec<ChartSeries>,
    /// Fonts and colors.
    pub theme: Arc<ChartTheme>,
    /// Number of re-synchronizations this chart has gone through.
    pub revision: u64,
}

impl ChartDescription {
    /// Bounds of the domain axis.
    pub fn x_bounds(&self) -> (f64, f64) {
        padded(self.finite_points().map(|p| p.x))
    }

    /// Bounds of the range axis, honouring a fixed range.
    pub fn y_bounds(&self) -> (f64, f64) {
        match self.y_range {
            AxisRange::Fixed { min, max } => widen(min, max),
            AxisRange::Auto => padded(self.finite_points().map(|p| p.y)),
        }
    }

    fn finite_points(&self) -> impl Iterator<Item = &Point2D> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Draws the chart onto `root`.
    pub fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let theme = self.theme.as_ref();
        root.fill(&theme.background)?;

        let (x_min, x_max) = self.x_bounds();
        let (y_min, y_max) = self.y_bounds();

        let mut builder = ChartBuilder::on(root);
        builder
            .margin(theme.margin)
            .x_label_area_size(theme.label_font_size + 3 * theme.tick_font_size)
            .y_label_area_size(theme.label_font_size + 5 * theme.tick_font_size);
        if !self.title.is_empty() {
            builder.caption(&self.title, theme.font(theme.title_font_size));
        }
        let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        let x_formatter = |v: &f64| self.x_format.format(*v);
        let y_formatter = |v: &f64| self.y_format.format(*v);
        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .axis_desc_style(theme.font(theme.label_font_size))
            .label_style(theme.font(theme.tick_font_size))
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .draw()?;

        for series in &self.series {
            let color = series.color;
            let data: Vec<(f64, f64)> = series
                .points
                .iter()
                .filter(|p| p.x.is_finite() && p.y.is_finite())
                .map(|p| p.as_tuple())
                .collect();
            let mut labelled = series.name.is_empty();

            if let Some(stroke) = series.stroke {
                let style = color.stroke_width(stroke.width);
                for segment in series.segments() {
                    let anno = match stroke.dash {
                        Some((size, spacing)) => {
                            chart.draw_series(DashedLineSeries::new(segment, size, spacing, style))?
                        }
                        None => chart.draw_series(LineSeries::new(segment, style))?,
                    };
                    if !labelled {
                        anno.label(series.name.as_str()).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                        labelled = true;
                    }
                }
            }

            if let Some(marker) = series.marker {
                let size = marker.size as i32;
                let anno = match marker.shape {
                    MarkerShape::Square => chart.draw_series(data.iter().map(|&p| {
                        EmptyElement::at(p) + Rectangle::new([(-size, -size), (size, size)], color.filled())
                    }))?,
                    MarkerShape::Circle => {
                        chart.draw_series(data.iter().map(|&p| Circle::new(p, size, color.filled())))?
                    }
                    MarkerShape::Triangle => chart.draw_series(
                        data.iter().map(|&p| TriangleMarker::new(p, size, color.filled())),
                    )?,
                    MarkerShape::Cross => chart.draw_series(
                        data.iter().map(|&p| Cross::new(p, size, color.stroke_width(1))),
                    )?,
                };
                if !labelled {
                    anno.label(series.name.as_str()).legend(move |(x, y)| {
                        Circle::new((x + 10, y), size, color.filled())
                    });
                }
            }
        }

        if self.legend_visible {
            chart
                .configure_series_labels()
                .label_font(theme.font(theme.tick_font_size))
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }

        Ok(())
    }
}

impl Render for ChartDescription {
    fn render<DB>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        self.draw(root)
    }
}

/// Data extent with a margin on both sides; `(0, 1)` without data.
fn padded(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max {
        return (0.0, 1.0);
    }
    if min == max {
        return widen(min, max);
    }
    let margin = (max - min) * AUTO_RANGE_MARGIN;
    (min - margin, max + margin)
}

/// Opens up a zero-width interval so the axis can be drawn.
fn widen(min: f64, max: f64) -> (f64, f64) {
    if min < max {
        (min, max)
    } else {
        let half = if min == 0.0 { 0.5 } else { min.abs() * 0.05 };
        (min - half, max + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnplot_common::test_utils::assert_approx_eq;

    fn assert_bounds(actual: (f64, f64), expected: (f64, f64)) {
        assert_approx_eq(actual.0, expected.0, 1e-9);
        assert_approx_eq(actual.1, expected.1, 1e-9);
    }

    fn description(series: Vec<ChartSeries>, y_range: AxisRange) -> ChartDescription {
        ChartDescription {
            title: String::new(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            x_format: NumberFormat::default(),
            y_format: NumberFormat::default(),
            legend_visible: false,
            y_range,
            series,
            theme: Arc::new(ChartTheme::default()),
            revision: 1,
        }
    }

    fn series_of(points: &[(f64, f64)]) -> ChartSeries {
        ChartSeries {
            name: "s".to_string(),
            points: points.iter().map(|&p| Point2D::from(p)).collect(),
            color: RED,
            marker: None,
            stroke: Some(Stroke::solid(1)),
        }
    }

    #[test]
    fn test_theme_from_default_settings() {
        let theme = ChartTheme::from_settings(&AppearanceSettings::default()).unwrap();
        assert_eq!(theme, ChartTheme::default());
    }

    #[test]
    fn test_theme_rejects_bad_pattern() {
        let settings = AppearanceSettings {
            number_format: "x".to_string(),
            ..AppearanceSettings::default()
        };
        assert!(ChartTheme::from_settings(&settings).is_err());
    }

    #[test]
    fn test_bounds_without_data() {
        let chart = description(Vec::new(), AxisRange::Auto);
        assert_eq!(chart.x_bounds(), (0.0, 1.0));
        assert_eq!(chart.y_bounds(), (0.0, 1.0));
    }

    #[test]
    fn test_auto_bounds_are_padded() {
        let chart = description(vec![series_of(&[(0.0, 0.0), (10.0, 100.0)])], AxisRange::Auto);
        assert_bounds(chart.x_bounds(), (-0.5, 10.5));
        assert_bounds(chart.y_bounds(), (-5.0, 105.0));
    }

    #[test]
    fn test_fixed_bounds_ignore_data() {
        let chart = description(
            vec![series_of(&[(0.0, -50.0), (1.0, 50.0)])],
            AxisRange::Fixed { min: -1.0, max: 1.0 },
        );
        assert_eq!(chart.y_bounds(), (-1.0, 1.0));
    }

    #[test]
    fn test_degenerate_bounds_are_widened() {
        let chart = description(vec![series_of(&[(2.0, 0.0)])], AxisRange::Fixed { min: 4.0, max: 4.0 });
        assert_bounds(chart.x_bounds(), (1.9, 2.1));
        assert_bounds(chart.y_bounds(), (3.8, 4.2));
    }

    #[test]
    fn test_non_finite_points_are_ignored() {
        let chart = description(vec![series_of(&[(0.0, f64::NAN), (1.0, 1.0), (2.0, 3.0)])], AxisRange::Auto);
        assert_bounds(chart.x_bounds(), (0.95, 2.05));
    }

    #[test]
    fn test_segments_break_at_non_finite_points() {
        let series = series_of(&[
            (0.0, 1.0),
            (1.0, f64::NAN),
            (2.0, 3.0),
            (3.0, 4.0),
            (4.0, f64::INFINITY),
        ]);
        assert_eq!(series.segments(), vec![vec![(0.0, 1.0)], vec![(2.0, 3.0), (3.0, 4.0)]]);

        assert!(series_of(&[(0.0, f64::NAN)]).segments().is_empty());
    }

    #[test]
    fn test_visibility_flags() {
        let mut s = series_of(&[]);
        assert!(s.lines_visible());
        assert!(!s.shapes_visible());

        s.marker = Some(Marker::new(MarkerShape::Circle, 3));
        s.stroke = None;
        assert!(s.shapes_visible());
        assert!(!s.lines_visible());
    }
}
