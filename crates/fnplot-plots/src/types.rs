//! Plot data types: named values, points and per-series styles.

use plotters::style::RGBColor;
use std::fmt;
use std::sync::Arc;

/// Scalar function of one variable, shareable across threads.
pub type UnaryFunction = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Scalar function of two variables, shareable across threads.
pub type BinaryFunction = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// A value paired with the name it is displayed under.
#[derive(Clone)]
pub struct Named<T> {
    name: String,
    value: T,
}

impl<T> Named<T> {
    /// Pairs `value` with a display name.
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Splits into name and value.
    pub fn into_parts(self) -> (String, T) {
        (self.name, self.value)
    }
}

impl Named<UnaryFunction> {
    /// Names a plain closure, boxing it as a [`UnaryFunction`].
    pub fn function<F>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::new(name, Arc::new(function) as UnaryFunction)
    }
}

impl<T: fmt::Debug> fmt::Debug for Named<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Named")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish()
    }
}

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    /// Abscissa.
    pub x: f64,
    /// Ordinate.
    pub y: f64,
}

impl Point2D {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point as a tuple in chart coordinates.
    pub const fn as_tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Shape drawn at every sample point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum MarkerShape {
    Square,
    Circle,
    Triangle,
    Cross,
}

impl MarkerShape {
    /// Shapes assigned to unstyled series, cycled by series index.
    pub const CYCLE: [Self; 4] = [Self::Square, Self::Circle, Self::Triangle, Self::Cross];

    /// Default shape for the series at `index`.
    pub fn for_index(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }
}

/// Marker shape and its size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Drawn shape.
    pub shape: MarkerShape,
    /// Half-extent in pixels.
    pub size: u32,
}

impl Marker {
    /// Creates a marker.
    pub const fn new(shape: MarkerShape, size: u32) -> Self {
        Self { shape, size }
    }
}

/// Connecting line between consecutive points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    /// Line width in pixels.
    pub width: u32,
    /// Dash length and gap in pixels; solid when absent.
    pub dash: Option<(u32, u32)>,
}

impl Stroke {
    /// A solid line.
    pub const fn solid(width: u32) -> Self {
        Self { width, dash: None }
    }

    /// A dashed line.
    pub const fn dashed(width: u32, dash: u32, gap: u32) -> Self {
        Self {
            width,
            dash: Some((dash, gap)),
        }
    }
}

/// Optional per-series rendering hints.
///
/// A style with neither marker nor stroke draws nothing for its series; a
/// series without any style is drawn with both.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GraphStyle {
    /// Series color; positional palette color when absent.
    pub color: Option<RGBColor>,
    /// Markers are drawn only when set.
    pub marker: Option<Marker>,
    /// Lines are drawn only when set.
    pub stroke: Option<Stroke>,
}

impl GraphStyle {
    /// A style that draws nothing until configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the series color.
    #[must_use]
    pub fn with_color(mut self, color: RGBColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Draws markers of the given shape and size.
    #[must_use]
    pub fn with_marker(mut self, shape: MarkerShape, size: u32) -> Self {
        self.marker = Some(Marker::new(shape, size));
        self
    }

    /// Draws connecting lines with the given stroke.
    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }
}
