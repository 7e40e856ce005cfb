//! Named point series that a 2D plot can draw.

use crate::sampler::Sampling;
use crate::types::{GraphStyle, Named, Point2D, UnaryFunction};
use fnplot_common::Result;
use once_cell::sync::OnceCell;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A named sequence of points with an optional style.
///
/// Implementations decide how the points are produced; the plot only reads
/// them during re-synchronization.
pub trait Plotable2D: Send + Sync {
    /// Series name shown in the legend.
    fn name(&self) -> &str;

    /// Points in drawing order.
    fn series(&self) -> Cow<'_, [Point2D]>;

    /// Rendering hints, if any.
    fn style(&self) -> Option<&GraphStyle>;
}

/// A scalar function sampled uniformly over an interval.
///
/// Sampling happens on first access and is cached afterwards.
pub struct PlotableFunction2D {
    name: String,
    function: UnaryFunction,
    sampling: Sampling,
    style: Option<GraphStyle>,
    points: OnceCell<Vec<Point2D>>,
}

impl PlotableFunction2D {
    /// Samples `function` at `number_of_points` points across `[xmin, xmax]`.
    pub fn new(
        xmin: f64,
        xmax: f64,
        number_of_points: usize,
        function: Named<UnaryFunction>,
        style: Option<GraphStyle>,
    ) -> Result<Self> {
        let sampling = Sampling::new(xmin, xmax, number_of_points)?;
        let (name, function) = function.into_parts();
        Ok(Self {
            name,
            function,
            sampling,
            style,
            points: OnceCell::new(),
        })
    }

    /// The validated sampling interval.
    pub fn sampling(&self) -> &Sampling {
        &self.sampling
    }
}

impl Plotable2D for PlotableFunction2D {
    fn name(&self) -> &str {
        &self.name
    }

    fn series(&self) -> Cow<'_, [Point2D]> {
        let function = &self.function;
        Cow::Borrowed(self.points.get_or_init(|| self.sampling.points(|x| (**function)(x))))
    }

    fn style(&self) -> Option<&GraphStyle> {
        self.style.as_ref()
    }
}

impl fmt::Debug for PlotableFunction2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotableFunction2D")
            .field("name", &self.name)
            .field("sampling", &self.sampling)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// A fixed list of points.
#[derive(Debug, Clone)]
pub struct PlotablePoints2D {
    name: String,
    points: Vec<Point2D>,
    style: Option<GraphStyle>,
}

impl PlotablePoints2D {
    /// Wraps precomputed points.
    pub fn new(name: impl Into<String>, points: Vec<Point2D>, style: Option<GraphStyle>) -> Self {
        Self {
            name: name.into(),
            points,
            style,
        }
    }
}

impl Plotable2D for PlotablePoints2D {
    fn name(&self) -> &str {
        &self.name
    }

    fn series(&self) -> Cow<'_, [Point2D]> {
        Cow::Borrowed(&self.points)
    }

    fn style(&self) -> Option<&GraphStyle> {
        self.style.as_ref()
    }
}

/// Shared handle to any plotable.
pub type SharedPlotable = Arc<dyn Plotable2D>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_function_is_sampled_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let plotable = PlotableFunction2D::new(
            0.0,
            1.0,
            5,
            Named::function("id", move |x| {
                counter.fetch_add(1, Ordering::SeqCst);
                x
            }),
            None,
        )
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(plotable.series().len(), 5);
        assert_eq!(plotable.series().len(), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(plotable.name(), "id");
        assert!(plotable.style().is_none());
    }

    #[test]
    fn test_function_rejects_single_point() {
        let result = PlotableFunction2D::new(0.0, 1.0, 1, Named::function("f", |x| x), None);
        assert!(result.unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_points_keep_order() {
        let points = vec![Point2D::new(3.0, 1.0), Point2D::new(1.0, 2.0)];
        let plotable = PlotablePoints2D::new("data", points.clone(), Some(GraphStyle::new()));

        assert_eq!(plotable.series().as_ref(), points.as_slice());
        assert!(plotable.style().is_some());
    }
}
