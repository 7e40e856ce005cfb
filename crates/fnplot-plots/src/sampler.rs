//! Uniform sampling of functions over intervals and rectangular grids.

use crate::types::Point2D;
use fnplot_common::{PlotError, Result};

/// A validated interval `[min, max]` divided into `count` evenly spaced
/// points, both endpoints included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    min: f64,
    max: f64,
    count: usize,
}

impl Sampling {
    /// Validates the interval and point count.
    ///
    /// Rejects non-finite bounds, intervals too wide to measure in `f64`,
    /// `max < min` and fewer than two points.
    /// `min == max` is accepted and yields `count` copies of the same x.
    pub fn new(min: f64, max: f64, count: usize) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(PlotError::invalid_field(
                format!("interval bounds must be finite, got [{min}, {max}]"),
                "range",
            ));
        }
        if max < min {
            return Err(PlotError::invalid_field(
                format!("interval is inverted: max {max} < min {min}"),
                "range",
            ));
        }
        if !(max - min).is_finite() {
            return Err(PlotError::invalid_field(
                format!("interval [{min}, {max}] is too wide"),
                "range",
            ));
        }
        if count < 2 {
            return Err(PlotError::invalid_field(
                format!("at least 2 sample points are required, got {count}"),
                "number_of_points",
            ));
        }
        Ok(Self { min, max, count })
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Number of points.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Distance between consecutive points.
    pub fn step(&self) -> f64 {
        (self.max - self.min) / (self.count - 1) as f64
    }

    /// The `index`-th abscissa. The last one is exactly `max`.
    pub fn value_at(&self, index: usize) -> f64 {
        if index + 1 >= self.count {
            self.max
        } else {
            self.min + index as f64 * self.step()
        }
    }

    /// All abscissae in increasing order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(|i| self.value_at(i))
    }

    /// Evaluates `function` at every abscissa.
    pub fn points<F>(&self, function: F) -> Vec<Point2D>
    where
        F: Fn(f64) -> f64,
    {
        self.values().map(|x| Point2D::new(x, function(x))).collect()
    }
}

/// Samples `function` at `count` evenly spaced points across `[xmin, xmax]`.
pub fn sample<F>(xmin: f64, xmax: f64, count: usize, function: F) -> Result<Vec<Point2D>>
where
    F: Fn(f64) -> f64,
{
    Ok(Sampling::new(xmin, xmax, count)?.points(function))
}

/// A rectangular sampling grid over two intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Sampling along x.
    pub x: Sampling,
    /// Sampling along y.
    pub y: Sampling,
}

impl Grid {
    /// Validates both axes.
    pub fn new(
        (xmin, xmax): (f64, f64),
        (ymin, ymax): (f64, f64),
        count_x: usize,
        count_y: usize,
    ) -> Result<Self> {
        Ok(Self {
            x: Sampling::new(xmin, xmax, count_x)?,
            y: Sampling::new(ymin, ymax, count_y)?,
        })
    }

    /// Evaluates `function` at every grid node.
    pub fn height_field<F>(&self, function: F) -> HeightField
    where
        F: Fn(f64, f64) -> f64,
    {
        let xs: Vec<f64> = self.x.values().collect();
        let ys: Vec<f64> = self.y.values().collect();
        let mut heights = Vec::with_capacity(xs.len() * ys.len());
        for &y in &ys {
            for &x in &xs {
                heights.push(function(x, y));
            }
        }

        let (z_min, z_max) = heights
            .iter()
            .copied()
            .filter(|z| z.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), z| {
                (lo.min(z), hi.max(z))
            });
        let bounds = (z_min <= z_max).then_some((z_min, z_max));

        HeightField {
            xs,
            ys,
            heights,
            bounds,
        }
    }
}

/// Heights of a binary function at the nodes of a [`Grid`], row-major by y.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    xs: Vec<f64>,
    ys: Vec<f64>,
    heights: Vec<f64>,
    bounds: Option<(f64, f64)>,
}

impl HeightField {
    /// Grid abscissae.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Grid ordinates.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Height at column `i`, row `j`.
    pub fn height(&self, i: usize, j: usize) -> f64 {
        self.heights[j * self.xs.len() + i]
    }

    /// Smallest and largest finite height; `None` when no height is finite.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.bounds
    }

    /// Mesh cells as corner quadruples `(x, y, z)`, counter-clockwise.
    ///
    /// Cells touching a non-finite height are skipped.
    pub fn cells(&self) -> impl Iterator<Item = [(f64, f64, f64); 4]> + '_ {
        let nx = self.xs.len();
        let ny = self.ys.len();
        (0..ny.saturating_sub(1)).flat_map(move |j| {
            (0..nx.saturating_sub(1)).filter_map(move |i| {
                let corner = |ci: usize, cj: usize| (self.xs[ci], self.ys[cj], self.height(ci, cj));
                let cell = [
                    corner(i, j),
                    corner(i + 1, j),
                    corner(i + 1, j + 1),
                    corner(i, j + 1),
                ];
                cell.iter().all(|c| c.2.is_finite()).then_some(cell)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnplot_common::test_utils::{assert_approx_eq, strategies};
    use proptest::prelude::*;

    #[test]
    fn test_square_over_zero_to_ten() {
        let points = sample(0.0, 10.0, 11, |x| x * x).unwrap();

        assert_eq!(points.len(), 11);
        assert_eq!(points[0], Point2D::new(0.0, 0.0));
        assert_eq!(points[5], Point2D::new(5.0, 25.0));
        assert_eq!(points[10], Point2D::new(10.0, 100.0));
    }

    #[test]
    fn test_rejects_degenerate_input() {
        assert!(sample(0.0, 1.0, 1, |x| x).unwrap_err().is_invalid_argument());
        assert!(sample(0.0, 1.0, 0, |x| x).unwrap_err().is_invalid_argument());
        assert!(sample(1.0, 0.0, 5, |x| x).unwrap_err().is_invalid_argument());
        assert!(sample(f64::NAN, 1.0, 5, |x| x).is_err());
        assert!(sample(0.0, f64::INFINITY, 5, |x| x).is_err());
        assert!(sample(-f64::MAX, f64::MAX, 5, |x| x).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_single_point_interval() {
        let points = sample(2.0, 2.0, 3, |x| x + 1.0).unwrap();
        assert!(points.iter().all(|p| *p == Point2D::new(2.0, 3.0)));
    }

    #[test]
    fn test_height_field_layout_and_bounds() {
        let grid = Grid::new((0.0, 2.0), (0.0, 1.0), 3, 2).unwrap();
        let field = grid.height_field(|x, y| x + 10.0 * y);

        assert_eq!(field.xs(), &[0.0, 1.0, 2.0]);
        assert_eq!(field.ys(), &[0.0, 1.0]);
        assert_eq!(field.height(2, 0), 2.0);
        assert_eq!(field.height(1, 1), 11.0);
        assert_eq!(field.bounds(), Some((0.0, 12.0)));
        assert_eq!(field.cells().count(), 2);
    }

    #[test]
    fn test_height_field_skips_non_finite_cells() {
        let grid = Grid::new((-1.0, 1.0), (-1.0, 1.0), 3, 3).unwrap();
        let field = grid.height_field(|x, y| if x == 0.0 && y == 0.0 { f64::NAN } else { x * y });

        // The centre node touches all four cells.
        assert_eq!(field.cells().count(), 0);
        assert_eq!(field.bounds(), Some((-1.0, 1.0)));
    }

    #[test]
    fn test_height_field_without_finite_values() {
        let grid = Grid::new((0.0, 1.0), (0.0, 1.0), 2, 2).unwrap();
        let field = grid.height_field(|_, _| f64::NAN);
        assert_eq!(field.bounds(), None);
    }

    proptest! {
        #[test]
        fn test_sampling_properties(
            (xmin, xmax) in strategies::interval_strategy(),
            count in strategies::point_count_strategy(),
        ) {
            let points = sample(xmin, xmax, count, f64::sin).unwrap();
            let step = (xmax - xmin) / (count - 1) as f64;
            let tolerance = 1e-9 * (xmax - xmin).abs().max(xmin.abs()).max(1.0);

            prop_assert_eq!(points.len(), count);
            prop_assert_eq!(points[0].x, xmin);
            prop_assert_eq!(points[count - 1].x, xmax);
            for pair in points.windows(2) {
                prop_assert!(((pair[1].x - pair[0].x) - step).abs() <= tolerance);
            }
        }
    }

    #[test]
    fn test_step() {
        let sampling = Sampling::new(-1.0, 1.0, 5).unwrap();
        assert_approx_eq(sampling.step(), 0.5, 1e-12);
        assert_eq!(sampling.values().collect::<Vec<_>>(), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }
}
