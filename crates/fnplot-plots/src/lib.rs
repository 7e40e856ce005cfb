//! # fnplot plots
//!
//! Line plots of functions of one variable and surface plots of functions of
//! two variables, drawn with plotters.
//!
//! [`Plot2D`] samples named functions (or takes precomputed series), keeps the
//! title, labels, tick formats, legend and range configuration, and rebuilds
//! an immutable [`ChartDescription`] whenever that configuration changes or
//! output is requested. [`Plot3D`] samples a function on a grid and draws a
//! height-colored surface. Both can be shown in a viewer or saved as JPEG,
//! PDF or SVG.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod chart;
pub mod colors;
pub mod export;
pub mod format;
pub mod plot;
pub mod plot2d;
pub mod plot3d;
pub mod plotable;
pub mod sampler;
pub mod surface;
pub mod types;
pub mod viewer;

pub use chart::{AxisRange, ChartDescription, ChartTheme, ChartSeries};
pub use colors::{parse_color, Palette, RainbowRamp};
pub use export::{Exporter, Render};
pub use format::NumberFormat;
pub use plot::{AnyPlot, Plot, SurfacePlot};
pub use plot2d::{ChartHandle, Plot2D};
pub use plot3d::Plot3D;
pub use plotable::{Plotable2D, PlotableFunction2D, PlotablePoints2D, SharedPlotable};
pub use sampler::{sample, Grid, HeightField, Sampling};
pub use surface::{Camera, SurfaceScene, SurfaceStyle};
pub use types::{BinaryFunction, GraphStyle, Marker, MarkerShape, Named, Point2D, Stroke, UnaryFunction};
pub use viewer::{Frame, MemoryViewer, SystemViewer, Viewer, ViewerSession};

pub use fnplot_common::{PlotError, Result};
