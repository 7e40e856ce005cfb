//! 2D line plots of named point series.

use crate::chart::{AxisRange, ChartDescription, ChartTheme, ChartSeries};
use crate::export::{render_png, Exporter};
use crate::format::NumberFormat;
use crate::plotable::{PlotableFunction2D, SharedPlotable};
use crate::types::{Marker, MarkerShape, Named, Stroke, UnaryFunction};
use crate::viewer::{Frame, Viewer, ViewerSession, ViewerSlot};
use fnplot_common::{PlotError, Result};
use fnplot_config::PlotSettings;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Lifecycle of the chart behind a [`Plot2D`].
///
/// Once built, a chart is only ever replaced by a newer build.
#[derive(Debug, Clone, Default)]
pub enum ChartHandle {
    /// Nothing has been drawn yet.
    #[default]
    Unbuilt,
    /// The most recent build.
    Built(Arc<ChartDescription>),
}

impl ChartHandle {
    /// Whether a chart has been built.
    pub fn is_built(&self) -> bool {
        matches!(self, Self::Built(_))
    }
}

struct Plot2DState {
    plotables: Vec<SharedPlotable>,
    title: String,
    x_label: String,
    y_label: String,
    x_format: Option<NumberFormat>,
    y_format: Option<NumberFormat>,
    legend_visible: bool,
    y_range: Option<(f64, f64)>,
    chart: ChartHandle,
    revision: u64,
}

/// A 2D plot of one or more series sharing a domain and range axis.
///
/// All configuration goes through `&self`; one lock guards every field read
/// while the chart is rebuilt, so concurrent `show`/`save` calls never see a
/// half-updated chart.
///
/// ```no_run
/// use fnplot_plots::{Named, Plot2D};
///
/// let plot = Plot2D::from_functions(0.0, 10.0, 11, vec![Named::function("x²", |x| x * x)])?;
/// plot.set_title("Parabola");
/// plot.save_as_svg("parabola.svg", 800, 400)?;
/// # Ok::<(), fnplot_common::PlotError>(())
/// ```
pub struct Plot2D {
    state: Mutex<Plot2DState>,
    theme: Arc<ChartTheme>,
    settings: Arc<PlotSettings>,
    exporter: Exporter,
    viewer: ViewerSlot,
}

impl Plot2D {
    /// Creates a plot of `plotables` using the globally installed settings.
    ///
    /// Nothing is sampled or drawn until the chart is first needed.
    pub fn new(plotables: Vec<SharedPlotable>) -> Self {
        let settings = fnplot_config::current();
        let theme = ChartTheme::from_settings(&settings.appearance).unwrap_or_else(|e| {
            warn!(error = %e, "Invalid appearance settings, using the default theme");
            ChartTheme::default()
        });
        Self::assemble(plotables, settings, theme)
    }

    /// Samples every function over `[xmin, xmax]` at `number_of_points` points.
    pub fn from_functions(
        xmin: f64,
        xmax: f64,
        number_of_points: usize,
        functions: Vec<Named<UnaryFunction>>,
    ) -> Result<Self> {
        let plotables = functions
            .into_iter()
            .map(|function| {
                PlotableFunction2D::new(xmin, xmax, number_of_points, function, None)
                    .map(|p| Arc::new(p) as SharedPlotable)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(plotables))
    }

    /// Plots a single unnamed function.
    pub fn from_function(xmin: f64, xmax: f64, number_of_points: usize, function: UnaryFunction) -> Result<Self> {
        Self::from_functions(xmin, xmax, number_of_points, vec![Named::new("", function)])
    }

    fn assemble(plotables: Vec<SharedPlotable>, settings: Arc<PlotSettings>, theme: ChartTheme) -> Self {
        let state = Plot2DState {
            plotables,
            title: String::new(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            x_format: None,
            y_format: None,
            legend_visible: theme.legend_visible,
            y_range: None,
            chart: ChartHandle::Unbuilt,
            revision: 0,
        };
        Self {
            state: Mutex::new(state),
            theme: Arc::new(theme),
            exporter: Exporter::new(&settings.export),
            viewer: ViewerSlot::from_settings(&settings.viewer),
            settings,
        }
    }

    /// Replaces the settings used for appearance, export and viewing.
    ///
    /// Title, labels, formats, range and legend flag are kept. A built chart
    /// is rebuilt with the new appearance. A viewer installed with
    /// [`Plot2D::with_viewer`] stays in place.
    pub fn with_settings(mut self, settings: Arc<PlotSettings>) -> Result<Self> {
        settings.validate()?;
        self.theme = Arc::new(ChartTheme::from_settings(&settings.appearance)?);
        self.exporter = Exporter::new(&settings.export);
        self.viewer.reconfigure(&settings.viewer);
        self.settings = settings;
        {
            let mut state = self.state.lock();
            self.resync_if_built(&mut state);
        }
        Ok(self)
    }

    /// Sends `show()` frames to `viewer` instead of the system viewer.
    #[must_use]
    pub fn with_viewer(mut self, viewer: Arc<dyn Viewer>) -> Self {
        self.viewer = ViewerSlot::Custom(viewer);
        self
    }

    /// Sets the chart title; an empty title draws no caption.
    pub fn set_title(&self, title: impl Into<String>) {
        let mut state = self.state.lock();
        state.title = title.into();
        self.resync_if_built(&mut state);
    }

    /// Sets the domain axis label.
    pub fn set_x_axis_label(&self, label: impl Into<String>) {
        let mut state = self.state.lock();
        state.x_label = label.into();
        self.resync_if_built(&mut state);
    }

    /// Sets the range axis label.
    pub fn set_y_axis_label(&self, label: impl Into<String>) {
        let mut state = self.state.lock();
        state.y_label = label.into();
        self.resync_if_built(&mut state);
    }

    /// A 2D plot has no z axis; always fails without changing anything.
    pub fn set_z_axis_label(&self, _label: &str) -> Result<()> {
        Err(PlotError::unsupported("a 2D plot has no z axis"))
    }

    /// Tick label format of the domain axis, applied on the next rebuild.
    pub fn set_x_axis_number_format(&self, format: NumberFormat) {
        self.state.lock().x_format = Some(format);
    }

    /// Tick label format of the range axis, applied on the next rebuild.
    pub fn set_y_axis_number_format(&self, format: NumberFormat) {
        self.state.lock().y_format = Some(format);
    }

    /// Parses `pattern` and uses it for the domain axis tick labels.
    pub fn set_x_axis_number_pattern(&self, pattern: &str) -> Result<()> {
        self.set_x_axis_number_format(pattern.parse()?);
        Ok(())
    }

    /// Parses `pattern` and uses it for the range axis tick labels.
    pub fn set_y_axis_number_pattern(&self, pattern: &str) -> Result<()> {
        self.set_y_axis_number_format(pattern.parse()?);
        Ok(())
    }

    /// Fixes the range axis to `[min, max]`.
    pub fn set_y_range(&self, min: f64, max: f64) -> Result<()> {
        if !min.is_finite() || !max.is_finite() {
            return Err(PlotError::invalid_field(
                format!("y range bounds must be finite, got [{min}, {max}]"),
                "y_range",
            ));
        }
        if min > max {
            return Err(PlotError::invalid_field(
                format!("y range minimum {min} exceeds maximum {max}"),
                "y_range",
            ));
        }
        let mut state = self.state.lock();
        state.y_range = Some((min, max));
        self.resync_if_built(&mut state);
        Ok(())
    }

    /// Returns the range axis to auto-ranging.
    pub fn clear_y_range(&self) {
        let mut state = self.state.lock();
        state.y_range = None;
        self.resync_if_built(&mut state);
    }

    /// Shows or hides the legend.
    pub fn set_legend_visible(&self, visible: bool) {
        let mut state = self.state.lock();
        state.legend_visible = visible;
        self.resync_if_built(&mut state);
    }

    /// Replaces the plotted series.
    pub fn update(&self, plotables: Vec<SharedPlotable>) {
        let mut state = self.state.lock();
        state.plotables = plotables;
        self.resync_if_built(&mut state);
    }

    /// The current chart, if one has been built.
    pub fn chart(&self) -> Option<Arc<ChartDescription>> {
        match &self.state.lock().chart {
            ChartHandle::Built(chart) => Some(Arc::clone(chart)),
            ChartHandle::Unbuilt => None,
        }
    }

    /// Builds the chart from the current configuration and returns it.
    pub fn build_chart(&self) -> Arc<ChartDescription> {
        self.resync(&mut self.state.lock())
    }

    /// Renders the chart at the configured window size and opens a viewer.
    ///
    /// Every call opens a new session; dropping it closes the viewer.
    #[must_use = "dropping the session stops its viewer"]
    pub fn show(&self) -> Result<ViewerSession> {
        let chart = self.build_chart();
        let (width, height) = (self.settings.window.width, self.settings.window.height);
        let png = render_png(chart.as_ref(), width, height)?;
        self.viewer.open(Frame {
            title: frame_title(&chart.title),
            width,
            height,
            png,
        })
    }

    /// Saves the chart as a JPEG of `width` × `height` pixels.
    pub fn save_as_jpg(&self, path: impl AsRef<Path>, width: u32, height: u32) -> Result<()> {
        let mut state = self.state.lock();
        let chart = self.resync(&mut state);
        self.exporter.save_jpg(chart.as_ref(), path.as_ref(), width, height)
    }

    /// Saves the chart as a one-page PDF of `width` × `height` points.
    pub fn save_as_pdf(&self, path: impl AsRef<Path>, width: u32, height: u32) -> Result<()> {
        let mut state = self.state.lock();
        let chart = self.resync(&mut state);
        self.exporter.save_pdf(chart.as_ref(), path.as_ref(), width, height)
    }

    /// Saves the chart as an SVG document of `width` × `height` pixels.
    pub fn save_as_svg(&self, path: impl AsRef<Path>, width: u32, height: u32) -> Result<()> {
        let mut state = self.state.lock();
        let chart = self.resync(&mut state);
        self.exporter.save_svg(chart.as_ref(), path.as_ref(), width, height)
    }

    fn resync_if_built(&self, state: &mut Plot2DState) {
        if state.chart.is_built() {
            self.resync(state);
        }
    }

    /// Rebuilds the chart from `state` and swaps it into the handle.
    fn resync(&self, state: &mut Plot2DState) -> Arc<ChartDescription> {
        state.revision += 1;
        let series = resolve_series(&state.plotables, &self.theme);
        let chart = Arc::new(ChartDescription {
            title: state.title.clone(),
            x_label: state.x_label.clone(),
            y_label: state.y_label.clone(),
            x_format: state.x_format.clone().unwrap_or_else(|| self.theme.number_format.clone()),
            y_format: state.y_format.clone().unwrap_or_else(|| self.theme.number_format.clone()),
            legend_visible: state.legend_visible,
            y_range: match state.y_range {
                Some((min, max)) => AxisRange::Fixed { min, max },
                None => AxisRange::Auto,
            },
            series,
            theme: Arc::clone(&self.theme),
            revision: state.revision,
        });
        debug!(
            revision = state.revision,
            series = chart.series.len(),
            "Re-synchronized 2D chart"
        );
        state.chart = ChartHandle::Built(Arc::clone(&chart));
        chart
    }
}

/// Resolves color, marker and stroke of every plotable, in list order.
fn resolve_series(plotables: &[SharedPlotable], theme: &ChartTheme) -> Vec<ChartSeries> {
    plotables
        .iter()
        .enumerate()
        .map(|(index, plotable)| {
            let default_color = theme.palette.color_for(index);
            let (color, marker, stroke) = match plotable.style() {
                Some(style) => (style.color.unwrap_or(default_color), style.marker, style.stroke),
                None => (
                    default_color,
                    Some(Marker::new(MarkerShape::for_index(index), theme.marker_size)),
                    Some(Stroke::solid(theme.line_width)),
                ),
            };
            ChartSeries {
                name: plotable.name().to_string(),
                points: plotable.series().into_owned(),
                color,
                marker,
                stroke,
            }
        })
        .collect()
}

fn frame_title(title: &str) -> String {
    if title.is_empty() {
        "Plot".to_string()
    } else {
        title.to_string()
    }
}
