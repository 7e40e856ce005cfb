//! Capability traits shared by 2D and 3D plots.

use crate::plot2d::Plot2D;
use crate::plot3d::Plot3D;
use crate::viewer::ViewerSession;
use fnplot_common::{PlotError, Result};
use std::path::Path;

/// Operations every plot offers.
pub trait Plot: Send + Sync {
    /// Sets the title.
    fn set_title(&self, title: &str);

    /// Sets the x axis label.
    fn set_x_axis_label(&self, label: &str);

    /// Sets the y axis label.
    fn set_y_axis_label(&self, label: &str);

    /// Renders the plot and opens a viewer session.
    #[must_use = "dropping the session stops its viewer"]
    fn show(&self) -> Result<ViewerSession>;

    /// Saves a JPEG of `width` × `height` pixels.
    fn save_as_jpg(&self, path: &Path, width: u32, height: u32) -> Result<()>;

    /// Saves a one-page PDF of `width` × `height` points.
    fn save_as_pdf(&self, path: &Path, width: u32, height: u32) -> Result<()>;

    /// Saves an SVG document of `width` × `height` pixels.
    fn save_as_svg(&self, path: &Path, width: u32, height: u32) -> Result<()>;
}

/// Plots with a third, vertical axis.
pub trait SurfacePlot: Plot {
    /// Sets the z axis label.
    fn set_z_axis_label(&self, label: &str);
}

impl Plot for Plot2D {
    fn set_title(&self, title: &str) {
        Plot2D::set_title(self, title);
    }

    fn set_x_axis_label(&self, label: &str) {
        Plot2D::set_x_axis_label(self, label);
    }

    fn set_y_axis_label(&self, label: &str) {
        Plot2D::set_y_axis_label(self, label);
    }

    fn show(&self) -> Result<ViewerSession> {
        Plot2D::show(self)
    }

    fn save_as_jpg(&self, path: &Path, width: u32, height: u32) -> Result<()> {
        Plot2D::save_as_jpg(self, path, width, height)
    }

    fn save_as_pdf(&self, path: &Path, width: u32, height: u32) -> Result<()> {
        Plot2D::save_as_pdf(self, path, width, height)
    }

    fn save_as_svg(&self, path: &Path, width: u32, height: u32) -> Result<()> {
        Plot2D::save_as_svg(self, path, width, height)
    }
}

impl Plot for Plot3D {
    fn set_title(&self, title: &str) {
        Plot3D::set_title(self, title);
    }

    fn set_x_axis_label(&self, label: &str) {
        self.set_label_x(label);
    }

    fn set_y_axis_label(&self, label: &str) {
        self.set_label_y(label);
    }

    fn show(&self) -> Result<ViewerSession> {
        Plot3D::show(self)
    }

    fn save_as_jpg(&self, path: &Path, width: u32, height: u32) -> Result<()> {
        Plot3D::save_as_jpg(self, path, width, height)
    }

    fn save_as_pdf(&self, path: &Path, width: u32, height: u32) -> Result<()> {
        Plot3D::save_as_pdf(self, path, width, height)
    }

    fn save_as_svg(&self, path: &Path, width: u32, height: u32) -> Result<()> {
        Plot3D::save_as_svg(self, path, width, height)
    }
}

impl SurfacePlot for Plot3D {
    fn set_z_axis_label(&self, label: &str) {
        self.set_label_z(label);
    }
}

/// Either kind of plot, for callers that handle both.
pub enum AnyPlot {
    /// A 2D line plot.
    TwoD(Plot2D),
    /// A 3D surface plot.
    ThreeD(Plot3D),
}

impl AnyPlot {
    /// The operations both kinds share.
    pub fn as_plot(&self) -> &dyn Plot {
        match self {
            Self::TwoD(plot) => plot as &dyn Plot,
            Self::ThreeD(plot) => plot as &dyn Plot,
        }
    }

    /// The surface operations, if this is a 3D plot.
    pub fn as_surface(&self) -> Option<&dyn SurfacePlot> {
        match self {
            Self::TwoD(_) => None,
            Self::ThreeD(plot) => Some(plot as &dyn SurfacePlot),
        }
    }

    /// Sets the z axis label; a 2D plot rejects it and stays unchanged.
    pub fn set_z_axis_label(&self, label: &str) -> Result<()> {
        match self {
            Self::TwoD(plot) => plot.set_z_axis_label(label),
            Self::ThreeD(plot) => {
                plot.set_label_z(label);
                Ok(())
            }
        }
    }
}

impl Plot for AnyPlot {
    fn set_title(&self, title: &str) {
        self.as_plot().set_title(title);
    }

    fn set_x_axis_label(&self, label: &str) {
        self.as_plot().set_x_axis_label(label);
    }

    fn set_y_axis_label(&self, label: &str) {
        self.as_plot().set_y_axis_label(label);
    }

    fn show(&self) -> Result<ViewerSession> {
        self.as_plot().show()
    }

    fn save_as_jpg(&self, path: &Path, width: u32, height: u32) -> Result<()> {
        self.as_plot().save_as_jpg(path, width, height)
    }

    fn save_as_pdf(&self, path: &Path, width: u32, height: u32) -> Result<()> {
        self.as_plot().save_as_pdf(path, width, height)
    }

    fn save_as_svg(&self, path: &Path, width: u32, height: u32) -> Result<()> {
        self.as_plot().save_as_svg(path, width, height)
    }
}

impl From<Plot2D> for AnyPlot {
    fn from(plot: Plot2D) -> Self {
        Self::TwoD(plot)
    }
}

impl From<Plot3D> for AnyPlot {
    fn from(plot: Plot3D) -> Self {
        Self::ThreeD(plot)
    }
}

impl TryFrom<AnyPlot> for Plot2D {
    type Error = PlotError;

    fn try_from(plot: AnyPlot) -> Result<Self> {
        match plot {
            AnyPlot::TwoD(plot) => Ok(plot),
            AnyPlot::ThreeD(_) => Err(PlotError::unsupported("not a 2D plot")),
        }
    }
}

impl TryFrom<AnyPlot> for Plot3D {
    type Error = PlotError;

    fn try_from(plot: AnyPlot) -> Result<Self> {
        match plot {
            AnyPlot::ThreeD(plot) => Ok(plot),
            AnyPlot::TwoD(_) => Err(PlotError::unsupported("not a 3D plot")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Named;
    use std::sync::Arc;

    fn two_d() -> AnyPlot {
        Plot2D::from_functions(0.0, 1.0, 2, vec![Named::function("id", |x| x)])
            .unwrap()
            .into()
    }

    fn three_d() -> AnyPlot {
        Plot3D::new(0.0, 1.0, 0.0, 1.0, 2, 2, Arc::new(|x: f64, y: f64| x * y))
            .unwrap()
            .into()
    }

    #[test]
    fn test_z_label_only_on_surfaces() {
        let plot = two_d();
        assert!(plot.set_z_axis_label("z").unwrap_err().is_unsupported());
        assert!(plot.as_surface().is_none());

        let surface = three_d();
        surface.set_z_axis_label("height").unwrap();
        let plot3d = Plot3D::try_from(surface).unwrap();
        assert_eq!(plot3d.scene().z_label, "height");
    }

    #[test]
    fn test_shared_operations_reach_both_kinds() {
        let plot = two_d();
        plot.set_x_axis_label("time");
        let plot2d = Plot2D::try_from(plot).unwrap();
        assert_eq!(plot2d.build_chart().x_label, "time");

        let surface = three_d();
        Plot::set_title(&surface, "product");
        let plot3d = Plot3D::try_from(surface).unwrap();
        assert_eq!(plot3d.scene().title, "product");
    }

    #[test]
    fn test_wrong_kind_conversion() {
        assert!(Plot3D::try_from(two_d()).is_err());
        assert!(Plot2D::try_from(three_d()).is_err());
    }
}
