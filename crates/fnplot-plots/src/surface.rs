//! Colored surface meshes over a height field, drawn with plotters' 3D charts.

use crate::colors::RainbowRamp;
use crate::export::Render;
use crate::sampler::HeightField;
use fnplot_common::{PlotError, Result};
use fnplot_config::SurfaceSettings;
use plotters::coord::Shift;
use plotters::prelude::*;

/// How the surface mesh is filled and outlined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStyle {
    /// Face opacity in `[0, 1]`.
    pub alpha: f64,
    /// Fill the mesh cells.
    pub faces: bool,
    /// Outline the mesh cells.
    pub wireframe: bool,
}

impl SurfaceStyle {
    /// Style configured in surface settings.
    pub fn from_settings(settings: &SurfaceSettings) -> Self {
        Self {
            alpha: settings.alpha,
            faces: settings.faces,
            wireframe: settings.wireframe,
        }
    }

    /// Rejects an opacity outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(PlotError::invalid_field(
                format!("alpha must be within [0, 1], got {}", self.alpha),
                "alpha",
            ));
        }
        Ok(())
    }
}

impl Default for SurfaceStyle {
    /// Half-transparent faces without a wireframe.
    fn default() -> Self {
        Self::from_settings(&SurfaceSettings::default())
    }
}

/// Viewing angles and zoom of the 3D scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Rotation around the vertical axis, radians.
    pub yaw: f64,
    /// Elevation, radians.
    pub pitch: f64,
    /// Zoom factor.
    pub scale: f64,
}

impl Camera {
    /// Camera configured in surface settings.
    pub fn from_settings(settings: &SurfaceSettings) -> Self {
        Self {
            yaw: settings.yaw,
            pitch: settings.pitch,
            scale: settings.scale,
        }
    }

    /// Rejects non-finite angles and a non-positive zoom.
    pub fn validate(&self) -> Result<()> {
        if !self.yaw.is_finite() || !self.pitch.is_finite() {
            return Err(PlotError::invalid_field("camera angles must be finite", "camera"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PlotError::invalid_field(
                format!("camera scale must be positive, got {}", self.scale),
                "camera",
            ));
        }
        Ok(())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_settings(&SurfaceSettings::default())
    }
}

/// A fully evaluated surface ready to be drawn.
#[derive(Debug, Clone)]
pub struct SurfaceScene {
    /// Caption; empty draws none.
    pub title: String,
    /// Label at the far end of the x axis.
    pub x_label: String,
    /// Label at the far end of the y axis.
    pub y_label: String,
    /// Label at the top of the height axis.
    pub z_label: String,
    /// Sampled heights.
    pub field: HeightField,
    /// Face and wireframe settings.
    pub style: SurfaceStyle,
    /// Viewing angles.
    pub camera: Camera,
    /// Fill behind the scene.
    pub background: RGBColor,
    /// Font of caption and labels.
    pub font_family: String,
    /// Size of caption and labels.
    pub font_size: u32,
}

impl SurfaceScene {
    /// Color ramp spanning the field's own height range.
    pub fn ramp(&self) -> RainbowRamp {
        let (min, max) = self.field.bounds().unwrap_or((0.0, 1.0));
        RainbowRamp::new(min, max)
    }

    fn font(&self) -> FontDesc<'_> {
        (self.font_family.as_str(), f64::from(self.font_size)).into_font()
    }
}

fn extent(values: &[f64]) -> (f64, f64) {
    match (values.first(), values.last()) {
        (Some(&first), Some(&last)) if first < last => (first, last),
        (Some(&first), _) => (first - 0.5, first + 0.5),
        _ => (0.0, 1.0),
    }
}

impl Render for SurfaceScene {
    fn render<DB>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&self.background)?;

        let (x0, x1) = extent(self.field.xs());
        let (y0, y1) = extent(self.field.ys());
        let (z0, z1) = match self.field.bounds() {
            Some((lo, hi)) if lo < hi => (lo, hi),
            Some((lo, _)) => (lo - 0.5, lo + 0.5),
            None => (0.0, 1.0),
        };

        let mut builder = ChartBuilder::on(root);
        builder.margin(20);
        if !self.title.is_empty() {
            builder.caption(&self.title, self.font());
        }
        // plotters draws its y axis vertically, so heights go there and the
        // function's y runs along the depth axis.
        let mut chart = builder.build_cartesian_3d(x0..x1, z0..z1, y0..y1)?;
        let camera = self.camera;
        chart.with_projection(|mut pb| {
            pb.yaw = camera.yaw;
            pb.pitch = camera.pitch;
            pb.scale = camera.scale;
            pb.into_matrix()
        });
        chart
            .configure_axes()
            .light_grid_style(BLACK.mix(0.15))
            .max_light_lines(3)
            .draw()?;

        let ramp = self.ramp();
        let alpha = self.style.alpha;
        let to_chart = |&(x, y, z): &(f64, f64, f64)| (x, z, y);

        if self.style.faces {
            chart.draw_series(self.field.cells().map(|cell| {
                let mean = cell.iter().map(|c| c.2).sum::<f64>() / 4.0;
                let corners: Vec<_> = cell.iter().map(to_chart).collect();
                Polygon::new(corners, ramp.color(mean).mix(alpha).filled())
            }))?;
        }

        if self.style.wireframe {
            chart.draw_series(self.field.cells().map(|cell| {
                let mut outline: Vec<_> = cell.iter().map(to_chart).collect();
                outline.push(to_chart(&cell[0]));
                PathElement::new(outline, BLACK.mix(0.6).stroke_width(1))
            }))?;
        }

        let font = self.font();
        let labels = [
            (self.x_label.as_str(), (x1, z0, y0)),
            (self.z_label.as_str(), (x0, z1, y0)),
            (self.y_label.as_str(), (x0, z0, y1)),
        ];
        chart.draw_series(
            labels
                .iter()
                .filter(|(text, _)| !text.is_empty())
                .map(|&(text, position)| Text::new(text.to_string(), position, font.clone())),
        )?;

        Ok(())
    }
}
