//! 3D surface plots of functions of two variables.

use crate::colors::parse_color;
use crate::export::{render_png, Exporter};
use crate::sampler::{Grid, HeightField};
use crate::surface::{Camera, SurfaceScene, SurfaceStyle};
use crate::types::BinaryFunction;
use crate::viewer::{Frame, Viewer, ViewerSession, ViewerSlot};
use fnplot_common::Result;
use fnplot_config::PlotSettings;
use parking_lot::Mutex;
use plotters::style::WHITE;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

struct Plot3DState {
    grid: Grid,
    function: BinaryFunction,
    title: String,
    x_label: String,
    y_label: String,
    z_label: String,
    style: SurfaceStyle,
    camera: Camera,
}

/// A surface `z = f(x, y)` sampled on a rectangular grid.
///
/// Each `show()` samples the function afresh and opens an independent viewer
/// session; changing labels afterwards does not touch open sessions.
pub struct Plot3D {
    state: Mutex<Plot3DState>,
    settings: Arc<PlotSettings>,
    exporter: Exporter,
    viewer: ViewerSlot,
}

impl Plot3D {
    /// Creates a surface over `[xmin, xmax] × [ymin, ymax]` with
    /// `count_x × count_y` samples, using the globally installed settings.
    pub fn new(
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
        count_x: usize,
        count_y: usize,
        function: BinaryFunction,
    ) -> Result<Self> {
        let grid = Grid::new((xmin, xmax), (ymin, ymax), count_x, count_y)?;
        let settings = fnplot_config::current();
        let state = Plot3DState {
            grid,
            function,
            title: String::new(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            z_label: "z".to_string(),
            style: SurfaceStyle::from_settings(&settings.surface),
            camera: Camera::from_settings(&settings.surface),
        };
        Ok(Self {
            state: Mutex::new(state),
            exporter: Exporter::new(&settings.export),
            viewer: ViewerSlot::from_settings(&settings.viewer),
            settings,
        })
    }

    /// Replaces the settings; style and camera revert to the new defaults.
    ///
    /// Title and labels are kept, and so is a viewer installed with
    /// [`Plot3D::with_viewer`].
    pub fn with_settings(mut self, settings: Arc<PlotSettings>) -> Result<Self> {
        settings.validate()?;
        {
            let state = self.state.get_mut();
            state.style = SurfaceStyle::from_settings(&settings.surface);
            state.camera = Camera::from_settings(&settings.surface);
        }
        self.exporter = Exporter::new(&settings.export);
        self.viewer.reconfigure(&settings.viewer);
        self.settings = settings;
        Ok(self)
    }

    /// Sends `show()` frames to `viewer` instead of the system viewer.
    #[must_use]
    pub fn with_viewer(mut self, viewer: Arc<dyn Viewer>) -> Self {
        self.viewer = ViewerSlot::Custom(viewer);
        self
    }

    /// Sets the scene title.
    pub fn set_title(&self, title: impl Into<String>) {
        self.state.lock().title = title.into();
    }

    /// Sets the x axis label.
    pub fn set_label_x(&self, label: impl Into<String>) {
        self.state.lock().x_label = label.into();
    }

    /// Sets the y axis label.
    pub fn set_label_y(&self, label: impl Into<String>) {
        self.state.lock().y_label = label.into();
    }

    /// Sets the label of the height axis.
    pub fn set_label_z(&self, label: impl Into<String>) {
        self.state.lock().z_label = label.into();
    }

    /// Changes face opacity, face filling and wireframe.
    pub fn set_surface_style(&self, style: SurfaceStyle) -> Result<()> {
        style.validate()?;
        self.state.lock().style = style;
        Ok(())
    }

    /// Changes the viewing angles and zoom.
    pub fn set_camera(&self, camera: Camera) -> Result<()> {
        camera.validate()?;
        self.state.lock().camera = camera;
        Ok(())
    }

    /// Evaluates the function over the grid.
    pub fn height_field(&self) -> HeightField {
        let state = self.state.lock();
        sample(&state)
    }

    /// Samples the surface, renders it at the configured window size and
    /// opens a new viewer session.
    #[must_use = "dropping the session stops its viewer"]
    pub fn show(&self) -> Result<ViewerSession> {
        let scene = self.scene();
        let (width, height) = (self.settings.window.width, self.settings.window.height);
        let png = render_png(&scene, width, height)?;
        let title = if scene.title.is_empty() {
            "Surface".to_string()
        } else {
            scene.title.clone()
        };
        self.viewer.open(Frame {
            title,
            width,
            height,
            png,
        })
    }

    /// Saves the surface as a JPEG of `width` × `height` pixels.
    pub fn save_as_jpg(&self, path: impl AsRef<Path>, width: u32, height: u32) -> Result<()> {
        let state = self.state.lock();
        self.exporter.save_jpg(&self.scene_from(&state), path.as_ref(), width, height)
    }

    /// Saves the surface as a one-page PDF of `width` × `height` points.
    pub fn save_as_pdf(&self, path: impl AsRef<Path>, width: u32, height: u32) -> Result<()> {
        let state = self.state.lock();
        self.exporter.save_pdf(&self.scene_from(&state), path.as_ref(), width, height)
    }

    /// Saves the surface as an SVG document of `width` × `height` pixels.
    pub fn save_as_svg(&self, path: impl AsRef<Path>, width: u32, height: u32) -> Result<()> {
        let state = self.state.lock();
        self.exporter.save_svg(&self.scene_from(&state), path.as_ref(), width, height)
    }

    /// Samples the current configuration into a drawable scene.
    pub fn scene(&self) -> SurfaceScene {
        let state = self.state.lock();
        self.scene_from(&state)
    }

    fn scene_from(&self, state: &Plot3DState) -> SurfaceScene {
        let field = sample(state);
        debug!(
            columns = field.xs().len(),
            rows = field.ys().len(),
            bounds = ?field.bounds(),
            "Sampled surface"
        );
        SurfaceScene {
            title: state.title.clone(),
            x_label: state.x_label.clone(),
            y_label: state.y_label.clone(),
            z_label: state.z_label.clone(),
            field,
            style: state.style,
            camera: state.camera,
            background: parse_color(&self.settings.appearance.background).unwrap_or(WHITE),
            font_family: self.settings.surface.label_font_family.clone(),
            font_size: self.settings.surface.label_font_size,
        }
    }
}

fn sample(state: &Plot3DState) -> HeightField {
    let function = &state.function;
    state.grid.height_field(|x, y| (**function)(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paraboloid() -> Plot3D {
        Plot3D::new(-1.0, 1.0, -2.0, 2.0, 3, 5, Arc::new(|x: f64, y: f64| x * x + y * y))
            .unwrap()
            .with_settings(Arc::new(PlotSettings::default()))
            .unwrap()
    }

    #[test]
    fn test_construction_validates_grid() {
        let f: BinaryFunction = Arc::new(|x: f64, y: f64| x + y);
        assert!(Plot3D::new(0.0, 1.0, 0.0, 1.0, 1, 5, Arc::clone(&f)).is_err());
        assert!(Plot3D::new(1.0, 0.0, 0.0, 1.0, 5, 5, Arc::clone(&f)).is_err());
        assert!(Plot3D::new(0.0, 1.0, 0.0, f64::NAN, 5, 5, f).is_err());
    }

    #[test]
    fn test_default_labels() {
        let scene = paraboloid().scene();
        assert_eq!(scene.title, "");
        assert_eq!(
            (scene.x_label.as_str(), scene.y_label.as_str(), scene.z_label.as_str()),
            ("x", "y", "z")
        );
        assert!(scene.style.faces);
        assert!(!scene.style.wireframe);
    }

    #[test]
    fn test_height_field_follows_grid() {
        let field = paraboloid().height_field();
        assert_eq!(field.xs().len(), 3);
        assert_eq!(field.ys().len(), 5);
        assert_eq!(field.height(0, 0), 5.0);
        assert_eq!(field.height(1, 2), 0.0);
        assert_eq!(field.bounds(), Some((0.0, 5.0)));
    }

    #[test]
    fn test_labels_apply_to_next_scene() {
        let plot = paraboloid();
        let before = plot.scene();
        plot.set_label_z("height");
        assert_eq!(before.z_label, "z");
        assert_eq!(plot.scene().z_label, "height");
    }

    #[test]
    fn test_with_settings_keeps_labels_and_follows_viewer_settings() {
        let plot = paraboloid();
        plot.set_title("bowl");
        plot.set_label_z("depth");

        let mut settings = PlotSettings::default();
        settings.viewer.enabled = false;
        let plot = plot.with_settings(Arc::new(settings)).unwrap();

        let scene = plot.scene();
        assert_eq!(scene.title, "bowl");
        assert_eq!(scene.z_label, "depth");
        match &plot.viewer {
            ViewerSlot::System(viewer) => assert!(!viewer.is_enabled()),
            ViewerSlot::Custom(_) => panic!("expected the system viewer"),
        }
    }

    #[test]
    fn test_style_and_camera_are_validated() {
        let plot = paraboloid();
        let bad = SurfaceStyle {
            alpha: -0.1,
            ..SurfaceStyle::default()
        };
        assert!(plot.set_surface_style(bad).is_err());
        assert_eq!(plot.scene().style, SurfaceStyle::default());

        let wire = SurfaceStyle {
            wireframe: true,
            ..SurfaceStyle::default()
        };
        plot.set_surface_style(wire).unwrap();
        assert!(plot.scene().style.wireframe);

        let camera = Camera {
            yaw: 1.0,
            pitch: 0.2,
            scale: 0.7,
        };
        plot.set_camera(camera).unwrap();
        assert_eq!(plot.scene().camera, camera);
    }
}
