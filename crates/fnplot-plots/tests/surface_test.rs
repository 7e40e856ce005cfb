//! Integration tests for fnplot-plots 3D surfaces.

use fnplot_common::test_utils::{create_temp_dir, fonts_available, init_test_logging};
use fnplot_config::PlotSettings;
use fnplot_plots::{
    AnyPlot, BinaryFunction, Camera, MemoryViewer, Plot, Plot3D, SurfacePlot, SurfaceStyle, Viewer,
};
use std::sync::Arc;

fn saddle() -> Plot3D {
    let function: BinaryFunction = Arc::new(|x: f64, y: f64| x * x - y * y);
    Plot3D::new(-1.0, 1.0, -1.0, 1.0, 9, 9, function)
        .unwrap()
        .with_settings(Arc::new(PlotSettings::default()))
        .unwrap()
}

#[test]
fn test_height_field_bounds_drive_the_ramp() {
    init_test_logging();
    let scene = saddle().scene();

    assert_eq!(scene.field.bounds(), Some((-1.0, 1.0)));
    assert_eq!(scene.field.cells().count(), 64);
    let ramp = scene.ramp();
    assert_eq!(ramp.position(-1.0), 0.0);
    assert_eq!(ramp.position(1.0), 1.0);
}

#[test]
fn test_non_finite_heights_leave_holes() {
    let function: BinaryFunction = Arc::new(|x: f64, y: f64| 1.0 / (x * x + y * y).sqrt());
    let plot = Plot3D::new(-1.0, 1.0, -1.0, 1.0, 3, 3, function).unwrap();
    let field = plot.height_field();

    assert!(field.height(1, 1).is_infinite());
    // Every one of the four cells touches the origin.
    assert_eq!(field.cells().count(), 0);
    let (low, high) = field.bounds().unwrap();
    assert!(low > 0.0 && high.is_finite());
}

#[test]
fn test_surface_capabilities() {
    let plot = saddle();
    SurfacePlot::set_z_axis_label(&plot, "height");
    Plot::set_x_axis_label(&plot, "east");
    plot.set_label_y("north");

    let scene = plot.scene();
    assert_eq!(scene.x_label, "east");
    assert_eq!(scene.y_label, "north");
    assert_eq!(scene.z_label, "height");

    let any = AnyPlot::from(plot);
    assert!(any.as_surface().is_some());
    assert!(any.set_z_axis_label("depth").is_ok());
}

#[test]
fn test_settings_supply_style_and_camera() {
    let mut settings = PlotSettings::default();
    settings.surface.wireframe = true;
    settings.surface.alpha = 0.8;
    settings.surface.yaw = 1.2;

    let function: BinaryFunction = Arc::new(|x: f64, _y: f64| x);
    let plot = Plot3D::new(0.0, 1.0, 0.0, 1.0, 2, 2, function)
        .unwrap()
        .with_settings(Arc::new(settings))
        .unwrap();
    let scene = plot.scene();

    assert_eq!(
        scene.style,
        SurfaceStyle {
            alpha: 0.8,
            faces: true,
            wireframe: true
        }
    );
    assert_eq!(scene.camera.yaw, 1.2);
    assert_eq!(scene.font_family, "serif");
    assert_eq!(scene.font_size, 24);
}

#[test]
fn test_each_show_opens_a_fresh_session() {
    if !fonts_available() {
        return;
    }
    let viewer = MemoryViewer::new();
    let plot = saddle().with_viewer(Arc::new(viewer.clone()) as Arc<dyn Viewer>);
    plot.set_title("Saddle");

    let first = plot.show().unwrap();
    plot.set_label_z("changed");
    let second = plot.show().unwrap();

    assert_eq!(first.title(), "Saddle");
    assert!(first.is_open() && second.is_open());
    assert_eq!(viewer.len(), 2);
    assert!(viewer.frames()[1].png.starts_with(b"\x89PNG"));
}

#[test]
fn test_surface_exports() {
    if !fonts_available() {
        return;
    }
    let dir = create_temp_dir();
    let plot = saddle();
    plot.set_surface_style(SurfaceStyle {
        alpha: 1.0,
        faces: true,
        wireframe: true,
    })
    .unwrap();
    plot.set_camera(Camera {
        yaw: 0.8,
        pitch: 0.4,
        scale: 0.9,
    })
    .unwrap();

    let jpg = dir.path().join("saddle.jpg");
    let svg = dir.path().join("saddle.svg");
    let pdf = dir.path().join("saddle.pdf");
    plot.save_as_jpg(&jpg, 400, 300).unwrap();
    plot.save_as_svg(&svg, 400, 300).unwrap();
    plot.save_as_pdf(&pdf, 400, 300).unwrap();

    assert!(std::fs::read(&jpg).unwrap().starts_with(&[0xFF, 0xD8]));
    assert!(std::fs::read_to_string(&svg).unwrap().contains("<polygon"));
    assert!(std::fs::read(&pdf).unwrap().starts_with(b"%PDF-"));
}
