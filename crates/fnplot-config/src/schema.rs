//! Settings schema definitions using serde.

use serde::{Deserialize, Serialize};

/// Root settings structure.
///
/// Every section falls back to its defaults when missing from the file, so a
/// settings file only needs to mention what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    /// Interactive frame size.
    pub window: WindowSettings,
    /// 2D chart appearance.
    pub appearance: AppearanceSettings,
    /// File export settings.
    pub export: ExportSettings,
    /// 3D surface appearance.
    pub surface: SurfaceSettings,
    /// Viewer launch settings.
    pub viewer: ViewerSettings,
}

/// Size of frames handed to the viewer by `show()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

/// Appearance of 2D charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceSettings {
    /// Background color in `#RRGGBB` form.
    pub background: String,
    /// Font family used for captions and labels.
    pub font_family: String,
    /// Caption font size.
    pub title_font_size: u32,
    /// Axis description font size.
    pub label_font_size: u32,
    /// Tick label font size.
    pub tick_font_size: u32,
    /// Outer chart margin in pixels.
    pub margin: u32,
    /// Default series colors by index, `#RRGGBB` form.
    pub palette: Vec<String>,
    /// Color for series past the end of the palette.
    pub fallback_color: String,
    /// Default line width in pixels.
    pub line_width: u32,
    /// Default marker size in pixels.
    pub marker_size: u32,
    /// Tick label pattern used when an axis has no explicit format.
    pub number_format: String,
    /// Whether new plots show a legend.
    pub legend_visible: bool,
}

/// Settings for file export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// JPEG quality, 1 to 100.
    pub jpeg_quality: u8,
}

/// Appearance of 3D surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Face opacity, 0.0 to 1.0.
    pub alpha: f64,
    /// Whether faces are filled.
    pub faces: bool,
    /// Whether the mesh wireframe is drawn.
    pub wireframe: bool,
    /// Camera rotation around the vertical axis, radians.
    pub yaw: f64,
    /// Camera elevation, radians.
    pub pitch: f64,
    /// Camera zoom factor.
    pub scale: f64,
    /// Font family for axis labels.
    pub label_font_family: String,
    /// Font size for axis labels.
    pub label_font_size: u32,
}

/// Settings for the interactive viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// When false, `show()` renders the frame but launches nothing.
    pub enabled: bool,
    /// Program and leading arguments used to open a rendered frame. The
    /// frame path is appended. Falls back to the platform opener when unset.
    pub command: Option<Vec<String>>,
}
