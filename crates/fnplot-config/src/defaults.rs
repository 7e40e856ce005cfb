//! Default values for every settings section.

use crate::schema::*;

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            appearance: AppearanceSettings::default(),
            export: ExportSettings::default(),
            surface: SurfaceSettings::default(),
            viewer: ViewerSettings::default(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
        }
    }
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            font_family: "sans-serif".to_string(),
            title_font_size: 20,
            label_font_size: 14,
            tick_font_size: 12,
            margin: 10,
            palette: vec![
                "#FF0000".to_string(),
                "#00FF00".to_string(),
                "#0000FF".to_string(),
            ],
            fallback_color: "#000000".to_string(),
            line_width: 1,
            marker_size: 3,
            number_format: "#.##".to_string(),
            legend_visible: false,
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
        }
    }
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            faces: true,
            wireframe: false,
            yaw: 0.5,
            pitch: 0.3,
            scale: 0.8,
            label_font_family: "serif".to_string(),
            label_font_size: 24,
        }
    }
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
        }
    }
}
