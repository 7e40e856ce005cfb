//! Rendering scenes to JPEG, PNG, SVG and PDF and writing them to disk.

use fnplot_common::{PlotError, Result};
use fnplot_config::ExportSettings;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use once_cell::sync::Lazy;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use svg2pdf::usvg::{self, fontdb};
use svg2pdf::{ConversionOptions, PageOptions};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// System fonts used to resolve text when converting SVG to PDF.
static FONTS: Lazy<Arc<fontdb::Database>> = Lazy::new(|| {
    let mut fonts = fontdb::Database::new();
    fonts.load_system_fonts();
    debug!(faces = fonts.len(), "Loaded fonts for PDF export");
    Arc::new(fonts)
});

/// Something that can draw itself onto any plotters drawing area.
pub trait Render {
    /// Draws onto `root`, which the caller presents afterwards.
    fn render<DB>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static;
}

fn check_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PlotError::invalid_field(
            format!("output size must be positive, got {width}x{height}"),
            "size",
        ));
    }
    Ok(())
}

/// Renders `scene` into a packed RGB buffer.
pub fn render_rgb<R: Render>(scene: &R, width: u32, height: u32) -> Result<Vec<u8>> {
    check_size(width, height)?;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        scene.render(&root)?;
        root.present()?;
    }
    Ok(buffer)
}

/// Renders `scene` as an SVG document.
pub fn render_svg<R: Render>(scene: &R, width: u32, height: u32) -> Result<String> {
    check_size(width, height)?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        scene.render(&root)?;
        root.present()?;
    }
    Ok(svg)
}

/// Converts an SVG document into a one-page vector PDF.
///
/// One SVG pixel becomes one PDF point.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let options = usvg::Options {
        fontdb: Arc::clone(&FONTS),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| PlotError::encode(format!("Failed to parse SVG: {e}")))?;
    svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| PlotError::encode(format!("Failed to convert SVG to PDF: {e}")))
}

/// Encodes an RGB buffer as JPEG.
pub fn encode_jpeg(rgb: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality).encode(rgb, width, height, ColorType::Rgb8)?;
    Ok(out)
}

/// Encodes an RGB buffer as PNG.
pub fn encode_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(rgb, width, height, ColorType::Rgb8)?;
    Ok(out)
}

/// Renders `scene` and encodes it as PNG.
pub fn render_png<R: Render>(scene: &R, width: u32, height: u32) -> Result<Vec<u8>> {
    let rgb = render_rgb(scene, width, height)?;
    encode_png(&rgb, width, height)
}

/// Writes `bytes` to `path` through a temporary file in the same directory.
///
/// The destination is only replaced once every byte has been written, so a
/// failed save leaves an existing file untouched.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.persist(path).map_err(|e| PlotError::Io(e.error))?;
    Ok(())
}

/// Encodes scenes into files according to export settings.
#[derive(Debug, Clone)]
pub struct Exporter {
    jpeg_quality: u8,
}

impl Exporter {
    /// Creates an exporter from settings.
    pub fn new(settings: &ExportSettings) -> Self {
        Self {
            jpeg_quality: settings.jpeg_quality,
        }
    }

    /// Saves `scene` as a JPEG of `width` × `height` pixels.
    pub fn save_jpg<R: Render>(&self, scene: &R, path: &Path, width: u32, height: u32) -> Result<()> {
        let rgb = render_rgb(scene, width, height)?;
        let jpeg = encode_jpeg(&rgb, width, height, self.jpeg_quality)?;
        write_atomically(path, &jpeg)?;
        info!(path = %path.display(), width, height, bytes = jpeg.len(), "Saved JPEG");
        Ok(())
    }

    /// Saves `scene` as an SVG document of `width` × `height` pixels.
    pub fn save_svg<R: Render>(&self, scene: &R, path: &Path, width: u32, height: u32) -> Result<()> {
        let svg = render_svg(scene, width, height)?;
        write_atomically(path, svg.as_bytes())?;
        info!(path = %path.display(), width, height, "Saved SVG");
        Ok(())
    }

    /// Saves `scene` as a one-page PDF of `width` × `height` points.
    pub fn save_pdf<R: Render>(&self, scene: &R, path: &Path, width: u32, height: u32) -> Result<()> {
        let svg = render_svg(scene, width, height)?;
        let document = svg_to_pdf(&svg)?;
        write_atomically(path, &document)?;
        info!(path = %path.display(), width, height, bytes = document.len(), "Saved PDF");
        Ok(())
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(&ExportSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnplot_common::test_utils::create_temp_dir;

    /// A scene without text, so it renders without system fonts.
    struct Blocks;

    impl Render for Blocks {
        fn render<DB>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
        where
            DB: DrawingBackend,
            DB::ErrorType: 'static,
        {
            root.fill(&WHITE)?;
            root.draw(&Rectangle::new([(2, 2), (8, 8)], RED.filled()))?;
            Ok(())
        }
    }

    #[test]
    fn test_render_rgb_fills_buffer() {
        let rgb = render_rgb(&Blocks, 10, 10).unwrap();
        assert_eq!(rgb.len(), 300);
        assert_eq!(&rgb[0..3], &[255, 255, 255]);
        let center = (5 * 10 + 5) * 3;
        assert_eq!(&rgb[center..center + 3], &[255, 0, 0]);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(render_rgb(&Blocks, 0, 10).unwrap_err().is_invalid_argument());
        assert!(render_svg(&Blocks, 10, 0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_encoders_produce_signatures() {
        let rgb = render_rgb(&Blocks, 10, 10).unwrap();
        assert!(encode_jpeg(&rgb, 10, 10, 90).unwrap().starts_with(&[0xFF, 0xD8]));
        assert!(encode_png(&rgb, 10, 10).unwrap().starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_render_svg() {
        let svg = render_svg(&Blocks, 20, 10).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("width=\"20\""));
    }

    #[test]
    fn test_pdf_is_vector() {
        let svg = render_svg(&Blocks, 20, 10).unwrap();
        let pdf = svg_to_pdf(&svg).unwrap();

        assert!(pdf.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/Type /Page"));
        assert!(!text.contains("/DCTDecode"));
    }

    #[test]
    fn test_invalid_svg_is_an_encode_error() {
        let error = svg_to_pdf("<svg").unwrap_err();
        assert!(matches!(error, PlotError::Encode { .. }));
    }

    #[test]
    fn test_saves_write_complete_files() {
        let dir = create_temp_dir();
        let exporter = Exporter::default();

        let jpg = dir.path().join("blocks.jpg");
        exporter.save_jpg(&Blocks, &jpg, 10, 10).unwrap();
        assert!(std::fs::read(&jpg).unwrap().starts_with(&[0xFF, 0xD8]));

        let svg = dir.path().join("blocks.svg");
        exporter.save_svg(&Blocks, &svg, 10, 10).unwrap();
        assert!(std::fs::read_to_string(&svg).unwrap().contains("<svg"));

        let pdf = dir.path().join("blocks.pdf");
        exporter.save_pdf(&Blocks, &pdf, 10, 10).unwrap();
        let bytes = std::fs::read(&pdf).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        // Only the three outputs remain; no temporary files are left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_missing_directory_is_an_io_error() {
        let dir = create_temp_dir();
        let path = dir.path().join("missing").join("out.jpg");
        let error = Exporter::default().save_jpg(&Blocks, &path, 10, 10).unwrap_err();
        assert!(matches!(error, PlotError::Io(_)));
    }

    #[test]
    fn test_failed_save_keeps_existing_file() {
        let dir = create_temp_dir();
        let path = dir.path().join("keep.svg");
        std::fs::write(&path, "original").unwrap();

        assert!(Exporter::default().save_svg(&Blocks, &path, 0, 10).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }
}
