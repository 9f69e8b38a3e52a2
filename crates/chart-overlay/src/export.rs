// File: crates/chart-overlay/src/export.rs
// Summary: Export compositor: background layer (color/gradient/image) + chart bitmap -> encoded file.
// Notes:
// - Layer order is fixed: background first, chart bitmap unscaled on top.
// - Nothing is written to disk unless compositing and encoding both succeeded.

use serde::{Deserialize, Serialize};
use skia_safe as skia;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::annotation::FitPolicy;
use crate::assets::{decode_image, AssetLoader};
use crate::color::CssColor;
use crate::error::{OverlayError, Result};
use crate::fit::fit_rect;
use crate::geometry::{Point, Rect};
use crate::render::scoped;
use crate::render::shapes::fill_paint;

/// Fill used when a background image cannot be loaded, so the failure is visible.
pub const SENTINEL_FILL: skia::Color = skia::Color::from_argb(255, 255, 0, 255);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    Color,
    Gradient,
    Image,
    #[default]
    Transparent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    #[default]
    Linear,
    Radial,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientDirection {
    #[default]
    #[serde(rename = "to-right", alias = "to right")]
    ToRight,
    #[serde(rename = "to-left", alias = "to left")]
    ToLeft,
    #[serde(rename = "to-top", alias = "to top")]
    ToTop,
    #[serde(rename = "to-bottom", alias = "to bottom")]
    ToBottom,
    #[serde(rename = "135deg", alias = "diagonal")]
    Diagonal135,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundSpec {
    #[serde(rename = "type")]
    pub kind: BackgroundType,
    pub color: Option<CssColor>,
    pub gradient_type: GradientType,
    pub direction: GradientDirection,
    /// `[color1, color2]`.
    pub color_stops: Option<[CssColor; 2]>,
    pub image_source: Option<String>,
    pub image_fit: FitPolicy,
    pub white_underlay: bool,
    pub opacity: Option<f32>,
}

impl BackgroundSpec {
    pub fn solid(color: CssColor) -> Self {
        Self { kind: BackgroundType::Color, color: Some(color), ..Self::default() }
    }

    pub fn linear(direction: GradientDirection, color1: CssColor, color2: CssColor) -> Self {
        Self {
            kind: BackgroundType::Gradient,
            gradient_type: GradientType::Linear,
            direction,
            color_stops: Some([color1, color2]),
            ..Self::default()
        }
    }

    pub fn image(source: impl Into<String>, fit: FitPolicy) -> Self {
        Self {
            kind: BackgroundType::Image,
            image_source: Some(source.into()),
            image_fit: fit,
            ..Self::default()
        }
    }

    pub fn effective_opacity(&self) -> f32 {
        self.opacity.filter(|o| o.is_finite()).unwrap_or(1.0).clamp(0.0, 1.0)
    }

    /// Gradient stops in drawing order: `color2` at offset 0, `color1` at offset 1.
    pub fn gradient_stops(&self) -> [(f32, skia::Color); 2] {
        let [c1, c2] = self.color_stops.unwrap_or([CssColor::WHITE, CssColor::BLACK]);
        [(0.0, c2.color()), (1.0, c1.color())]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }
}

/// Export defaults configured per overlay instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub background: BackgroundSpec,
    pub file_name_prefix: String,
    /// 0..=1, used by lossy formats.
    pub quality: f32,
    pub format: ExportFormat,
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            background: BackgroundSpec::default(),
            file_name_prefix: "chart".to_string(),
            quality: 0.92,
            format: ExportFormat::Png,
            output_dir: PathBuf::from("exports"),
        }
    }
}

/// Per-call replacements for [`ExportSettings`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExportOverrides {
    pub background: Option<BackgroundSpec>,
    pub file_name_prefix: Option<String>,
    pub quality: Option<f32>,
    pub format: Option<ExportFormat>,
    pub output_dir: Option<PathBuf>,
}

impl ExportOverrides {
    pub fn apply(&self, defaults: &ExportSettings) -> ExportSettings {
        ExportSettings {
            background: self.background.clone().unwrap_or_else(|| defaults.background.clone()),
            file_name_prefix: self
                .file_name_prefix
                .clone()
                .unwrap_or_else(|| defaults.file_name_prefix.clone()),
            quality: self.quality.unwrap_or(defaults.quality),
            format: self.format.unwrap_or(defaults.format),
            output_dir: self.output_dir.clone().unwrap_or_else(|| defaults.output_dir.clone()),
        }
    }
}

/// An encoded export, ready to be "downloaded".
#[derive(Clone, Debug)]
pub struct ExportedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ExportedImage {
    /// Write the file into `dir` (created on demand) and return its path.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Start and end points of a linear gradient across a `width × height` surface.
pub fn gradient_endpoints(direction: GradientDirection, width: f32, height: f32) -> (Point, Point) {
    match direction {
        GradientDirection::ToRight => (Point::new(0.0, 0.0), Point::new(width, 0.0)),
        GradientDirection::ToLeft => (Point::new(width, 0.0), Point::new(0.0, 0.0)),
        GradientDirection::ToBottom => (Point::new(0.0, 0.0), Point::new(0.0, height)),
        GradientDirection::ToTop => (Point::new(0.0, height), Point::new(0.0, 0.0)),
        GradientDirection::Diagonal135 => (Point::new(0.0, 0.0), Point::new(width, height)),
    }
}

fn gradient_shader(bg: &BackgroundSpec, width: f32, height: f32) -> Option<skia::Shader> {
    let [(o0, c0), (o1, c1)] = bg.gradient_stops();
    let colors = [c0, c1];
    let positions = [o0, o1];
    match bg.gradient_type {
        GradientType::Linear => {
            let (start, end) = gradient_endpoints(bg.direction, width, height);
            skia::Shader::linear_gradient(
                (skia::Point::from(start), skia::Point::from(end)),
                &colors[..],
                &positions[..],
                skia::TileMode::Clamp,
                None,
                None,
            )
        }
        GradientType::Radial => skia::Shader::radial_gradient(
            skia::Point::new(width * 0.5, height * 0.5),
            width.max(height) * 0.5,
            &colors[..],
            &positions[..],
            skia::TileMode::Clamp,
            None,
            None,
        ),
    }
}

/// Paint the background layer over the whole `width × height` canvas.
pub fn paint_background(canvas: &skia::Canvas, width: f32, height: f32, bg: &BackgroundSpec, loader: &dyn AssetLoader) {
    let full = Rect::from_ltwh(0.0, 0.0, width, height);
    let opacity = bg.effective_opacity();
    match bg.kind {
        BackgroundType::Transparent => {}
        BackgroundType::Color => {
            let color = bg.color.unwrap_or(CssColor::WHITE).with_opacity(opacity);
            canvas.draw_rect(skia::Rect::from(full), &fill_paint(color));
        }
        BackgroundType::Gradient => match gradient_shader(bg, width, height) {
            Some(shader) => {
                let mut paint = fill_paint(skia::Color::BLACK);
                paint.set_shader(shader);
                paint.set_alpha_f(opacity);
                canvas.draw_rect(skia::Rect::from(full), &paint);
            }
            None => warn!("gradient shader could not be built; background left empty"),
        },
        BackgroundType::Image => {
            if bg.white_underlay {
                canvas.draw_rect(skia::Rect::from(full), &fill_paint(skia::Color::WHITE));
            }
            match load_background_image(bg, loader) {
                Ok(img) => scoped(canvas, |c| {
                    c.clip_rect(skia::Rect::from(full), skia::ClipOp::Intersect, true);
                    let dst = fit_rect(img.width() as f32, img.height() as f32, full, bg.image_fit);
                    let mut paint = skia::Paint::default();
                    paint.set_anti_alias(true);
                    paint.set_alpha_f(opacity);
                    c.draw_image_rect(&img, None, skia::Rect::from(dst), &paint);
                }),
                Err(e) => {
                    warn!("background image unavailable, using sentinel fill: {e}");
                    canvas.draw_rect(skia::Rect::from(full), &fill_paint(SENTINEL_FILL));
                }
            }
        }
    }
}

fn load_background_image(bg: &BackgroundSpec, loader: &dyn AssetLoader) -> Result<skia::Image> {
    let source = bg
        .image_source
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| OverlayError::asset_load("<background>", "no image source configured"))?;
    let bytes = loader.load(source)?;
    decode_image(source, &bytes)
}

/// Composite `background` and the chart bitmap into straight-alpha RGBA pixels
/// of the source's dimensions.
pub fn composite(source: &skia::Image, background: &BackgroundSpec, loader: &dyn AssetLoader) -> Result<image::RgbaImage> {
    let (w, h) = (source.width(), source.height());
    let mut surface = raster_surface(w, h)?;
    {
        let canvas = surface.canvas();
        canvas.clear(skia::Color::TRANSPARENT);
        paint_background(canvas, w as f32, h as f32, background, loader);
        canvas.draw_image(source, (0.0, 0.0), None);
    }
    read_rgba(&mut surface)
}

/// Offscreen surface for compositing; non-positive sizes are unusable.
pub fn raster_surface(width: i32, height: i32) -> Result<skia::Surface> {
    if width <= 0 || height <= 0 {
        return Err(OverlayError::SurfaceUnavailable(format!("source is {width}x{height}")));
    }
    skia::surfaces::raster_n32_premul((width, height))
        .ok_or_else(|| OverlayError::SurfaceUnavailable("failed to create raster surface".into()))
}

/// Read back a raster surface as unpremultiplied RGBA8.
pub fn read_rgba(surface: &mut skia::Surface) -> Result<image::RgbaImage> {
    let (w, h) = (surface.width(), surface.height());
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let row_bytes = w as usize * 4;
    let mut pixels = vec![0u8; row_bytes * h as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        return Err(OverlayError::SurfaceUnavailable("pixel readback failed".into()));
    }
    image::RgbaImage::from_raw(w as u32, h as u32, pixels)
        .ok_or_else(|| OverlayError::SurfaceUnavailable("pixel buffer size mismatch".into()))
}

pub fn quality_percent(quality: f32) -> u8 {
    let q = if quality.is_finite() { quality } else { 0.92 };
    (q.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

pub fn encode(pixels: &image::RgbaImage, format: ExportFormat, quality: f32) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    match format {
        ExportFormat::Png => pixels
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| OverlayError::Encode(e.to_string()))?,
        ExportFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(pixels.clone()).to_rgb8();
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality_percent(quality))
                .encode_image(&rgb)
                .map_err(|e| OverlayError::Encode(e.to_string()))?
        }
    }
    Ok(bytes)
}

/// `{prefix}-{YYYYMMDD-HHMMSS}.{ext}`
pub fn export_file_name(prefix: &str, format: ExportFormat, at: chrono::DateTime<chrono::Local>) -> String {
    let prefix = if prefix.trim().is_empty() { "chart" } else { prefix.trim() };
    format!("{}-{}.{}", prefix, at.format("%Y%m%d-%H%M%S"), format.extension())
}

/// Composite and encode, without touching the filesystem. Failures are logged here.
pub fn export_image(source: &skia::Image, settings: &ExportSettings, loader: &dyn AssetLoader) -> Result<ExportedImage> {
    let encoded = composite(source, &settings.background, loader)
        .and_then(|pixels| Ok((encode(&pixels, settings.format, settings.quality)?, pixels.width(), pixels.height())));
    let (bytes, width, height) = encoded.inspect_err(|e| warn!("export aborted: {e}"))?;
    Ok(ExportedImage {
        file_name: export_file_name(&settings.file_name_prefix, settings.format, chrono::Local::now()),
        bytes,
        width,
        height,
    })
}

/// Export and write the file into `settings.output_dir`; the path of the written file is returned.
pub fn download(source: &skia::Image, settings: &ExportSettings, loader: &dyn AssetLoader) -> Result<PathBuf> {
    let exported = export_image(source, settings, loader)?;
    let path = exported.save_to(&settings.output_dir)?;
    info!(path = %path.display(), bytes = exported.bytes.len(), "exported chart image");
    Ok(path)
}
