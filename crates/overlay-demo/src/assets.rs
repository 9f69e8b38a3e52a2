// File: crates/overlay-demo/src/assets.rs
// Summary: Generates the demo's annotation images (badge, stripes) as PNG files.

use anyhow::{Context, Result};
use chart_overlay::export::{encode, read_rgba};
use chart_overlay::render::shapes::{fill_paint, polygon_path, star_points};
use chart_overlay::{ExportFormat, Point};
use skia_safe as skia;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `badge.png` and `stripes.png` into `dir`; returns `dir` for use as an asset root.
pub fn write_demo_assets(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    write_png(&dir.join("badge.png"), 64, 64, draw_badge)?;
    write_png(&dir.join("stripes.png"), 48, 48, draw_stripes)?;
    info!(dir = %dir.display(), "generated demo assets");
    Ok(dir.to_path_buf())
}

fn write_png(path: &Path, w: i32, h: i32, draw: impl FnOnce(&skia::Canvas, f32, f32)) -> Result<()> {
    let mut surface = skia::surfaces::raster_n32_premul((w, h)).context("failed to create raster surface")?;
    surface.canvas().clear(skia::Color::TRANSPARENT);
    draw(surface.canvas(), w as f32, h as f32);
    let pixels = read_rgba(&mut surface)?;
    let bytes = encode(&pixels, ExportFormat::Png, 1.0)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn draw_badge(canvas: &skia::Canvas, w: f32, h: f32) {
    let center = Point::new(w * 0.5, h * 0.5);
    let radius = w.min(h) * 0.5;
    let colors = [skia::Color::from_rgb(255, 224, 130), skia::Color::from_rgb(230, 140, 20)];
    let mut disc = fill_paint(skia::Color::BLACK);
    if let Some(shader) =
        skia::Shader::radial_gradient(center, radius, &colors[..], None, skia::TileMode::Clamp, None, None)
    {
        disc.set_shader(shader);
    }
    canvas.draw_circle(center, radius, &disc);
    let star = polygon_path(&star_points(center, radius * 0.62, radius * 0.26));
    canvas.draw_path(&star, &fill_paint(skia::Color::WHITE));
}

fn draw_stripes(canvas: &skia::Canvas, w: f32, h: f32) {
    canvas.draw_rect(skia::Rect::from_wh(w, h), &fill_paint(skia::Color::from_rgb(250, 200, 120)));
    let mut stripe = fill_paint(skia::Color::from_rgb(235, 120, 40));
    stripe.set_style(skia::paint::Style::Stroke);
    stripe.set_stroke_width(6.0);
    let mut x = -h;
    while x < w {
        canvas.draw_line((x, h), (x + h, 0.0), &stripe);
        x += 14.0;
    }
}
