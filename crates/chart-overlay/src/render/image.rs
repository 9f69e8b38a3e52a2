// File: crates/chart-overlay/src/render/image.rs
// Summary: Image annotations: anchored shape-clipped images and bar-filling images.

use skia_safe as skia;

use super::scoped;
use super::shapes::{clip_outline, stroke_paint};
use crate::annotation::{FitPolicy, ImageAnnotation};
use crate::fit::fit_rect;
use crate::geometry::{Point, Rect};

fn draw_fitted(canvas: &skia::Canvas, image: &skia::Image, region: Rect, fit: FitPolicy) {
    let dst: skia::Rect = fit_rect(image.width() as f32, image.height() as f32, region, fit).into();
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    canvas.draw_image_rect(image, None, dst, &paint);
}

/// Fill the bar `region` with the image per the annotation's fit policy.
/// Returns the drawn extent.
pub fn draw_region_image(canvas: &skia::Canvas, image: &skia::Image, region: Rect, ann: &ImageAnnotation) -> f32 {
    scoped(canvas, |c| {
        c.clip_rect(skia::Rect::from(region), skia::ClipOp::Intersect, true);
        draw_fitted(c, image, region, ann.fit);
    });
    if let Some(border) = ann.border.filter(|b| b.width > 0.0) {
        canvas.draw_rect(skia::Rect::from(region), &stroke_paint(border.color.color(), border.width));
    }
    region.width().max(region.height())
}

/// Draw the image centered on `position`, clipped to the annotation's shape.
/// Returns the drawn extent.
pub fn draw_anchored_image(canvas: &skia::Canvas, image: &skia::Image, position: Point, ann: &ImageAnnotation) -> f32 {
    let size = ann.size.max(1.0);
    let rect = Rect::from_center(position, size, size);
    let outline = clip_outline(ann.shape, rect);
    scoped(canvas, |c| {
        c.clip_rrect(&outline, skia::ClipOp::Intersect, true);
        draw_fitted(c, image, rect, FitPolicy::Cover);
    });
    if let Some(border) = ann.border.filter(|b| b.width > 0.0) {
        canvas.draw_rrect(&outline, &stroke_paint(border.color.color(), border.width));
    }
    size
}
