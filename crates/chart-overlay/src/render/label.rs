// File: crates/chart-overlay/src/render/label.rs
// Summary: Label annotations: background shape, shadowed border, centered text.

use skia_safe as skia;

use super::scoped;
use super::shapes::{fill_paint, polygon_path, star_points, stroke_paint};
use crate::annotation::{LabelAnnotation, LabelBackground};
use crate::geometry::{Point, Rect};
use crate::text::TextShaper;

const SHADOW_OFFSET: (f32, f32) = (2.0, 2.0);
const SHADOW_SIGMA: f32 = 3.0;
const SHADOW_ALPHA: u8 = 70;
const STAR_INNER_RATIO: f32 = 0.5;

enum Outline {
    Rect(skia::RRect),
    Circle(Point, f32),
    Path(skia::Path),
}

impl Outline {
    fn draw(&self, canvas: &skia::Canvas, paint: &skia::Paint) {
        match self {
            Outline::Rect(rrect) => {
                canvas.draw_rrect(rrect, paint);
            }
            Outline::Circle(center, radius) => {
                canvas.draw_circle(*center, *radius, paint);
            }
            Outline::Path(path) => {
                canvas.draw_path(path, paint);
            }
        }
    }
}

fn outline_for(ann: &LabelAnnotation, text_box: Rect, center: Point) -> Option<(Outline, f32)> {
    let longest = text_box.width().max(text_box.height());
    match ann.background {
        LabelBackground::None => None,
        LabelBackground::Rectangle => {
            let r = ann.corner_radius.max(0.0);
            Some((Outline::Rect(skia::RRect::new_rect_xy(skia::Rect::from(text_box), r, r)), longest))
        }
        LabelBackground::Circle => Some((Outline::Circle(center, longest * 0.5), longest)),
        LabelBackground::Star => {
            let outer = longest;
            let path = polygon_path(&star_points(center, outer, outer * STAR_INNER_RATIO));
            Some((Outline::Path(path), outer * 2.0))
        }
    }
}

/// Draw the label centered on `position`. Returns the drawn extent.
pub fn draw_label(canvas: &skia::Canvas, shaper: &TextShaper, position: Point, ann: &LabelAnnotation) -> f32 {
    let (tw, th) = shaper.measure(&ann.text, &ann.font);
    let pad = ann.padding.max(0.0);
    let text_box = Rect::from_center(position, tw + 2.0 * pad, th + 2.0 * pad);
    let mut extent = text_box.width().max(text_box.height());

    if let Some((outline, outline_extent)) = outline_for(ann, text_box, position) {
        extent = outline_extent;
        let bordered = ann.border_width > 0.0;
        if bordered {
            scoped(canvas, |c| {
                let mut shadow = fill_paint(skia::Color::BLACK.with_a(SHADOW_ALPHA));
                shadow.set_mask_filter(skia::MaskFilter::blur(skia::BlurStyle::Normal, SHADOW_SIGMA, None));
                c.translate(SHADOW_OFFSET);
                outline.draw(c, &shadow);
            });
        }
        outline.draw(canvas, &fill_paint(ann.background_color.color()));
        if bordered {
            outline.draw(canvas, &stroke_paint(ann.border_color.color(), ann.border_width));
        }
    }

    shaper.draw_centered(canvas, &ann.text, position, &ann.font, ann.color.color());
    extent
}
