// File: crates/chart-overlay/src/render/shapes.rs
// Summary: Shape builders (clip outlines, stars, arrows) and paint helpers.

use skia_safe as skia;
use std::f32::consts::{FRAC_PI_2, PI};

use crate::annotation::{ArrowStyle, ClipShape};
use crate::geometry::{Point, Rect};
use crate::types::{ARROW_HEAD_LENGTH, ARROW_HEAD_SPREAD, ROUNDED_CORNER_RATIO};

pub fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

pub fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width.max(0.0));
    paint.set_color(color);
    paint
}

/// Outline of an anchored image clip.
pub fn clip_outline(shape: ClipShape, rect: Rect) -> skia::RRect {
    let r: skia::Rect = rect.into();
    match shape {
        ClipShape::Circle => skia::RRect::new_oval(r),
        ClipShape::Square => skia::RRect::new_rect(r),
        ClipShape::Rounded => {
            let radius = rect.width().min(rect.height()) * ROUNDED_CORNER_RATIO;
            skia::RRect::new_rect_xy(r, radius, radius)
        }
    }
}

/// Vertices of a 5-point star: 10 points at 36° steps starting straight up,
/// alternating between the outer and inner radius.
pub fn star_points(center: Point, outer: f32, inner: f32) -> Vec<Point> {
    (0..10)
        .map(|i| {
            let angle = -FRAC_PI_2 + i as f32 * PI / 5.0;
            let radius = if i % 2 == 0 { outer } else { inner };
            center.polar(angle, radius)
        })
        .collect()
}

pub fn polygon_path(points: &[Point]) -> skia::Path {
    let mut path = skia::Path::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close();
    }
    path
}

/// Two arrowhead strokes ending at `tip`, for a line arriving from `tail`.
pub fn arrowhead(tail: Point, tip: Point) -> [(Point, Point); 2] {
    let angle = (tip.y - tail.y).atan2(tip.x - tail.x);
    let back = |spread: f32| tip.polar(angle + PI + spread, ARROW_HEAD_LENGTH);
    [(tip, back(-ARROW_HEAD_SPREAD)), (tip, back(ARROW_HEAD_SPREAD))]
}

/// Straight callout line from the annotation to the element, head at the element.
pub fn draw_arrow(canvas: &skia::Canvas, annotation_pos: Point, element_pos: Point, style: &ArrowStyle) {
    if annotation_pos.distance(element_pos) < ARROW_HEAD_LENGTH {
        return;
    }
    let mut paint = stroke_paint(style.color.color(), style.width);
    paint.set_stroke_cap(skia::paint::Cap::Round);
    canvas.draw_line(annotation_pos, element_pos, &paint);
    for (a, b) in arrowhead(annotation_pos, element_pos) {
        canvas.draw_line(a, b, &paint);
    }
}
