// File: crates/chart-overlay/src/render/mod.rs
// Summary: Shape & image renderer: draws one annotation at a resolved position on a Skia canvas.
// Notes:
// - Every clip/transform/paint-state change is wrapped in `scoped`, so the canvas
//   leaves each call with the save depth it entered with.
// - Image annotations only draw once their asset has resolved; until then the
//   slot reports `Waiting` and draws nothing (arrow included).

pub mod image;
pub mod label;
pub mod shapes;

use skia_safe as skia;
use tracing::{debug, warn};

use crate::anchor::source_point;
use crate::annotation::Annotation;
use crate::assets::AssetStore;
use crate::frame::{ChartFrame, FrameElement};
use crate::geometry::Point;
use crate::text::TextShaper;

/// Run `f` between a save and a restore of the canvas state.
pub fn scoped<R>(canvas: &skia::Canvas, f: impl FnOnce(&skia::Canvas) -> R) -> R {
    let count = canvas.save();
    let out = f(canvas);
    canvas.restore_to_count(count);
    out
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderOutcome {
    /// Drawn; `extent` is the longest side of what was drawn.
    Drawn { extent: f32 },
    /// Image asset still loading; a redraw follows its completion.
    Waiting,
    /// Nothing to draw (no payload, failed asset, unusable position).
    Skipped,
}

pub struct RenderContext<'a> {
    pub canvas: &'a skia::Canvas,
    pub frame: &'a ChartFrame,
    pub assets: &'a mut AssetStore,
    pub text: &'a TextShaper,
}

impl<'a> RenderContext<'a> {
    pub fn render(&mut self, position: Point, annotation: &Annotation, element: &FrameElement) -> RenderOutcome {
        if !annotation.has_payload() {
            return RenderOutcome::Skipped;
        }
        if !position.is_finite() {
            warn!(slot = %element.slot, "annotation skipped: position is not finite");
            return RenderOutcome::Skipped;
        }
        let canvas = self.canvas;
        let source = source_point(&element.geometry, &self.frame.chart_area);
        match annotation {
            Annotation::Image(ann) => {
                let Some(img) = self.assets.image(&ann.source) else {
                    return if self.assets.is_failed(&ann.source) {
                        RenderOutcome::Skipped
                    } else {
                        RenderOutcome::Waiting
                    };
                };
                let region = match (ann.fill_region, self.frame.family.is_bar()) {
                    (true, true) => self.frame.bar_region(element.slot),
                    (true, false) => {
                        debug!(slot = %element.slot, "fill_region ignored on non-bar chart");
                        None
                    }
                    _ => None,
                };
                let extent = scoped(canvas, |c| match region {
                    Some(region) => image::draw_region_image(c, &img, region, ann),
                    None => {
                        if let Some(style) = &ann.arrow {
                            shapes::draw_arrow(c, position, source, style);
                        }
                        image::draw_anchored_image(c, &img, position, ann)
                    }
                });
                RenderOutcome::Drawn { extent }
            }
            Annotation::Label(ann) => {
                let text = self.text;
                let extent = scoped(canvas, |c| {
                    if let Some(style) = annotation.arrow() {
                        shapes::draw_arrow(c, position, source, &style);
                    }
                    label::draw_label(c, text, position, ann)
                });
                RenderOutcome::Drawn { extent }
            }
        }
    }
}
