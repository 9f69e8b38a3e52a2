// File: crates/chart-overlay/src/text.rs
// Summary: Label text shaping with Skia textlayout (measure + centered paint).

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

use crate::annotation::LabelFont;
use crate::geometry::Point;

const SANS_FAMILIES: &[&str] = &["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(font: &LabelFont, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(font.size.max(1.0));
        ts.set_color(color);
        match &font.family {
            Some(family) => {
                let mut families: Vec<&str> = vec![family.as_str()];
                families.extend_from_slice(SANS_FAMILIES);
                ts.set_font_families(families.as_slice());
            }
            None => {
                ts.set_font_families(SANS_FAMILIES);
            }
        }
        if font.bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    pub fn layout(&self, text: &str, font: &LabelFont, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(font, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Width and height of the shaped text block. Falls back to a glyph-count
    /// estimate when no font could be resolved (headless hosts without fonts).
    pub fn measure(&self, text: &str, font: &LabelFont) -> (f32, f32) {
        let p = self.layout(text, font, skia::Color::TRANSPARENT);
        let width = p.longest_line();
        let height = p.height();
        if width > 0.0 && height > 0.0 {
            (width, height)
        } else {
            (text.chars().count() as f32 * font.size * 0.55, font.size * 1.2)
        }
    }

    /// Paint `text` so that its block is centered on `center`.
    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, center: Point, font: &LabelFont, color: skia::Color) {
        let p = self.layout(text, font, color);
        let (w, h) = (p.longest_line(), p.height());
        p.paint(canvas, (center.x - w * 0.5, center.y - h * 0.5));
    }
}
