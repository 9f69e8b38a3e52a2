// File: crates/chart-overlay/src/annotation.rs
// Summary: Annotation model (image and label variants) attached to (series, item) slots.

use serde::{Deserialize, Serialize};

use crate::anchor::AnchorSpec;
use crate::color::CssColor;
use crate::types::SlotKey;

/// Clip applied to an anchored image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClipShape {
    #[default]
    Circle,
    Square,
    #[serde(alias = "rounded-rect", alias = "roundedRect")]
    Rounded,
}

/// How an image is scaled into a target region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitPolicy {
    /// Ignore aspect ratio and fill the region exactly.
    #[serde(alias = "fill")]
    Stretch,
    Contain,
    #[default]
    Cover,
    /// Natural size, centered, clipped to the region.
    None,
    /// Natural size as well; kept distinct for configuration round-trips.
    ScaleDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub width: f32,
    pub color: CssColor,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowStyle {
    pub color: CssColor,
    pub width: f32,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self { color: CssColor::rgb(80, 80, 90), width: 1.5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageAnnotation {
    /// File path or `data:` URI.
    pub source: String,
    pub shape: ClipShape,
    pub size: f32,
    pub anchor: AnchorSpec,
    /// Fill the parent bar instead of drawing at the anchor (bars only).
    #[serde(alias = "fillRegion")]
    pub fill_region: bool,
    pub fit: FitPolicy,
    pub border: Option<Border>,
    pub arrow: Option<ArrowStyle>,
}

impl Default for ImageAnnotation {
    fn default() -> Self {
        Self {
            source: String::new(),
            shape: ClipShape::Circle,
            size: 40.0,
            anchor: AnchorSpec::default(),
            fill_region: false,
            fit: FitPolicy::Cover,
            border: None,
            arrow: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelBackground {
    #[default]
    #[serde(alias = "rect")]
    Rectangle,
    Circle,
    Star,
    None,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelFont {
    pub family: Option<String>,
    pub size: f32,
    pub bold: bool,
}

impl Default for LabelFont {
    fn default() -> Self {
        Self { family: None, size: 14.0, bold: false }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelAnnotation {
    pub text: String,
    pub font: LabelFont,
    pub color: CssColor,
    pub background: LabelBackground,
    pub background_color: CssColor,
    pub border_color: CssColor,
    pub border_width: f32,
    pub corner_radius: f32,
    pub padding: f32,
    pub anchor: AnchorSpec,
    pub show_arrow: bool,
    pub arrow_color: Option<CssColor>,
}

impl Default for LabelAnnotation {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: LabelFont::default(),
            color: CssColor::BLACK,
            background: LabelBackground::Rectangle,
            background_color: CssColor::WHITE,
            border_color: CssColor::BLACK,
            border_width: 0.0,
            corner_radius: 4.0,
            padding: 6.0,
            anchor: AnchorSpec::default(),
            show_arrow: false,
            arrow_color: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Annotation {
    Image(ImageAnnotation),
    Label(LabelAnnotation),
}

impl Annotation {
    /// False when there is nothing to draw (no image source, no text).
    pub fn has_payload(&self) -> bool {
        match self {
            Annotation::Image(a) => !a.source.trim().is_empty(),
            Annotation::Label(a) => !a.text.trim().is_empty(),
        }
    }

    pub fn anchor(&self) -> &AnchorSpec {
        match self {
            Annotation::Image(a) => &a.anchor,
            Annotation::Label(a) => &a.anchor,
        }
    }

    /// Nominal shape size used for anchor offsets before any text is measured.
    pub fn shape_size(&self) -> f32 {
        match self {
            Annotation::Image(a) => a.size.max(0.0),
            Annotation::Label(a) => (a.font.size + 2.0 * a.padding).max(0.0),
        }
    }

    pub fn arrow(&self) -> Option<ArrowStyle> {
        match self {
            Annotation::Image(a) => a.arrow,
            Annotation::Label(a) if a.show_arrow => Some(ArrowStyle {
                color: a.arrow_color.unwrap_or(a.border_color),
                ..ArrowStyle::default()
            }),
            Annotation::Label(_) => None,
        }
    }
}

/// One entry of the overlay configuration: an annotation bound to a data slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotAnnotation {
    pub series: usize,
    pub index: usize,
    pub annotation: Annotation,
}

impl SlotAnnotation {
    pub fn new(slot: SlotKey, annotation: Annotation) -> Self {
        Self { series: slot.series, index: slot.index, annotation }
    }

    pub fn slot(&self) -> SlotKey {
        SlotKey::new(self.series, self.index)
    }
}
