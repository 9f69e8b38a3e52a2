// File: crates/chart-overlay/src/anchor.rs
// Summary: Anchor specs and the pure geometry resolver (element geometry + anchor -> drawing position).
// Notes:
// - Resolution depends only on its arguments; drag overrides are passed in
//   explicitly by the owning overlay instance.
// - Dispatch is per chart family; a geometry variant that does not match its
//   family falls back to the element's source point.

use serde::{Deserialize, Serialize};

use crate::geometry::{centroid_radius, ChartFamily, ElementGeometry, Point, Rect};
use crate::types::{
    BAR_EDGE_MARGIN, CALLOUT_OFFSET_FACTOR, DEFAULT_BAR_THICKNESS, POINT_MARGIN, SECTOR_EDGE_MARGIN,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorKind {
    #[default]
    #[serde(alias = "inside")]
    Center,
    #[serde(alias = "above", alias = "outside")]
    Top,
    #[serde(alias = "below")]
    Bottom,
    Left,
    Right,
    Callout,
}

/// Where an annotation sits relative to its mark. Absolute coordinates win over
/// the computed anchor, axis by axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorSpec {
    pub kind: AnchorKind,
    #[serde(alias = "absoluteX")]
    pub absolute_x: Option<f32>,
    #[serde(alias = "absoluteY")]
    pub absolute_y: Option<f32>,
}

impl AnchorSpec {
    pub const fn new(kind: AnchorKind) -> Self {
        Self { kind, absolute_x: None, absolute_y: None }
    }

    pub const fn absolute(x: f32, y: f32) -> Self {
        Self { kind: AnchorKind::Center, absolute_x: Some(x), absolute_y: Some(y) }
    }

    pub fn is_callout(&self) -> bool {
        self.kind == AnchorKind::Callout
    }
}

/// Resolve the drawing position for an annotation of `size` pixels anchored to `element`.
pub fn resolve(
    family: ChartFamily,
    element: &ElementGeometry,
    chart_area: &Rect,
    anchor: &AnchorSpec,
    size: f32,
) -> Point {
    if let (Some(x), Some(y)) = (anchor.absolute_x, anchor.absolute_y) {
        return Point::new(x, y);
    }
    let element = element.sanitized();
    let computed = match anchor.kind {
        AnchorKind::Callout => callout_default(&element, chart_area, size),
        kind => match family {
            ChartFamily::Bar { .. } => bar_anchor(&element, kind),
            ChartFamily::Line | ChartFamily::Scatter | ChartFamily::Bubble | ChartFamily::Radar => {
                point_anchor(&element, kind)
            }
            ChartFamily::Pie | ChartFamily::Doughnut | ChartFamily::PolarArea => {
                sector_anchor(&element, chart_area, kind)
            }
        }
        .unwrap_or_else(|| source_point(&element, chart_area)),
    };
    Point::new(
        anchor.absolute_x.unwrap_or(computed.x),
        anchor.absolute_y.unwrap_or(computed.y),
    )
}

/// Same as [`resolve`], but a drag override replaces the position of callout anchors.
pub fn resolve_with_override(
    family: ChartFamily,
    element: &ElementGeometry,
    chart_area: &Rect,
    anchor: &AnchorSpec,
    size: f32,
    drag_override: Option<Point>,
) -> Point {
    match drag_override {
        Some(p) if anchor.is_callout() => p,
        _ => resolve(family, element, chart_area, anchor, size),
    }
}

/// The coordinate an annotation "belongs" to: bar leading edge, the point itself,
/// or the sector's area centroid. Callouts start here and arrows point here.
pub fn source_point(element: &ElementGeometry, chart_area: &Rect) -> Point {
    match element.sanitized() {
        ElementGeometry::Bar { x, y, .. } | ElementGeometry::Point { x, y, .. } => Point::new(x, y),
        ElementGeometry::Sector { start_angle, end_angle, inner_radius, outer_radius } => {
            let mid = (start_angle + end_angle) * 0.5;
            chart_area.center().polar(mid, centroid_radius(inner_radius, outer_radius))
        }
    }
}

fn callout_default(element: &ElementGeometry, chart_area: &Rect, size: f32) -> Point {
    let origin = source_point(element, chart_area);
    let d = size.max(0.0) * CALLOUT_OFFSET_FACTOR;
    origin.offset(d, -d)
}

fn bar_anchor(element: &ElementGeometry, kind: AnchorKind) -> Option<Point> {
    let ElementGeometry::Bar { x, y, base, thickness, horizontal } = *element else {
        return None;
    };
    let half = thickness.unwrap_or(DEFAULT_BAR_THICKNESS) * 0.5;
    let m = BAR_EDGE_MARGIN;
    if horizontal {
        // value axis is x: `x` leading edge, `base` baseline, `y` center row
        let dir = if x < base { -1.0 } else { 1.0 };
        let p = match kind {
            AnchorKind::Center | AnchorKind::Callout => Point::new((x + base) * 0.5, y),
            AnchorKind::Top => Point::new(x + dir * m, y),
            AnchorKind::Bottom => Point::new(base + dir * m, y),
            AnchorKind::Left => Point::new(x.min(base) - m, y),
            AnchorKind::Right => Point::new(x.max(base) + m, y),
        };
        Some(p)
    } else {
        // value axis is y: `y` leading edge, `base` baseline, `x` center column
        let dir = if y > base { 1.0 } else { -1.0 };
        let mid = (y + base) * 0.5;
        let p = match kind {
            AnchorKind::Center | AnchorKind::Callout => Point::new(x, mid),
            AnchorKind::Top => Point::new(x, y + dir * m),
            AnchorKind::Bottom => Point::new(x, base + dir * m),
            AnchorKind::Left => Point::new(x - half - m, mid),
            AnchorKind::Right => Point::new(x + half + m, mid),
        };
        Some(p)
    }
}

fn point_anchor(element: &ElementGeometry, kind: AnchorKind) -> Option<Point> {
    let ElementGeometry::Point { x, y, .. } = *element else {
        return None;
    };
    let p = Point::new(x, y);
    Some(match kind {
        AnchorKind::Center | AnchorKind::Callout => p,
        AnchorKind::Top => p.offset(0.0, -POINT_MARGIN),
        AnchorKind::Bottom => p.offset(0.0, POINT_MARGIN),
        AnchorKind::Left => p.offset(-POINT_MARGIN, 0.0),
        AnchorKind::Right => p.offset(POINT_MARGIN, 0.0),
    })
}

fn sector_anchor(element: &ElementGeometry, chart_area: &Rect, kind: AnchorKind) -> Option<Point> {
    let ElementGeometry::Sector { start_angle, end_angle, inner_radius, outer_radius } = *element else {
        return None;
    };
    let center = chart_area.center();
    let mid = (start_angle + end_angle) * 0.5;
    let radius = match kind {
        AnchorKind::Top => outer_radius + SECTOR_EDGE_MARGIN,
        AnchorKind::Bottom => inner_radius + SECTOR_EDGE_MARGIN,
        AnchorKind::Center | AnchorKind::Left | AnchorKind::Right | AnchorKind::Callout => {
            centroid_radius(inner_radius, outer_radius)
        }
    };
    Some(center.polar(mid, radius))
}
