// File: crates/chart-overlay/src/frame.rs
// Summary: Per-redraw snapshot handed over by the host chart (family, chart area, element geometry).

use crate::geometry::{ChartFamily, ElementGeometry, Rect};
use crate::types::{SlotKey, BAR_THICKNESS_RATIO, DEFAULT_BAR_THICKNESS};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameElement {
    pub slot: SlotKey,
    pub geometry: ElementGeometry,
}

/// Everything the overlay reads from the host for one render-complete call.
#[derive(Clone, Debug)]
pub struct ChartFrame {
    pub family: ChartFamily,
    pub chart_area: Rect,
    pub elements: Vec<FrameElement>,
}

impl ChartFrame {
    pub fn new(family: ChartFamily, chart_area: Rect) -> Self {
        Self { family, chart_area, elements: Vec::new() }
    }

    pub fn push(&mut self, slot: SlotKey, geometry: ElementGeometry) {
        self.elements.push(FrameElement { slot, geometry });
    }

    pub fn with_element(mut self, slot: SlotKey, geometry: ElementGeometry) -> Self {
        self.push(slot, geometry);
        self
    }

    pub fn element(&self, slot: SlotKey) -> Option<&FrameElement> {
        self.elements.iter().find(|e| e.slot == slot)
    }

    /// Element geometry with a bar's missing thickness filled in from the
    /// spacing to adjacent bars of the same series. Anchors and fill regions
    /// both read bars through this.
    pub fn geometry(&self, element: &FrameElement) -> ElementGeometry {
        match element.geometry {
            ElementGeometry::Bar { x, y, base, thickness, horizontal }
                if !thickness.is_some_and(|t| t.is_finite() && t > 0.0) =>
            {
                ElementGeometry::Bar {
                    x,
                    y,
                    base,
                    thickness: self.infer_bar_thickness(element.slot, horizontal),
                    horizontal,
                }
            }
            geometry => geometry,
        }
    }

    /// Bounding rectangle of a bar element. Cross-axis extent comes from the host
    /// when present, otherwise from the spacing to adjacent bars of the same
    /// series, otherwise [`DEFAULT_BAR_THICKNESS`].
    pub fn bar_region(&self, slot: SlotKey) -> Option<Rect> {
        let element = self.element(slot)?;
        let ElementGeometry::Bar { x, y, base, thickness, horizontal } = self.geometry(element).sanitized()
        else {
            return None;
        };
        let half = thickness.unwrap_or(DEFAULT_BAR_THICKNESS) * 0.5;
        Some(if horizontal {
            Rect::from_ltrb(x.min(base), y - half, x.max(base), y + half)
        } else {
            Rect::from_ltrb(x - half, y.min(base), x + half, y.max(base))
        })
    }

    // Accepted approximation: sparse or unevenly spaced datasets get a thickness
    // derived from the nearest neighbour only.
    fn infer_bar_thickness(&self, slot: SlotKey, horizontal: bool) -> Option<f32> {
        let cross = |g: &ElementGeometry| match *g {
            ElementGeometry::Bar { x, y, horizontal: h, .. } if h == horizontal => {
                Some(if horizontal { y } else { x })
            }
            _ => None,
        };
        let own = cross(&self.element(slot)?.geometry)?;
        self.elements
            .iter()
            .filter(|e| e.slot.series == slot.series && e.slot != slot)
            .filter(|e| e.slot.index + 1 == slot.index || slot.index + 1 == e.slot.index)
            .filter_map(|e| cross(&e.geometry))
            .map(|c| (c - own).abs())
            .filter(|d| d.is_finite() && *d > 0.0)
            .fold(None, |acc: Option<f32>, d| Some(acc.map_or(d, |a| a.min(d))))
            .map(|spacing| spacing * BAR_THICKNESS_RATIO)
    }
}
