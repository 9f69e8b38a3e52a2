// File: crates/chart-overlay/src/types.rs
// Summary: Shared types and constants (slot keys, anchor margins, fallback magnitudes).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gap between a bar's edge and an annotation anchored to it, in pixels.
pub const BAR_EDGE_MARGIN: f32 = 10.0;
/// Offset applied to point-like marks for above/below/left/right anchors.
pub const POINT_MARGIN: f32 = 15.0;
/// Radial gap used for outside/inner-edge sector anchors.
pub const SECTOR_EDGE_MARGIN: f32 = 15.0;
/// Callout default offset, as a multiple of the annotation size.
pub const CALLOUT_OFFSET_FACTOR: f32 = 1.5;
/// Cross-axis bar extent used when neither the host nor neighbours provide one.
pub const DEFAULT_BAR_THICKNESS: f32 = 20.0;
/// Share of the spacing between adjacent bars taken up by one bar.
pub const BAR_THICKNESS_RATIO: f32 = 0.8;
/// Smallest pointer hit radius for callouts.
pub const MIN_HIT_RADIUS: f32 = 8.0;
/// Arrowhead stroke length.
pub const ARROW_HEAD_LENGTH: f32 = 10.0;
/// Half-angle between the two arrowhead strokes.
pub const ARROW_HEAD_SPREAD: f32 = std::f32::consts::PI / 6.0;
/// Corner radius of rounded image clips, as a share of the shorter side.
pub const ROUNDED_CORNER_RATIO: f32 = 0.15;

/// Identifies one data slot: `(series index, item index)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub series: usize,
    pub index: usize,
}

impl SlotKey {
    pub const fn new(series: usize, index: usize) -> Self {
        Self { series, index }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.series, self.index)
    }
}
