// File: crates/chart-overlay/src/geometry.rs
// Summary: Pixel geometry primitives and the per-element geometry snapshot supplied by the host chart.

use skia_safe as skia;

/// A point in surface pixels (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point at `radius` from `self` along `angle` (radians, screen space).
    pub fn polar(self, angle: f32, radius: f32) -> Self {
        Self { x: self.x + angle.cos() * radius, y: self.y + angle.sin() * radius }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Point> for skia::Point {
    fn from(p: Point) -> Self {
        skia::Point::new(p.x, p.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in surface pixels.
/// Contract: `left <= right` and `top <= bottom` when built via the constructors.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Build from edges in any order; edges are normalized.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::from_ltrb(left, top, left + width, top + height)
    }
    pub fn from_center(center: Point, width: f32, height: f32) -> Self {
        Self::from_ltwh(center.x - width * 0.5, center.y - height * 0.5, width, height)
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

impl From<Rect> for skia::Rect {
    fn from(r: Rect) -> Self {
        skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom)
    }
}

/// Chart families the overlay knows how to anchor against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartFamily {
    Bar { horizontal: bool },
    Line,
    Scatter,
    Bubble,
    Radar,
    Pie,
    Doughnut,
    PolarArea,
}

impl ChartFamily {
    pub fn is_sector(self) -> bool {
        matches!(self, ChartFamily::Pie | ChartFamily::Doughnut | ChartFamily::PolarArea)
    }
    pub fn is_bar(self) -> bool {
        matches!(self, ChartFamily::Bar { .. })
    }
}

/// Native geometry of one rendered mark, as reported by the host for the current draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementGeometry {
    /// Rectangular mark. Vertical bars: `x` is the bar's center column, `y` its
    /// leading edge and `base` its baseline (pixel y). Horizontal bars: `x` is the
    /// leading edge and `base` the baseline (pixel x), `y` the center row.
    /// `thickness` is the cross-axis extent when the host knows it.
    Bar {
        x: f32,
        y: f32,
        base: f32,
        thickness: Option<f32>,
        horizontal: bool,
    },
    /// Point-like mark (line, scatter, bubble, radar vertex).
    Point { x: f32, y: f32, radius: f32 },
    /// Annular sector; the center comes from the shared chart area.
    Sector {
        start_angle: f32,
        end_angle: f32,
        inner_radius: f32,
        outer_radius: f32,
    },
}

impl ElementGeometry {
    /// Replace non-finite coordinates with 0 and clamp radii to be non-negative.
    pub fn sanitized(self) -> Self {
        match self {
            ElementGeometry::Bar { x, y, base, thickness, horizontal } => ElementGeometry::Bar {
                x: finite_or(x, 0.0),
                y: finite_or(y, 0.0),
                base: finite_or(base, 0.0),
                thickness: thickness.filter(|t| t.is_finite() && *t > 0.0),
                horizontal,
            },
            ElementGeometry::Point { x, y, radius } => ElementGeometry::Point {
                x: finite_or(x, 0.0),
                y: finite_or(y, 0.0),
                radius: finite_or(radius, 0.0).max(0.0),
            },
            ElementGeometry::Sector { start_angle, end_angle, inner_radius, outer_radius } => {
                let start_angle = finite_or(start_angle, 0.0);
                let end_angle = finite_or(end_angle, start_angle);
                let inner = finite_or(inner_radius, 0.0).max(0.0);
                let outer = finite_or(outer_radius, 0.0).max(inner);
                ElementGeometry::Sector { start_angle, end_angle, inner_radius: inner, outer_radius: outer }
            }
        }
    }
}

#[inline]
pub fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v } else { fallback }
}

/// Radius at which a point sits at the area centroid of an annular sector:
/// `(2/3)·(R² + R·r + r²)/(R + r)`, the cancelled form of
/// `(2/3)·(R³ − r³)/(R² − r²)`. Always within `[r, R]`.
pub fn centroid_radius(inner: f32, outer: f32) -> f32 {
    let (inner, outer) = (inner.max(0.0), outer.max(0.0));
    let (inner, outer) = (inner.min(outer), inner.max(outer));
    let sum = outer + inner;
    if sum <= 0.0 {
        return 0.0;
    }
    let r = (2.0 / 3.0) * (outer * outer + outer * inner + inner * inner) / sum;
    r.clamp(inner, outer)
}
