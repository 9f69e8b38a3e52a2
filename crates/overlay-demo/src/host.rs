// File: crates/overlay-demo/src/host.rs
// Summary: Minimal host chart: draws bar/pie/doughnut charts on a Skia raster surface and reports element geometry to plugins.

use anyhow::{Context, Result};
use chart_overlay::{
    ChartFamily, ChartFrame, ChartPlugin, ElementGeometry, EventOutcome, EventSource, ListenerId, PointerEvent,
    PointerEventKind, Rect, SlotKey,
};
use skia_safe as skia;
use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;
use std::path::Path;
use tracing::{debug, warn};

/// Default surface width in pixels.
pub const WIDTH: i32 = 960;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 600;

const PALETTE: [skia::Color; 6] = [
    skia::Color::from_argb(255, 32, 120, 200),
    skia::Color::from_argb(255, 240, 140, 40),
    skia::Color::from_argb(255, 20, 160, 90),
    skia::Color::from_argb(255, 200, 60, 60),
    skia::Color::from_argb(255, 130, 90, 190),
    skia::Color::from_argb(255, 90, 170, 190),
];

/// Screen margins around the plot, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Default for Insets {
    fn default() -> Self {
        Self { left: 72, right: 24, top: 24, bottom: 56 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostKind {
    Bar,
    HorizontalBar,
    Pie,
    Doughnut,
}

impl HostKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" | "column" => Some(HostKind::Bar),
            "hbar" | "horizontal-bar" => Some(HostKind::HorizontalBar),
            "pie" => Some(HostKind::Pie),
            "doughnut" | "donut" => Some(HostKind::Doughnut),
            _ => None,
        }
    }

    pub fn family(self) -> ChartFamily {
        match self {
            HostKind::Bar => ChartFamily::Bar { horizontal: false },
            HostKind::HorizontalBar => ChartFamily::Bar { horizontal: true },
            HostKind::Pie => ChartFamily::Pie,
            HostKind::Doughnut => ChartFamily::Doughnut,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SeriesData {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, Default)]
pub struct DataSet {
    pub categories: Vec<String>,
    pub series: Vec<SeriesData>,
}

/// Load a category CSV: first column is the category label, every other column a numeric series.
/// Unparseable cells become 0.
pub fn load_csv(path: &Path) -> Result<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect::<Vec<_>>();
    if headers.len() < 2 {
        anyhow::bail!("{}: need a label column and at least one series column", path.display());
    }
    let mut data = DataSet {
        categories: Vec::new(),
        series: headers[1..].iter().map(|name| SeriesData { name: name.clone(), values: Vec::new() }).collect(),
    };
    for rec in rdr.records() {
        let rec = rec?;
        data.categories.push(rec.get(0).unwrap_or_default().trim().to_string());
        for (i, series) in data.series.iter_mut().enumerate() {
            let v = rec.get(i + 1).and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(0.0);
            series.values.push(v);
        }
    }
    debug!(categories = data.categories.len(), series = data.series.len(), "loaded data set");
    Ok(data)
}

pub struct HostChart {
    pub kind: HostKind,
    pub data: DataSet,
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub background: skia::Color,
}

impl HostChart {
    pub fn new(kind: HostKind, data: DataSet) -> Self {
        Self {
            kind,
            data,
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            background: skia::Color::TRANSPARENT,
        }
    }

    pub fn plot_rect(&self) -> Rect {
        Rect::from_ltrb(
            self.insets.left as f32,
            self.insets.top as f32,
            (self.width - self.insets.right) as f32,
            (self.height - self.insets.bottom) as f32,
        )
    }

    /// Draw the chart and return the geometry snapshot for this draw.
    pub fn draw(&self, canvas: &skia::Canvas) -> ChartFrame {
        let plot = self.plot_rect();
        let mut frame = ChartFrame::new(self.kind.family(), plot);
        match self.kind {
            HostKind::Bar | HostKind::HorizontalBar => {
                draw_grid(canvas, plot);
                self.draw_bars(canvas, plot, &mut frame);
                draw_axes(canvas, plot);
            }
            HostKind::Pie | HostKind::Doughnut => self.draw_sectors(canvas, plot, &mut frame),
        }
        frame
    }

    /// Full render: clear, draw, run every plugin's render-complete hook, snapshot.
    pub fn render(&self, plugins: &mut [&mut dyn ChartPlugin]) -> Result<skia::Image> {
        let mut surface = skia::surfaces::raster_n32_premul((self.width, self.height))
            .context("failed to create raster surface")?;
        let canvas = surface.canvas();
        canvas.clear(self.background);
        let frame = self.draw(canvas);
        for plugin in plugins.iter_mut() {
            plugin.after_render(canvas, &frame);
        }
        Ok(surface.image_snapshot())
    }

    fn value_range(&self) -> (f64, f64) {
        let (mut lo, mut hi) = (0.0f64, 0.0f64);
        for v in self.data.series.iter().flat_map(|s| s.values.iter()).filter(|v| v.is_finite()) {
            lo = lo.min(*v);
            hi = hi.max(*v);
        }
        if (hi - lo).abs() < 1e-9 {
            hi = lo + 1.0;
        }
        let pad = (hi - lo) * 0.1;
        (if lo < 0.0 { lo - pad } else { lo }, hi + pad)
    }

    fn draw_bars(&self, canvas: &skia::Canvas, plot: Rect, frame: &mut ChartFrame) {
        let n_cat = self.data.categories.len();
        let n_series = self.data.series.len();
        if n_cat == 0 || n_series == 0 {
            warn!("nothing to draw: empty data set");
            return;
        }
        let horizontal = self.kind == HostKind::HorizontalBar;
        let (lo, hi) = self.value_range();
        let to_px = |v: f64| -> f32 {
            let f = ((v - lo) / (hi - lo)) as f32;
            if horizontal {
                plot.left + f * plot.width()
            } else {
                plot.bottom - f * plot.height()
            }
        };
        let (cross_start, cross_span) = if horizontal { (plot.top, plot.height()) } else { (plot.left, plot.width()) };
        let group = cross_span / n_cat as f32;
        let thickness = group * 0.8 / n_series as f32;
        let base = to_px(0.0);

        let mut font = skia::Font::default();
        font.set_size(13.0);
        let label_paint = {
            let mut p = skia::Paint::default();
            p.set_anti_alias(true);
            p.set_color(skia::Color::from_argb(255, 20, 20, 30));
            p
        };

        for (i, category) in self.data.categories.iter().enumerate() {
            for (s, series) in self.data.series.iter().enumerate() {
                let value = series.values.get(i).copied().filter(|v| v.is_finite()).unwrap_or(0.0);
                let lead = to_px(value);
                let center = cross_start + group * i as f32 + group * 0.1 + thickness * (s as f32 + 0.5);
                let half = thickness * 0.5;
                let rect = if horizontal {
                    skia::Rect::from_ltrb(lead.min(base), center - half, lead.max(base), center + half)
                } else {
                    skia::Rect::from_ltrb(center - half, lead.min(base), center + half, lead.max(base))
                };
                let mut paint = skia::Paint::default();
                paint.set_anti_alias(true);
                paint.set_color(PALETTE[s % PALETTE.len()]);
                canvas.draw_rect(rect, &paint);

                let geometry = if horizontal {
                    ElementGeometry::Bar { x: lead, y: center, base, thickness: Some(thickness), horizontal: true }
                } else {
                    ElementGeometry::Bar { x: center, y: lead, base, thickness: Some(thickness), horizontal: false }
                };
                frame.push(SlotKey::new(s, i), geometry);
            }
            let mid = cross_start + group * (i as f32 + 0.5);
            if horizontal {
                canvas.draw_str(category, (4.0, mid + 4.0), &font, &label_paint);
            } else {
                canvas.draw_str(category, (mid - 12.0, plot.bottom + 22.0), &font, &label_paint);
            }
        }
    }

    fn draw_sectors(&self, canvas: &skia::Canvas, plot: Rect, frame: &mut ChartFrame) {
        let Some(series) = self.data.series.first() else {
            warn!("nothing to draw: empty data set");
            return;
        };
        let values: Vec<f32> = series.values.iter().map(|v| if v.is_finite() && *v > 0.0 { *v as f32 } else { 0.0 }).collect();
        let total: f32 = values.iter().sum();
        if total <= 0.0 {
            warn!("pie total is zero; no sectors drawn");
            return;
        }
        let center = plot.center();
        let outer = (plot.width().min(plot.height()) * 0.5 - 8.0).max(1.0);
        let inner = if self.kind == HostKind::Doughnut { outer * 0.55 } else { 0.0 };
        let outer_oval = skia::Rect::from_xywh(center.x - outer, center.y - outer, outer * 2.0, outer * 2.0);
        let inner_oval = skia::Rect::from_xywh(center.x - inner, center.y - inner, inner * 2.0, inner * 2.0);

        let mut start = -FRAC_PI_2;
        for (i, v) in values.iter().enumerate() {
            let sweep = v / total * std::f32::consts::TAU;
            let mut paint = skia::Paint::default();
            paint.set_anti_alias(true);
            paint.set_color(PALETTE[i % PALETTE.len()]);
            let (start_deg, sweep_deg) = (start.to_degrees(), sweep.to_degrees());
            if inner > 0.0 {
                let mut path = skia::Path::new();
                path.arc_to(outer_oval, start_deg, sweep_deg, true);
                path.arc_to(inner_oval, start_deg + sweep_deg, -sweep_deg, false);
                path.close();
                canvas.draw_path(&path, &paint);
            } else {
                canvas.draw_arc(outer_oval, start_deg, sweep_deg, true, &paint);
            }
            frame.push(
                SlotKey::new(0, i),
                ElementGeometry::Sector { start_angle: start, end_angle: start + sweep, inner_radius: inner, outer_radius: outer },
            );
            start += sweep;
        }
    }
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(canvas: &skia::Canvas, plot: Rect) {
    let mut paint = skia::Paint::default();
    paint.set_color(skia::Color::from_argb(255, 230, 230, 235));
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);
    for i in 0..=5 {
        let y = plot.top + plot.height() * i as f32 / 5.0;
        canvas.draw_line((plot.left, y), (plot.right, y), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, plot: Rect) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(skia::Color::from_argb(255, 60, 60, 70));
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);
    canvas.draw_line((plot.left, plot.bottom), (plot.right, plot.bottom), &axis_paint);
    canvas.draw_line((plot.left, plot.top), (plot.left, plot.bottom), &axis_paint);
}

/// The host's listener registry; events are forwarded only for registered kinds.
#[derive(Debug, Default)]
pub struct ListenerTable {
    next: u64,
    active: HashMap<ListenerId, PointerEventKind>,
}

impl ListenerTable {
    pub fn wants(&self, kind: PointerEventKind) -> bool {
        self.active.values().any(|k| *k == kind)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl EventSource for ListenerTable {
    fn listen(&mut self, kind: PointerEventKind) -> ListenerId {
        self.next += 1;
        let id = ListenerId(self.next);
        self.active.insert(id, kind);
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.active.remove(&id);
    }
}

/// Forward `event` to every plugin if anyone listens for its kind; outcomes are merged.
pub fn dispatch(listeners: &ListenerTable, plugins: &mut [&mut dyn ChartPlugin], event: &PointerEvent) -> EventOutcome {
    if !listeners.wants(event.kind()) {
        return EventOutcome::default();
    }
    plugins.iter_mut().fold(EventOutcome::default(), |acc, plugin| {
        let out = plugin.handle_event(event);
        EventOutcome {
            consumed: acc.consumed || out.consumed,
            redraw: acc.redraw || out.redraw,
            cursor: out.cursor.or(acc.cursor),
        }
    })
}
