// File: crates/chart-overlay/tests/common/mod.rs
// Purpose: Shared fixtures: in-memory asset loader, listener recorder, tiny PNGs and chart bitmaps.
#![allow(dead_code)]

use chart_overlay::error::{OverlayError, Result};
use chart_overlay::{AssetLoader, EventSource, ListenerId, PointerEventKind};
use skia_safe as skia;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Serves encoded bytes from memory and records every source it was asked for.
#[derive(Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<String, Vec<u8>>,
    pub requests: Rc<RefCell<Vec<String>>>,
}

impl MemoryLoader {
    pub fn with(mut self, source: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(source.to_string(), bytes);
        self
    }
}

impl AssetLoader for MemoryLoader {
    fn load(&self, source: &str) -> Result<Vec<u8>> {
        self.requests.borrow_mut().push(source.to_string());
        self.files
            .get(source)
            .cloned()
            .ok_or_else(|| OverlayError::asset_load(source, "not found"))
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    next: u64,
    pub active: Vec<(ListenerId, PointerEventKind)>,
    pub removed: Vec<ListenerId>,
}

impl EventSource for RecordingEvents {
    fn listen(&mut self, kind: PointerEventKind) -> ListenerId {
        self.next += 1;
        let id = ListenerId(self.next);
        self.active.push((id, kind));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.active.retain(|(active, _)| *active != id);
        self.removed.push(id);
    }
}

pub fn solid_png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut out = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .expect("encode png");
    out
}

pub fn raster(w: i32, h: i32) -> skia::Surface {
    skia::surfaces::raster_n32_premul((w, h)).expect("raster surface")
}

/// Chart bitmap of `w × h`, transparent except for what `draw` paints.
pub fn chart_image(w: i32, h: i32, draw: impl FnOnce(&skia::Canvas)) -> skia::Image {
    let mut surface = raster(w, h);
    surface.canvas().clear(skia::Color::TRANSPARENT);
    draw(surface.canvas());
    surface.image_snapshot()
}

pub fn assert_near(got: [u8; 4], want: [u8; 4], tol: u8) {
    for (g, w) in got.iter().zip(want.iter()) {
        assert!(g.abs_diff(*w) <= tol, "pixel {got:?} not within {tol} of {want:?}");
    }
}

/// Counts `WARN` events emitted while installed as the thread's subscriber.
#[derive(Clone, Default)]
pub struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Run `f` with this counter collecting warnings.
    pub fn watch<R>(&self, f: impl FnOnce() -> R) -> R {
        use tracing_subscriber::prelude::*;
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}
