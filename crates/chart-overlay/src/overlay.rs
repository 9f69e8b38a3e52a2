// File: crates/chart-overlay/src/overlay.rs
// Summary: AnnotationOverlay: the per-chart plugin instance tying anchors, rendering, drag and export together.
// Notes:
// - All state (overrides, drag, image cache, listeners) is owned by one instance;
//   two charts never observe each other's overrides.
// - Redraw requests coalesce: the host asks `take_redraw()` once per frame.

use skia_safe as skia;
use std::path::PathBuf;
use tracing::{debug, info, trace};

use crate::anchor::{resolve, resolve_with_override};
use crate::annotation::SlotAnnotation;
use crate::assets::{AssetLoader, AssetStore, FileLoader};
use crate::config::OverlayConfig;
use crate::drag::{CalloutTarget, DragController, DragState, EventOutcome, OverrideStore, PointerEvent, PointerEventKind};
use crate::error::Result;
use crate::export::{self, ExportOverrides, ExportSettings, ExportedImage};
use crate::frame::ChartFrame;
use crate::plugin::{ChartPlugin, EventSource, ListenerId, RedrawSignal};
use crate::render::{RenderContext, RenderOutcome};
use crate::text::TextShaper;

/// Counts from the latest render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    pub drawn: usize,
    pub waiting: usize,
    pub skipped: usize,
}

pub struct AnnotationOverlay {
    config: OverlayConfig,
    overrides: OverrideStore,
    drag: DragController,
    assets: AssetStore,
    text: TextShaper,
    listeners: Vec<ListenerId>,
    targets: Vec<CalloutTarget>,
    redraw: RedrawSignal,
    last_pass: PassStats,
}

impl AnnotationOverlay {
    pub const ID: &'static str = "annotation-overlay";

    /// Overlay reading images from disk, relative to `config.asset_root` when set.
    pub fn new(config: OverlayConfig) -> Self {
        let loader = match &config.asset_root {
            Some(root) => FileLoader::with_root(root),
            None => FileLoader::new(),
        };
        Self::with_loader(config, Box::new(loader))
    }

    pub fn with_loader(config: OverlayConfig, loader: Box<dyn AssetLoader>) -> Self {
        Self {
            config,
            overrides: OverrideStore::default(),
            drag: DragController::new(),
            assets: AssetStore::new(loader),
            text: TextShaper::new(),
            listeners: Vec::new(),
            targets: Vec::new(),
            redraw: RedrawSignal::default(),
            last_pass: PassStats::default(),
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Replace the annotation set; existing drag overrides are kept.
    pub fn set_annotations(&mut self, annotations: Vec<SlotAnnotation>) {
        self.config.annotations = annotations;
        self.redraw.request();
    }

    pub fn overrides(&self) -> &OverrideStore {
        &self.overrides
    }

    /// Forget every dragged callout position and fall back to anchor-computed ones.
    pub fn reset_overrides(&mut self) {
        self.overrides.clear();
        self.drag.reset();
        self.redraw.request();
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Callouts drawn by the latest render pass.
    pub fn callout_targets(&self) -> &[CalloutTarget] {
        &self.targets
    }

    pub fn last_pass(&self) -> PassStats {
        self.last_pass
    }

    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn pending_assets(&self) -> usize {
        self.assets.pending()
    }

    /// Completion turn for queued image loads. Returns true when a redraw is pending.
    pub fn poll(&mut self) -> bool {
        let ready = self.assets.poll();
        if ready > 0 {
            debug!(ready, "annotation images ready");
            self.redraw.request();
        }
        self.redraw.is_requested()
    }

    /// Consume the pending redraw request; at most one per host frame.
    pub fn take_redraw(&mut self) -> bool {
        self.redraw.take()
    }

    pub fn export_settings(&self, overrides: Option<&ExportOverrides>) -> ExportSettings {
        match overrides {
            Some(o) => o.apply(&self.config.export),
            None => self.config.export.clone(),
        }
    }

    /// Composite `chart` (the host's rendered bitmap) over the configured background and encode it.
    pub fn export_image(&self, chart: &skia::Image, overrides: Option<&ExportOverrides>) -> Result<ExportedImage> {
        export::export_image(chart, &self.export_settings(overrides), self.assets.loader())
    }

    /// Like [`AnnotationOverlay::export_image`], then write the file to the output directory.
    pub fn download(&self, chart: &skia::Image, overrides: Option<&ExportOverrides>) -> Result<PathBuf> {
        export::download(chart, &self.export_settings(overrides), self.assets.loader())
    }
}

impl ChartPlugin for AnnotationOverlay {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn attach(&mut self, events: &mut dyn EventSource) {
        if self.is_attached() {
            debug!("overlay already attached");
            return;
        }
        self.listeners = PointerEventKind::ALL.iter().map(|kind| events.listen(*kind)).collect();
        info!(annotations = self.config.annotations.len(), "annotation overlay attached");
    }

    fn after_render(&mut self, canvas: &skia::Canvas, frame: &ChartFrame) {
        self.assets.begin_pass();
        self.targets.clear();
        let mut stats = PassStats::default();
        let mut ctx = RenderContext { canvas, frame, assets: &mut self.assets, text: &self.text };

        for entry in &self.config.annotations {
            let slot = entry.slot();
            let Some(element) = frame.element(slot) else {
                trace!(slot = %slot, "no element for annotated slot");
                stats.skipped += 1;
                continue;
            };
            let annotation = &entry.annotation;
            let anchor = annotation.anchor();
            let size = annotation.shape_size();
            let geometry = frame.geometry(element);
            let position = resolve_with_override(
                frame.family,
                &geometry,
                &frame.chart_area,
                anchor,
                size,
                self.overrides.get(slot),
            );
            match ctx.render(position, annotation, element) {
                RenderOutcome::Drawn { extent } => {
                    stats.drawn += 1;
                    if anchor.is_callout() {
                        let default_position = resolve(frame.family, &geometry, &frame.chart_area, anchor, size);
                        self.targets.push(CalloutTarget::new(slot, default_position, extent));
                    }
                }
                RenderOutcome::Waiting => stats.waiting += 1,
                RenderOutcome::Skipped => stats.skipped += 1,
            }
        }
        trace!(drawn = stats.drawn, waiting = stats.waiting, skipped = stats.skipped, "overlay pass");
        self.last_pass = stats;
    }

    fn handle_event(&mut self, event: &PointerEvent) -> EventOutcome {
        let outcome = self.drag.handle(event, &self.targets, &mut self.overrides);
        if outcome.redraw {
            self.redraw.request();
        }
        outcome
    }

    fn teardown(&mut self, events: &mut dyn EventSource) {
        let released = self.listeners.len();
        for id in self.listeners.drain(..) {
            events.unlisten(id);
        }
        self.overrides.clear();
        self.assets.clear();
        self.targets.clear();
        self.drag.reset();
        self.redraw = RedrawSignal::default();
        self.last_pass = PassStats::default();
        if released > 0 {
            info!(listeners = released, "annotation overlay torn down");
        }
    }
}
