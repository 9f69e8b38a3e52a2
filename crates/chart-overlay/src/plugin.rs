// File: crates/chart-overlay/src/plugin.rs
// Summary: Host-facing plugin lifecycle (attach / after_render / handle_event / teardown) and listener plumbing.

use skia_safe as skia;

use crate::drag::{EventOutcome, PointerEvent, PointerEventKind};
use crate::frame::ChartFrame;

/// Handle returned by a host when a pointer listener is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The drawing surface's event registry, implemented by hosts.
pub trait EventSource {
    fn listen(&mut self, kind: PointerEventKind) -> ListenerId;
    fn unlisten(&mut self, id: ListenerId);
}

/// A plugin drawn on top of a host chart.
pub trait ChartPlugin {
    fn id(&self) -> &'static str;
    /// Register listeners once, when the host instance is created.
    fn attach(&mut self, events: &mut dyn EventSource);
    /// Render-complete hook: called after every host draw. Must not fail.
    fn after_render(&mut self, canvas: &skia::Canvas, frame: &ChartFrame);
    /// Pointer input in surface pixels. Affects the next render, never the current one.
    fn handle_event(&mut self, _event: &PointerEvent) -> EventOutcome {
        EventOutcome::default()
    }
    /// Undo everything `attach` did and drop per-instance state.
    fn teardown(&mut self, events: &mut dyn EventSource);
}

/// Coalescing redraw request: any number of requests before the host's next
/// paint collapse into one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedrawSignal {
    requested: bool,
}

impl RedrawSignal {
    pub fn request(&mut self) {
        self.requested = true;
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Consume the pending request, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }
}
