// File: crates/chart-overlay/src/drag.rs
// Summary: Callout drag controller (Idle/Dragging state machine) and the per-instance override store.

use std::collections::HashMap;
use tracing::debug;

use crate::geometry::Point;
use crate::types::{SlotKey, MIN_HIT_RADIUS};

/// Pointer input in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Leave,
}

impl PointerEvent {
    pub fn kind(&self) -> PointerEventKind {
        match self {
            PointerEvent::Down { .. } => PointerEventKind::Down,
            PointerEvent::Move { .. } => PointerEventKind::Move,
            PointerEvent::Up { .. } => PointerEventKind::Up,
            PointerEvent::Leave => PointerEventKind::Leave,
        }
    }

    fn position(&self) -> Option<Point> {
        match *self {
            PointerEvent::Down { x, y } | PointerEvent::Move { x, y } | PointerEvent::Up { x, y } => {
                Some(Point::new(x, y))
            }
            PointerEvent::Leave => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Leave,
}

impl PointerEventKind {
    pub const ALL: [PointerEventKind; 4] =
        [PointerEventKind::Down, PointerEventKind::Move, PointerEventKind::Up, PointerEventKind::Leave];
}

/// Pointer affordance requested from the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorIcon {
    #[default]
    Default,
    Grab,
    Grabbing,
}

/// What the host should do after an event was handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The event started, continued or ended a drag.
    pub consumed: bool,
    /// The overlay needs to be redrawn.
    pub redraw: bool,
    /// Set only when the cursor should change.
    pub cursor: Option<CursorIcon>,
}

/// User-set callout positions, keyed by slot. Lives and dies with one overlay instance.
#[derive(Clone, Debug, Default)]
pub struct OverrideStore {
    positions: HashMap<SlotKey, Point>,
}

impl OverrideStore {
    pub fn get(&self, slot: SlotKey) -> Option<Point> {
        self.positions.get(&slot).copied()
    }
    pub fn set(&mut self, slot: SlotKey, position: Point) {
        self.positions.insert(slot, position);
    }
    pub fn remove(&mut self, slot: SlotKey) -> Option<Point> {
        self.positions.remove(&slot)
    }
    pub fn clear(&mut self) {
        self.positions.clear();
    }
    pub fn len(&self) -> usize {
        self.positions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, Point)> + '_ {
        self.positions.iter().map(|(k, v)| (*k, *v))
    }
}

/// A callout drawn in the latest render pass, as seen by hit-testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalloutTarget {
    pub slot: SlotKey,
    /// Anchor-computed position, used when no override exists.
    pub default_position: Point,
    pub hit_radius: f32,
}

impl CalloutTarget {
    pub fn new(slot: SlotKey, default_position: Point, size: f32) -> Self {
        Self { slot, default_position, hit_radius: hit_radius(size) }
    }

    pub fn position(&self, overrides: &OverrideStore) -> Point {
        overrides.get(self.slot).unwrap_or(self.default_position)
    }
}

pub fn hit_radius(size: f32) -> f32 {
    (size * 0.5).max(MIN_HIT_RADIUS)
}

/// Topmost target (latest drawn) whose current position is within its hit radius of `pointer`.
pub fn hit_test<'t>(targets: &'t [CalloutTarget], overrides: &OverrideStore, pointer: Point) -> Option<&'t CalloutTarget> {
    targets
        .iter()
        .rev()
        .find(|t| t.position(overrides).distance(pointer) <= t.hit_radius)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        slot: SlotKey,
        /// Pointer position minus the annotation position at grab time.
        offset: (f32, f32),
    },
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
    hovering: bool,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Return to Idle without touching overrides.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.hovering = false;
    }

    pub fn handle(&mut self, event: &PointerEvent, targets: &[CalloutTarget], overrides: &mut OverrideStore) -> EventOutcome {
        match (self.state, event) {
            (DragState::Idle, PointerEvent::Down { .. }) => {
                let Some(pointer) = event.position() else { return EventOutcome::default() };
                let Some(target) = hit_test(targets, overrides, pointer) else {
                    return EventOutcome::default();
                };
                let origin = target.position(overrides);
                self.state = DragState::Dragging {
                    slot: target.slot,
                    offset: (pointer.x - origin.x, pointer.y - origin.y),
                };
                debug!(slot = %target.slot, "callout drag started");
                EventOutcome { consumed: true, redraw: false, cursor: Some(CursorIcon::Grabbing) }
            }
            (DragState::Dragging { slot, offset }, PointerEvent::Move { x, y }) => {
                overrides.set(slot, Point::new(x - offset.0, y - offset.1));
                EventOutcome { consumed: true, redraw: true, cursor: None }
            }
            (DragState::Dragging { slot, .. }, PointerEvent::Up { .. } | PointerEvent::Leave) => {
                self.state = DragState::Idle;
                debug!(slot = %slot, "callout drag finished");
                let still_over = event
                    .position()
                    .is_some_and(|p| hit_test(targets, overrides, p).is_some());
                self.hovering = still_over;
                let cursor = if still_over { CursorIcon::Grab } else { CursorIcon::Default };
                EventOutcome { consumed: true, redraw: false, cursor: Some(cursor) }
            }
            (DragState::Idle, PointerEvent::Move { x, y }) => {
                let over = hit_test(targets, overrides, Point::new(*x, *y)).is_some();
                self.hover_changed(over)
            }
            (DragState::Idle, PointerEvent::Leave) => self.hover_changed(false),
            _ => EventOutcome::default(),
        }
    }

    fn hover_changed(&mut self, over: bool) -> EventOutcome {
        if over == self.hovering {
            return EventOutcome::default();
        }
        self.hovering = over;
        let cursor = if over { CursorIcon::Grab } else { CursorIcon::Default };
        EventOutcome { consumed: false, redraw: false, cursor: Some(cursor) }
    }
}
