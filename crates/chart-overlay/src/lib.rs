// File: crates/chart-overlay/src/lib.rs
// Summary: Overlay library entry point; exports the public API for annotating, dragging and exporting charts.

pub mod anchor;
pub mod annotation;
pub mod assets;
pub mod color;
pub mod config;
pub mod drag;
pub mod error;
pub mod export;
pub mod fit;
pub mod frame;
pub mod geometry;
pub mod overlay;
pub mod plugin;
pub mod render;
pub mod text;
pub mod types;

pub use anchor::{resolve, resolve_with_override, source_point, AnchorKind, AnchorSpec};
pub use annotation::{
    Annotation, ArrowStyle, Border, ClipShape, FitPolicy, ImageAnnotation, LabelAnnotation, LabelBackground, LabelFont,
    SlotAnnotation,
};
pub use assets::{AssetLoader, AssetStore, FileLoader};
pub use color::CssColor;
pub use config::OverlayConfig;
pub use drag::{CalloutTarget, CursorIcon, DragController, DragState, EventOutcome, OverrideStore, PointerEvent, PointerEventKind};
pub use error::{OverlayError, Result};
pub use export::{
    BackgroundSpec, BackgroundType, ExportFormat, ExportOverrides, ExportSettings, ExportedImage, GradientDirection,
    GradientType,
};
pub use frame::{ChartFrame, FrameElement};
pub use geometry::{ChartFamily, ElementGeometry, Point, Rect};
pub use overlay::{AnnotationOverlay, PassStats};
pub use plugin::{ChartPlugin, EventSource, ListenerId, RedrawSignal};
pub use text::TextShaper;
pub use types::SlotKey;
