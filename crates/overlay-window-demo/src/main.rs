// File: crates/overlay-window-demo/src/main.rs
// Summary: Windowed demo: renders an annotated chart via RGBA blit (CPU) using winit + softbuffer; callouts are draggable.
// Keys: E exports with the configured background, R resets dragged callouts, any other key cycles chart kinds.

use anyhow::{anyhow, Context, Result};
use chart_overlay::export::read_rgba;
use chart_overlay::{AnnotationOverlay, ChartPlugin, CursorIcon, OverlayConfig, PointerEvent};
use overlay_demo::assets::write_demo_assets;
use overlay_demo::{dispatch, load_csv, DataSet, HostChart, HostKind, ListenerTable};
use skia_safe as skia;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use winit::event::{ElementState, Event, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

const KINDS: [HostKind; 4] = [HostKind::Bar, HostKind::HorizontalBar, HostKind::Pie, HostKind::Doughnut];

fn main() -> Result<()> {
    init_tracing();

    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../overlay-demo/data");
    let config_path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| data_dir.join("overlay.json"));
    let bars = load_csv(&data_dir.join("quarterly.csv"))?;
    let shares = load_csv(&data_dir.join("share.csv"))?;

    let out_dir = PathBuf::from("target/out");
    let mut config = OverlayConfig::load(&config_path)
        .with_context(|| format!("failed to load overlay config '{}'", config_path.display()))?;
    config.asset_root = Some(write_demo_assets(&out_dir.join("assets"))?);
    config.export.output_dir = out_dir.join("exports");

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Constellation Overlay - Window Demo")
        .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 640.0))
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow!("softbuffer context: {e:?}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow!("softbuffer surface: {e:?}"))?;

    let mut kind_idx = 0usize;
    let mut chart = HostChart::new(KINDS[kind_idx], bars.clone());
    let mut listeners = ListenerTable::default();
    let mut overlay = AnnotationOverlay::new(config.clone());
    overlay.attach(&mut listeners);

    let mut cursor = (0.0f32, 0.0f32);
    let mut last_image: Option<skia::Image> = None;

    event_loop.run(move |event, _, cf| {
        match event {
            Event::WindowEvent { event, .. } => {
                let pointer = match event {
                    WindowEvent::CloseRequested => {
                        overlay.teardown(&mut listeners);
                        *cf = ControlFlow::Exit;
                        None
                    }
                    WindowEvent::Resized(size) => {
                        chart.width = size.width.max(1) as i32;
                        chart.height = size.height.max(1) as i32;
                        window.request_redraw();
                        None
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor = (position.x as f32, position.y as f32);
                        Some(PointerEvent::Move { x: cursor.0, y: cursor.1 })
                    }
                    WindowEvent::CursorLeft { .. } => Some(PointerEvent::Leave),
                    WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => Some(match state {
                        ElementState::Pressed => PointerEvent::Down { x: cursor.0, y: cursor.1 },
                        ElementState::Released => PointerEvent::Up { x: cursor.0, y: cursor.1 },
                    }),
                    WindowEvent::KeyboardInput { input, .. } if input.state == ElementState::Pressed => {
                        match input.virtual_keycode {
                            Some(VirtualKeyCode::E) => match &last_image {
                                Some(image) => match overlay.download(image, None) {
                                    Ok(path) => info!(path = %path.display(), "exported"),
                                    Err(e) => error!("export failed: {e}"),
                                },
                                None => warn!("nothing rendered yet"),
                            },
                            Some(VirtualKeyCode::R) => overlay.reset_overrides(),
                            Some(_) => {
                                // A new chart kind is a new chart instance: fresh overlay state.
                                kind_idx = (kind_idx + 1) % KINDS.len();
                                let kind = KINDS[kind_idx];
                                let data: &DataSet = if matches!(kind, HostKind::Pie | HostKind::Doughnut) { &shares } else { &bars };
                                chart = HostChart { width: chart.width, height: chart.height, ..HostChart::new(kind, data.clone()) };
                                overlay.teardown(&mut listeners);
                                overlay = AnnotationOverlay::new(config.clone());
                                overlay.attach(&mut listeners);
                                window.request_redraw();
                                info!(?kind, "switched chart");
                            }
                            None => {}
                        }
                        None
                    }
                    _ => None,
                };
                if let Some(pointer) = pointer {
                    let outcome = dispatch(&listeners, &mut [&mut overlay], &pointer);
                    if let Some(icon) = outcome.cursor {
                        window.set_cursor_icon(match icon {
                            CursorIcon::Default => winit::window::CursorIcon::Default,
                            CursorIcon::Grab => winit::window::CursorIcon::Grab,
                            CursorIcon::Grabbing => winit::window::CursorIcon::Grabbing,
                        });
                    }
                }
            }
            Event::MainEventsCleared => {
                overlay.poll();
                if overlay.take_redraw() {
                    window.request_redraw();
                }
                *cf = if overlay.pending_assets() > 0 { ControlFlow::Poll } else { ControlFlow::Wait };
            }
            Event::RedrawRequested(_) => match draw(&chart, &mut overlay, &mut surface) {
                Ok(image) => last_image = Some(image),
                Err(e) => error!("draw failed: {e:#}"),
            },
            _ => {}
        }
    })
}

/// Render chart + overlay, blit it over white into the window, and return the transparent chart bitmap.
fn draw(
    chart: &HostChart,
    overlay: &mut AnnotationOverlay,
    surface: &mut softbuffer::Surface,
) -> Result<skia::Image> {
    let (w, h) = (chart.width.max(1), chart.height.max(1));
    let (Some(nw), Some(nh)) = (NonZeroU32::new(w as u32), NonZeroU32::new(h as u32)) else {
        return Err(anyhow!("zero-sized window"));
    };
    surface.resize(nw, nh).map_err(|e| anyhow!("resize: {e:?}"))?;

    let mut raster = skia::surfaces::raster_n32_premul((w, h)).context("failed to create raster surface")?;
    let canvas = raster.canvas();
    canvas.clear(skia::Color::TRANSPARENT);
    let frame = chart.draw(canvas);
    overlay.after_render(canvas, &frame);
    let rgba = read_rgba(&mut raster)?;

    let mut buffer = surface.buffer_mut().map_err(|e| anyhow!("frame: {e:?}"))?;
    for (dst, px) in buffer.iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = px.0;
        let over_white = |c: u8| (c as u32 * a as u32 + 255 * (255 - a as u32)) / 255;
        *dst = (over_white(r) << 16) | (over_white(g) << 8) | over_white(b);
    }
    buffer.present().map_err(|e| anyhow!("present: {e:?}"))?;
    Ok(raster.image_snapshot())
}

fn init_tracing() {
    use tracing_subscriber::prelude::*;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,chart_overlay=debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
