// File: crates/overlay-demo/src/main.rs
// Summary: Demo loads a category CSV and an overlay config, renders annotated charts, simulates a callout drag and exports.

use anyhow::{Context, Result};
use chart_overlay::{
    AnnotationOverlay, BackgroundSpec, ChartPlugin, CssColor, ExportFormat, ExportOverrides, FitPolicy, OverlayConfig,
    Point, PointerEvent,
};
use overlay_demo::assets::write_demo_assets;
use overlay_demo::{dispatch, load_csv, HostChart, HostKind, ListenerTable};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

fn main() -> Result<()> {
    init_tracing();

    // Args: [kind] [data.csv] [overlay.json]
    let mut args = std::env::args().skip(1);
    let kind_arg = args.next().unwrap_or_else(|| "bar".to_string());
    let kind = HostKind::parse(&kind_arg).with_context(|| format!("unknown chart kind '{kind_arg}'"))?;
    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let default_data = if matches!(kind, HostKind::Pie | HostKind::Doughnut) { "share.csv" } else { "quarterly.csv" };
    let data_path = args.next().map(PathBuf::from).unwrap_or_else(|| data_dir.join(default_data));
    let config_path = args.next().map(PathBuf::from).unwrap_or_else(|| data_dir.join("overlay.json"));

    let data = load_csv(&data_path).with_context(|| format!("failed to load CSV '{}'", data_path.display()))?;
    if data.categories.is_empty() {
        anyhow::bail!("no rows loaded from {}", data_path.display());
    }
    info!(path = %data_path.display(), rows = data.categories.len(), series = data.series.len(), "loaded data");

    let out_dir = PathBuf::from("target/out");
    let mut config = OverlayConfig::load(&config_path)
        .with_context(|| format!("failed to load overlay config '{}'", config_path.display()))?;
    config.asset_root = Some(write_demo_assets(&out_dir.join("assets"))?);
    config.export.output_dir = out_dir.join("exports");

    let chart = HostChart::new(kind, data);
    let mut listeners = ListenerTable::default();
    let mut overlay = AnnotationOverlay::new(config);
    overlay.attach(&mut listeners);

    // First pass queues image loads; the completion turn then asks for one more paint.
    let mut image = chart.render(&mut [&mut overlay])?;
    if overlay.poll() && overlay.take_redraw() {
        image = chart.render(&mut [&mut overlay])?;
    }
    let stats = overlay.last_pass();
    info!(drawn = stats.drawn, waiting = stats.waiting, skipped = stats.skipped, "overlay pass");

    // Drag the first callout up and to the right, as a user would.
    if let Some(target) = overlay.callout_targets().first().copied() {
        let from = target.position(overlay.overrides());
        let to = Point::new(from.x + 80.0, from.y - 30.0);
        let events = [
            PointerEvent::Move { x: from.x, y: from.y },
            PointerEvent::Down { x: from.x, y: from.y },
            PointerEvent::Move { x: (from.x + to.x) * 0.5, y: (from.y + to.y) * 0.5 },
            PointerEvent::Move { x: to.x, y: to.y },
            PointerEvent::Up { x: to.x, y: to.y },
        ];
        for event in &events {
            let outcome = dispatch(&listeners, &mut [&mut overlay], event);
            if let Some(cursor) = outcome.cursor {
                info!(?event, ?cursor, "cursor change");
            }
        }
        if overlay.take_redraw() {
            image = chart.render(&mut [&mut overlay])?;
            info!(slot = %target.slot, x = to.x, y = to.y, "callout moved");
        }
    } else {
        warn!("no callout annotations drawn; skipping drag");
    }

    let path = overlay.download(&image, None)?;
    info!(path = %path.display(), "wrote export with configured background");

    let jpeg = ExportOverrides {
        background: Some(BackgroundSpec {
            white_underlay: true,
            opacity: Some(0.35),
            ..BackgroundSpec::image("stripes.png", FitPolicy::Stretch)
        }),
        format: Some(ExportFormat::Jpeg),
        quality: Some(0.85),
        file_name_prefix: Some(format!("{}-photo", kind_arg)),
        ..ExportOverrides::default()
    };
    let path = overlay.download(&image, Some(&jpeg))?;
    info!(path = %path.display(), "wrote jpeg export with image background");

    let plain = ExportOverrides {
        background: Some(BackgroundSpec::solid(CssColor::WHITE)),
        file_name_prefix: Some(format!("{}-plain", kind_arg)),
        ..ExportOverrides::default()
    };
    overlay.reset_overrides();
    if overlay.take_redraw() {
        image = chart.render(&mut [&mut overlay])?;
    }
    let path = overlay.download(&image, Some(&plain))?;
    info!(path = %path.display(), "wrote export with callouts back at their anchors");

    overlay.teardown(&mut listeners);
    info!(listeners = listeners.len(), "overlay torn down");
    Ok(())
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
