use anyhow::Result;
use chart_overlay::export::{composite, encode};
use chart_overlay::{BackgroundSpec, CssColor, ExportFormat, FileLoader, GradientDirection};
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use skia_safe as skia;

fn chart_bitmap(w: i32, h: i32) -> Option<skia::Image> {
    let mut surface = skia::surfaces::raster_n32_premul((w, h))?;
    let canvas = surface.canvas();
    canvas.clear(skia::Color::TRANSPARENT);
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(skia::Color::from_rgb(40, 90, 180));
    for i in 0..40 {
        let x = 10.0 + i as f32 * (w as f32 - 20.0) / 40.0;
        let top = h as f32 * (0.2 + 0.6 * ((i as f32 * 0.3).sin() * 0.5 + 0.5));
        canvas.draw_rect(skia::Rect::from_ltrb(x, top, x + 12.0, h as f32 - 10.0), &paint);
    }
    Some(surface.image_snapshot())
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let loader = FileLoader::new();
    let backgrounds = [
        ("solid", BackgroundSpec::solid(CssColor::WHITE)),
        ("gradient", BackgroundSpec::linear(GradientDirection::Diagonal135, CssColor::WHITE, CssColor::rgb(20, 30, 60))),
    ];
    for &(w, h) in &[(800, 500), (1600, 1000)] {
        let Some(chart) = chart_bitmap(w, h) else { continue };
        for (name, bg) in &backgrounds {
            for format in [ExportFormat::Png, ExportFormat::Jpeg] {
                group.bench_function(format!("{name}_{format:?}_{w}x{h}"), |b| {
                    b.iter(|| -> Result<()> {
                        let pixels = composite(&chart, bg, &loader)?;
                        black_box(encode(&pixels, format, 0.92)?);
                        Ok(())
                    });
                });
            }
        }
    }
    group.finish();
}

criterion_group!(benches, bench_export);
criterion_main!(benches);
