// File: crates/chart-overlay/tests/anchors.rs
// Purpose: Geometry resolver: per-family anchors, centroid placement, absolute and override precedence.

use chart_overlay::geometry::centroid_radius;
use chart_overlay::{
    resolve, resolve_with_override, source_point, AnchorKind, AnchorSpec, ChartFamily, ChartFrame, ElementGeometry, Point,
    Rect, SlotKey,
};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

const VBAR: ChartFamily = ChartFamily::Bar { horizontal: false };
const HBAR: ChartFamily = ChartFamily::Bar { horizontal: true };

fn area() -> Rect {
    Rect::from_ltwh(0.0, 0.0, 400.0, 400.0)
}

fn assert_point(got: Point, x: f32, y: f32) {
    assert!((got.x - x).abs() < 1e-2 && (got.y - y).abs() < 1e-2, "got {got:?}, want ({x}, {y})");
}

fn vbar(y: f32, base: f32) -> ElementGeometry {
    ElementGeometry::Bar { x: 100.0, y, base, thickness: Some(30.0), horizontal: false }
}

fn at(kind: AnchorKind) -> AnchorSpec {
    AnchorSpec::new(kind)
}

#[test]
fn pie_center_uses_area_centroid() {
    let sector = ElementGeometry::Sector { start_angle: 0.0, end_angle: FRAC_PI_2, inner_radius: 0.0, outer_radius: 100.0 };
    let p = resolve(ChartFamily::Pie, &sector, &area(), &at(AnchorKind::Center), 40.0);
    let r = 200.0 / 3.0;
    assert_point(p, 200.0 + FRAC_PI_4.cos() * r, 200.0 + FRAC_PI_4.sin() * r);
}

#[test]
fn vertical_bar_center_is_midway_between_edges() {
    let p = resolve(VBAR, &vbar(50.0, 200.0), &area(), &at(AnchorKind::Center), 40.0);
    assert_point(p, 100.0, 125.0);
}

#[test]
fn horizontal_bar_center_is_midway_between_edges() {
    let bar = ElementGeometry::Bar { x: 300.0, y: 80.0, base: 50.0, thickness: None, horizontal: true };
    let p = resolve(HBAR, &bar, &area(), &at(AnchorKind::Center), 40.0);
    assert_point(p, 175.0, 80.0);
}

#[test]
fn bar_edges_follow_bar_direction() {
    // positive bar grows upward (smaller pixel y)
    let up = vbar(50.0, 200.0);
    assert_point(resolve(VBAR, &up, &area(), &at(AnchorKind::Top), 0.0), 100.0, 40.0);
    assert_point(resolve(VBAR, &up, &area(), &at(AnchorKind::Bottom), 0.0), 100.0, 190.0);
    // negative bar grows downward
    let down = vbar(260.0, 200.0);
    assert_point(resolve(VBAR, &down, &area(), &at(AnchorKind::Top), 0.0), 100.0, 270.0);
    // sides clear the bar half-thickness plus the margin
    assert_point(resolve(VBAR, &up, &area(), &at(AnchorKind::Left), 0.0), 75.0, 125.0);
    assert_point(resolve(VBAR, &up, &area(), &at(AnchorKind::Right), 0.0), 125.0, 125.0);
}

#[test]
fn horizontal_bar_edges() {
    let bar = ElementGeometry::Bar { x: 300.0, y: 80.0, base: 50.0, thickness: None, horizontal: true };
    assert_point(resolve(HBAR, &bar, &area(), &at(AnchorKind::Top), 0.0), 310.0, 80.0);
    assert_point(resolve(HBAR, &bar, &area(), &at(AnchorKind::Left), 0.0), 40.0, 80.0);
    assert_point(resolve(HBAR, &bar, &area(), &at(AnchorKind::Right), 0.0), 310.0, 80.0);
}

#[test]
fn point_anchors_offset_by_margin() {
    let pt = ElementGeometry::Point { x: 120.0, y: 90.0, radius: 3.0 };
    assert_point(resolve(ChartFamily::Line, &pt, &area(), &at(AnchorKind::Center), 20.0), 120.0, 90.0);
    assert_point(resolve(ChartFamily::Scatter, &pt, &area(), &at(AnchorKind::Top), 20.0), 120.0, 75.0);
    assert_point(resolve(ChartFamily::Bubble, &pt, &area(), &at(AnchorKind::Bottom), 20.0), 120.0, 105.0);
    assert_point(resolve(ChartFamily::Radar, &pt, &area(), &at(AnchorKind::Left), 20.0), 105.0, 90.0);
}

#[test]
fn sector_outside_sits_past_outer_radius() {
    let sector = ElementGeometry::Sector { start_angle: -FRAC_PI_2, end_angle: -FRAC_PI_2, inner_radius: 40.0, outer_radius: 100.0 };
    let p = resolve(ChartFamily::Doughnut, &sector, &area(), &at(AnchorKind::Top), 20.0);
    assert_point(p, 200.0, 200.0 - 115.0);
}

#[test]
fn centroid_lies_between_midpoint_and_outer_edge() {
    for (r, big_r) in [(0.0, 100.0), (40.0, 100.0), (90.0, 100.0), (10.0, 250.0)] {
        let c = centroid_radius(r, big_r);
        assert!(c >= (r + big_r) * 0.5 - 1e-3, "centroid {c} below midpoint for ({r}, {big_r})");
        assert!(c <= big_r + 1e-3, "centroid {c} beyond outer edge for ({r}, {big_r})");
    }
    // zero-width ring degenerates to the outer radius
    assert_eq!(centroid_radius(100.0, 100.0), 100.0);
}

#[test]
fn centroid_stays_inside_thin_rings() {
    for big_r in [100.0f32, 150.0, 250.0, 500.0, 1000.0] {
        for gap in [0.001f32, 0.01, 0.1, 0.5, 1.0] {
            let r = big_r - gap;
            let c = centroid_radius(r, big_r);
            assert!(c >= r && c <= big_r, "centroid {c} outside ring ({r}, {big_r})");
        }
    }
    assert_eq!(centroid_radius(0.0, 0.0), 0.0);
}

#[test]
fn sector_bottom_sits_past_the_inner_edge() {
    let ring = ElementGeometry::Sector { start_angle: 0.0, end_angle: FRAC_PI_2, inner_radius: 40.0, outer_radius: 100.0 };
    let p = resolve(ChartFamily::Doughnut, &ring, &area(), &at(AnchorKind::Bottom), 20.0);
    let r = 40.0 + 15.0;
    assert_point(p, 200.0 + FRAC_PI_4.cos() * r, 200.0 + FRAC_PI_4.sin() * r);
}

#[test]
fn callout_default_offsets_up_and_right() {
    let p = resolve(VBAR, &vbar(50.0, 200.0), &area(), &at(AnchorKind::Callout), 20.0);
    assert_point(p, 130.0, 20.0);
}

#[test]
fn absolute_coordinates_override_computed_anchor() {
    let garbage = ElementGeometry::Point { x: f32::NAN, y: f32::INFINITY, radius: f32::NAN };
    let p = resolve(ChartFamily::Line, &garbage, &area(), &AnchorSpec::absolute(12.0, 34.0), 40.0);
    assert_point(p, 12.0, 34.0);

    let partial = AnchorSpec { kind: AnchorKind::Center, absolute_x: Some(10.0), absolute_y: None };
    let p = resolve(VBAR, &vbar(50.0, 200.0), &area(), &partial, 40.0);
    assert_point(p, 10.0, 125.0);
}

#[test]
fn family_mismatch_falls_back_to_source_point() {
    let pt = ElementGeometry::Point { x: 60.0, y: 70.0, radius: 2.0 };
    let p = resolve(ChartFamily::Pie, &pt, &area(), &at(AnchorKind::Top), 40.0);
    assert_point(p, 60.0, 70.0);
}

#[test]
fn non_finite_geometry_still_resolves_to_finite_point() {
    let sector = ElementGeometry::Sector { start_angle: f32::NAN, end_angle: PI, inner_radius: f32::NAN, outer_radius: 80.0 };
    let p = resolve(ChartFamily::PolarArea, &sector, &area(), &at(AnchorKind::Center), 40.0);
    assert!(p.is_finite());
    let bar = ElementGeometry::Bar { x: f32::NAN, y: 50.0, base: f32::NEG_INFINITY, thickness: Some(f32::NAN), horizontal: false };
    assert!(resolve(VBAR, &bar, &area(), &at(AnchorKind::Right), 40.0).is_finite());
}

#[test]
fn drag_override_only_moves_callouts() {
    let bar = vbar(50.0, 200.0);
    let dragged = Some(Point::new(300.0, 150.0));
    let callout = resolve_with_override(VBAR, &bar, &area(), &at(AnchorKind::Callout), 20.0, dragged);
    assert_point(callout, 300.0, 150.0);
    let fixed = resolve_with_override(VBAR, &bar, &area(), &at(AnchorKind::Center), 20.0, dragged);
    assert_point(fixed, 100.0, 125.0);
}

#[test]
fn source_point_of_sector_is_its_centroid() {
    let sector = ElementGeometry::Sector { start_angle: 0.0, end_angle: PI, inner_radius: 0.0, outer_radius: 90.0 };
    assert_point(source_point(&sector, &area()), 200.0, 260.0);
}

fn bars_without_thickness() -> ChartFrame {
    let mut frame = ChartFrame::new(VBAR, area());
    for (i, x) in [60.0f32, 120.0, 180.0].into_iter().enumerate() {
        frame.push(SlotKey::new(0, i), ElementGeometry::Bar { x, y: 50.0, base: 200.0, thickness: None, horizontal: false });
    }
    frame.push(SlotKey::new(1, 0), ElementGeometry::Bar { x: 300.0, y: 50.0, base: 200.0, thickness: None, horizontal: false });
    frame
}

fn assert_rect(got: Rect, l: f32, t: f32, r: f32, b: f32) {
    let ok = [(got.left, l), (got.top, t), (got.right, r), (got.bottom, b)].iter().all(|(g, w)| (g - w).abs() < 1e-2);
    assert!(ok, "got {got:?}, want ({l}, {t}, {r}, {b})");
}

#[test]
fn bar_thickness_is_inferred_from_neighbour_spacing() {
    let frame = bars_without_thickness();
    // 60 px spacing, 80% of it taken by the bar
    let region = frame.bar_region(SlotKey::new(0, 1)).expect("bar region");
    assert_rect(region, 96.0, 50.0, 144.0, 200.0);
    // a bar with no same-series neighbour keeps the default thickness
    let lone = frame.bar_region(SlotKey::new(1, 0)).expect("bar region");
    assert_rect(lone, 290.0, 50.0, 310.0, 200.0);
}

#[test]
fn side_anchors_agree_with_the_fill_region() {
    let frame = bars_without_thickness();
    let slot = SlotKey::new(0, 1);
    let element = frame.element(slot).expect("element");
    let geometry = frame.geometry(element);
    let region = frame.bar_region(slot).expect("bar region");
    let left = resolve(VBAR, &geometry, &frame.chart_area, &at(AnchorKind::Left), 0.0);
    let right = resolve(VBAR, &geometry, &frame.chart_area, &at(AnchorKind::Right), 0.0);
    assert_point(left, region.left - 10.0, 125.0);
    assert_point(right, region.right + 10.0, 125.0);
}
