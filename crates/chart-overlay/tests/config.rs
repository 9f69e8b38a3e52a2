// File: crates/chart-overlay/tests/config.rs
// Purpose: JSON configuration parsing, color strings and fit-policy math.

use chart_overlay::fit::fit_rect;
use chart_overlay::{
    AnchorKind, Annotation, BackgroundType, ClipShape, CssColor, ExportFormat, FitPolicy, GradientDirection,
    LabelBackground, OverlayConfig, OverlayError, Rect, SlotKey,
};

const SAMPLE: &str = r##"{
  "annotations": [
    { "series": 0, "index": 2,
      "annotation": { "type": "image", "source": "badge.png", "shape": "rounded-rect", "size": 32,
                      "anchor": { "kind": "above" }, "fit": "scale-down",
                      "border": { "width": 2, "color": "#333" } } },
    { "series": 1, "index": 0,
      "annotation": { "type": "label", "text": "Record", "background": "star", "color": "rgb(255, 0, 0)",
                      "anchor": { "kind": "callout" }, "show_arrow": true } }
  ],
  "export": {
    "file_name_prefix": "q3",
    "format": "jpg",
    "quality": 0.8,
    "background": { "type": "gradient", "direction": "135deg", "color_stops": ["#000", "#fff"] }
  }
}"##;

#[test]
fn parses_annotations_and_export_defaults() {
    let config = OverlayConfig::from_json_str(SAMPLE).expect("valid config");
    assert_eq!(config.annotations.len(), 2);

    let Some(Annotation::Image(img)) = config.annotation(SlotKey::new(0, 2)) else {
        panic!("expected image annotation");
    };
    assert_eq!(img.shape, ClipShape::Rounded);
    assert_eq!(img.fit, FitPolicy::ScaleDown);
    assert_eq!(img.anchor.kind, AnchorKind::Top);
    assert_eq!(img.size, 32.0);
    assert_eq!(img.border.map(|b| b.color), Some(CssColor::rgb(0x33, 0x33, 0x33)));

    let Some(Annotation::Label(label)) = config.annotation(SlotKey::new(1, 0)) else {
        panic!("expected label annotation");
    };
    assert_eq!(label.background, LabelBackground::Star);
    assert_eq!(label.color, CssColor::rgb(255, 0, 0));
    assert!(label.anchor.is_callout());
    assert_eq!(label.padding, 6.0);

    assert_eq!(config.export.file_name_prefix, "q3");
    assert_eq!(config.export.format, ExportFormat::Jpeg);
    assert_eq!(config.export.background.kind, BackgroundType::Gradient);
    assert_eq!(config.export.background.direction, GradientDirection::Diagonal135);
    assert_eq!(config.export.output_dir, std::path::PathBuf::from("exports"));
}

#[test]
fn accepts_camel_case_position_keys() {
    let json = r#"{ "annotations": [ { "series": 0, "index": 1,
        "annotation": { "type": "image", "source": "a.png", "fillRegion": true,
                        "anchor": { "absoluteX": 12.5, "absoluteY": 40 } } } ] }"#;
    let config = OverlayConfig::from_json_str(json).expect("valid config");
    let Some(Annotation::Image(img)) = config.annotation(SlotKey::new(0, 1)) else {
        panic!("expected image annotation");
    };
    assert!(img.fill_region);
    assert_eq!(img.anchor.absolute_x, Some(12.5));
    assert_eq!(img.anchor.absolute_y, Some(40.0));
}

#[test]
fn empty_object_yields_defaults() {
    let config = OverlayConfig::from_json_str("{}").expect("defaults");
    assert!(config.annotations.is_empty());
    assert_eq!(config.export.quality, 0.92);
    assert_eq!(config.export.format, ExportFormat::Png);
    assert_eq!(config.export.background.kind, BackgroundType::Transparent);
}

#[test]
fn invalid_color_is_a_config_error() {
    let json = r##"{ "annotations": [ { "series": 0, "index": 0,
        "annotation": { "type": "label", "text": "x", "color": "#12" } } ] }""##;
    let err = OverlayConfig::from_json_str(json).expect_err("bad color");
    assert!(matches!(err, OverlayError::Config(_)), "got {err:?}");
}

#[test]
fn annotate_replaces_existing_slot() {
    let mut config = OverlayConfig::from_json_str(SAMPLE).expect("valid config");
    let before = config.annotations.len();
    config.annotate(SlotKey::new(0, 2), Annotation::Label(Default::default()));
    assert_eq!(config.annotations.len(), before);
    assert!(matches!(config.annotation(SlotKey::new(0, 2)), Some(Annotation::Label(_))));

    let json = config.to_json_pretty().expect("serialize");
    let back = OverlayConfig::from_json_str(&json).expect("reparse");
    assert_eq!(back, config);
}

#[test]
fn load_resolves_asset_root_next_to_the_file() {
    let dir = std::path::PathBuf::from("target/test_out/config");
    std::fs::create_dir_all(&dir).expect("create dir");
    let path = dir.join("overlay.json");
    std::fs::write(&path, r#"{ "asset_root": "assets" }"#).expect("write config");
    let config = OverlayConfig::load(&path).expect("load");
    assert_eq!(config.asset_root, Some(dir.join("assets")));
}

#[test]
fn css_color_forms() {
    let parse = |s: &str| s.parse::<CssColor>().map(|c| c.to_string());
    assert_eq!(parse("#fff").ok().as_deref(), Some("#ffffff"));
    assert_eq!(parse("#11223380").ok().as_deref(), Some("#11223380"));
    assert_eq!(parse("rgba(0, 0, 255, 0.5)").ok().as_deref(), Some("#0000ff80"));
    assert_eq!(parse(" White ").ok().as_deref(), Some("#ffffff"));
    assert!(matches!("chartreuse-ish".parse::<CssColor>(), Err(OverlayError::InvalidColor(_))));
    assert!("#ggg".parse::<CssColor>().is_err());
}

#[test]
fn fit_policies_place_image_in_region() {
    let region = Rect::from_ltwh(0.0, 0.0, 100.0, 50.0);
    // 1:1 image into a 2:1 region
    assert_eq!(fit_rect(20.0, 20.0, region, FitPolicy::Stretch), region);
    assert_eq!(fit_rect(20.0, 20.0, region, FitPolicy::Cover), Rect::from_ltrb(0.0, -25.0, 100.0, 75.0));
    assert_eq!(fit_rect(20.0, 20.0, region, FitPolicy::Contain), Rect::from_ltrb(25.0, 0.0, 75.0, 50.0));
    assert_eq!(fit_rect(20.0, 20.0, region, FitPolicy::None), Rect::from_ltrb(40.0, 15.0, 60.0, 35.0));
    assert_eq!(fit_rect(20.0, 20.0, region, FitPolicy::ScaleDown), Rect::from_ltrb(40.0, 15.0, 60.0, 35.0));
    // degenerate image falls back to the region
    assert_eq!(fit_rect(0.0, 20.0, region, FitPolicy::Cover), region);
}
