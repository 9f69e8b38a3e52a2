// File: crates/chart-overlay/src/color.rs
// Summary: CSS-style color strings (#rgb, #rrggbb, #rrggbbaa, rgb()/rgba(), a few names) <-> Skia colors.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use skia_safe as skia;
use std::fmt;
use std::str::FromStr;

use crate::error::OverlayError;

/// A color as written in overlay configuration.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CssColor(pub skia::Color);

impl CssColor {
    pub const WHITE: CssColor = CssColor(skia::Color::WHITE);
    pub const BLACK: CssColor = CssColor(skia::Color::BLACK);
    pub const TRANSPARENT: CssColor = CssColor(skia::Color::TRANSPARENT);

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        CssColor(skia::Color::from_argb(255, r, g, b))
    }

    pub fn color(self) -> skia::Color {
        self.0
    }

    /// Multiply the alpha channel by `opacity` (clamped to 0..=1).
    pub fn with_opacity(self, opacity: f32) -> skia::Color {
        let a = (self.0.a() as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        self.0.with_a(a)
    }
}

impl fmt::Debug for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CssColor({self})")
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        if c.a() == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", c.r(), c.g(), c.b(), c.a())
        }
    }
}

impl From<skia::Color> for CssColor {
    fn from(c: skia::Color) -> Self {
        CssColor(c)
    }
}

impl FromStr for CssColor {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_css_color(s).map(CssColor).ok_or_else(|| OverlayError::InvalidColor(s.to_string()))
    }
}

impl Serialize for CssColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CssColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn parse_css_color(input: &str) -> Option<skia::Color> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower.strip_prefix("rgba(").or_else(|| lower.strip_prefix("rgb(")) {
        return parse_rgb_args(args.strip_suffix(')')?);
    }
    let named = match lower.as_str() {
        "white" => skia::Color::WHITE,
        "black" => skia::Color::BLACK,
        "transparent" => skia::Color::TRANSPARENT,
        "red" => skia::Color::from_rgb(255, 0, 0),
        "green" => skia::Color::from_rgb(0, 128, 0),
        "blue" => skia::Color::from_rgb(0, 0, 255),
        "gray" | "grey" => skia::Color::from_rgb(128, 128, 128),
        "yellow" => skia::Color::from_rgb(255, 255, 0),
        "orange" => skia::Color::from_rgb(255, 165, 0),
        _ => return None,
    };
    Some(named)
}

fn parse_hex(hex: &str) -> Option<skia::Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(skia::Color::from_argb(255, nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(skia::Color::from_argb(nibble(3)?, nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(skia::Color::from_argb(255, byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(skia::Color::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<skia::Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let channel = |s: &str| s.parse::<f32>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    match parts.as_slice() {
        [r, g, b] => Some(skia::Color::from_argb(255, channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let alpha = a.parse::<f32>().ok()?.clamp(0.0, 1.0);
            Some(skia::Color::from_argb(
                (alpha * 255.0).round() as u8,
                channel(r)?,
                channel(g)?,
                channel(b)?,
            ))
        }
        _ => None,
    }
}
