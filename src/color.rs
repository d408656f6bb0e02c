use std::str::FromStr;

use palette::{FromColor, Hsl, Srgb};
use serde::Deserialize;

/// Color of a light as reported by the LIFX cloud API.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LightColor {
    /// Hue in degrees (0 - 360)
    pub hue: f32,

    /// Saturation (0.0 - 1.0)
    pub saturation: f32,

    pub kelvin: Option<u32>,

    /// Some devices report an already computed hex value
    pub hex: Option<String>,
}

/// Decodes a `#rrggbb` (or `rrggbb`) string. Anything other than exactly six
/// hex digits after the optional `#` is rejected.
pub fn hex_to_rgb(hex: &str) -> Option<Srgb<u8>> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    Srgb::<u8>::from_str(digits).ok()
}

pub fn rgb_to_hex(rgb: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

/// The cloud API takes hex colors as-is, as long as they carry a leading `#`.
pub fn hex_to_cloud_color(hex: &str) -> String {
    if hex.starts_with('#') {
        hex.to_string()
    } else {
        format!("#{hex}")
    }
}

/// Hue/saturation to hex at a fixed lightness of 0.5.
pub fn hue_sat_to_hex(hue: f32, saturation: f32) -> String {
    let hsl: Hsl = Hsl::new(hue, saturation.clamp(0.0, 1.0), 0.5);
    let rgb: Srgb<u8> = Srgb::from_color(hsl).into_format();

    rgb_to_hex(rgb)
}

/// Hex used to render a light's current color. Lights without any reported
/// color show up as white.
pub fn display_hex(color: Option<&LightColor>) -> String {
    match color {
        Some(LightColor { hex: Some(hex), .. }) if !hex.is_empty() => hex.clone(),
        Some(color) => hue_sat_to_hex(color.hue, color.saturation),
        None => "#ffffff".to_string(),
    }
}
