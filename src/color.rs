use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Srgb, Srgba, WithAlpha};

// ---------------------------------------------------------------------------
// Styles resolved from configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, thiserror::Error)]
pub enum ColorError {
    #[error("{0:?} is not a hex colour")]
    InvalidHex(String),
    #[error("alpha {0} is outside 0.0..=1.0")]
    InvalidAlpha(f32),
}

/// Fill and outline of one area series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaStyle {
    pub fill: Srgba<u8>,
    pub stroke: Srgba<u8>,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Srgba<u8>,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Srgba<u8>,
    pub size: f32,
}

/// Parse `#rrggbb` / `#rgb` and attach an opacity in `0.0..=1.0`.
pub fn parse_color(hex: &str, alpha: f32) -> Result<Srgba<u8>, ColorError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ColorError::InvalidAlpha(alpha));
    }
    let rgb = Srgb::<u8>::from_str(hex.trim()).map_err(|_| ColorError::InvalidHex(hex.to_string()))?;
    Ok(rgb.with_alpha((alpha * 255.0).round() as u8))
}

// ---------------------------------------------------------------------------
// Conversions for the rendering surfaces
// ---------------------------------------------------------------------------

pub fn to_color32(c: Srgba<u8>) -> Color32 {
    Color32::from_rgba_unmultiplied(c.red, c.green, c.blue, c.alpha)
}

/// `#rrggbb` plus opacity, as SVG wants them.
pub fn to_svg(c: Srgba<u8>) -> (String, f32) {
    (
        format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue),
        c.alpha as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_alpha() {
        let c = parse_color("#ea961a", 0.8).unwrap();
        assert_eq!((c.red, c.green, c.blue, c.alpha), (234, 150, 26, 204));
    }

    #[test]
    fn short_hex_is_accepted() {
        let c = parse_color("#bbb", 1.0).unwrap();
        assert_eq!((c.red, c.green, c.blue, c.alpha), (187, 187, 187, 255));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse_color("orange", 1.0), Err(ColorError::InvalidHex(_))));
        assert!(matches!(parse_color("#000000", 1.5), Err(ColorError::InvalidAlpha(_))));
    }

    #[test]
    fn svg_colour_round_trips_channels() {
        let (hex, opacity) = to_svg(parse_color("#5b5bdc", 1.0).unwrap());
        assert_eq!(hex, "#5b5bdc");
        assert_eq!(opacity, 1.0);
    }
}
