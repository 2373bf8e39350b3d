use palette::Srgb;

use crate::distance::Centroid;
use crate::error::PaletteError;

/// A palette entry as handed back to callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedColor {
    /// Lowercase `#rrggbb`.
    pub hex: String,
    pub rgb: Srgb<u8>,
}

impl ExtractedColor {
    pub fn from_rgb(rgb: Srgb<u8>) -> Self {
        Self {
            hex: format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue),
            rgb,
        }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.rgb.red, self.rgb.green, self.rgb.blue]
    }
}

#[inline]
fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

pub fn format_centroid(c: &Centroid) -> ExtractedColor {
    ExtractedColor::from_rgb(Srgb::new(to_channel(c.r), to_channel(c.g), to_channel(c.b)))
}

/// One entry per centroid, in cluster order.
pub fn format_palette(centroids: &[Centroid]) -> Vec<ExtractedColor> {
    centroids.iter().map(format_centroid).collect()
}

/// Parse `#rrggbb` or `rrggbb` (either case).
pub fn parse_hex(s: &str) -> Result<Srgb<u8>, PaletteError> {
    let invalid = || PaletteError::InvalidHex(s.to_string());
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
    let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
    Ok(Srgb::new(r, g, b))
}
