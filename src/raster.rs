use image::{DynamicImage, GenericImageView, RgbaImage, imageops::FilterType};
use tracing::debug;

use crate::error::PaletteError;
use crate::formatter::ExtractedColor;
use crate::options::PaletteOptions;

/// Down-scale so the longest side is at most `max_side`, keeping the aspect
/// ratio. Images already small enough are only converted to RGBA.
pub fn prepare_image(img: &DynamicImage, max_side: u32) -> RgbaImage {
    let (orig_w, orig_h) = img.dimensions();
    let longest = orig_w.max(orig_h);
    let max_side = max_side.max(1);

    if longest <= max_side {
        return img.to_rgba8();
    }

    let ratio = max_side as f64 / longest as f64;
    let w = ((orig_w as f64) * ratio).round().clamp(1.0, max_side as f64) as u32;
    let h = ((orig_h as f64) * ratio).round().clamp(1.0, max_side as f64) as u32;
    debug!(orig_w, orig_h, w, h, "downscaling before sampling");

    image::imageops::resize(img, w, h, FilterType::Triangle)
}

/// Decode an encoded image (PNG, JPEG, ...), reduce it to the working
/// resolution and extract its palette.
pub fn extract_palette_bytes(
    input: &[u8],
    options: &PaletteOptions,
) -> Result<Vec<ExtractedColor>, PaletteError> {
    options.validate()?;
    let img = image::load_from_memory(input)?;
    let working = prepare_image(&img, options.max_side);
    let (w, h) = working.dimensions();
    crate::extract_palette(working.as_raw(), w, h, options)
}

/// Index of the palette entry closest to `(r, g, b)` in plain RGB.
pub fn nearest_color(palette: &[ExtractedColor], r: u8, g: u8, b: u8) -> Option<usize> {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let mut best = None;
    let mut best_dist = i32::MAX;
    for (idx, c) in palette.iter().enumerate() {
        let dr = r - c.rgb.red as i32;
        let dg = g - c.rgb.green as i32;
        let db = b - c.rgb.blue as i32;
        let d = dr * dr + dg * dg + db * db;
        if d < best_dist {
            best_dist = d;
            best = Some(idx);
        }
    }
    best
}

/// Re-color every visible pixel with its nearest palette entry.
///
/// Alpha is carried over and fully transparent pixels are left untouched.
pub fn render_preview(img: &RgbaImage, palette: &[ExtractedColor]) -> RgbaImage {
    let mut out = img.clone();
    if palette.is_empty() {
        return out;
    }

    for px in out.pixels_mut() {
        let [r, g, b, a] = px.0;
        if a == 0 {
            continue;
        }
        if let Some(idx) = nearest_color(palette, r, g, b) {
            let [nr, ng, nb] = palette[idx].channels();
            px.0 = [nr, ng, nb, a];
        }
    }
    out
}
