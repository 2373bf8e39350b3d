use js_sys::{Array, Object, Reflect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use wasm_bindgen::prelude::*;

pub mod distance;
pub mod error;
pub mod formatter;
pub mod init;
pub mod kmeans;
pub mod options;
pub mod raster;
pub mod sampler;

pub use distance::Centroid;
pub use error::PaletteError;
pub use formatter::{ExtractedColor, format_palette, parse_hex};
pub use kmeans::EmptyClusterPolicy;
pub use options::PaletteOptions;
pub use raster::{extract_palette_bytes, prepare_image, render_preview};

// ------------------------------------------------------------
// Pipeline
// ------------------------------------------------------------

/// Extract `options.colors` dominant colors from an RGBA buffer.
///
/// Steps performed:
/// 1. Sample at most `options.max_samples` pixels at a fixed stride.
/// 2. Seed centroids with a bounded farthest-point heuristic.
/// 3. Run a fixed number of Lloyd iterations in raw RGB.
/// 4. Round the centroids to `#rrggbb` entries, in cluster order.
///
/// The caller is expected to have reduced the image to a working resolution
/// already (see [`prepare_image`]). Degenerate input such as a blank buffer
/// produces a gray palette instead of an error.
pub fn extract_palette(
    rgba: &[u8],
    width: u32,
    height: u32,
    options: &PaletteOptions,
) -> Result<Vec<ExtractedColor>, PaletteError> {
    match options.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            extract_palette_with_rng(rgba, width, height, options, &mut rng)
        }
        None => extract_palette_with_rng(rgba, width, height, options, &mut rand::rng()),
    }
}

/// Same as [`extract_palette`] but draws randomness from `rng`, ignoring
/// `options.seed`.
pub fn extract_palette_with_rng<R: Rng>(
    rgba: &[u8],
    width: u32,
    height: u32,
    options: &PaletteOptions,
    rng: &mut R,
) -> Result<Vec<ExtractedColor>, PaletteError> {
    options.validate()?;
    if width == 0 || height == 0 {
        return Err(PaletteError::ZeroDimension);
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4));
    if expected != Some(rgba.len()) {
        return Err(PaletteError::DimensionMismatch {
            len: rgba.len(),
            width,
            height,
        });
    }

    let samples = sampler::sample_pixels(rgba, options.max_samples);
    let seeds = init::initialize_centroids(&samples, options.colors, rng);
    let centroids = kmeans::cluster(&samples, &seeds, options.iterations, options.empty_cluster);
    let palette = format_palette(&centroids);

    debug!(
        width,
        height,
        samples = samples.len(),
        colors = palette.len(),
        "palette extracted"
    );
    Ok(palette)
}

// ------------------------------------------------------------
// Browser entry points
// ------------------------------------------------------------

fn palette_to_js(palette: &[ExtractedColor]) -> Result<Array, JsValue> {
    let out = Array::new();
    for color in palette {
        let rgb = Array::new();
        for ch in color.channels() {
            rgb.push(&JsValue::from(ch));
        }
        let entry = Object::new();
        Reflect::set(&entry, &JsValue::from_str("hex"), &JsValue::from_str(&color.hex))?;
        Reflect::set(&entry, &JsValue::from_str("rgb"), &rgb)?;
        out.push(&entry);
    }
    Ok(out)
}

fn js_error(e: PaletteError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Decode an encoded image, shrink it to 600px on the longest side and
/// return `[{ hex, rgb: [r, g, b] }, ...]`.
#[wasm_bindgen(js_name = extractPalette)]
pub fn extract_palette_js(
    input: Vec<u8>,
    n_colors: usize,
    max_samples: Option<usize>,
    iterations: Option<usize>,
) -> Result<Array, JsValue> {
    let defaults = PaletteOptions::default();
    let options = PaletteOptions {
        colors: n_colors,
        max_samples: max_samples.unwrap_or(defaults.max_samples),
        iterations: iterations.unwrap_or(defaults.iterations),
        ..defaults
    };
    let palette = extract_palette_bytes(&input, &options).map_err(js_error)?;
    palette_to_js(&palette)
}

/// Palette of a canvas `ImageData` buffer the caller already scaled down.
#[wasm_bindgen(js_name = extractPaletteRgba)]
pub fn extract_palette_rgba_js(
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    n_colors: usize,
) -> Result<Array, JsValue> {
    let options = PaletteOptions::default().with_colors(n_colors);
    let palette = extract_palette(&pixels, width, height, &options).map_err(js_error)?;
    palette_to_js(&palette)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer() {
        let err = extract_palette(&[0; 12], 2, 2, &PaletteOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            PaletteError::DimensionMismatch { len: 12, width: 2, height: 2 }
        ));
    }

    #[test]
    fn oversized_dimensions_do_not_overflow() {
        let opts = PaletteOptions::default();
        let err = extract_palette(&[0; 4], u32::MAX, u32::MAX, &opts).unwrap_err();
        assert!(matches!(err, PaletteError::DimensionMismatch { len: 4, .. }));

        // 32768 x 32768 x 4 wraps to zero in 32-bit arithmetic.
        let err = extract_palette(&[], 32_768, 32_768, &opts).unwrap_err();
        assert!(matches!(err, PaletteError::DimensionMismatch { len: 0, .. }));
    }

    #[test]
    fn rejects_zero_dimension() {
        let err = extract_palette(&[], 0, 3, &PaletteOptions::default()).unwrap_err();
        assert!(matches!(err, PaletteError::ZeroDimension));
    }

    #[test]
    fn invalid_options_fail_before_sampling() {
        let opts = PaletteOptions::default().with_colors(0);
        let err = extract_palette(&[0; 4], 1, 1, &opts).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidColorCount));
    }

    #[test]
    fn seeded_runs_repeat() {
        let raw: Vec<u8> = (0..64 * 64 * 4).map(|i: u32| (i * 31 % 256) as u8).collect();
        let opts = PaletteOptions::default().with_seed(2024);
        let a = extract_palette(&raw, 64, 64, &opts).unwrap();
        let b = extract_palette(&raw, 64, 64, &opts).unwrap();
        assert_eq!(a, b);
    }
}
