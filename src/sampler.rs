use palette::Srgb;
use tracing::trace;

/// Distance between consecutive sampled pixels for a buffer of `total` pixels.
#[inline]
pub fn stride_for(total: usize, max_samples: usize) -> usize {
    (total / max_samples.max(1)).max(1)
}

/// Pull a bounded, evenly strided set of RGB samples out of an RGBA buffer.
///
/// Pixels are visited in scan order at a fixed stride and the alpha channel is
/// ignored. The floor stride can leave a few more candidates than
/// `max_samples`, so the result is also cut off at the cap. A trailing partial
/// pixel is ignored.
pub fn sample_pixels(rgba: &[u8], max_samples: usize) -> Vec<Srgb<u8>> {
    let total = rgba.len() / 4;
    let cap = max_samples.max(1);
    let step = stride_for(total, cap);

    let samples: Vec<Srgb<u8>> = rgba
        .chunks_exact(4)
        .step_by(step)
        .take(cap)
        .map(|px| Srgb::new(px[0], px[1], px[2]))
        .collect();

    trace!(total, step, sampled = samples.len(), "sampled pixels");
    samples
}
