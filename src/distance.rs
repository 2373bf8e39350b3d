use palette::Srgb;

/// Floating-point RGB point on the 0..=255 scale; the running mean of a cluster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Centroid {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Centroid {
    /// Neutral fallback used for degenerate input and empty clusters.
    pub const GRAY: Centroid = Centroid::new(128.0, 128.0, 128.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl From<Srgb<u8>> for Centroid {
    fn from(c: Srgb<u8>) -> Self {
        Self::new(c.red as f64, c.green as f64, c.blue as f64)
    }
}

impl From<&Srgb<u8>> for Centroid {
    fn from(c: &Srgb<u8>) -> Self {
        Self::from(*c)
    }
}

#[inline]
pub fn distance_squared(a: &Centroid, b: &Centroid) -> f64 {
    let dr = a.r - b.r;
    let dg = a.g - b.g;
    let db = a.b - b.b;
    dr * dr + dg * dg + db * db
}

/// Euclidean distance in raw RGB.
#[inline]
pub fn distance(a: &Centroid, b: &Centroid) -> f64 {
    distance_squared(a, b).sqrt()
}
