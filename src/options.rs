use crate::error::PaletteError;
use crate::kmeans::EmptyClusterPolicy;

pub const DEFAULT_COLORS: usize = 5;
pub const DEFAULT_MAX_SAMPLES: usize = 12_000;
pub const DEFAULT_ITERATIONS: usize = 10;
/// Longest side, in pixels, an image is reduced to before sampling.
pub const DEFAULT_MAX_SIDE: u32 = 600;

/// Knobs for a single palette extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteOptions {
    /// Number of palette entries (K).
    pub colors: usize,
    /// Upper bound on the number of sampled pixels.
    pub max_samples: usize,
    /// Fixed number of Lloyd iterations. Zero returns the seeded centroids.
    pub iterations: usize,
    /// Working resolution used by the decode helpers.
    pub max_side: u32,
    pub empty_cluster: EmptyClusterPolicy,
    /// Pins the random source; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS,
            max_samples: DEFAULT_MAX_SAMPLES,
            iterations: DEFAULT_ITERATIONS,
            max_side: DEFAULT_MAX_SIDE,
            empty_cluster: EmptyClusterPolicy::default(),
            seed: None,
        }
    }
}

impl PaletteOptions {
    pub fn with_colors(mut self, colors: usize) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.colors == 0 {
            return Err(PaletteError::InvalidColorCount);
        }
        if self.max_samples == 0 {
            return Err(PaletteError::InvalidSampleCap);
        }
        if self.max_side == 0 {
            return Err(PaletteError::InvalidMaxSide);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let opts = PaletteOptions::default();
        assert_eq!(opts.colors, 5);
        assert_eq!(opts.max_samples, 12_000);
        assert_eq!(opts.iterations, 10);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn rejects_zero_colors_and_cap() {
        let opts = PaletteOptions::default().with_colors(0);
        assert!(matches!(opts.validate(), Err(PaletteError::InvalidColorCount)));

        let opts = PaletteOptions {
            max_samples: 0,
            ..Default::default()
        };
        assert!(matches!(opts.validate(), Err(PaletteError::InvalidSampleCap)));

        let opts = PaletteOptions {
            max_side: 0,
            ..Default::default()
        };
        assert!(matches!(opts.validate(), Err(PaletteError::InvalidMaxSide)));
    }

    #[test]
    fn zero_iterations_is_allowed() {
        let opts = PaletteOptions {
            iterations: 0,
            ..Default::default()
        };
        assert!(opts.validate().is_ok());
    }
}
