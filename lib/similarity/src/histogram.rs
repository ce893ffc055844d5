//! Color histogram builder
//!
//! A coarse visual fingerprint independent of the embedding model: the image
//! is resampled to a fixed square, each RGB channel is bucketed into equal
//! bins, and the concatenated counts are normalized to sum to 1.0.

use image::imageops::{self, FilterType};
use image::RgbImage;
use pawmatch_core::Vector;

/// Default side length of the resampled image
pub const DEFAULT_HISTOGRAM_SIZE: u32 = 128;

/// Default number of bins per channel
pub const DEFAULT_HISTOGRAM_BINS: usize = 16;

/// Builds normalized per-channel color histograms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorHistogram {
    size: u32,
    bins: usize,
}

impl Default for ColorHistogram {
    fn default() -> Self {
        Self {
            size: DEFAULT_HISTOGRAM_SIZE,
            bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl ColorHistogram {
    /// `bins` must be non-zero; see [`MatchPolicy::validate`](crate::MatchPolicy::validate)
    pub fn new(size: u32, bins: usize) -> Self {
        Self { size, bins }
    }

    /// Length of the produced vector: `bins` per channel, three channels
    #[inline]
    pub fn len(&self) -> usize {
        self.bins * 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins == 0
    }

    /// Build the histogram of `image`
    ///
    /// The image is resized with `FilterType::Triangle`, which area-averages
    /// when downsampling rather than sampling the four nearest pixels like a
    /// pointwise bilinear resize, so bin counts of detailed images can differ
    /// slightly from such an implementation. Bin index is
    /// `floor(value / (256 / bins))`, clipped to the last bin. Entries are
    /// divided by the total count (not the L2 norm).
    pub fn build(&self, image: &RgbImage) -> Vector {
        let resized = imageops::resize(image, self.size, self.size, FilterType::Triangle);
        let bin_width = 256.0 / self.bins as f32;
        let last_bin = self.bins - 1;

        let mut counts = vec![0.0f32; self.len()];
        for pixel in resized.pixels() {
            for (channel, value) in pixel.0.iter().enumerate() {
                let bin = ((*value as f32 / bin_width).floor() as usize).min(last_bin);
                counts[channel * self.bins + bin] += 1.0;
            }
        }
        drop(resized);

        let mut histogram = Vector::new(counts);
        histogram.normalize_by_sum();
        histogram
    }
}
