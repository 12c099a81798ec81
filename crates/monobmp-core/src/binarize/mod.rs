//! Reduction of grayscale images to 1-bit bitmaps.
//!
//! Two interchangeable policies are available through [`BinarizePolicy`]:
//! error-diffusion dithering, which approximates mid-tones with patterns,
//! and a hard luma threshold, which keeps line art crisp.

mod bitmap;
mod dither;
mod threshold;

use image::GrayImage;
use serde::{Deserialize, Serialize};

pub use bitmap::MonoBitmap;
pub use dither::floyd_steinberg;
pub use threshold::{threshold, DEFAULT_THRESHOLD};

/// How grayscale pixels become black or white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BinarizePolicy {
    /// Floyd-Steinberg error diffusion.
    #[default]
    Dither,
    /// White iff luma is strictly greater than `level`.
    Threshold {
        #[serde(default = "default_level")]
        level: u8,
    },
}

fn default_level() -> u8 {
    DEFAULT_THRESHOLD
}

impl BinarizePolicy {
    /// Threshold policy with the given cutoff.
    pub fn threshold(level: u8) -> Self {
        BinarizePolicy::Threshold { level }
    }
}

impl std::fmt::Display for BinarizePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinarizePolicy::Dither => write!(f, "dither"),
            BinarizePolicy::Threshold { level } => write!(f, "threshold({level})"),
        }
    }
}

/// Apply a binarization policy.
pub fn binarize(gray: &GrayImage, policy: BinarizePolicy) -> MonoBitmap {
    match policy {
        BinarizePolicy::Dither => floyd_steinberg(gray),
        BinarizePolicy::Threshold { level } => threshold(gray, level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_dither() {
        assert_eq!(BinarizePolicy::default(), BinarizePolicy::Dither);
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(BinarizePolicy::Dither.to_string(), "dither");
        assert_eq!(BinarizePolicy::threshold(150).to_string(), "threshold(150)");
    }

    #[test]
    fn test_policies_differ_on_mid_gray() {
        let img = GrayImage::from_pixel(16, 16, image::Luma([128]));

        let dithered = binarize(&img, BinarizePolicy::Dither);
        let thresholded = binarize(&img, BinarizePolicy::threshold(128));

        assert!(dithered.count_white() > 0);
        assert_eq!(thresholded.count_white(), 0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for a small grayscale image with arbitrary content.
    fn gray_strategy() -> impl Strategy<Value = GrayImage> {
        (1u32..=24, 1u32..=24).prop_flat_map(|(w, h)| {
            let size = (w * h) as usize;
            prop::collection::vec(any::<u8>(), size..=size).prop_map(move |data| {
                GrayImage::from_raw(w, h, data).expect("buffer sized to dimensions")
            })
        })
    }

    fn policy_strategy() -> impl Strategy<Value = BinarizePolicy> {
        prop_oneof![
            Just(BinarizePolicy::Dither),
            any::<u8>().prop_map(BinarizePolicy::threshold),
        ]
    }

    proptest! {
        /// Property: output dimensions always match the input.
        #[test]
        fn prop_dimensions_preserved(img in gray_strategy(), policy in policy_strategy()) {
            let bitmap = binarize(&img, policy);
            prop_assert_eq!(bitmap.dimensions(), img.dimensions());
        }

        /// Property: the same input and policy always give the same bitmap.
        #[test]
        fn prop_deterministic(img in gray_strategy(), policy in policy_strategy()) {
            prop_assert_eq!(binarize(&img, policy), binarize(&img, policy));
        }

        /// Property: threshold output matches the per-pixel comparison.
        #[test]
        fn prop_threshold_is_pointwise(img in gray_strategy(), level in any::<u8>()) {
            let bitmap = threshold(&img, level);
            for (x, y, px) in img.enumerate_pixels() {
                prop_assert_eq!(bitmap.get(x, y), px.0[0] > level);
            }
        }

        /// Property: raising the threshold never turns a black pixel white.
        #[test]
        fn prop_threshold_monotonic(img in gray_strategy(), a in any::<u8>(), b in any::<u8>()) {
            let (low, high) = (a.min(b), a.max(b));
            prop_assert!(threshold(&img, high).count_white() <= threshold(&img, low).count_white());
        }

        /// Property: dithering a solid black or white image never adds noise.
        #[test]
        fn prop_dither_solid_extremes(w in 1u32..=32, h in 1u32..=32, white in any::<bool>()) {
            let value = if white { 255 } else { 0 };
            let img = GrayImage::from_pixel(w, h, image::Luma([value]));
            let expected = if white { (w * h) as usize } else { 0 };
            prop_assert_eq!(floyd_steinberg(&img).count_white(), expected);
        }
    }
}
