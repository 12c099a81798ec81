//! Conversion settings and the stock presets.

use serde::{Deserialize, Serialize};

use crate::binarize::BinarizePolicy;
use crate::decode::FilterType;
use crate::luminance::Background;
use crate::scan::ExtensionFilter;

/// Width of the glasses' image area in pixels.
pub const DISPLAY_WIDTH: u32 = 136;

/// Height of the glasses' image area in pixels.
pub const DISPLAY_HEIGHT: u32 = 136;

/// Per-image conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Resampling filter.
    pub filter: FilterType,
    /// Alpha handling before grayscale conversion.
    pub background: Background,
    /// Rotate/flip according to EXIF orientation. Off by default: pixels are
    /// used in their stored order.
    pub apply_orientation: bool,
    /// Black/white decision.
    pub policy: BinarizePolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            filter: FilterType::Lanczos3,
            background: Background::Ignore,
            apply_orientation: false,
            policy: BinarizePolicy::Dither,
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: BinarizePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// The two stock conversion profiles.
///
/// `Dither` converts lower-case `.png` files with error diffusion.
/// `Threshold` converts PNG/JPEG/GIF in any letter case with a hard cutoff
/// of 150.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Dither,
    Threshold,
}

impl Preset {
    /// Cutoff used by the threshold preset.
    pub const THRESHOLD_LEVEL: u8 = 150;

    pub fn policy(self) -> BinarizePolicy {
        match self {
            Preset::Dither => BinarizePolicy::Dither,
            Preset::Threshold => BinarizePolicy::threshold(Self::THRESHOLD_LEVEL),
        }
    }

    pub fn extensions(self) -> ExtensionFilter {
        match self {
            Preset::Dither => ExtensionFilter::png_only(),
            Preset::Threshold => ExtensionFilter::common_images(),
        }
    }

    /// Default conversion options for this preset.
    pub fn options(self) -> ConvertOptions {
        ConvertOptions::default().with_policy(self.policy())
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dither" => Ok(Preset::Dither),
            "threshold" => Ok(Preset::Threshold),
            other => Err(format!("unknown preset '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_target_display() {
        let opts = ConvertOptions::new();
        assert_eq!((opts.width, opts.height), (136, 136));
        assert_eq!(opts.filter, FilterType::Lanczos3);
        assert_eq!(opts.policy, BinarizePolicy::Dither);
        assert!(!opts.apply_orientation);
    }

    #[test]
    fn test_presets() {
        assert_eq!(Preset::default(), Preset::Dither);
        assert_eq!(Preset::Dither.options().policy, BinarizePolicy::Dither);
        assert_eq!(
            Preset::Threshold.options().policy,
            BinarizePolicy::Threshold { level: 150 }
        );
        assert_eq!(Preset::Dither.extensions(), ExtensionFilter::png_only());
        assert_eq!(Preset::Threshold.extensions(), ExtensionFilter::common_images());
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("Threshold".parse::<Preset>(), Ok(Preset::Threshold));
        assert!("sharpen".parse::<Preset>().is_err());
    }

    #[test]
    fn test_builders() {
        let opts = ConvertOptions::new()
            .with_size(576, 136)
            .with_policy(BinarizePolicy::threshold(90));
        assert_eq!((opts.width, opts.height), (576, 136));
        assert_eq!(opts.policy, BinarizePolicy::Threshold { level: 90 });
    }
}
