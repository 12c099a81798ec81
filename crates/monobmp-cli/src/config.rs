//! TOML configuration and its merge with command-line flags.
//!
//! Precedence, highest first: command-line flags, config file, preset.

use anyhow::{Context, Result};
use monobmp_core::{
    Background, BinarizePolicy, ConvertOptions, ExtensionFilter, FilterType, Preset,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::ConvertArgs;

/// Contents of `monobmp.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub preset: Preset,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_orientation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<BinarizePolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionFilter>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("images"),
            output_dir: PathBuf::from("bmp_images"),
            preset: Preset::default(),
            width: None,
            height: None,
            filter: None,
            background: None,
            apply_orientation: None,
            policy: None,
            extensions: None,
        }
    }
}

/// Fully resolved settings for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Effective {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub extensions: ExtensionFilter,
    pub options: ConvertOptions,
}

impl Config {
    /// Merge the file settings with command-line flags.
    ///
    /// A preset given on the command line replaces the file's `policy` and
    /// `extensions` as well as its `preset`.
    pub fn resolve(&self, args: &ConvertArgs) -> Result<Effective> {
        let preset = args.preset.unwrap_or(self.preset);
        let mut options = preset.options();
        let mut extensions = preset.extensions();

        if args.preset.is_none() {
            if let Some(policy) = self.policy {
                options.policy = policy;
            }
            if let Some(ext) = &self.extensions {
                extensions = ext.clone();
            }
        }
        if let Some(width) = self.width {
            options.width = width;
        }
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(filter) = self.filter {
            options.filter = filter;
        }
        if let Some(background) = self.background {
            options.background = background;
        }
        if let Some(apply) = self.apply_orientation {
            options.apply_orientation = apply;
        }

        if let Some(level) = args.threshold {
            options.policy = BinarizePolicy::threshold(level);
        }
        if args.dither {
            options.policy = BinarizePolicy::Dither;
        }
        if let Some((width, height)) = args.size {
            options.width = width;
            options.height = height;
        }
        if let Some(filter) = args.filter {
            options.filter = filter;
        }
        if let Some(background) = args.background {
            options.background = background;
        }
        if args.auto_orient {
            options.apply_orientation = true;
        }

        if options.width == 0 || options.height == 0 {
            anyhow::bail!(
                "Output size must be non-zero, got {}x{}",
                options.width,
                options.height
            );
        }

        Ok(Effective {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            extensions,
            options,
        })
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./monobmp.toml", "~/.config/monobmp/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}
