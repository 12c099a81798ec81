use clap::{Args, Parser, Subcommand};
use monobmp_core::{Background, FilterType, Preset};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "monobmp")]
#[command(
    author,
    version,
    about = "Convert images into 1-bit BMP assets for 136x136 glasses displays"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert every matching image in a directory
    Batch {
        /// Directory holding the source images [default: images]
        input_dir: Option<PathBuf>,

        /// Directory for the generated bitmaps, created if missing [default: bmp_images]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        args: ConvertArgs,
    },

    /// Convert a single image file
    Convert {
        /// Source image
        #[arg(required = true)]
        input: PathBuf,

        /// Output path (defaults to the input path with a .bmp extension)
        output: Option<PathBuf>,

        #[command(flatten)]
        args: ConvertArgs,
    },

    /// Print the effective configuration as TOML
    ShowConfig {
        #[command(flatten)]
        args: ConvertArgs,
    },
}

/// Conversion flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ConvertArgs {
    /// Stock profile: "dither" (.png, error diffusion) or "threshold" (png/jpg/jpeg/gif, cutoff 150)
    #[arg(short, long)]
    pub preset: Option<Preset>,

    /// Use a hard threshold: luma above this value becomes white
    #[arg(short, long, conflicts_with = "dither")]
    pub threshold: Option<u8>,

    /// Use Floyd-Steinberg dithering
    #[arg(long)]
    pub dither: bool,

    /// Output size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Resampling filter: nearest, bilinear or lanczos3
    #[arg(long)]
    pub filter: Option<FilterType>,

    /// How to treat transparency: ignore, white or black
    #[arg(long)]
    pub background: Option<Background>,

    /// Rotate/flip by the EXIF orientation tag before converting
    #[arg(long)]
    pub auto_orient: bool,
}

/// Parse `136x136` style sizes.
pub fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width: u32 = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let height: u32 = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
    if width == 0 || height == 0 {
        return Err("width and height must be non-zero".to_string());
    }
    Ok((width, height))
}
