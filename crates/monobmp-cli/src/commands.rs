//! Subcommand implementations.

use anyhow::{Context, Result};
use monobmp_core::{convert_directory_with, convert_file, BatchOptions, ConversionJob};
use std::path::{Path, PathBuf};

use crate::cli::ConvertArgs;
use crate::config::Config;

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Convert a directory, printing one line per file.
pub fn batch(
    config: &Config,
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    args: &ConvertArgs,
) -> Result<()> {
    let effective = config.resolve(args)?;
    let batch = BatchOptions {
        input_dir: input_dir.unwrap_or(effective.input_dir),
        output_dir: output_dir.unwrap_or(effective.output_dir),
        extensions: effective.extensions,
        options: effective.options,
    };

    tracing::info!(
        "Converting {:?} -> {:?} ({}, {}x{})",
        batch.input_dir,
        batch.output_dir,
        batch.options.policy,
        batch.options.width,
        batch.options.height
    );

    let report = convert_directory_with(&batch, |file| {
        println!(
            "Converted {} to {}",
            display_name(&file.input),
            display_name(&file.output)
        );
    })
    .with_context(|| format!("Batch conversion of {:?} failed", batch.input_dir))?;

    if report.is_empty() {
        tracing::warn!("No matching images found in {:?}", batch.input_dir);
    }
    println!("All images converted successfully!");
    Ok(())
}

/// Convert one file.
pub fn convert(
    config: &Config,
    input: &Path,
    output: Option<PathBuf>,
    args: &ConvertArgs,
) -> Result<()> {
    let effective = config.resolve(args)?;
    let output = output.unwrap_or_else(|| input.with_extension("bmp"));

    if output == input {
        anyhow::bail!("Refusing to overwrite the source image {:?}", input);
    }

    let job = ConversionJob::new(input, &output, effective.options);
    convert_file(&job).with_context(|| format!("Failed to convert {:?}", input))?;

    println!(
        "Converted {} to 1-bit BMP at {}",
        display_name(input),
        output.display()
    );
    Ok(())
}

/// Print the effective configuration.
pub fn show_config(config: &Config, args: &ConvertArgs) -> Result<()> {
    let effective = config.resolve(args)?;
    let rendered =
        toml::to_string_pretty(&effective).context("Failed to serialize configuration")?;
    print!("{rendered}");
    Ok(())
}
