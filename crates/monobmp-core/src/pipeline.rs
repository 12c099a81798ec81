//! The conversion pipeline: decode, resize, grayscale, binarize, write.
//!
//! Files are processed one at a time in name order. The first failure stops
//! the batch; bitmaps already written are left in place.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::binarize::{binarize, MonoBitmap};
use crate::decode::{decode_file, resize, DecodeError, DecodedImage};
use crate::encode::{write_bmp, EncodeError};
use crate::luminance::to_grayscale;
use crate::options::{ConvertOptions, Preset};
use crate::scan::{scan_directory, ExtensionFilter, ScanError};

/// Errors from running a conversion job or batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to convert {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("Failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },
}

/// One input file and where its bitmap goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub options: ConvertOptions,
}

impl ConversionJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, options: ConvertOptions) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            options,
        }
    }
}

/// Settings for converting a whole directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub extensions: ExtensionFilter,
    pub options: ConvertOptions,
}

impl BatchOptions {
    /// Batch settings taken from one of the stock presets.
    pub fn from_preset(
        preset: Preset,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            extensions: preset.extensions(),
            options: preset.options(),
        }
    }
}

/// A file written by a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Summary of a completed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub converted: Vec<ConvertedFile>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.converted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converted.is_empty()
    }
}

/// Resize, reduce to grayscale and binarize an already decoded image.
///
/// The result always has exactly `options.width` x `options.height` pixels.
pub fn convert_image(
    image: &DecodedImage,
    options: &ConvertOptions,
) -> Result<MonoBitmap, DecodeError> {
    let resized = resize(image, options.width, options.height, options.filter)?;
    let gray = to_grayscale(&resized, options.background)?;
    debug!(policy = %options.policy, "Binarizing");
    Ok(binarize(&gray, options.policy))
}

/// Run a single job end to end, returning the bitmap that was written.
pub fn convert_file(job: &ConversionJob) -> Result<MonoBitmap, PipelineError> {
    let decode_err = |source: DecodeError| PipelineError::Decode {
        path: job.input.clone(),
        source,
    };

    let image = decode_file(&job.input, job.options.apply_orientation).map_err(decode_err)?;
    let bitmap = convert_image(&image, &job.options).map_err(decode_err)?;

    write_bmp(&bitmap, &job.output).map_err(|source| PipelineError::Encode {
        path: job.output.clone(),
        source,
    })?;

    Ok(bitmap)
}

/// Output location for `input`: its file stem with a `.bmp` extension,
/// inside `output_dir`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".bmp");
    output_dir.join(name)
}

/// Convert every matching file in a directory.
pub fn convert_directory(batch: &BatchOptions) -> Result<BatchReport, PipelineError> {
    convert_directory_with(batch, |_| {})
}

/// Like [`convert_directory`], calling `on_converted` after each file.
pub fn convert_directory_with<F>(
    batch: &BatchOptions,
    mut on_converted: F,
) -> Result<BatchReport, PipelineError>
where
    F: FnMut(&ConvertedFile),
{
    std::fs::create_dir_all(&batch.output_dir).map_err(|source| {
        PipelineError::CreateOutputDir {
            path: batch.output_dir.clone(),
            source,
        }
    })?;

    let inputs = scan_directory(&batch.input_dir, &batch.extensions)?;
    let mut report = BatchReport::default();

    for input in inputs {
        let output = output_path_for(&input, &batch.output_dir);
        let job = ConversionJob::new(input, output, batch.options.clone());
        convert_file(&job)?;

        info!(
            input = %job.input.display(),
            output = %job.output.display(),
            "Converted image"
        );
        let converted = ConvertedFile {
            input: job.input,
            output: job.output,
        };
        on_converted(&converted);
        report.converted.push(converted);
    }

    info!(count = report.len(), "Batch complete");
    Ok(report)
}
