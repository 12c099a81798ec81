//! Directory scanning for convertible source images.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Errors raised while listing the input directory.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The directory is missing, unreadable, or an entry could not be read.
    #[error("Failed to scan {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Allow-list of file extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionFilter {
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
    /// When false, `Logo.PNG` matches `png`.
    #[serde(default)]
    pub case_sensitive: bool,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| {
                    let ext: String = ext.into();
                    ext.trim_start_matches('.').to_string()
                })
                .collect(),
            case_sensitive,
        }
    }

    /// Lower-case `.png` only.
    pub fn png_only() -> Self {
        Self::new(["png"], true)
    }

    /// PNG, JPEG and GIF in any letter case.
    pub fn common_images() -> Self {
        Self::new(["png", "jpg", "jpeg", "gif"], false)
    }

    /// Whether `path` has an allowed extension.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|allowed| {
            if self.case_sensitive {
                allowed == ext
            } else {
                allowed.eq_ignore_ascii_case(ext)
            }
        })
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::png_only()
    }
}

/// List the files directly inside `dir` whose extension passes `filter`.
///
/// Subdirectories are neither descended into nor returned. Results are
/// sorted by file name.
///
/// # Errors
///
/// Returns `ScanError::Walk` if `dir` does not exist or cannot be read.
pub fn scan_directory(dir: &Path, filter: &ExtensionFilter) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if filter.matches(entry.path()) {
            files.push(entry.into_path());
        } else {
            debug!(path = %entry.path().display(), "Skipping file with unlisted extension");
        }
    }

    info!(dir = %dir.display(), count = files.len(), "Scanned input directory");
    Ok(files)
}
