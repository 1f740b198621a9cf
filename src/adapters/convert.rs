use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::{info, warn};

use crate::core::operations::remove_file;

use super::AdapterError;

/// Per-file outcome of a conversion batch
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub file_name: String,
    pub success: bool,
    pub error: Option<String>,
}

/// Summary counts for a conversion batch
#[derive(Debug, Clone, Default)]
pub struct ConversionStats {
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Convert every image in a folder from one container format to another.
///
/// Files whose extension does not match `from_ext` are skipped. A file
/// that fails to decode or re-encode is recorded as failed and the batch
/// continues. With `remove_source` the original file is deleted after a
/// successful conversion, so the folder ends up with one container format
/// instead of format duplicates sharing a stem.
pub fn convert_images(
    folder: &Path,
    from_ext: &str,
    to_ext: &str,
    out_dir: Option<&Path>,
    remove_source: bool,
) -> Result<(ConversionStats, Vec<ConversionOutcome>), AdapterError> {
    if !folder.exists() {
        return Err(AdapterError::FolderNotFound(folder.to_path_buf()));
    }
    let format = ImageFormat::from_extension(to_ext)
        .filter(|f| f.can_write())
        .ok_or_else(|| AdapterError::UnsupportedFormat(to_ext.to_string()))?;

    let dest_dir: PathBuf = out_dir.unwrap_or(folder).to_path_buf();
    fs::create_dir_all(&dest_dir)?;

    let mut stats = ConversionStats::default();
    let mut outcomes = Vec::new();

    let mut entries: Vec<PathBuf> = fs::read_dir(folder)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    entries.sort();

    for path in entries {
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };

        let matches_source = path
            .extension()
            .map(|e| e.to_string_lossy().eq_ignore_ascii_case(from_ext))
            .unwrap_or(false);
        if !matches_source {
            stats.skipped += 1;
            continue;
        }

        let dest = dest_dir
            .join(&file_name)
            .with_extension(to_ext.to_lowercase());

        match convert_one(&path, &dest, format) {
            Ok(()) => {
                stats.converted += 1;
                let mut error = None;
                if remove_source {
                    if let Err(e) = remove_file(&path) {
                        warn!("Converted {} but could not remove it: {}", file_name, e);
                        error = Some(e.to_string());
                    }
                }
                outcomes.push(ConversionOutcome {
                    file_name,
                    success: true,
                    error,
                });
            }
            Err(message) => {
                warn!("Skipping {}: {}", file_name, message);
                stats.failed += 1;
                outcomes.push(ConversionOutcome {
                    file_name,
                    success: false,
                    error: Some(message),
                });
            }
        }
    }

    info!(
        "Conversion complete: {} converted, {} failed, {} skipped",
        stats.converted, stats.failed, stats.skipped
    );

    Ok((stats, outcomes))
}

fn convert_one(src: &Path, dest: &Path, format: ImageFormat) -> Result<(), String> {
    let img = image::open(src).map_err(|e| format!("decode failed: {}", e))?;
    img.save_with_format(dest, format)
        .map_err(|e| format!("encode failed: {}", e))?;
    Ok(())
}
