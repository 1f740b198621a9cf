use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::AppConfig;
use crate::core::collection::{dedup_by_stem, Collection, Item, SourceFile};

use super::AdapterError;

/// List the image file names in a folder.
///
/// `read_dir` order depends on the filesystem, so the names are sorted;
/// that way dedup precedence and shuffle seeds mean the same thing on
/// every machine.
pub fn scan_image_files(folder: &Path, config: &AppConfig) -> Result<Vec<String>, AdapterError> {
    if !folder.exists() {
        return Err(AdapterError::FolderNotFound(folder.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        if config.is_image_file(&path) {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();

    info!("Found {} image files in {:?}", names.len(), folder);
    Ok(names)
}

/// Count the image files in a folder
pub fn count_images(folder: &Path, config: &AppConfig) -> Result<usize, AdapterError> {
    Ok(scan_image_files(folder, config)?.len())
}

/// Scan a folder and deduplicate the listing by stem
pub fn deduped_files(
    folder: &Path,
    config: &AppConfig,
    extension_priority: Option<&[String]>,
) -> Result<Vec<SourceFile>, AdapterError> {
    let names = scan_image_files(folder, config)?;
    let files = dedup_by_stem(&names, extension_priority);
    if files.len() < names.len() {
        info!(
            "{} files collapsed into {} unique stems",
            names.len(),
            files.len()
        );
    }
    Ok(files)
}

/// Build a collection from deduplicated files, one unweighted item per stem
pub fn collection_from_files(files: &[SourceFile]) -> Collection {
    Collection::from_items(files.iter().map(|f| Item::unweighted(f.stem.clone())))
}
