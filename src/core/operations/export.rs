use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::core::collection::SourceFile;
use crate::core::split::SplitResult;

use super::file_ops::{copy_file, FileOpResult};

/// Outcome of copying one item into its group directory
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub id: String,
    pub group: String,
    pub success: bool,
    pub error: Option<String>,
}

/// Per-file outcomes of a finished export
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub outcomes: Vec<ExportOutcome>,
}

impl ExportReport {
    pub fn copied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.copied()
    }
}

/// Materialize a split on disk: create one directory per group under
/// `dest_dir` and copy each assigned item's representative file into it.
///
/// A failed copy is recorded and the batch continues; only a failure to
/// create a group directory aborts the export.
pub fn export_split(
    source_dir: &Path,
    dest_dir: &Path,
    result: &SplitResult,
    files: &[SourceFile],
) -> FileOpResult<ExportReport> {
    let file_names: HashMap<&str, &str> = files
        .iter()
        .map(|f| (f.stem.as_str(), f.file_name.as_str()))
        .collect();

    let mut report = ExportReport::default();

    for group in &result.groups {
        let group_dir = dest_dir.join(&group.name);
        fs::create_dir_all(&group_dir)?;

        for id in &group.ids {
            let outcome = match file_names.get(id.as_str()) {
                Some(file_name) => {
                    let src = source_dir.join(file_name);
                    let dest = group_dir.join(file_name);
                    match copy_file(&src, &dest) {
                        Ok(()) => ExportOutcome {
                            id: id.clone(),
                            group: group.name.clone(),
                            success: true,
                            error: None,
                        },
                        Err(e) => ExportOutcome {
                            id: id.clone(),
                            group: group.name.clone(),
                            success: false,
                            error: Some(e.to_string()),
                        },
                    }
                }
                None => {
                    warn!("No source file known for item {}, skipping", id);
                    ExportOutcome {
                        id: id.clone(),
                        group: group.name.clone(),
                        success: false,
                        error: Some("no source file for this id".to_string()),
                    }
                }
            };
            report.outcomes.push(outcome);
        }

        info!(
            "Exported group {:?} to {:?} ({} items)",
            group.name,
            group_dir,
            group.len()
        );
    }

    info!(
        "Export complete: {} copied, {} failed",
        report.copied(),
        report.failed()
    );

    Ok(report)
}
