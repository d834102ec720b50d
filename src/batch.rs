//! Filesystem traversal + batch worker pool + progress (SPEC_FULL §B):
//! walks a directory, triages each file, and dispatches extraction across
//! a `rayon` thread pool. One `Document` (or error) comes back per input
//! file; no shared mutable state crosses worker threads, matching spec
//! §5's single-document-per-file concurrency model.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::{HwpError, Result};
use crate::extract_file;
use crate::model::Document;
use crate::triage::Format;
use crate::ExtractOptions;

/// One input file's outcome: its path plus either the extracted document
/// or the error that stopped extraction.
pub struct BatchResult {
    pub path: PathBuf,
    pub outcome: Result<Document>,
}

/// Recursively collects candidate files under `root`. Directories that
/// can't be read are skipped rather than aborting the whole walk.
pub fn discover_files(root: impl AsRef<Path>, recursive: bool) -> Vec<PathBuf> {
    let walker = if recursive {
        WalkDir::new(root)
    } else {
        WalkDir::new(root).max_depth(1)
    };

    walker
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}

/// Extracts every file in `paths` in parallel, reporting progress on
/// `stderr`. Each file is independent: one panic-free error doesn't stop
/// the rest of the batch.
pub fn run_batch(paths: &[PathBuf], options: &ExtractOptions) -> Vec<BatchResult> {
    let progress = ProgressBar::new(paths.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let results: Vec<BatchResult> = paths
        .par_iter()
        .map(|path| {
            let outcome = extract_one(path, options);
            progress.inc(1);
            BatchResult {
                path: path.clone(),
                outcome,
            }
        })
        .collect();

    progress.finish_and_clear();
    results
}

fn extract_one(path: &Path, options: &ExtractOptions) -> Result<Document> {
    match crate::triage::sniff_file(path)? {
        Format::Unknown => Err(HwpError::NotHwp5(format!(
            "{}: unrecognised format",
            path.display()
        ))),
        _ => extract_file(path, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn discovers_files_recursively() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.hwp"), b"x").unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("b.hwp"), b"y").unwrap();

        let found = discover_files(dir.path(), true);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn non_recursive_walk_skips_nested_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.hwp"), b"x").unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("b.hwp"), b"y").unwrap();

        let found = discover_files(dir.path(), false);
        assert_eq!(found.len(), 1);
    }
}
