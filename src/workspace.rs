//! Workspace checking
//!
//! Collects Ruby files under the requested paths and checks each of them
//! with its own rule instance; files are processed in parallel.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::rule::{Offense, RuleConfig, check_source};

/// Offenses found in one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub offenses: Vec<Offense>,
}

/// Ruby files named by `paths`; directories are walked recursively
pub fn collect_ruby_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            anyhow::bail!("No such file or directory: {}", path.display());
        }

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() && is_ruby_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn is_ruby_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "rb")
}

/// Check one file from disk
pub fn check_file(path: &Path, config: &RuleConfig) -> Result<FileReport> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let offenses = check_source(&source, config)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    log::debug!("{}: {} offense(s)", path.display(), offenses.len());

    Ok(FileReport {
        path: path.to_path_buf(),
        offenses,
    })
}

/// Check every file independently, keeping the order of `files`.
///
/// A file that cannot be read or parsed yields its own error and does not
/// affect the reports of the others.
pub fn check_files(files: &[PathBuf], config: &RuleConfig) -> Vec<Result<FileReport>> {
    files
        .par_iter()
        .map(|path| check_file(path, config))
        .collect()
}
