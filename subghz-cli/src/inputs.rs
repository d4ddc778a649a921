//! Input discovery
//!
//! Turns configured inputs into a list of capture files with array names.
//! Directories are walked for `.sub` files.

use crate::config::InputConfig;
use crate::naming::{array_name_for, dedupe_names, sanitize_identifier};
use std::path::{Path, PathBuf};

const CAPTURE_EXTENSIONS: &[&str] = &["sub"];

/// One capture file to convert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub path: PathBuf,
    pub name: String,
}

impl Job {
    /// File name for console output and error placeholders
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Expand inputs into jobs, in input order. Files that do not exist are kept
/// so they can be reported as missing.
pub fn expand_inputs(inputs: &[InputConfig]) -> Vec<Job> {
    let mut jobs = Vec::new();

    for input in inputs {
        if input.path.is_dir() {
            if input.name.is_some() {
                log::warn!(
                    "Ignoring array name for directory input {:?}",
                    input.path
                );
            }
            let files = collect_captures(&input.path);
            log::debug!("Found {} capture files in {:?}", files.len(), input.path);
            jobs.extend(files.into_iter().map(|path| Job {
                name: array_name_for(&path),
                path,
            }));
        } else {
            let name = match &input.name {
                Some(name) => sanitize_identifier(name),
                None => array_name_for(&input.path),
            };
            jobs.push(Job {
                path: input.path.clone(),
                name,
            });
        }
    }

    let mut names: Vec<String> = jobs.iter().map(|job| job.name.clone()).collect();
    dedupe_names(&mut names);
    for (job, name) in jobs.iter_mut().zip(names) {
        job.name = name;
    }

    jobs
}

/// Collect capture files below `dir`, sorted by path
fn collect_captures(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| CAPTURE_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}
