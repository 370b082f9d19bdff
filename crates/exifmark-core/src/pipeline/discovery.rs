//! Expand command-line inputs into the list of images to watermark.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;

/// Finds image files by extension.
pub struct FileDiscovery {
    extensions: Vec<String>,
    excluded: Vec<PathBuf>,
}

impl FileDiscovery {
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            extensions: config
                .supported_formats
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            excluded: Vec::new(),
        }
    }

    /// Skip everything under `dir` while walking, e.g. the output directory.
    ///
    /// Only applies below a walked directory: walking `dir` itself or one of
    /// its subdirectories is unaffected. Files named explicitly are kept.
    pub fn exclude(mut self, dir: &Path) -> Self {
        self.excluded.push(canonical(dir));
        self
    }

    /// Collect every supported image under the given paths.
    ///
    /// Files named explicitly are kept even when their extension is not in
    /// the list; the decoder decides whether they are images. Directories
    /// are walked recursively. The result is sorted and free of duplicates.
    pub fn discover_all(&self, inputs: &[PathBuf]) -> Vec<PathBuf> {
        let mut found = BTreeSet::new();
        for input in inputs {
            if input.is_dir() {
                found.extend(self.walk(input));
            } else {
                found.insert(input.clone());
            }
        }
        found.into_iter().collect()
    }

    /// Recursively list supported images in a directory, sorted by path.
    pub fn walk(&self, dir: &Path) -> Vec<PathBuf> {
        let root = canonical(dir);
        let excluded: Vec<&PathBuf> = self
            .excluded
            .iter()
            .filter(|skip| !root.starts_with(skip))
            .collect();

        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| {
                excluded.is_empty() || {
                    let path = canonical(entry.path());
                    !excluded.iter().any(|skip| path.starts_with(skip))
                }
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {:?}: {}", dir, e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.is_supported(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        files.sort();
        files
    }

    /// Case-insensitive extension match.
    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|known| *known == ext)
            })
            .unwrap_or(false)
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
