//! Expanding command-line paths into the files to read.

use crate::config::Config;
use crate::error::KirError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand glob patterns into files, walking matched directories recursively.
///
/// Files named directly are always returned. Files found by walking a
/// directory pass through the configured extension filter. Directory
/// contents come back sorted by file name.
pub fn find_files(patterns: &[String], config: &Config) -> Result<Vec<PathBuf>, KirError> {
    let mut files = Vec::new();

    for pattern in patterns {
        let mut matched = false;
        for entry in glob::glob(pattern)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("skipping unreadable path: {}", e);
                    continue;
                }
            };
            matched = true;
            if path.is_dir() {
                walk_dir(&path, config, &mut files);
            } else {
                files.push(path);
            }
        }
        if !matched {
            log::warn!("no files match {}", pattern);
        }
    }

    Ok(files)
}

fn walk_dir(dir: &Path, config: &Config, files: &mut Vec<PathBuf>) {
    let walker = WalkDir::new(dir)
        .follow_links(config.follow_links)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("error walking {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if config.accepts_extension(path.extension().and_then(|e| e.to_str())) {
            files.push(path);
        }
    }
}
