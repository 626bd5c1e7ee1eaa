//! Filesystem sweep of the tool's well-known output directories.

pub mod artifacts;
pub mod results;

use std::fs;
use std::path::{Path, PathBuf};

/// Collect every regular file under `root`, depth-first. Symbolic links are
/// skipped so the sweep stays inside the fixed roots; unreadable entries
/// are ignored rather than reported.
pub(crate) fn walk_files(root: &Path, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(_) => continue,
        };
        if file_type.is_symlink() {
            continue;
        }
        let path = entry.path();
        if file_type.is_dir() {
            walk_files(&path, files);
        } else if file_type.is_file() {
            files.push(path);
        }
    }
}
