//! Artifact discovery: every file a task left behind, by location only.

use std::path::Path;

use super::walk_files;

/// Directories swept for produced files after a run. Kept disjoint so a
/// file is reported once per location it actually exists in.
pub const ARTIFACT_ROOTS: [&str; 4] = ["runs", "weights", "results", "exports"];

/// List every regular file under the artifact roots, as paths relative to
/// `base`, sorted for deterministic output. Missing roots contribute
/// nothing; no roots at all yields an empty list.
pub fn scan(base: &Path) -> Vec<String> {
    let mut found = Vec::new();
    for root in ARTIFACT_ROOTS {
        let dir = base.join(root);
        if !dir.is_dir() {
            continue;
        }
        let mut files = Vec::new();
        walk_files(&dir, &mut files);
        for path in files {
            let rel = path.strip_prefix(base).unwrap_or(&path);
            found.push(rel.to_string_lossy().into_owned());
        }
    }
    found.sort();
    found
}
