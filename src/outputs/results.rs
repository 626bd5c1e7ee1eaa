//! Structured result files left behind by a completed task.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde_json::{Map, Value};
use tracing::debug;

use super::walk_files;

/// Directories the tool writes per-task result files into.
pub const RESULT_ROOTS: [&str; 6] = [
    "runs/train",
    "runs/val",
    "runs/predict",
    "runs/export",
    "runs/track",
    "runs/benchmark",
];

/// Parse every structured result file under the result roots (relative to
/// `base`) into `file_<stem>` entries. A file that fails to parse becomes a
/// `file_<stem>_error` entry instead of aborting the sweep. When the same
/// stem shows up under more than one root, the last one encountered wins;
/// roots and files are visited in a fixed order so the winner is stable.
pub fn collect(base: &Path) -> Map<String, Value> {
    let mut metrics = Map::new();
    for root in RESULT_ROOTS {
        let dir = base.join(root);
        if !dir.is_dir() {
            continue;
        }
        let mut files = Vec::new();
        walk_files(&dir, &mut files);
        files.sort();
        for path in files {
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !matches!(ext, "json" | "yaml" | "yml") {
                continue;
            }
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            match parse_file(&path, ext) {
                Ok(value) => {
                    metrics.insert(format!("file_{}", stem), value);
                }
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "result file unreadable");
                    metrics.insert(format!("file_{}_error", stem), Value::String(e.to_string()));
                }
            }
        }
    }
    metrics
}

fn parse_file(path: &Path, ext: &str) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    let value = match ext {
        "json" => serde_json::from_str(&text)?,
        _ => serde_yaml::from_str(&text)?,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_collect_parses_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("runs/val/exp");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("results.json"), r#"{"mAP50": 0.87}"#).unwrap();
        fs::write(root.join("args.yaml"), "imgsz: 640\nbatch: 2\n").unwrap();

        let metrics = collect(dir.path());
        assert_eq!(metrics["file_results"], json!({"mAP50": 0.87}));
        assert_eq!(metrics["file_args"], json!({"imgsz": 640, "batch": 2}));
    }

    #[test]
    fn test_malformed_file_becomes_error_entry() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("runs/train");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("good.json"), r#"{"epochs": 1}"#).unwrap();
        fs::write(root.join("bad.json"), "{not json").unwrap();

        let metrics = collect(dir.path());
        assert_eq!(metrics["file_good"], json!({"epochs": 1}));
        assert!(metrics["file_bad_error"].is_string());
        assert!(!metrics.contains_key("file_bad"));
    }

    #[test]
    fn test_later_root_overwrites_same_stem() {
        let dir = tempfile::tempdir().unwrap();
        for (root, body) in [("runs/train", r#"{"from": "train"}"#), ("runs/val", r#"{"from": "val"}"#)] {
            let d = dir.path().join(root);
            fs::create_dir_all(&d).unwrap();
            fs::write(d.join("results.json"), body).unwrap();
        }

        let metrics = collect(dir.path());
        assert_eq!(metrics["file_results"], json!({"from": "val"}));
    }

    #[test]
    fn test_unrecognized_extensions_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("runs/predict");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("image.jpg"), [0xffu8, 0xd8]).unwrap();

        assert!(collect(dir.path()).is_empty());
    }

    #[test]
    fn test_missing_roots_yield_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect(dir.path()).is_empty());
    }
}
