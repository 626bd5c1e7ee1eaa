//! Best-effort metric scraping from captured tool output.
//!
//! The tool's log format is human-readable and unversioned, so extraction
//! is a battery of independent pattern scans rather than a grammar. Each
//! scan lives behind its own function and can be added or retired without
//! touching the others. When a label appears more than once, only the last
//! occurrence counts (the latest epoch line supersedes earlier ones).

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Scan stdout and stderr (concatenated, in that order) for known metric
/// labels. Absent labels are simply omitted from the map.
pub fn extract(stdout: &str, stderr: &str) -> Map<String, Value> {
    let text = format!("{}\n{}", stdout, stderr);
    let mut metrics = Map::new();
    scan_epochs(&text, &mut metrics);
    scan_losses(&text, &mut metrics);
    scan_mean_ap(&text, &mut metrics);
    scan_precision_recall(&text, &mut metrics);
    scan_inference_time(&text, &mut metrics);
    scan_detection_count(&text, &mut metrics);
    scan_export(&text, &mut metrics);
    metrics
}

fn scan_epochs(text: &str, metrics: &mut Map<String, Value>) {
    static EPOCH: Lazy<Regex> = Lazy::new(|| Regex::new(r"Epoch\s+(\d+)/(\d+)").unwrap());
    if let Some(caps) = EPOCH.captures_iter(text).last() {
        if let (Ok(current), Ok(total)) = (caps[1].parse::<i64>(), caps[2].parse::<i64>()) {
            metrics.insert("current_epoch".into(), current.into());
            metrics.insert("total_epochs".into(), total.into());
        }
    }
}

fn scan_losses(text: &str, metrics: &mut Map<String, Value>) {
    static LOSSES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
        ["box_loss", "obj_loss", "cls_loss", "total_loss"]
            .into_iter()
            .map(|name| (name, labeled_float(name)))
            .collect()
    });
    for (name, re) in LOSSES.iter() {
        if let Some(v) = last_f64(re, text) {
            metrics.insert((*name).into(), v.into());
        }
    }
}

fn scan_mean_ap(text: &str, metrics: &mut Map<String, Value>) {
    static MAP50: Lazy<Regex> = Lazy::new(|| Regex::new(r"mAP50:\s*([\d.]+)").unwrap());
    static MAP50_95: Lazy<Regex> = Lazy::new(|| Regex::new(r"mAP50-95:\s*([\d.]+)").unwrap());
    if let Some(v) = last_f64(&MAP50, text) {
        metrics.insert("mAP50".into(), v.into());
    }
    if let Some(v) = last_f64(&MAP50_95, text) {
        metrics.insert("mAP50-95".into(), v.into());
    }
}

fn scan_precision_recall(text: &str, metrics: &mut Map<String, Value>) {
    static PRECISION: Lazy<Regex> = Lazy::new(|| Regex::new(r"Precision:\s*([\d.]+)").unwrap());
    static RECALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"Recall:\s*([\d.]+)").unwrap());
    if let Some(v) = last_f64(&PRECISION, text) {
        metrics.insert("precision".into(), v.into());
    }
    if let Some(v) = last_f64(&RECALL, text) {
        metrics.insert("recall".into(), v.into());
    }
}

fn scan_inference_time(text: &str, metrics: &mut Map<String, Value>) {
    static INFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"inference:\s*([\d.]+)ms").unwrap());
    if let Some(v) = last_f64(&INFERENCE, text) {
        metrics.insert("inference_time_ms".into(), v.into());
    }
}

fn scan_detection_count(text: &str, metrics: &mut Map<String, Value>) {
    static DETECTIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s+detections").unwrap());
    if let Some(caps) = DETECTIONS.captures_iter(text).last() {
        if let Ok(n) = caps[1].parse::<i64>() {
            metrics.insert("total_detections".into(), n.into());
        }
    }
}

fn scan_export(text: &str, metrics: &mut Map<String, Value>) {
    static EXPORT: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"Export complete \(([\d.]+)s\)").unwrap());
    static SAVED: Lazy<Regex> = Lazy::new(|| Regex::new(r"Results saved to (.+)").unwrap());
    if let Some(v) = last_f64(&EXPORT, text) {
        metrics.insert("export_time_s".into(), v.into());
    }
    if let Some(caps) = SAVED.captures_iter(text).last() {
        metrics.insert("exported_file".into(), caps[1].trim().into());
    }
}

fn labeled_float(label: &str) -> Regex {
    Regex::new(&format!(r"{}:\s*([\d.]+)", label)).unwrap()
}

/// Last parseable occurrence of the pattern's first capture group.
fn last_f64(re: &Regex, text: &str) -> Option<f64> {
    re.captures_iter(text).last().and_then(|caps| caps[1].parse().ok())
}
