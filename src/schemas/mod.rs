//! Request and response models for the task endpoints.
//!
//! Field defaults mirror the tool's documented CLI defaults and are applied
//! on deserialization; a field sent as explicit `null` stays `None` and is
//! never emitted as an argument. `device` carries no default so the
//! translator's probe-based resolution applies unless a caller pins one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::args::ParameterSet;
use crate::execution::ExecutionResult;

/// Lower any request body to the engine's parameter set. The open-ended
/// `extra_args` map is split out; everything else keeps field order.
pub fn parameters_from<T: Serialize>(req: &T) -> ParameterSet {
    let mut params = match serde_json::to_value(req) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    let extra = match params.remove("extra_args") {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    ParameterSet::with_extra(params, extra)
}

/// Model training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainRequest {
    pub model: String,
    pub data: String,
    #[serde(default = "d_epochs")]
    pub epochs: Option<i64>,
    #[serde(default = "d_train_batch")]
    pub batch: Option<i64>,
    #[serde(default = "d_imgsz")]
    pub imgsz: Option<i64>,
    pub device: Option<String>,
    #[serde(default = "d_lr")]
    pub lr0: Option<f64>,
    #[serde(default = "d_lr")]
    pub lrf: Option<f64>,
    #[serde(default = "d_momentum")]
    pub momentum: Option<f64>,
    #[serde(default = "d_weight_decay")]
    pub weight_decay: Option<f64>,
    #[serde(default = "d_warmup_epochs")]
    pub warmup_epochs: Option<f64>,
    #[serde(default = "d_zero")]
    pub dropout: Option<f64>,
    #[serde(default = "d_optimizer")]
    pub optimizer: Option<String>,
    #[serde(default = "d_seed")]
    pub seed: Option<i64>,
    #[serde(default = "d_true")]
    pub deterministic: Option<bool>,
    #[serde(default = "d_false")]
    pub single_cls: Option<bool>,
    #[serde(default = "d_false")]
    pub rect: Option<bool>,
    #[serde(default = "d_false")]
    pub cos_lr: Option<bool>,
    #[serde(default = "d_close_mosaic")]
    pub close_mosaic: Option<i64>,
    #[serde(default = "d_false")]
    pub resume: Option<bool>,
    #[serde(default = "d_true")]
    pub amp: Option<bool>,
    #[serde(default = "d_fraction")]
    pub fraction: Option<f64>,
    #[serde(default = "d_false")]
    pub profile: Option<bool>,
    pub freeze: Option<Value>,
    #[serde(default = "d_pretrained")]
    pub pretrained: Option<Value>,
    #[serde(default = "d_true")]
    pub val: Option<bool>,
    #[serde(default = "d_project_train")]
    pub project: Option<String>,
    pub name: Option<String>,
    #[serde(default = "d_false")]
    pub exist_ok: Option<bool>,
    #[serde(default = "d_false")]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub extra_args: Map<String, Value>,
}

/// Model validation against a labeled dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValRequest {
    pub model: String,
    pub data: String,
    #[serde(default = "d_val_batch")]
    pub batch: Option<i64>,
    #[serde(default = "d_imgsz")]
    pub imgsz: Option<i64>,
    pub device: Option<String>,
    #[serde(default = "d_false")]
    pub save_json: Option<bool>,
    #[serde(default = "d_val_conf")]
    pub conf: Option<f64>,
    #[serde(default = "d_val_iou")]
    pub iou: Option<f64>,
    #[serde(default = "d_max_det")]
    pub max_det: Option<i64>,
    #[serde(default = "d_true")]
    pub half: Option<bool>,
    #[serde(default = "d_false")]
    pub plots: Option<bool>,
    #[serde(default = "d_split")]
    pub split: Option<String>,
    #[serde(default = "d_false")]
    pub save_txt: Option<bool>,
    #[serde(default = "d_false")]
    pub save_conf: Option<bool>,
    #[serde(default = "d_project_val")]
    pub project: Option<String>,
    pub name: Option<String>,
    #[serde(default = "d_false")]
    pub exist_ok: Option<bool>,
    #[serde(default = "d_true")]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub extra_args: Map<String, Value>,
}

/// Inference over images, videos, or streams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub model: String,
    pub source: String,
    #[serde(default = "d_imgsz")]
    pub imgsz: Option<i64>,
    pub device: Option<String>,
    #[serde(default = "d_predict_conf")]
    pub conf: Option<f64>,
    #[serde(default = "d_predict_iou")]
    pub iou: Option<f64>,
    #[serde(default = "d_false")]
    pub half: Option<bool>,
    #[serde(default = "d_false")]
    pub show: Option<bool>,
    #[serde(default = "d_true")]
    pub save: Option<bool>,
    #[serde(default = "d_false")]
    pub save_txt: Option<bool>,
    #[serde(default = "d_false")]
    pub save_conf: Option<bool>,
    #[serde(default = "d_false")]
    pub save_crop: Option<bool>,
    #[serde(default = "d_true")]
    pub show_labels: Option<bool>,
    #[serde(default = "d_true")]
    pub show_conf: Option<bool>,
    #[serde(default = "d_one")]
    pub vid_stride: Option<i64>,
    pub line_width: Option<i64>,
    #[serde(default = "d_false")]
    pub visualize: Option<bool>,
    #[serde(default = "d_false")]
    pub augment: Option<bool>,
    #[serde(default = "d_false")]
    pub agnostic_nms: Option<bool>,
    #[serde(default = "d_false")]
    pub retina_masks: Option<bool>,
    pub classes: Option<Value>,
    #[serde(default = "d_true")]
    pub boxes: Option<bool>,
    #[serde(default = "d_max_det")]
    pub max_det: Option<i64>,
    #[serde(default = "d_project_predict")]
    pub project: Option<String>,
    pub name: Option<String>,
    #[serde(default = "d_false")]
    pub exist_ok: Option<bool>,
    #[serde(default = "d_true")]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub extra_args: Map<String, Value>,
}

/// Model export to a deployment format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub model: String,
    #[serde(default = "d_imgsz")]
    pub imgsz: Option<i64>,
    pub device: Option<String>,
    #[serde(default = "d_format")]
    pub format: Option<String>,
    #[serde(default = "d_false")]
    pub keras: Option<bool>,
    #[serde(default = "d_false")]
    pub optimize: Option<bool>,
    #[serde(default = "d_false")]
    pub half: Option<bool>,
    #[serde(default = "d_false")]
    pub int8: Option<bool>,
    #[serde(default = "d_false")]
    pub dynamic: Option<bool>,
    #[serde(default = "d_false")]
    pub simplify: Option<bool>,
    pub opset: Option<i64>,
    #[serde(default = "d_workspace")]
    pub workspace: Option<i64>,
    #[serde(default = "d_false")]
    pub nms: Option<bool>,
    #[serde(default = "d_one")]
    pub batch: Option<i64>,
    #[serde(default = "d_false")]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub extra_args: Map<String, Value>,
}

/// Object tracking over a video source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRequest {
    pub model: String,
    pub source: String,
    #[serde(default = "d_imgsz")]
    pub imgsz: Option<i64>,
    pub device: Option<String>,
    #[serde(default = "d_tracker")]
    pub tracker: Option<String>,
    #[serde(default = "d_track_conf")]
    pub conf: Option<f64>,
    #[serde(default = "d_track_iou")]
    pub iou: Option<f64>,
    #[serde(default = "d_false")]
    pub show: Option<bool>,
    #[serde(default = "d_true")]
    pub save: Option<bool>,
    #[serde(default = "d_false")]
    pub save_txt: Option<bool>,
    #[serde(default = "d_true")]
    pub show_labels: Option<bool>,
    #[serde(default = "d_true")]
    pub show_conf: Option<bool>,
    pub line_width: Option<i64>,
    #[serde(default = "d_false")]
    pub per_class: Option<bool>,
    #[serde(default = "d_one")]
    pub vid_stride: Option<i64>,
    #[serde(default = "d_project_track")]
    pub project: Option<String>,
    pub name: Option<String>,
    #[serde(default = "d_false")]
    pub exist_ok: Option<bool>,
    #[serde(default = "d_true")]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub extra_args: Map<String, Value>,
}

/// Speed/accuracy benchmarking across formats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRequest {
    pub model: String,
    pub data: Option<String>,
    #[serde(default = "d_imgsz")]
    pub imgsz: Option<i64>,
    pub device: Option<String>,
    #[serde(default = "d_false")]
    pub half: Option<bool>,
    #[serde(default = "d_false")]
    pub int8: Option<bool>,
    #[serde(default = "d_one")]
    pub batch: Option<i64>,
    #[serde(default = "d_project_benchmark")]
    pub project: Option<String>,
    pub name: Option<String>,
    #[serde(default = "d_false")]
    pub exist_ok: Option<bool>,
    #[serde(default = "d_false")]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub extra_args: Map<String, Value>,
}

/// Packaged solutions (counting, heatmaps, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionRequest {
    pub model: String,
    pub solution_type: String,
    pub source: String,
    #[serde(default = "d_region")]
    pub region_type: Option<String>,
    pub classes: Option<Value>,
    #[serde(default = "d_predict_conf")]
    pub conf: Option<f64>,
    #[serde(default = "d_predict_iou")]
    pub iou: Option<f64>,
    #[serde(default = "d_false")]
    pub show: Option<bool>,
    #[serde(default = "d_true")]
    pub save: Option<bool>,
    #[serde(default = "d_line_width")]
    pub line_width: Option<i64>,
    #[serde(default = "d_project_solution")]
    pub project: Option<String>,
    pub name: Option<String>,
    #[serde(default = "d_false")]
    pub exist_ok: Option<bool>,
    #[serde(default = "d_true")]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub extra_args: Map<String, Value>,
}

/// Unified response body for every task endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OperationResponse {
    pub run_id: String,
    pub command: String,
    pub return_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub metrics: Map<String, Value>,
    pub artifacts: Vec<String>,
    pub success: bool,
    pub timestamp: String,
}

impl OperationResponse {
    pub fn from_result(run_id: String, timestamp: String, result: ExecutionResult) -> Self {
        Self {
            run_id,
            command: result.command,
            return_code: result.return_code,
            stdout: result.stdout,
            stderr: result.stderr,
            metrics: result.metrics,
            artifacts: result.artifacts,
            success: result.success,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub timestamp: String,
}

fn d_true() -> Option<bool> {
    Some(true)
}
fn d_false() -> Option<bool> {
    Some(false)
}
fn d_one() -> Option<i64> {
    Some(1)
}
fn d_zero() -> Option<f64> {
    Some(0.0)
}
fn d_imgsz() -> Option<i64> {
    Some(640)
}
fn d_epochs() -> Option<i64> {
    Some(100)
}
fn d_train_batch() -> Option<i64> {
    Some(16)
}
fn d_val_batch() -> Option<i64> {
    Some(32)
}
fn d_max_det() -> Option<i64> {
    Some(300)
}
fn d_close_mosaic() -> Option<i64> {
    Some(10)
}
fn d_seed() -> Option<i64> {
    Some(0)
}
fn d_workspace() -> Option<i64> {
    Some(4)
}
fn d_line_width() -> Option<i64> {
    Some(2)
}
fn d_lr() -> Option<f64> {
    Some(0.01)
}
fn d_momentum() -> Option<f64> {
    Some(0.937)
}
fn d_weight_decay() -> Option<f64> {
    Some(0.0005)
}
fn d_warmup_epochs() -> Option<f64> {
    Some(3.0)
}
fn d_fraction() -> Option<f64> {
    Some(1.0)
}
fn d_val_conf() -> Option<f64> {
    Some(0.001)
}
fn d_val_iou() -> Option<f64> {
    Some(0.6)
}
fn d_predict_conf() -> Option<f64> {
    Some(0.25)
}
fn d_predict_iou() -> Option<f64> {
    Some(0.7)
}
fn d_track_conf() -> Option<f64> {
    Some(0.3)
}
fn d_track_iou() -> Option<f64> {
    Some(0.5)
}
fn d_optimizer() -> Option<String> {
    Some("auto".to_string())
}
fn d_split() -> Option<String> {
    Some("val".to_string())
}
fn d_format() -> Option<String> {
    Some("onnx".to_string())
}
fn d_tracker() -> Option<String> {
    Some("bytetrack.yaml".to_string())
}
fn d_region() -> Option<String> {
    Some("polygon".to_string())
}
fn d_pretrained() -> Option<Value> {
    Some(Value::Bool(true))
}
fn d_project_train() -> Option<String> {
    Some("runs/train".to_string())
}
fn d_project_val() -> Option<String> {
    Some("runs/val".to_string())
}
fn d_project_predict() -> Option<String> {
    Some("runs/predict".to_string())
}
fn d_project_track() -> Option<String> {
    Some("runs/track".to_string())
}
fn d_project_benchmark() -> Option<String> {
    Some("runs/benchmark".to_string())
}
fn d_project_solution() -> Option<String> {
    Some("runs/solution".to_string())
}
