//! Parameter-to-CLI-argument translation.
//!
//! Requests arrive as an ordered map of already-validated values plus an
//! open-ended `extra` map. Primary parameters become `--key value` pairs
//! (bare `--key` for `true` booleans); extras use the tool's secondary
//! `key=value` syntax. Values are not validated here.

use serde_json::{Map, Value};

use crate::device::{self, DeviceProbe};

/// Named values for one task invocation.
///
/// `params` holds the task's primary parameters, `extra` the pass-through
/// map accepted by every task. Both preserve the order fields arrived in.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    pub params: Map<String, Value>,
    pub extra: Map<String, Value>,
}

impl ParameterSet {
    pub fn new(params: Map<String, Value>) -> Self {
        Self { params, extra: Map::new() }
    }

    pub fn with_extra(params: Map<String, Value>, extra: Map<String, Value>) -> Self {
        Self { params, extra }
    }
}

/// Convert a parameter set to the ordered CLI token list.
///
/// Null-valued keys emit nothing; `false` booleans emit nothing (the tool
/// has no negation flags). A missing or null `device` is resolved through
/// the probe before emission.
pub fn translate(mut set: ParameterSet, probe: &dyn DeviceProbe) -> Vec<String> {
    let needs_device = match set.params.get("device") {
        None => true,
        Some(Value::Null) => true,
        Some(_) => false,
    };
    if needs_device {
        // Map::insert keeps the original slot when the key already exists.
        set.params
            .insert("device".to_string(), Value::String(device::resolve(probe).to_string()));
    }

    let mut args = Vec::new();
    for (key, value) in &set.params {
        match value {
            Value::Null => {}
            Value::Bool(true) => args.push(format!("--{}", key)),
            Value::Bool(false) => {}
            other => {
                args.push(format!("--{}", key));
                args.push(render(other));
            }
        }
    }
    for (key, value) in &set.extra {
        match value {
            Value::Null => {}
            Value::Bool(true) => args.push(key.clone()),
            Value::Bool(false) => {}
            other => args.push(format!("{}={}", key, render(other))),
        }
    }
    args
}

/// String form of a value token: strings raw, everything else as JSON text.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
