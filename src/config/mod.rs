//! Layered key/value configuration: defaults, rc file, environment.

use std::{
    collections::HashMap,
    env, fs,
    io::{BufRead, BufReader},
    path::PathBuf,
    time::Duration,
};

use directories::BaseDirs;

use crate::process::DEFAULT_TIMEOUT;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let mut map = default_map();
        let config_path = default_config_path();

        // Read .ultradrc if exists
        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        // ENV first
        if let Ok(v) = env::var(key) {
            return Some(v);
        }
        self.inner.get(key).cloned()
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse::<u64>().ok())
    }

    /// Executable invoked for every task.
    pub fn bin(&self) -> String {
        self.get("YOLO_BIN").unwrap_or_else(|| "yolo".to_string())
    }

    /// Wall-clock budget per task invocation.
    pub fn command_timeout(&self) -> Duration {
        self.get_u64("COMMAND_TIMEOUT")
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn http_host(&self) -> String {
        self.get("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string())
    }

    pub fn http_port(&self) -> u16 {
        self.get_u64("HTTP_PORT").map(|p| p as u16).unwrap_or(8000)
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &["YOLO_BIN", "HTTP_HOST", "HTTP_PORT", "COMMAND_TIMEOUT"];
    KEYS.contains(&k) || k.starts_with("ULTRAD_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("ultrad").join(".ultradrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("YOLO_BIN".into(), "yolo".into());
    m.insert("HTTP_HOST".into(), "0.0.0.0".into());
    m.insert("HTTP_PORT".into(), "8000".into());
    m.insert("COMMAND_TIMEOUT".into(), DEFAULT_TIMEOUT.as_secs().to_string());
    m
}
