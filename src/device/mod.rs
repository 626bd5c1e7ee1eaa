//! Accelerator detection for default device resolution.

use std::env;
use std::path::Path;

/// Device string passed to the tool when an accelerator is present.
pub const ACCELERATOR: &str = "cuda";
/// Fallback device string.
pub const CPU: &str = "cpu";

/// Capability probe consulted when a request leaves `device` unset.
///
/// Injected into the argument translator so tests can pin the answer
/// instead of depending on the host's driver state.
pub trait DeviceProbe: Send + Sync {
    fn accelerator_available(&self) -> bool;
}

/// Probe backed by host evidence: the NVIDIA driver's procfs entry on
/// Linux, or `nvidia-smi` reachable on `PATH` elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl DeviceProbe for SystemProbe {
    fn accelerator_available(&self) -> bool {
        if Path::new("/proc/driver/nvidia/version").exists() {
            return true;
        }
        let name = if cfg!(windows) { "nvidia-smi.exe" } else { "nvidia-smi" };
        on_path(name)
    }
}

fn on_path(name: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(name).is_file()))
        .unwrap_or(false)
}

/// Resolve the device string for a probe result.
pub fn resolve(probe: &dyn DeviceProbe) -> &'static str {
    if probe.accelerator_available() {
        ACCELERATOR
    } else {
        CPU
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(bool);
    impl DeviceProbe for Fixed {
        fn accelerator_available(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_resolve_accelerator() {
        assert_eq!(resolve(&Fixed(true)), "cuda");
    }

    #[test]
    fn test_resolve_cpu() {
        assert_eq!(resolve(&Fixed(false)), "cpu");
    }
}
