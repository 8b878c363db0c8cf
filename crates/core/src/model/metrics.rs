use serde::{Deserialize, Serialize};

/// Latest telemetry samples of the performance monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerfMetrics {
    /// Frames per second over the last completed window.
    pub fps: u32,
    /// Used JS heap in MiB, when the platform exposes it.
    pub memory_mb: u64,
    /// Milliseconds from navigation start to the window `load` event.
    pub load_time_ms: f64,
}
