use crate::config::MonitorConfig;
use crate::model::PerfMetrics;

const BYTES_PER_MIB: f64 = 1_048_576.0;

/// Counts animation frames and reports a rate once per window.
#[derive(Debug, Clone)]
pub struct FrameRateSampler {
    window_ms: f64,
    window_start: f64,
    frames: u32,
}

impl FrameRateSampler {
    pub fn new(window_ms: f64, now: f64) -> Self {
        Self {
            window_ms,
            window_start: now,
            frames: 0,
        }
    }

    /// Record one frame at `now` (ms). Returns the frame rate when the
    /// current window has lasted at least `window_ms`, then starts a new one.
    pub fn tick(&mut self, now: f64) -> Option<u32> {
        self.frames += 1;
        let elapsed = now - self.window_start;
        if elapsed < self.window_ms || elapsed <= 0.0 {
            return None;
        }
        let fps = (f64::from(self.frames) * 1000.0 / elapsed).round() as u32;
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

/// Development-only telemetry: frame rate, heap usage and load time.
#[derive(Debug, Clone)]
pub struct PerformanceMonitor {
    metrics: PerfMetrics,
    sampler: FrameRateSampler,
}

impl PerformanceMonitor {
    pub fn new(config: &MonitorConfig, now: f64) -> Self {
        Self {
            metrics: PerfMetrics::default(),
            sampler: FrameRateSampler::new(config.fps_window_ms, now),
        }
    }

    pub fn metrics(&self) -> PerfMetrics {
        self.metrics
    }

    pub fn record_frame(&mut self, now: f64) {
        if let Some(fps) = self.sampler.tick(now) {
            self.metrics.fps = fps;
            tracing::trace!(fps, "frame rate sampled");
        }
    }

    /// Store used heap bytes as whole MiB.
    pub fn record_memory(&mut self, used_bytes: f64) -> u64 {
        let mb = (used_bytes / BYTES_PER_MIB).round().max(0.0) as u64;
        self.metrics.memory_mb = mb;
        tracing::trace!(memory_mb = mb, "heap sampled");
        mb
    }

    /// Store the load time and return the line logged for it.
    pub fn record_load(&mut self, load_time_ms: f64) -> String {
        self.metrics.load_time_ms = load_time_ms;
        format!("Page loaded in {load_time_ms:.2}ms")
    }
}

/// When the page finished loading: the navigation entry's `loadEventStart`
/// if the browser recorded one, else `now`. Browsers report 0 until the load
/// event has begun.
pub fn load_time(load_event_start: Option<f64>, now: f64) -> f64 {
    load_event_start
        .filter(|t| t.is_finite() && *t > 0.0)
        .unwrap_or(now)
}
