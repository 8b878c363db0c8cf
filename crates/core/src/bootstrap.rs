use serde::{Deserialize, Serialize};

use crate::config::PageConfig;

/// Facts about the hosting window that decide which optional components run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostEnvironment {
    /// `innerWidth` in CSS pixels.
    pub viewport_width: f64,
    /// `location.hostname`.
    pub hostname: String,
}

/// Optional components enabled for this page view. The scroll, navigation,
/// reveal, typewriter and particle components always run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentPlan {
    /// Pointer followers, desktop-width viewports only.
    pub cursor: bool,
    /// Performance telemetry, local development only.
    pub monitor: bool,
}

pub fn plan(config: &PageConfig, env: &HostEnvironment) -> ComponentPlan {
    ComponentPlan {
        cursor: env.viewport_width > config.cursor.min_viewport_width,
        monitor: config
            .monitor
            .dev_hosts
            .iter()
            .any(|host| host == &env.hostname),
    }
}
