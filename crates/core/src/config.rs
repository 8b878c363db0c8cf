use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("typewriter.phrases must not be empty")]
    NoPhrases,
    #[error("{field} must be a finite, non-negative number (got {value})")]
    Negative { field: &'static str, value: f64 },
}

/// Every tunable of the page script.
///
/// All sections default to the values the stylesheet was designed
/// against; a JSON document only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub scroll: ScrollConfig,
    pub navigation: NavigationConfig,
    pub typewriter: TypewriterConfig,
    pub particles: ParticleConfig,
    pub cursor: CursorConfig,
    pub monitor: MonitorConfig,
    pub reveal: RevealConfig,
    pub selectors: Selectors,
    /// `tracing` level filter for console output.
    pub log_level: LogLevel,
}

impl PageConfig {
    /// Parse and validate a (possibly partial) JSON config.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.typewriter.phrases.is_empty() {
            return Err(ConfigError::NoPhrases);
        }
        let checks = [
            ("scroll.headerThreshold", self.scroll.header_threshold),
            ("scroll.sectionOffset", self.scroll.section_offset),
            ("scroll.revealMargin", self.scroll.reveal_margin),
            ("scroll.indicatorHideAfter", self.scroll.indicator_hide_after),
            ("navigation.scrollOffset", self.navigation.scroll_offset),
            ("particles.maxDelaySecs", self.particles.max_delay_secs),
            ("particles.minSizePx", self.particles.min_size_px),
            ("particles.sizeRangePx", self.particles.size_range_px),
            ("particles.minOpacity", self.particles.min_opacity),
            ("particles.opacityRange", self.particles.opacity_range),
            ("cursor.minViewportWidth", self.cursor.min_viewport_width),
            ("cursor.cursorSize", self.cursor.cursor_size),
            ("cursor.trailSize", self.cursor.trail_size),
            ("monitor.fpsWindowMs", self.monitor.fps_window_ms),
            ("reveal.cardStaggerSecs", self.reveal.card_stagger_secs),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollConfig {
    /// Header gets `scrolled` strictly above this offset.
    pub header_threshold: f64,
    /// Sections count as active this many pixels before their top.
    pub section_offset: f64,
    /// Reveal once an element's top is this far above the viewport bottom.
    pub reveal_margin: f64,
    /// Scroll indicator fades out strictly above this offset.
    pub indicator_hide_after: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_threshold: 50.0,
            section_offset: 100.0,
            reveal_margin: 150.0,
            indicator_hide_after: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationConfig {
    /// Clearance left above a section when navigating to it (fixed header).
    pub scroll_offset: f64,
    /// Section id the scroll indicator jumps to.
    pub indicator_section: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scroll_offset: 70.0,
            indicator_section: "projects".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypewriterConfig {
    pub phrases: Vec<String>,
    pub start_delay_ms: u32,
    pub type_delay_ms: u32,
    pub delete_delay_ms: u32,
    /// Pause with the full phrase on screen.
    pub read_pause_ms: u32,
    /// Pause on the empty line before the next phrase.
    pub next_phrase_pause_ms: u32,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Web Developer & Data Enthusiast".to_string(),
                "Deep Learning".to_string(),
                "Full Stack Developer".to_string(),
                "Data Visualization".to_string(),
            ],
            start_delay_ms: 1000,
            type_delay_ms: 100,
            delete_delay_ms: 50,
            read_pause_ms: 2000,
            next_phrase_pause_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleConfig {
    pub count: usize,
    pub max_delay_secs: f64,
    pub min_size_px: f64,
    pub size_range_px: f64,
    pub min_opacity: f64,
    pub opacity_range: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            max_delay_secs: 6.0,
            min_size_px: 1.0,
            size_range_px: 3.0,
            min_opacity: 0.2,
            opacity_range: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CursorConfig {
    /// The cursor effect only runs on viewports strictly wider than this.
    pub min_viewport_width: f64,
    pub cursor_size: f64,
    pub trail_size: f64,
    pub cursor_hover_scale: f64,
    pub trail_hover_scale: f64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            min_viewport_width: 768.0,
            cursor_size: 20.0,
            trail_size: 40.0,
            cursor_hover_scale: 1.5,
            trail_hover_scale: 1.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonitorConfig {
    /// Hostnames treated as local development.
    pub dev_hosts: Vec<String>,
    pub fps_window_ms: f64,
    pub memory_interval_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            dev_hosts: vec!["localhost".to_string(), "127.0.0.1".to_string()],
            fps_window_ms: 1000.0,
            memory_interval_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    /// Intersection ratio that counts as "entered" for entrance elements.
    pub threshold: f64,
    pub root_margin: String,
    pub card_stagger_secs: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            card_stagger_secs: 0.1,
        }
    }
}

/// CSS selectors for the document hooks the script attaches to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub header: String,
    pub nav_links: String,
    pub sections: String,
    pub particle_field: String,
    pub scroll_indicator: String,
    pub subtitle: String,
    pub scroll_reveal: String,
    pub entrance_reveal: String,
    pub lazy_images: String,
    pub project_cards: String,
    pub hero_items: String,
    pub hover_targets: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header: "#header".to_string(),
            nav_links: ".nav-link".to_string(),
            sections: "section[id]".to_string(),
            particle_field: "#particles".to_string(),
            scroll_indicator: ".scroll-indicator".to_string(),
            subtitle: ".hero-subtitle".to_string(),
            scroll_reveal: ".animate-on-scroll".to_string(),
            entrance_reveal: "[data-aos]".to_string(),
            lazy_images: "img[data-src]".to_string(),
            project_cards: ".project-card".to_string(),
            hero_items: ".hero-content > *".to_string(),
            hover_targets: "a, button, .project-card".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}
