pub mod metrics;
pub mod scroll;
pub mod typewriter;

pub use metrics::PerfMetrics;
pub use scroll::{RevealCandidate, ScrollSnapshot, SectionBounds};
pub use typewriter::{TypeMode, TypewriterState};
