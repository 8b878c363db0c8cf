pub mod cursor;
pub mod navigation;
pub mod particles;
pub mod reveal;
pub mod scroll;
pub mod typewriter;

pub use cursor::CursorEffect;
pub use navigation::ScrollIndicator;
pub use particles::ParticleSpec;
pub use reveal::{EntranceReveal, LazyImages, RevealLatch};
pub use scroll::{FrameGate, ScrollCoordinator};
pub use typewriter::{Tick, Typewriter, TypewriterError};
