use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift both coordinates by `-delta`, used to center a follower of
    /// size `2 * delta` on the pointer.
    pub fn centered(self, delta: f64) -> Self {
        Self::new(self.x - delta, self.y - delta)
    }
}

/// Logical handle for an element the page script touches.
///
/// Indexed variants refer to the n-th match of the corresponding selector
/// in document order, as queried by the host when the page boots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Header,
    NavLink(usize),
    /// The n-th `section[id]`.
    Section(usize),
    ScrollIndicator,
    Subtitle,
    ParticleField,
    Particle(usize),
    /// Elements revealed by the scroll coordinator.
    ScrollReveal(usize),
    /// Elements revealed by the entrance observer.
    EntranceReveal(usize),
    LazyImage(usize),
    ProjectCard(usize),
    HeroItem(usize),
    Cursor,
    CursorTrail,
}

/// Inline style properties written by the effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleProperty {
    Position,
    Left,
    Top,
    Width,
    Height,
    Opacity,
    Background,
    Border,
    BorderRadius,
    PointerEvents,
    ZIndex,
    Transition,
    Transform,
    MixBlendMode,
    AnimationDelay,
    AnimationPlayState,
}

impl StyleProperty {
    /// The CSS property name as accepted by `CSSStyleDeclaration.setProperty`.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Left => "left",
            Self::Top => "top",
            Self::Width => "width",
            Self::Height => "height",
            Self::Opacity => "opacity",
            Self::Background => "background",
            Self::Border => "border",
            Self::BorderRadius => "border-radius",
            Self::PointerEvents => "pointer-events",
            Self::ZIndex => "z-index",
            Self::Transition => "transition",
            Self::Transform => "transform",
            Self::MixBlendMode => "mix-blend-mode",
            Self::AnimationDelay => "animation-delay",
            Self::AnimationPlayState => "animation-play-state",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

impl ScrollBehavior {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Instant => "instant",
        }
    }
}
