use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Semantic class tokens resolved to the stylesheet's class names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassToken {
    // Scroll coordinator
    Scrolled,
    Active,
    Visible,

    // Reveal animator
    AosAnimate,
    Lazy,

    // Generated nodes
    Particle,
    CustomCursor,
    CursorTrail,

    // Hero entrance
    FadeIn,
    /// `delay-<n>`, staggering the n-th hero child.
    Delay(u8),
}

impl ClassToken {
    pub fn class_name(self) -> Cow<'static, str> {
        match self {
            Self::Scrolled => Cow::Borrowed("scrolled"),
            Self::Active => Cow::Borrowed("active"),
            Self::Visible => Cow::Borrowed("visible"),
            Self::AosAnimate => Cow::Borrowed("aos-animate"),
            Self::Lazy => Cow::Borrowed("lazy"),
            Self::Particle => Cow::Borrowed("particle"),
            Self::CustomCursor => Cow::Borrowed("custom-cursor"),
            Self::CursorTrail => Cow::Borrowed("cursor-trail"),
            Self::FadeIn => Cow::Borrowed("fade-in"),
            Self::Delay(n) => Cow::Owned(format!("delay-{n}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_names() {
        assert_eq!(ClassToken::Scrolled.class_name(), "scrolled");
        assert_eq!(ClassToken::AosAnimate.class_name(), "aos-animate");
        assert_eq!(ClassToken::CursorTrail.class_name(), "cursor-trail");
    }

    #[test]
    fn delay_is_numbered() {
        assert_eq!(ClassToken::Delay(3).class_name(), "delay-3");
    }
}
