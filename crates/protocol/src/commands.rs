use serde::{Deserialize, Serialize};

use crate::classes::ClassToken;
use crate::shared_str::SharedStr;
use crate::types::{ScrollBehavior, StyleProperty, Target};

/// A single, stateless DOM mutation.
///
/// Effects emit a `Vec<DomCommand>` for each event they handle. The host
/// applies the list in order; a command whose target is absent is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomCommand {
    /// Add (`enabled`) or remove a class.
    SetClass {
        target: Target,
        class: ClassToken,
        enabled: bool,
    },

    /// Write one inline style property.
    SetStyle {
        target: Target,
        property: StyleProperty,
        value: SharedStr,
    },

    /// Replace the element's text content.
    SetText { target: Target, text: SharedStr },

    /// Create a `div` with the given class, registered under `target` and
    /// appended to `parent` (or the document body when `None`).
    Spawn {
        target: Target,
        class: ClassToken,
        parent: Option<Target>,
    },

    /// Copy an image's pending `data-src` into `src`.
    LoadImage { target: Target },

    /// Stop observing the element for viewport intersection.
    Unobserve { target: Target },

    /// Scroll the window to an absolute vertical offset.
    ScrollTo { top: f64, behavior: ScrollBehavior },

    /// Scroll the element into view.
    ScrollIntoView {
        target: Target,
        behavior: ScrollBehavior,
    },
}

impl DomCommand {
    pub fn add_class(target: Target, class: ClassToken) -> Self {
        Self::SetClass {
            target,
            class,
            enabled: true,
        }
    }

    pub fn remove_class(target: Target, class: ClassToken) -> Self {
        Self::SetClass {
            target,
            class,
            enabled: false,
        }
    }

    pub fn style(target: Target, property: StyleProperty, value: impl Into<SharedStr>) -> Self {
        Self::SetStyle {
            target,
            property,
            value: value.into(),
        }
    }

    /// The element this command mutates, if it is element-scoped.
    pub fn target(&self) -> Option<Target> {
        match self {
            Self::SetClass { target, .. }
            | Self::SetStyle { target, .. }
            | Self::SetText { target, .. }
            | Self::Spawn { target, .. }
            | Self::LoadImage { target }
            | Self::Unobserve { target }
            | Self::ScrollIntoView { target, .. } => Some(*target),
            Self::ScrollTo { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_build_set_class() {
        assert_eq!(
            DomCommand::add_class(Target::Header, ClassToken::Scrolled),
            DomCommand::SetClass {
                target: Target::Header,
                class: ClassToken::Scrolled,
                enabled: true,
            }
        );
    }

    #[test]
    fn scroll_to_has_no_target() {
        let cmd = DomCommand::ScrollTo {
            top: 10.0,
            behavior: ScrollBehavior::Smooth,
        };
        assert_eq!(cmd.target(), None);
        assert_eq!(
            DomCommand::LoadImage {
                target: Target::LazyImage(2)
            }
            .target(),
            Some(Target::LazyImage(2))
        );
    }

    #[test]
    fn serializes_externally_tagged() {
        let cmd = DomCommand::style(Target::Particle(0), StyleProperty::Opacity, "0.5");
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.starts_with("{\"SetStyle\""), "json={json}");
        assert!(json.contains("\"0.5\""));
    }
}
