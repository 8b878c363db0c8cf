use portfolio_fx_protocol::{DomCommand, ScrollBehavior, StyleProperty, Target};

/// Section id referenced by an in-page link (`"#about"` → `"about"`).
pub fn section_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Smooth scroll that lands `clearance` pixels above the section's top.
/// `None` when the section does not exist.
pub fn scroll_target(section_top: Option<f64>, clearance: f64) -> Option<DomCommand> {
    let top = section_top?;
    Some(DomCommand::ScrollTo {
        top: top - clearance,
        behavior: ScrollBehavior::Smooth,
    })
}

/// The "scroll down" hint in the hero: fades out once the page moves and
/// jumps to a fixed section when clicked.
#[derive(Debug, Clone)]
pub struct ScrollIndicator {
    hide_after: f64,
    hidden: bool,
}

impl ScrollIndicator {
    pub fn new(hide_after: f64) -> Self {
        Self {
            hide_after,
            hidden: false,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn on_scroll(&mut self, scroll_top: f64) -> DomCommand {
        self.hidden = scroll_top > self.hide_after;
        let opacity = if self.hidden { "0" } else { "1" };
        DomCommand::style(Target::ScrollIndicator, StyleProperty::Opacity, opacity)
    }

    /// `section` is the index of the destination section, if it is on the page.
    pub fn on_click(&self, section: Option<usize>) -> Option<DomCommand> {
        section.map(|i| DomCommand::ScrollIntoView {
            target: Target::Section(i),
            behavior: ScrollBehavior::Smooth,
        })
    }
}
