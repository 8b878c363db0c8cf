use portfolio_fx_protocol::SharedStr;
use serde::{Deserialize, Serialize};

/// Vertical extent of one `section[id]`, in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub id: SharedStr,
    /// `offsetTop` in pixels.
    pub offset_top: f64,
    /// `offsetHeight` in pixels.
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<SharedStr>, offset_top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            offset_top,
            height,
        }
    }

    /// Whether `scroll_top` lies in `[offset_top - lead, offset_top - lead + height)`.
    pub fn contains(&self, scroll_top: f64, lead: f64) -> bool {
        let top = self.offset_top - lead;
        scroll_top >= top && scroll_top < top + self.height
    }
}

/// Everything the scroll refresh reads from the page, sampled once per frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollSnapshot {
    /// Window vertical offset (`scrollY`), never negative.
    pub scroll_top: f64,
    /// `innerHeight`.
    pub viewport_height: f64,
    /// Sections in document order.
    pub sections: Vec<SectionBounds>,
    /// Scroll-reveal candidates currently in the document.
    pub reveals: Vec<RevealCandidate>,
}

/// One scroll-reveal element as seen in a single frame.
///
/// `key` is assigned by the host when it first sees the element and stays
/// with that element for the life of the page, whatever its position in
/// later queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealCandidate {
    pub key: usize,
    /// Viewport-relative top (`getBoundingClientRect().top`).
    pub top: f64,
}

impl RevealCandidate {
    pub fn new(key: usize, top: f64) -> Self {
        Self { key, top }
    }
}

impl ScrollSnapshot {
    pub fn at(scroll_top: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top: scroll_top.max(0.0),
            viewport_height,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let s = SectionBounds::new("about", 600.0, 400.0);
        assert!(!s.contains(499.9, 100.0));
        assert!(s.contains(500.0, 100.0));
        assert!(s.contains(899.9, 100.0));
        assert!(!s.contains(900.0, 100.0));
    }

    #[test]
    fn snapshot_clamps_overscroll() {
        // Rubber-band scrolling on some platforms reports negative offsets.
        assert_eq!(ScrollSnapshot::at(-12.0, 800.0).scroll_top, 0.0);
    }
}
