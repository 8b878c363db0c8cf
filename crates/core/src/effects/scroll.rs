use portfolio_fx_protocol::{ClassToken, DomCommand, SharedStr, Target};

use crate::config::ScrollConfig;
use crate::effects::reveal::RevealLatch;
use crate::model::ScrollSnapshot;

/// Coalesces bursts of events into at most one refresh per rendering frame.
#[derive(Debug, Clone, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// Returns `true` when the caller must request an animation frame;
    /// `false` when one is already queued.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Clear the pending flag at the start of the frame callback.
    pub fn begin_frame(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Derives header, navigation, and scroll-reveal state from the scroll offset.
///
/// The host calls [`on_scroll`](Self::on_scroll) for every scroll event and,
/// when it returns `true`, schedules one animation frame that samples a
/// [`ScrollSnapshot`] and calls [`refresh`](Self::refresh).
#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    config: ScrollConfig,
    /// `href` of each navigation link, in document order.
    links: Vec<SharedStr>,
    gate: FrameGate,
    revealed: RevealLatch,
    header_scrolled: bool,
    active_section: Option<SharedStr>,
}

impl ScrollCoordinator {
    pub fn new(config: ScrollConfig, links: Vec<SharedStr>) -> Self {
        Self {
            config,
            links,
            gate: FrameGate::default(),
            revealed: RevealLatch::default(),
            header_scrolled: false,
            active_section: None,
        }
    }

    pub fn on_scroll(&mut self) -> bool {
        self.gate.request()
    }

    pub fn is_pending(&self) -> bool {
        self.gate.is_pending()
    }

    pub fn header_scrolled(&self) -> bool {
        self.header_scrolled
    }

    /// Id of the section matched by the most recent refresh that matched one.
    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.is_set(index)
    }

    /// Recompute all scroll-derived state. Header, navigation, and reveal
    /// updates always run together and in this order.
    pub fn refresh(&mut self, snapshot: &ScrollSnapshot) -> Vec<DomCommand> {
        self.gate.begin_frame();

        let mut commands = Vec::with_capacity(1 + self.links.len() + snapshot.reveals.len());
        self.update_header(snapshot, &mut commands);
        self.update_navigation(snapshot, &mut commands);
        self.update_reveals(snapshot, &mut commands);
        commands
    }

    fn update_header(&mut self, snapshot: &ScrollSnapshot, commands: &mut Vec<DomCommand>) {
        self.header_scrolled = snapshot.scroll_top > self.config.header_threshold;
        commands.push(DomCommand::SetClass {
            target: Target::Header,
            class: ClassToken::Scrolled,
            enabled: self.header_scrolled,
        });
    }

    fn update_navigation(&mut self, snapshot: &ScrollSnapshot, commands: &mut Vec<DomCommand>) {
        // Overlapping ranges: the last section in document order wins.
        let Some(section) = snapshot
            .sections
            .iter()
            .rev()
            .find(|s| s.contains(snapshot.scroll_top, self.config.section_offset))
        else {
            return;
        };

        if self.active_section.as_ref() != Some(&section.id) {
            tracing::debug!(section = %section.id, "active section changed");
        }
        for (i, href) in self.links.iter().enumerate() {
            commands.push(DomCommand::SetClass {
                target: Target::NavLink(i),
                class: ClassToken::Active,
                enabled: href_targets(href, &section.id),
            });
        }
        self.active_section = Some(section.id.clone());
    }

    fn update_reveals(&mut self, snapshot: &ScrollSnapshot, commands: &mut Vec<DomCommand>) {
        let line = snapshot.viewport_height - self.config.reveal_margin;
        for candidate in &snapshot.reveals {
            if candidate.top < line && self.revealed.set(candidate.key) {
                commands.push(DomCommand::add_class(
                    Target::ScrollReveal(candidate.key),
                    ClassToken::Visible,
                ));
            }
        }
    }
}

fn href_targets(href: &str, section_id: &str) -> bool {
    href.strip_prefix('#') == Some(section_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RevealCandidate, SectionBounds};

    fn coordinator() -> ScrollCoordinator {
        let links = ["#home", "#about", "#projects"]
            .into_iter()
            .map(SharedStr::from)
            .collect();
        ScrollCoordinator::new(ScrollConfig::default(), links)
    }

    fn page(scroll_top: f64) -> ScrollSnapshot {
        ScrollSnapshot {
            sections: vec![
                SectionBounds::new("home", 0.0, 700.0),
                SectionBounds::new("about", 700.0, 500.0),
                SectionBounds::new("projects", 1200.0, 900.0),
            ],
            ..ScrollSnapshot::at(scroll_top, 800.0)
        }
    }

    fn active_links(commands: &[DomCommand]) -> Vec<usize> {
        commands
            .iter()
            .filter_map(|c| match c {
                DomCommand::SetClass {
                    target: Target::NavLink(i),
                    class: ClassToken::Active,
                    enabled: true,
                } => Some(*i),
                _ => None,
            })
            .collect()
    }

    /// Candidates keyed by their position, as on a page that never changes.
    fn in_order(tops: &[f64]) -> Vec<RevealCandidate> {
        tops.iter()
            .enumerate()
            .map(|(key, &top)| RevealCandidate::new(key, top))
            .collect()
    }

    fn revealed_keys(commands: &[DomCommand]) -> Vec<usize> {
        commands
            .iter()
            .filter_map(|c| match c {
                DomCommand::SetClass {
                    target: Target::ScrollReveal(key),
                    class: ClassToken::Visible,
                    enabled: true,
                } => Some(*key),
                _ => None,
            })
            .collect()
    }

    fn header_state(commands: &[DomCommand]) -> Option<bool> {
        commands.iter().find_map(|c| match c {
            DomCommand::SetClass {
                target: Target::Header,
                class: ClassToken::Scrolled,
                enabled,
            } => Some(*enabled),
            _ => None,
        })
    }

    #[test]
    fn header_scrolled_strictly_above_threshold() {
        let mut sc = coordinator();
        for (offset, expected) in [(0.0, false), (50.0, false), (50.5, true), (3000.0, true)] {
            let cmds = sc.refresh(&ScrollSnapshot::at(offset, 800.0));
            assert_eq!(header_state(&cmds), Some(expected), "offset={offset}");
            assert_eq!(sc.header_scrolled(), expected);
        }
    }

    #[test]
    fn exactly_one_link_active() {
        let mut sc = coordinator();
        // about spans [600, 1100) after the 100px lead.
        let cmds = sc.refresh(&page(650.0));
        assert_eq!(active_links(&cmds), vec![1]);
        let updated: Vec<_> = cmds
            .iter()
            .filter(|c| matches!(c.target(), Some(Target::NavLink(_))))
            .collect();
        assert_eq!(updated.len(), 3);
        assert_eq!(sc.active_section(), Some("about"));

        let cmds = sc.refresh(&page(1100.0));
        assert_eq!(active_links(&cmds), vec![2]);
    }

    #[test]
    fn no_matching_section_leaves_links_alone() {
        let mut sc = coordinator();
        sc.refresh(&page(650.0));
        let cmds = sc.refresh(&page(5000.0));
        assert!(active_links(&cmds).is_empty());
        assert!(!cmds.iter().any(|c| matches!(c.target(), Some(Target::NavLink(_)))));
        assert_eq!(sc.active_section(), Some("about"));
    }

    #[test]
    fn overlapping_sections_last_wins() {
        let mut sc = coordinator();
        let snapshot = ScrollSnapshot {
            sections: vec![
                SectionBounds::new("about", 100.0, 1000.0),
                SectionBounds::new("projects", 300.0, 1000.0),
            ],
            ..ScrollSnapshot::at(400.0, 800.0)
        };
        let cmds = sc.refresh(&snapshot);
        assert_eq!(active_links(&cmds), vec![2]);
    }

    #[test]
    fn reveal_is_one_way() {
        let mut sc = coordinator();
        let mut snapshot = ScrollSnapshot::at(0.0, 800.0);
        // Reveal line is 800 - 150 = 650.
        snapshot.reveals = in_order(&[100.0, 649.0, 650.0, 2000.0]);
        let cmds = sc.refresh(&snapshot);
        assert_eq!(revealed_keys(&cmds), vec![0, 1]);

        // Scrolling back up pushes the elements below the line again.
        snapshot.scroll_top = 1000.0;
        snapshot.reveals = in_order(&[900.0, 1500.0, 500.0, 3000.0]);
        let cmds = sc.refresh(&snapshot);
        assert!(sc.is_revealed(0) && sc.is_revealed(1) && sc.is_revealed(2));
        assert!(!sc.is_revealed(3));
        assert!(!cmds.iter().any(|c| matches!(
            c,
            DomCommand::SetClass {
                class: ClassToken::Visible,
                enabled: false,
                ..
            }
        )));
        // Only the newly crossing element is emitted.
        let visible = cmds
            .iter()
            .filter(|c| matches!(c.target(), Some(Target::ScrollReveal(_))))
            .count();
        assert_eq!(visible, 1);
    }

    #[test]
    fn reveal_follows_elements_when_the_candidate_list_changes() {
        let mut sc = coordinator();
        let mut snapshot = ScrollSnapshot::at(0.0, 800.0);
        snapshot.reveals = vec![RevealCandidate::new(0, 100.0)];
        assert_eq!(revealed_keys(&sc.refresh(&snapshot)), vec![0]);

        // A new element is inserted ahead of the revealed one.
        snapshot.reveals = vec![
            RevealCandidate::new(1, 100.0),
            RevealCandidate::new(0, 100.0),
        ];
        assert_eq!(revealed_keys(&sc.refresh(&snapshot)), vec![1]);

        // The first element is removed; the survivor stays revealed.
        snapshot.reveals = vec![RevealCandidate::new(1, 100.0)];
        assert!(revealed_keys(&sc.refresh(&snapshot)).is_empty());
        assert!(sc.is_revealed(0) && sc.is_revealed(1));
    }

    #[test]
    fn burst_of_scroll_events_refreshes_once() {
        let mut sc = coordinator();
        let mut frames_requested = 0;
        for _ in 0..=1000 {
            if sc.on_scroll() {
                frames_requested += 1;
            }
        }
        assert_eq!(frames_requested, 1);
        assert!(sc.is_pending());

        sc.refresh(&page(1000.0));
        assert!(!sc.is_pending());
        assert!(sc.on_scroll());
    }

    #[test]
    fn sub_updates_run_in_fixed_order() {
        let mut sc = coordinator();
        let mut snapshot = page(650.0);
        snapshot.reveals = in_order(&[0.0]);
        let cmds = sc.refresh(&snapshot);
        assert_eq!(cmds.first().and_then(DomCommand::target), Some(Target::Header));
        assert_eq!(cmds.last().and_then(DomCommand::target), Some(Target::ScrollReveal(0)));
    }

    #[test]
    fn href_matching_requires_hash() {
        assert!(href_targets("#about", "about"));
        assert!(!href_targets("about", "about"));
        assert!(!href_targets("#about-me", "about"));
    }
}
