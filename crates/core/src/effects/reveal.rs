use portfolio_fx_protocol::{ClassToken, DomCommand, StyleProperty, Target};

/// A growable set of one-way latches, one per observed element.
#[derive(Debug, Clone, Default)]
pub struct RevealLatch {
    set: Vec<bool>,
}

impl RevealLatch {
    /// Latch `index`. Returns `true` only on the first call for that index.
    pub fn set(&mut self, index: usize) -> bool {
        if index >= self.set.len() {
            self.set.resize(index + 1, false);
        }
        !std::mem::replace(&mut self.set[index], true)
    }

    pub fn is_set(&self, index: usize) -> bool {
        self.set.get(index).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.set.iter().filter(|s| **s).count()
    }
}

/// Entrance animations: elements gain `aos-animate` the first time they
/// intersect the viewport. The observer keeps watching them; later
/// intersections produce nothing.
#[derive(Debug, Clone, Default)]
pub struct EntranceReveal {
    animated: RevealLatch,
}

impl EntranceReveal {
    pub fn on_intersect(&mut self, index: usize, intersecting: bool) -> Option<DomCommand> {
        if !intersecting || !self.animated.set(index) {
            return None;
        }
        Some(DomCommand::add_class(
            Target::EntranceReveal(index),
            ClassToken::AosAnimate,
        ))
    }

    pub fn is_animated(&self, index: usize) -> bool {
        self.animated.is_set(index)
    }
}

/// Lazy images: the real source is assigned once, on first intersection,
/// and the image is dropped from observation.
#[derive(Debug, Clone, Default)]
pub struct LazyImages {
    loaded: RevealLatch,
}

impl LazyImages {
    pub fn on_intersect(&mut self, index: usize, intersecting: bool) -> Vec<DomCommand> {
        if !intersecting || !self.loaded.set(index) {
            return Vec::new();
        }
        tracing::debug!(index, "loading lazy image");
        let target = Target::LazyImage(index);
        vec![
            DomCommand::LoadImage { target },
            DomCommand::remove_class(target, ClassToken::Lazy),
            DomCommand::Unobserve { target },
        ]
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.loaded.is_set(index)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.count()
    }
}

/// Staggered `animation-delay` for project cards: `index * step` seconds.
pub fn stagger_cards(count: usize, step_secs: f64) -> Vec<DomCommand> {
    (0..count)
        .map(|i| {
            DomCommand::style(
                Target::ProjectCard(i),
                StyleProperty::AnimationDelay,
                format_secs(i as f64 * step_secs),
            )
        })
        .collect()
}

/// Hero children fade in; every child after the first gets `delay-<index>`.
pub fn hero_entrance(count: usize) -> Vec<DomCommand> {
    let mut commands = Vec::with_capacity(count * 2);
    for i in 0..count {
        let target = Target::HeroItem(i);
        commands.push(DomCommand::add_class(target, ClassToken::FadeIn));
        if i > 0
            && let Ok(n) = u8::try_from(i)
        {
            commands.push(DomCommand::add_class(target, ClassToken::Delay(n)));
        }
    }
    commands
}

/// Seconds as a CSS time, rounded to milliseconds so `3 * 0.1` prints `0.3s`.
pub(crate) fn format_secs(secs: f64) -> String {
    let rounded = (secs * 1000.0).round() / 1000.0;
    format!("{rounded}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_reports_first_set_only() {
        let mut latch = RevealLatch::default();
        assert!(!latch.is_set(4));
        assert!(latch.set(4));
        assert!(!latch.set(4));
        assert!(latch.is_set(4));
        assert!(!latch.is_set(3));
        assert_eq!(latch.count(), 1);
    }

    #[test]
    fn entrance_animates_once() {
        let mut reveal = EntranceReveal::default();
        assert_eq!(reveal.on_intersect(0, false), None);
        assert_eq!(
            reveal.on_intersect(0, true),
            Some(DomCommand::add_class(
                Target::EntranceReveal(0),
                ClassToken::AosAnimate
            ))
        );
        // Leaving and re-entering the viewport keeps the element animated.
        assert_eq!(reveal.on_intersect(0, false), None);
        assert_eq!(reveal.on_intersect(0, true), None);
        assert!(reveal.is_animated(0));
    }

    #[test]
    fn lazy_image_loads_exactly_once() {
        let mut images = LazyImages::default();
        let first = images.on_intersect(2, true);
        assert_eq!(
            first,
            vec![
                DomCommand::LoadImage {
                    target: Target::LazyImage(2)
                },
                DomCommand::remove_class(Target::LazyImage(2), ClassToken::Lazy),
                DomCommand::Unobserve {
                    target: Target::LazyImage(2)
                },
            ]
        );
        assert!(images.on_intersect(2, true).is_empty());
        assert!(images.is_loaded(2));
        assert!(!images.is_loaded(1));
        assert_eq!(images.loaded_count(), 1);
    }

    #[test]
    fn non_intersecting_entries_do_not_load() {
        let mut images = LazyImages::default();
        assert!(images.on_intersect(0, false).is_empty());
        assert!(!images.is_loaded(0));
    }

    #[test]
    fn card_delays_step_by_a_tenth() {
        let cmds = stagger_cards(4, 0.1);
        let values: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                DomCommand::SetStyle { value, .. } => Some(value.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(values, vec!["0s", "0.1s", "0.2s", "0.3s"]);
    }

    #[test]
    fn hero_first_child_has_no_delay() {
        let cmds = hero_entrance(3);
        assert_eq!(
            cmds,
            vec![
                DomCommand::add_class(Target::HeroItem(0), ClassToken::FadeIn),
                DomCommand::add_class(Target::HeroItem(1), ClassToken::FadeIn),
                DomCommand::add_class(Target::HeroItem(1), ClassToken::Delay(1)),
                DomCommand::add_class(Target::HeroItem(2), ClassToken::FadeIn),
                DomCommand::add_class(Target::HeroItem(2), ClassToken::Delay(2)),
            ]
        );
    }
}
