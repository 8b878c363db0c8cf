use portfolio_fx_protocol::{ClassToken, DomCommand, StyleProperty, Target};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ParticleConfig;
use crate::effects::reveal::format_secs;

/// Randomized presentation of one background particle.
///
/// Motion itself comes from the stylesheet's keyframes; the per-particle
/// delay only desynchronizes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSpec {
    pub left_pct: f64,
    pub top_pct: f64,
    pub delay_secs: f64,
    pub size_px: f64,
    pub opacity: f64,
}

impl ParticleSpec {
    fn sample<R: Rng + ?Sized>(config: &ParticleConfig, rng: &mut R) -> Self {
        Self {
            left_pct: unit(rng) * 100.0,
            top_pct: unit(rng) * 100.0,
            delay_secs: unit(rng) * config.max_delay_secs,
            size_px: config.min_size_px + unit(rng) * config.size_range_px,
            opacity: config.min_opacity + unit(rng) * config.opacity_range,
        }
    }

    /// Create particle `index` under the particle field and style it.
    pub fn commands(&self, index: usize) -> Vec<DomCommand> {
        let target = Target::Particle(index);
        let size = format!("{}px", self.size_px);
        vec![
            DomCommand::Spawn {
                target,
                class: ClassToken::Particle,
                parent: Some(Target::ParticleField),
            },
            DomCommand::style(target, StyleProperty::Left, format!("{}%", self.left_pct)),
            DomCommand::style(target, StyleProperty::Top, format!("{}%", self.top_pct)),
            DomCommand::style(
                target,
                StyleProperty::AnimationDelay,
                format_secs(self.delay_secs),
            ),
            DomCommand::style(target, StyleProperty::Width, size.as_str()),
            DomCommand::style(target, StyleProperty::Height, size),
            DomCommand::style(target, StyleProperty::Opacity, self.opacity.to_string()),
        ]
    }
}

/// Sample `config.count` particles.
pub fn generate<R: Rng + ?Sized>(config: &ParticleConfig, rng: &mut R) -> Vec<ParticleSpec> {
    (0..config.count)
        .map(|_| ParticleSpec::sample(config, rng))
        .collect()
}

/// Commands that populate the particle field with `specs`.
pub fn field_commands(specs: &[ParticleSpec]) -> Vec<DomCommand> {
    specs
        .iter()
        .enumerate()
        .flat_map(|(i, spec)| spec.commands(i))
        .collect()
}

/// Pause particle animations while the document is hidden.
pub fn play_state(count: usize, hidden: bool) -> Vec<DomCommand> {
    let state = if hidden { "paused" } else { "running" };
    (0..count)
        .map(|i| DomCommand::style(Target::Particle(i), StyleProperty::AnimationPlayState, state))
        .collect()
}

fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn generation_is_deterministic_per_seed() {
        let config = ParticleConfig::default();
        let a = generate(&config, &mut SmallRng::seed_from_u64(7));
        let b = generate(&config, &mut SmallRng::seed_from_u64(7));
        let c = generate(&config, &mut SmallRng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn samples_stay_in_configured_ranges() {
        let config = ParticleConfig::default();
        let specs = generate(&config, &mut SmallRng::seed_from_u64(42));
        assert_eq!(specs.len(), 50);
        for p in &specs {
            assert!((0.0..100.0).contains(&p.left_pct));
            assert!((0.0..100.0).contains(&p.top_pct));
            assert!((0.0..6.0).contains(&p.delay_secs));
            assert!((1.0..4.0).contains(&p.size_px));
            assert!((0.2..0.8).contains(&p.opacity), "opacity={}", p.opacity);
        }
    }

    #[test]
    fn zero_ranges_collapse_to_minimums() {
        let config = ParticleConfig {
            count: 3,
            max_delay_secs: 0.0,
            size_range_px: 0.0,
            opacity_range: 0.0,
            ..ParticleConfig::default()
        };
        for p in generate(&config, &mut SmallRng::seed_from_u64(1)) {
            assert_eq!(p.delay_secs, 0.0);
            assert_eq!(p.size_px, 1.0);
            assert_eq!(p.opacity, 0.2);
        }
    }

    #[test]
    fn field_spawns_each_particle_under_the_container() {
        let config = ParticleConfig {
            count: 2,
            ..ParticleConfig::default()
        };
        let specs = generate(&config, &mut SmallRng::seed_from_u64(3));
        let cmds = field_commands(&specs);
        let spawned: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                DomCommand::Spawn {
                    target,
                    parent: Some(Target::ParticleField),
                    class: ClassToken::Particle,
                } => Some(*target),
                _ => None,
            })
            .collect();
        assert_eq!(spawned, vec![Target::Particle(0), Target::Particle(1)]);
        assert_eq!(cmds.len(), 14);
    }

    #[test]
    fn play_state_follows_visibility() {
        assert_eq!(
            play_state(1, true),
            vec![DomCommand::style(
                Target::Particle(0),
                StyleProperty::AnimationPlayState,
                "paused"
            )]
        );
        assert_eq!(
            play_state(1, false),
            vec![DomCommand::style(
                Target::Particle(0),
                StyleProperty::AnimationPlayState,
                "running"
            )]
        );
    }

    #[test]
    fn play_state_without_particles_is_empty() {
        assert!(play_state(0, true).is_empty());
        assert!(play_state(0, false).is_empty());
    }
}
