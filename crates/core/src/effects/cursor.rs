use portfolio_fx_protocol::{ClassToken, DomCommand, Point, StyleProperty, Target};

use crate::config::CursorConfig;

/// Two pointer followers: a filled dot and a larger ring trailing it.
#[derive(Debug, Clone)]
pub struct CursorEffect {
    config: CursorConfig,
    position: Option<Point>,
    hovering: bool,
}

impl CursorEffect {
    pub fn new(config: CursorConfig) -> Self {
        Self {
            config,
            position: None,
            hovering: false,
        }
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Create both followers on the document body.
    pub fn spawn_commands(&self) -> Vec<DomCommand> {
        let mut commands = Vec::with_capacity(20);
        follower(
            &mut commands,
            Target::Cursor,
            ClassToken::CustomCursor,
            self.config.cursor_size,
            &[
                (StyleProperty::Background, "rgba(0, 245, 255, 0.8)"),
                (StyleProperty::ZIndex, "9999"),
                (StyleProperty::Transition, "transform 0.1s ease"),
                (StyleProperty::MixBlendMode, "difference"),
            ],
        );
        follower(
            &mut commands,
            Target::CursorTrail,
            ClassToken::CursorTrail,
            self.config.trail_size,
            &[
                (StyleProperty::Border, "2px solid rgba(0, 245, 255, 0.3)"),
                (StyleProperty::ZIndex, "9998"),
                (StyleProperty::Transition, "transform 0.2s ease"),
            ],
        );
        commands
    }

    /// Center both followers on the pointer.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Vec<DomCommand> {
        let pointer = Point::new(x, y);
        self.position = Some(pointer);
        let dot = pointer.centered(self.config.cursor_size / 2.0);
        let ring = pointer.centered(self.config.trail_size / 2.0);
        vec![
            DomCommand::style(Target::Cursor, StyleProperty::Left, px(dot.x)),
            DomCommand::style(Target::Cursor, StyleProperty::Top, px(dot.y)),
            DomCommand::style(Target::CursorTrail, StyleProperty::Left, px(ring.x)),
            DomCommand::style(Target::CursorTrail, StyleProperty::Top, px(ring.y)),
        ]
    }

    /// Grow the followers over interactive elements, restore on leave.
    pub fn set_hover(&mut self, hovering: bool) -> Vec<DomCommand> {
        self.hovering = hovering;
        let (dot, ring) = if hovering {
            (self.config.cursor_hover_scale, self.config.trail_hover_scale)
        } else {
            (1.0, 1.0)
        };
        vec![
            DomCommand::style(Target::Cursor, StyleProperty::Transform, format!("scale({dot})")),
            DomCommand::style(
                Target::CursorTrail,
                StyleProperty::Transform,
                format!("scale({ring})"),
            ),
        ]
    }
}

fn follower(
    commands: &mut Vec<DomCommand>,
    target: Target,
    class: ClassToken,
    size: f64,
    extra: &[(StyleProperty, &'static str)],
) {
    commands.push(DomCommand::Spawn {
        target,
        class,
        parent: None,
    });
    let size = px(size);
    commands.push(DomCommand::style(target, StyleProperty::Position, "fixed"));
    commands.push(DomCommand::style(target, StyleProperty::Width, size.as_str()));
    commands.push(DomCommand::style(target, StyleProperty::Height, size));
    commands.push(DomCommand::style(target, StyleProperty::BorderRadius, "50%"));
    commands.push(DomCommand::style(target, StyleProperty::PointerEvents, "none"));
    for &(property, value) in extra {
        commands.push(DomCommand::style(target, property, value));
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style_of(cmds: &[DomCommand], target: Target, property: StyleProperty) -> Option<String> {
        cmds.iter().find_map(|c| match c {
            DomCommand::SetStyle {
                target: t,
                property: p,
                value,
            } if *t == target && *p == property => Some(value.to_string()),
            _ => None,
        })
    }

    #[test]
    fn followers_are_centered_on_pointer() {
        let mut cursor = CursorEffect::new(CursorConfig::default());
        let cmds = cursor.on_pointer_move(300.0, 200.0);
        assert_eq!(style_of(&cmds, Target::Cursor, StyleProperty::Left).as_deref(), Some("290px"));
        assert_eq!(style_of(&cmds, Target::Cursor, StyleProperty::Top).as_deref(), Some("190px"));
        assert_eq!(
            style_of(&cmds, Target::CursorTrail, StyleProperty::Left).as_deref(),
            Some("280px")
        );
        assert_eq!(
            style_of(&cmds, Target::CursorTrail, StyleProperty::Top).as_deref(),
            Some("180px")
        );
        assert_eq!(cursor.position(), Some(Point::new(300.0, 200.0)));
    }

    #[test]
    fn hover_scales_and_restores() {
        let mut cursor = CursorEffect::new(CursorConfig::default());
        let on = cursor.set_hover(true);
        assert!(cursor.is_hovering());
        assert_eq!(
            style_of(&on, Target::Cursor, StyleProperty::Transform).as_deref(),
            Some("scale(1.5)")
        );
        assert_eq!(
            style_of(&on, Target::CursorTrail, StyleProperty::Transform).as_deref(),
            Some("scale(1.2)")
        );
        let off = cursor.set_hover(false);
        assert!(!cursor.is_hovering());
        assert_eq!(
            style_of(&off, Target::Cursor, StyleProperty::Transform).as_deref(),
            Some("scale(1)")
        );
    }

    #[test]
    fn spawn_creates_both_followers_on_body() {
        let cursor = CursorEffect::new(CursorConfig::default());
        let cmds = cursor.spawn_commands();
        let spawned: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                DomCommand::Spawn {
                    target,
                    parent: None,
                    ..
                } => Some(*target),
                _ => None,
            })
            .collect();
        assert_eq!(spawned, vec![Target::Cursor, Target::CursorTrail]);
        assert_eq!(
            style_of(&cmds, Target::CursorTrail, StyleProperty::Width).as_deref(),
            Some("40px")
        );
        assert_eq!(
            style_of(&cmds, Target::Cursor, StyleProperty::PointerEvents).as_deref(),
            Some("none")
        );
    }
}
