//! Draw primitives projected from a game snapshot
//!
//! Pure function of the state; nothing here feeds back into the simulation.

use glam::Vec2;

use super::vertex::{Color, colors};
use crate::sim::{GamePhase, GameState, Obstacle};

/// Spacing of the background guide lines
const GUIDE_SPACING: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    FillRect { min: Vec2, max: Vec2, color: Color },
    StrokeRect { min: Vec2, max: Vec2, width: f32, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
}

/// Build the draw list for one frame, back to front
pub fn frame(state: &GameState, high_contrast: bool) -> Vec<DrawCommand> {
    let config = &state.config;
    let size = Vec2::new(config.field_width, config.field_height);
    let mut commands = Vec::with_capacity(8 + state.obstacles.len() * 2);

    commands.push(DrawCommand::FillRect {
        min: Vec2::ZERO,
        max: size,
        color: colors::BACKGROUND,
    });

    if !high_contrast {
        let mut y = GUIDE_SPACING;
        while y < config.field_height {
            commands.push(DrawCommand::Line {
                from: Vec2::new(0.0, y),
                to: Vec2::new(config.field_width, y),
                width: 1.0,
                color: colors::GUIDE,
            });
            y += GUIDE_SPACING;
        }
    }

    for obstacle in &state.obstacles {
        snake(obstacle, high_contrast, &mut commands);
    }

    let player_color = match (state.phase, high_contrast) {
        (GamePhase::Over, _) => colors::PLAYER_DEAD,
        (_, true) => colors::PLAYER_CONTRAST,
        _ => colors::PLAYER,
    };
    commands.push(DrawCommand::FillCircle {
        center: state.player.pos,
        radius: config.player_radius,
        color: player_color,
    });

    commands.push(DrawCommand::StrokeRect {
        min: Vec2::ZERO,
        max: size,
        width: 2.0,
        color: colors::BORDER,
    });

    commands
}

/// Body rectangle with a round head on the leading (left) end
fn snake(obstacle: &Obstacle, high_contrast: bool, out: &mut Vec<DrawCommand>) {
    let bounds = obstacle.bounds();
    let color = if high_contrast {
        colors::SNAKE_CONTRAST
    } else {
        colors::SNAKE
    };
    out.push(DrawCommand::FillRect {
        min: bounds.min,
        max: bounds.max,
        color,
    });
    out.push(DrawCommand::FillCircle {
        center: Vec2::new(bounds.min.x, obstacle.pos.y),
        radius: obstacle.width / 2.0,
        color: colors::SNAKE_HEAD,
    });
}
