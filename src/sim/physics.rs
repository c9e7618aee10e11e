//! Player integrator: gravity, jump impulse and vertical bounds

use super::state::Player;
use crate::config::GameConfig;

/// Which vertical bound, if any, the player was clamped against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundContact {
    None,
    Ceiling,
    Floor,
}

/// Advance the player by one tick.
///
/// Order matters for feel: velocity is updated before position, then the
/// ceiling clamp, then the floor clamp.
pub fn integrate(mut player: Player, config: &GameConfig) -> (Player, BoundContact) {
    player.velocity += config.gravity;
    player.pos.y += player.velocity;

    if player.pos.y < 0.0 {
        player.pos.y = 0.0;
        player.velocity = 0.0;
        return (player, BoundContact::Ceiling);
    }

    let floor = config.floor_y();
    if player.pos.y > floor {
        player.pos.y = floor;
        player.velocity = 0.0;
        return (player, BoundContact::Floor);
    }

    (player, BoundContact::None)
}

/// Overwrite velocity with the jump impulse. Repeated jumps do not stack.
#[inline]
pub fn jump(mut player: Player, config: &GameConfig) -> Player {
    player.velocity = config.jump_impulse;
    player
}
