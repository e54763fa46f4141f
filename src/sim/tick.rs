//! Per-frame simulation update
//!
//! Advances the round by one variable timestep. The order of the passes below
//! decides which response wins when several could apply in the same frame, so
//! keep it stable.

use super::ai;
use super::collision::{ball_vs_buildings, ball_vs_court, ball_vs_paddles, bullets_vs_world, move_bullets};
use super::economy::{accrue_income, run_cooldowns};
use super::state::{GameEvent, GamePhase, GameState, Side};

/// Per-frame inputs that are not events
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Let the AI play the left side too (demo/soak mode)
    pub left_autopilot: bool,
}

/// Advance the game state by `elapsed` seconds. Negative steps count as zero;
/// non-finite steps are ignored.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed: f32) {
    state.events.clear();

    // A finished round waits for the driver to reset it
    if matches!(state.phase, GamePhase::RoundOver { .. }) {
        return;
    }

    if !elapsed.is_finite() {
        log::warn!("Ignoring non-finite frame step {elapsed}");
        return;
    }
    let elapsed = elapsed.max(0.0);

    state.round_time += elapsed;

    // Paddles and purchases
    ai::drive(state, Side::Right, elapsed);
    if input.left_autopilot {
        ai::drive(state, Side::Left, elapsed);
    }

    accrue_income(state, elapsed);

    state.left_paddle.clamp_to_court();
    state.right_paddle.clamp_to_court();

    // Ball
    let speed = state.ball_speed();
    state.ball.pos += elapsed * speed * state.ball.vel;

    run_cooldowns(state, elapsed);
    move_bullets(state, elapsed);

    // Collisions
    ball_vs_paddles(state);
    ball_vs_buildings(state);
    ball_vs_court(state);
    bullets_vs_world(state);

    state.trail.record(state.ball.pos, elapsed);

    if let Some(loser) = state.defeated_side() {
        log::info!(
            "Round over after {:.1}s: {:?} defeated ({} - {})",
            state.round_time,
            loser,
            state.left.health,
            state.right.health
        );
        state.phase = GamePhase::RoundOver { loser };
        state.events.push(GameEvent::RoundOver { loser });
    }
}
