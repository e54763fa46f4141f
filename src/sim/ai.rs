//! Reactive AI for a side: paddle tracking and building purchases
//!
//! The paddle chases the ball's y plus a random offset that is re-rolled every
//! half second or so. When the ball is behind the paddle it backs away instead
//! of tracking, so it cannot scoop balls it has already missed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::economy::purchase;
use super::geometry::base_zone_point;
use super::state::{BuildingKind, GameState, Side};
use crate::consts::*;

/// Per-side AI memory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiController {
    pub side: Side,
    /// Vertical bias added to the ball's y when tracking
    pub offset: f32,
    /// Countdown until the offset is re-rolled
    pub offset_timer: f32,
    /// Building bought on the next successful placement
    pub next_purchase: BuildingKind,
}

impl AiController {
    pub fn new(side: Side, rng: &mut impl Rng) -> Self {
        Self {
            side,
            offset: 0.0,
            offset_timer: 0.0,
            next_purchase: random_kind(rng),
        }
    }

    /// Advance the offset timer, re-rolling once it drops below `elapsed`
    pub fn reroll_offset(&mut self, elapsed: f32, rng: &mut impl Rng) {
        self.offset_timer -= elapsed;
        if self.offset_timer < elapsed {
            self.offset_timer = rng.random::<f32>() * AI_REROLL_SPAN + AI_REROLL_MIN;
            self.offset = rng.random::<f32>() * 2.0 * AI_OFFSET_RANGE - AI_OFFSET_RANGE;
        }
    }
}

fn random_kind(rng: &mut impl Rng) -> BuildingKind {
    BuildingKind::ALL[rng.random_range(0..BuildingKind::ALL.len())]
}

/// Run one frame of AI for `side`: steer its paddle and maybe buy a building
pub fn drive(state: &mut GameState, side: Side, elapsed: f32) {
    let mut ai = match side {
        Side::Left => state.left_ai,
        Side::Right => state.right_ai,
    };

    ai.reroll_offset(elapsed, &mut state.rng);
    steer_paddle(state, &ai, elapsed);
    try_build(state, &mut ai);

    match side {
        Side::Left => state.left_ai = ai,
        Side::Right => state.right_ai = ai,
    }
}

/// Returns true if the ball has already passed `side`'s paddle
fn ball_behind_paddle(state: &GameState, side: Side) -> bool {
    let paddle_x = state.paddle(side).pos.x;
    match side {
        Side::Left => state.ball.pos.x <= paddle_x,
        Side::Right => state.ball.pos.x >= paddle_x,
    }
}

fn steer_paddle(state: &mut GameState, ai: &AiController, elapsed: f32) {
    let target = state.ball.pos.y + ai.offset;
    let step = AI_PADDLE_SPEED * elapsed;
    let behind = ball_behind_paddle(state, ai.side);

    let paddle = match ai.side {
        Side::Left => &mut state.left_paddle,
        Side::Right => &mut state.right_paddle,
    };

    if !behind {
        paddle.move_toward(target, step);
    } else if paddle.pos.y < target {
        paddle.pos.y = target.min(paddle.pos.y - step);
    } else {
        paddle.pos.y = target.max(paddle.pos.y + step);
    }
}

/// Search the base strip for a free spot and buy the queued building there.
///
/// The queued kind is redrawn whenever a free spot is found, even if the
/// purchase itself is then rejected for lack of money.
fn try_build(state: &mut GameState, ai: &mut AiController) {
    if state.purse(ai.side).money < BuildingKind::cheapest_price() {
        return;
    }

    for _ in 0..AI_PLACEMENT_TRIES {
        let u = state.rng.random::<f32>();
        let v = state.rng.random::<f32>();
        let pos = base_zone_point(ai.side, u, v);
        if state.overlaps_any_building(pos, BUILDING_RADIUS) {
            continue;
        }

        purchase(state, ai.side, ai.next_purchase, pos);
        ai.next_purchase = random_kind(&mut state.rng);
        return;
    }

    log::debug!("{:?} AI found no free building spot", ai.side);
}
