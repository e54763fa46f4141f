//! Money, cooldowns and purchases
//!
//! Cooldowns are countdowns that may roll over several times in one frame;
//! every rollover is counted, though a shooter's volley is capped.

use glam::Vec2;

use super::geometry::in_base_zone;
use super::state::{Building, BuildingKind, Bullet, GameEvent, GameState, Side};
use crate::consts::*;

/// Wind a countdown that went negative forward by whole periods, returning
/// how many periods elapsed. `cooldown` must be finite.
fn roll_over(cooldown: &mut f32, period: f32) -> u32 {
    if *cooldown >= 0.0 {
        return 0;
    }
    // Saturating cast; huge steps pay out u32::MAX at most
    let count = (-*cooldown / period).ceil() as u32;
    *cooldown = cooldown.rem_euclid(period).min(period);
    count.max(1)
}

/// Count down the passive income timer, paying both sides once per rollover
pub fn accrue_income(state: &mut GameState, elapsed: f32) {
    state.income_cooldown -= elapsed;
    let paid = roll_over(&mut state.income_cooldown, INCOME_COOLDOWN);
    state.left.money = state.left.money.saturating_add(paid);
    state.right.money = state.right.money.saturating_add(paid);
}

/// Count down every building's cooldown and fire its effect once per rollover.
/// A shooter fires at most `SHOOTER_MAX_VOLLEY` bullets per frame.
pub fn run_cooldowns(state: &mut GameState, elapsed: f32) {
    let mut spawned = Vec::new();
    let mut farm_income = [0u32; 2];

    for building in state.buildings.iter_mut() {
        building.cooldown -= elapsed;
        let fired = roll_over(&mut building.cooldown, building.kind.cooldown());
        match building.kind {
            BuildingKind::Shooter => {
                spawned.extend(std::iter::repeat_n(muzzle(building), fired.min(SHOOTER_MAX_VOLLEY) as usize));
            }
            BuildingKind::Farm => {
                let income = match building.owner {
                    Side::Left => &mut farm_income[0],
                    Side::Right => &mut farm_income[1],
                };
                *income = income.saturating_add(fired);
            }
            BuildingKind::Wall => {}
        }
    }

    state.left.money = state.left.money.saturating_add(farm_income[0]);
    state.right.money = state.right.money.saturating_add(farm_income[1]);
    for bullet in spawned {
        state.events.push(GameEvent::BulletFired {
            owner: bullet.owner,
            pos: bullet.pos,
        });
        state.bullets.push(bullet);
    }
}

/// Bullet spawned just outside a shooter, on its owner's firing side
fn muzzle(building: &Building) -> Bullet {
    let offset = BUILDING_RADIUS.x + 2.0 * BULLET_RADIUS.x;
    Bullet {
        pos: building.pos + Vec2::new(offset * building.owner.forward(), 0.0),
        owner: building.owner,
    }
}

/// Returns true if `side` could build `kind` at `pos` right now
pub fn can_place(state: &GameState, side: Side, kind: BuildingKind, pos: Vec2) -> bool {
    state.purse(side).money >= kind.price()
        && !state.overlaps_any_building(pos, BUILDING_RADIUS)
        && in_base_zone(side, pos, BUILDING_RADIUS)
}

/// Try to buy `kind` for `side` at `pos`.
///
/// Invalid attempts (not enough money, overlapping, outside the base zone)
/// leave the state untouched and return false.
pub fn purchase(state: &mut GameState, side: Side, kind: BuildingKind, pos: Vec2) -> bool {
    if !can_place(state, side, kind, pos) {
        log::debug!("{side:?} purchase of {kind:?} at {pos} rejected");
        return false;
    }

    state.purse_mut(side).money -= kind.price();
    state.buildings.push(Building::new(side, kind, pos));
    state.events.push(GameEvent::BuildingPlaced { owner: side, kind, pos });
    log::debug!("{side:?} placed {kind:?} at {pos}");
    true
}
