//! Collision detection and response
//!
//! Box-vs-box everywhere. The ball bounces off the axis of smaller
//! penetration; bouncing off a vertical face also warps the y velocity by how
//! far from center the ball struck, which is what gives paddles their "spin".

use glam::Vec2;

use super::geometry::{overlap_rect, overlaps};
use super::state::{Ball, BuildingKind, DamageCause, DestroyCause, GameEvent, GameState, Side};
use crate::consts::*;
use crate::mix;

/// Which face of an obstacle the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounce {
    /// Top or bottom face; y velocity flipped
    Horizontal,
    /// Left or right face; x velocity flipped and y velocity warped
    Vertical,
}

/// Bounce the ball off a solid box, if they overlap
pub fn ball_box_bounce(ball: &mut Ball, center: Vec2, radius: Vec2) -> Option<Bounce> {
    let (min, max) = overlap_rect(center, radius, ball.pos, BALL_RADIUS)?;

    if max.x - min.x > max.y - min.y {
        // Wider overlap in x, so bounce in y
        if ball.pos.y > center.y {
            ball.pos.y = center.y + radius.y + BALL_RADIUS.y;
            ball.vel.y = ball.vel.y.abs();
        } else {
            ball.pos.y = center.y - radius.y - BALL_RADIUS.y;
            ball.vel.y = -ball.vel.y.abs();
        }
        Some(Bounce::Horizontal)
    } else {
        if ball.pos.x > center.x {
            ball.pos.x = center.x + radius.x + BALL_RADIUS.x;
            ball.vel.x = ball.vel.x.abs();
        } else {
            ball.pos.x = center.x - radius.x - BALL_RADIUS.x;
            ball.vel.x = -ball.vel.x.abs();
        }
        let warp = (ball.pos.y - center.y) / (radius.y + BALL_RADIUS.y);
        ball.vel.y = mix(ball.vel.y, warp, BOUNCE_WARP);
        Some(Bounce::Vertical)
    }
}

/// Bounce the ball off both paddles, left first
pub fn ball_vs_paddles(state: &mut GameState) {
    let (left, right) = (state.left_paddle.pos, state.right_paddle.pos);
    ball_box_bounce(&mut state.ball, left, PADDLE_RADIUS);
    ball_box_bounce(&mut state.ball, right, PADDLE_RADIUS);
}

/// Ball against buildings. Walls bounce the ball; every building the ball
/// touches is destroyed.
pub fn ball_vs_buildings(state: &mut GameState) {
    let ball = &mut state.ball;
    let events = &mut state.events;

    state.buildings.retain(|building| {
        if !overlaps(ball.pos, BALL_RADIUS, building.pos, BUILDING_RADIUS) {
            return true;
        }
        if building.kind == BuildingKind::Wall {
            ball_box_bounce(ball, building.pos, BUILDING_RADIUS);
        }
        events.push(GameEvent::BuildingDestroyed {
            owner: building.owner,
            kind: building.kind,
            cause: DestroyCause::Ball,
        });
        false
    });
}

/// Keep the ball in the court. Crossing a side's edge while heading outward
/// damages that side.
pub fn ball_vs_court(state: &mut GameState) {
    let limit = COURT_RADIUS - BALL_RADIUS;
    let ball = &mut state.ball;

    if ball.pos.y > limit.y {
        ball.pos.y = limit.y;
        if ball.vel.y > 0.0 {
            ball.vel.y = -ball.vel.y;
        }
    }
    if ball.pos.y < -limit.y {
        ball.pos.y = -limit.y;
        if ball.vel.y < 0.0 {
            ball.vel.y = -ball.vel.y;
        }
    }

    let mut scored_on = None;
    if ball.pos.x > limit.x {
        ball.pos.x = limit.x;
        if ball.vel.x > 0.0 {
            ball.vel.x = -ball.vel.x;
            scored_on = Some(Side::Right);
        }
    }
    if ball.pos.x < -limit.x {
        ball.pos.x = -limit.x;
        if ball.vel.x < 0.0 {
            ball.vel.x = -ball.vel.x;
            scored_on = Some(Side::Left);
        }
    }

    if let Some(side) = scored_on {
        state.damage(side, BALL_DAMAGE, DamageCause::Ball);
    }
}

/// Resolve bullets against the far edge, paddles and buildings.
///
/// Left bullets are resolved before right bullets, each in spawn order. A
/// bullet stops at the first thing it hits. Buildings destroyed by one bullet
/// cannot stop a later one.
pub fn bullets_vs_world(state: &mut GameState) {
    let mut bullet_alive = vec![true; state.bullets.len()];
    let mut building_alive = vec![true; state.buildings.len()];
    let edge = COURT_RADIUS.x - BULLET_RADIUS.x;

    for owner in [Side::Left, Side::Right] {
        for (i, bullet) in state.bullets.iter().enumerate() {
            if bullet.owner != owner {
                continue;
            }

            if bullet.pos.x * owner.forward() > edge {
                bullet_alive[i] = false;
                let side = owner.opponent();
                match side {
                    Side::Left => state.left.damage(BULLET_DAMAGE),
                    Side::Right => state.right.damage(BULLET_DAMAGE),
                }
                state.events.push(GameEvent::SideDamaged {
                    side,
                    amount: BULLET_DAMAGE,
                    cause: DamageCause::Bullet,
                });
                continue;
            }

            let hits_paddle = [state.left_paddle.pos, state.right_paddle.pos]
                .iter()
                .any(|&p| overlaps(p, PADDLE_RADIUS, bullet.pos, BULLET_RADIUS));
            if hits_paddle {
                bullet_alive[i] = false;
                continue;
            }

            let hit = state.buildings.iter().enumerate().find(|(j, b)| {
                building_alive[*j] && overlaps(b.pos, BUILDING_RADIUS, bullet.pos, BULLET_RADIUS)
            });
            if let Some((j, building)) = hit {
                bullet_alive[i] = false;
                if !building.is_wall() {
                    building_alive[j] = false;
                    state.events.push(GameEvent::BuildingDestroyed {
                        owner: building.owner,
                        kind: building.kind,
                        cause: DestroyCause::Bullet,
                    });
                }
            }
        }
    }

    let mut alive = bullet_alive.into_iter();
    state.bullets.retain(|_| alive.next().unwrap_or(true));
    let mut alive = building_alive.into_iter();
    state.buildings.retain(|_| alive.next().unwrap_or(true));
}

/// Move bullets along their firing direction
pub fn move_bullets(state: &mut GameState, elapsed: f32) {
    for bullet in state.bullets.iter_mut() {
        bullet.pos.x += elapsed * BULLET_SPEED * bullet.owner.forward();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Building, Bullet, Purse};

    #[test]
    fn test_head_on_paddle_bounce() {
        let mut state = GameState::new(1);
        let paddle = state.right_paddle.pos;
        state.ball.pos = Vec2::new(paddle.x - PADDLE_RADIUS.x - BALL_RADIUS.x + 0.05, paddle.y);
        state.ball.vel = Vec2::new(1.0, 0.4);

        ball_vs_paddles(&mut state);
        assert!(state.ball.vel.x < 0.0);
        assert!((state.ball.vel.x.abs() - 1.0).abs() < 1e-6);
        // Centered hit blends y velocity toward zero
        assert!((state.ball.vel.y - 0.1).abs() < 1e-6);
        assert!(state.ball.pos.x <= paddle.x - PADDLE_RADIUS.x - BALL_RADIUS.x + 1e-6);
    }

    #[test]
    fn test_off_center_hit_adds_spin() {
        let mut ball = Ball {
            pos: Vec2::new(-0.35, 0.6),
            vel: Vec2::new(1.0, 0.0),
        };
        let bounce = ball_box_bounce(&mut ball, Vec2::ZERO, PADDLE_RADIUS);
        assert_eq!(bounce, Some(Bounce::Vertical));
        assert!(ball.vel.x < 0.0);
        let expected = 0.75 * 0.6 / (PADDLE_RADIUS.y + BALL_RADIUS.y);
        assert!((ball.vel.y - expected).abs() < 1e-5);
    }

    #[test]
    fn test_top_face_bounce() {
        let mut ball = Ball {
            pos: Vec2::new(0.0, 1.1),
            vel: Vec2::new(0.3, -1.0),
        };
        let bounce = ball_box_bounce(&mut ball, Vec2::ZERO, PADDLE_RADIUS);
        assert_eq!(bounce, Some(Bounce::Horizontal));
        assert!(ball.vel.y > 0.0);
        assert_eq!(ball.vel.x, 0.3);
        assert!((ball.pos.y - (PADDLE_RADIUS.y + BALL_RADIUS.y)).abs() < 1e-6);
    }

    #[test]
    fn test_no_bounce_when_apart() {
        let mut ball = Ball {
            pos: Vec2::new(3.0, 0.0),
            vel: Vec2::new(-1.0, 0.0),
        };
        assert_eq!(ball_box_bounce(&mut ball, Vec2::ZERO, PADDLE_RADIUS), None);
        assert_eq!(ball.vel, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_ball_destroys_buildings_and_bounces_off_walls() {
        let mut state = GameState::new(1);
        state.buildings.push(Building::new(Side::Left, BuildingKind::Farm, Vec2::new(-5.0, 3.0)));
        state.buildings.push(Building::new(Side::Right, BuildingKind::Wall, Vec2::new(2.0, 0.0)));
        state.buildings.push(Building::new(Side::Left, BuildingKind::Shooter, Vec2::new(-5.0, -3.0)));

        state.ball.pos = Vec2::new(1.6, 0.0);
        state.ball.vel = Vec2::new(1.0, 0.0);
        ball_vs_buildings(&mut state);

        assert_eq!(state.buildings.len(), 2);
        assert!(state.buildings.iter().all(|b| b.kind != BuildingKind::Wall));
        assert!(state.ball.vel.x < 0.0);

        state.ball.pos = Vec2::new(-5.0, 2.6);
        let vel = Vec2::new(-1.0, 0.5);
        state.ball.vel = vel;
        ball_vs_buildings(&mut state);
        assert_eq!(state.buildings.len(), 1);
        assert_eq!(state.buildings[0].kind, BuildingKind::Shooter);
        // Non-wall buildings do not deflect the ball
        assert_eq!(state.ball.vel, vel);
    }

    #[test]
    fn test_ball_clears_adjacent_buildings_in_one_pass() {
        let mut state = GameState::new(1);
        state.buildings.push(Building::new(Side::Right, BuildingKind::Farm, Vec2::new(4.0, 0.0)));
        state.buildings.push(Building::new(Side::Right, BuildingKind::Shooter, Vec2::new(4.0, 0.6)));
        state.buildings.push(Building::new(Side::Right, BuildingKind::Farm, Vec2::new(5.0, 3.0)));

        // Touches both of the first two buildings
        state.ball.pos = Vec2::new(4.0, 0.3);
        state.ball.vel = Vec2::new(1.0, 0.0);
        ball_vs_buildings(&mut state);

        assert_eq!(state.buildings.len(), 1);
        assert_eq!(state.buildings[0].pos, Vec2::new(5.0, 3.0));
        let destroyed: Vec<_> = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BuildingDestroyed { cause: DestroyCause::Ball, .. }))
            .collect();
        assert_eq!(destroyed.len(), 2);
        assert_eq!(state.ball.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_court_edge_damage() {
        let mut state = GameState::new(1);
        state.ball.pos = Vec2::new(COURT_RADIUS.x, 0.0);
        state.ball.vel = Vec2::new(1.0, 0.0);
        ball_vs_court(&mut state);
        assert_eq!(state.right.health, STARTING_HEALTH - BALL_DAMAGE);
        assert!(state.ball.vel.x < 0.0);
        assert_eq!(state.ball.pos.x, COURT_RADIUS.x - BALL_RADIUS.x);

        // Already heading back in: clamp only
        state.ball.pos = Vec2::new(COURT_RADIUS.x, 0.0);
        ball_vs_court(&mut state);
        assert_eq!(state.right.health, STARTING_HEALTH - BALL_DAMAGE);

        state.ball.pos = Vec2::new(0.0, -COURT_RADIUS.y);
        state.ball.vel = Vec2::new(0.0, -1.0);
        ball_vs_court(&mut state);
        assert!(state.ball.vel.y > 0.0);
        assert_eq!(state.left, Purse::default());
    }

    #[test]
    fn test_bullet_crossing_edge_damages_enemy() {
        let mut state = GameState::new(1);
        state.right.health = 3;
        state.bullets.push(Bullet { pos: Vec2::new(COURT_RADIUS.x, 0.0), owner: Side::Left });
        state.bullets.push(Bullet { pos: Vec2::new(COURT_RADIUS.x - 0.05, 2.0), owner: Side::Left });
        state.bullets.push(Bullet { pos: Vec2::new(-COURT_RADIUS.x, 0.0), owner: Side::Right });

        bullets_vs_world(&mut state);
        assert!(state.bullets.is_empty());
        assert_eq!(state.right.health, 0);
        assert_eq!(state.left.health, STARTING_HEALTH - BULLET_DAMAGE);
    }

    #[test]
    fn test_bullet_stopped_by_paddle() {
        let mut state = GameState::new(1);
        let paddle = state.right_paddle.pos;
        state.bullets.push(Bullet { pos: paddle, owner: Side::Left });
        bullets_vs_world(&mut state);
        assert!(state.bullets.is_empty());
        assert_eq!(state.right.health, STARTING_HEALTH);
    }

    #[test]
    fn test_bullet_destroys_farm_but_not_wall() {
        let mut state = GameState::new(1);
        state.buildings.push(Building::new(Side::Right, BuildingKind::Farm, Vec2::new(5.0, 0.0)));
        state.buildings.push(Building::new(Side::Right, BuildingKind::Wall, Vec2::new(5.0, 3.0)));
        state.bullets.push(Bullet { pos: Vec2::new(4.7, 0.0), owner: Side::Left });
        state.bullets.push(Bullet { pos: Vec2::new(4.7, 3.0), owner: Side::Left });

        bullets_vs_world(&mut state);
        assert!(state.bullets.is_empty());
        assert_eq!(state.buildings.len(), 1);
        assert_eq!(state.buildings[0].kind, BuildingKind::Wall);
    }

    #[test]
    fn test_destroyed_building_cannot_stop_second_bullet() {
        let mut state = GameState::new(1);
        state.buildings.push(Building::new(Side::Right, BuildingKind::Farm, Vec2::new(5.0, 0.0)));
        state.bullets.push(Bullet { pos: Vec2::new(4.7, 0.0), owner: Side::Left });
        state.bullets.push(Bullet { pos: Vec2::new(4.65, 0.1), owner: Side::Left });

        bullets_vs_world(&mut state);
        assert!(state.buildings.is_empty());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos, Vec2::new(4.65, 0.1));
    }

    #[test]
    fn test_move_bullets() {
        let mut state = GameState::new(1);
        state.bullets.push(Bullet { pos: Vec2::ZERO, owner: Side::Left });
        state.bullets.push(Bullet { pos: Vec2::ZERO, owner: Side::Right });
        move_bullets(&mut state, 0.5);
        assert_eq!(state.bullets[0].pos.x, 0.5 * BULLET_SPEED);
        assert_eq!(state.bullets[1].pos.x, -0.5 * BULLET_SPEED);
    }
}
