//! Read-only view of a frame for the rendering layer
//!
//! Nothing here mutates the simulation. The renderer draws boxes, so every
//! entity is exported as a center plus half-extent.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::mix;
use crate::sim::{BuildingKind, GameState, Side, can_place};

/// RGBA8 color
pub type Rgba = [u8; 4];

/// Palette
pub mod palette {
    use super::Rgba;

    pub const BACKGROUND: Rgba = [0x19, 0x3b, 0x59, 0xff];
    pub const FOREGROUND: Rgba = [0xf2, 0xd2, 0xb6, 0xff];
    pub const SHADOW: Rgba = [0xf2, 0xad, 0x94, 0xff];
    pub const VALID: Rgba = [0x00, 0xff, 0x00, 0x80];
    pub const INVALID: Rgba = [0xff, 0x00, 0x00, 0x80];
    pub const MONEY: Rgba = [0xff, 0xee, 0x00, 0xff];
    pub const SHOOTER_OUTER: Rgba = [0xff, 0xff, 0xff, 0xff];
    pub const SHOOTER_INNER: Rgba = [0x00, 0x00, 0x00, 0xff];
    pub const WALL: Rgba = [0xff, 0xff, 0xff, 0xff];
    pub const WALL_PREVIEW: Rgba = [0xff, 0xff, 0xff, 0x80];
    pub const FARM_FIELD: Rgba = [0x0d, 0xb5, 0x07, 0xff];
    pub const FARM_ROAD: Rgba = [0xbd, 0x6f, 0x17, 0xff];
    /// Trail gradient, newest first
    pub const TRAIL: [Rgba; 3] = [
        [0xf2, 0xad, 0x94, 0x88],
        [0xf2, 0x89, 0x72, 0x88],
        [0xba, 0xca, 0xc0, 0x88],
    ];
}

/// A box to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxSprite {
    pub pos: Vec2,
    pub radius: Vec2,
}

/// A building to draw; the renderer picks the shape from `kind`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BuildingSprite {
    pub pos: Vec2,
    pub owner: Side,
    pub kind: BuildingKind,
    /// Base fill, then detail (shooter core, farm roads)
    pub colors: [Rgba; 2],
}

/// Fill and detail colors for a building kind
pub fn building_colors(kind: BuildingKind) -> [Rgba; 2] {
    match kind {
        BuildingKind::Shooter => [palette::SHOOTER_OUTER, palette::SHOOTER_INNER],
        BuildingKind::Wall => [palette::WALL, palette::WALL],
        BuildingKind::Farm => [palette::FARM_FIELD, palette::FARM_ROAD],
    }
}

/// One motion-blur copy of the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailSprite {
    pub pos: Vec2,
    pub color: Rgba,
}

/// Translucent building preview under the cursor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacementPreview {
    pub kind: BuildingKind,
    pub pos: Vec2,
    /// Affordable, not overlapping, inside the left base zone
    pub valid: bool,
}

impl PlacementPreview {
    pub fn color(&self) -> Rgba {
        if self.valid { palette::VALID } else { palette::INVALID }
    }
}

/// Per-side HUD numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub money: u32,
    pub health: u32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub court_radius: Vec2,
    pub left_paddle: BoxSprite,
    pub right_paddle: BoxSprite,
    pub ball: BoxSprite,
    pub building_radius: Vec2,
    pub buildings: Vec<BuildingSprite>,
    pub bullet_radius: Vec2,
    pub bullets: Vec<Vec2>,
    /// Oldest first, so later sprites draw on top
    pub trail: Vec<TrailSprite>,
    pub preview: Option<PlacementPreview>,
    pub left: Hud,
    pub right: Hud,
}

impl RenderSnapshot {
    /// Capture the current state. `trail_steps` controls how many blurred
    /// copies of the ball are produced.
    pub fn capture(state: &GameState, trail_steps: u32) -> Self {
        Self {
            court_radius: COURT_RADIUS,
            left_paddle: BoxSprite {
                pos: state.left_paddle.pos,
                radius: PADDLE_RADIUS,
            },
            right_paddle: BoxSprite {
                pos: state.right_paddle.pos,
                radius: PADDLE_RADIUS,
            },
            ball: BoxSprite {
                pos: state.ball.pos,
                radius: BALL_RADIUS,
            },
            building_radius: BUILDING_RADIUS,
            buildings: state
                .buildings
                .iter()
                .map(|b| BuildingSprite {
                    pos: b.pos,
                    owner: b.owner,
                    kind: b.kind,
                    colors: building_colors(b.kind),
                })
                .collect(),
            bullet_radius: BULLET_RADIUS,
            bullets: state.bullets.iter().map(|b| b.pos).collect(),
            trail: trail_sprites(state, trail_steps),
            preview: placement_preview(state),
            left: Hud {
                money: state.left.money,
                health: state.left.health,
            },
            right: Hud {
                money: state.right.money,
                health: state.right.health,
            },
        }
    }
}

/// Preview for the human player's current cursor mode
pub fn placement_preview(state: &GameState) -> Option<PlacementPreview> {
    let kind = state.cursor_mode.building()?;
    Some(PlacementPreview {
        kind,
        pos: state.cursor_pos,
        valid: can_place(state, Side::Left, kind, state.cursor_pos),
    })
}

/// Resample the trail at `steps` evenly spaced ages, oldest first. Stops early
/// if the recorded trail is shorter than the horizon.
pub fn trail_sprites(state: &GameState, steps: u32) -> Vec<TrailSprite> {
    let horizon = state.trail.horizon();
    (1..=steps)
        .rev()
        .map_while(|step| {
            let age = step as f32 / steps as f32 * horizon;
            let pos = state.trail.sample(age)?;
            Some(TrailSprite {
                pos,
                color: trail_color(step, steps),
            })
        })
        .collect()
}

/// Gradient color for a trail step (step 1 is the newest)
fn trail_color(step: u32, steps: u32) -> Rgba {
    let colors = &palette::TRAIL;
    let c = if steps > 1 {
        (step - 1) as f32 / (steps - 1) as f32 * colors.len() as f32
    } else {
        0.0
    };
    let mut ci = c.floor() as i32;
    let mut cf = c - ci as f32;
    if ci < 0 {
        ci = 0;
        cf = 0.0;
    }
    let last = colors.len() as i32 - 2;
    if ci > last {
        ci = last;
        cf = 1.0;
    }
    let (a, b) = (colors[ci as usize], colors[ci as usize + 1]);
    std::array::from_fn(|i| mix(a[i] as f32, b[i] as f32, cf) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{CursorMode, TickInput, tick};

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(2);
        state.right.money = 0;
        tick(&mut state, &TickInput::default(), 0.05);
        let snap = RenderSnapshot::capture(&state, 20);
        assert_eq!(snap.ball.pos, state.ball.pos);
        assert_eq!(snap.buildings.len(), state.buildings.len());
        assert_eq!(snap.left.health, STARTING_HEALTH);
        assert!(snap.preview.is_none());
        assert!(serde_json::to_string(&snap).is_ok());
    }

    #[test]
    fn test_trail_sprites_cover_horizon() {
        let mut state = GameState::new(2);
        state.right.money = 0;
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        }
        let sprites = trail_sprites(&state, 20);
        assert_eq!(sprites.len(), 20);
        // Newest sprite sits one step behind the ball
        let newest = sprites.last().unwrap();
        assert!(newest.pos.distance(state.ball.pos) < 1.0);
        assert_eq!(sprites[0].color, palette::TRAIL[2]);
        assert_eq!(newest.color, palette::TRAIL[0]);
    }

    #[test]
    fn test_trail_color_clamps_to_last_pair() {
        assert_eq!(trail_color(20, 20), palette::TRAIL[2]);
        assert_eq!(trail_color(1, 20), palette::TRAIL[0]);
    }

    #[test]
    fn test_preview_validity() {
        let mut state = GameState::new(2);
        state.cursor_mode = CursorMode::Placing(BuildingKind::Farm);
        state.cursor_pos = Vec2::new(-COURT_RADIUS.x + 1.0, 0.0);
        state.left.money = FARM_PRICE;
        let preview = placement_preview(&state).unwrap();
        assert!(preview.valid);
        assert_eq!(preview.color(), palette::VALID);

        state.left.money = FARM_PRICE - 1;
        assert!(!placement_preview(&state).unwrap().valid);

        state.left.money = FARM_PRICE;
        state.cursor_pos = Vec2::ZERO;
        assert!(!placement_preview(&state).unwrap().valid);
    }
}
