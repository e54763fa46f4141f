//! Game state and core simulation types
//!
//! Everything a round needs lives in [`GameState`]; [`GameState::reset`] is the
//! only way a round starts over.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::AiController;
use super::geometry::overlaps;
use super::trail::Trail;
use crate::consts::*;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal direction this side fires toward (+1 for left, -1 for right)
    pub fn forward(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// A side's health reached zero this frame; the driver must reset
    RoundOver { loser: Side },
}

/// Building kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    /// Fires a bullet toward the enemy every cooldown
    Shooter,
    /// Passive obstacle: bounces the ball, absorbs bullets
    Wall,
    /// Earns its owner one coin every cooldown
    Farm,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 3] = [BuildingKind::Shooter, BuildingKind::Wall, BuildingKind::Farm];

    pub fn price(self) -> u32 {
        match self {
            BuildingKind::Shooter => SHOOTER_PRICE,
            BuildingKind::Wall => WALL_PRICE,
            BuildingKind::Farm => FARM_PRICE,
        }
    }

    /// Cooldown period, also the initial cooldown of a new building
    pub fn cooldown(self) -> f32 {
        match self {
            BuildingKind::Shooter => SHOOTER_COOLDOWN,
            BuildingKind::Wall => WALL_COOLDOWN,
            BuildingKind::Farm => FARM_COOLDOWN,
        }
    }

    /// Cheapest building, used to decide whether a side can buy anything
    pub fn cheapest_price() -> u32 {
        Self::ALL.iter().map(|k| k.price()).min().unwrap_or(0)
    }
}

/// Placement cursor mode for the human player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorMode {
    #[default]
    Normal,
    Placing(BuildingKind),
}

impl CursorMode {
    pub fn building(self) -> Option<BuildingKind> {
        match self {
            CursorMode::Normal => None,
            CursorMode::Placing(kind) => Some(kind),
        }
    }
}

/// A paddle; x is fixed per side, y moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let x = COURT_RADIUS.x - PADDLE_INSET;
        let x = match side {
            Side::Left => -x,
            Side::Right => x,
        };
        Self { pos: Vec2::new(x, 0.0) }
    }

    /// Keep the paddle fully inside the court
    pub fn clamp_to_court(&mut self) {
        let limit = COURT_RADIUS.y - PADDLE_RADIUS.y;
        self.pos.y = self.pos.y.clamp(-limit, limit);
    }

    /// Move toward `target_y`, at most `max_step` this frame
    pub fn move_toward(&mut self, target_y: f32, max_step: f32) {
        if self.pos.y < target_y {
            self.pos.y = target_y.min(self.pos.y + max_step);
        } else {
            self.pos.y = target_y.max(self.pos.y - max_step);
        }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Direction, scaled by the speed multiplier each frame
    pub vel: Vec2,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: BALL_START_DIRECTION,
        }
    }
}

/// A building entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub pos: Vec2,
    pub owner: Side,
    pub kind: BuildingKind,
    /// Seconds until the next effect fires
    pub cooldown: f32,
}

impl Building {
    pub fn new(owner: Side, kind: BuildingKind, pos: Vec2) -> Self {
        Self {
            pos,
            owner,
            kind,
            cooldown: kind.cooldown(),
        }
    }

    pub fn is_wall(&self) -> bool {
        self.kind == BuildingKind::Wall
    }
}

/// A bullet, travelling horizontally away from its owner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub owner: Side,
}

/// Money, health and score for one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purse {
    pub money: u32,
    pub health: u32,
    /// Feeds the ball speed formula; nothing in the core increments it
    pub score: u32,
}

impl Default for Purse {
    fn default() -> Self {
        Self {
            money: STARTING_MONEY,
            health: STARTING_HEALTH,
            score: 0,
        }
    }
}

impl Purse {
    /// Subtract `amount` from health, flooring at zero
    pub fn damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }
}

/// Why a building disappeared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestroyCause {
    Ball,
    Bullet,
}

/// Why a side lost health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageCause {
    Ball,
    Bullet,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BuildingPlaced { owner: Side, kind: BuildingKind, pos: Vec2 },
    BuildingDestroyed { owner: Side, kind: BuildingKind, cause: DestroyCause },
    BulletFired { owner: Side, pos: Vec2 },
    SideDamaged { side: Side, amount: u32, cause: DamageCause },
    RoundOver { loser: Side },
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Seconds of play in the current round
    pub round_time: f32,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub ball: Ball,
    pub trail: Trail,
    /// Buildings in placement order
    pub buildings: Vec<Building>,
    pub bullets: Vec<Bullet>,
    pub left: Purse,
    pub right: Purse,
    /// Countdown to the next passive income tick
    pub income_cooldown: f32,
    pub cursor_pos: Vec2,
    pub cursor_mode: CursorMode,
    /// Controller for the right side
    pub right_ai: AiController,
    /// Controller used for the left side when autopilot is on
    pub left_ai: AiController,
    /// Events recorded by the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new round with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let right_ai = AiController::new(Side::Right, &mut rng);
        let left_ai = AiController::new(Side::Left, &mut rng);
        let ball = Ball::default();
        Self {
            seed,
            rng,
            phase: GamePhase::Playing,
            round_time: 0.0,
            left_paddle: Paddle::new(Side::Left),
            right_paddle: Paddle::new(Side::Right),
            ball,
            trail: Trail::new(ball.pos, TRAIL_LENGTH),
            buildings: Vec::new(),
            bullets: Vec::new(),
            left: Purse::default(),
            right: Purse::default(),
            income_cooldown: INCOME_COOLDOWN,
            cursor_pos: Vec2::ZERO,
            cursor_mode: CursorMode::Normal,
            right_ai,
            left_ai,
            events: Vec::new(),
        }
    }

    /// Start a fresh round: ball, paddles, economy, buildings, bullets and
    /// trail go back to their initial values. The RNG stream and the cursor
    /// carry over.
    pub fn reset(&mut self) {
        let ball = Ball::default();
        self.phase = GamePhase::Playing;
        self.round_time = 0.0;
        self.left_paddle = Paddle::new(Side::Left);
        self.right_paddle = Paddle::new(Side::Right);
        self.ball = ball;
        self.trail = Trail::new(ball.pos, TRAIL_LENGTH);
        self.buildings.clear();
        self.bullets.clear();
        self.left = Purse::default();
        self.right = Purse::default();
        self.income_cooldown = INCOME_COOLDOWN;
        self.right_ai = AiController::new(Side::Right, &mut self.rng);
        self.left_ai = AiController::new(Side::Left, &mut self.rng);
    }

    pub fn purse(&self, side: Side) -> &Purse {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn purse_mut(&mut self, side: Side) -> &mut Purse {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left_paddle,
            Side::Right => &self.right_paddle,
        }
    }

    /// Returns true if a box at `point` would overlap any existing building
    pub fn overlaps_any_building(&self, point: Vec2, radius: Vec2) -> bool {
        self.buildings
            .iter()
            .any(|b| overlaps(b.pos, BUILDING_RADIUS, point, radius))
    }

    /// Apply damage to `side` and record it
    pub fn damage(&mut self, side: Side, amount: u32, cause: DamageCause) {
        self.purse_mut(side).damage(amount);
        self.events.push(GameEvent::SideDamaged { side, amount, cause });
    }

    /// Ball speed multiplier from the combined score
    pub fn ball_speed(&self) -> f32 {
        let total = (self.left.score + self.right.score) as f32;
        (BALL_BASE_SPEED * 2f32.powf(total / 4.0)).min(BALL_MAX_SPEED)
    }

    /// Side whose health hit zero, if any (left is checked first)
    pub fn defeated_side(&self) -> Option<Side> {
        if self.left.is_defeated() {
            Some(Side::Left)
        } else if self.right.is_defeated() {
            Some(Side::Right)
        } else {
            None
        }
    }
}
