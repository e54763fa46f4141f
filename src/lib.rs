//! Pong Defense - Pong with a tower-defense economy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, economy, AI)
//! - `input`: Pointer/key events from the host mapped onto the simulation
//! - `render`: Read-only snapshot consumed by the rendering layer
//! - `session`: Frame driver owning the round lifecycle
//! - `settings`: Host preferences (seed, autopilot, trail quality)

pub mod input;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{FrameReport, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Court half-extent
    pub const COURT_RADIUS: Vec2 = Vec2::new(7.0, 5.0);

    /// Paddle half-extent
    pub const PADDLE_RADIUS: Vec2 = Vec2::new(0.2, 1.0);
    /// Distance from the court edge to the paddle center
    pub const PADDLE_INSET: f32 = 0.5;

    /// Ball defaults
    pub const BALL_RADIUS: Vec2 = Vec2::new(0.2, 0.2);
    pub const BALL_START_DIRECTION: Vec2 = Vec2::new(-1.0, 0.0);
    /// Base speed multiplier (doubles every 4 points of combined score)
    pub const BALL_BASE_SPEED: f32 = 4.0;
    /// Speed cap, otherwise the ball tunnels through paddles
    pub const BALL_MAX_SPEED: f32 = 10.0;
    /// Weight of the contact-offset term when warping y velocity on a bounce
    pub const BOUNCE_WARP: f32 = 0.75;

    /// Trail horizon in seconds
    pub const TRAIL_LENGTH: f32 = 1.3;

    /// Building half-extent (all kinds share one footprint)
    pub const BUILDING_RADIUS: Vec2 = Vec2::new(0.3, 0.3);
    /// Length of each side's building strip, measured inward from its wall
    pub const BASE_LENGTH: f32 = 2.5;
    /// Clearance kept between a building and the edges of its strip
    pub const BUFFER_RADIUS: f32 = 0.1;

    /// Bullet defaults
    pub const BULLET_RADIUS: Vec2 = Vec2::new(0.1, 0.1);
    pub const BULLET_SPEED: f32 = 3.0;

    /// Prices
    pub const SHOOTER_PRICE: u32 = 30;
    pub const WALL_PRICE: u32 = 10;
    pub const FARM_PRICE: u32 = 20;

    /// Cooldowns (seconds)
    pub const SHOOTER_COOLDOWN: f32 = 2.0;
    pub const WALL_COOLDOWN: f32 = 1.0;
    pub const FARM_COOLDOWN: f32 = 3.0;
    /// Most bullets one shooter fires in a single frame
    pub const SHOOTER_MAX_VOLLEY: u32 = 8;
    /// Passive income period (seconds), both sides earn 1
    pub const INCOME_COOLDOWN: f32 = 1.0;

    /// Per-side starting economy
    pub const STARTING_HEALTH: u32 = 100;
    pub const STARTING_MONEY: u32 = 10;
    /// Damage dealt when the ball crosses a side's edge
    pub const BALL_DAMAGE: u32 = 10;
    /// Damage dealt when an enemy bullet crosses a side's edge
    pub const BULLET_DAMAGE: u32 = 5;

    /// AI tuning
    pub const AI_PADDLE_SPEED: f32 = 2.0;
    pub const AI_OFFSET_RANGE: f32 = 1.25;
    pub const AI_REROLL_MIN: f32 = 0.5;
    pub const AI_REROLL_SPAN: f32 = 0.5;
    pub const AI_PLACEMENT_TRIES: u32 = 1000;
}

/// Linear blend from `a` to `b` by `t`
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
