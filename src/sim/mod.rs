//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (placement order for buildings, spawn order for bullets)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod economy;
pub mod geometry;
pub mod state;
pub mod tick;
pub mod trail;

pub use ai::AiController;
pub use collision::{Bounce, ball_box_bounce};
pub use economy::{can_place, purchase};
pub use geometry::{in_base_zone, overlaps};
pub use state::{
    Ball, Building, BuildingKind, Bullet, CursorMode, DamageCause, DestroyCause, GameEvent,
    GamePhase, GameState, Paddle, Purse, Side,
};
pub use tick::{TickInput, tick};
pub use trail::{Trail, TrailPoint};
