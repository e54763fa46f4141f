//! Host input mapped onto the simulation
//!
//! The host converts window coordinates to court space before handing events
//! over; this module only decides what they mean for the game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{BuildingKind, CursorMode, GameState, Side, purchase};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Space,
    Q,
    W,
    E,
    Other,
}

/// Input event in court coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer moved to this court-space position
    PointerMoved(Vec2),
    /// Pointer button released at the current cursor position
    PointerReleased,
    KeyReleased(Key),
}

impl Key {
    /// Cursor mode selected by releasing this key
    pub fn cursor_mode(self) -> Option<CursorMode> {
        match self {
            Key::Space => Some(CursorMode::Normal),
            Key::Q => Some(CursorMode::Placing(BuildingKind::Shooter)),
            Key::W => Some(CursorMode::Placing(BuildingKind::Wall)),
            Key::E => Some(CursorMode::Placing(BuildingKind::Farm)),
            Key::Other => None,
        }
    }
}

/// Apply a host event to the game. Returns true if a building was placed.
pub fn handle_event(state: &mut GameState, event: &InputEvent) -> bool {
    match *event {
        InputEvent::PointerMoved(pos) => {
            state.cursor_pos = pos;
            state.left_paddle.pos.y = pos.y;
            false
        }
        InputEvent::PointerReleased => match state.cursor_mode.building() {
            Some(kind) => {
                let pos = state.cursor_pos;
                purchase(state, Side::Left, kind, pos)
            }
            None => false,
        },
        InputEvent::KeyReleased(key) => {
            if let Some(mode) = key.cursor_mode() {
                state.cursor_mode = mode;
            }
            false
        }
    }
}
