//! Frame driver
//!
//! Owns the game state between frames and performs the round lifecycle
//! transition: when a tick ends a round, the session resets it before the next
//! frame is rendered.

use crate::input::{InputEvent, handle_event};
use crate::render::RenderSnapshot;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Side, TickInput, tick};

/// What happened during one frame
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    /// Losing side, if the frame ended a round
    pub round_over: Option<Side>,
}

/// A running game
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    pub settings: Settings,
    /// Frames advanced so far
    pub frame: u64,
    /// Rounds finished so far, as (loser, frame)
    pub results: Vec<(Side, u64)>,
}

impl Session {
    pub fn new(settings: Settings, seed: u64) -> Self {
        log::info!("New session with seed {seed}");
        Self {
            state: GameState::new(seed),
            settings,
            frame: 0,
            results: Vec::new(),
        }
    }

    /// Forward a host input event. Returns true if it placed a building.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        handle_event(&mut self.state, event)
    }

    /// Advance one frame, resetting the round if it just ended
    pub fn frame(&mut self, elapsed: f32) -> FrameReport {
        let input = TickInput {
            left_autopilot: self.settings.left_autopilot,
        };
        tick(&mut self.state, &input, elapsed);
        self.frame += 1;

        let events = std::mem::take(&mut self.state.events);
        for event in &events {
            log::debug!("frame {}: {event:?}", self.frame);
        }

        let round_over = match self.state.phase {
            GamePhase::RoundOver { loser } => {
                self.results.push((loser, self.frame));
                log::info!("Round {} lost by {loser:?}, resetting", self.results.len());
                self.state.reset();
                Some(loser)
            }
            GamePhase::Playing => None,
        };

        FrameReport { events, round_over }
    }

    /// Snapshot of the current state for the renderer
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state, self.settings.trail_steps())
    }
}
