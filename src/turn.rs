use std::fmt::Debug;

use tracing::{debug, info};
use web_time::Instant;

use crate::config::GameConfig;
use crate::display::DisplaySurface;
use crate::types::{Player, TurnState};

const DRAW_TEXT: &str = "It's a draw.";

/// Finite-state machine deciding whose move is accepted and when play stops.
///
/// `current` is the player to move while active, and the player who made the
/// final move once the state is terminal.
#[derive(Debug, Clone)]
pub struct TurnController<P> {
    game: &'static str,
    current: Player,
    state: TurnState<P>,
    started_at: Instant,
}

impl<P: Clone + Debug> TurnController<P> {
    pub fn new(game: &'static str) -> Self {
        Self {
            game,
            current: Player::A,
            state: TurnState::PlayerATurn,
            started_at: Instant::now(),
        }
    }

    pub fn state(&self) -> &TurnState<P> {
        &self.state
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn is_active(&self) -> bool {
        !self.state.is_terminal()
    }

    /// Status line matching the current state.
    pub fn status_text(&self, config: &GameConfig) -> String {
        match &self.state {
            TurnState::PlayerATurn | TurnState::PlayerBTurn => {
                format!("Player {}'s turn.", config.label(self.current))
            }
            TurnState::Won { player, .. } => format!("Player {} wins!", config.label(*player)),
            TurnState::Draw => DRAW_TEXT.to_string(),
        }
    }

    /// Applies the transition for a move the resolver already accepted and
    /// notifies the surface. A win takes precedence over a full grid.
    pub fn settle<S: DisplaySurface<P>>(
        &mut self,
        line: Option<Vec<P>>,
        grid_full: bool,
        config: &GameConfig,
        surface: &mut S,
    ) {
        debug_assert!(self.is_active(), "settle() called on a finished game");

        let mover = self.current;
        if let Some(line) = line {
            info!(
                game = self.game,
                winner = ?mover,
                line_len = line.len(),
                elapsed_ms = self.started_at.elapsed().as_millis() as u64,
                "game won"
            );
            surface.line_highlighted(&line);
            self.state = TurnState::Won {
                player: mover,
                line,
            };
            surface.status_changed(&self.status_text(config));
            surface.game_ended(true);
            return;
        }

        if grid_full {
            info!(
                game = self.game,
                elapsed_ms = self.started_at.elapsed().as_millis() as u64,
                "game drawn"
            );
            self.state = TurnState::Draw;
            surface.status_changed(DRAW_TEXT);
            surface.game_ended(true);
            return;
        }

        self.current = mover.opponent();
        self.state = TurnState::turn_of(self.current);
        debug!(game = self.game, next = ?self.current, "turn passed");
        surface.status_changed(&self.status_text(config));
    }

    /// Back to player A's turn. The caller clears the grid cells first; this
    /// clears the highlight, status and disabled flag.
    pub fn reset<S: DisplaySurface<P>>(&mut self, config: &GameConfig, surface: &mut S) {
        self.current = Player::A;
        self.state = TurnState::PlayerATurn;
        self.started_at = Instant::now();
        info!(game = self.game, "game reset");

        surface.line_highlighted(&[]);
        surface.status_changed(&self.status_text(config));
        surface.game_ended(false);
    }
}
