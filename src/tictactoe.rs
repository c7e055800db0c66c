use tracing::debug;

use crate::config::GameConfig;
use crate::display::DisplaySurface;
use crate::error::MoveError;
use crate::turn::TurnController;
use crate::types::{GameSnapshot, MoveOutcome, Occupant, Player, TurnState};

pub const CELLS: usize = 9;

/// Rows, columns, then diagonals. Order decides which line is highlighted.
pub const LINES: [[u8; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 3x3 grid stored as a flat row-major array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Occupant; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` for an out-of-range index.
    pub fn get(&self, index: usize) -> Option<Occupant> {
        self.cells.get(index).copied()
    }

    /// Marks an empty cell. Never overwrites an occupied one.
    pub fn place(&mut self, index: usize, player: Player) -> Result<u8, MoveError> {
        let cell = self.cells.get_mut(index).ok_or(MoveError::OutOfRange {
            position: index,
            limit: CELLS,
        })?;
        if !cell.is_empty() {
            return Err(MoveError::CellOccupied(index));
        }
        *cell = player.into();
        Ok(index as u8)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn filled_count(&self) -> u8 {
        self.cells.iter().filter(|cell| !cell.is_empty()).count() as u8
    }

    /// First line of [`LINES`] fully held by `player`.
    pub fn winning_line(&self, player: Player) -> Option<[u8; 3]> {
        let mark = Occupant::from(player);
        LINES
            .into_iter()
            .find(|line| line.iter().all(|&idx| self.cells[idx as usize] == mark))
    }

    /// Converts board to `[u8; 9]` where 0=empty, 1=player A, 2=player B.
    pub fn to_array(&self) -> [u8; CELLS] {
        self.cells.map(Occupant::code)
    }

    #[cfg(test)]
    fn from_marks(marks: &str) -> Self {
        let mut board = Self::new();
        for (cell, mark) in board.cells.iter_mut().zip(marks.chars()) {
            *cell = match mark {
                'X' => Occupant::PlayerA,
                'O' => Occupant::PlayerB,
                _ => Occupant::Empty,
            };
        }
        board
    }
}

/// Tic-Tac-Toe engine: owns its grid and turn controller.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    board: Board,
    turn: TurnController<u8>,
    config: GameConfig,
}

impl TicTacToe {
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::new(),
            turn: TurnController::new("tic_tac_toe"),
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn_state(&self) -> &TurnState<u8> {
        self.turn.state()
    }

    pub fn current_player(&self) -> Player {
        self.turn.current_player()
    }

    pub fn is_active(&self) -> bool {
        self.turn.is_active()
    }

    pub fn status_text(&self) -> String {
        self.turn.status_text(&self.config)
    }

    /// Places the current player's mark at `index` and notifies `surface`.
    /// On error nothing changes and nothing is emitted.
    pub fn try_move<S: DisplaySurface<u8>>(
        &mut self,
        index: usize,
        surface: &mut S,
    ) -> Result<(), MoveError> {
        if !self.turn.is_active() {
            return Err(MoveError::GameOver);
        }

        let player = self.turn.current_player();
        let cell = self.board.place(index, player)?;
        debug!(game = "tic_tac_toe", cell, player = ?player, "mark placed");
        surface.cell_rendered(cell, player.into());

        let line = self.board.winning_line(player).map(|line| line.to_vec());
        self.turn.settle(line, self.board.is_full(), &self.config, surface);
        Ok(())
    }

    /// Display-facing move request: invalid moves are silently ignored.
    pub fn request_move<S: DisplaySurface<u8>>(
        &mut self,
        index: usize,
        surface: &mut S,
    ) -> MoveOutcome {
        match self.try_move(index, surface) {
            Ok(()) => MoveOutcome::Placed,
            Err(err) => {
                debug!(game = "tic_tac_toe", index, %err, "move ignored");
                MoveOutcome::Rejected
            }
        }
    }

    /// Clears the grid and hands the first move back to player A.
    pub fn reset<S: DisplaySurface<u8>>(&mut self, surface: &mut S) {
        self.board = Board::new();
        for cell in 0..CELLS as u8 {
            surface.cell_rendered(cell, Occupant::Empty);
        }
        self.turn.reset(&self.config, surface);
    }

    pub fn snapshot(&self) -> GameSnapshot<u8> {
        GameSnapshot {
            board: self.board.to_array().to_vec(),
            current_player: self.turn.current_player().code(),
            is_active: self.turn.is_active(),
            turn: self.turn.state().clone(),
            move_count: self.board.filled_count(),
            status: self.status_text(),
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current: Player) {
        self.board = board;
        if current == Player::B {
            let mut log = crate::display::EventLog::new();
            self.turn.settle(None, false, &self.config, &mut log);
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new(GameConfig::tic_tac_toe())
    }
}
