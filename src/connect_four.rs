use tracing::debug;

use crate::config::GameConfig;
use crate::display::DisplaySurface;
use crate::error::MoveError;
use crate::turn::TurnController;
use crate::types::{GameSnapshot, MoveOutcome, Occupant, Player, Position, TurnState};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const WIN_LENGTH: usize = 4;

/// Horizontal, vertical, diagonal down-right, diagonal up-right.
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// 6x7 grid. Row 0 is the top; pieces settle toward row 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Occupant; COLS]; ROWS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Option<Occupant> {
        self.cells
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
    }

    /// Lowest empty row of `col`, scanning from the bottom.
    pub fn open_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// Drops a piece into `col`. Returns where it landed.
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<Position, MoveError> {
        if col >= COLS {
            return Err(MoveError::OutOfRange {
                position: col,
                limit: COLS,
            });
        }
        let row = self.open_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = player.into();
        Ok(Position::new(row as u8, col as u8))
    }

    /// Columns that still accept a piece, left to right.
    pub fn open_columns(&self) -> Vec<u8> {
        (0..COLS)
            .filter(|&col| self.cells[0][col].is_empty())
            .map(|col| col as u8)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(|cell| !cell.is_empty())
    }

    pub fn filled_count(&self) -> u8 {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count() as u8
    }

    /// Looks for a run of at least [`WIN_LENGTH`] through `origin`.
    ///
    /// The returned line starts at `origin`, continues forward along the axis,
    /// then backward. Axes are tried in [`DIRECTIONS`] order.
    pub fn winning_line(&self, origin: Position, player: Player) -> Option<Vec<Position>> {
        let mark = Occupant::from(player);
        if self.get(origin) != Some(mark) {
            return None;
        }

        DIRECTIONS.into_iter().find_map(|(dr, dc)| {
            let mut line = vec![origin];
            self.extend_run(&mut line, origin, dr, dc, mark);
            self.extend_run(&mut line, origin, -dr, -dc, mark);
            (line.len() >= WIN_LENGTH).then_some(line)
        })
    }

    /// Converts board to a row-major `[u8; 42]` where 0=empty, 1=A, 2=B.
    pub fn to_array(&self) -> [u8; ROWS * COLS] {
        let mut out = [0u8; ROWS * COLS];
        for (slot, cell) in out.iter_mut().zip(self.cells.iter().flatten()) {
            *slot = cell.code();
        }
        out
    }

    fn extend_run(&self, line: &mut Vec<Position>, origin: Position, dr: i32, dc: i32, mark: Occupant) {
        let mut r = origin.row as i32 + dr;
        let mut c = origin.col as i32 + dc;

        while in_bounds(r, c) && self.cells[r as usize][c as usize] == mark {
            line.push(Position::new(r as u8, c as u8));
            r += dr;
            c += dc;
        }
    }

    #[cfg(test)]
    fn from_rows(rows: [&str; ROWS]) -> Self {
        let mut board = Self::new();
        for (cells, marks) in board.cells.iter_mut().zip(rows) {
            for (cell, mark) in cells.iter_mut().zip(marks.chars()) {
                *cell = match mark {
                    'A' => Occupant::PlayerA,
                    'B' => Occupant::PlayerB,
                    _ => Occupant::Empty,
                };
            }
        }
        board
    }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..ROWS as i32).contains(&row) && (0..COLS as i32).contains(&col)
}

/// Connect Four engine: owns its grid and turn controller.
#[derive(Debug, Clone)]
pub struct ConnectFour {
    board: Board,
    turn: TurnController<Position>,
    config: GameConfig,
}

impl ConnectFour {
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::new(),
            turn: TurnController::new("connect_four"),
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn_state(&self) -> &TurnState<Position> {
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

    /// Accessible name of a cell, e.g. `"Row 6, Column 1, Red"` (1-based).
    pub fn cell_label(&self, pos: Position) -> String {
        let base = format!(
            "Row {}, Column {}",
            u16::from(pos.row) + 1,
            u16::from(pos.col) + 1
        );
        match self.board.get(pos) {
            Some(Occupant::PlayerA) => format!("{base}, {}", self.config.label(Player::A)),
            Some(Occupant::PlayerB) => format!("{base}, {}", self.config.label(Player::B)),
            _ => base,
        }
    }

    /// Drops the current player's piece into `col` and notifies `surface`.
    /// On error nothing changes and nothing is emitted.
    pub fn try_move<S: DisplaySurface<Position>>(
        &mut self,
        col: usize,
        surface: &mut S,
    ) -> Result<Position, MoveError> {
        if !self.turn.is_active() {
            return Err(MoveError::GameOver);
        }

        let player = self.turn.current_player();
        let landed = self.board.drop_piece(col, player)?;
        debug!(game = "connect_four", row = landed.row, col = landed.col, player = ?player, "piece dropped");
        surface.cell_rendered(landed, player.into());

        let line = self.board.winning_line(landed, player);
        self.turn.settle(line, self.board.is_full(), &self.config, surface);
        Ok(landed)
    }

    /// Display-facing move request: invalid moves are silently ignored.
    pub fn request_move<S: DisplaySurface<Position>>(
        &mut self,
        col: usize,
        surface: &mut S,
    ) -> MoveOutcome {
        match self.try_move(col, surface) {
            Ok(_) => MoveOutcome::Placed,
            Err(err) => {
                debug!(game = "connect_four", col, %err, "move ignored");
                MoveOutcome::Rejected
            }
        }
    }

    /// Clears the grid and hands the first move back to player A.
    pub fn reset<S: DisplaySurface<Position>>(&mut self, surface: &mut S) {
        self.board = Board::new();
        for row in 0..ROWS as u8 {
            for col in 0..COLS as u8 {
                surface.cell_rendered(Position::new(row, col), Occupant::Empty);
            }
        }
        self.turn.reset(&self.config, surface);
    }

    pub fn snapshot(&self) -> GameSnapshot<Position> {
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
        if current != self.turn.current_player() {
            let mut log = crate::display::EventLog::new();
            self.turn.settle(None, false, &self.config, &mut log);
        }
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new(GameConfig::connect_four())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayEvent, EventLog};

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn play(game: &mut ConnectFour, cols: &[usize]) -> EventLog<Position> {
        let mut log = EventLog::new();
        for &col in cols {
            game.request_move(col, &mut log);
        }
        log
    }

    #[test]
    fn pieces_stack_from_the_bottom() {
        let mut board = Board::new();

        assert_eq!(board.drop_piece(3, Player::A), Ok(pos(5, 3)));
        assert_eq!(board.drop_piece(3, Player::B), Ok(pos(4, 3)));
        assert_eq!(board.open_row(3), Some(3));
        assert_eq!(board.get(pos(5, 3)), Some(Occupant::PlayerA));
        assert_eq!(board.get(pos(4, 3)), Some(Occupant::PlayerB));
        assert_eq!(board.get(pos(6, 0)), None);
    }

    #[test]
    fn full_or_missing_column_is_refused() {
        let mut board = Board::new();
        for i in 0..ROWS {
            let player = if i % 2 == 0 { Player::A } else { Player::B };
            board.drop_piece(0, player).unwrap();
        }
        let before = board;

        assert_eq!(board.drop_piece(0, Player::A), Err(MoveError::ColumnFull(0)));
        assert_eq!(
            board.drop_piece(COLS, Player::A),
            Err(MoveError::OutOfRange {
                position: COLS,
                limit: COLS
            })
        );
        assert_eq!(board, before);
        assert_eq!(board.open_columns(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn diagonal_line_starts_at_played_cell() {
        let board = Board::from_rows([
            ".......",
            ".......",
            "A......",
            "BA.....",
            "BBA....",
            "BBBA...",
        ]);

        assert_eq!(
            board.winning_line(pos(5, 3), Player::A),
            Some(vec![pos(5, 3), pos(4, 2), pos(3, 1), pos(2, 0)])
        );
        assert_eq!(board.winning_line(pos(5, 0), Player::A), None);
    }

    #[test]
    fn up_right_diagonal_walks_forward_then_back() {
        let board = Board::from_rows([
            ".......",
            ".......",
            "...A...",
            "..AB...",
            ".ABB...",
            "ABBA...",
        ]);

        assert_eq!(
            board.winning_line(pos(4, 1), Player::A),
            Some(vec![pos(4, 1), pos(5, 0), pos(3, 2), pos(2, 3)])
        );
    }

    #[test]
    fn run_longer_than_four_is_returned_whole() {
        let mut board = Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            "BB.BB..",
            "AA.AA..",
        ]);
        let landed = board.drop_piece(2, Player::A).unwrap();

        let line = board.winning_line(landed, Player::A).unwrap();
        assert_eq!(
            line,
            vec![pos(5, 2), pos(5, 3), pos(5, 4), pos(5, 1), pos(5, 0)]
        );
    }

    #[test]
    fn horizontal_win_on_bottom_row() {
        let mut game = ConnectFour::default();
        let log = play(&mut game, &[0, 6, 1, 6, 2, 6, 3]);

        assert_eq!(
            game.turn_state(),
            &TurnState::Won {
                player: Player::A,
                line: vec![pos(5, 3), pos(5, 2), pos(5, 1), pos(5, 0)]
            }
        );
        assert_eq!(game.status_text(), "Player Red wins!");
        assert_eq!(
            log.events().last(),
            Some(&DisplayEvent::GameEnded { disabled: true })
        );
    }

    #[test]
    fn vertical_win_for_second_player() {
        let mut game = ConnectFour::default();
        play(&mut game, &[0, 1, 2, 1, 3, 1, 5, 1]);

        assert_eq!(
            game.turn_state(),
            &TurnState::Won {
                player: Player::B,
                line: vec![pos(2, 1), pos(3, 1), pos(4, 1), pos(5, 1)]
            }
        );
        assert_eq!(game.status_text(), "Player Yellow wins!");
    }

    #[test]
    fn finished_game_ignores_moves() {
        let mut game = ConnectFour::default();
        play(&mut game, &[0, 6, 1, 6, 2, 6, 3]);
        let before = game.snapshot();

        let mut log = EventLog::new();
        assert_eq!(game.request_move(4, &mut log), MoveOutcome::Rejected);
        assert_eq!(game.try_move(4, &mut log), Err(MoveError::GameOver));
        assert!(log.is_empty());
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn full_column_request_is_silent() {
        let mut game = ConnectFour::default();
        play(&mut game, &[0, 0, 0, 0, 0, 0]);
        let before = game.snapshot();

        let mut log = EventLog::new();
        assert_eq!(game.request_move(0, &mut log), MoveOutcome::Rejected);
        assert_eq!(game.request_move(usize::MAX, &mut log), MoveOutcome::Rejected);
        assert!(log.is_empty());
        assert_eq!(game.snapshot(), before);
        assert_eq!(before.move_count, 6);
    }

    #[test]
    fn last_drop_without_line_is_draw() {
        let mut game = ConnectFour::default();
        game.set_board_for_test(
            Board::from_rows([
                "AA.BAAB",
                "BBAABBA",
                "AABBAAB",
                "BBAABBA",
                "AABBAAB",
                "BBAABBA",
            ]),
            Player::B,
        );

        let mut log = EventLog::new();
        assert_eq!(game.try_move(2, &mut log), Ok(pos(0, 2)));

        assert_eq!(game.turn_state(), &TurnState::Draw);
        assert!(game.board().is_full());
        assert!(game.board().open_columns().is_empty());
        assert_eq!(
            log.into_events(),
            vec![
                DisplayEvent::CellRendered {
                    position: pos(0, 2),
                    occupant: Occupant::PlayerB
                },
                DisplayEvent::StatusChanged {
                    text: "It's a draw.".to_string()
                },
                DisplayEvent::GameEnded { disabled: true },
            ]
        );
    }

    #[test]
    fn filled_cells_match_accepted_moves() {
        let mut game = ConnectFour::default();
        let mut log = EventLog::new();
        let mut accepted = 0;
        for col in [3, 3, 3, 3, 3, 3, 3, 9, 2] {
            if game.request_move(col, &mut log) == MoveOutcome::Placed {
                accepted += 1;
            }
            assert_eq!(game.board().filled_count(), accepted);
        }
        assert_eq!(accepted, 7);
    }

    #[test]
    fn reset_twice_matches_fresh_game() {
        let fresh = ConnectFour::default().snapshot();

        let mut game = ConnectFour::default();
        play(&mut game, &[0, 6, 1, 6, 2, 6, 3]);

        let mut log = EventLog::new();
        game.reset(&mut log);
        let once = game.snapshot();
        game.reset(&mut EventLog::new());

        assert_eq!(once, fresh);
        assert_eq!(game.snapshot(), fresh);
        assert_eq!(game.current_player(), Player::A);
        assert!(game.is_active());

        let events = log.into_events();
        assert_eq!(events.len(), ROWS * COLS + 3);
        assert_eq!(
            events[ROWS * COLS],
            DisplayEvent::LineHighlighted { positions: vec![] }
        );
        assert_eq!(
            events[ROWS * COLS + 1],
            DisplayEvent::StatusChanged {
                text: "Player Red's turn.".to_string()
            }
        );
    }

    #[test]
    fn cell_label_names_the_occupant() {
        let mut game = ConnectFour::default();
        play(&mut game, &[0]);

        assert_eq!(game.cell_label(pos(5, 0)), "Row 6, Column 1, Red");
        assert_eq!(game.cell_label(pos(0, 6)), "Row 1, Column 7");
    }
}
