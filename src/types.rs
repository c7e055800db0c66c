use serde::Serialize;

/// One of the two seats. `A` always opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Wire code used in flat board arrays: 1=A, 2=B.
    pub fn code(self) -> u8 {
        match self {
            Self::A => 1,
            Self::B => 2,
        }
    }
}

/// Content of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Occupant {
    #[default]
    Empty,
    PlayerA,
    PlayerB,
}

impl Occupant {
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    /// Converts to `0`=empty, `1`=player A, `2`=player B.
    pub fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::PlayerA => 1,
            Self::PlayerB => 2,
        }
    }
}

impl From<Player> for Occupant {
    fn from(player: Player) -> Self {
        match player {
            Player::A => Self::PlayerA,
            Player::B => Self::PlayerB,
        }
    }
}

/// A Connect Four coordinate. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Turn controller state, generic over the position type of the winning line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TurnState<P> {
    PlayerATurn,
    PlayerBTurn,
    Won { player: Player, line: Vec<P> },
    Draw,
}

impl<P> TurnState<P> {
    pub fn turn_of(player: Player) -> Self {
        match player {
            Player::A => Self::PlayerATurn,
            Player::B => Self::PlayerBTurn,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Won { .. } | Self::Draw)
    }
}

/// Result of a move request as seen by the caller.
///
/// A rejected request never changes state and never notifies the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveOutcome {
    Placed,
    Rejected,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot<P> {
    /// Row-major occupant codes (see [`Occupant::code`]).
    pub board: Vec<u8>,
    pub current_player: u8,
    pub is_active: bool,
    pub turn: TurnState<P>,
    pub move_count: u8,
    pub status: String,
}
