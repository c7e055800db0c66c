/// Why a move request was turned away.
///
/// Never surfaced to the display: rejected moves are silent no-ops there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,

    #[error("position {position} out of range (limit {limit})")]
    OutOfRange { position: usize, limit: usize },

    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Errors raised while building a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("label for player {0} must not be empty")]
    EmptyLabel(&'static str),

    #[error("players must have distinct labels, both are {0:?}")]
    DuplicateLabel(String),
}
