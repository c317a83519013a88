//! Error types for board construction, the search frontier and the solver.

use std::time::Duration;

/// Reasons a tile arrangement is rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// No rows (or no tiles) were supplied.
    #[error("board has no tiles")]
    Empty,

    /// A row does not have as many entries as there are rows.
    #[error("board is not square: row {row} has {len} tiles, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A flat tile sequence does not hold exactly n² values.
    #[error("expected {expected} tiles, got {got}")]
    WrongTileCount { expected: usize, got: usize },

    /// n² cells do not fit in memory or tile values exceed `u32`.
    #[error("board of dimension {size} is too large")]
    TooLarge { size: usize },

    #[error("tile {tile} is out of range (max {max})")]
    TileOutOfRange { tile: u32, max: u32 },

    #[error("tile {0} appears more than once")]
    DuplicateTile(u32),

    #[error("board has no blank (0) tile")]
    MissingBlank,

    /// Text input could not be read as a board.
    #[error("cannot parse board: {0}")]
    Parse(String),
}

/// Returned by frontier reads on an empty frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrontierError {
    #[error("frontier is empty")]
    Empty,
}

/// Failures of a running search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The configured expansion budget ran out before either search reached a goal.
    #[error("search budget exceeded after {expansions} expansions")]
    BudgetExceeded { expansions: u64 },

    /// The configured time limit ran out before either search reached a goal.
    #[error("search timed out after {elapsed:?} ({expansions} expansions)")]
    TimedOut { elapsed: Duration, expansions: u64 },

    /// A frontier ran dry. The twin argument makes this unreachable for valid boards.
    #[error(transparent)]
    Frontier(#[from] FrontierError),
}
