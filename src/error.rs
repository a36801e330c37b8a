//! Errors reported by the position codec.

/// A diagram or coordinate string that could not be decoded.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Diagram is not `<ranks> <side>`.
    #[error("expected {expected} space-separated fields in diagram, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// Wrong number of `/`-separated ranks.
    #[error("expected {expected} ranks in diagram, found {found}")]
    RankCount { expected: usize, found: usize },

    /// A rank with the wrong number of cells.
    #[error("rank {rank} has {found} files, expected {expected}")]
    FileCount {
        rank: usize,
        expected: usize,
        found: usize,
    },

    /// A board symbol that is neither a piece nor the empty filler.
    #[error("unknown piece symbol {0:?}")]
    UnknownSymbol(char),

    /// The side-to-move field is not a single player symbol.
    #[error("unknown side to move {0:?}")]
    UnknownTurn(String),

    /// Text that is not an algebraic cell name.
    #[error("invalid coordinate {0:?}")]
    InvalidCoordinate(String),

    /// A cell index outside the board.
    #[error("cell index {0} is out of range")]
    CellOutOfRange(u8),

    /// Both players claim the same cells.
    #[error("cells {0:#011b} are marked by both players")]
    OverlappingMarks(u16),

    /// Marks on bits beyond the nine board cells.
    #[error("bits {0:#06x} lie outside the board")]
    MarksOffBoard(u16),
}

/// Result type for codec operations
pub type NotationResult<T> = Result<T, NotationError>;
