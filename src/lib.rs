//! Tic-tac-toe rules engine with bitboard state representation.
//!
//! # Board Encoding
//!
//! ```text
//! Two 9-bit bitboards (u16), one per player.
//! Bit i set = that player's mark occupies cell i.
//!
//! Cell indices (rank-major, rank 1 at the bottom):
//!       +---+---+---+
//!     3 | 6 | 7 | 8 |
//!       +---+---+---+
//!     2 | 3 | 4 | 5 |
//!       +---+---+---+
//!     1 | 0 | 1 | 2 |
//!       +---+---+---+
//!         a   b   c
//! ```
//!
//! # Hash Encoding (18 bits)
//!
//! ```text
//! Bits 0-8:   noughts bitboard
//! Bits 9-17:  crosses bitboard
//! ```
//!
//! The side to move is not part of the hash; it is implied by the
//! number of marks on the board.
//!
//! # Diagram Notation
//!
//! ```text
//! <rank 3>/<rank 2>/<rank 1> <side>
//!
//! X = crosses, O = noughts, - = empty cell
//! Start position: ---/---/--- X
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod board;
pub mod codec;
mod error;
pub mod game;
pub mod roots;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use board::Board;
pub use error::{NotationError, NotationResult};
pub use game::{Game, TicTacToeGame};
pub use roots::{RandomRoots, Roots};

// ============================================================================
// BOARD LAYOUT
// ============================================================================

/// Total number of cells on the board.
pub const BOARD_SIZE: usize = 9;

/// Number of ranks (rows).
pub const BOARD_RANKS: usize = 3;

/// Number of files (columns).
pub const BOARD_FILES: usize = 3;

/// Longest possible match; one mark per cell.
pub const MAX_PLIES: usize = BOARD_SIZE;

/// Bitboard with no cells set.
pub const EMPTY_MASK: u16 = 0;

/// Bitboard with every cell set.
pub const BOARD_MASK: u16 = 0b111_111_111;

/// The 8 winning lines: 3 ranks, 3 files, 2 diagonals.
pub const WINNING_MASKS: [u16; 8] = [
    0b111_000_000, // Rank 3: a3, b3, c3
    0b000_111_000, // Rank 2: a2, b2, c2
    0b000_000_111, // Rank 1: a1, b1, c1
    0b100_100_100, // File c
    0b010_010_010, // File b
    0b001_001_001, // File a
    0b100_010_001, // Diagonal a1-c3
    0b001_010_100, // Diagonal c1-a3
];

/// Algebraic names of the cells, indexed by bit.
pub const COORDINATES: [&str; BOARD_SIZE] = [
    "a1", "b1", "c1", //
    "a2", "b2", "c2", //
    "a3", "b3", "c3",
];

/// Diagram symbol of the player who moves first.
pub const CROSSES_SYMBOL: char = 'X';

/// Diagram symbol of the player who moves second.
pub const NOUGHTS_SYMBOL: char = 'O';

/// Diagram filler for an empty cell.
pub const EMPTY_SYMBOL: char = '-';

/// Separator between ranks in a diagram.
pub const RANK_SEPARATOR: char = '/';

// ============================================================================
// SCORES
// ============================================================================

/// Utility score of a won match, from the crosses point of view.
pub const MAX_SCORE: i32 = 1000;

/// Score of a drawn or undecided match.
pub const DRAW_SCORE: i32 = 0;

// ============================================================================
// VALUE TYPES
// ============================================================================

/// Player identifier.
///
/// The discriminant is the signed turn value: `+1` for the player who
/// moves first, `-1` for the second player.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Player {
    Crosses = 1,
    Noughts = -1,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Crosses => Player::Noughts,
            Player::Noughts => Player::Crosses,
        }
    }

    /// Signed turn value (`+1` or `-1`).
    #[inline]
    pub const fn turn(self) -> i8 {
        self as i8
    }

    /// Convert from a signed turn value.
    #[inline]
    pub fn from_turn(turn: i8) -> Option<Player> {
        match turn {
            1 => Some(Player::Crosses),
            -1 => Some(Player::Noughts),
            _ => None,
        }
    }

    /// Index of this player's bitboard.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::Crosses => 0,
            Player::Noughts => 1,
        }
    }

    /// Diagram symbol.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Player::Crosses => CROSSES_SYMBOL,
            Player::Noughts => NOUGHTS_SYMBOL,
        }
    }

    /// Convert from a diagram symbol.
    #[inline]
    pub fn from_symbol(symbol: char) -> Option<Player> {
        match symbol {
            CROSSES_SYMBOL => Some(Player::Crosses),
            NOUGHTS_SYMBOL => Some(Player::Noughts),
            _ => None,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Player::Crosses => "Crosses",
            Player::Noughts => "Noughts",
        }
    }
}

/// A board cell (0-8), which is also a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell(pub u8);

impl Cell {
    /// Create a cell from a rank and file (0-2 each, rank 0 at the bottom).
    #[inline]
    pub fn from_rank_file(rank: u8, file: u8) -> Cell {
        debug_assert!((rank as usize) < BOARD_RANKS && (file as usize) < BOARD_FILES);
        Cell(rank * BOARD_FILES as u8 + file)
    }

    /// Get the rank (0-2).
    #[inline]
    pub fn rank(self) -> u8 {
        self.0 / BOARD_FILES as u8
    }

    /// Get the file (0-2).
    #[inline]
    pub fn file(self) -> u8 {
        self.0 % BOARD_FILES as u8
    }

    /// Single-bit bitboard for this cell.
    ///
    /// The cell must be on the board; callers holding unchecked input
    /// go through [`Cell::is_valid`] first.
    #[inline]
    pub const fn bit(self) -> u16 {
        debug_assert!(self.is_valid());
        1 << self.0
    }

    /// Check if this is a valid cell (0-8).
    #[inline]
    pub const fn is_valid(self) -> bool {
        (self.0 as usize) < BOARD_SIZE
    }

    /// Iterate over all 9 cells.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE as u8).map(Cell)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match COORDINATES.get(self.0 as usize) {
            Some(name) => f.write_str(name),
            None => write!(f, "#{}", self.0),
        }
    }
}

/// Placement of both players' marks.
///
/// The two bitboards are disjoint: the codec assigns one symbol per cell
/// and the engine only toggles bits of empty cells. Deserialization goes
/// through [`Position::try_from_bits`] so external input cannot break this.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    crosses: u16,
    noughts: u16,
}

impl Position {
    /// Position with no marks.
    pub const START: Position = Position {
        crosses: EMPTY_MASK,
        noughts: EMPTY_MASK,
    };

    /// Create a position from the two bitboards.
    #[inline]
    pub fn from_bits(crosses: u16, noughts: u16) -> Position {
        debug_assert_eq!(crosses & noughts, EMPTY_MASK, "bitboards overlap");
        debug_assert_eq!((crosses | noughts) & !BOARD_MASK, EMPTY_MASK);
        Position { crosses, noughts }
    }

    /// Create a position from untrusted bitboards.
    pub fn try_from_bits(crosses: u16, noughts: u16) -> NotationResult<Position> {
        let off_board = (crosses | noughts) & !BOARD_MASK;
        if off_board != EMPTY_MASK {
            return Err(NotationError::MarksOffBoard(off_board));
        }
        let overlap = crosses & noughts;
        if overlap != EMPTY_MASK {
            return Err(NotationError::OverlappingMarks(overlap));
        }
        Ok(Position { crosses, noughts })
    }

    /// Bitboard of one player's marks.
    #[inline]
    pub const fn pieces(&self, player: Player) -> u16 {
        match player {
            Player::Crosses => self.crosses,
            Player::Noughts => self.noughts,
        }
    }

    /// Bitboard of occupied cells.
    #[inline]
    pub const fn occupied(&self) -> u16 {
        self.crosses | self.noughts
    }

    /// Bitboard of empty cells.
    #[inline]
    pub const fn vacant(&self) -> u16 {
        BOARD_MASK & !self.occupied()
    }

    /// Who owns the mark on a cell, if anyone.
    #[inline]
    pub fn occupant(&self, cell: Cell) -> Option<Player> {
        if self.crosses & cell.bit() != 0 {
            Some(Player::Crosses)
        } else if self.noughts & cell.bit() != 0 {
            Some(Player::Noughts)
        } else {
            None
        }
    }

    /// Check if a player's marks fully cover any winning line.
    #[inline]
    pub fn has_won(&self, player: Player) -> bool {
        let pieces = self.pieces(player);
        WINNING_MASKS.iter().any(|&mask| pieces & mask == mask)
    }

    /// Reversible packing of both bitboards; crosses in the high half.
    #[inline]
    pub const fn hash(&self) -> u64 {
        ((self.crosses as u64) << BOARD_SIZE) | self.noughts as u64
    }

    /// Flip a single cell for a player.
    #[inline]
    pub(crate) fn toggle(&mut self, player: Player, cell: Cell) {
        match player {
            Player::Crosses => self.crosses ^= cell.bit(),
            Player::Noughts => self.noughts ^= cell.bit(),
        }
    }
}

/// Wire shape of a position before validation.
#[derive(Deserialize)]
struct RawPosition {
    crosses: u16,
    noughts: u16,
}

impl TryFrom<RawPosition> for Position {
    type Error = NotationError;

    fn try_from(raw: RawPosition) -> NotationResult<Position> {
        Position::try_from_bits(raw.crosses, raw.noughts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::Crosses.opponent(), Player::Noughts);
        assert_eq!(Player::Noughts.opponent(), Player::Crosses);
    }

    #[test]
    fn test_player_turn_roundtrip() {
        assert_eq!(Player::Crosses.turn(), 1);
        assert_eq!(Player::Noughts.turn(), -1);
        assert_eq!(Player::from_turn(1), Some(Player::Crosses));
        assert_eq!(Player::from_turn(-1), Some(Player::Noughts));
        assert_eq!(Player::from_turn(0), None);
    }

    #[test]
    fn test_player_symbols() {
        assert_eq!(Player::from_symbol('X'), Some(Player::Crosses));
        assert_eq!(Player::from_symbol('O'), Some(Player::Noughts));
        assert_eq!(Player::from_symbol('x'), None, "symbols are case-significant");
        assert_eq!(Player::from_symbol('-'), None);
    }

    #[test]
    fn test_cell_from_rank_file() {
        assert_eq!(Cell::from_rank_file(0, 0), Cell(0));
        assert_eq!(Cell::from_rank_file(0, 2), Cell(2));
        assert_eq!(Cell::from_rank_file(1, 1), Cell(4));
        assert_eq!(Cell::from_rank_file(2, 2), Cell(8));
    }

    #[test]
    fn test_cell_rank_file() {
        for cell in Cell::all() {
            assert_eq!(Cell::from_rank_file(cell.rank(), cell.file()), cell);
        }
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell(0).to_string(), "a1");
        assert_eq!(Cell(5).to_string(), "c2");
        assert_eq!(Cell(8).to_string(), "c3");
        assert_eq!(Cell(9).to_string(), "#9");
    }

    #[test]
    fn test_winning_masks_cover_three_cells() {
        for mask in WINNING_MASKS {
            assert_eq!(mask.count_ones(), 3);
            assert_eq!(mask & !BOARD_MASK, 0);
        }
    }

    #[test]
    fn test_position_occupant() {
        let pos = Position::from_bits(0b000_000_001, 0b100_000_000);
        assert_eq!(pos.occupant(Cell(0)), Some(Player::Crosses));
        assert_eq!(pos.occupant(Cell(8)), Some(Player::Noughts));
        assert_eq!(pos.occupant(Cell(4)), None);
        assert_eq!(pos.vacant(), 0b011_111_110);
    }

    #[test]
    fn test_position_toggle_roundtrip() {
        let mut pos = Position::START;
        pos.toggle(Player::Noughts, Cell(4));
        assert_eq!(pos.pieces(Player::Noughts), 0b000_010_000);
        pos.toggle(Player::Noughts, Cell(4));
        assert_eq!(pos, Position::START);
    }

    #[test]
    fn test_position_hash_packing() {
        let pos = Position::from_bits(0b000_000_111, 0b000_011_000);
        assert_eq!(pos.hash(), (0b111 << 9) | 0b000_011_000);
        assert_eq!(Position::START.hash(), 0);
    }

    #[test]
    fn test_has_won_each_line() {
        for mask in WINNING_MASKS {
            let pos = Position::from_bits(mask, EMPTY_MASK);
            assert!(pos.has_won(Player::Crosses), "mask {mask:09b}");
            assert!(!pos.has_won(Player::Noughts));
        }
    }

    #[test]
    fn test_position_serde() {
        let pos = Position::from_bits(0b000_000_101, 0b000_010_000);
        let json = serde_json::to_string(&pos).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pos);
    }

    #[test]
    fn test_try_from_bits() {
        assert_eq!(
            Position::try_from_bits(0b000_000_101, 0b000_010_000),
            Ok(Position::from_bits(0b000_000_101, 0b000_010_000))
        );
        assert_eq!(
            Position::try_from_bits(0b111, 0b110),
            Err(NotationError::OverlappingMarks(0b110))
        );
        assert_eq!(
            Position::try_from_bits(0xFFFF, 0),
            Err(NotationError::MarksOffBoard(0xFE00))
        );
    }

    #[test]
    fn test_position_serde_rejects_overlap() {
        let result = serde_json::from_str::<Position>(r#"{"crosses":7,"noughts":7}"#);
        assert!(result.is_err());

        let json = r#"{"position":{"crosses":7,"noughts":7},"turn":"Crosses"}"#;
        assert!(serde_json::from_str::<board::Board>(json).is_err());
    }

    #[test]
    fn test_position_serde_rejects_off_board_bits() {
        let result = serde_json::from_str::<Position>(r#"{"crosses":65535,"noughts":0}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<Position>(r#"{"crosses":512,"noughts":0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_cell_bit() {
        assert_eq!(Cell(0).bit(), 0b1);
        assert_eq!(Cell(8).bit(), 0b1_0000_0000);
        assert!(Cell::all().all(|cell| cell.bit() & !BOARD_MASK == 0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_cell_bit_off_board_panics() {
        let _ = Cell(9).bit();
    }
}
