//! Immutable snapshot of a match state: piece placement and side to move.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec;
use crate::{Cell, NotationError, NotationResult, Player, Position, BOARD_RANKS};

/// Number of space-separated fields in a diagram.
const DIAGRAM_FIELDS: usize = 2;

/// A position together with the player to move.
///
/// Engines are seeded from a board and export their current state as
/// one; boards never change once built.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Board {
    position: Position,
    turn: Player,
}

impl Board {
    /// The empty board with crosses to move.
    pub fn new() -> Board {
        Board::with_position(Position::START, Player::Crosses)
    }

    /// Create a board for a given state.
    pub fn with_position(position: Position, turn: Player) -> Board {
        Board { position, turn }
    }

    /// Piece placement.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Player to move.
    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Parse a diagram such as `X--/-O-/--- X`.
    pub fn from_diagram(notation: &str) -> NotationResult<Board> {
        Self::parse(notation).inspect_err(|err| {
            debug!(diagram = notation, error = %err, "rejected diagram");
        })
    }

    fn parse(notation: &str) -> NotationResult<Board> {
        let fields: Vec<&str> = notation.split(' ').collect();

        if fields.len() != DIAGRAM_FIELDS {
            return Err(NotationError::FieldCount {
                expected: DIAGRAM_FIELDS,
                found: fields.len(),
            });
        }

        let grid = codec::parse_diagram(fields[0])?;
        let turn = parse_turn(fields[1])?;

        Ok(Board::with_position(codec::to_position(&grid), turn))
    }

    /// Encode this board as a diagram.
    pub fn to_diagram(&self) -> String {
        let grid = codec::to_occupants(&self.position);
        format!("{} {}", codec::to_diagram(&grid), self.turn.symbol())
    }

    /// Convert an algebraic coordinate to a move.
    pub fn to_move(&self, notation: &str) -> NotationResult<Cell> {
        codec::to_cell(notation)
    }

    /// Convert a move to its algebraic coordinate.
    pub fn to_coordinates(&self, mov: Cell) -> NotationResult<&'static str> {
        codec::to_coordinate(mov)
    }
}

fn parse_turn(field: &str) -> NotationResult<Player> {
    let mut chars = field.chars();
    let player = match (chars.next(), chars.next()) {
        (Some(symbol), None) => Player::from_symbol(symbol),
        _ => None,
    };

    player.ok_or_else(|| NotationError::UnknownTurn(field.to_string()))
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_diagram(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = codec::to_symbols(&codec::to_occupants(&self.position));

        writeln!(f, "===( {} to move )===", self.turn.name())?;
        writeln!(f, "      +---+---+---+")?;
        for (row, rank) in symbols.iter().enumerate() {
            writeln!(
                f,
                "    {} | {} | {} | {} |",
                BOARD_RANKS - row,
                rank[0],
                rank[1],
                rank[2]
            )?;
            writeln!(f, "      +---+---+---+")?;
        }
        writeln!(f, "        a   b   c")?;
        write!(f, "=========================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_new() {
        let board = Board::new();
        assert_eq!(board.position(), Position::START);
        assert_eq!(board.turn(), Player::Crosses);
        assert_eq!(board.to_diagram(), "---/---/--- X");
    }

    #[test]
    fn test_from_diagram() {
        let board = Board::from_diagram("X--/-O-/--X O").unwrap();
        assert_eq!(board.turn(), Player::Noughts);
        assert_eq!(board.position().occupant(Cell(6)), Some(Player::Crosses));
        assert_eq!(board.position().occupant(Cell(4)), Some(Player::Noughts));
        assert_eq!(board.position().occupant(Cell(2)), Some(Player::Crosses));
        assert_eq!(board.position().occupied().count_ones(), 3);
    }

    #[test]
    fn test_diagram_roundtrip() {
        for text in ["---/---/--- X", "XOX/OXO/OXO X", "O--/-X-/X-- X", "-X-/---/--O O"] {
            let board = Board::from_diagram(text).unwrap();
            assert_eq!(board.to_diagram(), text);
        }
    }

    #[test]
    fn test_from_str() {
        let board: Board = "---/-X-/--- O".parse().unwrap();
        assert_eq!(board.position().occupant(Cell(4)), Some(Player::Crosses));
    }

    #[test]
    fn test_field_count_errors() {
        assert_eq!(
            Board::from_diagram("---/---/---"),
            Err(NotationError::FieldCount { expected: 2, found: 1 })
        );
        assert_eq!(
            Board::from_diagram("---/---/--- X extra"),
            Err(NotationError::FieldCount { expected: 2, found: 3 })
        );
        assert_eq!(
            Board::from_diagram("---/---/---  X"),
            Err(NotationError::FieldCount { expected: 2, found: 3 })
        );
    }

    #[test]
    fn test_turn_errors() {
        for side in ["", "x", "-", "XO", "N"] {
            let text = format!("---/---/--- {side}");
            assert_eq!(
                Board::from_diagram(&text),
                Err(NotationError::UnknownTurn(side.to_string())),
                "side {side:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_placement_errors_propagate() {
        assert_eq!(
            Board::from_diagram("---/-Z-/--- X"),
            Err(NotationError::UnknownSymbol('Z'))
        );
        assert!(matches!(
            Board::from_diagram("--/---/--- X"),
            Err(NotationError::FileCount { .. })
        ));
    }

    #[test]
    fn test_move_notation() {
        let board = Board::new();
        assert_eq!(board.to_move("a1"), Ok(Cell(0)));
        assert_eq!(board.to_move("b2"), Ok(Cell(4)));
        assert_eq!(board.to_coordinates(Cell(8)), Ok("c3"));
        assert!(board.to_move("z9").is_err());
        assert!(board.to_coordinates(Cell(12)).is_err());
    }

    #[test]
    fn test_display_template() {
        let board = Board::from_diagram("O--/-X-/X-- O").unwrap();
        let expected = "\
===( Noughts to move )===
      +---+---+---+
    3 | O |   |   |
      +---+---+---+
    2 |   | X |   |
      +---+---+---+
    1 | X |   |   |
      +---+---+---+
        a   b   c
=========================";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn test_board_serde() {
        let board = Board::from_diagram("X--/---/--O X").unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
