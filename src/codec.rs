//! Stateless conversions between bitboards, occupant grids, diagram
//! strings and algebraic coordinates.
//!
//! Grids are indexed `[row][file]` with row 0 being the top rank, so a
//! grid reads in the same order as a diagram or the printed board.

use tracing::debug;

use crate::{
    Cell, NotationError, NotationResult, Player, Position, BOARD_FILES, BOARD_RANKS,
    COORDINATES, EMPTY_MASK, EMPTY_SYMBOL, RANK_SEPARATOR,
};

/// Who occupies each cell, top rank first.
pub type Occupants = [[Option<Player>; BOARD_FILES]; BOARD_RANKS];

#[inline]
fn cell_at(row: usize, file: usize) -> Cell {
    Cell::from_rank_file((BOARD_RANKS - 1 - row) as u8, file as u8)
}

// ========== Bitboards <-> Grid ==========

/// Expand a position into an occupant grid.
pub fn to_occupants(position: &Position) -> Occupants {
    let mut grid = [[None; BOARD_FILES]; BOARD_RANKS];

    for (row, rank) in grid.iter_mut().enumerate() {
        for (file, occupant) in rank.iter_mut().enumerate() {
            *occupant = position.occupant(cell_at(row, file));
        }
    }

    grid
}

/// Pack an occupant grid into bitboards.
pub fn to_position(grid: &Occupants) -> Position {
    let mut crosses = EMPTY_MASK;
    let mut noughts = EMPTY_MASK;

    for (row, rank) in grid.iter().enumerate() {
        for (file, occupant) in rank.iter().enumerate() {
            let bit = cell_at(row, file).bit();
            match occupant {
                Some(Player::Crosses) => crosses |= bit,
                Some(Player::Noughts) => noughts |= bit,
                None => {}
            }
        }
    }

    Position::from_bits(crosses, noughts)
}

// ========== Grid <-> Diagram ==========

/// Render the piece-placement field of a diagram.
pub fn to_diagram(grid: &Occupants) -> String {
    let ranks: Vec<String> = grid
        .iter()
        .map(|rank| {
            rank.iter()
                .map(|occupant| occupant.map_or(EMPTY_SYMBOL, Player::symbol))
                .collect()
        })
        .collect();

    ranks.join(RANK_SEPARATOR.to_string().as_str())
}

/// Parse the piece-placement field of a diagram.
pub fn parse_diagram(text: &str) -> NotationResult<Occupants> {
    let ranks: Vec<&str> = text.split(RANK_SEPARATOR).collect();

    if ranks.len() != BOARD_RANKS {
        return Err(NotationError::RankCount {
            expected: BOARD_RANKS,
            found: ranks.len(),
        });
    }

    let mut grid = [[None; BOARD_FILES]; BOARD_RANKS];

    for (row, rank) in ranks.iter().enumerate() {
        let symbols: Vec<char> = rank.chars().collect();

        if symbols.len() != BOARD_FILES {
            return Err(NotationError::FileCount {
                rank: BOARD_RANKS - row,
                expected: BOARD_FILES,
                found: symbols.len(),
            });
        }

        for (file, &symbol) in symbols.iter().enumerate() {
            grid[row][file] = match symbol {
                EMPTY_SYMBOL => None,
                _ => Some(Player::from_symbol(symbol).ok_or(NotationError::UnknownSymbol(symbol))?),
            };
        }
    }

    Ok(grid)
}

/// Symbols for the printed board; empty cells are blank.
pub fn to_symbols(grid: &Occupants) -> [[char; BOARD_FILES]; BOARD_RANKS] {
    grid.map(|rank| rank.map(|occupant| occupant.map_or(' ', Player::symbol)))
}

// ========== Cell <-> Coordinate ==========

/// Algebraic name of a cell.
pub fn to_coordinate(cell: Cell) -> NotationResult<&'static str> {
    COORDINATES
        .get(cell.0 as usize)
        .copied()
        .ok_or(NotationError::CellOutOfRange(cell.0))
}

/// Cell named by an algebraic coordinate.
pub fn to_cell(text: &str) -> NotationResult<Cell> {
    COORDINATES
        .iter()
        .position(|&name| name == text)
        .map(|index| Cell(index as u8))
        .ok_or_else(|| {
            debug!(coordinate = text, "rejected coordinate");
            NotationError::InvalidCoordinate(text.to_string())
        })
}
