//! Mutable match state driven by a search algorithm.
//!
//! A search explores the game tree depth-first through three calls:
//! `next_move` to enumerate, `make_move` to descend and `unmake_move` to
//! retreat. Each history frame keeps the generation cursor that was active
//! when its move was made, so enumeration at a shallower ply resumes
//! exactly where it stopped.

use std::fmt;

use tracing::debug;

use crate::{
    Board, Cell, Player, Position, DRAW_SCORE, EMPTY_MASK, MAX_PLIES, MAX_SCORE,
};

/// The capabilities a decision algorithm relies on.
///
/// Scores are always from the point of view of the player who moves
/// first: positive favours crosses, negative favours noughts.
pub trait Game {
    /// Move identifier.
    type Move: Copy + fmt::Debug;

    /// Number of moves played since the start board.
    fn length(&self) -> usize;

    /// Player to move.
    fn turn(&self) -> Player;

    /// Move that led to the current state, if any.
    fn last_move(&self) -> Option<Self::Move>;

    /// Moves played since the start board, oldest first.
    fn moves(&self) -> Vec<Self::Move>;

    /// Check if no more moves are possible.
    fn has_ended(&self) -> bool;

    /// Check if a move can be played on the current state.
    fn is_legal(&self, mov: Self::Move) -> bool;

    /// Exact evaluation, treating the current state as final.
    fn outcome(&self) -> i32;

    /// Heuristic evaluation of a non-terminal state.
    fn score(&self) -> i32;

    /// Bias applied by the search when choosing between draws.
    fn contempt(&self) -> i32;

    /// Fingerprint of the current position.
    fn hash(&self) -> u64;

    /// Convert an evaluation score to centipawns.
    fn to_centi_pawns(&self, score: i32) -> i32;

    /// Current move generation cursor.
    fn cursor(&self) -> u16;

    /// Restore a previously saved move generation cursor.
    fn set_cursor(&mut self, cursor: u16);

    /// Restart move generation from the first legal move.
    fn reset_cursor(&mut self);

    /// Next legal move, or `None` once the cursor is exhausted.
    fn next_move(&mut self) -> Option<Self::Move>;

    /// Play a legal move.
    fn make_move(&mut self, mov: Self::Move);

    /// Take back the last move played.
    fn unmake_move(&mut self);

    /// All legal moves, leaving the generation cursor untouched.
    fn legal_moves(&mut self) -> Vec<Self::Move> {
        let cursor = self.cursor();
        let mut moves = Vec::new();

        self.reset_cursor();
        while let Some(mov) = self.next_move() {
            moves.push(mov);
        }
        self.set_cursor(cursor);

        moves
    }
}

/// Tic-tac-toe engine.
///
/// History is a pair of fixed arrays indexed by ply: `moves[i]` holds the
/// last move before ply `i` was played and `cursors[i]` the cursor at that
/// moment. Slots at or past `length` are dead and get overwritten.
#[derive(Clone, Debug)]
pub struct TicTacToeGame {
    /// Start state of the match
    board: Board,
    /// Marks on the current state
    state: Position,
    /// Player to move on the current state
    turn: Player,
    /// Move that led to the current state
    last_move: Option<Cell>,
    /// Previous last move, per ply
    moves: [Option<Cell>; MAX_PLIES],
    /// Previous generation cursor, per ply
    cursors: [u16; MAX_PLIES],
    /// Moves played so far
    length: usize,
    /// Cells not yet yielded by `next_move`
    cursor: u16,
    /// Legal cells on the current state
    mobility: u16,
    /// Cached position fingerprint
    hash: u64,
}

impl TicTacToeGame {
    /// Create an engine on the empty board with crosses to move.
    pub fn new() -> Self {
        Self::with_board(Board::new())
    }

    /// Create an engine for the given start state.
    pub fn with_board(board: Board) -> Self {
        let mut game = Self {
            board,
            state: board.position(),
            turn: board.turn(),
            last_move: None,
            moves: [None; MAX_PLIES],
            cursors: [EMPTY_MASK; MAX_PLIES],
            length: 0,
            cursor: EMPTY_MASK,
            mobility: EMPTY_MASK,
            hash: 0,
        };
        game.set_board(board);
        game
    }

    /// Start state of the match.
    pub fn board(&self) -> Board {
        self.board
    }

    /// Replace the start state, discarding all history.
    pub fn set_board(&mut self, board: Board) {
        self.length = 0;
        self.board = board;
        self.state = board.position();
        self.turn = board.turn();
        self.last_move = None;
        self.update_state();
        self.reset_cursor();

        debug!(diagram = %board.to_diagram(), mobility = self.mobility, "engine seeded");
    }

    /// Current state as an immutable board.
    pub fn to_board(&self) -> Board {
        Board::with_position(self.state, self.turn)
    }

    /// Marks on the current state.
    #[inline]
    pub fn position(&self) -> Position {
        self.state
    }

    /// Bitboard of legal cells; empty once the match ended.
    #[inline]
    pub fn mobility(&self) -> u16 {
        self.mobility
    }

    fn compute_mobility(&self) -> u16 {
        if self.outcome() == DRAW_SCORE {
            self.state.vacant()
        } else {
            EMPTY_MASK
        }
    }

    fn update_state(&mut self) {
        self.mobility = self.compute_mobility();
        self.hash = self.state.hash();
    }
}

impl Default for TicTacToeGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for TicTacToeGame {
    type Move = Cell;

    #[inline]
    fn length(&self) -> usize {
        self.length
    }

    #[inline]
    fn turn(&self) -> Player {
        self.turn
    }

    #[inline]
    fn last_move(&self) -> Option<Cell> {
        self.last_move
    }

    fn moves(&self) -> Vec<Cell> {
        // Slot 0 holds the start state's last move, which is always none
        self.moves[..self.length]
            .iter()
            .flatten()
            .copied()
            .chain(self.last_move)
            .collect()
    }

    #[inline]
    fn has_ended(&self) -> bool {
        self.mobility == EMPTY_MASK
    }

    #[inline]
    fn is_legal(&self, mov: Cell) -> bool {
        mov.is_valid() && self.mobility & mov.bit() != 0
    }

    /// Noughts are checked first; in reachable play at most one player
    /// can hold a line.
    fn outcome(&self) -> i32 {
        if self.state.has_won(Player::Noughts) {
            return -MAX_SCORE;
        }
        if self.state.has_won(Player::Crosses) {
            return MAX_SCORE;
        }
        DRAW_SCORE
    }

    #[inline]
    fn score(&self) -> i32 {
        DRAW_SCORE
    }

    #[inline]
    fn contempt(&self) -> i32 {
        DRAW_SCORE
    }

    #[inline]
    fn hash(&self) -> u64 {
        self.hash
    }

    /// Scales by 2.5, truncating toward zero.
    #[inline]
    fn to_centi_pawns(&self, score: i32) -> i32 {
        let centi_pawns = i64::from(score) * 5 / 2;
        centi_pawns.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    #[inline]
    fn cursor(&self) -> u16 {
        self.cursor
    }

    #[inline]
    fn set_cursor(&mut self, cursor: u16) {
        self.cursor = cursor;
    }

    #[inline]
    fn reset_cursor(&mut self) {
        self.cursor = self.mobility;
    }

    #[inline]
    fn next_move(&mut self) -> Option<Cell> {
        if self.cursor == EMPTY_MASK {
            return None;
        }

        let mov = Cell(self.cursor.trailing_zeros() as u8);
        self.cursor &= self.cursor - 1;
        Some(mov)
    }

    /// Does NOT validate - caller must ensure the move is legal.
    fn make_move(&mut self, mov: Cell) {
        debug_assert!(self.is_legal(mov), "illegal move {mov}");

        self.moves[self.length] = self.last_move;
        self.cursors[self.length] = self.cursor;
        self.length += 1;

        self.state.toggle(self.turn, mov);
        self.turn = self.turn.opponent();
        self.last_move = Some(mov);
        self.update_state();
        self.reset_cursor();
    }

    /// Does NOT validate - caller must ensure a move was played.
    fn unmake_move(&mut self) {
        debug_assert!(self.length > 0, "unmake_move on an empty history");

        let Some(mov) = self.last_move else {
            return;
        };

        // The mark belongs to whoever moved into this state
        self.turn = self.turn.opponent();
        self.state.toggle(self.turn, mov);

        self.length -= 1;
        self.last_move = self.moves[self.length];
        self.cursor = self.cursors[self.length];
        self.update_state();
    }
}
