//! WASM bindings for tictactoe-core
//!
//! Provides a JavaScript-friendly API for the game logic. Unlike the
//! native engine, moves coming from JavaScript are validated.

use wasm_bindgen::prelude::*;

use crate::{codec, Board, Cell, Game, TicTacToeGame};

/// WASM-friendly wrapper around the engine
#[wasm_bindgen]
pub struct WasmGame {
    inner: TicTacToeGame,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game on the empty board
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { inner: TicTacToeGame::new() }
    }

    /// Create a game from a diagram such as `X--/-O-/--- X`
    #[wasm_bindgen(js_name = fromDiagram)]
    pub fn from_diagram(diagram: &str) -> Result<WasmGame, JsError> {
        let board = Board::from_diagram(diagram)?;
        Ok(WasmGame { inner: TicTacToeGame::with_board(board) })
    }

    /// Diagram of the current state
    #[wasm_bindgen(js_name = toDiagram)]
    pub fn to_diagram(&self) -> String {
        self.inner.to_board().to_diagram()
    }

    /// Signed turn: 1 (crosses) or -1 (noughts)
    pub fn turn(&self) -> i8 {
        self.inner.turn().turn()
    }

    /// Legal moves as an array of coordinates
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&mut self) -> Result<JsValue, JsError> {
        let moves: Vec<String> = self
            .inner
            .legal_moves()
            .into_iter()
            .map(|mov| mov.to_string())
            .collect();
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    /// Play a move given as a coordinate. Returns false if it is illegal.
    #[wasm_bindgen(js_name = makeMove)]
    pub fn make_move(&mut self, coordinate: &str) -> bool {
        match codec::to_cell(coordinate) {
            Ok(mov) if self.inner.is_legal(mov) => {
                self.inner.make_move(mov);
                true
            }
            _ => false,
        }
    }

    /// Take back the last move. Returns false if there is none.
    #[wasm_bindgen(js_name = unmakeMove)]
    pub fn unmake_move(&mut self) -> bool {
        if self.inner.length() == 0 {
            return false;
        }
        self.inner.unmake_move();
        true
    }

    /// Played moves as an array of coordinates
    pub fn history(&self) -> Result<JsValue, JsError> {
        let moves: Vec<String> = self.inner.moves().iter().map(Cell::to_string).collect();
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    /// Check if the match is over
    #[wasm_bindgen(js_name = hasEnded)]
    pub fn has_ended(&self) -> bool {
        self.inner.has_ended()
    }

    /// Utility score: positive if crosses won, negative if noughts won
    pub fn outcome(&self) -> i32 {
        self.inner.outcome()
    }

    /// Position fingerprint
    pub fn hash(&self) -> u64 {
        self.inner.hash()
    }

    /// Text rendering of the current state
    pub fn render(&self) -> String {
        self.inner.to_board().to_string()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
