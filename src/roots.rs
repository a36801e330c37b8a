//! Opening-move policy consulted before handing a position to the search.

use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::trace;

use crate::game::Game;

/// Chooses moves without searching.
pub trait Roots<G: Game> {
    /// Forget any per-match state.
    fn new_match(&mut self);

    /// Move to play right away, or `None` to let the search decide.
    fn pick_best_move(&mut self, game: &mut G) -> Option<G::Move>;

    /// Move to ponder on while the opponent thinks.
    fn pick_ponder_move(&mut self, game: &mut G) -> Option<G::Move>;
}

/// Plays a uniformly random first move; every later move is left to
/// the search.
#[derive(Clone, Debug)]
pub struct RandomRoots<R = ThreadRng> {
    rng: R,
}

impl RandomRoots<ThreadRng> {
    /// Policy backed by the thread-local generator.
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for RandomRoots<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomRoots<R> {
    /// Policy backed by a caller-supplied generator.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn pick_random_move<G: Game>(&mut self, game: &mut G) -> Option<G::Move> {
        let mov = game.legal_moves().choose(&mut self.rng).copied();
        trace!(?mov, length = game.length(), "random root move");
        mov
    }
}

impl<G: Game, R: Rng> Roots<G> for RandomRoots<R> {
    fn new_match(&mut self) {}

    fn pick_best_move(&mut self, game: &mut G) -> Option<G::Move> {
        if game.length() == 0 {
            self.pick_random_move(game)
        } else {
            None
        }
    }

    fn pick_ponder_move(&mut self, game: &mut G) -> Option<G::Move> {
        self.pick_random_move(game)
    }
}
