//! Whole-game simulation with pluggable move policies.
//!
//! A policy picks an action for the player to move; [`play_game`] alternates
//! two policies through [`apply`] until the board is terminal. Random
//! policies use a seedable [`fastrand::Rng`] so games are reproducible.

use tracing::trace;

use crate::board::{Action, Board, Player, active_player, apply, legal_actions, to_move};
use crate::error::InvalidActionError;
use crate::outcome::{Outcome, outcome};
use crate::search::{RootWindow, SearchStats, Searcher};

/// Chooses an action for the player to move on a board.
pub trait Policy {
    /// `None` only when the board is terminal.
    fn choose(&mut self, board: &Board) -> Option<Action>;
}

/// Plays the minimax-optimal action.
#[derive(Clone, Debug, Default)]
pub struct OptimalPolicy {
    searcher: Searcher,
}

impl OptimalPolicy {
    pub fn new(window: RootWindow) -> Self {
        Self {
            searcher: Searcher::with_window(window),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.searcher.stats()
    }
}

impl Policy for OptimalPolicy {
    fn choose(&mut self, board: &Board) -> Option<Action> {
        self.searcher.best_action(board)
    }
}

/// Plays a uniformly random legal action.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPolicy {
    fn choose(&mut self, board: &Board) -> Option<Action> {
        random_action(board, &mut self.rng)
    }
}

/// A uniformly random legal action, or `None` on a terminal board.
pub fn random_action(board: &Board, rng: &mut fastrand::Rng) -> Option<Action> {
    let actions = legal_actions(board)?;
    rng.choice(actions.as_slice()).copied()
}

/// A finished game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    /// Actions in the order they were played.
    pub moves: Vec<Action>,
    pub final_board: Board,
    pub outcome: Outcome,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Outcome::Win(p) => Some(p),
            _ => None,
        }
    }
}

/// Play from `board` to the end, X moves chosen by `x`, O moves by `o`.
///
/// An action a policy returns is applied as-is; an illegal one ends the
/// game with the [`InvalidActionError`] instead of being corrected.
pub fn play_game(
    board: &Board,
    x: &mut dyn Policy,
    o: &mut dyn Policy,
) -> Result<GameRecord, InvalidActionError> {
    let mut board = *board;
    let mut moves = Vec::new();

    while let Some(player) = active_player(&board) {
        let choice = match player {
            Player::X => x.choose(&board),
            Player::O => o.choose(&board),
        };
        let Some(action) = choice else {
            break;
        };
        board = apply(&board, action)?;
        trace!(%player, %action, "played");
        moves.push(action);
    }

    Ok(GameRecord {
        moves,
        final_board: board,
        outcome: outcome(&board),
    })
}

/// Play uniformly random legal moves from `board` until the game ends.
pub fn random_playout(board: &Board, rng: &mut fastrand::Rng) -> Board {
    let mut board = *board;
    while let Some(action) = random_action(&board, rng) {
        board = board.with_mark(action, to_move(&board));
    }
    board
}
