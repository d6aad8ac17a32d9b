//! Minimax search with alpha-beta pruning.
//!
//! This module implements exhaustive adversarial search over the board model:
//! - `max_value` / `min_value` recursion with alpha-beta cutoffs
//! - top-level action selection with a first-wins tie-break
//! - node, leaf, and cutoff counters for comparing root window policies
//!
//! Values are always from the first player's perspective, so X maximises
//! and O minimises. Actions are explored in row-major order, which fixes
//! which of several equally good actions is returned.

use tracing::debug;

use crate::board::{Action, Board, Player, active_player, legal_actions, to_move};
use crate::constants::{NEG_INF, POS_INF};
use crate::outcome::{is_terminal, utility};

/// How alpha-beta bounds are set for each top-level action.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RootWindow {
    /// Every top-level action is searched with a fresh `(-inf, +inf)` window.
    #[default]
    Reset,
    /// The best value so far narrows the window of later top-level actions.
    Threaded,
}

/// Counters collected during a search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Boards visited by `max_value` / `min_value`.
    pub nodes: u64,
    /// Terminal boards scored.
    pub leaves: u64,
    /// Times the remaining siblings were skipped because `beta <= alpha`.
    pub cutoffs: u64,
}

/// Search driver holding the root window policy and node statistics.
///
/// Statistics accumulate across calls until [`Searcher::reset_stats`].
#[derive(Clone, Debug, Default)]
pub struct Searcher {
    window: RootWindow,
    stats: SearchStats,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(window: RootWindow) -> Self {
        Self {
            window,
            stats: SearchStats::default(),
        }
    }

    pub fn window(&self) -> RootWindow {
        self.window
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Optimal action for the player to move, or `None` on a terminal board.
    ///
    /// The first action (row-major) reaching the optimal value is returned:
    /// X keeps an action only if it is strictly better than the best so far,
    /// O only if it is strictly lower.
    pub fn best_action(&mut self, board: &Board) -> Option<Action> {
        let player = active_player(board)?;
        let actions = legal_actions(board)?;
        let before = self.stats;

        let mut best = None;
        let mut best_value;
        match player {
            Player::X => {
                best_value = NEG_INF;
                for action in actions {
                    let alpha = match self.window {
                        RootWindow::Reset => NEG_INF,
                        RootWindow::Threaded => best_value,
                    };
                    let child = board.with_mark(action, player);
                    let value = self.min_value(&child, alpha, POS_INF);
                    debug!(%action, value, "evaluated root action");
                    if value > best_value {
                        best_value = value;
                        best = Some(action);
                    }
                }
            }
            Player::O => {
                best_value = POS_INF;
                for action in actions {
                    let beta = match self.window {
                        RootWindow::Reset => POS_INF,
                        RootWindow::Threaded => best_value,
                    };
                    let child = board.with_mark(action, player);
                    let value = self.max_value(&child, NEG_INF, beta);
                    debug!(%action, value, "evaluated root action");
                    if value < best_value {
                        best_value = value;
                        best = Some(action);
                    }
                }
            }
        }

        debug!(
            %player,
            best = ?best.map(|a| a.to_string()),
            value = best_value,
            nodes = self.stats.nodes - before.nodes,
            cutoffs = self.stats.cutoffs - before.cutoffs,
            window = ?self.window,
            "search complete"
        );
        best
    }

    /// Value of `board` when the maximiser (X) is to move.
    pub fn max_value(&mut self, board: &Board, mut alpha: i32, beta: i32) -> i32 {
        self.stats.nodes += 1;
        if is_terminal(board) {
            self.stats.leaves += 1;
            return utility(board);
        }

        let player = to_move(board);
        let mut value = NEG_INF;
        for action in board.empty_cells() {
            let child = board.with_mark(action, player);
            value = value.max(self.min_value(&child, alpha, beta));
            alpha = alpha.max(value);
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }
        value
    }

    /// Value of `board` when the minimiser (O) is to move.
    pub fn min_value(&mut self, board: &Board, alpha: i32, mut beta: i32) -> i32 {
        self.stats.nodes += 1;
        if is_terminal(board) {
            self.stats.leaves += 1;
            return utility(board);
        }

        let player = to_move(board);
        let mut value = POS_INF;
        for action in board.empty_cells() {
            let child = board.with_mark(action, player);
            value = value.min(self.max_value(&child, alpha, beta));
            beta = beta.min(value);
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }
        value
    }

    /// Exact game-theoretic value of `board` under optimal play.
    pub fn minimax_value(&mut self, board: &Board) -> i32 {
        match to_move(board) {
            Player::X => self.max_value(board, NEG_INF, POS_INF),
            Player::O => self.min_value(board, NEG_INF, POS_INF),
        }
    }

    /// Every legal action with its exact value, in row-major order.
    ///
    /// Empty on a terminal board.
    pub fn evaluate_actions(&mut self, board: &Board) -> Vec<(Action, i32)> {
        let Some(player) = active_player(board) else {
            return Vec::new();
        };
        board
            .empty_cells()
            .map(|action| {
                let child = board.with_mark(action, player);
                (action, self.minimax_value(&child))
            })
            .collect()
    }
}

/// Optimal action for the player to move, with per-action windows.
pub fn best_action(board: &Board) -> Option<Action> {
    Searcher::new().best_action(board)
}

pub fn max_value(board: &Board, alpha: i32, beta: i32) -> i32 {
    Searcher::new().max_value(board, alpha, beta)
}

pub fn min_value(board: &Board, alpha: i32, beta: i32) -> i32 {
    Searcher::new().min_value(board, alpha, beta)
}

pub fn minimax_value(board: &Board) -> i32 {
    Searcher::new().minimax_value(board)
}

pub fn evaluate_actions(board: &Board) -> Vec<(Action, i32)> {
    Searcher::new().evaluate_actions(board)
}
