//! Error types.

use thiserror::Error;

use crate::board::Action;

/// Why an action was rejected by [`apply`](crate::board::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidActionReason {
    /// Row or column outside `0..3`.
    OutOfRange,
    /// The target cell already holds a mark.
    Occupied,
    /// The board is terminal; no action is legal.
    GameOver,
}

impl std::fmt::Display for InvalidActionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidActionReason::OutOfRange => write!(f, "coordinate out of range"),
            InvalidActionReason::Occupied => write!(f, "cell is not empty"),
            InvalidActionReason::GameOver => write!(f, "game is already over"),
        }
    }
}

/// An action that is not in the legal-action set of the board it was applied to.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid action {action}: {reason}")]
pub struct InvalidActionError {
    pub action: Action,
    pub reason: InvalidActionReason,
}

/// Errors from parsing boards and actions out of text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    #[error("board must have 9 cells, got {got}")]
    CellCount { got: usize },

    #[error("invalid cell character '{character}' at cell {index}")]
    CellCharacter { character: char, index: usize },

    #[error("unreachable mark counts: X={x_count}, O={o_count} (X must equal O or lead by one)")]
    MarkCounts { x_count: usize, o_count: usize },

    #[error("invalid action '{input}' (expected 'row,col')")]
    Action { input: String },
}
