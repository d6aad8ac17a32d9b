//! Tictactoe-Minimax: an exhaustive tic-tac-toe solver.
//!
//! This crate computes optimal play for 3x3 tic-tac-toe with minimax search
//! and alpha-beta pruning over immutable board values.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, winning lines, and engine defaults
//! - [`board`] - Board state model (players, actions, successor boards)
//! - [`outcome`] - Terminal detection and scoring
//! - [`search`] - Minimax with alpha-beta pruning
//! - [`playout`] - Policies and whole-game simulation
//! - [`protocol`] - Text protocol for an external front end
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use tictactoe_minimax::board::{Action, apply, initial_state};
//! use tictactoe_minimax::search::best_action;
//!
//! // X opens in the centre
//! let board = apply(&initial_state(), Action::new(1, 1)).unwrap();
//!
//! // Find O's best reply
//! let reply = best_action(&board).unwrap();
//! println!("O plays {reply}");
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod outcome;
pub mod playout;
pub mod protocol;
pub mod search;

pub use board::{Action, Actions, Board, Cell, Player};
pub use board::{active_player, apply, initial_state, legal_actions};
pub use error::{InvalidActionError, InvalidActionReason, ParseError};
pub use outcome::{Outcome, is_terminal, outcome, utility, winner};
pub use search::{RootWindow, SearchStats, Searcher, best_action, max_value, min_value};
