//! Terminal detection and scoring.

use std::fmt;

use crate::board::{Board, Cell, Player};
use crate::constants::{LINES, UTILITY_DRAW, UTILITY_FIRST_WINS, UTILITY_SECOND_WINS};

/// Result of a game as seen from a board. Always derived, never stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win(Player),
    Draw,
    Ongoing,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(p) => write!(f, "{p} wins"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Ongoing => write!(f, "ongoing"),
        }
    }
}

/// The owner of the first complete line in canonical order, if any.
///
/// Boards with several complete lines cannot come from legal play; they
/// still resolve deterministically to the first line matched.
pub fn winner(board: &Board) -> Option<Player> {
    let cells = board.cells();
    LINES.iter().find_map(|&[a, b, c]| match cells[a] {
        Cell::Mark(p) if cells[b] == cells[a] && cells[c] == cells[a] => Some(p),
        _ => None,
    })
}

/// True once someone has won or every cell is filled.
pub fn is_terminal(board: &Board) -> bool {
    winner(board).is_some() || board.is_full()
}

/// Score from the first player's perspective: +1, -1, or 0.
///
/// Only meaningful on terminal boards; an unfinished board scores 0.
pub fn utility(board: &Board) -> i32 {
    match winner(board) {
        Some(Player::FIRST) => UTILITY_FIRST_WINS,
        Some(_) => UTILITY_SECOND_WINS,
        None => UTILITY_DRAW,
    }
}

pub fn outcome(board: &Board) -> Outcome {
    match winner(board) {
        Some(p) => Outcome::Win(p),
        None if board.is_full() => Outcome::Draw,
        None => Outcome::Ongoing,
    }
}
