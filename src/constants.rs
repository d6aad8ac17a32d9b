//! Constants for board geometry, scoring, and engine defaults.
//!
//! The board is stored as a flat row-major array of [`CELLS`] cells, so the
//! cell at `(row, col)` lives at index `row * SIZE + col`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Only the classic 3x3 game is supported.
pub const SIZE: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = SIZE * SIZE;

/// The 8 winning lines as row-major cell indices.
///
/// Order is canonical: rows top to bottom, then columns left to right,
/// then the main diagonal and the anti-diagonal.
pub const LINES: [[usize; SIZE]; 8] = [
    [0, 1, 2], // row 0
    [3, 4, 5], // row 1
    [6, 7, 8], // row 2
    [0, 3, 6], // column 0
    [1, 4, 7], // column 1
    [2, 5, 8], // column 2
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

// =============================================================================
// Utility Values (from the first player's perspective)
// =============================================================================

/// Utility of a board won by the first player.
pub const UTILITY_FIRST_WINS: i32 = 1;

/// Utility of a board won by the second player.
pub const UTILITY_SECOND_WINS: i32 = -1;

/// Utility of a drawn (or unfinished) board.
pub const UTILITY_DRAW: i32 = 0;

/// Search bound standing in for -infinity. Strictly below every utility.
pub const NEG_INF: i32 = i32::MIN;

/// Search bound standing in for +infinity. Strictly above every utility.
pub const POS_INF: i32 = i32::MAX;

// =============================================================================
// Engine Defaults
// =============================================================================

/// Engine name reported by the text protocol.
pub const ENGINE_NAME: &str = "tictactoe-minimax";

/// Text protocol version.
pub const PROTOCOL_VERSION: u32 = 1;

/// Default number of games played by the `arena` command.
pub const ARENA_GAMES: usize = 200;

/// Default RNG seed for the `arena` command.
pub const ARENA_SEED: u64 = 42;
