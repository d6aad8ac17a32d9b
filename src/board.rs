//! Board state model: cells, players, actions, and successor construction.
//!
//! Boards are small `Copy` values. Applying an action never touches the
//! input board; it returns a new one with exactly one more mark.

use std::fmt;
use std::str::FromStr;

use crate::constants::{CELLS, SIZE};
use crate::error::{InvalidActionError, InvalidActionReason, ParseError};
use crate::outcome::is_terminal;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// The player who moves from the initial board.
    pub const FIRST: Player = Player::X;

    /// The player who moves second.
    pub const SECOND: Player = Player::O;

    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn mark(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Mark(Player),
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Mark(p) => Some(p),
        }
    }
}

impl From<Option<Player>> for Cell {
    fn from(value: Option<Player>) -> Self {
        value.map_or(Cell::Empty, Cell::Mark)
    }
}

/// A `(row, col)` coordinate. Only meaningful relative to a board.
///
/// Out-of-range coordinates can be constructed so that callers get a
/// proper [`InvalidActionError`] from [`apply`] instead of a panic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row < SIZE && self.col < SIZE
    }

    /// Row-major cell index. Caller must check [`Action::in_bounds`].
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.row * SIZE + self.col
    }

    #[inline]
    pub(crate) fn from_index(idx: usize) -> Self {
        Self::new(idx / SIZE, idx % SIZE)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl From<(usize, usize)> for Action {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Parse `"row,col"` or `"row col"`, e.g. `"0,2"`.
impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Action {
            input: s.to_string(),
        };
        let mut parts = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());
        let row = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let col = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Action::new(row, col))
    }
}

/// The legal actions of a board, in row-major order.
///
/// Behaves like a set for queries; the fixed order makes tie-breaking in
/// the search reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Actions {
    actions: Vec<Action>,
}

impl Actions {
    pub fn contains(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.iter().copied()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }
}

impl IntoIterator for Actions {
    type Item = Action;
    type IntoIter = std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

/// A 3x3 board stored row-major.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// Build a board from rows of optional marks.
    ///
    /// No reachability check is done here; use [`str::parse`] for input
    /// that should be validated.
    pub fn from_rows(rows: [[Option<Player>; SIZE]; SIZE]) -> Self {
        let mut board = Board::default();
        for (r, row) in rows.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                board.cells[r * SIZE + c] = cell.into();
            }
        }
        board
    }

    /// Cell at `(row, col)`. Panics if out of range.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(row < SIZE && col < SIZE, "cell ({row},{col}) out of range");
        self.cells[row * SIZE + col]
    }

    #[inline]
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Number of marks `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Mark(player))
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    /// Empty cells as actions, row-major, regardless of whether the game is over.
    pub(crate) fn empty_cells(&self) -> impl Iterator<Item = Action> + '_ {
        (0..CELLS)
            .filter(move |&i| self.cells[i] == Cell::Empty)
            .map(Action::from_index)
    }

    /// Copy of this board with `player`'s mark at `action`. No legality check.
    #[inline]
    pub(crate) fn with_mark(&self, action: Action, player: Player) -> Board {
        let mut next = *self;
        next.cells[action.index()] = Cell::Mark(player);
        next
    }
}

/// Parse nine cells: `X`, `O`, and `.`, `-` or `_` for empty.
///
/// Whitespace, `/` and `|` are separators and ignored, so both
/// `"XO./.X./..O"` and the [`Display`](fmt::Display) output parse.
/// Mark counts must be reachable from the initial board.
impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(CELLS);
        for ch in s.chars() {
            let cell = match ch {
                'X' | 'x' => Cell::Mark(Player::X),
                'O' | 'o' => Cell::Mark(Player::O),
                '.' | '-' | '_' => Cell::Empty,
                '/' | '|' => continue,
                c if c.is_whitespace() => continue,
                character => {
                    return Err(ParseError::CellCharacter {
                        character,
                        index: cells.len(),
                    });
                }
            };
            cells.push(cell);
        }
        let cells: [Cell; CELLS] = cells
            .try_into()
            .map_err(|v: Vec<Cell>| ParseError::CellCount { got: v.len() })?;
        let board = Board { cells };

        let x_count = board.count(Player::FIRST);
        let o_count = board.count(Player::SECOND);
        if x_count != o_count && x_count != o_count + 1 {
            return Err(ParseError::MarkCounts { x_count, o_count });
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SIZE) {
            for (c, cell) in row.iter().enumerate() {
                let ch = cell.player().map_or('.', Player::mark);
                if c + 1 < SIZE {
                    write!(f, "{ch} ")?;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// =============================================================================
// State model operations
// =============================================================================

/// The empty starting board.
pub fn initial_state() -> Board {
    Board::default()
}

/// The player to move, or `None` on a terminal board.
///
/// The first player moves whenever it does not lead in marks, which covers
/// the empty board without a special case.
pub fn active_player(board: &Board) -> Option<Player> {
    if is_terminal(board) {
        return None;
    }
    Some(to_move(board))
}

/// Counting rule alone, without the terminal check.
#[inline]
pub(crate) fn to_move(board: &Board) -> Player {
    if board.count(Player::FIRST) > board.count(Player::SECOND) {
        Player::SECOND
    } else {
        Player::FIRST
    }
}

/// Empty cells in row-major order, or `None` on a terminal board.
pub fn legal_actions(board: &Board) -> Option<Actions> {
    if is_terminal(board) {
        return None;
    }
    Some(Actions {
        actions: board.empty_cells().collect(),
    })
}

/// Place the active player's mark at `action` on a copy of `board`.
pub fn apply(board: &Board, action: Action) -> Result<Board, InvalidActionError> {
    let invalid = |reason| InvalidActionError { action, reason };

    if !action.in_bounds() {
        return Err(invalid(InvalidActionReason::OutOfRange));
    }
    let Some(player) = active_player(board) else {
        return Err(invalid(InvalidActionReason::GameOver));
    };
    if board.cells[action.index()] != Cell::Empty {
        return Err(invalid(InvalidActionReason::Occupied));
    }
    Ok(board.with_mark(action, player))
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Player> = Some(Player::X);
    const O: Option<Player> = Some(Player::O);
    const E: Option<Player> = None;

    #[test]
    fn test_initial_state_is_empty() {
        let board = initial_state();
        assert!(board.cells().iter().all(|&c| c == Cell::Empty));
        assert_eq!(active_player(&board), Some(Player::X));
    }

    #[test]
    fn test_active_player_alternates() {
        let board = initial_state();
        let b1 = apply(&board, Action::new(1, 1)).unwrap();
        assert_eq!(active_player(&b1), Some(Player::O));
        let b2 = apply(&b1, Action::new(0, 0)).unwrap();
        assert_eq!(active_player(&b2), Some(Player::X));
    }

    #[test]
    fn test_legal_actions_row_major() {
        let board = Board::from_rows([[X, E, O], [E, E, E], [E, E, E]]);
        let actions = legal_actions(&board).unwrap();
        assert_eq!(actions.len(), 7);
        assert_eq!(actions.as_slice()[0], Action::new(0, 1));
        assert_eq!(actions.as_slice()[1], Action::new(1, 0));
        assert!(!actions.contains(Action::new(0, 0)));
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let board = initial_state();
        let next = apply(&board, Action::new(2, 1)).unwrap();
        assert_eq!(board, initial_state());
        assert_eq!(next.get(2, 1), Cell::Mark(Player::X));
    }

    #[test]
    fn test_apply_rejects_occupied() {
        let board = Board::from_rows([[X, E, E], [E, E, E], [E, E, E]]);
        let err = apply(&board, Action::new(0, 0)).unwrap_err();
        assert_eq!(err.reason, InvalidActionReason::Occupied);
    }

    #[test]
    fn test_apply_rejects_out_of_range() {
        let err = apply(&initial_state(), Action::new(3, 0)).unwrap_err();
        assert_eq!(err.reason, InvalidActionReason::OutOfRange);
    }

    #[test]
    fn test_apply_rejects_on_terminal_board() {
        let board = Board::from_rows([[X, X, X], [O, O, E], [E, E, E]]);
        let err = apply(&board, Action::new(2, 2)).unwrap_err();
        assert_eq!(err.reason, InvalidActionReason::GameOver);
    }

    #[test]
    fn test_parse_board() {
        let board: Board = "XX./O../...".parse().unwrap();
        assert_eq!(board, Board::from_rows([[X, X, E], [O, E, E], [E, E, E]]));
    }

    #[test]
    fn test_parse_board_display_roundtrip() {
        let board = Board::from_rows([[X, O, E], [E, X, E], [O, E, E]]);
        let parsed: Board = board.to_string().parse().unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_parse_board_errors() {
        assert_eq!(
            "XO.".parse::<Board>(),
            Err(ParseError::CellCount { got: 3 })
        );
        assert_eq!(
            "XO?......".parse::<Board>(),
            Err(ParseError::CellCharacter {
                character: '?',
                index: 2
            })
        );
        assert_eq!(
            "OO.......".parse::<Board>(),
            Err(ParseError::MarkCounts {
                x_count: 0,
                o_count: 2
            })
        );
    }

    #[test]
    fn test_parse_action() {
        assert_eq!("0,2".parse::<Action>(), Ok(Action::new(0, 2)));
        assert_eq!(" 1 1 ".parse::<Action>(), Ok(Action::new(1, 1)));
        assert!("1".parse::<Action>().is_err());
        assert!("a,b".parse::<Action>().is_err());
        assert!("1,2,3".parse::<Action>().is_err());
    }
}
