//! Integration tests for tictactoe-minimax
//!
//! Properties are checked over every board reachable from the empty board
//! (5478 of them), plus a handful of hand-written scenarios.

use std::collections::HashSet;

use tictactoe_minimax::board::{
    Action, Board, Cell, Player, active_player, apply, initial_state, legal_actions,
};
use tictactoe_minimax::error::InvalidActionReason;
use tictactoe_minimax::outcome::{Outcome, is_terminal, outcome, utility, winner};
use tictactoe_minimax::playout::{OptimalPolicy, RandomPolicy, play_game, random_playout};
use tictactoe_minimax::search::{RootWindow, Searcher, best_action, minimax_value};

// =============================================================================
// Helper functions
// =============================================================================

const X: Option<Player> = Some(Player::X);
const O: Option<Player> = Some(Player::O);
const E: Option<Player> = None;

/// Every board reachable from the empty board through legal play.
fn reachable_boards() -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut stack = vec![initial_state()];
    let mut out = Vec::new();
    while let Some(board) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        out.push(board);
        if let Some(actions) = legal_actions(&board) {
            for action in actions {
                stack.push(apply(&board, action).unwrap());
            }
        }
    }
    out
}

/// All 9 in-range coordinates.
fn all_cells() -> impl Iterator<Item = Action> {
    (0..3).flat_map(|r| (0..3).map(move |c| Action::new(r, c)))
}

// =============================================================================
// State model properties
// =============================================================================

#[test]
fn test_reachable_board_count() {
    assert_eq!(reachable_boards().len(), 5478);
}

#[test]
fn test_legal_actions_none_iff_terminal() {
    for board in reachable_boards() {
        assert_eq!(
            legal_actions(&board).is_none(),
            is_terminal(&board),
            "board:\n{board}"
        );
        assert_eq!(active_player(&board).is_none(), is_terminal(&board));
    }
}

#[test]
fn test_mark_counts_stay_balanced() {
    for board in reachable_boards() {
        let x = board.count(Player::X);
        let o = board.count(Player::O);
        assert!(x == o || x == o + 1, "x={x} o={o}\n{board}");
    }
}

#[test]
fn test_apply_changes_only_target_cell() {
    for board in reachable_boards() {
        let Some(actions) = legal_actions(&board) else {
            continue;
        };
        let player = active_player(&board).unwrap();
        for action in actions.iter() {
            let next = apply(&board, action).unwrap();
            for cell in all_cells() {
                if cell == action {
                    assert_eq!(next.get(cell.row, cell.col), Cell::Mark(player));
                } else {
                    assert_eq!(
                        next.get(cell.row, cell.col),
                        board.get(cell.row, cell.col)
                    );
                }
            }
        }
    }
}

#[test]
fn test_apply_rejects_everything_outside_legal_set() {
    for board in reachable_boards() {
        let legal = legal_actions(&board);
        for action in all_cells() {
            let is_legal = legal.as_ref().is_some_and(|a| a.contains(action));
            if !is_legal {
                let err = apply(&board, action).unwrap_err();
                assert_eq!(err.action, action);
                let expected = if is_terminal(&board) {
                    InvalidActionReason::GameOver
                } else {
                    InvalidActionReason::Occupied
                };
                assert_eq!(err.reason, expected);
            }
        }
        let err = apply(&board, Action::new(0, 3)).unwrap_err();
        assert_eq!(err.reason, InvalidActionReason::OutOfRange);
    }
}

#[test]
fn test_legal_actions_shrink_by_one() {
    for board in reachable_boards() {
        let Some(actions) = legal_actions(&board) else {
            continue;
        };
        for action in actions.iter() {
            let next = apply(&board, action).unwrap();
            match legal_actions(&next) {
                Some(after) => assert_eq!(after.len(), actions.len() - 1),
                None => assert!(is_terminal(&next)),
            }
        }
    }
}

// =============================================================================
// Evaluator properties
// =============================================================================

#[test]
fn test_utility_matches_winner() {
    for board in reachable_boards().into_iter().filter(is_terminal) {
        let expected = match winner(&board) {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => {
                assert!(board.is_full());
                0
            }
        };
        assert_eq!(utility(&board), expected);
    }
}

#[test]
fn test_scenario_unfinished_board() {
    let board = Board::from_rows([[X, O, X], [O, X, O], [E, E, O]]);
    assert_eq!(winner(&board), None);
    assert!(!is_terminal(&board));
    assert_eq!(legal_actions(&board).unwrap().len(), 2);
    assert_eq!(outcome(&board), Outcome::Ongoing);
}

#[test]
fn test_scenario_x_won() {
    let board = Board::from_rows([[X, X, X], [O, O, E], [E, E, E]]);
    assert_eq!(winner(&board), Some(Player::X));
    assert!(is_terminal(&board));
    assert_eq!(utility(&board), 1);
    assert_eq!(legal_actions(&board), None);
    assert_eq!(active_player(&board), None);
}

// =============================================================================
// Search tests
// =============================================================================

#[test]
fn test_scenario_o_blocks_row() {
    let board = Board::from_rows([[X, X, E], [O, E, E], [E, E, E]]);
    assert_eq!(active_player(&board), Some(Player::O));
    assert_eq!(best_action(&board), Some(Action::new(0, 2)));
}

#[test]
fn test_optimal_play_from_empty_board_draws() {
    let mut board = initial_state();
    while let Some(action) = best_action(&board) {
        board = apply(&board, action).unwrap();
    }
    assert!(is_terminal(&board));
    assert_eq!(utility(&board), 0);
}

#[test]
fn test_best_action_achieves_minimax_value() {
    // Sample every 7th reachable board to keep the test quick.
    for board in reachable_boards().into_iter().step_by(7) {
        let Some(action) = best_action(&board) else {
            assert!(is_terminal(&board));
            continue;
        };
        let value = minimax_value(&board);
        let next = apply(&board, action).unwrap();
        assert_eq!(minimax_value(&next), value, "board:\n{board}");
    }
}

#[test]
fn test_root_windows_agree() {
    for board in reachable_boards().into_iter().step_by(11) {
        let mut reset = Searcher::with_window(RootWindow::Reset);
        let mut threaded = Searcher::with_window(RootWindow::Threaded);
        assert_eq!(
            reset.best_action(&board),
            threaded.best_action(&board),
            "board:\n{board}"
        );
    }
}

#[test]
fn test_search_does_not_mutate_board() {
    let board: Board = "X../.O./..X".parse().unwrap();
    let copy = board;
    best_action(&board);
    assert_eq!(board, copy);
}

// =============================================================================
// Playout tests
// =============================================================================

#[test]
fn test_engine_never_loses_to_random() {
    for seed in 0..20 {
        let mut engine = OptimalPolicy::new(RootWindow::Threaded);
        let mut random = RandomPolicy::with_seed(seed);

        let game = play_game(&initial_state(), &mut engine, &mut random).unwrap();
        assert_ne!(game.winner(), Some(Player::O), "seed {seed}: {:?}", game.moves);

        let game = play_game(&initial_state(), &mut random, &mut engine).unwrap();
        assert_ne!(game.winner(), Some(Player::X), "seed {seed}: {:?}", game.moves);
    }
}

#[test]
fn test_random_playouts_end_terminal() {
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..100 {
        let end = random_playout(&initial_state(), &mut rng);
        assert!(is_terminal(&end));
        let x = end.count(Player::X);
        let o = end.count(Player::O);
        assert!(x == o || x == o + 1);
    }
}
