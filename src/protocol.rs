//! Line-oriented text protocol for driving the engine from a front end.
//!
//! The framing follows GTP: each request is one line with an optional
//! numeric id, each response starts with `=` (success) or `?` (failure),
//! echoes the id, and is terminated by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - Engine identification
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `clear_board` - Reset to the empty board
//! - `set_board <cells>` - Load a board, e.g. `set_board XX./O../...`
//! - `showboard` - Render the current board
//! - `play <row,col>` - Apply an action for the player to move
//! - `genmove` - Search, play, and report the optimal action
//! - `undo` - Take back the last action
//! - `legal_moves` - Legal actions in row-major order
//! - `to_move` - Player to move, or `none`
//! - `winner` - Winning player, or `none`
//! - `final_score` - Utility of a finished game
//!
//! ## Example
//!
//! ```ignore
//! use tictactoe_minimax::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, trace};

use crate::board::{Action, Board, active_player, apply, initial_state, legal_actions};
use crate::constants::{ENGINE_NAME, PROTOCOL_VERSION};
use crate::outcome::{is_terminal, utility, winner};
use crate::search::{RootWindow, Searcher};

/// The list of known protocol commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "legal_moves",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "set_board",
    "showboard",
    "to_move",
    "undo",
    "version",
    "winner",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    /// Current board
    board: Board,
    /// Boards before each action, for `undo`
    history: Vec<Board>,
    searcher: Searcher,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    pub fn new() -> Self {
        Self::with_window(RootWindow::default())
    }

    pub fn with_window(window: RootWindow) -> Self {
        Self {
            board: initial_state(),
            history: Vec::new(),
            searcher: Searcher::with_window(window),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();
            trace!(%command, ?args, "protocol command");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, ENGINE_NAME.to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, PROTOCOL_VERSION.to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "clear_board" => {
                self.board = initial_state();
                self.history.clear();
                (true, String::new())
            }

            "set_board" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args.concat().parse::<Board>() {
                    Ok(board) => {
                        self.board = board;
                        self.history.clear();
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.board.to_string().trim_end())),

            "play" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let action = match args.join(" ").parse::<Action>() {
                    Ok(a) => a,
                    Err(e) => return (false, e.to_string()),
                };
                self.play(action)
            }

            "genmove" => match self.searcher.best_action(&self.board) {
                Some(action) => {
                    let (success, message) = self.play(action);
                    if success {
                        (true, action.to_string())
                    } else {
                        (false, message)
                    }
                }
                None => (false, "game is over".to_string()),
            },

            "undo" => match self.history.pop() {
                Some(previous) => {
                    self.board = previous;
                    (true, String::new())
                }
                None => (false, "cannot undo".to_string()),
            },

            "legal_moves" => {
                let moves = legal_actions(&self.board)
                    .map(|actions| {
                        actions
                            .iter()
                            .map(|a| a.to_string())
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .unwrap_or_default();
                (true, moves)
            }

            "to_move" => (
                true,
                active_player(&self.board).map_or("none".to_string(), |p| p.to_string()),
            ),

            "winner" => (
                true,
                winner(&self.board).map_or("none".to_string(), |p| p.to_string()),
            ),

            "final_score" => {
                if is_terminal(&self.board) {
                    (true, utility(&self.board).to_string())
                } else {
                    (false, "game is not over".to_string())
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn play(&mut self, action: Action) -> (bool, String) {
        match apply(&self.board, action) {
            Ok(next) => {
                debug!(%action, "action applied");
                self.history.push(self.board);
                self.board = next;
                (true, String::new())
            }
            Err(e) => (false, e.to_string()),
        }
    }
}
