//! A perfect agent for playing or analysing N×N tic-tac-toe
//!
//! This agent uses an exhaustive game tree search with alpha-beta pruning
//! to find the best move for any position, optionally bounded in depth for
//! boards too large to search completely.
//!
//! # Basic Usage
//!
//! ```
//! use tictactoe_ai::{board::Player, config::SearchConfig, solver::SearchEngine};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut engine = SearchEngine::new(SearchConfig::default())?;
//! let mut board = engine.new_board(3)?;
//! board.place(0, Player::X)?.place(4, Player::O)?.place(1, Player::X)?;
//!
//! // O has to block the top row
//! let decision = engine.best_move(&mut board, Player::O, None, false)?;
//!
//! assert_eq!(decision.index, 2);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod winning_lines;

pub mod board;

pub mod evaluator;

pub mod config;

pub mod solver;

mod parallel;


/// The board size used when none is given
pub const DEFAULT_SIZE: usize = 3;

/// The depth limit used for boards larger than 3x3
pub const DEFAULT_BOUNDED_DEPTH: usize = 4;

const_assert!(DEFAULT_SIZE >= 1);
const_assert!(DEFAULT_BOUNDED_DEPTH >= 1);

// the parallel driver moves boards between worker threads
assert_impl_all!(board::BoardState: Send, Sync, Clone);
assert_impl_all!(winning_lines::LineCache: Send, Sync);
assert_impl_all!(solver::SearchEngine: Send);
