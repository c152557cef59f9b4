//! A Connect 4 engine that picks moves with a fixed-depth minimax search
//!
//! The search uses alpha-beta pruning over independent board copies and
//! scores cutoff positions with a hand-tuned window heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::{Grid, Piece}, search::Searcher};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let grid = Grid::from_moves("112233")?;
//! let mut searcher = Searcher::new();
//! let column = searcher.choose_move(&grid, 3, Piece::PlayerOne, Piece::PlayerTwo);
//!
//! assert_eq!(column, Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod heuristic;

pub mod search;

pub mod difficulty;

pub mod game;

pub mod leaderboard;

pub mod config;

pub mod error;


pub use board::{GameOutcome, Grid, Piece};
pub use difficulty::Difficulty;
pub use search::{Score, Searcher, TieBreak};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win
pub const WINDOW_LENGTH: usize = 4;

/// The deepest search the engine will accept, one ply per cell
pub const MAX_DEPTH: u32 = (WIDTH * HEIGHT) as u32;

// every orientation needs at least one full window
const_assert!(WIDTH >= WINDOW_LENGTH);
const_assert!(HEIGHT >= WINDOW_LENGTH);
