//! A small N x N tic-tac-toe engine with computer players.
//!
//! The crate provides a board with incremental legal-move tracking, and
//! computer players that pick moves at random, with depth-limited minimax, or
//! with minimax plus alpha-beta pruning. The search simulates moves directly on
//! the shared board and always puts it back the way it found it.
//!
//! # Example
//!
//! ```rust
//! use tictactoe_lib::board::{Board, Position, Symbol};
//! use tictactoe_lib::players::{ComputerPlayer, Player};
//! use tictactoe_lib::search::Strategy;
//!
//! // X threatens the top row
//! let mut board = Board::square(3);
//! board.make_move(Symbol::X, (0, 0)).unwrap();
//! board.make_move(Symbol::X, (0, 1)).unwrap();
//! board.make_move(Symbol::O, (1, 0)).unwrap();
//!
//! // Create and configure a computer player using the builder
//! let mut player = ComputerPlayer::builder(Symbol::X)
//!     .with_strategy(Strategy::AlphaBeta)
//!     .with_max_depth(9)
//!     .build();
//!
//! // Let it move
//! let position = player.make_move(&mut board).unwrap();
//!
//! assert_eq!(position, Position::new(0, 2));
//! assert_eq!(board.check_winner(), Some(Symbol::X));
//! ```

/// Contains the `Board` grid, the `Symbol` and `Position` types and the scoped move guard.
pub mod board;
/// Contains the crate's `Error` type and `Result` alias.
pub mod error;
/// Contains a headless turn loop seating two players on one board.
pub mod game;
/// Contains the `Player` trait and its human and computer implementations.
pub mod players;
/// Contains traits and implementations for random number generation.
pub mod random;
/// Contains the move selection strategies and the minimax search.
pub mod search;

pub use error::{Error, Result};
