//! The two kinds of player a game can seat.

use crate::board::{Board, Position, Symbol};
use crate::error::Result;

/// A computer player driven by random choice or minimax search.
pub mod computer;
/// A human player reading moves from a text stream.
pub mod human;

pub use computer::{ComputerPlayer, ComputerPlayerBuilder};
pub use human::HumanPlayer;

/// A participant that picks moves for its symbol.
///
/// The turn loop hands every player the shared board by mutable reference;
/// players never keep a copy of it.
pub trait Player {
    /// The symbol this player places.
    fn symbol(&self) -> Symbol;

    /// Chooses a legal position on `board` without applying it.
    ///
    /// The board may be mutated while deciding but is restored before this returns.
    fn select_move(&mut self, board: &mut Board) -> Result<Position>;

    /// Chooses a position and places this player's symbol there.
    fn make_move(&mut self, board: &mut Board) -> Result<Position> {
        let position = self.select_move(board)?;
        board.make_move(self.symbol(), position)?;
        Ok(position)
    }
}
