use crate::board::{Board, Position, Symbol};
use crate::error::Result;
use crate::players::Player;
use log::info;
use std::time::{Duration, Instant};

/// How a finished game ended.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameOutcome {
    Winner(Symbol),
    Tie,
}

/// What happened during one call to [`Game::play_turn`].
#[derive(Debug, Clone)]
pub struct Turn {
    /// 1-based turn number.
    pub number: usize,
    pub symbol: Symbol,
    pub position: Position,
    pub elapsed: Duration,
}

/// A headless turn loop: two players alternate on one board until someone
/// completes a line or the board fills up. Player 1 moves on even turns.
pub struct Game {
    board: Board,
    players: [Box<dyn Player>; 2],
    turn_counter: usize,
}

impl Game {
    pub fn new(board: Board, player_1: Box<dyn Player>, player_2: Box<dyn Player>) -> Self {
        Self {
            board,
            players: [player_1, player_2],
            turn_counter: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of turns played so far.
    pub fn turn_counter(&self) -> usize {
        self.turn_counter
    }

    /// The player who moves next.
    pub fn current_player(&self) -> &dyn Player {
        self.players[self.turn_counter % 2].as_ref()
    }

    /// Returns the outcome once the board has a winner or no empty cell left.
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.board.check_winner() {
            Some(symbol) => Some(GameOutcome::Winner(symbol)),
            None if self.board.is_full() => Some(GameOutcome::Tie),
            None => None,
        }
    }

    /// Lets the current player make exactly one move.
    pub fn play_turn(&mut self) -> Result<Turn> {
        let player = &mut self.players[self.turn_counter % 2];
        let start = Instant::now();
        let position = player.make_move(&mut self.board)?;
        let elapsed = start.elapsed();

        self.turn_counter += 1;
        let turn = Turn {
            number: self.turn_counter,
            symbol: player.symbol(),
            position,
            elapsed,
        };
        info!(
            "turn {}: player {} played {} in {:.2?}",
            turn.number, turn.symbol, turn.position, turn.elapsed
        );
        Ok(turn)
    }

    /// Plays turns until the game is decided, calling `on_turn` after each one.
    pub fn play_with(&mut self, mut on_turn: impl FnMut(&Game, &Turn)) -> Result<GameOutcome> {
        loop {
            if let Some(outcome) = self.outcome() {
                return Ok(outcome);
            }
            let turn = self.play_turn()?;
            on_turn(self, &turn);
        }
    }

    /// Plays turns until the game is decided.
    pub fn play(&mut self) -> Result<GameOutcome> {
        self.play_with(|_, _| {})
    }
}
