use crate::board::{Board, Position, Symbol};
use crate::error::{Error, Result};
use crate::players::Player;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::search::{DEFAULT_MAX_DEPTH, MinimaxSearch, Strategy};
use log::info;

/// A player that picks moves with one of the [`Strategy`] variants.
///
/// Searching strategies simulate moves directly on the board they are given
/// and leave it as they found it.
pub struct ComputerPlayer<K: RandomGenerator = StandardRandomGenerator> {
    symbol: Symbol,
    strategy: Strategy,
    max_depth: u32,
    random: K,
}

/// A builder for creating instances of `ComputerPlayer`.
pub struct ComputerPlayerBuilder<K: RandomGenerator> {
    symbol: Symbol,
    strategy: Strategy,
    max_depth: u32,
    random_generator: K,
}

impl ComputerPlayerBuilder<StandardRandomGenerator> {
    /// Creates a builder for a minimax player of depth [`DEFAULT_MAX_DEPTH`].
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            strategy: Strategy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            random_generator: StandardRandomGenerator,
        }
    }
}

impl<K: RandomGenerator> ComputerPlayerBuilder<K> {
    /// Sets the move selection strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the depth at which the search falls back to the heuristic.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the random number generator used by [`Strategy::Random`].
    pub fn with_random_generator<R: RandomGenerator>(self, rg: R) -> ComputerPlayerBuilder<R> {
        ComputerPlayerBuilder {
            symbol: self.symbol,
            strategy: self.strategy,
            max_depth: self.max_depth,
            random_generator: rg,
        }
    }

    pub fn build(self) -> ComputerPlayer<K> {
        ComputerPlayer {
            symbol: self.symbol,
            strategy: self.strategy,
            max_depth: self.max_depth,
            random: self.random_generator,
        }
    }
}

impl ComputerPlayer<StandardRandomGenerator> {
    /// Returns a new builder for `ComputerPlayer`.
    pub fn builder(symbol: Symbol) -> ComputerPlayerBuilder<StandardRandomGenerator> {
        ComputerPlayerBuilder::new(symbol)
    }

    /// Creates a player backed by the thread-local random generator.
    pub fn new(symbol: Symbol, strategy: Strategy, max_depth: u32) -> Self {
        ComputerPlayer::builder(symbol)
            .with_strategy(strategy)
            .with_max_depth(max_depth)
            .build()
    }
}

impl<K: RandomGenerator> ComputerPlayer<K> {
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// The search this player runs for the minimax strategies.
    pub fn search(&self) -> MinimaxSearch {
        MinimaxSearch::new(self.symbol, self.max_depth, self.strategy.uses_alpha_beta())
    }

    /// Picks any empty position with equal probability.
    pub fn random_move(&mut self, board: &Board) -> Result<Position> {
        let options: Vec<Position> = board.empty_positions().collect();
        self.random
            .choose(&options)
            .copied()
            .ok_or(Error::NoValidMove)
    }
}

impl<K: RandomGenerator> Player for ComputerPlayer<K> {
    fn symbol(&self) -> Symbol {
        self.symbol
    }

    fn select_move(&mut self, board: &mut Board) -> Result<Position> {
        match self.strategy {
            Strategy::Random => self.random_move(board),
            Strategy::Minimax | Strategy::AlphaBeta => {
                let (position, score) = self.search().best_move(board)?;
                info!(
                    "player {} made a move at {position} with a score of {score}",
                    self.symbol
                );
                Ok(position)
            }
        }
    }
}
